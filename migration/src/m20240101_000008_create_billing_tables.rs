use sea_orm_migration::prelude::*;

use super::m20240101_000001_create_reference_tables::TiposSuscripcion;
use super::m20240101_000006_create_users_table::Usuarios;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Suscripciones::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Suscripciones::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Suscripciones::IdUsuario).integer().not_null())
                    .col(ColumnDef::new(Suscripciones::IdTipoSuscripcion).integer().not_null())
                    .col(ColumnDef::new(Suscripciones::FechaInicio).date().not_null())
                    .col(ColumnDef::new(Suscripciones::FechaRenovacion).date().not_null())
                    .col(
                        ColumnDef::new(Suscripciones::Activo)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_suscripciones_id_usuario")
                            .from(Suscripciones::Table, Suscripciones::IdUsuario)
                            .to(Usuarios::Table, Usuarios::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_suscripciones_id_tipo_suscripcion")
                            .from(Suscripciones::Table, Suscripciones::IdTipoSuscripcion)
                            .to(TiposSuscripcion::Table, TiposSuscripcion::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_suscripciones_unique_periodo")
                    .table(Suscripciones::Table)
                    .col(Suscripciones::IdUsuario)
                    .col(Suscripciones::IdTipoSuscripcion)
                    .col(Suscripciones::FechaInicio)
                    .col(Suscripciones::FechaRenovacion)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Pagos::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Pagos::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Pagos::IdSuscripcion).integer().not_null())
                    .col(ColumnDef::new(Pagos::IdUsuario).integer().not_null())
                    .col(ColumnDef::new(Pagos::Importe).double().not_null())
                    .col(ColumnDef::new(Pagos::FechaPago).date().not_null())
                    .col(ColumnDef::new(Pagos::MetodoPago).string_len(50).not_null())
                    .col(
                        ColumnDef::new(Pagos::Estado)
                            .string_len(30)
                            .not_null()
                            .default("pendiente"),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_pagos_id_suscripcion")
                            .from(Pagos::Table, Pagos::IdSuscripcion)
                            .to(Suscripciones::Table, Suscripciones::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_pagos_id_usuario")
                            .from(Pagos::Table, Pagos::IdUsuario)
                            .to(Usuarios::Table, Usuarios::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_pagos_unique_operacion")
                    .table(Pagos::Table)
                    .col(Pagos::IdUsuario)
                    .col(Pagos::IdSuscripcion)
                    .col(Pagos::MetodoPago)
                    .col(Pagos::FechaPago)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(MetodosPago::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(MetodosPago::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(MetodosPago::IdUsuario).integer().not_null())
                    .col(ColumnDef::new(MetodosPago::TipoPago).string_len(30).not_null())
                    .col(ColumnDef::new(MetodosPago::Cbu).string_len(30))
                    .col(ColumnDef::new(MetodosPago::NumeroTarjeta).string_len(30))
                    .col(ColumnDef::new(MetodosPago::MesCaducidad).integer())
                    .col(ColumnDef::new(MetodosPago::AnioCaducidad).integer())
                    .col(ColumnDef::new(MetodosPago::Cvc).string_len(4))
                    .col(
                        ColumnDef::new(MetodosPago::FechaCreacion)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(MetodosPago::Activo)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_metodos_pago_id_usuario")
                            .from(MetodosPago::Table, MetodosPago::IdUsuario)
                            .to(Usuarios::Table, Usuarios::Id),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(MetodosPago::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Pagos::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Suscripciones::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Suscripciones {
    Table,
    Id,
    IdUsuario,
    IdTipoSuscripcion,
    FechaInicio,
    FechaRenovacion,
    Activo,
}

#[derive(DeriveIden)]
pub enum Pagos {
    Table,
    Id,
    IdSuscripcion,
    IdUsuario,
    Importe,
    FechaPago,
    MetodoPago,
    Estado,
}

#[derive(DeriveIden)]
pub enum MetodosPago {
    Table,
    Id,
    IdUsuario,
    TipoPago,
    Cbu,
    NumeroTarjeta,
    MesCaducidad,
    AnioCaducidad,
    Cvc,
    FechaCreacion,
    Activo,
}
