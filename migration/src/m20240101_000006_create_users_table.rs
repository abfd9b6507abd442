use sea_orm_migration::prelude::*;

use super::m20240101_000001_create_reference_tables::{Paises, Roles};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Usuarios::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Usuarios::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Usuarios::Email)
                            .string_len(255)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Usuarios::PasswordHash).string_len(255).not_null())
                    .col(ColumnDef::new(Usuarios::FechaNacimiento).date().not_null())
                    .col(ColumnDef::new(Usuarios::Sexo).string_len(1).not_null())
                    .col(ColumnDef::new(Usuarios::CodigoPostal).string_len(20))
                    .col(ColumnDef::new(Usuarios::IdPais).integer().not_null())
                    .col(
                        ColumnDef::new(Usuarios::FechaRegistro)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Usuarios::FechaUltCambioPassword)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Usuarios::IdRol).integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_usuarios_id_pais")
                            .from(Usuarios::Table, Usuarios::IdPais)
                            .to(Paises::Table, Paises::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_usuarios_id_rol")
                            .from(Usuarios::Table, Usuarios::IdRol)
                            .to(Roles::Table, Roles::Id),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Usuarios::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Usuarios {
    Table,
    Id,
    Email,
    PasswordHash,
    FechaNacimiento,
    Sexo,
    CodigoPostal,
    IdPais,
    FechaRegistro,
    FechaUltCambioPassword,
    IdRol,
}
