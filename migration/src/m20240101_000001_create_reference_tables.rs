use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Paises::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Paises::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Paises::Nombre).string_len(100).not_null().unique_key())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Discograficas::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Discograficas::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Discograficas::Nombre).string_len(200).not_null())
                    .col(ColumnDef::new(Discograficas::IdPais).integer().not_null())
                    .col(
                        ColumnDef::new(Discograficas::Ingresos)
                            .double()
                            .not_null()
                            .default(0.0),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_discograficas_id_pais")
                            .from(Discograficas::Table, Discograficas::IdPais)
                            .to(Paises::Table, Paises::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Roles::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Roles::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Roles::Nombre).string_len(50).not_null().unique_key())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(TiposSuscripcion::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(TiposSuscripcion::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(TiposSuscripcion::Nombre)
                            .string_len(100)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(TiposSuscripcion::Precio).double().not_null())
                    .col(
                        ColumnDef::new(TiposSuscripcion::DuracionMeses)
                            .integer()
                            .not_null()
                            .default(1),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(TiposSuscripcion::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Roles::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Discograficas::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Paises::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Paises {
    Table,
    Id,
    Nombre,
}

#[derive(DeriveIden)]
pub enum Discograficas {
    Table,
    Id,
    Nombre,
    IdPais,
    Ingresos,
}

#[derive(DeriveIden)]
pub enum Roles {
    Table,
    Id,
    Nombre,
}

#[derive(DeriveIden)]
pub enum TiposSuscripcion {
    Table,
    Id,
    Nombre,
    Precio,
    DuracionMeses,
}
