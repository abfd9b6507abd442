use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Artistas::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Artistas::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Artistas::Nombre)
                            .string_len(200)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Artistas::Biografia).text())
                    .col(ColumnDef::new(Artistas::ImagenUrl).string_len(500))
                    .col(
                        ColumnDef::new(Artistas::Ingresos)
                            .double()
                            .not_null()
                            .default(0.0),
                    )
                    .col(
                        ColumnDef::new(Artistas::FechaRegistro)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Artistas::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Artistas {
    Table,
    Id,
    Nombre,
    Biografia,
    ImagenUrl,
    Ingresos,
    FechaRegistro,
}
