use sea_orm_migration::prelude::*;

use super::m20240101_000003_create_albums_table::Albumes;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Canciones::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Canciones::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Canciones::Titulo).string_len(300).not_null())
                    .col(
                        ColumnDef::new(Canciones::DuracionSegundos)
                            .integer()
                            .not_null()
                            .check(Expr::col(Canciones::DuracionSegundos).gte(100)),
                    )
                    .col(ColumnDef::new(Canciones::IdAlbum).integer().not_null())
                    .col(
                        ColumnDef::new(Canciones::Reproducciones)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Canciones::Likes)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Canciones::FechaAgregada)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_canciones_id_album")
                            .from(Canciones::Table, Canciones::IdAlbum)
                            .to(Albumes::Table, Albumes::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_canciones_titulo_album")
                    .table(Canciones::Table)
                    .col(Canciones::Titulo)
                    .col(Canciones::IdAlbum)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_canciones_id_album")
                    .table(Canciones::Table)
                    .col(Canciones::IdAlbum)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Canciones::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Canciones {
    Table,
    Id,
    Titulo,
    DuracionSegundos,
    IdAlbum,
    Reproducciones,
    Likes,
    FechaAgregada,
}
