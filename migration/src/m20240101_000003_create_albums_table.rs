use sea_orm_migration::prelude::*;

use super::m20240101_000001_create_reference_tables::Discograficas;
use super::m20240101_000002_create_artists_table::Artistas;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Albumes::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Albumes::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Albumes::Titulo).string_len(300).not_null())
                    .col(ColumnDef::new(Albumes::AnioLanzamiento).integer().not_null())
                    .col(ColumnDef::new(Albumes::IdArtista).integer().not_null())
                    .col(ColumnDef::new(Albumes::IdDiscografica).integer())
                    .col(ColumnDef::new(Albumes::ImagenPortada).string_len(500))
                    .col(
                        ColumnDef::new(Albumes::DuracionTotal)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_albumes_id_artista")
                            .from(Albumes::Table, Albumes::IdArtista)
                            .to(Artistas::Table, Artistas::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_albumes_id_discografica")
                            .from(Albumes::Table, Albumes::IdDiscografica)
                            .to(Discograficas::Table, Discograficas::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_albumes_titulo_artista")
                    .table(Albumes::Table)
                    .col(Albumes::Titulo)
                    .col(Albumes::IdArtista)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Albumes::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Albumes {
    Table,
    Id,
    Titulo,
    AnioLanzamiento,
    IdArtista,
    IdDiscografica,
    ImagenPortada,
    DuracionTotal,
}
