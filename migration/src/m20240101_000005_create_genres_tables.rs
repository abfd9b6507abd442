use sea_orm_migration::prelude::*;

use super::m20240101_000004_create_songs_table::Canciones;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Generos::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Generos::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Generos::Nombre)
                            .string_len(100)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Generos::Descripcion).text())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(CancionesGeneros::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(CancionesGeneros::IdCancion).integer().not_null())
                    .col(ColumnDef::new(CancionesGeneros::IdGenero).integer().not_null())
                    .primary_key(
                        Index::create()
                            .col(CancionesGeneros::IdCancion)
                            .col(CancionesGeneros::IdGenero),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_canciones_generos_id_cancion")
                            .from(CancionesGeneros::Table, CancionesGeneros::IdCancion)
                            .to(Canciones::Table, Canciones::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_canciones_generos_id_genero")
                            .from(CancionesGeneros::Table, CancionesGeneros::IdGenero)
                            .to(Generos::Table, Generos::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_canciones_generos_id_genero")
                    .table(CancionesGeneros::Table)
                    .col(CancionesGeneros::IdGenero)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(CancionesGeneros::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Generos::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Generos {
    Table,
    Id,
    Nombre,
    Descripcion,
}

#[derive(DeriveIden)]
pub enum CancionesGeneros {
    Table,
    IdCancion,
    IdGenero,
}
