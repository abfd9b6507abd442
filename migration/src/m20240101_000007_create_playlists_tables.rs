use sea_orm_migration::prelude::*;

use super::m20240101_000004_create_songs_table::Canciones;
use super::m20240101_000006_create_users_table::Usuarios;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Playlists::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Playlists::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Playlists::IdUsuario).integer().not_null())
                    .col(ColumnDef::new(Playlists::Titulo).string_len(200).not_null())
                    .col(
                        ColumnDef::new(Playlists::CantidadCanciones)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Playlists::FechaCreacion)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Playlists::FechaEliminacion).timestamp_with_time_zone())
                    .col(
                        ColumnDef::new(Playlists::Activo)
                            .integer()
                            .not_null()
                            .default(1)
                            .check(Expr::col(Playlists::Activo).is_in([0, 1])),
                    )
                    .col(
                        ColumnDef::new(Playlists::Estado)
                            .string_len(50)
                            .not_null()
                            .default("publica"),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_playlists_id_usuario")
                            .from(Playlists::Table, Playlists::IdUsuario)
                            .to(Usuarios::Table, Usuarios::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_playlists_usuario_titulo")
                    .table(Playlists::Table)
                    .col(Playlists::IdUsuario)
                    .col(Playlists::Titulo)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(PlaylistsCanciones::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(PlaylistsCanciones::IdPlaylist).integer().not_null())
                    .col(ColumnDef::new(PlaylistsCanciones::IdCancion).integer().not_null())
                    .col(
                        ColumnDef::new(PlaylistsCanciones::FechaAgregada)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(PlaylistsCanciones::Orden).integer())
                    .primary_key(
                        Index::create()
                            .col(PlaylistsCanciones::IdPlaylist)
                            .col(PlaylistsCanciones::IdCancion),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_playlists_canciones_id_playlist")
                            .from(PlaylistsCanciones::Table, PlaylistsCanciones::IdPlaylist)
                            .to(Playlists::Table, Playlists::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_playlists_canciones_id_cancion")
                            .from(PlaylistsCanciones::Table, PlaylistsCanciones::IdCancion)
                            .to(Canciones::Table, Canciones::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(PlaylistsCanciones::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Playlists::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Playlists {
    Table,
    Id,
    IdUsuario,
    Titulo,
    CantidadCanciones,
    FechaCreacion,
    FechaEliminacion,
    Activo,
    Estado,
}

#[derive(DeriveIden)]
pub enum PlaylistsCanciones {
    Table,
    IdPlaylist,
    IdCancion,
    FechaAgregada,
    Orden,
}
