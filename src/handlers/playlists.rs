use axum::{
    extract::{Path, State},
    Json,
};
use chrono::{DateTime, FixedOffset, Utc};
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ColumnTrait, Condition, EntityTrait, IntoActiveModel,
    QueryFilter, QueryOrder, Set, TransactionTrait,
};
use serde::{Deserialize, Serialize};

use crate::{
    db::{
        entities::{playlist, playlist_song, Playlist, PlaylistSong, Song, User},
        enums::PlaylistStatus,
    },
    error::{AppError, Result},
    handlers::{created, Created, JsonBody, MessageResponse, QueryParams, NOTHING_TO_UPDATE},
    middleware::AuthUser,
    query::Pagination,
    state::AppState,
    validation::{exists, exists_by_id, require, require_text, RuleSet},
};

const DUPLICATE_TITLE: &str = "Ya existe una playlist con ese título para este usuario";
const DUPLICATE_ENTRY: &str = "La canción ya está en la playlist";
const INACTIVE_PLAYLIST: &str = "La playlist está dada de baja";

#[derive(Deserialize)]
pub struct ListPlaylistsQuery {
    pub usuario: Option<i32>,
    pub page: Option<u64>,
    pub limit: Option<u64>,
}

#[derive(Deserialize)]
pub struct CreatePlaylistRequest {
    pub titulo: Option<String>,
    /// Defaults to the caller.
    pub id_usuario: Option<i32>,
    pub estado: Option<String>,
}

#[derive(Deserialize)]
pub struct UpdatePlaylistRequest {
    pub titulo: Option<String>,
    pub activo: Option<f64>,
    pub estado: Option<String>,
}

#[derive(Deserialize)]
pub struct AddPlaylistSongRequest {
    pub id_cancion: Option<i32>,
    pub orden: Option<f64>,
}

#[derive(Serialize)]
pub struct PlaylistSongResponse {
    pub id_cancion: i32,
    pub titulo: String,
    pub duracion_segundos: i32,
    pub id_album: i32,
    pub orden: Option<i32>,
    pub fecha_agregada: DateTime<FixedOffset>,
}

async fn find_playlist(state: &AppState, id: i32) -> Result<playlist::Model> {
    Playlist::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("No existe playlist con id {}", id)))
}

pub async fn list_playlists(
    State(state): State<AppState>,
    QueryParams(query): QueryParams<ListPlaylistsQuery>,
) -> Result<Json<Vec<playlist::Model>>> {
    let mut select = Playlist::find();
    if let Some(user_id) = query.usuario {
        select = select.filter(playlist::Column::IdUsuario.eq(user_id));
    }

    let playlists = Pagination {
        page: query.page,
        limit: query.limit,
    }
    .apply(select.order_by_asc(playlist::Column::Id))?
    .all(&state.db)
    .await?;

    Ok(Json(playlists))
}

pub async fn get_playlist(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<playlist::Model>> {
    Ok(Json(find_playlist(&state, id).await?))
}

pub async fn create_playlist(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    JsonBody(payload): JsonBody<CreatePlaylistRequest>,
) -> Result<Created> {
    let titulo = require_text("titulo", payload.titulo)?;
    let owner_id = payload.id_usuario.unwrap_or(claims.sub);
    let estado = payload
        .estado
        .unwrap_or_else(|| PlaylistStatus::Public.as_str().to_string());

    RuleSet::new()
        .references("usuario", owner_id, exists_by_id::<User>(&state.db, owner_id))
        .one_of("estado", estado.as_str(), PlaylistStatus::VALUES)
        .unique(
            exists::<Playlist>(
                &state.db,
                Condition::all()
                    .add(playlist::Column::IdUsuario.eq(owner_id))
                    .add(playlist::Column::Titulo.eq(titulo.as_str())),
            ),
            DUPLICATE_TITLE,
        )
        .check()
        .await?;

    let playlist = playlist::ActiveModel {
        id_usuario: Set(owner_id),
        titulo: Set(titulo),
        cantidad_canciones: Set(0),
        fecha_creacion: Set(Utc::now().into()),
        fecha_eliminacion: Set(None),
        activo: Set(1),
        estado: Set(estado),
        ..Default::default()
    }
    .insert(&state.db)
    .await
    .map_err(|e| AppError::from_write(e, DUPLICATE_TITLE))?;

    tracing::info!("Playlist {} created for user {}", playlist.id, owner_id);
    Ok(created("Playlist creada exitosamente", "PlaylistNuevaDatos", playlist))
}

/// Partial update. Setting `activo` to 0 is the soft delete: the row stays and
/// `fecha_eliminacion` is stamped; reactivating clears it.
pub async fn update_playlist(
    State(state): State<AppState>,
    AuthUser(_): AuthUser,
    Path(id): Path<i32>,
    JsonBody(payload): JsonBody<UpdatePlaylistRequest>,
) -> Result<Json<playlist::Model>> {
    if payload.titulo.is_none() && payload.activo.is_none() && payload.estado.is_none() {
        return Err(AppError::BadRequest(NOTHING_TO_UPDATE.to_string()));
    }

    let current = find_playlist(&state, id).await?;
    let titulo = payload
        .titulo
        .map(|t| require_text("titulo", Some(t)))
        .transpose()?;

    let mut rules = RuleSet::new();
    if let Some(activo) = payload.activo {
        rules = rules
            .integral("activo", activo)
            .between("activo", activo, 0.0, 1.0);
    }
    if let Some(estado) = &payload.estado {
        rules = rules.one_of("estado", estado.as_str(), PlaylistStatus::VALUES);
    }
    if let Some(titulo) = &titulo {
        rules = rules.unique(
            exists::<Playlist>(
                &state.db,
                Condition::all()
                    .add(playlist::Column::IdUsuario.eq(current.id_usuario))
                    .add(playlist::Column::Titulo.eq(titulo.as_str()))
                    .add(playlist::Column::Id.ne(id)),
            ),
            DUPLICATE_TITLE,
        );
    }
    rules.check().await?;

    let mut active = current.into_active_model();
    if let Some(titulo) = titulo {
        active.titulo = Set(titulo);
    }
    if let Some(estado) = payload.estado {
        active.estado = Set(estado);
    }
    if let Some(activo) = payload.activo {
        let activo = activo as i32;
        active.activo = Set(activo);
        active.fecha_eliminacion = Set(if activo == 0 {
            Some(Utc::now().into())
        } else {
            None
        });
    }

    let updated = active
        .update(&state.db)
        .await
        .map_err(|e| AppError::from_write(e, DUPLICATE_TITLE))?;

    if updated.activo == 0 {
        tracing::info!("Playlist {} deactivated", id);
    }
    Ok(Json(updated))
}

pub async fn list_playlist_songs(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Vec<PlaylistSongResponse>>> {
    find_playlist(&state, id).await?;

    let entries = PlaylistSong::find()
        .filter(playlist_song::Column::IdPlaylist.eq(id))
        .order_by_asc(playlist_song::Column::Orden)
        .order_by_asc(playlist_song::Column::FechaAgregada)
        .order_by_asc(playlist_song::Column::IdCancion)
        .find_also_related(Song)
        .all(&state.db)
        .await?;

    let songs = entries
        .into_iter()
        .filter_map(|(entry, song)| {
            song.map(|s| PlaylistSongResponse {
                id_cancion: s.id,
                titulo: s.titulo,
                duracion_segundos: s.duracion_segundos,
                id_album: s.id_album,
                orden: entry.orden,
                fecha_agregada: entry.fecha_agregada,
            })
        })
        .collect();

    Ok(Json(songs))
}

pub async fn add_playlist_song(
    State(state): State<AppState>,
    AuthUser(_): AuthUser,
    Path(id): Path<i32>,
    JsonBody(payload): JsonBody<AddPlaylistSongRequest>,
) -> Result<Created> {
    let song_id = require("id_cancion", payload.id_cancion)?;

    let mut rules = RuleSet::new()
        .references("playlist", id, exists_by_id::<Playlist>(&state.db, id))
        .references("canción", song_id, exists_by_id::<Song>(&state.db, song_id))
        .unique(
            exists::<PlaylistSong>(
                &state.db,
                Condition::all()
                    .add(playlist_song::Column::IdPlaylist.eq(id))
                    .add(playlist_song::Column::IdCancion.eq(song_id)),
            ),
            DUPLICATE_ENTRY,
        )
        .no_conflict(
            exists::<Playlist>(
                &state.db,
                Condition::all()
                    .add(playlist::Column::Id.eq(id))
                    .add(playlist::Column::Activo.eq(0)),
            ),
            INACTIVE_PLAYLIST,
        );
    if let Some(orden) = payload.orden {
        rules = rules.integral("orden", orden).at_least("orden", orden, 1.0);
    }
    rules.check().await?;

    let txn = state.db.begin().await?;
    let entry = playlist_song::ActiveModel {
        id_playlist: Set(id),
        id_cancion: Set(song_id),
        fecha_agregada: Set(Utc::now().into()),
        orden: Set(payload.orden.map(|o| o as i32)),
    }
    .insert(&txn)
    .await
    .map_err(|e| AppError::from_write(e, DUPLICATE_ENTRY))?;

    Playlist::update_many()
        .col_expr(
            playlist::Column::CantidadCanciones,
            Expr::col(playlist::Column::CantidadCanciones).add(1),
        )
        .filter(playlist::Column::Id.eq(id))
        .exec(&txn)
        .await?;
    txn.commit().await?;

    tracing::info!("Song {} added to playlist {}", song_id, id);
    Ok(created("Canción agregada a la playlist", "PlaylistCancionNuevaDatos", entry))
}

pub async fn remove_playlist_song(
    State(state): State<AppState>,
    AuthUser(_): AuthUser,
    Path((id, song_id)): Path<(i32, i32)>,
) -> Result<Json<MessageResponse>> {
    let txn = state.db.begin().await?;
    // Only the request that actually removed the row may touch the counter.
    let removed = PlaylistSong::delete_by_id((id, song_id)).exec(&txn).await?;
    if removed.rows_affected != 1 {
        txn.rollback().await?;
        return Err(AppError::NotFound(format!(
            "La canción {} no está en la playlist {}",
            song_id, id
        )));
    }
    Playlist::update_many()
        .col_expr(
            playlist::Column::CantidadCanciones,
            Expr::col(playlist::Column::CantidadCanciones).sub(1),
        )
        .filter(playlist::Column::Id.eq(id))
        .exec(&txn)
        .await?;
    txn.commit().await?;

    tracing::info!("Song {} removed from playlist {}", song_id, id);
    Ok(Json(MessageResponse {
        message: "Canción quitada de la playlist".to_string(),
    }))
}
