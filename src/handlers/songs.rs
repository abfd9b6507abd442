use axum::{
    extract::{Path, State},
    Json,
};
use chrono::Utc;
use sea_orm::{
    sea_query::Query, ActiveModelTrait, ColumnTrait, Condition, EntityTrait, IntoActiveModel,
    ModelTrait, Order, QueryFilter, QueryOrder, QuerySelect, Set,
};
use serde::Deserialize;

use crate::{
    db::entities::{genre, song, song_genre, Album, Genre, Song, SongGenre},
    error::{AppError, Result},
    handlers::{created, Created, JsonBody, MessageResponse, QueryParams, NOTHING_TO_UPDATE},
    middleware::AuthUser,
    query::{order, parse_direction, Pagination},
    state::AppState,
    validation::{exists, exists_by_id, require, require_text, RuleSet},
};

const DUPLICATE_SONG: &str = "La canción ya existe en este álbum";
const DUPLICATE_GENRE_LINK: &str = "La canción ya tiene asignado ese género";
const MIN_DURATION_SECS: f64 = 100.0;
const DEFAULT_RANKING_SIZE: u64 = 10;
const MAX_RANKING_SIZE: u64 = 100;

#[derive(Deserialize)]
pub struct ListSongsQuery {
    pub orden: Option<String>,
    pub direccion: Option<String>,
    pub page: Option<u64>,
    pub limit: Option<u64>,
}

#[derive(Deserialize)]
pub struct FilterSongsQuery {
    pub genero: Option<i32>,
    pub albumid: Option<i32>,
    pub page: Option<u64>,
    pub limit: Option<u64>,
}

#[derive(Deserialize)]
pub struct RankingQuery {
    pub limit: Option<u64>,
}

#[derive(Deserialize)]
pub struct CreateSongRequest {
    pub titulo: Option<String>,
    pub duracion_segundos: Option<f64>,
    pub id_album: Option<i32>,
}

#[derive(Deserialize)]
pub struct UpdateSongRequest {
    pub titulo: Option<String>,
    pub duracion_segundos: Option<f64>,
}

#[derive(Deserialize)]
pub struct AddGenreRequest {
    pub id_genero: Option<i32>,
}

fn sort_column(raw: Option<&str>) -> Result<song::Column> {
    match raw {
        None | Some("id") => Ok(song::Column::Id),
        Some("titulo") => Ok(song::Column::Titulo),
        Some("duracion_segundos") => Ok(song::Column::DuracionSegundos),
        Some("reproducciones") => Ok(song::Column::Reproducciones),
        Some("likes") => Ok(song::Column::Likes),
        Some("fecha_agregada") => Ok(song::Column::FechaAgregada),
        Some(other) => Err(AppError::BadRequest(format!(
            "No se puede ordenar por '{}'",
            other
        ))),
    }
}

async fn find_song(state: &AppState, id: i32) -> Result<song::Model> {
    Song::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("No existe canción con id {}", id)))
}

pub async fn list_songs(
    State(state): State<AppState>,
    QueryParams(query): QueryParams<ListSongsQuery>,
) -> Result<Json<Vec<song::Model>>> {
    let column = sort_column(query.orden.as_deref())?;
    let direction = parse_direction(query.direccion.as_deref(), Order::Asc)?;

    let select = order(Song::find(), column, direction, song::Column::Id);
    let select = Pagination {
        page: query.page,
        limit: query.limit,
    }
    .apply(select)?;

    Ok(Json(select.all(&state.db).await?))
}

/// Songs in a genre or on an album; either criterion is enough to match.
pub async fn filter_songs(
    State(state): State<AppState>,
    QueryParams(query): QueryParams<FilterSongsQuery>,
) -> Result<Json<Vec<song::Model>>> {
    if query.genero.is_none() && query.albumid.is_none() {
        return Err(AppError::BadRequest(
            "Debe indicar 'genero' o 'albumid' para filtrar".to_string(),
        ));
    }

    let mut condition = Condition::any();
    if let Some(genre_id) = query.genero {
        condition = condition.add(
            song::Column::Id.in_subquery(
                Query::select()
                    .column(song_genre::Column::IdCancion)
                    .from(SongGenre)
                    .and_where(song_genre::Column::IdGenero.eq(genre_id))
                    .to_owned(),
            ),
        );
    }
    if let Some(album_id) = query.albumid {
        condition = condition.add(song::Column::IdAlbum.eq(album_id));
    }

    let select = Pagination {
        page: query.page,
        limit: query.limit,
    }
    .apply(Song::find().filter(condition).order_by_asc(song::Column::Id))?;

    Ok(Json(select.all(&state.db).await?))
}

async fn ranking(state: &AppState, limit: Option<u64>, column: song::Column) -> Result<Vec<song::Model>> {
    let limit = limit.unwrap_or(DEFAULT_RANKING_SIZE);
    if limit == 0 || limit > MAX_RANKING_SIZE {
        return Err(AppError::BadRequest(format!(
            "El parámetro 'limit' debe estar entre 1 y {}",
            MAX_RANKING_SIZE
        )));
    }

    Ok(order(Song::find(), column, Order::Desc, song::Column::Id)
        .limit(limit)
        .all(&state.db)
        .await?)
}

pub async fn most_played(
    State(state): State<AppState>,
    QueryParams(query): QueryParams<RankingQuery>,
) -> Result<Json<Vec<song::Model>>> {
    Ok(Json(ranking(&state, query.limit, song::Column::Reproducciones).await?))
}

pub async fn most_liked(
    State(state): State<AppState>,
    QueryParams(query): QueryParams<RankingQuery>,
) -> Result<Json<Vec<song::Model>>> {
    Ok(Json(ranking(&state, query.limit, song::Column::Likes).await?))
}

pub async fn most_recent(
    State(state): State<AppState>,
    QueryParams(query): QueryParams<RankingQuery>,
) -> Result<Json<Vec<song::Model>>> {
    Ok(Json(ranking(&state, query.limit, song::Column::FechaAgregada).await?))
}

pub async fn get_song(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<song::Model>> {
    Ok(Json(find_song(&state, id).await?))
}

pub async fn create_song(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    JsonBody(payload): JsonBody<CreateSongRequest>,
) -> Result<Created> {
    let titulo = require_text("titulo", payload.titulo)?;
    let duracion = require("duracion_segundos", payload.duracion_segundos)?;
    let album_id = require("id_album", payload.id_album)?;

    RuleSet::new()
        .references("álbum", album_id, exists_by_id::<Album>(&state.db, album_id))
        .integral("duracion_segundos", duracion)
        .at_least("duracion_segundos", duracion, MIN_DURATION_SECS)
        .unique(
            exists::<Song>(
                &state.db,
                Condition::all()
                    .add(song::Column::Titulo.eq(titulo.as_str()))
                    .add(song::Column::IdAlbum.eq(album_id)),
            ),
            DUPLICATE_SONG,
        )
        .check()
        .await?;

    let song = song::ActiveModel {
        titulo: Set(titulo),
        duracion_segundos: Set(duracion as i32),
        id_album: Set(album_id),
        reproducciones: Set(0),
        likes: Set(0),
        fecha_agregada: Set(Utc::now().into()),
        ..Default::default()
    }
    .insert(&state.db)
    .await
    .map_err(|e| AppError::from_write(e, DUPLICATE_SONG))?;

    tracing::info!("Song {} created by user {}", song.id, claims.sub);
    Ok(created("Canción creada exitosamente", "CancionNuevaDatos", song))
}

pub async fn update_song(
    State(state): State<AppState>,
    AuthUser(_): AuthUser,
    Path(id): Path<i32>,
    JsonBody(payload): JsonBody<UpdateSongRequest>,
) -> Result<Json<song::Model>> {
    if payload.titulo.is_none() && payload.duracion_segundos.is_none() {
        return Err(AppError::BadRequest(NOTHING_TO_UPDATE.to_string()));
    }

    let current = find_song(&state, id).await?;
    let titulo = payload
        .titulo
        .map(|t| require_text("titulo", Some(t)))
        .transpose()?;

    let mut rules = RuleSet::new();
    if let Some(duracion) = payload.duracion_segundos {
        rules = rules
            .integral("duracion_segundos", duracion)
            .at_least("duracion_segundos", duracion, MIN_DURATION_SECS);
    }
    if let Some(titulo) = &titulo {
        rules = rules.unique(
            exists::<Song>(
                &state.db,
                Condition::all()
                    .add(song::Column::Titulo.eq(titulo.as_str()))
                    .add(song::Column::IdAlbum.eq(current.id_album))
                    .add(song::Column::Id.ne(id)),
            ),
            DUPLICATE_SONG,
        );
    }
    rules.check().await?;

    let mut active = current.into_active_model();
    if let Some(titulo) = titulo {
        active.titulo = Set(titulo);
    }
    if let Some(duracion) = payload.duracion_segundos {
        active.duracion_segundos = Set(duracion as i32);
    }

    let updated = active
        .update(&state.db)
        .await
        .map_err(|e| AppError::from_write(e, DUPLICATE_SONG))?;
    Ok(Json(updated))
}

pub async fn list_song_genres(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Vec<genre::Model>>> {
    let song = find_song(&state, id).await?;
    let genres = song
        .find_related(Genre)
        .order_by_asc(genre::Column::Nombre)
        .all(&state.db)
        .await?;
    Ok(Json(genres))
}

pub async fn add_song_genre(
    State(state): State<AppState>,
    AuthUser(_): AuthUser,
    Path(id): Path<i32>,
    JsonBody(payload): JsonBody<AddGenreRequest>,
) -> Result<Created> {
    let genre_id = require("id_genero", payload.id_genero)?;

    RuleSet::new()
        .references("canción", id, exists_by_id::<Song>(&state.db, id))
        .references("género", genre_id, exists_by_id::<Genre>(&state.db, genre_id))
        .unique(
            exists::<SongGenre>(
                &state.db,
                Condition::all()
                    .add(song_genre::Column::IdCancion.eq(id))
                    .add(song_genre::Column::IdGenero.eq(genre_id)),
            ),
            DUPLICATE_GENRE_LINK,
        )
        .check()
        .await?;

    let link = song_genre::ActiveModel {
        id_cancion: Set(id),
        id_genero: Set(genre_id),
    }
    .insert(&state.db)
    .await
    .map_err(|e| AppError::from_write(e, DUPLICATE_GENRE_LINK))?;

    tracing::info!("Genre {} assigned to song {}", genre_id, id);
    Ok(created("Género asignado a la canción", "CancionGeneroNuevoDatos", link))
}

pub async fn remove_song_genre(
    State(state): State<AppState>,
    AuthUser(_): AuthUser,
    Path((id, genre_id)): Path<(i32, i32)>,
) -> Result<Json<MessageResponse>> {
    let link = SongGenre::find_by_id((id, genre_id))
        .one(&state.db)
        .await?
        .ok_or_else(|| {
            AppError::NotFound(format!(
                "La canción {} no tiene asignado el género {}",
                id, genre_id
            ))
        })?;

    link.delete(&state.db).await?;
    tracing::info!("Genre {} removed from song {}", genre_id, id);

    Ok(Json(MessageResponse {
        message: "Género quitado de la canción".to_string(),
    }))
}
