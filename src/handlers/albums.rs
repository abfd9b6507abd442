use axum::{
    extract::{Path, State},
    Json,
};
use sea_orm::{ActiveModelTrait, ColumnTrait, Condition, EntityTrait, QueryFilter, QueryOrder, Set};
use serde::Deserialize;

use crate::{
    db::entities::{album, Album, Artist, Label},
    error::{AppError, Result},
    handlers::{created, Created, JsonBody, QueryParams},
    middleware::AuthUser,
    query::Pagination,
    state::AppState,
    validation::{exists, exists_by_id, require, require_text, RuleSet},
};

const DUPLICATE_ALBUM: &str = "El álbum ya existe para este artista";
const MIN_RELEASE_YEAR: f64 = 1930.0;
const MAX_RELEASE_YEAR: f64 = 2030.0;

#[derive(Deserialize)]
pub struct ListAlbumsQuery {
    pub artista: Option<i32>,
    pub page: Option<u64>,
    pub limit: Option<u64>,
}

#[derive(Deserialize)]
pub struct CreateAlbumRequest {
    pub titulo: Option<String>,
    pub anio_lanzamiento: Option<f64>,
    pub id_artista: Option<i32>,
    pub id_discografica: Option<i32>,
    pub imagen_portada: Option<String>,
    pub duracion_total: Option<f64>,
}

pub async fn list_albums(
    State(state): State<AppState>,
    QueryParams(query): QueryParams<ListAlbumsQuery>,
) -> Result<Json<Vec<album::Model>>> {
    let mut select = Album::find();
    if let Some(artist_id) = query.artista {
        select = select.filter(album::Column::IdArtista.eq(artist_id));
    }

    let select = Pagination {
        page: query.page,
        limit: query.limit,
    }
    .apply(select.order_by_asc(album::Column::Id))?;

    Ok(Json(select.all(&state.db).await?))
}

pub async fn get_album(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<album::Model>> {
    let album = Album::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("No existe álbum con id {}", id)))?;
    Ok(Json(album))
}

pub async fn create_album(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    JsonBody(payload): JsonBody<CreateAlbumRequest>,
) -> Result<Created> {
    let titulo = require_text("titulo", payload.titulo)?;
    let anio = require("anio_lanzamiento", payload.anio_lanzamiento)?;
    let artist_id = require("id_artista", payload.id_artista)?;

    let mut rules = RuleSet::new()
        .references("artista", artist_id, exists_by_id::<Artist>(&state.db, artist_id))
        .integral("anio_lanzamiento", anio)
        .between("anio_lanzamiento", anio, MIN_RELEASE_YEAR, MAX_RELEASE_YEAR)
        .unique(
            exists::<Album>(
                &state.db,
                Condition::all()
                    .add(album::Column::Titulo.eq(titulo.as_str()))
                    .add(album::Column::IdArtista.eq(artist_id)),
            ),
            DUPLICATE_ALBUM,
        );
    if let Some(label_id) = payload.id_discografica {
        rules = rules.references(
            "discográfica",
            label_id,
            exists_by_id::<Label>(&state.db, label_id),
        );
    }
    if let Some(total) = payload.duracion_total {
        rules = rules
            .integral("duracion_total", total)
            .at_least("duracion_total", total, 0.0);
    }
    rules.check().await?;

    let album = album::ActiveModel {
        titulo: Set(titulo),
        anio_lanzamiento: Set(anio as i32),
        id_artista: Set(artist_id),
        id_discografica: Set(payload.id_discografica),
        imagen_portada: Set(payload.imagen_portada),
        duracion_total: Set(payload.duracion_total.unwrap_or(0.0) as i32),
        ..Default::default()
    }
    .insert(&state.db)
    .await
    .map_err(|e| AppError::from_write(e, DUPLICATE_ALBUM))?;

    tracing::info!("Album {} created by user {}", album.id, claims.sub);
    Ok(created("Álbum creado exitosamente", "AlbumNuevoDatos", album))
}
