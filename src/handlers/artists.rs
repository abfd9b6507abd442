use axum::{
    extract::{Path, State},
    Json,
};
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, IntoActiveModel, QueryOrder, Set,
};
use serde::Deserialize;

use crate::{
    db::entities::{artist, Artist},
    error::{AppError, Result},
    handlers::{created, Created, JsonBody, QueryParams, NOTHING_TO_UPDATE},
    middleware::AuthUser,
    query::Pagination,
    state::AppState,
    validation::{exists, require_text, RuleSet},
};

const DUPLICATE_NAME: &str = "El nombre del artista ya existe, debe elegir otro";

#[derive(Deserialize)]
pub struct CreateArtistRequest {
    pub nombre: Option<String>,
    pub biografia: Option<String>,
    pub imagen_url: Option<String>,
}

#[derive(Deserialize)]
pub struct UpdateArtistRequest {
    pub nombre: Option<String>,
    pub biografia: Option<String>,
    pub imagen_url: Option<String>,
}

pub async fn list_artists(
    State(state): State<AppState>,
    QueryParams(pagination): QueryParams<Pagination>,
) -> Result<Json<Vec<artist::Model>>> {
    let select = pagination.apply(Artist::find().order_by_asc(artist::Column::Id))?;
    Ok(Json(select.all(&state.db).await?))
}

pub async fn get_artist(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<artist::Model>> {
    let artist = Artist::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("No existe artista con id {}", id)))?;
    Ok(Json(artist))
}

pub async fn create_artist(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    JsonBody(payload): JsonBody<CreateArtistRequest>,
) -> Result<Created> {
    let nombre = require_text("nombre", payload.nombre)?;

    RuleSet::new()
        .unique(
            exists::<Artist>(
                &state.db,
                Condition::all().add(artist::Column::Nombre.eq(nombre.as_str())),
            ),
            DUPLICATE_NAME,
        )
        .check()
        .await?;

    let artist = artist::ActiveModel {
        nombre: Set(nombre),
        biografia: Set(payload.biografia),
        imagen_url: Set(payload.imagen_url),
        ingresos: Set(0.0),
        fecha_registro: Set(Utc::now().into()),
        ..Default::default()
    }
    .insert(&state.db)
    .await
    .map_err(|e| AppError::from_write(e, DUPLICATE_NAME))?;

    tracing::info!("Artist {} created by user {}", artist.id, claims.sub);
    Ok(created("Artista creado exitosamente", "ArtistaNuevoDatos", artist))
}

pub async fn update_artist(
    State(state): State<AppState>,
    AuthUser(_): AuthUser,
    Path(id): Path<i32>,
    JsonBody(payload): JsonBody<UpdateArtistRequest>,
) -> Result<Json<artist::Model>> {
    let current = Artist::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("No existe artista con id {}", id)))?;

    if payload.nombre.is_none() && payload.biografia.is_none() && payload.imagen_url.is_none() {
        return Err(AppError::BadRequest(NOTHING_TO_UPDATE.to_string()));
    }

    let nombre = payload
        .nombre
        .map(|n| require_text("nombre", Some(n)))
        .transpose()?;

    let mut rules = RuleSet::new();
    if let Some(nombre) = &nombre {
        rules = rules.unique(
            exists::<Artist>(
                &state.db,
                Condition::all()
                    .add(artist::Column::Nombre.eq(nombre.as_str()))
                    .add(artist::Column::Id.ne(id)),
            ),
            DUPLICATE_NAME,
        );
    }
    rules.check().await?;

    let mut active = current.into_active_model();
    if let Some(nombre) = nombre {
        active.nombre = Set(nombre);
    }
    if payload.biografia.is_some() {
        active.biografia = Set(payload.biografia);
    }
    if payload.imagen_url.is_some() {
        active.imagen_url = Set(payload.imagen_url);
    }

    let updated = active
        .update(&state.db)
        .await
        .map_err(|e| AppError::from_write(e, DUPLICATE_NAME))?;
    Ok(Json(updated))
}
