use axum::{extract::State, Json};
use sea_orm::{ActiveModelTrait, ColumnTrait, Condition, EntityTrait, QueryOrder, Set};
use serde::Deserialize;

use crate::{
    db::entities::{genre, Genre},
    error::{AppError, Result},
    handlers::{created, Created, JsonBody},
    middleware::AuthUser,
    state::AppState,
    validation::{exists, require_text, RuleSet},
};

const DUPLICATE_GENRE: &str = "El género ya existe";

#[derive(Deserialize)]
pub struct CreateGenreRequest {
    pub nombre: Option<String>,
    pub descripcion: Option<String>,
}

pub async fn list_genres(State(state): State<AppState>) -> Result<Json<Vec<genre::Model>>> {
    let genres = Genre::find()
        .order_by_asc(genre::Column::Nombre)
        .all(&state.db)
        .await?;
    Ok(Json(genres))
}

pub async fn create_genre(
    State(state): State<AppState>,
    AuthUser(_): AuthUser,
    JsonBody(payload): JsonBody<CreateGenreRequest>,
) -> Result<Created> {
    let nombre = require_text("nombre", payload.nombre)?;

    RuleSet::new()
        .unique(
            exists::<Genre>(
                &state.db,
                Condition::all().add(genre::Column::Nombre.eq(nombre.as_str())),
            ),
            DUPLICATE_GENRE,
        )
        .check()
        .await?;

    let genre = genre::ActiveModel {
        nombre: Set(nombre),
        descripcion: Set(payload.descripcion),
        ..Default::default()
    }
    .insert(&state.db)
    .await
    .map_err(|e| AppError::from_write(e, DUPLICATE_GENRE))?;

    tracing::info!("Genre {} created", genre.id);
    Ok(created("Género creado exitosamente", "GeneroNuevoDatos", genre))
}
