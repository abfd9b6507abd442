//! Read-only endpoints over the two reporting views.

use axum::{extract::State, Json};
use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect};
use serde::{Deserialize, Serialize};

use crate::{
    db::entities::{popular_song_view, revenue_view, PopularSongView, RevenueView},
    error::{AppError, Result},
    fuzzy::FuzzyPattern,
    handlers::QueryParams,
    query::Pagination,
    state::AppState,
};

#[derive(Deserialize)]
pub struct CountryQuery {
    pub pais: Option<String>,
    pub page: Option<u64>,
    pub limit: Option<u64>,
}

#[derive(Deserialize)]
pub struct MinimumRevenueQuery {
    pub minimo_ingresos: Option<f64>,
    pub page: Option<u64>,
    pub limit: Option<u64>,
}

#[derive(Deserialize)]
pub struct PopularByCountryQuery {
    pub pais: Option<String>,
    pub limit: Option<u64>,
}

#[derive(Debug, Serialize)]
pub struct RevenueRow {
    pub id_artista: i32,
    pub nombre_artista: String,
    pub ingresos_artista: f64,
    pub id_discografica: i32,
    pub nombre_discografica: String,
    pub ingresos_discografica: f64,
    pub id_pais: i32,
    pub nombre_pais: String,
    pub total_ingresos: f64,
}

impl From<revenue_view::Model> for RevenueRow {
    fn from(row: revenue_view::Model) -> Self {
        Self {
            id_artista: row.id_artista,
            nombre_artista: row.nombre_artista,
            ingresos_artista: row.ingresos_artista,
            id_discografica: row.id_discografica,
            nombre_discografica: row.nombre_discografica,
            ingresos_discografica: row.ingresos_discografica,
            id_pais: row.id_pais,
            nombre_pais: row.nombre_pais,
            total_ingresos: row.total_ingresos,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PopularSongRow {
    pub id_cancion: i32,
    pub titulo_cancion: String,
    pub id_album: i32,
    pub titulo_album: String,
    pub id_artista: i32,
    pub nombre_artista: String,
    pub reproducciones: i64,
    pub id_pais: Option<i32>,
    pub nombre_pais: Option<String>,
}

impl From<popular_song_view::Model> for PopularSongRow {
    fn from(row: popular_song_view::Model) -> Self {
        Self {
            id_cancion: row.id_cancion,
            titulo_cancion: row.titulo_cancion,
            id_album: row.id_album,
            titulo_album: row.titulo_album,
            id_artista: row.id_artista,
            nombre_artista: row.nombre_artista,
            reproducciones: row.reproducciones,
            id_pais: row.id_pais,
            nombre_pais: row.nombre_pais,
        }
    }
}

fn country_pattern(raw: Option<&str>) -> Result<FuzzyPattern> {
    raw.and_then(FuzzyPattern::new)
        .ok_or_else(|| AppError::BadRequest("Debe indicar el parámetro 'pais'".to_string()))
}

pub async fn revenue(
    State(state): State<AppState>,
    QueryParams(pagination): QueryParams<Pagination>,
) -> Result<Json<Vec<RevenueRow>>> {
    let rows = pagination
        .apply(
            RevenueView::find()
                .order_by_desc(revenue_view::Column::TotalIngresos)
                .order_by_asc(revenue_view::Column::IdArtista)
                .order_by_asc(revenue_view::Column::IdDiscografica),
        )?
        .all(&state.db)
        .await?;
    Ok(Json(rows.into_iter().map(RevenueRow::from).collect()))
}

/// Revenue rows for one country. A country with no rows is reported as not
/// found rather than as an empty list.
pub async fn revenue_by_country(
    State(state): State<AppState>,
    QueryParams(query): QueryParams<CountryQuery>,
) -> Result<Json<Vec<RevenueRow>>> {
    let pattern = country_pattern(query.pais.as_deref())?;
    let condition = pattern
        .country_condition(&state.db, revenue_view::Column::NombrePais)
        .await?;
    let select = RevenueView::find().filter(condition);

    if select.clone().count(&state.db).await? == 0 {
        return Err(AppError::NotFound(format!(
            "No hay datos de ingresos para el país {}",
            query.pais.unwrap_or_default()
        )));
    }

    let rows = Pagination {
        page: query.page,
        limit: query.limit,
    }
    .apply(
        select
            .order_by_desc(revenue_view::Column::TotalIngresos)
            .order_by_asc(revenue_view::Column::IdArtista)
            .order_by_asc(revenue_view::Column::IdDiscografica),
    )?
    .all(&state.db)
    .await?;

    Ok(Json(rows.into_iter().map(RevenueRow::from).collect()))
}

/// Rows whose combined revenue is at least `minimo_ingresos`.
pub async fn revenue_above(
    State(state): State<AppState>,
    QueryParams(query): QueryParams<MinimumRevenueQuery>,
) -> Result<Json<Vec<RevenueRow>>> {
    let minimum = query.minimo_ingresos.ok_or_else(|| {
        AppError::BadRequest("Debe indicar el parámetro 'minimo_ingresos'".to_string())
    })?;
    if !minimum.is_finite() || minimum < 0.0 {
        return Err(AppError::BadRequest(
            "El parámetro 'minimo_ingresos' debe ser un número no negativo".to_string(),
        ));
    }

    let rows = Pagination {
        page: query.page,
        limit: query.limit,
    }
    .apply(
        RevenueView::find()
            .filter(revenue_view::Column::TotalIngresos.gte(minimum))
            .order_by_desc(revenue_view::Column::TotalIngresos)
            .order_by_asc(revenue_view::Column::IdArtista)
            .order_by_asc(revenue_view::Column::IdDiscografica),
    )?
    .all(&state.db)
    .await?;

    Ok(Json(rows.into_iter().map(RevenueRow::from).collect()))
}

pub async fn popular_songs(
    State(state): State<AppState>,
    QueryParams(pagination): QueryParams<Pagination>,
) -> Result<Json<Vec<PopularSongRow>>> {
    let rows = pagination
        .apply(
            PopularSongView::find()
                .order_by_desc(popular_song_view::Column::Reproducciones)
                .order_by_asc(popular_song_view::Column::IdCancion),
        )?
        .all(&state.db)
        .await?;
    Ok(Json(rows.into_iter().map(PopularSongRow::from).collect()))
}

/// Most-played songs for one country, optionally truncated to `limit`.
pub async fn popular_songs_by_country(
    State(state): State<AppState>,
    QueryParams(query): QueryParams<PopularByCountryQuery>,
) -> Result<Json<Vec<PopularSongRow>>> {
    let pattern = country_pattern(query.pais.as_deref())?;
    if query.limit == Some(0) {
        return Err(AppError::BadRequest(
            "El parámetro 'limit' debe ser mayor que cero".to_string(),
        ));
    }

    let condition = pattern
        .country_condition(&state.db, popular_song_view::Column::NombrePais)
        .await?;
    let select = PopularSongView::find().filter(condition);

    if select.clone().count(&state.db).await? == 0 {
        return Err(AppError::NotFound(format!(
            "No hay datos para el país {}",
            query.pais.unwrap_or_default()
        )));
    }

    let rows = select
        .order_by_desc(popular_song_view::Column::Reproducciones)
        .order_by_asc(popular_song_view::Column::IdCancion)
        .limit(query.limit)
        .all(&state.db)
        .await?;

    Ok(Json(rows.into_iter().map(PopularSongRow::from).collect()))
}
