pub mod albums;
pub mod artists;
pub mod auth;
pub mod genres;
pub mod health;
pub mod payment_methods;
pub mod payments;
pub mod playlists;
pub mod reports;
pub mod songs;
pub mod subscriptions;
pub mod users;

use axum::{
    extract::{FromRequest, FromRequestParts},
    http::StatusCode,
    middleware,
    routing::{delete, get, post},
    Json, Router,
};
use serde::Serialize;
use serde_json::{json, Value};

use crate::{error::AppError, middleware::require_storage, state::AppState};

/// JSON body extractor whose rejections are reported as 400 client errors.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct JsonBody<T>(pub T);

/// Query-string extractor whose rejections are reported as 400 client errors.
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(AppError))]
pub struct QueryParams<T>(pub T);

#[derive(Serialize)]
pub struct MessageResponse {
    pub message: String,
}

pub const NOTHING_TO_UPDATE: &str = "No se enviaron datos para actualizar";

/// 201 body shared by every create endpoint: `{ "message": ..., "<key>": <record> }`.
pub type Created = (StatusCode, Json<Value>);

pub fn created<T: Serialize>(message: &str, key: &str, record: T) -> Created {
    (
        StatusCode::CREATED,
        Json(json!({ "message": message, key: record })),
    )
}

pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Auth
        .route("/auth/login", post(auth::login))

        // Catalog
        .route("/artistas", get(artists::list_artists).post(artists::create_artist))
        .route("/artistas/:id", get(artists::get_artist).patch(artists::update_artist))
        .route("/albumes", get(albums::list_albums).post(albums::create_album))
        .route("/albumes/:id", get(albums::get_album))
        .route("/canciones", get(songs::list_songs).post(songs::create_song))
        .route("/canciones/filtrar", get(songs::filter_songs))
        .route("/canciones/ranking/reproducciones", get(songs::most_played))
        .route("/canciones/ranking/likes", get(songs::most_liked))
        .route("/canciones/ranking/recientes", get(songs::most_recent))
        .route("/canciones/:id", get(songs::get_song).patch(songs::update_song))
        .route(
            "/canciones/:id/generos",
            get(songs::list_song_genres).post(songs::add_song_genre),
        )
        .route("/canciones/:id/generos/:id_genero", delete(songs::remove_song_genre))
        .route("/generos", get(genres::list_genres).post(genres::create_genre))

        // Users and playlists
        .route("/usuarios", get(users::list_users).post(users::create_user))
        .route("/usuarios/:id", get(users::get_user))
        .route("/playlists", get(playlists::list_playlists).post(playlists::create_playlist))
        .route(
            "/playlists/:id",
            get(playlists::get_playlist).patch(playlists::update_playlist),
        )
        .route(
            "/playlists/:id/canciones",
            get(playlists::list_playlist_songs).post(playlists::add_playlist_song),
        )
        .route(
            "/playlists/:id/canciones/:id_cancion",
            delete(playlists::remove_playlist_song),
        )

        // Billing
        .route(
            "/suscripciones",
            get(subscriptions::list_subscriptions).post(subscriptions::create_subscription),
        )
        .route("/pagos", get(payments::list_payments).post(payments::create_payment))
        .route(
            "/metodos-pago",
            get(payment_methods::list_payment_methods).post(payment_methods::create_payment_method),
        )

        // Reporting views
        .route("/vistas/ingresos", get(reports::revenue))
        .route("/vistas/ingresos/pais", get(reports::revenue_by_country))
        .route("/vistas/ingresos/minimo", get(reports::revenue_above))
        .route("/vistas/canciones-populares", get(reports::popular_songs))
        .route(
            "/vistas/canciones-populares-por-pais",
            get(reports::popular_songs_by_country),
        )
}

/// Full application router: health check plus the API, with every API route
/// gated on storage health.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        .merge(
            api_routes()
                .route_layer(middleware::from_fn_with_state(state.clone(), require_storage)),
        )
        .with_state(state)
}
