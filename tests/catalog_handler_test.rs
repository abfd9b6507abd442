//! Integration tests for the catalog routes
//!
//! Covers artists, albums, songs, genres and song-genre associations:
//! - Creation through the full precondition pipeline
//! - Auth gate on writes
//! - Listing with pagination, ordering, filtering and rankings

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use pretty_assertions::assert_eq;
use sea_orm::{EntityTrait, PaginatorTrait};
use serde_json::{json, Value};
use tower::util::ServiceExt;

use music_catalog::db::entities::{Artist, Song, SongGenre};
use music_catalog::state::AppState;
use music_catalog::test_utils::*;

/// Sends one request and returns the status with the JSON body (`Null` when the
/// body is not JSON)
async fn send(
    app: Router,
    method: &str,
    uri: &str,
    auth: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(auth) = auth {
        builder = builder.header(header::AUTHORIZATION, auth);
    }
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
}

/// App state plus an admin bearer header
async fn setup() -> (AppState, String) {
    let state = setup_test_app_state().await;
    let country = create_test_country(&state.db, "Argentina").await;
    let admin = create_test_user(&state.db, "admin@mail.com", country.id, ADMIN_ROLE_ID).await;
    let auth = bearer(&state, &admin);
    (state, auth)
}

// ============================================================================
// Artists
// ============================================================================

#[tokio::test]
async fn test_create_artist_then_reject_duplicate_name() {
    let (state, auth) = setup().await;

    let (status, body) = send(
        create_test_router(&state),
        "POST",
        "/artistas",
        Some(&auth),
        Some(json!({ "nombre": "Fito Paez" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["ArtistaNuevoDatos"]["nombre"], "Fito Paez");
    assert!(body["message"].is_string());

    let (status, body) = send(
        create_test_router(&state),
        "POST",
        "/artistas",
        Some(&auth),
        Some(json!({ "nombre": "Fito Paez" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "El nombre del artista ya existe, debe elegir otro");

    assert_eq!(Artist::find().count(&state.db).await.unwrap(), 1);
}

#[tokio::test]
async fn test_create_artist_requires_valid_token() {
    let (state, _) = setup().await;
    let payload = json!({ "nombre": "Spinetta" });

    let (status, _) = send(
        create_test_router(&state),
        "POST",
        "/artistas",
        None,
        Some(payload.clone()),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(
        create_test_router(&state),
        "POST",
        "/artistas",
        Some("Bearer not-a-token"),
        Some(payload),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    assert_eq!(Artist::find().count(&state.db).await.unwrap(), 0);
}

#[tokio::test]
async fn test_create_artist_missing_name() {
    let (state, auth) = setup().await;

    let (status, body) = send(
        create_test_router(&state),
        "POST",
        "/artistas",
        Some(&auth),
        Some(json!({ "nombre": "   ", "biografia": "sin nombre" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Faltan datos: el campo 'nombre' es obligatorio");
}

#[tokio::test]
async fn test_malformed_body_is_client_error() {
    let (state, auth) = setup().await;

    let request = Request::builder()
        .method("POST")
        .uri("/artistas")
        .header(header::AUTHORIZATION, &auth)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{\"nombre\": "))
        .unwrap();
    let response = create_test_router(&state).oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_update_artist_rechecks_name() {
    let (state, auth) = setup().await;
    create_test_artist(&state.db, "Divididos", 0.0).await;
    let other = create_test_artist(&state.db, "Sumo", 0.0).await;

    let (status, _) = send(
        create_test_router(&state),
        "PATCH",
        &format!("/artistas/{}", other.id),
        Some(&auth),
        Some(json!({ "nombre": "Divididos" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = send(
        create_test_router(&state),
        "PATCH",
        &format!("/artistas/{}", other.id),
        Some(&auth),
        Some(json!({ "biografia": "Banda de Hurlingham" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["nombre"], "Sumo");
    assert_eq!(body["biografia"], "Banda de Hurlingham");
}

#[tokio::test]
async fn test_get_missing_artist() {
    let (state, _) = setup().await;

    let (status, _) = send(create_test_router(&state), "GET", "/artistas/999", None, None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

// ============================================================================
// Albums
// ============================================================================

#[tokio::test]
async fn test_create_album_with_missing_artist() {
    let (state, auth) = setup().await;

    let (status, body) = send(
        create_test_router(&state),
        "POST",
        "/albumes",
        Some(&auth),
        Some(json!({ "titulo": "X", "anio_lanzamiento": 1999, "id_artista": 999 })),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "No existe artista con id 999");
}

#[tokio::test]
async fn test_create_album_year_out_of_range() {
    let (state, auth) = setup().await;
    let artist = create_test_artist(&state.db, "Gardel", 0.0).await;

    let (status, body) = send(
        create_test_router(&state),
        "POST",
        "/albumes",
        Some(&auth),
        Some(json!({ "titulo": "Tangos", "anio_lanzamiento": 1917, "id_artista": artist.id })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["error"],
        "El campo 'anio_lanzamiento' debe estar entre 1930 y 2030"
    );
}

#[tokio::test]
async fn test_create_album_and_filter_by_artist() {
    let (state, auth) = setup().await;
    let artist = create_test_artist(&state.db, "Mercedes Sosa", 0.0).await;
    let other = create_test_artist(&state.db, "Atahualpa Yupanqui", 0.0).await;
    create_test_album(&state.db, other.id, None, "El Payador Perseguido").await;

    let (status, body) = send(
        create_test_router(&state),
        "POST",
        "/albumes",
        Some(&auth),
        Some(json!({ "titulo": "Cantora", "anio_lanzamiento": 2009, "id_artista": artist.id })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["AlbumNuevoDatos"]["titulo"], "Cantora");

    let (status, body) = send(
        create_test_router(&state),
        "GET",
        &format!("/albumes?artista={}", artist.id),
        None,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let albums = body.as_array().unwrap();
    assert_eq!(albums.len(), 1);
    assert_eq!(albums[0]["titulo"], "Cantora");
}

// ============================================================================
// Songs
// ============================================================================

#[tokio::test]
async fn test_create_song_rejects_bad_durations() {
    let (state, auth) = setup().await;
    let artist = create_test_artist(&state.db, "Serú Girán", 0.0).await;
    let album = create_test_album(&state.db, artist.id, None, "Bicicleta").await;

    for duration in [json!(99), json!(180.5), json!(1e12)] {
        let (status, _) = send(
            create_test_router(&state),
            "POST",
            "/canciones",
            Some(&auth),
            Some(json!({ "titulo": "Canción de Alicia", "duracion_segundos": duration, "id_album": album.id })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "duration {} accepted", duration);
    }

    assert_eq!(Song::find().count(&state.db).await.unwrap(), 0);

    let (status, body) = send(
        create_test_router(&state),
        "POST",
        "/canciones",
        Some(&auth),
        Some(json!({ "titulo": "Canción de Alicia", "duracion_segundos": 100, "id_album": album.id })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["CancionNuevaDatos"]["duracion_segundos"], 100);
}

#[tokio::test]
async fn test_list_songs_second_page() {
    let (state, _) = setup().await;
    let artist = create_test_artist(&state.db, "Los Piojos", 0.0).await;
    let album = create_test_album(&state.db, artist.id, None, "Verde Paisaje del Infierno").await;
    for i in 1..=25 {
        create_test_song(&state.db, album.id, &format!("Tema {}", i), i).await;
    }

    let (status, body) = send(
        create_test_router(&state),
        "GET",
        "/canciones?page=2&limit=10",
        None,
        None,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let titles: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["titulo"].as_str().unwrap())
        .collect();
    let expected: Vec<String> = (11..=20).map(|i| format!("Tema {}", i)).collect();
    assert_eq!(titles, expected);
}

#[tokio::test]
async fn test_list_songs_invalid_page() {
    let (state, _) = setup().await;

    let (status, _) = send(
        create_test_router(&state),
        "GET",
        "/canciones?page=0&limit=10",
        None,
        None,
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = send(
        create_test_router(&state),
        "GET",
        "/canciones?page=18446744073709551615&limit=2",
        None,
        None,
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Los parámetros 'page' y 'limit' exceden el rango permitido");
}

#[tokio::test]
async fn test_list_songs_ordered_by_plays() {
    let (state, _) = setup().await;
    let artist = create_test_artist(&state.db, "Callejeros", 0.0).await;
    let album = create_test_album(&state.db, artist.id, None, "Rocanroles sin Destino").await;
    create_test_song(&state.db, album.id, "Poca", 10).await;
    create_test_song(&state.db, album.id, "Mucha", 500).await;
    create_test_song(&state.db, album.id, "Media", 50).await;

    let (_, body) = send(
        create_test_router(&state),
        "GET",
        "/canciones?orden=reproducciones&direccion=desc",
        None,
        None,
    )
    .await;
    let titles: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["titulo"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["Mucha", "Media", "Poca"]);

    let (status, _) = send(
        create_test_router(&state),
        "GET",
        "/canciones?orden=password",
        None,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_filter_songs_by_genre_or_album() {
    let (state, _) = setup().await;
    let artist = create_test_artist(&state.db, "Babasónicos", 0.0).await;
    let album_a = create_test_album(&state.db, artist.id, None, "Jessico").await;
    let album_b = create_test_album(&state.db, artist.id, None, "Infame").await;
    let tagged = create_test_song(&state.db, album_b.id, "Irresponsables", 1).await;
    let on_album = create_test_song(&state.db, album_a.id, "El Loco", 1).await;
    create_test_song(&state.db, album_b.id, "Putita", 1).await;
    let rock = create_test_genre(&state.db, "Rock").await;

    sea_orm::ActiveModelTrait::insert(
        music_catalog::db::entities::song_genre::ActiveModel {
            id_cancion: sea_orm::Set(tagged.id),
            id_genero: sea_orm::Set(rock.id),
        },
        &state.db,
    )
    .await
    .unwrap();

    let (status, body) = send(
        create_test_router(&state),
        "GET",
        &format!("/canciones/filtrar?genero={}&albumid={}", rock.id, album_a.id),
        None,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let ids: Vec<i64> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![tagged.id as i64, on_album.id as i64]);

    let (status, _) = send(
        create_test_router(&state),
        "GET",
        "/canciones/filtrar",
        None,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_play_ranking_respects_limit() {
    let (state, _) = setup().await;
    let artist = create_test_artist(&state.db, "Bersuit", 0.0).await;
    let album = create_test_album(&state.db, artist.id, None, "Libertinaje").await;
    for (title, plays) in [("A", 5), ("B", 50), ("C", 500), ("D", 1)] {
        create_test_song(&state.db, album.id, title, plays).await;
    }

    let (status, body) = send(
        create_test_router(&state),
        "GET",
        "/canciones/ranking/reproducciones?limit=2",
        None,
        None,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let titles: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["titulo"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["C", "B"]);
}

#[tokio::test]
async fn test_update_song_keeps_duration_rule() {
    let (state, auth) = setup().await;
    let artist = create_test_artist(&state.db, "Virus", 0.0).await;
    let album = create_test_album(&state.db, artist.id, None, "Locura").await;
    let song = create_test_song(&state.db, album.id, "Una Luna de Miel en la Mano", 0).await;

    let (status, _) = send(
        create_test_router(&state),
        "PATCH",
        &format!("/canciones/{}", song.id),
        Some(&auth),
        Some(json!({ "duracion_segundos": 42 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = send(
        create_test_router(&state),
        "PATCH",
        &format!("/canciones/{}", song.id),
        Some(&auth),
        Some(json!({ "duracion_segundos": 215 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["duracion_segundos"], 215);
}

// ============================================================================
// Genres and song-genre associations
// ============================================================================

#[tokio::test]
async fn test_create_genre_unique_name() {
    let (state, auth) = setup().await;

    let (status, _) = send(
        create_test_router(&state),
        "POST",
        "/generos",
        Some(&auth),
        Some(json!({ "nombre": "Folklore" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, _) = send(
        create_test_router(&state),
        "POST",
        "/generos",
        Some(&auth),
        Some(json!({ "nombre": "Folklore" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_song_genre_association_lifecycle() {
    let (state, auth) = setup().await;
    let artist = create_test_artist(&state.db, "Los Fabulosos Cadillacs", 0.0).await;
    let album = create_test_album(&state.db, artist.id, None, "Vasos Vacíos").await;
    let song = create_test_song(&state.db, album.id, "Matador", 0).await;
    let genre = create_test_genre(&state.db, "Ska").await;
    let uri = format!("/canciones/{}/generos", song.id);

    let (status, _) = send(
        create_test_router(&state),
        "POST",
        &uri,
        Some(&auth),
        Some(json!({ "id_genero": genre.id })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(
        create_test_router(&state),
        "POST",
        &uri,
        Some(&auth),
        Some(json!({ "id_genero": genre.id })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "La canción ya tiene asignado ese género");
    assert_eq!(SongGenre::find().count(&state.db).await.unwrap(), 1);

    let (status, body) = send(create_test_router(&state), "GET", &uri, None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["nombre"], "Ska");

    let delete_uri = format!("{}/{}", uri, genre.id);
    let (status, _) = send(create_test_router(&state), "DELETE", &delete_uri, Some(&auth), None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(create_test_router(&state), "DELETE", &delete_uri, Some(&auth), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_song_genre_with_unknown_genre() {
    let (state, auth) = setup().await;
    let artist = create_test_artist(&state.db, "Attaque 77", 0.0).await;
    let album = create_test_album(&state.db, artist.id, None, "Dulce Navidad").await;
    let song = create_test_song(&state.db, album.id, "Hacelo por mí", 0).await;

    let (status, _) = send(
        create_test_router(&state),
        "POST",
        &format!("/canciones/{}/generos", song.id),
        Some(&auth),
        Some(json!({ "id_genero": 404 })),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

// ============================================================================
// Storage health gate
// ============================================================================

#[tokio::test]
async fn test_unreachable_storage_is_server_error() {
    let (state, _) = setup().await;
    state.db.clone().close().await.unwrap();

    let (status, body) = send(create_test_router(&state), "GET", "/artistas", None, None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].is_string());

    let (status, body) = send(create_test_router(&state), "GET", "/health", None, None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["database"], "unhealthy");
}

#[tokio::test]
async fn test_health_reports_ok() {
    let (state, _) = setup().await;

    let (status, body) = send(create_test_router(&state), "GET", "/health", None, None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "status": "ok", "database": "healthy" }));
    assert!(state.health.is_healthy().await);
}
