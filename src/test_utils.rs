//! Test utilities for the Music Catalog API
//!
//! Provides helpers for creating isolated test environments with:
//! - In-memory SQLite databases (one per test) with every migration applied
//! - AppState and router factories
//! - Bearer tokens for the protected routes
//! - Test data generators

use axum::Router;
use chrono::{NaiveDate, Utc};
use migration::MigratorTrait;
use sea_orm::{ActiveModelTrait, Database, DatabaseConnection, Set};

use crate::{
    config::Config,
    db::entities::{
        album, artist, country, genre, label, playlist, song, subscription, subscription_type,
        user,
    },
    handlers,
    state::AppState,
};

/// Plain-text password every factory-made user is created with.
pub const TEST_PASSWORD: &str = "clave-de-prueba";

/// Seeded role ids.
pub const ADMIN_ROLE_ID: i32 = 1;
pub const USER_ROLE_ID: i32 = 2;

/// Setup an in-memory SQLite database with all migrations applied
///
/// Each call creates a fresh, isolated database perfect for parallel testing
pub async fn setup_test_db() -> DatabaseConnection {
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("Failed to create in-memory database");

    migration::Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");

    db
}

/// Create a test configuration with sensible defaults
pub fn test_config() -> Config {
    Config {
        database_url: "sqlite::memory:".to_string(),
        server_host: "127.0.0.1".to_string(),
        server_port: 3000,
        jwt_secret: "test-secret".to_string(),
        token_ttl_minutes: 5,
        health_recheck_secs: 30,
        default_role_id: USER_ROLE_ID,
        bcrypt_cost: 4,
    }
}

/// Create a complete test AppState backed by a fresh database
pub async fn setup_test_app_state() -> AppState {
    AppState::new(setup_test_db().await, test_config())
}

/// Full router, including the storage health gate
pub fn create_test_router(state: &AppState) -> Router {
    handlers::router(state.clone())
}

/// `Authorization` header value for `user`
pub fn bearer(state: &AppState, user: &user::Model) -> String {
    let token = state
        .tokens
        .issue(user.id, &user.email, user.id_rol)
        .expect("Failed to issue test token");
    format!("Bearer {}", token)
}

// ============================================================================
// Test Data Factories
// ============================================================================

pub async fn create_test_country(db: &DatabaseConnection, nombre: &str) -> country::Model {
    country::ActiveModel {
        nombre: Set(nombre.to_string()),
        ..Default::default()
    }
    .insert(db)
    .await
    .expect("Failed to insert test country")
}

pub async fn create_test_label(
    db: &DatabaseConnection,
    nombre: &str,
    country_id: i32,
    ingresos: f64,
) -> label::Model {
    label::ActiveModel {
        nombre: Set(nombre.to_string()),
        id_pais: Set(country_id),
        ingresos: Set(ingresos),
        ..Default::default()
    }
    .insert(db)
    .await
    .expect("Failed to insert test label")
}

pub async fn create_test_artist(db: &DatabaseConnection, nombre: &str, ingresos: f64) -> artist::Model {
    artist::ActiveModel {
        nombre: Set(nombre.to_string()),
        biografia: Set(None),
        imagen_url: Set(None),
        ingresos: Set(ingresos),
        fecha_registro: Set(Utc::now().into()),
        ..Default::default()
    }
    .insert(db)
    .await
    .expect("Failed to insert test artist")
}

pub async fn create_test_album(
    db: &DatabaseConnection,
    artist_id: i32,
    label_id: Option<i32>,
    titulo: &str,
) -> album::Model {
    album::ActiveModel {
        titulo: Set(titulo.to_string()),
        anio_lanzamiento: Set(1985),
        id_artista: Set(artist_id),
        id_discografica: Set(label_id),
        imagen_portada: Set(None),
        duracion_total: Set(0),
        ..Default::default()
    }
    .insert(db)
    .await
    .expect("Failed to insert test album")
}

pub async fn create_test_song(
    db: &DatabaseConnection,
    album_id: i32,
    titulo: &str,
    reproducciones: i64,
) -> song::Model {
    song::ActiveModel {
        titulo: Set(titulo.to_string()),
        duracion_segundos: Set(180),
        id_album: Set(album_id),
        reproducciones: Set(reproducciones),
        likes: Set(0),
        fecha_agregada: Set(Utc::now().into()),
        ..Default::default()
    }
    .insert(db)
    .await
    .expect("Failed to insert test song")
}

pub async fn create_test_genre(db: &DatabaseConnection, nombre: &str) -> genre::Model {
    genre::ActiveModel {
        nombre: Set(nombre.to_string()),
        descripcion: Set(None),
        ..Default::default()
    }
    .insert(db)
    .await
    .expect("Failed to insert test genre")
}

/// Create a user with [`TEST_PASSWORD`] and the given role
pub async fn create_test_user(
    db: &DatabaseConnection,
    email: &str,
    country_id: i32,
    role_id: i32,
) -> user::Model {
    let now = Utc::now();
    let hash = bcrypt::hash(TEST_PASSWORD, 4).expect("Failed to hash test password");

    user::ActiveModel {
        email: Set(email.to_string()),
        password_hash: Set(hash),
        fecha_nacimiento: Set(NaiveDate::from_ymd_opt(1990, 5, 17).expect("valid date")),
        sexo: Set("F".to_string()),
        codigo_postal: Set(Some("1405".to_string())),
        id_pais: Set(country_id),
        fecha_registro: Set(now.into()),
        fecha_ult_cambio_password: Set(now.into()),
        id_rol: Set(role_id),
        ..Default::default()
    }
    .insert(db)
    .await
    .expect("Failed to insert test user")
}

pub async fn create_test_subscription_type(
    db: &DatabaseConnection,
    nombre: &str,
) -> subscription_type::Model {
    subscription_type::ActiveModel {
        nombre: Set(nombre.to_string()),
        precio: Set(999.0),
        duracion_meses: Set(1),
        ..Default::default()
    }
    .insert(db)
    .await
    .expect("Failed to insert test subscription type")
}

pub async fn create_test_subscription(
    db: &DatabaseConnection,
    user_id: i32,
    type_id: i32,
    fecha_inicio: NaiveDate,
    fecha_renovacion: NaiveDate,
    activo: bool,
) -> subscription::Model {
    subscription::ActiveModel {
        id_usuario: Set(user_id),
        id_tipo_suscripcion: Set(type_id),
        fecha_inicio: Set(fecha_inicio),
        fecha_renovacion: Set(fecha_renovacion),
        activo: Set(activo),
        ..Default::default()
    }
    .insert(db)
    .await
    .expect("Failed to insert test subscription")
}

pub async fn create_test_playlist(
    db: &DatabaseConnection,
    user_id: i32,
    titulo: &str,
) -> playlist::Model {
    playlist::ActiveModel {
        id_usuario: Set(user_id),
        titulo: Set(titulo.to_string()),
        cantidad_canciones: Set(0),
        fecha_creacion: Set(Utc::now().into()),
        fecha_eliminacion: Set(None),
        activo: Set(1),
        estado: Set("publica".to_string()),
        ..Default::default()
    }
    .insert(db)
    .await
    .expect("Failed to insert test playlist")
}
