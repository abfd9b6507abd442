//! Integration tests for registration, login and the user routes

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use pretty_assertions::assert_eq;
use sea_orm::{EntityTrait, PaginatorTrait};
use serde_json::{json, Value};
use tower::util::ServiceExt;

use music_catalog::db::entities::User;
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

fn registration(email: &str, country_id: i32) -> Value {
    json!({
        "email": email,
        "password": "s3creta!",
        "fecha_nacimiento": "1995-03-21",
        "sexo": "M",
        "codigo_postal": "5000",
        "id_pais": country_id,
    })
}

#[tokio::test]
async fn test_register_is_public_and_hides_hash() {
    let state = setup_test_app_state().await;
    let country = create_test_country(&state.db, "Argentina").await;

    let (status, body) = send(
        create_test_router(&state),
        "POST",
        "/usuarios",
        None,
        Some(registration("juan@mail.com", country.id)),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    let user = &body["UsuarioNuevoDatos"];
    assert_eq!(user["email"], "juan@mail.com");
    assert_eq!(user["id_rol"], USER_ROLE_ID);
    assert_eq!(user["fecha_nacimiento"], "1995-03-21");
    assert!(user.get("password_hash").is_none());
    assert!(user.get("password").is_none());

    let stored = User::find().one(&state.db).await.unwrap().unwrap();
    assert_ne!(stored.password_hash, "s3creta!");
}

#[tokio::test]
async fn test_register_rejects_duplicate_email() {
    let state = setup_test_app_state().await;
    let country = create_test_country(&state.db, "Argentina").await;
    create_test_user(&state.db, "juan@mail.com", country.id, USER_ROLE_ID).await;

    let (status, body) = send(
        create_test_router(&state),
        "POST",
        "/usuarios",
        None,
        Some(registration("juan@mail.com", country.id)),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "El email ya está registrado");
    assert_eq!(User::find().count(&state.db).await.unwrap(), 1);
}

#[tokio::test]
async fn test_register_rejects_uppercase_email_and_bad_sex() {
    let state = setup_test_app_state().await;
    let country = create_test_country(&state.db, "Argentina").await;

    let (status, _) = send(
        create_test_router(&state),
        "POST",
        "/usuarios",
        None,
        Some(registration("Juan@Mail.com", country.id)),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let mut payload = registration("juan@mail.com", country.id);
    payload["sexo"] = json!("Z");
    let (status, _) = send(create_test_router(&state), "POST", "/usuarios", None, Some(payload)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_register_with_unknown_country() {
    let state = setup_test_app_state().await;

    let (status, body) = send(
        create_test_router(&state),
        "POST",
        "/usuarios",
        None,
        Some(registration("ana@mail.com", 77)),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "No existe país con id 77");
}

#[tokio::test]
async fn test_register_missing_field_reports_first() {
    let state = setup_test_app_state().await;

    let (status, body) = send(
        create_test_router(&state),
        "POST",
        "/usuarios",
        None,
        Some(json!({ "password": "x" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Faltan datos: el campo 'email' es obligatorio");
}

#[tokio::test]
async fn test_login_issues_usable_token() {
    let state = setup_test_app_state().await;
    let country = create_test_country(&state.db, "Chile").await;
    create_test_user(&state.db, "vale@mail.com", country.id, USER_ROLE_ID).await;

    let (status, body) = send(
        create_test_router(&state),
        "POST",
        "/auth/login",
        None,
        Some(json!({ "email": "vale@mail.com", "password": TEST_PASSWORD })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let token = body["token"].as_str().unwrap().to_string();

    let (status, body) = send(
        create_test_router(&state),
        "GET",
        "/usuarios",
        Some(&format!("Bearer {}", token)),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert!(body[0].get("password_hash").is_none());
}

#[tokio::test]
async fn test_login_rejects_wrong_password_and_role() {
    let state = setup_test_app_state().await;
    let country = create_test_country(&state.db, "Chile").await;
    create_test_user(&state.db, "vale@mail.com", country.id, USER_ROLE_ID).await;

    let (status, _) = send(
        create_test_router(&state),
        "POST",
        "/auth/login",
        None,
        Some(json!({ "email": "vale@mail.com", "password": "otra" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(
        create_test_router(&state),
        "POST",
        "/auth/login",
        None,
        Some(json!({ "email": "vale@mail.com", "password": TEST_PASSWORD, "rol": ADMIN_ROLE_ID })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(
        create_test_router(&state),
        "POST",
        "/auth/login",
        None,
        Some(json!({ "email": "nadie@mail.com", "password": TEST_PASSWORD })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_user_reads_require_token() {
    let state = setup_test_app_state().await;
    let country = create_test_country(&state.db, "Chile").await;
    let user = create_test_user(&state.db, "vale@mail.com", country.id, USER_ROLE_ID).await;

    let (status, _) = send(create_test_router(&state), "GET", "/usuarios", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, body) = send(
        create_test_router(&state),
        "GET",
        &format!("/usuarios/{}", user.id),
        Some(&bearer(&state, &user)),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["email"], "vale@mail.com");
}

#[tokio::test]
async fn test_expired_token_is_forbidden() {
    let state = setup_test_app_state().await;
    let country = create_test_country(&state.db, "Chile").await;
    let user = create_test_user(&state.db, "vale@mail.com", country.id, USER_ROLE_ID).await;
    let stale = music_catalog::services::TokenService::new(&state.config.jwt_secret, -10)
        .issue(user.id, &user.email, user.id_rol)
        .unwrap();

    let (status, _) = send(
        create_test_router(&state),
        "GET",
        "/usuarios",
        Some(&format!("Bearer {}", stale)),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
}
