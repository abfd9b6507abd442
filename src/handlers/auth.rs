use axum::{extract::State, Json};
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};
use serde::{Deserialize, Serialize};

use crate::{
    db::entities::{user, User},
    error::{AppError, Result},
    handlers::JsonBody,
    services::verify_password,
    state::AppState,
    validation::require_text,
};

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
    /// When present, the account must hold this role.
    pub rol: Option<i32>,
}

#[derive(Serialize)]
pub struct LoginResponse {
    pub message: String,
    pub token: String,
}

const BAD_CREDENTIALS: &str = "Email o contraseña incorrectos";

pub async fn login(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<LoginRequest>,
) -> Result<Json<LoginResponse>> {
    let email = require_text("email", payload.email)?;
    let password = require_text("password", payload.password)?;

    let account = User::find()
        .filter(user::Column::Email.eq(email.as_str()))
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::Unauthorized(BAD_CREDENTIALS.to_string()))?;

    if !verify_password(&password, &account.password_hash) {
        tracing::info!("Rejected login for {}", email);
        return Err(AppError::Unauthorized(BAD_CREDENTIALS.to_string()));
    }

    if let Some(required) = payload.rol {
        if required != account.id_rol {
            return Err(AppError::Unauthorized(
                "El usuario no tiene el rol solicitado".to_string(),
            ));
        }
    }

    let token = state
        .tokens
        .issue(account.id, &account.email, account.id_rol)?;
    tracing::info!("User {} logged in", account.id);

    Ok(Json(LoginResponse {
        message: "Inicio de sesión exitoso".to_string(),
        token,
    }))
}
