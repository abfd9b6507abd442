use axum::{
    extract::{Path, State},
    Json,
};
use chrono::{DateTime, FixedOffset, NaiveDate, Utc};
use sea_orm::{ActiveModelTrait, ColumnTrait, Condition, EntityTrait, QueryOrder, Set};
use serde::{Deserialize, Serialize};

use crate::{
    db::{
        entities::{user, Country, Role, User},
        enums::Sex,
    },
    error::{AppError, Result},
    handlers::{created, Created, JsonBody, QueryParams},
    middleware::AuthUser,
    query::Pagination,
    services::hash_password,
    state::AppState,
    validation::{exists, exists_by_id, parse_day, require, require_text, RuleSet},
};

const DUPLICATE_EMAIL: &str = "El email ya está registrado";

#[derive(Deserialize)]
pub struct CreateUserRequest {
    pub email: Option<String>,
    pub password: Option<String>,
    pub fecha_nacimiento: Option<String>,
    pub sexo: Option<String>,
    pub codigo_postal: Option<String>,
    pub id_pais: Option<i32>,
    pub id_rol: Option<i32>,
}

/// Account as exposed over the API.
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: i32,
    pub email: String,
    pub fecha_nacimiento: NaiveDate,
    pub sexo: String,
    pub codigo_postal: Option<String>,
    pub id_pais: i32,
    pub id_rol: i32,
    pub fecha_registro: DateTime<FixedOffset>,
}

impl From<user::Model> for UserResponse {
    fn from(model: user::Model) -> Self {
        Self {
            id: model.id,
            email: model.email,
            fecha_nacimiento: model.fecha_nacimiento,
            sexo: model.sexo,
            codigo_postal: model.codigo_postal,
            id_pais: model.id_pais,
            id_rol: model.id_rol,
            fecha_registro: model.fecha_registro,
        }
    }
}

pub async fn list_users(
    State(state): State<AppState>,
    AuthUser(_): AuthUser,
    QueryParams(pagination): QueryParams<Pagination>,
) -> Result<Json<Vec<UserResponse>>> {
    let users = pagination
        .apply(User::find().order_by_asc(user::Column::Id))?
        .all(&state.db)
        .await?;
    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

pub async fn get_user(
    State(state): State<AppState>,
    AuthUser(_): AuthUser,
    Path(id): Path<i32>,
) -> Result<Json<UserResponse>> {
    let user = User::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("No existe usuario con id {}", id)))?;
    Ok(Json(user.into()))
}

/// Public registration.
pub async fn create_user(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<CreateUserRequest>,
) -> Result<Created> {
    let email = require_text("email", payload.email)?;
    let password = require_text("password", payload.password)?;
    let raw_birth = require_text("fecha_nacimiento", payload.fecha_nacimiento)?;
    let sexo = require_text("sexo", payload.sexo)?;
    let country_id = require("id_pais", payload.id_pais)?;
    let role_id = payload.id_rol.unwrap_or(state.config.default_role_id);
    let fecha_nacimiento = parse_day("fecha_nacimiento", &raw_birth)?;

    RuleSet::new()
        .references("país", country_id, exists_by_id::<Country>(&state.db, country_id))
        .references("rol", role_id, exists_by_id::<Role>(&state.db, role_id))
        .lowercase("email", email.as_str())
        .one_of("sexo", sexo.as_str(), Sex::VALUES)
        .unique(
            exists::<User>(
                &state.db,
                Condition::all().add(user::Column::Email.eq(email.as_str())),
            ),
            DUPLICATE_EMAIL,
        )
        .check()
        .await?;

    let password_hash = hash_password(&password, state.config.bcrypt_cost)?;
    let now = Utc::now();

    let user = user::ActiveModel {
        email: Set(email),
        password_hash: Set(password_hash),
        fecha_nacimiento: Set(fecha_nacimiento),
        sexo: Set(sexo),
        codigo_postal: Set(payload.codigo_postal),
        id_pais: Set(country_id),
        fecha_registro: Set(now.into()),
        fecha_ult_cambio_password: Set(now.into()),
        id_rol: Set(role_id),
        ..Default::default()
    }
    .insert(&state.db)
    .await
    .map_err(|e| AppError::from_write(e, DUPLICATE_EMAIL))?;

    tracing::info!("User {} registered", user.id);
    Ok(created(
        "Usuario creado exitosamente",
        "UsuarioNuevoDatos",
        UserResponse::from(user),
    ))
}
