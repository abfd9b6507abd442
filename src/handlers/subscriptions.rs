use axum::{extract::State, Json};
use sea_orm::{ActiveModelTrait, ColumnTrait, Condition, EntityTrait, QueryFilter, QueryOrder, Set};
use serde::Deserialize;

use crate::{
    db::entities::{subscription, Subscription, SubscriptionType, User},
    error::{AppError, Result},
    handlers::{created, Created, JsonBody, QueryParams},
    middleware::AuthUser,
    query::{DateRange, Pagination},
    state::AppState,
    validation::{exists, exists_by_id, parse_day, require, require_text, today, RuleSet},
};

const DUPLICATE_SUBSCRIPTION: &str = "La suscripción ya existe";
const START_IN_PAST: &str = "La fecha de inicio debe ser posterior a hoy";
const RENEWAL_NOT_AFTER_START: &str =
    "La fecha de renovación debe ser posterior a la fecha de inicio";
const ACTIVE_SUBSCRIPTION: &str = "El usuario ya tiene una suscripción activa vigente";

#[derive(Deserialize)]
pub struct ListSubscriptionsQuery {
    pub desde: Option<String>,
    pub hasta: Option<String>,
    pub usuario: Option<i32>,
    pub page: Option<u64>,
    pub limit: Option<u64>,
}

#[derive(Deserialize)]
pub struct CreateSubscriptionRequest {
    pub id_usuario: Option<i32>,
    pub id_tipo_suscripcion: Option<i32>,
    pub fecha_inicio: Option<String>,
    pub fecha_renovacion: Option<String>,
}

/// Subscriptions whose start date falls inside `desde..=hasta`.
pub async fn list_subscriptions(
    State(state): State<AppState>,
    QueryParams(query): QueryParams<ListSubscriptionsQuery>,
) -> Result<Json<Vec<subscription::Model>>> {
    let range = DateRange {
        desde: query.desde,
        hasta: query.hasta,
    };
    let mut condition = range.condition(subscription::Column::FechaInicio)?;
    if let Some(user_id) = query.usuario {
        condition = condition.add(subscription::Column::IdUsuario.eq(user_id));
    }

    let subscriptions = Pagination {
        page: query.page,
        limit: query.limit,
    }
    .apply(
        Subscription::find()
            .filter(condition)
            .order_by_asc(subscription::Column::FechaInicio)
            .order_by_asc(subscription::Column::Id),
    )?
    .all(&state.db)
    .await?;

    Ok(Json(subscriptions))
}

pub async fn create_subscription(
    State(state): State<AppState>,
    AuthUser(_): AuthUser,
    JsonBody(payload): JsonBody<CreateSubscriptionRequest>,
) -> Result<Created> {
    let user_id = require("id_usuario", payload.id_usuario)?;
    let type_id = require("id_tipo_suscripcion", payload.id_tipo_suscripcion)?;
    let fecha_inicio = parse_day(
        "fecha_inicio",
        &require_text("fecha_inicio", payload.fecha_inicio)?,
    )?;
    let fecha_renovacion = parse_day(
        "fecha_renovacion",
        &require_text("fecha_renovacion", payload.fecha_renovacion)?,
    )?;
    let today = today();

    RuleSet::new()
        .references("usuario", user_id, exists_by_id::<User>(&state.db, user_id))
        .references(
            "tipo de suscripción",
            type_id,
            exists_by_id::<SubscriptionType>(&state.db, type_id),
        )
        .not_before_today(fecha_inicio, START_IN_PAST)
        .after(fecha_renovacion, fecha_inicio, RENEWAL_NOT_AFTER_START)
        .unique(
            exists::<Subscription>(
                &state.db,
                Condition::all()
                    .add(subscription::Column::IdUsuario.eq(user_id))
                    .add(subscription::Column::IdTipoSuscripcion.eq(type_id))
                    .add(subscription::Column::FechaInicio.eq(fecha_inicio))
                    .add(subscription::Column::FechaRenovacion.eq(fecha_renovacion)),
            ),
            DUPLICATE_SUBSCRIPTION,
        )
        .no_conflict(
            exists::<Subscription>(
                &state.db,
                Condition::all()
                    .add(subscription::Column::IdUsuario.eq(user_id))
                    .add(subscription::Column::Activo.eq(true))
                    .add(subscription::Column::FechaRenovacion.gt(today)),
            ),
            ACTIVE_SUBSCRIPTION,
        )
        .check_on(today)
        .await?;

    let subscription = subscription::ActiveModel {
        id_usuario: Set(user_id),
        id_tipo_suscripcion: Set(type_id),
        fecha_inicio: Set(fecha_inicio),
        fecha_renovacion: Set(fecha_renovacion),
        activo: Set(true),
        ..Default::default()
    }
    .insert(&state.db)
    .await
    .map_err(|e| AppError::from_write(e, DUPLICATE_SUBSCRIPTION))?;

    tracing::info!("Subscription {} created for user {}", subscription.id, user_id);
    Ok(created(
        "Suscripción creada exitosamente",
        "SuscripcionNuevaDatos",
        subscription,
    ))
}
