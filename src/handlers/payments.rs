use axum::{extract::State, Json};
use sea_orm::{ActiveModelTrait, ColumnTrait, Condition, EntityTrait, QueryFilter, QueryOrder, Set};
use serde::Deserialize;

use crate::{
    db::{
        entities::{payment, Payment, Subscription, User},
        enums::{PaymentStatus, PaymentType},
    },
    error::{AppError, Result},
    handlers::{created, Created, JsonBody, QueryParams},
    middleware::AuthUser,
    query::{DateRange, Pagination},
    state::AppState,
    validation::{exists, exists_by_id, parse_day, require, require_text, RuleSet},
};

const DUPLICATE_PAYMENT: &str = "El pago ya fue registrado";
const PAYMENT_IN_PAST: &str = "La fecha de pago no puede ser anterior a hoy";

#[derive(Deserialize)]
pub struct ListPaymentsQuery {
    pub desde: Option<String>,
    pub hasta: Option<String>,
    pub usuario: Option<i32>,
    pub page: Option<u64>,
    pub limit: Option<u64>,
}

#[derive(Deserialize)]
pub struct CreatePaymentRequest {
    pub id_suscripcion: Option<i32>,
    pub id_usuario: Option<i32>,
    pub importe: Option<f64>,
    pub fecha_pago: Option<String>,
    pub metodo_pago: Option<String>,
    pub estado: Option<String>,
}

/// Payments whose date falls inside `desde..=hasta`.
pub async fn list_payments(
    State(state): State<AppState>,
    QueryParams(query): QueryParams<ListPaymentsQuery>,
) -> Result<Json<Vec<payment::Model>>> {
    let range = DateRange {
        desde: query.desde,
        hasta: query.hasta,
    };
    let mut condition = range.condition(payment::Column::FechaPago)?;
    if let Some(user_id) = query.usuario {
        condition = condition.add(payment::Column::IdUsuario.eq(user_id));
    }

    let payments = Pagination {
        page: query.page,
        limit: query.limit,
    }
    .apply(
        Payment::find()
            .filter(condition)
            .order_by_asc(payment::Column::FechaPago)
            .order_by_asc(payment::Column::Id),
    )?
    .all(&state.db)
    .await?;

    Ok(Json(payments))
}

pub async fn create_payment(
    State(state): State<AppState>,
    AuthUser(_): AuthUser,
    JsonBody(payload): JsonBody<CreatePaymentRequest>,
) -> Result<Created> {
    let subscription_id = require("id_suscripcion", payload.id_suscripcion)?;
    let user_id = require("id_usuario", payload.id_usuario)?;
    let importe = require("importe", payload.importe)?;
    let fecha_pago = parse_day("fecha_pago", &require_text("fecha_pago", payload.fecha_pago)?)?;
    let metodo = require_text("metodo_pago", payload.metodo_pago)?;
    let estado = payload
        .estado
        .unwrap_or_else(|| PaymentStatus::default().as_str().to_string());

    RuleSet::new()
        .references(
            "suscripción",
            subscription_id,
            exists_by_id::<Subscription>(&state.db, subscription_id),
        )
        .references("usuario", user_id, exists_by_id::<User>(&state.db, user_id))
        .at_least("importe", importe, 0.0)
        .one_of("metodo_pago", metodo.as_str(), PaymentType::VALUES)
        .one_of("estado", estado.as_str(), PaymentStatus::VALUES)
        .not_before_today(fecha_pago, PAYMENT_IN_PAST)
        .unique(
            exists::<Payment>(
                &state.db,
                Condition::all()
                    .add(payment::Column::IdUsuario.eq(user_id))
                    .add(payment::Column::IdSuscripcion.eq(subscription_id))
                    .add(payment::Column::MetodoPago.eq(metodo.as_str()))
                    .add(payment::Column::FechaPago.eq(fecha_pago)),
            ),
            DUPLICATE_PAYMENT,
        )
        .check()
        .await?;

    let payment = payment::ActiveModel {
        id_suscripcion: Set(subscription_id),
        id_usuario: Set(user_id),
        importe: Set(importe),
        fecha_pago: Set(fecha_pago),
        metodo_pago: Set(metodo),
        estado: Set(estado),
        ..Default::default()
    }
    .insert(&state.db)
    .await
    .map_err(|e| AppError::from_write(e, DUPLICATE_PAYMENT))?;

    tracing::info!("Payment {} recorded for subscription {}", payment.id, subscription_id);
    Ok(created("Pago registrado exitosamente", "PagoNuevoDatos", payment))
}
