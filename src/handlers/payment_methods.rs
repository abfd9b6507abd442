use axum::{extract::State, Json};
use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, NaiveTime, Utc};
use sea_orm::{ActiveModelTrait, ColumnTrait, Condition, EntityTrait, QueryFilter, QueryOrder, Set};
use serde::{Deserialize, Serialize};

use crate::{
    db::{
        entities::{payment_method, PaymentMethod, User},
        enums::PaymentType,
    },
    error::Result,
    handlers::{created, Created, JsonBody, QueryParams},
    middleware::AuthUser,
    query::Pagination,
    services::mask_card_number,
    state::AppState,
    validation::{exists, exists_by_id, require, require_text, today, RuleSet},
};

const SAME_DAY_DUPLICATE: &str = "Ya registró hoy un método de pago";
const CARD_EXPIRED: &str = "La tarjeta está vencida";

#[derive(Deserialize)]
pub struct ListPaymentMethodsQuery {
    pub usuario: Option<i32>,
    pub page: Option<u64>,
    pub limit: Option<u64>,
}

#[derive(Deserialize)]
pub struct CreatePaymentMethodRequest {
    pub id_usuario: Option<i32>,
    pub tipo_pago: Option<String>,
    pub cbu: Option<String>,
    pub numero_tarjeta: Option<String>,
    pub mes_caducidad: Option<f64>,
    pub anio_caducidad: Option<f64>,
    /// Checked for shape only; never stored or returned.
    pub cvc: Option<String>,
}

/// Payment method as exposed over the API. The card number is the stored
/// masked form and there is no CVC field.
#[derive(Debug, Serialize)]
pub struct PaymentMethodResponse {
    pub id: i32,
    pub id_usuario: i32,
    pub tipo_pago: String,
    pub cbu: Option<String>,
    pub numero_tarjeta: Option<String>,
    pub mes_caducidad: Option<i32>,
    pub anio_caducidad: Option<i32>,
    pub fecha_creacion: DateTime<FixedOffset>,
    pub activo: bool,
}

impl From<payment_method::Model> for PaymentMethodResponse {
    fn from(model: payment_method::Model) -> Self {
        Self {
            id: model.id,
            id_usuario: model.id_usuario,
            tipo_pago: model.tipo_pago,
            cbu: model.cbu,
            numero_tarjeta: model.numero_tarjeta,
            mes_caducidad: model.mes_caducidad,
            anio_caducidad: model.anio_caducidad,
            fecha_creacion: model.fecha_creacion,
            activo: model.activo,
        }
    }
}

/// Last calendar day of `month`, or `None` unless both parts are whole numbers
/// naming a real month.
fn end_of_month(year: f64, month: f64) -> Option<NaiveDate> {
    if year.fract() != 0.0 || month.fract() != 0.0 || !(1.0..=12.0).contains(&month) {
        return None;
    }
    if !(f64::from(i32::MIN)..=f64::from(i32::MAX)).contains(&year) {
        return None;
    }
    let (year, month) = (year as i32, month as u32);
    let (next_year, next_month) = if month == 12 {
        (year.checked_add(1)?, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)?.pred_opt()
}

pub async fn list_payment_methods(
    State(state): State<AppState>,
    AuthUser(_): AuthUser,
    QueryParams(query): QueryParams<ListPaymentMethodsQuery>,
) -> Result<Json<Vec<PaymentMethodResponse>>> {
    let mut select = PaymentMethod::find();
    if let Some(user_id) = query.usuario {
        select = select.filter(payment_method::Column::IdUsuario.eq(user_id));
    }

    let methods = Pagination {
        page: query.page,
        limit: query.limit,
    }
    .apply(select.order_by_asc(payment_method::Column::Id))?
    .all(&state.db)
    .await?;

    Ok(Json(methods.into_iter().map(PaymentMethodResponse::from).collect()))
}

pub async fn create_payment_method(
    State(state): State<AppState>,
    AuthUser(_): AuthUser,
    JsonBody(payload): JsonBody<CreatePaymentMethodRequest>,
) -> Result<Created> {
    let user_id = require("id_usuario", payload.id_usuario)?;
    let tipo = require_text("tipo_pago", payload.tipo_pago)?;
    let kind = tipo.parse::<PaymentType>().ok();

    let (card, month, year) = if kind.is_some_and(|k| k.is_card()) {
        (
            Some(require_text("numero_tarjeta", payload.numero_tarjeta)?),
            Some(require("mes_caducidad", payload.mes_caducidad)?),
            Some(require("anio_caducidad", payload.anio_caducidad)?),
        )
    } else {
        (payload.numero_tarjeta, payload.mes_caducidad, payload.anio_caducidad)
    };
    let cbu = if kind == Some(PaymentType::BankAutoDebit) {
        Some(require_text("cbu", payload.cbu)?)
    } else {
        payload.cbu
    };

    let today = today();
    let start_of_today: DateTime<FixedOffset> =
        today.and_time(NaiveTime::MIN).and_utc().fixed_offset();

    let mut rules = RuleSet::new()
        .references("usuario", user_id, exists_by_id::<User>(&state.db, user_id))
        .one_of("tipo_pago", tipo.as_str(), PaymentType::VALUES)
        .no_conflict(
            exists::<PaymentMethod>(
                &state.db,
                Condition::all()
                    .add(payment_method::Column::IdUsuario.eq(user_id))
                    .add(payment_method::Column::Activo.eq(true))
                    .add(payment_method::Column::FechaCreacion.gte(start_of_today)),
            ),
            SAME_DAY_DUPLICATE,
        );
    if let Some(month) = month {
        rules = rules
            .integral("mes_caducidad", month)
            .between("mes_caducidad", month, 1.0, 12.0);
    }
    if let Some(year) = year {
        rules = rules
            .integral("anio_caducidad", year)
            .at_least("anio_caducidad", year, f64::from(today.year()));
    }
    if let (Some(month), Some(year)) = (month, year) {
        if let Some(expires) = end_of_month(year, month) {
            rules = rules.not_before_today(expires, CARD_EXPIRED);
        }
    }
    if let Some(cvc) = &payload.cvc {
        rules = rules.digits("cvc", cvc.as_str(), 3, 4);
    }
    rules.check_on(today).await?;

    let method = payment_method::ActiveModel {
        id_usuario: Set(user_id),
        tipo_pago: Set(tipo),
        cbu: Set(cbu),
        numero_tarjeta: Set(card.as_deref().map(mask_card_number)),
        mes_caducidad: Set(month.map(|m| m as i32)),
        anio_caducidad: Set(year.map(|y| y as i32)),
        cvc: Set(None),
        fecha_creacion: Set(Utc::now().into()),
        activo: Set(true),
        ..Default::default()
    }
    .insert(&state.db)
    .await?;

    tracing::info!("Payment method {} registered for user {}", method.id, user_id);
    Ok(created(
        "Método de pago registrado exitosamente",
        "MetodoPagoNuevoDatos",
        PaymentMethodResponse::from(method),
    ))
}
