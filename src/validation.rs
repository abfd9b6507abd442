//! Precondition pipeline run before every write.
//!
//! Presence is checked first with [`require`] / [`require_text`], which hand back
//! the unwrapped values the later rules need. Everything else is declared as a
//! [`RuleSet`] and run by [`RuleSet::check`]: rules execute in stage order
//! (references, value domain, temporal, uniqueness, conflicting state), keeping
//! declaration order inside a stage, and the first failure is returned. Database
//! probes are lazy futures, so a rule that is never reached never queries.

use std::{fmt::Display, future::Future, pin::Pin};

use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::{Condition, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait, QueryFilter};

use crate::error::{AppError, Result};

pub type Probe<'a> = Pin<Box<dyn Future<Output = std::result::Result<bool, DbErr>> + Send + 'a>>;

/// Probe answering whether any row of `E` satisfies `condition`.
pub fn exists<'a, E>(db: &'a DatabaseConnection, condition: Condition) -> Probe<'a>
where
    E: EntityTrait,
    E::Model: Sync,
{
    Box::pin(async move { Ok(E::find().filter(condition).count(db).await? > 0) })
}

/// Probe for a row of `E` with the given primary key.
pub fn exists_by_id<'a, E>(db: &'a DatabaseConnection, id: i32) -> Probe<'a>
where
    E: EntityTrait,
    E::Model: Sync,
    <E::PrimaryKey as sea_orm::PrimaryKeyTrait>::ValueType: From<i32>,
{
    Box::pin(async move { Ok(E::find_by_id(id).one(db).await?.is_some()) })
}

pub fn require<T>(field: &str, value: Option<T>) -> Result<T> {
    value.ok_or_else(|| missing(field))
}

/// Like [`require`] but also rejects blank strings. The value is returned trimmed.
pub fn require_text(field: &str, value: Option<String>) -> Result<String> {
    match value.map(|v| v.trim().to_string()) {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(missing(field)),
    }
}

fn missing(field: &str) -> AppError {
    AppError::BadRequest(format!("Faltan datos: el campo '{}' es obligatorio", field))
}

/// Parses a date supplied either as `YYYY-MM-DD` or as an RFC 3339 timestamp,
/// dropping the time of day.
pub fn parse_day(field: &str, raw: &str) -> Result<NaiveDate> {
    let raw = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Ok(date);
    }
    DateTime::parse_from_rfc3339(raw)
        .map(|ts| ts.with_timezone(&Utc).date_naive())
        .map_err(|_| {
            AppError::BadRequest(format!(
                "El campo '{}' debe ser una fecha con formato AAAA-MM-DD",
                field
            ))
        })
}

/// Server "today" at day granularity.
pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Stage {
    References,
    ValueDomain,
    Temporal,
    Uniqueness,
    ConflictingState,
}

pub enum Rule<'a> {
    References {
        relation: &'static str,
        id: i32,
        probe: Probe<'a>,
    },
    Range {
        field: &'static str,
        value: f64,
        min: Option<f64>,
        max: Option<f64>,
    },
    Integral {
        field: &'static str,
        value: f64,
    },
    OneOf {
        field: &'static str,
        value: String,
        allowed: &'static [&'static str],
    },
    Lowercase {
        field: &'static str,
        value: String,
    },
    /// Only ASCII digits, between `min` and `max` of them.
    Digits {
        field: &'static str,
        value: String,
        min: usize,
        max: usize,
    },
    NotBeforeToday {
        date: NaiveDate,
        message: &'static str,
    },
    After {
        date: NaiveDate,
        bound: NaiveDate,
        message: &'static str,
    },
    Unique {
        probe: Probe<'a>,
        message: &'static str,
    },
    NoConflict {
        probe: Probe<'a>,
        message: &'static str,
    },
}

impl Rule<'_> {
    pub fn stage(&self) -> Stage {
        match self {
            Self::References { .. } => Stage::References,
            Self::Range { .. }
            | Self::Integral { .. }
            | Self::OneOf { .. }
            | Self::Lowercase { .. }
            | Self::Digits { .. } => Stage::ValueDomain,
            Self::NotBeforeToday { .. } | Self::After { .. } => Stage::Temporal,
            Self::Unique { .. } => Stage::Uniqueness,
            Self::NoConflict { .. } => Stage::ConflictingState,
        }
    }

    async fn evaluate(self, today: NaiveDate) -> Result<()> {
        match self {
            Self::References { relation, id, probe } => {
                if !probe.await? {
                    return Err(AppError::NotFound(format!(
                        "No existe {} con id {}",
                        relation, id
                    )));
                }
            }
            Self::Range { field, value, min, max } => {
                let below = min.is_some_and(|min| value < min);
                let above = max.is_some_and(|max| value > max);
                if below || above {
                    return Err(AppError::BadRequest(range_message(field, min, max)));
                }
            }
            Self::Integral { field, value } => {
                if value.fract() != 0.0 || !value.is_finite() {
                    return Err(AppError::BadRequest(format!(
                        "El campo '{}' debe ser un número entero",
                        field
                    )));
                }
                // Stored columns are i32; anything wider would be clamped on insert.
                if !(f64::from(i32::MIN)..=f64::from(i32::MAX)).contains(&value) {
                    return Err(AppError::BadRequest(range_message(
                        field,
                        Some(f64::from(i32::MIN)),
                        Some(f64::from(i32::MAX)),
                    )));
                }
            }
            Self::OneOf { field, value, allowed } => {
                if !allowed.contains(&value.as_str()) {
                    return Err(AppError::BadRequest(format!(
                        "El campo '{}' debe ser uno de: {}",
                        field,
                        allowed.join(", ")
                    )));
                }
            }
            Self::Lowercase { field, value } => {
                if value.chars().any(char::is_uppercase) {
                    return Err(AppError::BadRequest(format!(
                        "El campo '{}' no puede contener mayúsculas",
                        field
                    )));
                }
            }
            Self::Digits { field, value, min, max } => {
                let count = value.chars().count();
                if !value.chars().all(|c| c.is_ascii_digit()) || !(min..=max).contains(&count) {
                    return Err(AppError::BadRequest(format!(
                        "El campo '{}' debe tener entre {} y {} dígitos",
                        field, min, max
                    )));
                }
            }
            Self::NotBeforeToday { date, message } => {
                if date < today {
                    return Err(AppError::BadRequest(message.to_string()));
                }
            }
            Self::After { date, bound, message } => {
                if date <= bound {
                    return Err(AppError::BadRequest(message.to_string()));
                }
            }
            Self::Unique { probe, message } | Self::NoConflict { probe, message } => {
                if probe.await? {
                    return Err(AppError::Conflict(message.to_string()));
                }
            }
        }
        Ok(())
    }
}

fn range_message(field: &str, min: Option<f64>, max: Option<f64>) -> String {
    fn num(v: f64) -> impl Display {
        if v.fract() == 0.0 {
            format!("{}", v as i64)
        } else {
            format!("{}", v)
        }
    }
    match (min, max) {
        (Some(min), Some(max)) => format!(
            "El campo '{}' debe estar entre {} y {}",
            field,
            num(min),
            num(max)
        ),
        (Some(min), None) => format!(
            "El campo '{}' debe ser mayor o igual a {}",
            field,
            num(min)
        ),
        (None, Some(max)) => format!(
            "El campo '{}' debe ser menor o igual a {}",
            field,
            num(max)
        ),
        (None, None) => format!("El campo '{}' está fuera de rango", field),
    }
}

#[derive(Default)]
pub struct RuleSet<'a> {
    rules: Vec<Rule<'a>>,
}

impl<'a> RuleSet<'a> {
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    pub fn rule(mut self, rule: Rule<'a>) -> Self {
        self.rules.push(rule);
        self
    }

    pub fn references(self, relation: &'static str, id: i32, probe: Probe<'a>) -> Self {
        self.rule(Rule::References { relation, id, probe })
    }

    pub fn between(self, field: &'static str, value: f64, min: f64, max: f64) -> Self {
        self.rule(Rule::Range {
            field,
            value,
            min: Some(min),
            max: Some(max),
        })
    }

    pub fn at_least(self, field: &'static str, value: f64, min: f64) -> Self {
        self.rule(Rule::Range {
            field,
            value,
            min: Some(min),
            max: None,
        })
    }

    pub fn integral(self, field: &'static str, value: f64) -> Self {
        self.rule(Rule::Integral { field, value })
    }

    pub fn one_of(
        self,
        field: &'static str,
        value: impl Into<String>,
        allowed: &'static [&'static str],
    ) -> Self {
        self.rule(Rule::OneOf {
            field,
            value: value.into(),
            allowed,
        })
    }

    pub fn lowercase(self, field: &'static str, value: impl Into<String>) -> Self {
        self.rule(Rule::Lowercase {
            field,
            value: value.into(),
        })
    }

    pub fn digits(
        self,
        field: &'static str,
        value: impl Into<String>,
        min: usize,
        max: usize,
    ) -> Self {
        self.rule(Rule::Digits {
            field,
            value: value.into(),
            min,
            max,
        })
    }

    pub fn not_before_today(self, date: NaiveDate, message: &'static str) -> Self {
        self.rule(Rule::NotBeforeToday { date, message })
    }

    pub fn after(self, date: NaiveDate, bound: NaiveDate, message: &'static str) -> Self {
        self.rule(Rule::After {
            date,
            bound,
            message,
        })
    }

    pub fn unique(self, probe: Probe<'a>, message: &'static str) -> Self {
        self.rule(Rule::Unique { probe, message })
    }

    pub fn no_conflict(self, probe: Probe<'a>, message: &'static str) -> Self {
        self.rule(Rule::NoConflict { probe, message })
    }

    /// Runs the rules against the server's current date.
    pub async fn check(self) -> Result<()> {
        self.check_on(today()).await
    }

    pub async fn check_on(mut self, today: NaiveDate) -> Result<()> {
        self.rules.sort_by_key(|rule| rule.stage());
        for rule in self.rules {
            rule.evaluate(today).await?;
        }
        Ok(())
    }
}
