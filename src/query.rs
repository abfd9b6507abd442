//! Filter and shape construction shared by the collection reads.

use chrono::NaiveDate;
use sea_orm::{ColumnTrait, Condition, EntityTrait, Order, QueryOrder, QuerySelect, Select};
use serde::Deserialize;

use crate::error::{AppError, Result};
use crate::validation::parse_day;

/// `?page=&limit=`. Pagination only applies when both are supplied.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct Pagination {
    pub page: Option<u64>,
    pub limit: Option<u64>,
}

impl Pagination {
    pub fn new(page: u64, limit: u64) -> Self {
        Self {
            page: Some(page),
            limit: Some(limit),
        }
    }

    /// Zero-based `(offset, limit)`, or `None` for the full collection.
    pub fn window(&self) -> Result<Option<(u64, u64)>> {
        match (self.page, self.limit) {
            (Some(page), Some(limit)) => {
                if page == 0 || limit == 0 {
                    return Err(AppError::BadRequest(
                        "Los parámetros 'page' y 'limit' deben ser mayores que cero".to_string(),
                    ));
                }
                // Backends bind OFFSET/LIMIT as signed 64-bit integers.
                let offset = (page - 1)
                    .checked_mul(limit)
                    .filter(|offset| i64::try_from(*offset).is_ok() && i64::try_from(limit).is_ok())
                    .ok_or_else(|| {
                        AppError::BadRequest(
                            "Los parámetros 'page' y 'limit' exceden el rango permitido"
                                .to_string(),
                        )
                    })?;
                Ok(Some((offset, limit)))
            }
            _ => Ok(None),
        }
    }

    pub fn apply<E: EntityTrait>(&self, select: Select<E>) -> Result<Select<E>> {
        Ok(match self.window()? {
            Some((offset, limit)) => select.offset(offset).limit(limit),
            None => select,
        })
    }
}

/// `?desde=&hasta=`, inclusive on both ends.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DateRange {
    pub desde: Option<String>,
    pub hasta: Option<String>,
}

impl DateRange {
    pub fn bounds(&self) -> Result<(Option<NaiveDate>, Option<NaiveDate>)> {
        let from = self
            .desde
            .as_deref()
            .map(|raw| parse_day("desde", raw))
            .transpose()?;
        let to = self
            .hasta
            .as_deref()
            .map(|raw| parse_day("hasta", raw))
            .transpose()?;

        if let (Some(from), Some(to)) = (from, to) {
            if from > to {
                return Err(AppError::BadRequest(
                    "La fecha 'desde' no puede ser posterior a 'hasta'".to_string(),
                ));
            }
        }
        Ok((from, to))
    }

    pub fn condition<C: ColumnTrait>(&self, column: C) -> Result<Condition> {
        let condition = match self.bounds()? {
            (Some(from), Some(to)) => Condition::all().add(column.between(from, to)),
            (Some(from), None) => Condition::all().add(column.gte(from)),
            (None, Some(to)) => Condition::all().add(column.lte(to)),
            (None, None) => Condition::all(),
        };
        Ok(condition)
    }
}

pub fn parse_direction(raw: Option<&str>, default: Order) -> Result<Order> {
    match raw.map(|d| d.to_ascii_lowercase()) {
        None => Ok(default),
        Some(d) if d == "asc" => Ok(Order::Asc),
        Some(d) if d == "desc" => Ok(Order::Desc),
        Some(other) => Err(AppError::BadRequest(format!(
            "Dirección de orden inválida '{}', use 'asc' o 'desc'",
            other
        ))),
    }
}

/// Orders by the requested column and then by `tiebreak` so pages stay stable
/// when the sort key has duplicates.
pub fn order<E, C>(select: Select<E>, column: C, direction: Order, tiebreak: C) -> Select<E>
where
    E: EntityTrait,
    C: ColumnTrait,
{
    select.order_by(column, direction).order_by_asc(tiebreak)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn second_page_starts_after_first_limit() {
        assert_eq!(Pagination::new(2, 10).window().unwrap(), Some((10, 10)));
        assert_eq!(Pagination::new(1, 25).window().unwrap(), Some((0, 25)));
    }

    #[test]
    fn partial_pagination_means_full_collection() {
        let only_page = Pagination {
            page: Some(3),
            limit: None,
        };
        assert_eq!(only_page.window().unwrap(), None);
        assert_eq!(Pagination::default().window().unwrap(), None);
    }

    #[test]
    fn zero_page_is_rejected() {
        assert!(Pagination::new(0, 10).window().is_err());
        assert!(Pagination::new(1, 0).window().is_err());
    }

    #[test]
    fn overflowing_offset_is_rejected() {
        assert!(matches!(
            Pagination::new(u64::MAX, 2).window(),
            Err(AppError::BadRequest(_))
        ));
        assert!(Pagination::new(u64::MAX, 1).window().is_err());
        assert!(Pagination::new(1, u64::MAX).window().is_err());
        let last = i64::MAX as u64;
        assert_eq!(Pagination::new(last, 1).window().unwrap(), Some((last - 1, 1)));
    }

    #[test]
    fn inverted_date_range_is_rejected() {
        let range = DateRange {
            desde: Some("2026-02-01".into()),
            hasta: Some("2026-01-01".into()),
        };
        assert!(range.bounds().is_err());
    }

    #[test]
    fn single_sided_range_keeps_one_bound() {
        let range = DateRange {
            desde: None,
            hasta: Some("2026-01-31".into()),
        };
        let (from, to) = range.bounds().unwrap();
        assert_eq!(from, None);
        assert_eq!(to, NaiveDate::from_ymd_opt(2026, 1, 31));
    }

    #[test]
    fn direction_defaults_and_validates() {
        assert_eq!(parse_direction(None, Order::Desc).unwrap(), Order::Desc);
        assert_eq!(parse_direction(Some("ASC"), Order::Desc).unwrap(), Order::Asc);
        assert!(parse_direction(Some("up"), Order::Asc).is_err());
    }
}
