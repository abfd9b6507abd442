use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A stored or submitted label that names no known variant.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("valor desconocido: '{0}'")]
pub struct UnknownVariant(pub String);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sex {
    Male,
    Female,
    Other,
}

impl Sex {
    pub const VALUES: &'static [&'static str] = &["M", "F", "X"];

    pub fn as_str(&self) -> &str {
        match self {
            Self::Male => "M",
            Self::Female => "F",
            Self::Other => "X",
        }
    }
}

impl FromStr for Sex {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "M" => Ok(Self::Male),
            "F" => Ok(Self::Female),
            "X" => Ok(Self::Other),
            other => Err(UnknownVariant(other.to_string())),
        }
    }
}

impl From<Sex> for String {
    fn from(sex: Sex) -> String {
        sex.as_str().to_string()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentType {
    Cash,
    DebitCard,
    CreditCard,
    BankAutoDebit,
    Transfer,
}

impl PaymentType {
    pub const VALUES: &'static [&'static str] = &[
        "efectivo",
        "tarjeta_debito",
        "tarjeta_credito",
        "debito_automatico",
        "transferencia",
    ];

    pub fn as_str(&self) -> &str {
        match self {
            Self::Cash => "efectivo",
            Self::DebitCard => "tarjeta_debito",
            Self::CreditCard => "tarjeta_credito",
            Self::BankAutoDebit => "debito_automatico",
            Self::Transfer => "transferencia",
        }
    }


    pub fn is_card(&self) -> bool {
        matches!(self, Self::DebitCard | Self::CreditCard)
    }
}

impl FromStr for PaymentType {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "efectivo" => Ok(Self::Cash),
            "tarjeta_debito" => Ok(Self::DebitCard),
            "tarjeta_credito" => Ok(Self::CreditCard),
            "debito_automatico" => Ok(Self::BankAutoDebit),
            "transferencia" => Ok(Self::Transfer),
            other => Err(UnknownVariant(other.to_string())),
        }
    }
}

impl From<PaymentType> for String {
    fn from(payment_type: PaymentType) -> String {
        payment_type.as_str().to_string()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum PaymentStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

impl PaymentStatus {
    pub const VALUES: &'static [&'static str] = &["pendiente", "aprobado", "rechazado"];

    pub fn as_str(&self) -> &str {
        match self {
            Self::Pending => "pendiente",
            Self::Approved => "aprobado",
            Self::Rejected => "rechazado",
        }
    }
}

impl FromStr for PaymentStatus {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pendiente" => Ok(Self::Pending),
            "aprobado" => Ok(Self::Approved),
            "rechazado" => Ok(Self::Rejected),
            other => Err(UnknownVariant(other.to_string())),
        }
    }
}

impl From<PaymentStatus> for String {
    fn from(status: PaymentStatus) -> String {
        status.as_str().to_string()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum PlaylistStatus {
    #[default]
    Public,
    Private,
    Deleted,
}

impl PlaylistStatus {
    pub const VALUES: &'static [&'static str] = &["publica", "privada", "eliminada"];

    pub fn as_str(&self) -> &str {
        match self {
            Self::Public => "publica",
            Self::Private => "privada",
            Self::Deleted => "eliminada",
        }
    }
}

impl FromStr for PlaylistStatus {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "publica" => Ok(Self::Public),
            "privada" => Ok(Self::Private),
            "eliminada" => Ok(Self::Deleted),
            other => Err(UnknownVariant(other.to_string())),
        }
    }
}

impl From<PlaylistStatus> for String {
    fn from(status: PlaylistStatus) -> String {
        status.as_str().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payment_type_values_parse_back() {
        for value in PaymentType::VALUES {
            let parsed: PaymentType = value.parse().expect("listed value must parse");
            assert_eq!(parsed.as_str(), *value);
        }
        assert_eq!(
            "cheque".parse::<PaymentType>(),
            Err(UnknownVariant("cheque".to_string()))
        );
    }

    #[test]
    fn only_cards_are_cards() {
        assert!(PaymentType::CreditCard.is_card());
        assert!(PaymentType::DebitCard.is_card());
        assert!(!PaymentType::Transfer.is_card());
    }

    #[test]
    fn statuses_parse_their_listed_labels() {
        for value in PaymentStatus::VALUES {
            let parsed: PaymentStatus = value.parse().expect("listed value must parse");
            assert_eq!(parsed.as_str(), *value);
        }
        for value in PlaylistStatus::VALUES {
            let parsed: PlaylistStatus = value.parse().expect("listed value must parse");
            assert_eq!(parsed.as_str(), *value);
        }
        assert!("borrada".parse::<PlaylistStatus>().is_err());
    }

    #[test]
    fn sex_accepts_single_letter_codes() {
        assert_eq!("F".parse::<Sex>(), Ok(Sex::Female));
        assert!("f".parse::<Sex>().is_err());
    }
}
