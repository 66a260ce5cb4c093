use thiserror::Error;

use crate::decimal::{Money, Rate};

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("invalid configuration: {message}")]
    InvalidConfiguration {
        message: String,
    },

    #[error("missing required field: {field}")]
    MissingField {
        field: &'static str,
    },

    #[error("negative amount for {field}: {amount}")]
    NegativeAmount {
        field: &'static str,
        amount: Money,
    },

    #[error("amount out of range for {field}: {amount}")]
    AmountOutOfRange {
        field: &'static str,
        amount: Money,
    },

    #[error("invalid interest rate: {rate}")]
    InvalidInterestRate {
        rate: Rate,
    },

    #[error("invalid day of month for {field}: {day}")]
    InvalidDayOfMonth {
        field: &'static str,
        day: u32,
    },

    #[error("invalid minimum payment policy: {message}")]
    InvalidMinimumPolicy {
        message: String,
    },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, EngineError>;
