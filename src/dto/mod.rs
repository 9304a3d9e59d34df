use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer};

use crate::{
    error::{AppError, AppResult},
    validation::ValidationErrors,
};

/// Largest amount a `NUMERIC(12, 2)` money column holds in whole units.
pub const MAX_AMOUNT: i64 = 9_999_999_999;

pub mod auth;
pub mod categories;
pub mod orders;
pub mod products;

/// Accepts `"5"`, `5` or `5.5` for fields that clients send either as text or as numbers.
pub fn scalar<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Scalar {
        Text(String),
        Int(i64),
        Float(f64),
        Bool(bool),
    }

    Ok(Option::<Scalar>::deserialize(deserializer)?.map(|value| match value {
        Scalar::Text(text) => text,
        Scalar::Int(n) => n.to_string(),
        Scalar::Float(f) => f.to_string(),
        Scalar::Bool(b) => b.to_string(),
    }))
}

/// Pull a validated field out of a request, trimmed.
pub(crate) fn take(field: &str, value: Option<String>) -> AppResult<String> {
    match value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty()) {
        Some(value) => Ok(value),
        None => Err(invalid(field, format!("The {} field is required.", field.replace('_', " ")))),
    }
}

pub(crate) fn take_decimal(field: &str, value: Option<String>) -> AppResult<Decimal> {
    let text = take(field, value)?;
    Decimal::from_str(&text)
        .map_err(|_| invalid(field, format!("The {} must be a number.", field.replace('_', " "))))
}

pub(crate) fn take_i32(field: &str, value: Option<String>) -> AppResult<i32> {
    let text = take(field, value)?;
    text.parse::<i32>()
        .map_err(|_| invalid(field, format!("The {} must be an integer.", field.replace('_', " "))))
}

fn invalid(field: &str, message: String) -> AppError {
    let mut errors = ValidationErrors::default();
    errors.add(field, message);
    AppError::Validation(errors)
}
