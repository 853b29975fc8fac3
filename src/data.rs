use std::{fmt, str::FromStr};

use rust_decimal::Decimal;

use crate::{error::ConvertError, schema::FieldType};

/// A typed field value ready for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Integer(i64),
    Decimal(Decimal),
    Text(String),
    Boolean(bool),
}

impl Value {
    pub fn text(value: impl Into<String>) -> Self {
        Value::Text(value.into())
    }

    pub fn as_display(&self) -> String {
        match self {
            Value::Integer(i) => i.to_string(),
            Value::Decimal(d) => d.to_string(),
            Value::Text(s) => s.clone(),
            Value::Boolean(true) => "1".to_string(),
            Value::Boolean(false) => "0".to_string(),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_display())
    }
}

pub fn parse_boolean(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "t" | "yes" | "y" | "1" => Some(true),
        "false" | "f" | "no" | "n" | "0" => Some(false),
        _ => None,
    }
}

pub fn parse_decimal(value: &str) -> Option<Decimal> {
    let trimmed = value.trim();
    Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .ok()
}

fn mismatch(field: &str, raw: &str, expected: FieldType) -> ConvertError {
    ConvertError::Coercion {
        field: field.to_string(),
        value: raw.to_string(),
        expected,
    }
}

pub fn coerce_integer(field: &str, raw: &str) -> Result<i64, ConvertError> {
    raw.trim()
        .parse()
        .map_err(|_| mismatch(field, raw, FieldType::Integer))
}

pub fn coerce_decimal(field: &str, raw: &str) -> Result<Decimal, ConvertError> {
    parse_decimal(raw).ok_or_else(|| mismatch(field, raw, FieldType::Decimal))
}

/// Coerces a raw export cell to the registered type of `field`.
pub fn coerce(field: &str, raw: &str, ty: FieldType) -> Result<Value, ConvertError> {
    let value = match ty {
        FieldType::Integer => Value::Integer(coerce_integer(field, raw)?),
        FieldType::Decimal => Value::Decimal(coerce_decimal(field, raw)?),
        FieldType::Boolean => Value::Boolean(
            parse_boolean(raw).ok_or_else(|| mismatch(field, raw, FieldType::Boolean))?,
        ),
        FieldType::Text | FieldType::Date | FieldType::DateTime => Value::text(raw.trim()),
    };
    Ok(value)
}
