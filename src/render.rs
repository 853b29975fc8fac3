//! SQL Server script rendering.
//!
//! Every record becomes one `INSERT` statement whose columns are listed in
//! sorted field-name order, so output does not depend on processing order.
//! The whole script runs inside a single `TRY`/`TRANSACTION` block that rolls
//! back on the first database error.

use chrono::{NaiveDate, NaiveTime};
use itertools::Itertools;

use crate::{assemble::Record, data::Value};

/// Text value emitted verbatim as a function call.
pub const CURRENT_TIMESTAMP: &str = "GETDATE()";
/// Fields whose name contains this marker hold dates.
pub const DATE_FIELD_MARKER: &str = "Fecha";

pub const SCRIPT_PREAMBLE: &str = "\
DECLARE @errormensage varchar(max)

BEGIN TRY
BEGIN TRANSACTION

";

pub const SCRIPT_EPILOGUE: &str = "

COMMIT TRANSACTION
END TRY
BEGIN CATCH
    ROLLBACK TRANSACTION;
    set @errormensage = ERROR_MESSAGE()
    RAISERROR(@errormensage,15,217)
END CATCH
";

pub fn transaction_banner(sequence: usize, transaction_key: &str) -> String {
    format!(
        "-- {} -- Transaccion {sequence}, eNCF='{transaction_key}' --\n",
        "=".repeat(80)
    )
}

pub fn render_insert(record: &Record, table: &str) -> String {
    let (columns, values): (Vec<&str>, Vec<String>) = record
        .iter()
        .map(|(field, value)| (field, render_value(field, value)))
        .unzip();
    format!(
        "\nINSERT INTO {table}(\n    {}\n)\nVALUES (\n    {}\n)\n\n",
        columns.iter().join("\n    ,"),
        values.iter().join("\n    ,")
    )
}

pub fn render_value(field: &str, value: &Value) -> String {
    match value {
        Value::Text(text) if text == CURRENT_TIMESTAMP => text.clone(),
        Value::Text(text) => {
            let text = if field.contains(DATE_FIELD_MARKER) {
                reformat_date(text).unwrap_or_else(|| text.clone())
            } else {
                text.clone()
            };
            quote(&text)
        }
        other => other.as_display(),
    }
}

pub fn quote(text: &str) -> String {
    format!("'{}'", text.replace('\'', "''"))
}

/// Rewrites `DD-MM-YYYY` (optionally followed by a time) as `YYYY-MM-DD`.
///
/// Returns `None` for anything else, including values already in
/// `YYYY-MM-DD` form.
pub fn reformat_date(value: &str) -> Option<String> {
    let trimmed = value.trim();
    let (date_part, time_part) = match trimmed.split_once(' ') {
        Some((date, time)) => (date, Some(time.trim())),
        None => (trimmed, None),
    };

    let segments: Vec<&str> = date_part.split('-').collect();
    let [day, month, year] = segments.as_slice() else {
        return None;
    };
    if !is_digits(day, 1..=2) || !is_digits(month, 1..=2) || !is_digits(year, 4..=4) {
        return None;
    }
    let date = NaiveDate::parse_from_str(date_part, "%d-%m-%Y").ok()?;
    let formatted = date.format("%Y-%m-%d").to_string();

    match time_part {
        None => Some(formatted),
        Some(time) => {
            NaiveTime::parse_from_str(time, "%H:%M:%S")
                .or_else(|_| NaiveTime::parse_from_str(time, "%H:%M"))
                .ok()?;
            Some(format!("{formatted} {time}"))
        }
    }
}

fn is_digits(segment: &str, len: std::ops::RangeInclusive<usize>) -> bool {
    len.contains(&segment.len()) && segment.bytes().all(|b| b.is_ascii_digit())
}
