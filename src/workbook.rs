//! Excel workbook ingestion.
//!
//! The first sheet is re-encoded into a UTF-8 delimited file that the CSV path
//! reads like any other export. Text cells are kept as text so identifiers
//! with leading zeros survive.

use std::path::Path;

use anyhow::{Context, Result, anyhow};
use calamine::{Data, ExcelDateTime, Reader, open_workbook_auto};
use csv::QuoteStyle;
use log::info;

use crate::io_utils::open_output;

/// Rewrites the first sheet of `input` as a delimited file at `output`.
///
/// Returns the number of data rows written.
pub fn convert_workbook(
    input: &Path,
    output: &Path,
    delimiter: u8,
    null_marker: &str,
) -> Result<usize> {
    let mut workbook =
        open_workbook_auto(input).with_context(|| format!("Opening workbook {input:?}"))?;
    let sheet_name = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| anyhow!("Workbook {input:?} has no sheets"))?;
    let range = workbook
        .worksheet_range(&sheet_name)
        .with_context(|| format!("Reading sheet '{sheet_name}' of {input:?}"))?;

    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .quote_style(QuoteStyle::Always)
        .double_quote(true)
        .from_writer(open_output(output)?);

    let mut rows = range.rows();
    let Some(header) = rows.next() else {
        return Err(anyhow!("Sheet '{sheet_name}' of {input:?} is empty"));
    };
    writer
        .write_record(header.iter().map(header_text))
        .with_context(|| format!("Writing header to {output:?}"))?;

    let mut written = 0usize;
    for row in rows {
        writer
            .write_record(row.iter().map(|cell| cell_text(cell, null_marker)))
            .with_context(|| format!("Writing row {} to {output:?}", written + 1))?;
        written += 1;
    }
    writer
        .flush()
        .with_context(|| format!("Flushing {output:?}"))?;

    info!(
        "Converted sheet '{sheet_name}' ({written} row(s)) of {input:?} into {output:?}"
    );
    Ok(written)
}

fn header_text(cell: &Data) -> String {
    match cell {
        Data::Empty | Data::Error(_) => String::new(),
        other => cell_text(other, ""),
    }
}

pub fn cell_text(cell: &Data, null_marker: &str) -> String {
    match cell {
        Data::Empty | Data::Error(_) => null_marker.to_string(),
        Data::String(text) => text.trim().to_string(),
        Data::Int(value) => value.to_string(),
        Data::Float(value) => format_number(*value),
        Data::Bool(value) => value.to_string(),
        Data::DateTime(value) => format_date(value),
        Data::DateTimeIso(text) | Data::DurationIso(text) => text.trim().to_string(),
    }
}

/// Integral floats lose their fraction; everything else uses the shortest representation.
pub fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{value:.0}")
    } else {
        value.to_string()
    }
}

/// Dates keep only their calendar day; durations stay numeric.
fn format_date(value: &ExcelDateTime) -> String {
    if value.is_duration() {
        return format_number(value.as_f64());
    }
    value
        .as_datetime()
        .map(|datetime| datetime.date().format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| format_number(value.as_f64()))
}
