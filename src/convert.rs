//! Conversion orchestrator: input detection, row reading and script output.

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use log::{debug, info, warn};

use crate::{
    cli::ConvertArgs,
    error::ConvertError,
    io_utils::{self, DEFAULT_DELIMITER, DEFAULT_INPUT_ENCODING, InputKind},
    layout::ExportLayout,
    rows::{DEFAULT_NULL_MARKER, FlatRow, HeaderRow},
    sink::{RecordSink, SqlScriptWriter},
    tables::{DEFAULT_COMPANY_CODE, TransactionProcessor},
    workbook,
};

pub const DEFAULT_OUTPUT: &str = "res.sql";
pub const DEFAULT_INTERMEDIATE_CSV: &str = "res.csv";

#[derive(Debug, Clone)]
pub struct ConvertOptions {
    pub input: PathBuf,
    pub company_code: i64,
    pub output: PathBuf,
    /// Where a workbook is re-encoded before processing.
    pub intermediate_csv: PathBuf,
    pub delimiter: u8,
    /// Encoding label for CSV input. The workbook intermediate is always UTF-8.
    pub input_encoding: String,
    pub null_marker: String,
    pub layout: ExportLayout,
}

impl ConvertOptions {
    pub fn new(input: impl Into<PathBuf>) -> Self {
        ConvertOptions {
            input: input.into(),
            company_code: DEFAULT_COMPANY_CODE,
            output: PathBuf::from(DEFAULT_OUTPUT),
            intermediate_csv: PathBuf::from(DEFAULT_INTERMEDIATE_CSV),
            delimiter: DEFAULT_DELIMITER,
            input_encoding: DEFAULT_INPUT_ENCODING.to_string(),
            null_marker: DEFAULT_NULL_MARKER.to_string(),
            layout: ExportLayout::dgii(),
        }
    }
}

impl From<&ConvertArgs> for ConvertOptions {
    fn from(args: &ConvertArgs) -> Self {
        ConvertOptions {
            company_code: args.company_code,
            ..ConvertOptions::new(&args.input)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionSummary {
    pub rows: usize,
    pub statements: usize,
    pub output: PathBuf,
}

pub fn execute(args: &ConvertArgs) -> Result<()> {
    let options = ConvertOptions::from(args);
    let summary = convert_file(&options)?;
    info!(
        "Wrote {} statement(s) for {} transaction(s) to {:?}",
        summary.statements, summary.rows, summary.output
    );
    Ok(())
}

/// Converts the export at `options.input` into a SQL script at `options.output`.
pub fn convert_file(options: &ConvertOptions) -> Result<ConversionSummary> {
    if !options.input.is_file() {
        return Err(ConvertError::MissingInput(options.input.clone()).into());
    }
    let kind = InputKind::detect(&options.input)?;
    info!("Processing {:?} as {kind:?}", options.input);

    let (csv_path, encoding_label) = match kind {
        InputKind::Csv => (options.input.as_path(), options.input_encoding.as_str()),
        InputKind::Workbook => {
            workbook::convert_workbook(
                &options.input,
                &options.intermediate_csv,
                options.delimiter,
                &options.null_marker,
            )?;
            (options.intermediate_csv.as_path(), "utf-8")
        }
    };

    let output = io_utils::open_output(&options.output)?;
    let mut script = SqlScriptWriter::start(output)?;
    let rows = match convert_csv(csv_path, encoding_label, options, &mut script) {
        Ok(rows) => rows,
        Err(err) => {
            drop(script);
            discard_partial_script(&options.output);
            return Err(err);
        }
    };
    let statements = script.statements();
    for (table, count) in script.table_counts() {
        debug!("{table}: {count} statement(s)");
    }
    script
        .finish()
        .with_context(|| format!("Finishing {:?}", options.output))?;
    info!("Result file: {:?}", options.output);

    Ok(ConversionSummary {
        rows,
        statements,
        output: options.output.clone(),
    })
}

/// Removes the script of a failed run.
fn discard_partial_script(path: &Path) {
    match fs::remove_file(path) {
        Ok(()) => debug!("Removed partial script {path:?}"),
        Err(err) => warn!("Could not remove partial script {path:?}: {err}"),
    }
}

/// Feeds every data row of a delimited export to `sink`, returning the row count.
pub fn convert_csv(
    path: &Path,
    encoding_label: &str,
    options: &ConvertOptions,
    sink: &mut dyn RecordSink,
) -> Result<usize> {
    let encoding = io_utils::resolve_encoding(Some(encoding_label))?;
    let mut reader = io_utils::open_csv_reader_from_path(path, options.delimiter)?;
    let header = HeaderRow::parse(&io_utils::reader_headers(&mut reader, encoding)?);
    debug!("{} header column(s) in {path:?}", header.len());

    let processor = TransactionProcessor::new(&options.layout, options.company_code);
    let mut rows = 0usize;
    for (idx, record) in reader.byte_records().enumerate() {
        let number = idx + 1;
        let record = record.with_context(|| format!("Reading row {number} of {path:?}"))?;
        let cells = io_utils::decode_record(&record, encoding)
            .with_context(|| format!("Decoding row {number} of {path:?}"))?;
        let row = FlatRow::from_cells(&header, number, cells, &options.null_marker);
        processor
            .process_row(&row, sink)
            .with_context(|| format!("Row {number}"))?;
        rows = number;
    }
    Ok(rows)
}
