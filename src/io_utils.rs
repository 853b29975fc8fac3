//! I/O utilities for reading exports and writing the SQL script.
//!
//! CSV input is read as raw bytes and decoded with `encoding_rs`, so a Latin-1
//! export and the UTF-8 intermediate written for workbooks flow through the
//! same reader. Rows may be shorter than the header; the reader is flexible
//! and missing trailing cells read as null.

use std::{
    fs::File,
    io::{BufReader, BufWriter, Read},
    path::Path,
};

use anyhow::{Context, Result, anyhow};
use encoding_rs::{Encoding, UTF_8};

use crate::error::ConvertError;

pub const DEFAULT_DELIMITER: u8 = b'|';
pub const DEFAULT_INPUT_ENCODING: &str = "latin1";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    Csv,
    Workbook,
}

impl InputKind {
    /// Detects the input kind from the file extension, case-insensitively.
    pub fn detect(path: &Path) -> Result<Self, ConvertError> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("csv") => Ok(InputKind::Csv),
            Some(ext) if ext.eq_ignore_ascii_case("xlsx") => Ok(InputKind::Workbook),
            _ => Err(ConvertError::UnsupportedInput(path.to_path_buf())),
        }
    }
}

pub fn resolve_encoding(label: Option<&str>) -> Result<&'static Encoding> {
    if let Some(value) = label {
        Encoding::for_label(value.trim().as_bytes())
            .ok_or_else(|| anyhow!("Unknown encoding '{value}'"))
    } else {
        Ok(UTF_8)
    }
}

pub fn open_csv_reader<R>(reader: R, delimiter: u8) -> csv::Reader<R>
where
    R: Read,
{
    let mut builder = csv::ReaderBuilder::new();
    builder
        .has_headers(true)
        .delimiter(delimiter)
        .double_quote(true)
        .flexible(true);
    builder.from_reader(reader)
}

pub fn open_csv_reader_from_path(
    path: &Path,
    delimiter: u8,
) -> Result<csv::Reader<BufReader<File>>> {
    let file = File::open(path).with_context(|| format!("Opening input file {path:?}"))?;
    Ok(open_csv_reader(BufReader::new(file), delimiter))
}

pub fn open_output(path: &Path) -> Result<BufWriter<File>> {
    let file = File::create(path).with_context(|| format!("Creating output file {path:?}"))?;
    Ok(BufWriter::new(file))
}

pub fn decode_bytes(bytes: &[u8], encoding: &'static Encoding) -> Result<String> {
    let (text, _, had_errors) = encoding.decode(bytes);
    if had_errors {
        Err(anyhow!(
            "Failed to decode text with encoding {}",
            encoding.name()
        ))
    } else {
        Ok(text.into_owned())
    }
}

pub fn decode_record(record: &csv::ByteRecord, encoding: &'static Encoding) -> Result<Vec<String>> {
    record
        .iter()
        .map(|field| decode_bytes(field, encoding))
        .collect()
}

pub fn reader_headers<R>(
    reader: &mut csv::Reader<R>,
    encoding: &'static Encoding,
) -> Result<Vec<String>>
where
    R: Read,
{
    let headers = reader.byte_headers()?.clone();
    decode_record(&headers, encoding)
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    #[test]
    fn detects_input_kind_by_extension() {
        assert_eq!(
            InputKind::detect(Path::new("ventas.csv")).unwrap(),
            InputKind::Csv
        );
        assert_eq!(
            InputKind::detect(Path::new("VENTAS.XLSX")).unwrap(),
            InputKind::Workbook
        );
        let err = InputKind::detect(Path::new("ventas.txt")).unwrap_err();
        assert!(matches!(
            err,
            ConvertError::UnsupportedInput(path) if path == PathBuf::from("ventas.txt")
        ));
        assert!(InputKind::detect(Path::new("ventas")).is_err());
    }

    #[test]
    fn latin1_bytes_decode_to_accented_text() {
        let encoding = resolve_encoding(Some(DEFAULT_INPUT_ENCODING)).unwrap();
        let input: &[u8] = b"RazonSocialEmisor|Direccion\nCompa\xf1\xeda SRL|Calle Duarte\n";
        let mut reader = open_csv_reader(input, DEFAULT_DELIMITER);
        assert_eq!(
            reader_headers(&mut reader, encoding).unwrap(),
            vec!["RazonSocialEmisor", "Direccion"]
        );
        let record = reader.byte_records().next().unwrap().unwrap();
        assert_eq!(
            decode_record(&record, encoding).unwrap(),
            vec!["Compañía SRL", "Calle Duarte"]
        );
    }

    #[test]
    fn short_rows_are_accepted() {
        let input: &[u8] = b"a|b|c\n1\n";
        let mut reader = open_csv_reader(input, DEFAULT_DELIMITER);
        let record = reader.byte_records().next().unwrap().unwrap();
        assert_eq!(record.len(), 1);
    }

    #[test]
    fn unknown_encoding_is_rejected() {
        assert!(resolve_encoding(Some("klingon")).is_err());
        assert_eq!(resolve_encoding(None).unwrap(), UTF_8);
    }
}
