use std::path::PathBuf;

use thiserror::Error;

use crate::schema::FieldType;

/// Failures that abort a conversion run.
#[derive(Debug, Error)]
pub enum ConvertError {
    /// A registered field holds a value its declared type cannot parse.
    #[error("field '{field}' expects {expected} but the export holds '{value}'")]
    Coercion {
        field: String,
        value: String,
        expected: FieldType,
    },
    #[error("row {row} has no transaction key (eNCF) in column {column}")]
    MissingTransactionKey { row: usize, column: usize },
    #[error("the file {0:?} does not exist")]
    MissingInput(PathBuf),
    #[error("the file {0:?} is not a .csv or .xlsx file")]
    UnsupportedInput(PathBuf),
}
