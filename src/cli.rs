use std::path::PathBuf;

use clap::{Args, Parser};

#[derive(Debug, Parser)]
#[command(
    author,
    version,
    about = "Convert DGII e-CF flat exports into SQL Server INSERT scripts",
    long_about = None
)]
pub struct Cli {
    #[command(flatten)]
    pub convert: ConvertArgs,
}

#[derive(Debug, Args)]
pub struct ConvertArgs {
    /// Flat export to convert (.csv with '|' delimiters, or .xlsx)
    #[arg(value_name = "FILEPATH")]
    pub input: PathBuf,
    /// Company code stamped on every generated record
    #[arg(short = 'e', long = "empresa", default_value_t = 1)]
    pub company_code: i64,
}
