pub mod assemble;
pub mod cli;
pub mod convert;
pub mod data;
pub mod error;
pub mod grouping;
pub mod io_utils;
pub mod layout;
pub mod path;
pub mod render;
pub mod rows;
pub mod schema;
pub mod sink;
pub mod tables;
pub mod workbook;

use std::{env, sync::OnceLock};

use anyhow::Result;
use clap::Parser;
use log::LevelFilter;

use crate::cli::Cli;

static LOGGER: OnceLock<()> = OnceLock::new();

fn init_logging() {
    LOGGER.get_or_init(|| {
        let mut builder = env_logger::Builder::from_env(env_logger::Env::default());
        if env::var("RUST_LOG").is_err() {
            builder.filter_module("dgii_sql", LevelFilter::Info);
        }
        let _ = builder.format_timestamp_millis().try_init();
    });
}

pub fn run() -> Result<()> {
    init_logging();
    let cli = Cli::parse();
    convert::execute(&cli.convert)
}
