use std::{collections::BTreeMap, io::Write};

use anyhow::{Context, Result};

use crate::{
    assemble::Record,
    render::{SCRIPT_EPILOGUE, SCRIPT_PREAMBLE, render_insert, transaction_banner},
};

/// Destination for assembled records.
pub trait RecordSink {
    fn accept(&mut self, table: &str, record: Record) -> Result<()>;

    /// Marks the start of a transaction's records.
    fn begin_transaction(&mut self, _sequence: usize, _transaction_key: &str) -> Result<()> {
        Ok(())
    }
}

/// Appends rendered statements to a SQL Server script.
pub struct SqlScriptWriter<W: Write> {
    inner: W,
    statements: usize,
    per_table: BTreeMap<String, usize>,
}

impl<W: Write> SqlScriptWriter<W> {
    /// Writes the transaction preamble.
    pub fn start(mut inner: W) -> Result<Self> {
        inner
            .write_all(SCRIPT_PREAMBLE.as_bytes())
            .context("Writing script preamble")?;
        Ok(SqlScriptWriter {
            inner,
            statements: 0,
            per_table: BTreeMap::new(),
        })
    }

    /// Writes the commit/rollback epilogue and flushes.
    pub fn finish(mut self) -> Result<W> {
        self.inner
            .write_all(SCRIPT_EPILOGUE.as_bytes())
            .context("Writing script epilogue")?;
        self.inner.flush().context("Flushing SQL output")?;
        Ok(self.inner)
    }

    pub fn statements(&self) -> usize {
        self.statements
    }

    pub fn table_counts(&self) -> &BTreeMap<String, usize> {
        &self.per_table
    }
}

impl<W: Write> RecordSink for SqlScriptWriter<W> {
    fn accept(&mut self, table: &str, record: Record) -> Result<()> {
        self.inner
            .write_all(render_insert(&record, table).as_bytes())
            .with_context(|| format!("Writing INSERT for {table}"))?;
        self.statements += 1;
        *self.per_table.entry(table.to_string()).or_insert(0) += 1;
        Ok(())
    }

    fn begin_transaction(&mut self, sequence: usize, transaction_key: &str) -> Result<()> {
        self.inner
            .write_all(transaction_banner(sequence, transaction_key).as_bytes())
            .context("Writing transaction banner")
    }
}

/// Keeps records in arrival order.
#[derive(Debug, Default)]
pub struct MemorySink {
    pub records: Vec<(String, Record)>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records_for(&self, table: &str) -> Vec<&Record> {
        self.records
            .iter()
            .filter(|(name, _)| name == table)
            .map(|(_, record)| record)
            .collect()
    }

    pub fn tables(&self) -> Vec<&str> {
        self.records.iter().map(|(name, _)| name.as_str()).collect()
    }
}

impl RecordSink for MemorySink {
    fn accept(&mut self, table: &str, record: Record) -> Result<()> {
        self.records.push((table.to_string(), record));
        Ok(())
    }
}
