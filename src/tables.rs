//! Table processors: one per destination table family.
//!
//! Each processor selects its section of the row through the layout, groups
//! the columns by bracket index and hands every group to the assembler. Line
//! detail is the only nested section: each detail line is split again at the
//! second bracket level into its item codes, subquantities, subdiscounts,
//! subsurcharges and additional taxes.

use anyhow::Result;
use log::{debug, info};
use rust_decimal::Decimal;

use crate::{
    assemble::{COMPANY_CODE_FIELD, Record, RecordKeys, assemble, collect_fields},
    data::{Value, coerce_decimal, coerce_integer},
    error::ConvertError,
    grouping::{Window, group_section},
    layout::ExportLayout,
    render::CURRENT_TIMESTAMP,
    rows::{Column, FlatRow},
    schema::{
        ADDITIONAL_TAXES, ADDITIONAL_TAXES_FOREIGN, ADJUSTMENTS, DETAIL, DETAIL_ADDITIONAL_TAXES,
        DETAIL_ITEM_CODES, DETAIL_SUBDISCOUNTS, DETAIL_SUBQUANTITIES, DETAIL_SUBSURCHARGES, HEADER,
        ISSUER_PHONES, PAGINATION, PAYMENT_METHODS, TableSchema,
    },
    sink::RecordSink,
};

pub const DEFAULT_COMPANY_CODE: i64 = 1;

/// Consumer invoices (e-CF 32) below the threshold are reported through the daily summary.
const SUMMARY_DOCUMENT_TYPE: i64 = 32;
const SUMMARY_AMOUNT_THRESHOLD: i64 = 250_000;
const SUMMARY_FLAG_FIELD: &str = "EnviaraDgiiPorResumen";

pub struct TransactionProcessor<'l> {
    layout: &'l ExportLayout,
    company_code: i64,
}

impl<'l> TransactionProcessor<'l> {
    pub fn new(layout: &'l ExportLayout, company_code: i64) -> Self {
        TransactionProcessor {
            layout,
            company_code,
        }
    }

    pub fn transaction_key<'r>(&self, row: &'r FlatRow<'_>) -> Result<&'r str, ConvertError> {
        row.value(self.layout.transaction_key_column)
            .map(str::trim)
            .ok_or(ConvertError::MissingTransactionKey {
                row: row.number,
                column: self.layout.transaction_key_column,
            })
    }

    /// Sends every record of `row` to `sink` and returns how many were emitted.
    pub fn process_row(&self, row: &FlatRow<'_>, sink: &mut dyn RecordSink) -> Result<usize> {
        let transaction_key = self.transaction_key(row)?;
        info!("Generating ({}) eNCF={transaction_key:?}", row.number);
        sink.begin_transaction(row.number, transaction_key)?;

        let columns = row.column_refs();
        let keys = RecordKeys::new(transaction_key, self.company_code);

        let mut emitted = self.process_header(row, &columns, &keys, sink)?;
        emitted += self.process_payment_methods(&columns, &keys, sink)?;
        emitted += self.process_issuer_phones(&columns, &keys, sink)?;
        emitted += self.process_additional_taxes(&columns, &keys, sink)?;
        emitted += self.process_additional_taxes_foreign(&columns, &keys, sink)?;
        emitted += self.process_detail(&columns, &keys, sink)?;
        emitted += self.process_adjustments(&columns, &keys, sink)?;
        emitted += self.process_pagination(&columns, &keys, sink)?;
        Ok(emitted)
    }

    /// Emits the single `Comprobantes_Emitidos` record of the row.
    ///
    /// Administrative defaults are overridden by same-named export columns;
    /// the company code always comes from configuration.
    pub fn process_header(
        &self,
        row: &FlatRow<'_>,
        columns: &[&Column<'_>],
        keys: &RecordKeys<'_>,
        sink: &mut dyn RecordSink,
    ) -> Result<usize> {
        let scanned: Vec<&Column<'_>> = self
            .layout
            .header
            .slice(columns)
            .iter()
            .copied()
            .filter(|column| column.depth() == 0)
            .collect();

        let mut record = self.header_defaults(row, keys.transaction_key)?;
        record.merge(collect_fields(&scanned, &HEADER)?);
        record.insert(COMPANY_CODE_FIELD, Value::Integer(self.company_code));
        sink.accept(HEADER.name, record)?;
        Ok(1)
    }

    fn header_defaults(&self, row: &FlatRow<'_>, transaction_key: &str) -> Result<Record> {
        let file_stem = row
            .value(self.layout.file_name_column)
            .map(str::trim)
            .unwrap_or(transaction_key);

        let mut record = Record::new();
        record.insert("FechaHoraFirma", Value::text(CURRENT_TIMESTAMP));
        record.insert("FechaCreacion", Value::text(CURRENT_TIMESTAMP));
        record.insert("Estatus", Value::Boolean(true));
        record.insert(SUMMARY_FLAG_FIELD, Value::Boolean(self.sends_summary(row)?));
        record.insert("EnviarAReceptor", Value::Boolean(false));
        record.insert("EstatusEnvioDgii", Value::text("Pendiente"));
        record.insert("EstatusEnvioReceptor", Value::text("Pendiente"));
        record.insert("NombreDispositivoCreador", Value::text("Interno"));
        record.insert("CantidadIntentosEnviosDgii", Value::Integer(0));
        record.insert("CantidadIntentosEnviosReceptor", Value::Integer(0));
        record.insert("NombreArchivo", Value::text(format!("{file_stem}.xml")));
        record.insert("CodigoSeguridadeCF", Value::text(""));
        record.insert("CodigoEstadoValidacionDgii", Value::Integer(0));
        record.insert("CodUsuarioCreador", Value::text("Sist"));
        Ok(record)
    }

    /// Whether the transaction is reported through the summary instead of individually.
    ///
    /// The total is only read for document type 32.
    pub fn sends_summary(&self, row: &FlatRow<'_>) -> Result<bool, ConvertError> {
        let Some(document_type) = row.value(self.layout.document_type_column) else {
            return Ok(false);
        };
        if coerce_integer("TipoeCF", document_type)? != SUMMARY_DOCUMENT_TYPE {
            return Ok(false);
        }
        let Some(total) = row.value(self.layout.total_amount_column) else {
            return Ok(false);
        };
        Ok(coerce_decimal("MontoTotal", total)? < Decimal::from(SUMMARY_AMOUNT_THRESHOLD))
    }

    pub fn process_payment_methods(
        &self,
        columns: &[&Column<'_>],
        keys: &RecordKeys<'_>,
        sink: &mut dyn RecordSink,
    ) -> Result<usize> {
        emit_groups(
            columns,
            self.layout.payment_methods,
            1,
            &PAYMENT_METHODS,
            keys,
            sink,
        )
    }

    pub fn process_issuer_phones(
        &self,
        columns: &[&Column<'_>],
        keys: &RecordKeys<'_>,
        sink: &mut dyn RecordSink,
    ) -> Result<usize> {
        emit_groups(columns, self.layout.issuer_phones, 1, &ISSUER_PHONES, keys, sink)
    }

    pub fn process_additional_taxes(
        &self,
        columns: &[&Column<'_>],
        keys: &RecordKeys<'_>,
        sink: &mut dyn RecordSink,
    ) -> Result<usize> {
        emit_groups(
            columns,
            self.layout.additional_taxes,
            1,
            &ADDITIONAL_TAXES,
            keys,
            sink,
        )
    }

    pub fn process_additional_taxes_foreign(
        &self,
        columns: &[&Column<'_>],
        keys: &RecordKeys<'_>,
        sink: &mut dyn RecordSink,
    ) -> Result<usize> {
        emit_groups(
            columns,
            self.layout.additional_taxes_foreign,
            1,
            &ADDITIONAL_TAXES_FOREIGN,
            keys,
            sink,
        )
    }

    /// Emits detail lines and their nested sections.
    ///
    /// Nulls are kept while grouping lines so that the sub-section windows stay
    /// aligned with each line's column positions.
    pub fn process_detail(
        &self,
        columns: &[&Column<'_>],
        keys: &RecordKeys<'_>,
        sink: &mut dyn RecordSink,
    ) -> Result<usize> {
        let mut emitted = 0;
        for line in group_section(columns, self.layout.detail, 1, false) {
            let Some(line_number) = line_number(&line.columns) else {
                debug!(
                    "Skipping detail group {} of {:?}: no line number",
                    line.index, keys.transaction_key
                );
                continue;
            };
            emitted += self.process_detail_line(&line.columns, line_number, keys, sink)?;
        }
        Ok(emitted)
    }

    fn process_detail_line(
        &self,
        line: &[&Column<'_>],
        line_number: i64,
        keys: &RecordKeys<'_>,
        sink: &mut dyn RecordSink,
    ) -> Result<usize> {
        let mut emitted = 0;
        if let Some(fields) = group_section(line, Window::ALL, 1, true).first() {
            if let Some(record) = assemble(&fields.columns, &DETAIL, keys)? {
                sink.accept(DETAIL.name, record)?;
                emitted += 1;
            }
        }

        let line_keys = keys.for_line(line_number);
        let sections = &self.layout.detail_sections;
        let nested: [(Window, &TableSchema); 5] = [
            (sections.item_codes, &DETAIL_ITEM_CODES),
            (sections.subquantities, &DETAIL_SUBQUANTITIES),
            (sections.subdiscounts, &DETAIL_SUBDISCOUNTS),
            (sections.subsurcharges, &DETAIL_SUBSURCHARGES),
            (sections.additional_taxes, &DETAIL_ADDITIONAL_TAXES),
        ];
        for (window, schema) in nested {
            emitted += emit_groups(line, window, 2, schema, &line_keys, sink)?;
        }
        Ok(emitted)
    }

    pub fn process_adjustments(
        &self,
        columns: &[&Column<'_>],
        keys: &RecordKeys<'_>,
        sink: &mut dyn RecordSink,
    ) -> Result<usize> {
        emit_groups(columns, self.layout.adjustments, 1, &ADJUSTMENTS, keys, sink)
    }

    pub fn process_pagination(
        &self,
        columns: &[&Column<'_>],
        keys: &RecordKeys<'_>,
        sink: &mut dyn RecordSink,
    ) -> Result<usize> {
        emit_groups(columns, self.layout.pagination, 1, &PAGINATION, keys, sink)
    }
}

/// First column of a detail line holds `NumeroLinea`.
fn line_number(columns: &[&Column<'_>]) -> Option<i64> {
    columns.first()?.value()?.trim().parse().ok()
}

fn emit_groups(
    columns: &[&Column<'_>],
    window: Window,
    level: usize,
    schema: &TableSchema,
    keys: &RecordKeys<'_>,
    sink: &mut dyn RecordSink,
) -> Result<usize> {
    let mut emitted = 0;
    for group in group_section(columns, window, level, true) {
        if let Some(record) = assemble(&group.columns, schema, keys)? {
            sink.accept(schema.name, record)?;
            emitted += 1;
        }
    }
    if emitted > 0 {
        debug!(
            "{emitted} record(s) for {} from {:?}",
            schema.name, keys.transaction_key
        );
    }
    Ok(emitted)
}
