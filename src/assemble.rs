//! Typed record assembly.
//!
//! Grouped columns are matched by base name against a [`TableSchema`],
//! coerced to the registered type, and completed with the natural keys that
//! tie a child record to its transaction.

use std::collections::BTreeMap;

use crate::{
    data::{Value, coerce},
    error::ConvertError,
    rows::Column,
    schema::TableSchema,
};

pub const TRANSACTION_KEY_FIELD: &str = "eNCF";
pub const COMPANY_CODE_FIELD: &str = "CodEmpresa";
pub const LINE_NUMBER_FIELD: &str = "NumeroLinea";
pub const LINE_REFERENCE_FIELD: &str = "NumeroLinea_Detalle";
/// Discount/surcharge sections encode the line number under this name.
pub const ADJUSTMENT_LINE_FIELD: &str = "NumeroLineaDoR";

/// Field name to typed value, iterated in sorted name order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    fields: BTreeMap<String, Value>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: impl Into<String>, value: Value) -> Option<Value> {
        self.fields.insert(field.into(), value)
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(name, value)| (name.as_str(), value))
    }

    pub fn merge(&mut self, other: Record) {
        self.fields.extend(other.fields);
    }
}

impl FromIterator<(String, Value)> for Record {
    fn from_iter<T: IntoIterator<Item = (String, Value)>>(iter: T) -> Self {
        Record {
            fields: iter.into_iter().collect(),
        }
    }
}

/// Keys injected into every record of a transaction.
#[derive(Debug, Clone, Copy)]
pub struct RecordKeys<'a> {
    pub transaction_key: &'a str,
    pub company_code: i64,
    /// Owning detail line, for detail sub-records only.
    pub line_number: Option<i64>,
}

impl<'a> RecordKeys<'a> {
    pub fn new(transaction_key: &'a str, company_code: i64) -> Self {
        RecordKeys {
            transaction_key,
            company_code,
            line_number: None,
        }
    }

    pub fn for_line(self, line_number: i64) -> Self {
        RecordKeys {
            line_number: Some(line_number),
            ..self
        }
    }

    pub fn apply(&self, record: &mut Record) {
        record.insert(TRANSACTION_KEY_FIELD, Value::text(self.transaction_key));
        record.insert(COMPANY_CODE_FIELD, Value::Integer(self.company_code));
        if let Some(line) = self.line_number {
            record.insert(LINE_REFERENCE_FIELD, Value::Integer(line));
        }
    }
}

pub fn canonical_field_name(base: &str) -> &str {
    if base == ADJUSTMENT_LINE_FIELD {
        LINE_NUMBER_FIELD
    } else {
        base
    }
}

/// Coerces every registered, non-null column without injecting keys.
pub fn collect_fields(
    columns: &[&Column<'_>],
    schema: &TableSchema,
) -> Result<Record, ConvertError> {
    let mut record = Record::new();
    for column in columns {
        let Some(raw) = column.value() else {
            continue;
        };
        let field = canonical_field_name(column.base_name());
        let Some(ty) = schema.field_type(field) else {
            continue;
        };
        record.insert(field, coerce(field, raw, ty)?);
    }
    Ok(record)
}

/// Builds one record from a group, or `None` when no registered field is populated.
pub fn assemble(
    columns: &[&Column<'_>],
    schema: &TableSchema,
    keys: &RecordKeys<'_>,
) -> Result<Option<Record>, ConvertError> {
    let mut record = collect_fields(columns, schema)?;
    if record.is_empty() {
        return Ok(None);
    }
    keys.apply(&mut record);
    Ok(Some(record))
}
