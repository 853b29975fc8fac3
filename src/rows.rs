//! Flat rows of the export.
//!
//! [`HeaderRow`] parses every column path once per file; each [`FlatRow`]
//! then borrows those parsed paths and only owns its cell values. Cells equal
//! to the null marker, or blank, are stored as `None`.

use crate::path::ColumnPath;

pub const DEFAULT_NULL_MARKER: &str = "#e";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnHeader {
    pub name: String,
    pub path: ColumnPath,
}

#[derive(Debug, Clone, Default)]
pub struct HeaderRow {
    columns: Vec<ColumnHeader>,
}

impl HeaderRow {
    pub fn parse<S: AsRef<str>>(names: &[S]) -> Self {
        let columns = names
            .iter()
            .map(|name| {
                let name = name.as_ref().to_string();
                let path = ColumnPath::parse(&name);
                ColumnHeader { name, path }
            })
            .collect();
        HeaderRow { columns }
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn columns(&self) -> &[ColumnHeader] {
        &self.columns
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column<'h> {
    pub header: &'h ColumnHeader,
    pub value: Option<String>,
}

impl Column<'_> {
    pub fn name(&self) -> &str {
        &self.header.name
    }

    pub fn base_name(&self) -> &str {
        &self.header.path.base
    }

    pub fn depth(&self) -> usize {
        self.header.path.depth()
    }

    pub fn group_index(&self, level: usize) -> Option<usize> {
        self.header.path.index_at(level)
    }

    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    pub fn is_null(&self) -> bool {
        self.value.is_none()
    }
}

/// One transaction of the export.
#[derive(Debug, Clone)]
pub struct FlatRow<'h> {
    /// 1-based position of the row among the data rows.
    pub number: usize,
    columns: Vec<Column<'h>>,
}

impl<'h> FlatRow<'h> {
    /// Pairs `cells` with `header` by position.
    ///
    /// Missing trailing cells read as null; cells beyond the header are dropped.
    pub fn from_cells<I, S>(
        header: &'h HeaderRow,
        number: usize,
        cells: I,
        null_marker: &str,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut cells = cells.into_iter();
        let columns = header
            .columns()
            .iter()
            .map(|column| Column {
                header: column,
                value: cells
                    .next()
                    .and_then(|cell| normalize_cell(cell.as_ref(), null_marker)),
            })
            .collect();
        FlatRow { number, columns }
    }

    pub fn columns(&self) -> &[Column<'h>] {
        &self.columns
    }

    /// Borrowed view of the columns, the shape the grouper consumes.
    pub fn column_refs(&self) -> Vec<&Column<'h>> {
        self.columns.iter().collect()
    }

    pub fn value(&self, position: usize) -> Option<&str> {
        self.columns.get(position).and_then(Column::value)
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

fn normalize_cell(cell: &str, null_marker: &str) -> Option<String> {
    let trimmed = cell.trim();
    if trimmed.is_empty() || trimmed == null_marker {
        None
    } else {
        Some(cell.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_marker_and_blank_cells_become_null() {
        let header = HeaderRow::parse(&["eNCF", "FormaPago[1]", "MontoPago[1]"]);
        let row = FlatRow::from_cells(&header, 1, ["E310000000001", " #e ", ""], "#e");
        assert_eq!(row.value(0), Some("E310000000001"));
        assert!(row.columns()[1].is_null());
        assert!(row.columns()[2].is_null());
    }

    #[test]
    fn short_rows_pad_with_null() {
        let header = HeaderRow::parse(&["a", "b[1]", "c[1][2]"]);
        let row = FlatRow::from_cells(&header, 3, ["x"], DEFAULT_NULL_MARKER);
        assert_eq!(row.len(), 3);
        assert_eq!(row.number, 3);
        assert_eq!(row.value(0), Some("x"));
        assert_eq!(row.value(2), None);
    }

    #[test]
    fn columns_expose_parsed_paths() {
        let header = HeaderRow::parse(&["CodigoItem[2][4]"]);
        let row = FlatRow::from_cells(&header, 1, ["ABC"], DEFAULT_NULL_MARKER);
        let column = &row.columns()[0];
        assert_eq!(column.name(), "CodigoItem[2][4]");
        assert_eq!(column.base_name(), "CodigoItem");
        assert_eq!(column.depth(), 2);
        assert_eq!(column.group_index(1), Some(2));
        assert_eq!(column.group_index(2), Some(4));
    }
}
