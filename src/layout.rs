//! Column positions of the DGII e-CF flat export.
//!
//! The export is positional: each section occupies a fixed window of columns.
//! [`ExportLayout::dgii`] holds the production layout; narrower layouts are
//! only useful for fixtures.

use crate::grouping::Window;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportLayout {
    /// Column whose value names the generated XML file.
    pub file_name_column: usize,
    /// `TipoeCF`.
    pub document_type_column: usize,
    /// `eNCF`.
    pub transaction_key_column: usize,
    /// `MontoTotal`.
    pub total_amount_column: usize,
    /// Columns scanned for depth-0 header fields.
    pub header: Window,
    pub payment_methods: Window,
    pub issuer_phones: Window,
    pub additional_taxes: Window,
    pub additional_taxes_foreign: Window,
    pub detail: Window,
    pub detail_sections: DetailLayout,
    pub adjustments: Window,
    pub pagination: Window,
}

/// Windows relative to a single detail line's own columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailLayout {
    pub item_codes: Window,
    pub subquantities: Window,
    pub subdiscounts: Window,
    pub subsurcharges: Window,
    pub additional_taxes: Window,
}

impl ExportLayout {
    pub fn dgii() -> Self {
        ExportLayout {
            file_name_column: 0,
            document_type_column: 2,
            transaction_key_column: 3,
            total_amount_column: 139,
            header: Window::ALL,
            payment_methods: Window::new(12, 26),
            issuer_phones: Window::new(39, 42),
            additional_taxes: Window::new(119, 139),
            additional_taxes_foreign: Window::new(161, 181),
            detail: Window::new(182, 5142),
            detail_sections: DetailLayout::dgii(),
            adjustments: Window::new(5157, 5175),
            pagination: Window::new(5175, 5210),
        }
    }
}

impl Default for ExportLayout {
    fn default() -> Self {
        Self::dgii()
    }
}

impl DetailLayout {
    pub fn dgii() -> Self {
        DetailLayout {
            item_codes: Window::new(1, 11),
            subquantities: Window::new(22, 32),
            subdiscounts: Window::new(42, 57),
            subsurcharges: Window::new(58, 73),
            additional_taxes: Window::new(73, 75),
        }
    }
}

impl Default for DetailLayout {
    fn default() -> Self {
        Self::dgii()
    }
}
