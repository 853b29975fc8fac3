#![allow(dead_code)]

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::{TempDir, tempdir};

pub const EXPORT_WIDTH: usize = 5210;
pub const DETAIL_START: usize = 182;
pub const DETAIL_LINE_WIDTH: usize = 80;
pub const DETAIL_LINES: usize = 62;
pub const NULL: &str = "#e";

/// Scratch directory helper that cleans up files automatically on drop.
pub struct TestWorkspace {
    temp_dir: TempDir,
}

impl TestWorkspace {
    /// Creates a fresh scratch directory for the current test case.
    pub fn new() -> Self {
        Self {
            temp_dir: tempdir().expect("temp dir"),
        }
    }

    /// Returns the root path for all files owned by this workspace.
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Writes `contents` into a file under the workspace and returns the path.
    pub fn write(&self, name: &str, contents: &str) -> PathBuf {
        self.write_bytes(name, contents.as_bytes())
    }

    pub fn write_bytes(&self, name: &str, contents: &[u8]) -> PathBuf {
        let path = self.temp_dir.path().join(name);
        let mut file = File::create(&path).expect("create temp file");
        file.write_all(contents).expect("write temp file contents");
        path
    }

    pub fn read(&self, name: &str) -> String {
        std::fs::read_to_string(self.temp_dir.path().join(name)).expect("read workspace file")
    }
}

/// Header of a full-width DGII export.
///
/// Positions follow the production layout; unused positions carry
/// unregistered `Reservado` names at the depth their section expects.
pub fn dgii_header() -> Vec<String> {
    let mut names: Vec<String> = (0..EXPORT_WIDTH).map(|i| format!("Reservado{i}")).collect();
    let mut put = |position: usize, name: String| names[position] = name;

    put(0, "Archivo".into());
    put(1, "Version".into());
    put(2, "TipoeCF".into());
    put(3, "eNCF".into());
    put(4, "FechaVencimientoSecuencia".into());
    put(5, "RNCEmisor".into());
    put(6, "RazonSocialEmisor".into());
    put(7, "FechaEmision".into());
    put(8, "IndicadorMontoGravado".into());

    for j in 1..=7 {
        put(12 + (j - 1) * 2, format!("FormaPago[{j}]"));
        put(13 + (j - 1) * 2, format!("MontoPago[{j}]"));
    }
    for j in 1..=3 {
        put(38 + j, format!("TelefonoEmisor[{j}]"));
    }
    let taxes = [
        "TipoImpuesto",
        "TasaImpuestoAdicional",
        "MontoImpuestoSelectivoConsumoEspecifico",
        "MontoImpuestoSelectivoConsumoAdvalorem",
        "OtrosImpuestosAdicionales",
    ];
    for j in 1..=4 {
        for (k, name) in taxes.iter().enumerate() {
            put(119 + (j - 1) * 5 + k, format!("{name}[{j}]"));
        }
    }
    put(139, "MontoTotal".into());
    for j in 1..=4 {
        for (k, name) in taxes.iter().enumerate() {
            put(161 + (j - 1) * 5 + k, format!("{name}OtraMoneda[{j}]"));
        }
    }

    for line in 1..=DETAIL_LINES {
        let base = DETAIL_START + (line - 1) * DETAIL_LINE_WIDTH;
        for (offset, name) in detail_line_names(line).into_iter().enumerate() {
            put(base + offset, name);
        }
    }

    let adjustments = [
        "NumeroLineaDoR",
        "TipoAjuste",
        "IndicadorNorma1007",
        "DescripcionDescuentooRecargo",
        "TipoValor",
        "ValorDescuentooRecargo",
        "MontoDescuentooRecargo",
        "MontoDescuentooRecargoOtraMoneda",
        "IndicadorFacturacionDescuentooRecargo",
    ];
    for j in 1..=2 {
        for (k, name) in adjustments.iter().enumerate() {
            put(5157 + (j - 1) * 9 + k, format!("{name}[{j}]"));
        }
    }

    let pages = [
        "PaginaNo",
        "NoLineaDesde",
        "NoLineaHasta",
        "SubtotalMontoGravadoPagina",
        "SubtotalMontoGravado1Pagina",
        "SubtotalMontoGravado2Pagina",
        "SubtotalMontoGravado3Pagina",
        "SubtotalExentoPagina",
        "SubtotalItbisPagina",
        "SubtotalItbis1Pagina",
        "SubtotalItbis2Pagina",
        "SubtotalItbis3Pagina",
        "SubtotalImpuestoAdicionalPagina",
        "SubtotalImpuestoAdicionalPaginaTabla",
        "SubtotalImpuestoSelectivoConsumoEspecificoPagina",
        "SubtotalOtrosImpuesto",
        "MontoSubtotalPagina",
    ];
    for j in 1..=2 {
        for (k, name) in pages.iter().enumerate() {
            put(5175 + (j - 1) * 17 + k, format!("{name}[{j}]"));
        }
    }
    names
}

/// The eighty columns of one detail line, in export order.
fn detail_line_names(line: usize) -> Vec<String> {
    let mut names: Vec<String> = (0..DETAIL_LINE_WIDTH)
        .map(|k| format!("Reservado{k}[{line}]"))
        .collect();
    names[0] = format!("NumeroLinea[{line}]");
    for j in 1..=5 {
        names[1 + (j - 1) * 2] = format!("TipoCodigo[{line}][{j}]");
        names[2 + (j - 1) * 2] = format!("CodigoItem[{line}][{j}]");
    }
    names[11] = format!("IndicadorFacturacion[{line}]");
    names[12] = format!("NombreItem[{line}]");
    names[13] = format!("IndicadorBienoServicio[{line}]");
    names[14] = format!("CantidadItem[{line}]");
    names[15] = format!("PrecioUnitarioItem[{line}]");
    names[16] = format!("MontoItem[{line}]");
    names[17] = format!("FechaElaboracion[{line}]");
    for j in 1..=5 {
        names[22 + (j - 1) * 2] = format!("Subcantidad[{line}][{j}]");
        names[23 + (j - 1) * 2] = format!("CodigoSubcantidad[{line}][{j}]");
    }
    for j in 1..=5 {
        names[42 + (j - 1) * 3] = format!("TipoSubDescuento[{line}][{j}]");
        names[43 + (j - 1) * 3] = format!("SubDescuentoPorcentaje[{line}][{j}]");
        names[44 + (j - 1) * 3] = format!("MontoSubDescuento[{line}][{j}]");
    }
    names[57] = format!("DescuentoMonto[{line}]");
    for j in 1..=5 {
        names[58 + (j - 1) * 3] = format!("TipoSubRecargo[{line}][{j}]");
        names[59 + (j - 1) * 3] = format!("SubRecargoPorcentaje[{line}][{j}]");
        names[60 + (j - 1) * 3] = format!("MontosubRecargo[{line}][{j}]");
    }
    for j in 1..=2 {
        names[72 + j] = format!("TipoImpuesto[{line}][{j}]");
    }
    names
}

/// One data row of a full-width export, every cell null until set.
#[derive(Clone)]
pub struct DgiiRow<'h> {
    header: &'h [String],
    cells: Vec<String>,
}

impl<'h> DgiiRow<'h> {
    pub fn new(header: &'h [String]) -> Self {
        Self {
            header,
            cells: vec![NULL.to_string(); header.len()],
        }
    }

    /// A consumer invoice with the identifying header cells populated.
    pub fn invoice(header: &'h [String], encf: &str, document_type: u32, total: &str) -> Self {
        Self::new(header)
            .set("Archivo", &format!("131880681{encf}"))
            .set("Version", "1.0")
            .set("TipoeCF", &document_type.to_string())
            .set("eNCF", encf)
            .set("RNCEmisor", "131880681")
            .set("RazonSocialEmisor", "Comercial D'Luis SRL")
            .set("FechaEmision", "05-01-2024")
            .set("MontoTotal", total)
    }

    pub fn set(mut self, name: &str, value: &str) -> Self {
        let position = self
            .header
            .iter()
            .position(|column| column == name)
            .unwrap_or_else(|| panic!("no column named {name}"));
        self.cells[position] = value.to_string();
        self
    }

    pub fn cells(&self) -> &[String] {
        &self.cells
    }

    /// Drops trailing cells so the row is narrower than the header.
    pub fn truncate(mut self, width: usize) -> Self {
        self.cells.truncate(width);
        self
    }
}

/// Renders a `|`-delimited export.
pub fn export_text(header: &[String], rows: &[DgiiRow<'_>]) -> String {
    let mut text = header.join("|");
    text.push('\n');
    for row in rows {
        text.push_str(&row.cells().join("|"));
        text.push('\n');
    }
    text
}
