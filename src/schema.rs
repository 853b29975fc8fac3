//! Field type registry for every destination table of the e-CF export.
//!
//! Each [`TableSchema`] pairs a SQL Server table name with the static list of
//! columns the export may populate and the [`FieldType`] each raw value is
//! coerced to. Fields that are not listed are ignored by the assembler, which
//! keeps the converter tolerant of extra export columns.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    Integer,
    Decimal,
    Text,
    Boolean,
    /// Carried as text; reformatted by the renderer.
    Date,
    /// Carried as text; reformatted by the renderer.
    DateTime,
}

impl FieldType {
    pub fn signature(&self) -> &'static str {
        match self {
            FieldType::Integer => "integer",
            FieldType::Decimal => "decimal",
            FieldType::Text => "text",
            FieldType::Boolean => "boolean",
            FieldType::Date => "date",
            FieldType::DateTime => "datetime",
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.signature())
    }
}

#[derive(Debug)]
pub struct TableSchema {
    pub name: &'static str,
    fields: &'static [(&'static str, FieldType)],
}

impl TableSchema {
    pub const fn new(name: &'static str, fields: &'static [(&'static str, FieldType)]) -> Self {
        Self { name, fields }
    }

    pub fn field_type(&self, field: &str) -> Option<FieldType> {
        self.fields
            .iter()
            .find(|(name, _)| *name == field)
            .map(|(_, ty)| *ty)
    }

    pub fn fields(&self) -> impl Iterator<Item = (&'static str, FieldType)> + '_ {
        self.fields.iter().copied()
    }
}

pub static HEADER: TableSchema = TableSchema::new("Comprobantes_Emitidos", HEADER_FIELDS);
pub static PAYMENT_METHODS: TableSchema = TableSchema::new(
    "Comprobantes_Emitidos_Formas_Pago",
    PAYMENT_METHOD_FIELDS,
);
pub static ISSUER_PHONES: TableSchema = TableSchema::new(
    "Comprobantes_Emitidos_Telefonos_Emisor",
    ISSUER_PHONE_FIELDS,
);
pub static ADDITIONAL_TAXES: TableSchema = TableSchema::new(
    "Comprobantes_Emitidos_Impuestos_Adicionales",
    ADDITIONAL_TAX_FIELDS,
);
pub static ADDITIONAL_TAXES_FOREIGN: TableSchema = TableSchema::new(
    "Comprobantes_Emitidos_Impuestos_Adicionales_Otra_Moneda",
    ADDITIONAL_TAX_FOREIGN_FIELDS,
);
pub static DETAIL: TableSchema = TableSchema::new("Comprobantes_Emitidos_Detalle", DETAIL_FIELDS);
pub static DETAIL_ITEM_CODES: TableSchema = TableSchema::new(
    "Comprobantes_Emitidos_Detalle_Item",
    DETAIL_ITEM_CODE_FIELDS,
);
pub static DETAIL_SUBQUANTITIES: TableSchema = TableSchema::new(
    "Comprobantes_Emitidos_Detalle_Subcantidad",
    DETAIL_SUBQUANTITY_FIELDS,
);
pub static DETAIL_SUBDISCOUNTS: TableSchema = TableSchema::new(
    "Comprobantes_Emitidos_Detalle_SubDescuento",
    DETAIL_SUBDISCOUNT_FIELDS,
);
pub static DETAIL_SUBSURCHARGES: TableSchema = TableSchema::new(
    "Comprobantes_Emitidos_Detalle_SubRecargo",
    DETAIL_SUBSURCHARGE_FIELDS,
);
pub static DETAIL_ADDITIONAL_TAXES: TableSchema = TableSchema::new(
    "Comprobantes_Emitidos_Detalle_Impuestos_Adicionales",
    DETAIL_ADDITIONAL_TAX_FIELDS,
);
pub static ADJUSTMENTS: TableSchema = TableSchema::new(
    "Comprobantes_Emitidos_Descuento_Recargo",
    ADJUSTMENT_FIELDS,
);
pub static PAGINATION: TableSchema = TableSchema::new(
    "Comprobantes_Emitidos_Paginacion",
    PAGINATION_FIELDS,
);

const HEADER_FIELDS: &[(&str, FieldType)] = &[
    ("ActividadEconomica", FieldType::Text),
    ("BancoPago", FieldType::Text),
    ("CantidadBulto", FieldType::Decimal),
    ("CantidadIntentosEnviosDgii", FieldType::Integer),
    ("CantidadIntentosEnviosReceptor", FieldType::Integer),
    ("CodEmpresa", FieldType::Integer),
    ("CodigoEstadoValidacionDgii", FieldType::Integer),
    ("CodigoInternoComprador", FieldType::Text),
    ("CodigoModificacion", FieldType::Integer),
    ("CodigoSeguridadeCF", FieldType::Text),
    ("CodigoVendedor", FieldType::Text),
    ("CodUsuarioCreador", FieldType::Text),
    ("CodUsuarioEnvioDgii", FieldType::Text),
    ("CodUsuarioEnvioReceptor", FieldType::Text),
    ("CondicionesEntrega", FieldType::Text),
    ("Conductor", FieldType::Text),
    ("ContactoComprador", FieldType::Text),
    ("ContactoEntrega", FieldType::Text),
    ("CorreoComprador", FieldType::Text),
    ("CorreoEmisor", FieldType::Text),
    ("DireccionComprador", FieldType::Text),
    ("DireccionDestino", FieldType::Text),
    ("DireccionEmisor", FieldType::Text),
    ("DireccionEntrega", FieldType::Text),
    ("DocumentoTransporte", FieldType::Integer),
    ("eNCF", FieldType::Text),
    ("EnviaraDgiiPorResumen", FieldType::Boolean),
    ("EnviarAReceptor", FieldType::Boolean),
    ("ErrorEnvioDgii", FieldType::Text),
    ("EstadoAprobacionComercial", FieldType::Integer),
    ("Estatus", FieldType::Boolean),
    ("EstatusEnvioDgii", FieldType::Text),
    ("EstatusEnvioReceptor", FieldType::Text),
    ("FechaActualizacionEstadoValidacionDgii", FieldType::DateTime),
    ("FechaCreacion", FieldType::DateTime),
    ("FechaDesde", FieldType::Date),
    ("FechaEmbarque", FieldType::Date),
    ("FechaEmision", FieldType::Date),
    ("FechaEntrega", FieldType::Date),
    ("FechaHasta", FieldType::Date),
    ("FechaHoraFirma", FieldType::DateTime),
    ("FechaLimitePago", FieldType::Date),
    ("FechaNCFModificado", FieldType::Date),
    ("FechaOrdenCompra", FieldType::Date),
    ("FechaVencimientoSecuencia", FieldType::Date),
    ("Ficha", FieldType::Text),
    ("Flete", FieldType::Decimal),
    ("IdentificadorExtranjero", FieldType::Text),
    ("IndicadorEnvioDiferido", FieldType::Integer),
    ("IndicadorMontoGravado", FieldType::Integer),
    ("IndicadorNotaCredito", FieldType::Integer),
    ("IndicadorServicioTodoIncluido", FieldType::Integer),
    ("Informacionadicionalcomprador", FieldType::Text),
    ("InformacionAdicionalEmisor", FieldType::Text),
    ("ITBIS1", FieldType::Integer),
    ("ITBIS2", FieldType::Integer),
    ("ITBIS3", FieldType::Integer),
    ("MensajeErrorEnvioDgii", FieldType::Text),
    ("MontoAvancePago", FieldType::Decimal),
    ("MontoExento", FieldType::Decimal),
    ("MontoExentoOtraMoneda", FieldType::Decimal),
    ("MontoGravado1OtraMoneda", FieldType::Decimal),
    ("MontoGravado2OtraMoneda", FieldType::Decimal),
    ("MontoGravado3OtraMoneda", FieldType::Decimal),
    ("MontoGravadoI1", FieldType::Decimal),
    ("MontoGravadoI2", FieldType::Decimal),
    ("MontoGravadoI3", FieldType::Decimal),
    ("MontoGravadoTotal", FieldType::Decimal),
    ("MontoGravadoTotalOtraMoneda", FieldType::Decimal),
    ("MontoImpuestoAdicional", FieldType::Decimal),
    ("MontoImpuestoAdicionalOtraMoneda", FieldType::Decimal),
    ("MontoNoFacturable", FieldType::Decimal),
    ("MontoPeriodo", FieldType::Decimal),
    ("MontoTotal", FieldType::Decimal),
    ("MontoTotalOtraMoneda", FieldType::Decimal),
    ("Municipio", FieldType::Text),
    ("MunicipioComprador", FieldType::Text),
    ("NCFModificado", FieldType::Text),
    ("NombreArchivo", FieldType::Text),
    ("NombreComercial", FieldType::Text),
    ("NombreCompaniaTransportista", FieldType::Text),
    ("NombreDispositivoCreador", FieldType::Text),
    ("NombreDispositivoEnvioDgii", FieldType::Text),
    ("NombreDispositivoEnvioReceptor", FieldType::Text),
    ("NombrePuertoDesembarque", FieldType::Text),
    ("NombrePuertoEmbarque", FieldType::Text),
    ("NombrePuertoSalida", FieldType::Text),
    ("Nota_Interna", FieldType::Text),
    ("NumeroAlbaran", FieldType::Text),
    ("NumeroContenedor", FieldType::Text),
    ("NumeroCuentaPago", FieldType::Text),
    ("NumeroEmbarque", FieldType::Text),
    ("NumeroFacturaInterna", FieldType::Text),
    ("NumeroOrdenCompra", FieldType::Text),
    ("NumeroPedidoInterno", FieldType::Integer),
    ("NumeroReferencia", FieldType::Integer),
    ("NumeroViaje", FieldType::Text),
    ("OtrosGastos", FieldType::Decimal),
    ("PaisComprador", FieldType::Text),
    ("PaisDestino", FieldType::Text),
    ("PaisOrigen", FieldType::Text),
    ("PesoBruto", FieldType::Decimal),
    ("PesoNeto", FieldType::Decimal),
    ("Placa", FieldType::Text),
    ("Provincia", FieldType::Text),
    ("ProvinciaComprador", FieldType::Text),
    ("RazonModificacion", FieldType::Text),
    ("RazonSocialComprador", FieldType::Text),
    ("RazonSocialEmisor", FieldType::Text),
    ("RegimenAduanero", FieldType::Text),
    ("ResponsablePago", FieldType::Text),
    ("RNCComprador", FieldType::Text),
    ("RNCEmisor", FieldType::Text),
    ("RNCIdentificacionCompaniaTransportista", FieldType::Text),
    ("RNCOtroContribuyente", FieldType::Text),
    ("RutaTransporte", FieldType::Text),
    ("RutaVenta", FieldType::Text),
    ("SaldoAnterior", FieldType::Decimal),
    ("SecuenciaUtilizada", FieldType::Boolean),
    ("Seguro", FieldType::Decimal),
    ("Sucursal", FieldType::Text),
    ("TelefonoAdicional", FieldType::Text),
    ("TerminoPago", FieldType::Text),
    ("TipoCambio", FieldType::Decimal),
    ("TipoCuentaPago", FieldType::Text),
    ("TipoeCF", FieldType::Text),
    ("TipoIngresos", FieldType::Text),
    ("TipoMoneda", FieldType::Text),
    ("TipoPago", FieldType::Integer),
    ("TotalCif", FieldType::Decimal),
    ("TotalFob", FieldType::Decimal),
    ("TotalISRPercepcion", FieldType::Decimal),
    ("TotalISRRetencion", FieldType::Decimal),
    ("TotalITBIS", FieldType::Decimal),
    ("TotalITBIS1", FieldType::Decimal),
    ("TotalITBIS1OtraMoneda", FieldType::Decimal),
    ("TotalITBIS2", FieldType::Decimal),
    ("TotalITBIS2OtraMoneda", FieldType::Decimal),
    ("TotalITBIS3", FieldType::Decimal),
    ("TotalITBIS3OtraMoneda", FieldType::Decimal),
    ("TotalITBISOtraMoneda", FieldType::Decimal),
    ("TotalITBISPercepcion", FieldType::Decimal),
    ("TotalITBISRetenido", FieldType::Decimal),
    ("TotalPaginas", FieldType::Integer),
    ("TrackId", FieldType::Text),
    ("UltimaFechaEnvioDgii", FieldType::DateTime),
    ("UltimaFechaEnvioReceptor", FieldType::DateTime),
    ("UnidadBulto", FieldType::Integer),
    ("UnidadPesoBruto", FieldType::Integer),
    ("UnidadPesoNeto", FieldType::Integer),
    ("UnidadVolumen", FieldType::Integer),
    ("ValorPagar", FieldType::Decimal),
    ("Version", FieldType::Decimal),
    ("ViaTransporte", FieldType::Text),
    ("VolumenBulto", FieldType::Decimal),
    ("WebSite", FieldType::Text),
    ("ZonaTransporte", FieldType::Text),
    ("ZonaVenta", FieldType::Text),
];

const PAYMENT_METHOD_FIELDS: &[(&str, FieldType)] = &[
    ("eNCF", FieldType::Text),
    ("CodEmpresa", FieldType::Integer),
    ("FormaPago", FieldType::Integer),
    ("MontoPago", FieldType::Decimal),
];

const ISSUER_PHONE_FIELDS: &[(&str, FieldType)] = &[
    ("eNCF", FieldType::Text),
    ("CodEmpresa", FieldType::Integer),
    ("TelefonoEmisor", FieldType::Text),
];

const ADDITIONAL_TAX_FIELDS: &[(&str, FieldType)] = &[
    ("eNCF", FieldType::Text),
    ("CodEmpresa", FieldType::Integer),
    ("TipoImpuesto", FieldType::Text),
    ("TasaImpuestoAdicional", FieldType::Decimal),
    ("MontoImpuestoSelectivoConsumoEspecifico", FieldType::Decimal),
    ("MontoImpuestoSelectivoConsumoAdvalorem", FieldType::Decimal),
    ("OtrosImpuestosAdicionales", FieldType::Decimal),
];

const ADDITIONAL_TAX_FOREIGN_FIELDS: &[(&str, FieldType)] = &[
    ("eNCF", FieldType::Text),
    ("CodEmpresa", FieldType::Integer),
    ("TipoImpuestoOtraMoneda", FieldType::Text),
    ("TasaImpuestoAdicionalOtraMoneda", FieldType::Decimal),
    ("MontoImpuestoSelectivoConsumoEspecificoOtraMoneda", FieldType::Decimal),
    ("MontoImpuestoSelectivoConsumoAdvaloremOtraMoneda", FieldType::Decimal),
    ("OtrosImpuestosAdicionalesOtraMoneda", FieldType::Decimal),
];

const DETAIL_FIELDS: &[(&str, FieldType)] = &[
    ("CantidadItem", FieldType::Decimal),
    ("CodEmpresa", FieldType::Integer),
    ("eNCF", FieldType::Text),
    ("IndicadorBienoServicio", FieldType::Integer),
    ("IndicadorFacturacion", FieldType::Integer),
    ("MontoItem", FieldType::Decimal),
    ("NombreItem", FieldType::Text),
    ("NumeroLinea", FieldType::Integer),
    ("PrecioUnitarioItem", FieldType::Decimal),
    ("CantidadReferencia", FieldType::Decimal),
    ("DescripcionItem", FieldType::Text),
    ("DescuentoMonto", FieldType::Decimal),
    ("DescuentoOtraMoneda", FieldType::Decimal),
    ("FechaElaboracion", FieldType::Date),
    ("FechaVencimientoItem", FieldType::Date),
    ("GradosAlcohol", FieldType::Decimal),
    ("IndicadorAgenteRetencionoPercepcion", FieldType::Integer),
    ("Liquidacion", FieldType::Integer),
    ("MontoISRRetenido", FieldType::Decimal),
    ("MontoITBISRetenido", FieldType::Decimal),
    ("MontoItemOtraMoneda", FieldType::Decimal),
    ("PesoNetoKilogramo", FieldType::Decimal),
    ("PesoNetoMineria", FieldType::Decimal),
    ("PrecioOtraMoneda", FieldType::Decimal),
    ("PrecioUnitarioReferencia", FieldType::Decimal),
    ("RecargoMonto", FieldType::Decimal),
    ("RecargoOtraMoneda", FieldType::Decimal),
    ("TipoAfiliacion", FieldType::Integer),
    ("UnidadMedida", FieldType::Integer),
    ("UnidadReferencia", FieldType::Integer),
];

const DETAIL_ITEM_CODE_FIELDS: &[(&str, FieldType)] = &[
    ("eNCF", FieldType::Text),
    ("CodEmpresa", FieldType::Integer),
    ("NumeroLinea_Detalle", FieldType::Integer),
    ("TipoCodigo", FieldType::Text),
    ("CodigoItem", FieldType::Text),
];

const DETAIL_SUBQUANTITY_FIELDS: &[(&str, FieldType)] = &[
    ("eNCF", FieldType::Text),
    ("CodEmpresa", FieldType::Integer),
    ("NumeroLinea_Detalle", FieldType::Integer),
    ("Subcantidad", FieldType::Decimal),
    ("CodigoSubcantidad", FieldType::Integer),
];

const DETAIL_SUBDISCOUNT_FIELDS: &[(&str, FieldType)] = &[
    ("eNCF", FieldType::Text),
    ("CodEmpresa", FieldType::Integer),
    ("NumeroLinea_Detalle", FieldType::Integer),
    ("TipoSubDescuento", FieldType::Text),
    ("SubDescuentoPorcentaje", FieldType::Decimal),
    ("MontoSubDescuento", FieldType::Decimal),
];

const DETAIL_SUBSURCHARGE_FIELDS: &[(&str, FieldType)] = &[
    ("eNCF", FieldType::Text),
    ("CodEmpresa", FieldType::Integer),
    ("NumeroLinea_Detalle", FieldType::Integer),
    ("TipoSubRecargo", FieldType::Text),
    ("SubRecargoPorcentaje", FieldType::Decimal),
    ("MontosubRecargo", FieldType::Decimal),
];

const DETAIL_ADDITIONAL_TAX_FIELDS: &[(&str, FieldType)] = &[
    ("eNCF", FieldType::Text),
    ("CodEmpresa", FieldType::Integer),
    ("NumeroLinea_Detalle", FieldType::Integer),
    ("TipoImpuesto", FieldType::Text),
];

const ADJUSTMENT_FIELDS: &[(&str, FieldType)] = &[
    ("eNCF", FieldType::Text),
    ("CodEmpresa", FieldType::Integer),
    ("NumeroLinea", FieldType::Text),
    ("TipoAjuste", FieldType::Text),
    ("IndicadorNorma1007", FieldType::Integer),
    ("DescripcionDescuentooRecargo", FieldType::Text),
    ("TipoValor", FieldType::Text),
    ("ValorDescuentooRecargo", FieldType::Decimal),
    ("MontoDescuentooRecargo", FieldType::Decimal),
    ("MontoDescuentooRecargoOtraMoneda", FieldType::Decimal),
    ("IndicadorFacturacionDescuentooRecargo", FieldType::Integer),
];

const PAGINATION_FIELDS: &[(&str, FieldType)] = &[
    ("eNCF", FieldType::Text),
    ("CodEmpresa", FieldType::Integer),
    ("PaginaNo", FieldType::Integer),
    ("NoLineaDesde", FieldType::Text),
    ("NoLineaHasta", FieldType::Text),
    ("SubtotalMontoGravadoPagina", FieldType::Decimal),
    ("SubtotalMontoGravado1Pagina", FieldType::Decimal),
    ("SubtotalMontoGravado2Pagina", FieldType::Decimal),
    ("SubtotalMontoGravado3Pagina", FieldType::Decimal),
    ("SubtotalExentoPagina", FieldType::Decimal),
    ("SubtotalItbisPagina", FieldType::Decimal),
    ("SubtotalItbis1Pagina", FieldType::Decimal),
    ("SubtotalItbis2Pagina", FieldType::Decimal),
    ("SubtotalItbis3Pagina", FieldType::Decimal),
    ("SubtotalImpuestoAdicionalPagina", FieldType::Decimal),
    ("SubtotalImpuestoAdicionalPaginaTabla", FieldType::Decimal),
    ("SubtotalImpuestoSelectivoConsumoEspecificoPagina", FieldType::Decimal),
    ("SubtotalOtrosImpuesto", FieldType::Decimal),
    ("MontoSubtotalPagina", FieldType::Decimal),
    ("SubtotalMontoNoFacturablePagina", FieldType::Decimal),
];
