use dgii_sql::{
    assemble::Record,
    data::Value,
    render::{reformat_date, render_insert, render_value},
};
use proptest::prelude::*;
use rust_decimal::Decimal;

/// Splits a rendered statement back into its table, columns and raw values.
fn parse_insert(sql: &str) -> (String, Vec<String>, Vec<String>) {
    let mut lines = sql.lines().filter(|line| !line.is_empty());
    let table = lines
        .next()
        .and_then(|line| line.strip_prefix("INSERT INTO "))
        .and_then(|line| line.strip_suffix('('))
        .expect("insert line")
        .to_string();
    let mut columns = Vec::new();
    for line in lines.by_ref() {
        if line == ")" {
            break;
        }
        columns.push(strip_item(line));
    }
    assert_eq!(lines.next(), Some("VALUES ("));
    let mut values = Vec::new();
    for line in lines.by_ref() {
        if line == ")" {
            break;
        }
        values.push(strip_item(line));
    }
    (table, columns, values)
}

fn strip_item(line: &str) -> String {
    let item = line.strip_prefix("    ").expect("indented item");
    item.strip_prefix(',').unwrap_or(item).to_string()
}

fn unquote(value: &str) -> String {
    value
        .strip_prefix('\'')
        .and_then(|inner| inner.strip_suffix('\''))
        .expect("quoted text")
        .replace("''", "'")
}

fn value_strategy() -> impl Strategy<Value = Value> {
    prop_oneof![
        any::<i64>().prop_map(Value::Integer),
        (any::<i64>(), 0u32..6).prop_map(|(mantissa, scale)| {
            Value::Decimal(Decimal::new(mantissa, scale))
        }),
        "[A-Za-z0-9 ',.-]{0,24}".prop_map(Value::Text),
        any::<bool>().prop_map(Value::Boolean),
    ]
}

fn record_strategy() -> impl Strategy<Value = Vec<(String, Value)>> {
    let name = "[A-Z][A-Za-z0-9_]{0,15}"
        .prop_filter("date fields rewrite their text", |name: &String| !name.contains("Fecha"));
    proptest::collection::btree_map(name, value_strategy(), 1..12)
        .prop_map(|fields| fields.into_iter().collect())
}

proptest! {
    #[test]
    fn rendered_statements_recover_their_values(fields in record_strategy()) {
        let record: Record = fields.iter().cloned().collect();
        let sql = render_insert(&record, "Comprobantes_Emitidos_Formas_Pago");
        let (table, columns, values) = parse_insert(&sql);

        prop_assert_eq!(table, "Comprobantes_Emitidos_Formas_Pago");
        prop_assert_eq!(columns.len(), fields.len());
        for ((name, value), (column, raw)) in fields.iter().zip(columns.iter().zip(&values)) {
            prop_assert_eq!(name, column);
            match value {
                Value::Integer(i) => prop_assert_eq!(raw.parse::<i64>().ok(), Some(*i)),
                Value::Decimal(d) => prop_assert_eq!(raw.parse::<Decimal>().ok(), Some(*d)),
                Value::Boolean(b) => prop_assert_eq!(raw.as_str(), if *b { "1" } else { "0" }),
                Value::Text(text) => prop_assert_eq!(&unquote(raw), text),
            }
        }
    }

    #[test]
    fn field_order_does_not_depend_on_insertion_order(
        shuffled in record_strategy().prop_flat_map(|fields| {
            (Just(fields.clone()), Just(fields).prop_shuffle())
        })
    ) {
        let (fields, reordered) = shuffled;
        let mut first = Record::new();
        for (name, value) in fields {
            first.insert(name, value);
        }
        let mut second = Record::new();
        for (name, value) in reordered {
            second.insert(name, value);
        }
        prop_assert_eq!(
            render_insert(&first, "Comprobantes_Emitidos"),
            render_insert(&second, "Comprobantes_Emitidos")
        );
    }

    #[test]
    fn date_rewrite_is_idempotent(day in 1u32..=28, month in 1u32..=12, year in 1990i32..=2100) {
        let raw = format!("{day:02}-{month:02}-{year}");
        let expected = format!("{year}-{month:02}-{day:02}");
        prop_assert_eq!(reformat_date(&raw), Some(expected.clone()));
        prop_assert_eq!(reformat_date(&expected), None);
        prop_assert_eq!(
            render_value("FechaEmision", &Value::text(expected.clone())),
            format!("'{expected}'")
        );
    }
}

#[test]
fn date_fields_render_iso_dates() {
    assert_eq!(
        render_value("FechaEmision", &Value::text("05-01-2024")),
        "'2024-01-05'"
    );
    assert_eq!(
        render_value("FechaLimitePago", &Value::text("Contado")),
        "'Contado'"
    );
    assert_eq!(
        render_value("UltimaFechaEnvioDgii", &Value::text("GETDATE()")),
        "GETDATE()"
    );
}

#[test]
fn statement_layout_matches_sql_server_script() {
    let mut record = Record::new();
    record.insert("TelefonoEmisor", Value::text("809-555-0101"));
    record.insert("eNCF", Value::text("E310000000001"));
    record.insert("CodEmpresa", Value::Integer(1));
    let sql = render_insert(&record, "Comprobantes_Emitidos_Telefonos_Emisor");
    let expected = "
INSERT INTO Comprobantes_Emitidos_Telefonos_Emisor(
    CodEmpresa
    ,TelefonoEmisor
    ,eNCF
)
VALUES (
    1
    ,'809-555-0101'
    ,'E310000000001'
)

";
    assert_eq!(sql, expected);
}
