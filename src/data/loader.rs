use std::collections::{HashMap, HashSet};

use csv::StringRecord;

use super::error::ExplorerError;
use super::intake::UploadedFile;
use super::model::{CellValue, Column, ColumnType, Table};

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Cell contents treated as missing values (the usual dataframe NA markers).
const NA_VALUES: &[&str] = &[
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN", "<NA>",
    "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Parse an uploaded CSV file into a [`Table`].
///
/// * The bytes must be UTF-8 (a leading BOM is ignored).
/// * The first record is the header; blank lines are skipped.
/// * Short rows are padded with missing cells, long rows are rejected.
/// * Column types are inferred once all rows are read.
pub fn parse(file: &UploadedFile) -> Result<Table, ExplorerError> {
    let bytes = file.bytes.strip_prefix(UTF8_BOM).unwrap_or(file.bytes.as_slice());
    let skipped = file.bytes.len() - bytes.len();
    let text = std::str::from_utf8(bytes).map_err(|e| ExplorerError::Encoding {
        offset: skipped + e.valid_up_to(),
    })?;

    if text.trim().is_empty() {
        return Err(ExplorerError::EmptyInput);
    }
    // The csv reader runs an open quote to end of input without complaint.
    if let Some(line) = unterminated_quote_line(text) {
        return Err(ExplorerError::Malformed {
            line,
            message: "quoted field is never closed".to_string(),
        });
    }

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(text.as_bytes());

    let header_record = reader.headers().map_err(malformed)?.clone();
    if header_record.is_empty() {
        return Err(ExplorerError::EmptyInput);
    }
    let headers = normalize_headers(&header_record);
    let width = headers.len();

    let mut raw_columns: Vec<Vec<String>> = vec![Vec::new(); width];
    let mut row_count = 0;

    for result in reader.records() {
        let record = result.map_err(malformed)?;
        if is_blank(&record) {
            continue;
        }
        if record.len() > width {
            return Err(ExplorerError::Malformed {
                line: record.position().map_or(0, |p| p.line()),
                message: format!("expected {width} fields, saw {}", record.len()),
            });
        }
        for (col_idx, column) in raw_columns.iter_mut().enumerate() {
            column.push(record.get(col_idx).unwrap_or("").to_string());
        }
        row_count += 1;
    }

    let columns = headers
        .into_iter()
        .zip(raw_columns)
        .map(|(name, raw)| infer_column(name, raw))
        .collect();

    Ok(Table::new(columns, row_count))
}

fn malformed(err: csv::Error) -> ExplorerError {
    ExplorerError::Malformed {
        line: err.position().map_or(0, |p| p.line()),
        message: err.to_string(),
    }
}

fn is_blank(record: &StringRecord) -> bool {
    record.len() <= 1 && record.iter().all(|f| f.trim().is_empty())
}

/// Line on which a quoted field opens without a closing quote, if any.
///
/// A quote only opens a field at its start; `""` inside a quoted field is an
/// escaped quote. Elsewhere a quote is literal text.
fn unterminated_quote_line(text: &str) -> Option<u64> {
    let mut line = 1;
    let mut open_at = None;
    let mut field_start = true;
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '\n' {
            line += 1;
        }
        if open_at.is_some() {
            if c == '"' {
                if chars.peek() == Some(&'"') {
                    chars.next();
                } else {
                    open_at = None;
                    field_start = false;
                }
            }
            continue;
        }
        match c {
            '"' if field_start => open_at = Some(line),
            ',' | '\n' | '\r' => field_start = true,
            _ => field_start = false,
        }
    }
    open_at
}

/// Empty names become `Unnamed: {i}`, repeated names get the first free
/// `.n` suffix so every column name stays unique.
fn normalize_headers(record: &StringRecord) -> Vec<String> {
    let mut taken: HashSet<String> = HashSet::new();
    let mut suffixes: HashMap<String, usize> = HashMap::new();
    record
        .iter()
        .enumerate()
        .map(|(i, h)| {
            let base = if h.trim().is_empty() {
                format!("Unnamed: {i}")
            } else {
                h.to_string()
            };
            let mut name = base.clone();
            if taken.contains(&name) {
                let suffix = suffixes.entry(base.clone()).or_insert(0);
                while taken.contains(&name) {
                    *suffix += 1;
                    name = format!("{base}.{suffix}");
                }
            }
            taken.insert(name.clone());
            name
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Type inference
// ---------------------------------------------------------------------------

fn is_missing(cell: &str) -> bool {
    let cell = cell.trim();
    cell.is_empty() || NA_VALUES.contains(&cell)
}

fn parse_bool(s: &str) -> Option<bool> {
    match s {
        "true" | "True" | "TRUE" => Some(true),
        "false" | "False" | "FALSE" => Some(false),
        _ => None,
    }
}

fn infer_type(raw: &[String]) -> ColumnType {
    let present: Vec<&str> = raw
        .iter()
        .filter(|c| !is_missing(c))
        .map(|c| c.trim())
        .collect();

    if present.is_empty() {
        return ColumnType::Unknown;
    }
    // Integers with gaps are widened to floats.
    let has_missing = present.len() < raw.len();
    if !has_missing && present.iter().all(|c| c.parse::<i64>().is_ok()) {
        return ColumnType::Integer;
    }
    if present.iter().all(|c| c.parse::<f64>().is_ok()) {
        return ColumnType::Float;
    }
    if present.iter().all(|c| parse_bool(c).is_some()) {
        return ColumnType::Boolean;
    }
    ColumnType::Text
}

fn to_cell(raw: String, dtype: ColumnType) -> CellValue {
    if is_missing(&raw) {
        return CellValue::Missing;
    }
    let trimmed = raw.trim();
    match dtype {
        ColumnType::Integer => trimmed.parse().map_or(CellValue::Missing, CellValue::Integer),
        ColumnType::Float => trimmed.parse().map_or(CellValue::Missing, CellValue::Float),
        ColumnType::Boolean => parse_bool(trimmed).map_or(CellValue::Missing, CellValue::Bool),
        ColumnType::Text => CellValue::Text(raw),
        ColumnType::Unknown => CellValue::Missing,
    }
}

fn infer_column(name: String, raw: Vec<String>) -> Column {
    let dtype = infer_type(&raw);
    let cells = raw.into_iter().map(|c| to_cell(c, dtype)).collect();
    Column { name, dtype, cells }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn parse_str(text: &str) -> Result<Table, ExplorerError> {
        parse(&UploadedFile::new("test.csv", text))
    }

    fn dtypes(table: &Table) -> Vec<ColumnType> {
        table.columns().iter().map(|c| c.dtype).collect()
    }

    #[test]
    fn infers_integer_and_text_columns() {
        let table = parse_str("a,b\n1,x\n2,y\n3,z\n").unwrap();
        assert_eq!(table.len(), 3);
        assert_eq!(dtypes(&table), vec![ColumnType::Integer, ColumnType::Text]);
        assert_eq!(
            table.columns()[0].cells,
            vec![CellValue::Integer(1), CellValue::Integer(2), CellValue::Integer(3)]
        );
        assert_eq!(table.columns()[1].cells[2], CellValue::Text("z".into()));
    }

    #[test]
    fn integers_with_gaps_become_floats() {
        let table = parse_str("x,y\n1,a\nNA,b\n3,c\n").unwrap();
        let x = &table.columns()[0];
        assert_eq!(x.dtype, ColumnType::Float);
        assert_eq!(
            x.cells,
            vec![CellValue::Float(1.0), CellValue::Missing, CellValue::Float(3.0)]
        );
    }

    #[test]
    fn mixed_numbers_and_words_are_text() {
        let table = parse_str("v\n1.5\nabc\n").unwrap();
        assert_eq!(dtypes(&table), vec![ColumnType::Text]);
    }

    #[test]
    fn booleans_and_all_missing_columns() {
        let table = parse_str("flag,empty\nTrue,\nfalse,NaN\n").unwrap();
        assert_eq!(dtypes(&table), vec![ColumnType::Boolean, ColumnType::Unknown]);
        assert!(table.numeric_column_names().is_empty());
    }

    #[test]
    fn header_only_gives_zero_rows() {
        let table = parse_str("a,b\n").unwrap();
        assert!(table.is_empty());
        assert_eq!(table.column_count(), 2);
    }

    #[test]
    fn blank_input_is_empty_input() {
        assert!(matches!(parse_str(""), Err(ExplorerError::EmptyInput)));
        assert!(matches!(parse_str("  \n\n"), Err(ExplorerError::EmptyInput)));
    }

    #[test]
    fn invalid_utf8_reports_offset() {
        let file = UploadedFile::new("bad.csv", b"a,b\n1,\xff\n".to_vec());
        match parse(&file) {
            Err(ExplorerError::Encoding { offset }) => assert_eq!(offset, 6),
            other => panic!("expected encoding error, got {other:?}"),
        }
    }

    #[test]
    fn bom_is_ignored() {
        let mut bytes = UTF8_BOM.to_vec();
        bytes.extend_from_slice(b"a\n1\n");
        let table = parse(&UploadedFile::new("bom.csv", bytes)).unwrap();
        assert_eq!(table.columns()[0].name, "a");
    }

    #[test]
    fn long_row_is_malformed() {
        match parse_str("a,b\n1,2\n3,4,5\n") {
            Err(ExplorerError::Malformed { line, message }) => {
                assert_eq!(line, 3);
                assert!(message.contains("saw 3"));
            }
            other => panic!("expected malformed error, got {other:?}"),
        }
    }

    #[test]
    fn short_row_is_padded_with_missing() {
        let table = parse_str("a,b\n1,2\n3\n").unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.columns()[1].cells[1], CellValue::Missing);
        assert_eq!(table.columns()[1].dtype, ColumnType::Float);
    }

    #[test]
    fn headers_are_deduplicated_and_named() {
        let table = parse_str("a,a,,a\n1,2,3,4\n").unwrap();
        let names: Vec<&str> = table.columns().iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["a", "a.1", "Unnamed: 2", "a.2"]);
    }

    #[test]
    fn renamed_duplicates_never_collide() {
        let table = parse_str("a,a.1,a\n1,2,3\n").unwrap();
        let names: Vec<&str> = table.columns().iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["a", "a.1", "a.2"]);
        assert_eq!(table.column("a.2").unwrap().cells, vec![CellValue::Integer(3)]);
    }

    #[test]
    fn unterminated_quote_is_malformed() {
        match parse_str("a,b\n\"1,2\n3,4\n") {
            Err(ExplorerError::Malformed { line, .. }) => assert_eq!(line, 2),
            other => panic!("expected malformed error, got {other:?}"),
        }
    }

    #[test]
    fn escaped_and_mid_field_quotes_are_fine() {
        let table = parse_str("size,note\n12\" pipe,\"say \"\"hi\"\"\"\n").unwrap();
        assert_eq!(table.columns()[0].cells[0], CellValue::Text("12\" pipe".into()));
        assert_eq!(table.columns()[1].cells[0], CellValue::Text("say \"hi\"".into()));
    }

    #[test]
    fn quoted_fields_keep_commas() {
        let table = parse_str("name,score\n\"Doe, Jane\",4.5\n").unwrap();
        assert_eq!(table.columns()[0].cells[0], CellValue::Text("Doe, Jane".into()));
        assert_eq!(table.columns()[1].cells[0], CellValue::Float(4.5));
    }

    #[derive(Debug, Clone)]
    enum GenColumn {
        Ints(Vec<i32>),
        Words(Vec<String>),
    }

    fn gen_table() -> impl Strategy<Value = Vec<GenColumn>> {
        (1usize..12).prop_flat_map(|rows| {
            prop::collection::vec(
                prop_oneof![
                    prop::collection::vec(any::<i32>(), rows).prop_map(GenColumn::Ints),
                    prop::collection::vec("w[a-z]{0,5}", rows).prop_map(GenColumn::Words),
                ],
                1..6,
            )
        })
    }

    proptest! {
        #[test]
        fn numeric_set_matches_columns_of_numbers(columns in gen_table()) {
            let rows = match &columns[0] {
                GenColumn::Ints(v) => v.len(),
                GenColumn::Words(v) => v.len(),
            };
            let header: Vec<String> = (0..columns.len()).map(|i| format!("c{i}")).collect();
            let mut text = header.join(",");
            text.push('\n');
            for r in 0..rows {
                let cells: Vec<String> = columns
                    .iter()
                    .map(|c| match c {
                        GenColumn::Ints(v) => v[r].to_string(),
                        GenColumn::Words(v) => v[r].clone(),
                    })
                    .collect();
                text.push_str(&cells.join(","));
                text.push('\n');
            }

            let table = parse_str(&text).unwrap();
            let expected: Vec<String> = columns
                .iter()
                .enumerate()
                .filter(|(_, c)| matches!(c, GenColumn::Ints(_)))
                .map(|(i, _)| format!("c{i}"))
                .collect();
            prop_assert_eq!(table.len(), rows);
            prop_assert_eq!(table.numeric_column_names(), expected);
        }
    }
}
