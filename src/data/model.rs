use std::fmt;

// ---------------------------------------------------------------------------
// CellValue – a single cell of a parsed column
// ---------------------------------------------------------------------------

/// A dynamically-typed cell value. Every cell of a column carries the same
/// variant except `Missing`, which may appear in any column.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Integer(i64),
    Float(f64),
    Bool(bool),
    Text(String),
    Missing,
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Integer(i) => write!(f, "{i}"),
            // Debug keeps the trailing `.0` so float columns read as floats.
            CellValue::Float(v) => write!(f, "{v:?}"),
            CellValue::Bool(b) => write!(f, "{b}"),
            CellValue::Text(s) => write!(f, "{s}"),
            CellValue::Missing => write!(f, "NaN"),
        }
    }
}

impl CellValue {
    /// Interpret the value as an `f64`; `None` for non-numeric and missing cells.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Float(v) => Some(*v),
            CellValue::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// ColumnType – per-column inferred type
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    Integer,
    Float,
    Boolean,
    Text,
    /// No non-missing cells to infer from.
    Unknown,
}

impl ColumnType {
    pub fn is_numeric(self) -> bool {
        matches!(self, ColumnType::Integer | ColumnType::Float)
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ColumnType::Integer => "int64",
            ColumnType::Float => "float64",
            ColumnType::Boolean => "bool",
            ColumnType::Text => "text",
            ColumnType::Unknown => "unknown",
        };
        f.write_str(name)
    }
}

// ---------------------------------------------------------------------------
// Column / Table
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    pub dtype: ColumnType,
    pub cells: Vec<CellValue>,
}

impl Column {
    /// Per-row numeric values, or `None` if the column is not numeric.
    pub fn numeric_values(&self) -> Option<Vec<Option<f64>>> {
        if !self.dtype.is_numeric() {
            return None;
        }
        Some(self.cells.iter().map(CellValue::as_f64).collect())
    }
}

/// A parsed CSV file, stored column by column.
///
/// All columns have the same length; the parser is the only constructor and
/// the table is never mutated afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    columns: Vec<Column>,
    row_count: usize,
}

impl Table {
    pub(crate) fn new(columns: Vec<Column>, row_count: usize) -> Self {
        debug_assert!(columns.iter().all(|c| c.cells.len() == row_count));
        Table { columns, row_count }
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.row_count
    }

    pub fn is_empty(&self) -> bool {
        self.row_count == 0
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Names of numeric columns, left to right.
    pub fn numeric_column_names(&self) -> Vec<String> {
        self.columns
            .iter()
            .filter(|c| c.dtype.is_numeric())
            .map(|c| c.name.clone())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn column(name: &str, dtype: ColumnType, cells: Vec<CellValue>) -> Column {
        Column {
            name: name.into(),
            dtype,
            cells,
        }
    }

    #[test]
    fn numeric_names_keep_table_order() {
        let table = Table::new(
            vec![
                column("z", ColumnType::Float, vec![CellValue::Float(1.5)]),
                column("t", ColumnType::Text, vec![CellValue::Text("x".into())]),
                column("a", ColumnType::Integer, vec![CellValue::Integer(3)]),
            ],
            1,
        );
        assert_eq!(table.numeric_column_names(), vec!["z", "a"]);
        assert_eq!(table.column("t").map(|c| c.dtype), Some(ColumnType::Text));
        assert!(table.column("missing").is_none());
    }

    #[test]
    fn numeric_values_only_for_numeric_columns() {
        let ints = column(
            "a",
            ColumnType::Float,
            vec![CellValue::Float(2.0), CellValue::Missing],
        );
        assert_eq!(ints.numeric_values(), Some(vec![Some(2.0), None]));

        let text = column("b", ColumnType::Text, vec![CellValue::Text("2".into())]);
        assert_eq!(text.numeric_values(), None);
    }

    #[test]
    fn cells_display_like_a_dataframe() {
        assert_eq!(CellValue::Float(1.0).to_string(), "1.0");
        assert_eq!(CellValue::Integer(7).to_string(), "7");
        assert_eq!(CellValue::Missing.to_string(), "NaN");
    }
}
