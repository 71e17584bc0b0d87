use super::error::ExplorerError;
use super::model::Table;

/// Names of the table's numeric columns in left-to-right order.
///
/// Only [`validate`] builds this, so it is never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumericColumns(Vec<String>);

impl NumericColumns {
    pub fn names(&self) -> &[String] {
        &self.0
    }

    /// The leftmost numeric column.
    pub fn first(&self) -> &str {
        &self.0[0]
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.iter().any(|n| n == name)
    }
}

/// Check the parsed table can be charted.
///
/// Emptiness is checked before numeric columns: a header-only file always
/// reports [`ExplorerError::EmptyTable`].
pub fn validate(table: &Table) -> Result<NumericColumns, ExplorerError> {
    if table.is_empty() {
        return Err(ExplorerError::EmptyTable);
    }
    let names = table.numeric_column_names();
    if names.is_empty() {
        return Err(ExplorerError::NoNumericColumns);
    }
    Ok(NumericColumns(names))
}
