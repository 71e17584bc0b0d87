use crate::chart::ChartKind;
use crate::data::validate::NumericColumns;

/// The user's chart choice: which numeric column, drawn how.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub column: String,
    pub kind: ChartKind,
}

impl Selection {
    /// First numeric column as a line chart.
    pub fn default_for(numeric: &NumericColumns) -> Self {
        Selection {
            column: numeric.first().to_string(),
            kind: ChartKind::default(),
        }
    }

    /// Carry a previous choice over to the current table.
    ///
    /// The column is kept only if it is still numeric; the kind is always kept.
    pub fn reconcile(previous: Option<&Selection>, numeric: &NumericColumns) -> Self {
        let Some(prev) = previous else {
            return Selection::default_for(numeric);
        };
        let column = if numeric.contains(&prev.column) {
            prev.column.clone()
        } else {
            numeric.first().to_string()
        };
        Selection {
            column,
            kind: prev.kind,
        }
    }
}
