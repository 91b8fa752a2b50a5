use thiserror::Error;

// ---------------------------------------------------------------------------
// Data-layer errors
// ---------------------------------------------------------------------------

/// Failures raised while validating or querying tables.
///
/// A zero medal total is deliberately *not* represented here: percentage
/// columns carry the non-finite float instead. Likewise a selection that is
/// absent from a table is not an error, it filters down to zero rows.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DataError {
    /// A required column is absent from a loaded table.
    #[error("{table}: missing required column '{column}'")]
    MissingColumn { table: String, column: String },

    /// An aggregate was asked for over zero (numeric) rows.
    #[error("no data available for '{column}'")]
    EmptyTable { column: String },

    /// A query named a column the table does not have.
    #[error("unknown column '{0}'")]
    UnknownColumn(String),
}
