//! Error types for the calculator.

/// Errors surfaced by the calculator and its input boundary.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CalcError {
    /// The date required by the active input mode was not supplied.
    #[error("missing required input: {field}")]
    MissingInput { field: &'static str },

    /// A parameter falls outside its clinically sane range.
    ///
    /// Only the boundary validator produces this; the engine trusts its inputs.
    #[error("{field} out of range: {value} (expected {expected})")]
    InvalidRange {
        field: &'static str,
        value: i64,
        expected: &'static str,
    },
}
