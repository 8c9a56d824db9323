//! Filter algebra: construction, composition, negation, path normalization
//! and compaction of predicate trees over schema fields.

mod ast;
mod build;
mod fingerprint;
mod normalize;

#[cfg(test)]
pub(crate) mod tests;

pub use ast::{Clause, Comparison, Connective, Filter, Operand};
pub use fingerprint::FilterFingerprint;

use thiserror::Error as ThisError;

///
/// FilterError
///
/// Construction-time rejection of a comparison that does not fit its field.
/// Raised eagerly so that no ill-typed clause ever reaches the compiler.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum FilterError {
    #[error("comparison {comparison} is not valid for field {field} ({flavour})")]
    IncompatibleComparison {
        field: String,
        flavour: &'static str,
        comparison: Comparison,
    },

    #[error("comparison {comparison} on field {field} expects a {expected} operand, found {found}")]
    OperandMismatch {
        field: String,
        comparison: Comparison,
        expected: &'static str,
        found: &'static str,
    },

    #[error("field {field} ({flavour}) does not support {operation}")]
    UnsupportedOperation {
        field: String,
        flavour: &'static str,
        operation: &'static str,
    },
}
