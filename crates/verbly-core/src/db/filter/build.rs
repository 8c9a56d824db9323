use crate::{
    db::filter::{Comparison, Filter, FilterError, Operand},
    model::{Field, FieldKind},
};

///
/// Field comparison builders
///
/// Each builder picks the comparison variant from the field's flavour, then
/// defers to [`Filter::new`] for the operand and nullability checks.
///

#[allow(clippy::should_implement_trait)]
impl Field {
    pub fn eq(&self, value: impl Into<Operand>) -> Result<Filter, FilterError> {
        let comparison = match self.kind() {
            FieldKind::String { .. } => Comparison::StringEquals,
            FieldKind::Integer { .. } => Comparison::IntEquals,
            FieldKind::Boolean => Comparison::BooleanEquals,
            _ => return Err(self.unsupported_operation("eq")),
        };

        Filter::new(*self, comparison, value)
    }

    pub fn ne(&self, value: impl Into<Operand>) -> Result<Filter, FilterError> {
        match self.kind() {
            FieldKind::String { .. } => Filter::new(*self, Comparison::StringDoesNotEqual, value),
            FieldKind::Integer { .. } => Filter::new(*self, Comparison::IntDoesNotEqual, value),
            FieldKind::Boolean => match value.into() {
                Operand::Boolean(value) => {
                    Filter::new(*self, Comparison::BooleanEquals, Operand::Boolean(!value))
                }
                other => Filter::new(*self, Comparison::BooleanEquals, other),
            },
            _ => Err(self.unsupported_operation("ne")),
        }
    }

    pub fn lt(&self, value: impl Into<Operand>) -> Result<Filter, FilterError> {
        self.ordering(Comparison::IntIsLessThan, value, "lt")
    }

    pub fn le(&self, value: impl Into<Operand>) -> Result<Filter, FilterError> {
        self.ordering(Comparison::IntIsAtMost, value, "le")
    }

    pub fn gt(&self, value: impl Into<Operand>) -> Result<Filter, FilterError> {
        self.ordering(Comparison::IntIsGreaterThan, value, "gt")
    }

    pub fn ge(&self, value: impl Into<Operand>) -> Result<Filter, FilterError> {
        self.ordering(Comparison::IntIsAtLeast, value, "ge")
    }

    /// SQL `LIKE` pattern match on a string column.
    pub fn like(&self, pattern: impl Into<String>) -> Result<Filter, FilterError> {
        Filter::new(*self, Comparison::StringIsLike, Operand::String(pattern.into()))
    }

    pub fn not_like(&self, pattern: impl Into<String>) -> Result<Filter, FilterError> {
        Filter::new(*self, Comparison::StringIsNotLike, Operand::String(pattern.into()))
    }

    pub fn is_null(&self) -> Result<Filter, FilterError> {
        Filter::new(*self, Comparison::IsNull, Operand::None)
    }

    pub fn is_not_null(&self) -> Result<Filter, FilterError> {
        Filter::new(*self, Comparison::IsNotNull, Operand::None)
    }

    /// Rows related through this field to at least one row satisfying
    /// `condition`. On a hierarchical field this is a single hop.
    pub fn matches(&self, condition: Filter) -> Result<Filter, FilterError> {
        Filter::new(*self, Comparison::Matches, condition)
    }

    /// Rows with no related row satisfying `condition`, including rows with
    /// no related row at all.
    pub fn does_not_match(&self, condition: Filter) -> Result<Filter, FilterError> {
        Filter::new(*self, Comparison::DoesNotMatch, condition)
    }

    /// Rows reachable through the transitive closure of this relationship
    /// from a row satisfying `condition`, including those rows themselves.
    pub fn hierarchically_matches(&self, condition: Filter) -> Result<Filter, FilterError> {
        Filter::new(*self, Comparison::HierarchicallyMatches, condition)
    }

    pub fn does_not_hierarchically_match(&self, condition: Filter) -> Result<Filter, FilterError> {
        Filter::new(*self, Comparison::DoesNotHierarchicallyMatch, condition)
    }

    fn ordering(
        &self,
        comparison: Comparison,
        value: impl Into<Operand>,
        operation: &'static str,
    ) -> Result<Filter, FilterError> {
        match self.kind() {
            FieldKind::Integer { .. } => Filter::new(*self, comparison, value),
            _ => Err(self.unsupported_operation(operation)),
        }
    }

    fn unsupported_operation(&self, operation: &'static str) -> FilterError {
        FilterError::UnsupportedOperation {
            field: self.to_string(),
            flavour: self.kind().flavour(),
            operation,
        }
    }
}
