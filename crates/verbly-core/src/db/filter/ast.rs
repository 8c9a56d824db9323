use crate::{
    db::filter::FilterError,
    model::{Field, FieldKind},
    schema::{Inflection, PartOfSpeech, PartType},
};
use std::{
    fmt,
    ops::{BitAnd, BitOr, Not},
};

///
/// Filter AST
///
/// Declarative predicate tree over schema fields. A filter is built by the
/// caller, then normalized against the queried kind, compacted, and finally
/// lowered by the statement compiler. Construction is checked: a comparison
/// that does not fit its field never makes it into a tree.
///

///
/// Comparison
///

#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[repr(u8)]
pub enum Comparison {
    IntEquals = 0x01,
    IntDoesNotEqual = 0x02,
    IntIsAtLeast = 0x03,
    IntIsGreaterThan = 0x04,
    IntIsAtMost = 0x05,
    IntIsLessThan = 0x06,
    BooleanEquals = 0x07,
    StringEquals = 0x08,
    StringDoesNotEqual = 0x09,
    StringIsLike = 0x0a,
    StringIsNotLike = 0x0b,
    IsNull = 0x0c,
    IsNotNull = 0x0d,
    Matches = 0x0e,
    DoesNotMatch = 0x0f,
    HierarchicallyMatches = 0x10,
    DoesNotHierarchicallyMatch = 0x11,
}

impl Comparison {
    #[must_use]
    pub const fn tag(self) -> u8 {
        self as u8
    }

    /// Logical opposite. `BooleanEquals` is its own opposite; the operand
    /// flips instead.
    #[must_use]
    pub const fn negate(self) -> Self {
        match self {
            Self::IntEquals => Self::IntDoesNotEqual,
            Self::IntDoesNotEqual => Self::IntEquals,
            Self::IntIsAtLeast => Self::IntIsLessThan,
            Self::IntIsLessThan => Self::IntIsAtLeast,
            Self::IntIsGreaterThan => Self::IntIsAtMost,
            Self::IntIsAtMost => Self::IntIsGreaterThan,
            Self::BooleanEquals => Self::BooleanEquals,
            Self::StringEquals => Self::StringDoesNotEqual,
            Self::StringDoesNotEqual => Self::StringEquals,
            Self::StringIsLike => Self::StringIsNotLike,
            Self::StringIsNotLike => Self::StringIsLike,
            Self::IsNull => Self::IsNotNull,
            Self::IsNotNull => Self::IsNull,
            Self::Matches => Self::DoesNotMatch,
            Self::DoesNotMatch => Self::Matches,
            Self::HierarchicallyMatches => Self::DoesNotHierarchicallyMatch,
            Self::DoesNotHierarchicallyMatch => Self::HierarchicallyMatches,
        }
    }

    #[must_use]
    pub const fn is_join(self) -> bool {
        matches!(
            self,
            Self::Matches
                | Self::DoesNotMatch
                | Self::HierarchicallyMatches
                | Self::DoesNotHierarchicallyMatch
        )
    }

    /// Positive join comparisons require a related row to exist.
    #[must_use]
    pub const fn is_positive_join(self) -> bool {
        matches!(self, Self::Matches | Self::HierarchicallyMatches)
    }

    /// Whether this comparison may be applied to `field`.
    #[must_use]
    pub const fn accepts(self, field: &Field) -> bool {
        match self {
            Self::IntEquals
            | Self::IntDoesNotEqual
            | Self::IntIsAtLeast
            | Self::IntIsGreaterThan
            | Self::IntIsAtMost
            | Self::IntIsLessThan => matches!(field.kind(), FieldKind::Integer { .. }),
            Self::BooleanEquals => matches!(field.kind(), FieldKind::Boolean),
            Self::StringEquals
            | Self::StringDoesNotEqual
            | Self::StringIsLike
            | Self::StringIsNotLike => matches!(field.kind(), FieldKind::String { .. }),
            Self::IsNull | Self::IsNotNull => field.is_nullable(),
            Self::Matches | Self::DoesNotMatch => field.is_join(),
            Self::HierarchicallyMatches | Self::DoesNotHierarchicallyMatch => {
                field.is_hierarchical()
            }
        }
    }

    /// Operand shape this comparison requires.
    #[must_use]
    pub const fn operand_shape(self) -> &'static str {
        match self {
            Self::IntEquals
            | Self::IntDoesNotEqual
            | Self::IntIsAtLeast
            | Self::IntIsGreaterThan
            | Self::IntIsAtMost
            | Self::IntIsLessThan => "integer",
            Self::BooleanEquals => "boolean",
            Self::StringEquals
            | Self::StringDoesNotEqual
            | Self::StringIsLike
            | Self::StringIsNotLike => "string",
            Self::IsNull | Self::IsNotNull => "none",
            Self::Matches
            | Self::DoesNotMatch
            | Self::HierarchicallyMatches
            | Self::DoesNotHierarchicallyMatch => "filter",
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::IntEquals => "int_equals",
            Self::IntDoesNotEqual => "int_does_not_equal",
            Self::IntIsAtLeast => "int_is_at_least",
            Self::IntIsGreaterThan => "int_is_greater_than",
            Self::IntIsAtMost => "int_is_at_most",
            Self::IntIsLessThan => "int_is_less_than",
            Self::BooleanEquals => "boolean_equals",
            Self::StringEquals => "string_equals",
            Self::StringDoesNotEqual => "string_does_not_equal",
            Self::StringIsLike => "string_is_like",
            Self::StringIsNotLike => "string_is_not_like",
            Self::IsNull => "is_null",
            Self::IsNotNull => "is_not_null",
            Self::Matches => "matches",
            Self::DoesNotMatch => "does_not_match",
            Self::HierarchicallyMatches => "hierarchically_matches",
            Self::DoesNotHierarchicallyMatch => "does_not_hierarchically_match",
        }
    }
}

impl fmt::Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

///
/// Operand
/// Right-hand side of a comparison; a nested filter for join comparisons.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Operand {
    None,
    Integer(i64),
    Boolean(bool),
    String(String),
    Filter(Box<Filter>),
}

impl Operand {
    #[must_use]
    pub const fn shape(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Integer(_) => "integer",
            Self::Boolean(_) => "boolean",
            Self::String(_) => "string",
            Self::Filter(_) => "filter",
        }
    }
}

impl From<i64> for Operand {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<i32> for Operand {
    fn from(value: i32) -> Self {
        Self::Integer(i64::from(value))
    }
}

impl From<u32> for Operand {
    fn from(value: u32) -> Self {
        Self::Integer(i64::from(value))
    }
}

impl From<bool> for Operand {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

impl From<&str> for Operand {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for Operand {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<Filter> for Operand {
    fn from(value: Filter) -> Self {
        Self::Filter(Box::new(value))
    }
}

impl From<PartOfSpeech> for Operand {
    fn from(value: PartOfSpeech) -> Self {
        Self::Integer(value.as_i64())
    }
}

impl From<Inflection> for Operand {
    fn from(value: Inflection) -> Self {
        Self::Integer(value.as_i64())
    }
}

impl From<PartType> for Operand {
    fn from(value: PartType) -> Self {
        Self::Integer(value.as_i64())
    }
}

///
/// Clause
/// One `(field, comparison, operand)` triple.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Clause {
    pub(crate) field: Field,
    pub(crate) comparison: Comparison,
    pub(crate) operand: Operand,
}

impl Clause {
    #[must_use]
    pub const fn field(&self) -> &Field {
        &self.field
    }

    #[must_use]
    pub const fn comparison(&self) -> Comparison {
        self.comparison
    }

    #[must_use]
    pub const fn operand(&self) -> &Operand {
        &self.operand
    }

    /// Inner condition of a join comparison.
    #[must_use]
    pub fn join_condition(&self) -> Option<&Filter> {
        match &self.operand {
            Operand::Filter(inner) => Some(inner),
            _ => None,
        }
    }

    fn negated(&self) -> Self {
        match (self.comparison, &self.operand) {
            (Comparison::BooleanEquals, Operand::Boolean(value)) => Self {
                field: self.field,
                comparison: Comparison::BooleanEquals,
                operand: Operand::Boolean(!value),
            },
            // join comparisons flip only the outer test; the inner
            // condition keeps its meaning
            (comparison, operand) => Self {
                field: self.field,
                comparison: comparison.negate(),
                operand: operand.clone(),
            },
        }
    }
}

///
/// Connective
///

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Connective {
    And,
    Or,
}

impl Connective {
    #[must_use]
    pub const fn flip(self) -> Self {
        match self {
            Self::And => Self::Or,
            Self::Or => Self::And,
        }
    }

    #[must_use]
    pub const fn keyword(self) -> &'static str {
        match self {
            Self::And => "AND",
            Self::Or => "OR",
        }
    }
}

///
/// Filter
///

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub enum Filter {
    /// No constraint.
    #[default]
    Empty,
    Clause(Clause),
    Group {
        connective: Connective,
        children: Vec<Self>,
    },
}

impl Filter {
    /// Checked constructor: the comparison must fit the field's flavour and
    /// nullability, and the operand must have the shape the comparison needs.
    pub fn new(
        field: Field,
        comparison: Comparison,
        operand: impl Into<Operand>,
    ) -> Result<Self, FilterError> {
        let operand = operand.into();

        if !comparison.accepts(&field) {
            return Err(FilterError::IncompatibleComparison {
                field: field.to_string(),
                flavour: field.kind().flavour(),
                comparison,
            });
        }

        if comparison.operand_shape() != operand.shape() {
            return Err(FilterError::OperandMismatch {
                field: field.to_string(),
                comparison,
                expected: comparison.operand_shape(),
                found: operand.shape(),
            });
        }

        Ok(Self::Clause(Clause {
            field,
            comparison,
            operand,
        }))
    }

    #[must_use]
    pub const fn empty() -> Self {
        Self::Empty
    }

    #[must_use]
    pub const fn and(children: Vec<Self>) -> Self {
        Self::Group {
            connective: Connective::And,
            children,
        }
    }

    #[must_use]
    pub const fn or(children: Vec<Self>) -> Self {
        Self::Group {
            connective: Connective::Or,
            children,
        }
    }

    /// Childless group; fill it with [`Filter::push`].
    #[must_use]
    pub const fn group(connective: Connective) -> Self {
        Self::Group {
            connective,
            children: Vec::new(),
        }
    }

    /// Append `child` to this group. A non-group filter is first combined
    /// with `child` under `AND`.
    pub fn push(&mut self, child: Self) {
        match self {
            Self::Group { children, .. } => children.push(child),
            other => {
                let lhs = std::mem::take(other);
                *other = lhs.combine(Connective::And, child);
            }
        }
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    #[must_use]
    pub const fn as_clause(&self) -> Option<&Clause> {
        match self {
            Self::Clause(clause) => Some(clause),
            _ => None,
        }
    }

    /// Total number of nodes, including nested join conditions.
    #[must_use]
    pub fn node_count(&self) -> usize {
        match self {
            Self::Empty => 1,
            Self::Clause(clause) => 1 + clause.join_condition().map_or(0, Self::node_count),
            Self::Group { children, .. } => 1 + children.iter().map(Self::node_count).sum::<usize>(),
        }
    }

    /// Logical negation pushed down to the leaves (De Morgan).
    #[must_use]
    pub fn negated(&self) -> Self {
        match self {
            Self::Empty => Self::Empty,
            Self::Clause(clause) => Self::Clause(clause.negated()),
            Self::Group {
                connective,
                children,
            } => Self::Group {
                connective: connective.flip(),
                children: children.iter().map(Self::negated).collect(),
            },
        }
    }

    // Extend a group of the same polarity, otherwise wrap both sides in a
    // new group. Precedence lives in the tree shape alone.
    fn combine(self, connective: Connective, rhs: Self) -> Self {
        match self {
            Self::Empty => rhs,
            Self::Group {
                connective: existing,
                mut children,
            } if existing == connective => {
                children.push(rhs);
                Self::Group {
                    connective,
                    children,
                }
            }
            lhs => Self::Group {
                connective,
                children: vec![lhs, rhs],
            },
        }
    }
}

impl BitAnd for Filter {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self::Output {
        self.combine(Connective::And, rhs)
    }
}

impl BitAnd for &Filter {
    type Output = Filter;

    fn bitand(self, rhs: Self) -> Self::Output {
        self.clone().combine(Connective::And, rhs.clone())
    }
}

impl BitOr for Filter {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        self.combine(Connective::Or, rhs)
    }
}

impl BitOr for &Filter {
    type Output = Filter;

    fn bitor(self, rhs: Self) -> Self::Output {
        self.clone().combine(Connective::Or, rhs.clone())
    }
}

impl Not for Filter {
    type Output = Self;

    fn not(self) -> Self::Output {
        self.negated()
    }
}

impl Not for &Filter {
    type Output = Filter;

    fn not(self) -> Self::Output {
        self.negated()
    }
}
