use crate::model::ObjectKind;
use std::{
    cmp::Ordering,
    fmt,
    hash::{Hash, Hasher},
};
use thiserror::Error as ThisError;

///
/// FieldError
///
/// A kind-specific accessor was invoked on a field of another flavour.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq, ThisError)]
#[error("field {object}.{column} ({flavour}) has no {accessor}")]
pub struct FieldError {
    pub object: ObjectKind,
    pub column: &'static str,
    pub flavour: &'static str,
    pub accessor: &'static str,
}

///
/// JoinCondition
/// Fixed equality baked into a conditioned relationship.
///

#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct JoinCondition {
    pub column: &'static str,
    pub value: i64,
}

///
/// FieldKind
///
/// Column or relationship flavour of a [`Field`], with the metadata the
/// statement compiler needs to lower it without per-relationship cases.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum FieldKind {
    String {
        nullable: bool,
    },
    Integer {
        nullable: bool,
    },
    Boolean,

    /// Belongs-to: `near.column = far.column`.
    Join {
        join_object: ObjectKind,
        nullable: bool,
    },

    /// Belongs-to with a fixed equality on the far table.
    JoinWhere {
        join_object: ObjectKind,
        condition: JoinCondition,
    },

    /// Has-many through an association table:
    /// `near.column = through.column`, `through.foreign_column = far.foreign_column`.
    JoinThrough {
        join_object: ObjectKind,
        table: &'static str,
        foreign_column: &'static str,
    },

    /// Has-many through an association table with a fixed equality on the
    /// association row.
    JoinThroughWhere {
        join_object: ObjectKind,
        table: &'static str,
        foreign_column: &'static str,
        condition: JoinCondition,
    },

    /// `near.column = rel.join_column`, `rel.foreign_join_column = far.column`.
    SelfJoin {
        table: &'static str,
        join_column: &'static str,
        foreign_join_column: &'static str,
    },

    /// Transitive closure over a self-relation table.
    HierarchicalSelfJoin {
        table: &'static str,
        join_column: &'static str,
        foreign_join_column: &'static str,
    },
}

impl FieldKind {
    #[must_use]
    pub const fn flavour(self) -> &'static str {
        match self {
            Self::String { .. } => "string",
            Self::Integer { .. } => "integer",
            Self::Boolean => "boolean",
            Self::Join { .. } => "join",
            Self::JoinWhere { .. } => "join_where",
            Self::JoinThrough { .. } => "join_through",
            Self::JoinThroughWhere { .. } => "join_through_where",
            Self::SelfJoin { .. } => "self_join",
            Self::HierarchicalSelfJoin { .. } => "hierarchical_self_join",
        }
    }

    const fn tag(self) -> u8 {
        match self {
            Self::String { .. } => 0x01,
            Self::Integer { .. } => 0x02,
            Self::Boolean => 0x03,
            Self::Join { .. } => 0x04,
            Self::JoinWhere { .. } => 0x05,
            Self::JoinThrough { .. } => 0x06,
            Self::JoinThroughWhere { .. } => 0x07,
            Self::SelfJoin { .. } => 0x08,
            Self::HierarchicalSelfJoin { .. } => 0x09,
        }
    }
}

///
/// Field
///
/// Declarative, typed descriptor of one column or relationship scoped to an
/// object kind. Fields are plain `Copy` values declared as constants in
/// [`crate::schema`]; equality is structural (see [`Field::identity`]).
///

#[derive(Clone, Copy, Debug)]
pub struct Field {
    object: ObjectKind,
    column: &'static str,
    kind: FieldKind,
}

/// Structural identity of a field:
/// (flavour, object, column, far kind, table, join column, condition column,
/// condition value).
pub type FieldIdentity = (
    u8,
    ObjectKind,
    &'static str,
    Option<ObjectKind>,
    Option<&'static str>,
    Option<&'static str>,
    Option<&'static str>,
    Option<i64>,
);

impl Field {
    // ------------------------------------------------------------------
    // Scalar columns
    // ------------------------------------------------------------------

    #[must_use]
    pub const fn string(object: ObjectKind, column: &'static str) -> Self {
        Self::new(object, column, FieldKind::String { nullable: false })
    }

    #[must_use]
    pub const fn nullable_string(object: ObjectKind, column: &'static str) -> Self {
        Self::new(object, column, FieldKind::String { nullable: true })
    }

    #[must_use]
    pub const fn integer(object: ObjectKind, column: &'static str) -> Self {
        Self::new(object, column, FieldKind::Integer { nullable: false })
    }

    #[must_use]
    pub const fn nullable_integer(object: ObjectKind, column: &'static str) -> Self {
        Self::new(object, column, FieldKind::Integer { nullable: true })
    }

    #[must_use]
    pub const fn boolean(object: ObjectKind, column: &'static str) -> Self {
        Self::new(object, column, FieldKind::Boolean)
    }

    // ------------------------------------------------------------------
    // Relationships
    // ------------------------------------------------------------------

    #[must_use]
    pub const fn join(object: ObjectKind, column: &'static str, join_object: ObjectKind) -> Self {
        Self::new(
            object,
            column,
            FieldKind::Join {
                join_object,
                nullable: false,
            },
        )
    }

    #[must_use]
    pub const fn nullable_join(
        object: ObjectKind,
        column: &'static str,
        join_object: ObjectKind,
    ) -> Self {
        Self::new(
            object,
            column,
            FieldKind::Join {
                join_object,
                nullable: true,
            },
        )
    }

    #[must_use]
    pub const fn join_where(
        object: ObjectKind,
        column: &'static str,
        join_object: ObjectKind,
        condition_column: &'static str,
        condition_value: i64,
    ) -> Self {
        Self::new(
            object,
            column,
            FieldKind::JoinWhere {
                join_object,
                condition: JoinCondition {
                    column: condition_column,
                    value: condition_value,
                },
            },
        )
    }

    #[must_use]
    pub const fn join_through(
        object: ObjectKind,
        column: &'static str,
        join_object: ObjectKind,
        table: &'static str,
        foreign_column: &'static str,
    ) -> Self {
        Self::new(
            object,
            column,
            FieldKind::JoinThrough {
                join_object,
                table,
                foreign_column,
            },
        )
    }

    #[must_use]
    pub const fn join_through_where(
        object: ObjectKind,
        column: &'static str,
        join_object: ObjectKind,
        table: &'static str,
        foreign_column: &'static str,
        condition_column: &'static str,
        condition_value: i64,
    ) -> Self {
        Self::new(
            object,
            column,
            FieldKind::JoinThroughWhere {
                join_object,
                table,
                foreign_column,
                condition: JoinCondition {
                    column: condition_column,
                    value: condition_value,
                },
            },
        )
    }

    #[must_use]
    pub const fn self_join(
        object: ObjectKind,
        column: &'static str,
        table: &'static str,
        join_column: &'static str,
        foreign_join_column: &'static str,
    ) -> Self {
        Self::new(
            object,
            column,
            FieldKind::SelfJoin {
                table,
                join_column,
                foreign_join_column,
            },
        )
    }

    #[must_use]
    pub const fn hierarchical_self_join(
        object: ObjectKind,
        column: &'static str,
        table: &'static str,
        join_column: &'static str,
        foreign_join_column: &'static str,
    ) -> Self {
        Self::new(
            object,
            column,
            FieldKind::HierarchicalSelfJoin {
                table,
                join_column,
                foreign_join_column,
            },
        )
    }

    const fn new(object: ObjectKind, column: &'static str, kind: FieldKind) -> Self {
        Self {
            object,
            column,
            kind,
        }
    }

    // ------------------------------------------------------------------
    // Introspection
    // ------------------------------------------------------------------

    #[must_use]
    pub const fn object(&self) -> ObjectKind {
        self.object
    }

    #[must_use]
    pub const fn column(&self) -> &'static str {
        self.column
    }

    #[must_use]
    pub const fn kind(&self) -> FieldKind {
        self.kind
    }

    #[must_use]
    pub const fn is_join(&self) -> bool {
        !matches!(
            self.kind,
            FieldKind::String { .. } | FieldKind::Integer { .. } | FieldKind::Boolean
        )
    }

    #[must_use]
    pub const fn is_hierarchical(&self) -> bool {
        matches!(self.kind, FieldKind::HierarchicalSelfJoin { .. })
    }

    /// Whether the column may hold NULL. Only nullable fields accept
    /// `IS NULL` / `IS NOT NULL` comparisons.
    #[must_use]
    pub const fn is_nullable(&self) -> bool {
        match self.kind {
            FieldKind::String { nullable }
            | FieldKind::Integer { nullable }
            | FieldKind::Join { nullable, .. } => nullable,
            _ => false,
        }
    }

    /// Object kind on the far side of a relationship.
    pub const fn join_object(&self) -> Result<ObjectKind, FieldError> {
        match self.kind {
            FieldKind::Join { join_object, .. }
            | FieldKind::JoinWhere { join_object, .. }
            | FieldKind::JoinThrough { join_object, .. }
            | FieldKind::JoinThroughWhere { join_object, .. } => Ok(join_object),
            FieldKind::SelfJoin { .. } | FieldKind::HierarchicalSelfJoin { .. } => Ok(self.object),
            _ => Err(self.unsupported("join object")),
        }
    }

    /// Association or self-relation table.
    pub const fn table(&self) -> Result<&'static str, FieldError> {
        match self.kind {
            FieldKind::JoinThrough { table, .. }
            | FieldKind::JoinThroughWhere { table, .. }
            | FieldKind::SelfJoin { table, .. }
            | FieldKind::HierarchicalSelfJoin { table, .. } => Ok(table),
            _ => Err(self.unsupported("table")),
        }
    }

    /// Far-side column of an association table.
    pub const fn foreign_column(&self) -> Result<&'static str, FieldError> {
        match self.kind {
            FieldKind::JoinThrough { foreign_column, .. }
            | FieldKind::JoinThroughWhere { foreign_column, .. } => Ok(foreign_column),
            _ => Err(self.unsupported("foreign column")),
        }
    }

    /// Near-side column of a self-relation table.
    pub const fn join_column(&self) -> Result<&'static str, FieldError> {
        match self.kind {
            FieldKind::SelfJoin { join_column, .. }
            | FieldKind::HierarchicalSelfJoin { join_column, .. } => Ok(join_column),
            _ => Err(self.unsupported("join column")),
        }
    }

    /// Far-side column of a self-relation table.
    pub const fn foreign_join_column(&self) -> Result<&'static str, FieldError> {
        match self.kind {
            FieldKind::SelfJoin {
                foreign_join_column,
                ..
            }
            | FieldKind::HierarchicalSelfJoin {
                foreign_join_column,
                ..
            } => Ok(foreign_join_column),
            _ => Err(self.unsupported("foreign join column")),
        }
    }

    /// Fixed equality of a conditioned relationship.
    pub const fn condition(&self) -> Result<JoinCondition, FieldError> {
        match self.kind {
            FieldKind::JoinWhere { condition, .. }
            | FieldKind::JoinThroughWhere { condition, .. } => Ok(condition),
            _ => Err(self.unsupported("join condition")),
        }
    }

    /// Structural identity used for equality, hashing and ordering.
    ///
    /// Two independently constructed fields describing the same relationship
    /// compare equal; join deduplication during normalization relies on it.
    #[must_use]
    pub const fn identity(&self) -> FieldIdentity {
        let (table, join_column, condition) = match self.kind {
            FieldKind::String { .. }
            | FieldKind::Integer { .. }
            | FieldKind::Boolean
            | FieldKind::Join { .. } => (None, None, None),
            FieldKind::JoinWhere { condition, .. } => (None, None, Some(condition)),
            FieldKind::JoinThrough {
                table,
                foreign_column,
                ..
            } => (Some(table), Some(foreign_column), None),
            FieldKind::JoinThroughWhere {
                table,
                foreign_column,
                condition,
                ..
            } => (Some(table), Some(foreign_column), Some(condition)),
            FieldKind::SelfJoin {
                table, join_column, ..
            }
            | FieldKind::HierarchicalSelfJoin {
                table, join_column, ..
            } => (Some(table), Some(join_column), None),
        };

        let (condition_column, condition_value) = match condition {
            Some(condition) => (Some(condition.column), Some(condition.value)),
            None => (None, None),
        };

        let join_object = match self.join_object() {
            Ok(far) => Some(far),
            Err(_) => None,
        };

        (
            self.kind.tag(),
            self.object,
            self.column,
            join_object,
            table,
            join_column,
            condition_column,
            condition_value,
        )
    }

    const fn unsupported(&self, accessor: &'static str) -> FieldError {
        FieldError {
            object: self.object,
            column: self.column,
            flavour: self.kind.flavour(),
            accessor,
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.object, self.column)
    }
}

impl PartialEq for Field {
    fn eq(&self, other: &Self) -> bool {
        self.identity() == other.identity()
    }
}

impl Eq for Field {}

impl Hash for Field {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.identity().hash(state);
    }
}

impl PartialOrd for Field {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Field {
    fn cmp(&self, other: &Self) -> Ordering {
        self.identity().cmp(&other.identity())
    }
}

///
/// TESTS
///
