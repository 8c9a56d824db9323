use crate::{
    entity::Entity,
    error::{Error, ErrorClass},
    model::ObjectKind,
};
use derive_more::{Deref, IntoIterator};
use thiserror::Error as ThisError;

///
/// ResponseError
/// Errors related to interpreting a materialized response.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum ResponseError {
    #[error("expected at least one row, found 0 (kind {kind})")]
    NotFound { kind: ObjectKind },

    #[error("expected exactly one row, found {count} (kind {kind})")]
    NotUnique { kind: ObjectKind, count: u64 },
}

impl ResponseError {
    pub(crate) const fn class(&self) -> ErrorClass {
        match self {
            Self::NotFound { .. } => ErrorClass::NotFound,
            Self::NotUnique { .. } => ErrorClass::Conflict,
        }
    }
}

///
/// Response
/// Materialized query result: entities in statement order.
///

#[derive(Debug, Deref, IntoIterator)]
#[into_iterator(owned, ref)]
pub struct Response<E: Entity>(Vec<E>);

impl<E: Entity> Response<E> {
    pub(crate) const fn new(rows: Vec<E>) -> Self {
        Self(rows)
    }

    // ------------------------------------------------------------------
    // Introspection
    // ------------------------------------------------------------------

    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub const fn count(&self) -> u64 {
        self.0.len() as u64
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    // ------------------------------------------------------------------
    // Cardinality enforcement
    // ------------------------------------------------------------------

    pub fn require_one(&self) -> Result<(), Error> {
        match self.count() {
            1 => Ok(()),
            0 => Err(ResponseError::NotFound { kind: E::KIND }.into()),
            count => Err(ResponseError::NotUnique {
                kind: E::KIND,
                count,
            }
            .into()),
        }
    }

    pub fn require_some(&self) -> Result<(), Error> {
        if self.is_empty() {
            Err(ResponseError::NotFound { kind: E::KIND }.into())
        } else {
            Ok(())
        }
    }

    // ------------------------------------------------------------------
    // Entities
    // ------------------------------------------------------------------

    /// The single entity; fails unless exactly one row was loaded.
    pub fn entity(self) -> Result<E, Error> {
        self.try_entity()?
            .ok_or_else(|| ResponseError::NotFound { kind: E::KIND }.into())
    }

    pub fn try_entity(self) -> Result<Option<E>, Error> {
        match self.count() {
            0 | 1 => Ok(self.0.into_iter().next()),
            count => Err(ResponseError::NotUnique {
                kind: E::KIND,
                count,
            }
            .into()),
        }
    }

    #[must_use]
    pub fn entities(self) -> Vec<E> {
        self.0
    }

    #[must_use]
    pub fn ids(&self) -> Vec<i64> {
        self.0.iter().map(Entity::id).collect()
    }

    #[must_use]
    pub fn contains_id(&self, id: i64) -> bool {
        self.0.iter().any(|entity| entity.id() == id)
    }

    /// NOTE: Bypasses cardinality checks.
    #[must_use]
    pub fn first(self) -> Option<E> {
        self.0.into_iter().next()
    }
}

///
/// TESTS
///
