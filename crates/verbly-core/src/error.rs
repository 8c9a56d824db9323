use crate::{
    db::{
        binding::BindingError, filter::FilterError, response::ResponseError,
        statement::CompileError,
    },
    model::field::FieldError,
    schema::UnknownDiscriminant,
};
use std::fmt;
use thiserror::Error as ThisError;

///
/// Error
///
/// Structured runtime error with a stable classification.
/// Every layer-specific error folds into this type at the query boundary.
///

#[derive(Debug, ThisError)]
#[error("{message}")]
pub struct Error {
    pub class: ErrorClass,
    pub origin: ErrorOrigin,
    pub message: String,

    /// Optional structured error detail.
    /// The variant (if present) must correspond to `origin`.
    pub detail: Option<ErrorDetail>,
}

impl Error {
    pub fn new(class: ErrorClass, origin: ErrorOrigin, message: impl Into<String>) -> Self {
        Self {
            class,
            origin,
            message: message.into(),
            detail: None,
        }
    }

    /// Construct a database-origin error carrying the engine message and SQL.
    pub(crate) fn database(source: &rusqlite::Error, sql: impl Into<String>) -> Self {
        let err = DatabaseError {
            message: source.to_string(),
            sql: sql.into(),
        };

        Self {
            class: ErrorClass::Database,
            origin: ErrorOrigin::Database,
            message: err.to_string(),
            detail: Some(ErrorDetail::Database(err)),
        }
    }

    /// Construct an entity-origin error for a row that cannot be hydrated.
    pub(crate) fn entity_decode(message: impl Into<String>) -> Self {
        Self::new(ErrorClass::Database, ErrorOrigin::Entity, message)
    }

    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self.class, ErrorClass::NotFound)
    }

    #[must_use]
    pub const fn is_schema_misuse(&self) -> bool {
        matches!(self.class, ErrorClass::SchemaMisuse)
    }

    #[must_use]
    pub fn display_with_class(&self) -> String {
        format!("{}:{}: {}", self.origin, self.class, self.message)
    }
}

///
/// ErrorDetail
///
/// Structured, origin-specific error detail carried by [`Error`].
///

#[derive(Debug, ThisError)]
pub enum ErrorDetail {
    #[error("{0}")]
    Field(FieldError),

    #[error("{0}")]
    Filter(FilterError),

    #[error("{0}")]
    Binding(BindingError),

    #[error("{0}")]
    Compile(CompileError),

    #[error("{0}")]
    Response(ResponseError),

    #[error("{0}")]
    Database(DatabaseError),
}

///
/// DatabaseError
///
/// Statement preparation, binding or stepping failure.
/// Always fatal to the current query; never retried.
///

#[derive(Debug, ThisError)]
#[error("database error: {message} (sql: {sql})")]
pub struct DatabaseError {
    pub message: String,
    pub sql: String,
}

impl From<FieldError> for Error {
    fn from(err: FieldError) -> Self {
        Self {
            class: ErrorClass::SchemaMisuse,
            origin: ErrorOrigin::Field,
            message: err.to_string(),
            detail: Some(ErrorDetail::Field(err)),
        }
    }
}

impl From<FilterError> for Error {
    fn from(err: FilterError) -> Self {
        Self {
            class: ErrorClass::SchemaMisuse,
            origin: ErrorOrigin::Filter,
            message: err.to_string(),
            detail: Some(ErrorDetail::Filter(err)),
        }
    }
}

impl From<BindingError> for Error {
    fn from(err: BindingError) -> Self {
        Self {
            class: ErrorClass::SchemaMisuse,
            origin: ErrorOrigin::Statement,
            message: err.to_string(),
            detail: Some(ErrorDetail::Binding(err)),
        }
    }
}

impl From<UnknownDiscriminant> for Error {
    fn from(err: UnknownDiscriminant) -> Self {
        Self::entity_decode(err.to_string())
    }
}

impl From<CompileError> for Error {
    fn from(err: CompileError) -> Self {
        Self {
            class: err.class(),
            origin: ErrorOrigin::Statement,
            message: err.to_string(),
            detail: Some(ErrorDetail::Compile(err)),
        }
    }
}

impl From<ResponseError> for Error {
    fn from(err: ResponseError) -> Self {
        Self {
            class: err.class(),
            origin: ErrorOrigin::Response,
            message: err.to_string(),
            detail: Some(ErrorDetail::Response(err)),
        }
    }
}

///
/// ErrorClass
/// Error taxonomy for runtime classification.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorClass {
    /// Programmer error detected before any SQL runs.
    SchemaMisuse,
    Database,
    NotFound,
    Conflict,
    Config,
    Internal,
}

impl fmt::Display for ErrorClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::SchemaMisuse => "schema_misuse",
            Self::Database => "database",
            Self::NotFound => "not_found",
            Self::Conflict => "conflict",
            Self::Config => "config",
            Self::Internal => "internal",
        };
        write!(f, "{label}")
    }
}

///
/// ErrorOrigin
/// Origin taxonomy for runtime classification.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorOrigin {
    Field,
    Filter,
    Statement,
    Query,
    Response,
    Database,
    Entity,
    Config,
}

impl fmt::Display for ErrorOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Field => "field",
            Self::Filter => "filter",
            Self::Statement => "statement",
            Self::Query => "query",
            Self::Response => "response",
            Self::Database => "database",
            Self::Entity => "entity",
            Self::Config => "config",
        };
        write!(f, "{label}")
    }
}

///
/// TESTS
///
