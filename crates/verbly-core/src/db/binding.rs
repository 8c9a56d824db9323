use crate::db::filter::Operand;
use rusqlite::types::{ToSql, ToSqlOutput};
use serde::Serialize;
use std::fmt;
use thiserror::Error as ThisError;

///
/// BindingError
/// Kind-specific accessor invoked on a binding of the other kind.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq, ThisError)]
#[error("expected {expected} binding, found {found}")]
pub struct BindingError {
    pub expected: &'static str,
    pub found: &'static str,
}

///
/// Binding
///
/// One positional statement parameter. Bindings are emitted in the same
/// left-to-right order as the `?` placeholders they fill.
///

#[derive(Clone, Debug, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Binding {
    Integer(i64),
    String(String),
}

impl Binding {
    #[must_use]
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Self::Integer(_) => "integer",
            Self::String(_) => "string",
        }
    }

    pub const fn as_integer(&self) -> Result<i64, BindingError> {
        match self {
            Self::Integer(value) => Ok(*value),
            Self::String(_) => Err(BindingError {
                expected: "integer",
                found: "string",
            }),
        }
    }

    pub fn as_str(&self) -> Result<&str, BindingError> {
        match self {
            Self::String(value) => Ok(value),
            Self::Integer(_) => Err(BindingError {
                expected: "string",
                found: "integer",
            }),
        }
    }

    /// Scalar operand lowered to a parameter; booleans bind as 0/1.
    pub(crate) fn from_operand(operand: &Operand) -> Option<Self> {
        match operand {
            Operand::Integer(value) => Some(Self::Integer(*value)),
            Operand::Boolean(value) => Some(Self::Integer(i64::from(*value))),
            Operand::String(value) => Some(Self::String(value.clone())),
            Operand::None | Operand::Filter(_) => None,
        }
    }
}

impl ToSql for Binding {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        match self {
            Self::Integer(value) => Ok(ToSqlOutput::from(*value)),
            Self::String(value) => Ok(ToSqlOutput::from(value.as_str())),
        }
    }
}

impl fmt::Display for Binding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(value) => write!(f, "{value}"),
            Self::String(value) => write!(f, "'{}'", value.replace('\'', "''")),
        }
    }
}

impl From<i64> for Binding {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<&str> for Binding {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for Binding {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

///
/// TESTS
///
