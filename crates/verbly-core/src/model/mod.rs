//! Schema model: the object kind registry and field descriptors.

pub mod field;
pub mod object;

pub use field::{Field, FieldError, FieldKind, JoinCondition};
pub use object::ObjectKind;
