//! Core runtime for verbly: the object kind registry, field descriptors,
//! the filter algebra and its SQL compiler, query execution against the
//! embedded SQLite database, and lazily-hydrated domain entities.
#![warn(unreachable_pub)]

// public exports are one module level down
pub mod db;
pub mod entity;
pub mod error;
pub mod model;
pub mod obs;
pub mod schema;

// test
#[cfg(test)]
pub(crate) mod test_support;

///
/// Prelude
///
/// Prelude contains only domain vocabulary: kinds, fields, filters and
/// entities. Errors, statements and metrics stay one module level down.
///

pub mod prelude {
    pub use crate::{
        db::{
            Database,
            filter::{Connective, Filter},
            order::Order,
        },
        entity::{Entity, Form, Frame, Group, Notion, Part, Pronunciation, Word},
        model::{Field, ObjectKind},
        schema::{Inflection, PartOfSpeech, PartType},
    };
}
