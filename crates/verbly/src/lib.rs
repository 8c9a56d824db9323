//! ## Crate layout
//! - `core`: schema, filter algebra, statement compiler, queries, entities
//!   and observability.
//! - `config`: `verbly.toml` loading and database bootstrap.
//!
//! The `prelude` module carries the vocabulary needed to build and run
//! filters; everything else stays reachable through `core`.

pub use verbly_core as core;

pub mod config;

//
// Consts
//

/// Workspace version re-export for downstream tooling/tests.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use config::{Config, ConfigError};
pub use core::{
    db::{Database, query::ExplainStatement, response::Response},
    error::Error,
    obs::{metrics_report, metrics_reset_all},
};

///
/// Prelude
///

pub mod prelude {
    pub use crate::core::{
        prelude::*,
        schema::{form, frame, group, notion, part, pronunciation, word},
    };
}
