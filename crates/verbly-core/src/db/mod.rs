pub mod binding;
pub mod filter;
pub mod order;
pub mod query;
pub mod response;
pub mod statement;


use crate::{
    entity::Entity,
    error::{Error, ErrorClass, ErrorOrigin},
};
use filter::Filter;
use order::Order;
use query::Query;
use rusqlite::{Connection, OpenFlags};
use statement::Statement;
use std::{path::Path, rc::Rc};
use tracing::debug;

///
/// Database
///
/// Cheap, cloneable handle to one read-only SQLite connection.
/// Entities keep a clone so their relationships can hydrate lazily.
/// Single-threaded: the handle is neither `Send` nor `Sync`.
///

#[derive(Clone, Debug)]
pub struct Database {
    conn: Rc<Connection>,
    debug: bool,
}

impl Database {
    /// Open an existing database file read-only.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref();
        let flags = OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX;

        let conn = Connection::open_with_flags(path, flags).map_err(|err| {
            Error::new(
                ErrorClass::Database,
                ErrorOrigin::Database,
                format!("cannot open {}: {err}", path.display()),
            )
        })?;
        debug!(path = %path.display(), "opened database");

        Ok(Self::from_connection(conn))
    }

    /// Wrap an already-open connection.
    #[must_use]
    pub fn from_connection(conn: Connection) -> Self {
        Self {
            conn: Rc::new(conn),
            debug: false,
        }
    }

    /// Log prepared statements at `info` instead of `debug`.
    #[must_use]
    pub const fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    #[must_use]
    pub const fn debug(&self) -> bool {
        self.debug
    }

    pub(crate) fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Build a query for `E` rows satisfying `filter`.
    ///
    /// The filter may reference fields of any kind; it is normalized
    /// against `E::KIND` and compacted before compilation.
    pub fn query<E: Entity>(
        &self,
        filter: &Filter,
        order: Order,
        limit: Option<u32>,
    ) -> Result<Query<'_, E>, Error> {
        let normalized = filter.normalize(E::KIND).compact();
        let fingerprint = normalized.fingerprint();
        debug!(
            kind = %E::KIND,
            filter = %fingerprint.short(),
            nodes = normalized.node_count(),
            "normalized filter"
        );

        let statement = Statement::compile(E::KIND, E::SELECT, &normalized, &order, limit)?;

        Query::prepare(self, statement, fingerprint)
    }

    /// Every `E` row, in primary key order.
    pub fn all<E: Entity>(&self) -> Result<Vec<E>, Error> {
        let mut query = self.query::<E>(&Filter::empty(), Order::ascending(E::ID), None)?;

        Ok(query.all()?.entities())
    }
}
