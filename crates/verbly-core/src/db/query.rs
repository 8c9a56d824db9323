use crate::{
    db::{
        Database,
        binding::Binding,
        filter::FilterFingerprint,
        response::{Response, ResponseError},
        statement::{Statement, TableRef},
    },
    entity::Entity,
    error::Error,
    model::ObjectKind,
    obs::sink::{self, MetricsEvent, Span},
};
use rusqlite::params_from_iter;
use serde::Serialize;
use std::marker::PhantomData;
use tracing::{debug, info, trace};

///
/// Query
///
/// One compiled statement prepared against a database handle.
/// Executing it materializes `E` rows; the prepared handle is reused by
/// every execution and finalized when the query is dropped.
///

pub struct Query<'db, E: Entity> {
    db: &'db Database,
    statement: Statement,
    fingerprint: FilterFingerprint,
    prepared: rusqlite::Statement<'db>,
    _marker: PhantomData<E>,
}

impl<'db, E: Entity> Query<'db, E> {
    pub(crate) fn prepare(
        db: &'db Database,
        statement: Statement,
        fingerprint: FilterFingerprint,
    ) -> Result<Self, Error> {
        if db.debug() {
            info!(kind = %E::KIND, filter = %fingerprint.short(), sql = statement.sql(), "prepare");
        } else {
            debug!(kind = %E::KIND, filter = %fingerprint.short(), sql = statement.sql(), "prepare");
        }

        let prepared = db
            .connection()
            .prepare(statement.sql())
            .map_err(|err| database_error(E::KIND, &err, statement.sql()))?;

        Ok(Self {
            db,
            statement,
            fingerprint,
            prepared,
            _marker: PhantomData,
        })
    }

    // ------------------------------------------------------------------
    // Execution
    // ------------------------------------------------------------------

    /// Execute and materialize every row.
    ///
    /// Either every row hydrates or the call fails; no partial response
    /// is ever returned.
    pub fn all(&mut self) -> Result<Response<E>, Error> {
        let rows = self.execute(None)?;

        Ok(Response::new(rows))
    }

    /// The first row in statement order; fails with `NotFound` when the
    /// statement yields nothing.
    pub fn first(&mut self) -> Result<E, Error> {
        let mut rows = self.execute(Some(1))?;

        if rows.is_empty() {
            sink::record(MetricsEvent::EmptyFirst { kind: E::KIND });
            return Err(ResponseError::NotFound { kind: E::KIND }.into());
        }

        Ok(rows.swap_remove(0))
    }

    fn execute(&mut self, cap: Option<usize>) -> Result<Vec<E>, Error> {
        let span = Span::new(E::KIND);
        let db = self.db;
        let sql = self.statement.sql();

        let mut cursor = self
            .prepared
            .query(params_from_iter(self.statement.bindings()))
            .map_err(|err| database_error(E::KIND, &err, sql))?;

        let mut rows = Vec::new();
        while let Some(row) = cursor
            .next()
            .map_err(|err| database_error(E::KIND, &err, sql))?
        {
            rows.push(E::from_row(db, row)?);

            if cap.is_some_and(|cap| rows.len() >= cap) {
                break;
            }
        }

        trace!(kind = %E::KIND, rows = rows.len(), "executed");
        span.finish(rows.len() as u64);

        Ok(rows)
    }

    // ------------------------------------------------------------------
    // Introspection
    // ------------------------------------------------------------------

    #[must_use]
    pub const fn statement(&self) -> &Statement {
        &self.statement
    }

    #[must_use]
    pub const fn fingerprint(&self) -> FilterFingerprint {
        self.fingerprint
    }

    /// Describe the compiled statement without executing it.
    #[must_use]
    pub fn explain(&self) -> ExplainStatement {
        ExplainStatement {
            kind: E::KIND,
            fingerprint: self.fingerprint.as_hex(),
            sql: self.statement.sql().to_string(),
            bindings: self.statement.bindings().to_vec(),
            tables: self.statement.tables().to_vec(),
            joins: self.statement.join_count(),
            ctes: self.statement.cte_count(),
        }
    }
}

///
/// ExplainStatement
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct ExplainStatement {
    pub kind: ObjectKind,
    pub fingerprint: String,
    pub sql: String,
    pub bindings: Vec<Binding>,
    pub tables: Vec<TableRef>,
    pub joins: usize,
    pub ctes: usize,
}

fn database_error(kind: ObjectKind, err: &rusqlite::Error, sql: &str) -> Error {
    sink::record(MetricsEvent::DatabaseError { kind });
    debug!(kind = %kind, error = %err, "database error");

    Error::database(err, sql)
}
