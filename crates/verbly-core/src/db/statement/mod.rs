//! Statement compiler: lowers one normalized, compacted filter anchored at
//! an object kind into a single SQL string plus its ordered bindings.

mod compile;
mod condition;
mod cte;
mod join;

#[cfg(test)]
mod tests;

use crate::{
    db::{
        binding::Binding,
        filter::{Comparison, Filter},
        order::Order,
    },
    error::ErrorClass,
    model::{FieldError, ObjectKind},
    obs::sink::{self, MetricsEvent},
};
use compile::Compiler;
use cte::CteBody;
use serde::Serialize;
use thiserror::Error as ThisError;
use tracing::debug;

///
/// CompileError
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum CompileError {
    #[error("cannot order {kind} by {field}: field belongs to another kind")]
    ForeignSortField { field: String, kind: ObjectKind },

    #[error("cannot order by relationship field {field}")]
    NonScalarSortField { field: String },

    #[error("field {field} does not belong to {kind}; normalize the filter against {kind} first")]
    ForeignField { field: String, kind: ObjectKind },

    #[error("field {field} is not a relationship")]
    NotARelationship { field: String },

    #[error("comparison {comparison} on {field} has no bindable operand")]
    MissingOperand {
        field: String,
        comparison: Comparison,
    },

    #[error(transparent)]
    Field(#[from] FieldError),
}

impl CompileError {
    #[must_use]
    pub const fn class(&self) -> ErrorClass {
        match self {
            Self::MissingOperand { .. } => ErrorClass::Internal,
            _ => ErrorClass::SchemaMisuse,
        }
    }
}

///
/// TableRef
/// One entry of the alias registry: instantiated alias and what it names.
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct TableRef {
    pub alias: String,
    pub table: String,
}

///
/// Statement
///
/// Compiled SQL with its positional bindings. CTEs discovered anywhere in
/// the tree are hoisted into one leading `WITH RECURSIVE`, then the main
/// select follows: joins, `WHERE`, a `GROUP BY` on the primary key that
/// removes fan-out duplicates, ordering and limit.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Statement {
    kind: ObjectKind,
    sql: String,
    bindings: Vec<Binding>,
    tables: Vec<TableRef>,
    joins: usize,
    ctes: usize,
}

impl Statement {
    /// Compile `filter`, which must already be normalized against `kind`.
    pub fn compile(
        kind: ObjectKind,
        select: &[&str],
        filter: &Filter,
        order: &Order,
        limit: Option<u32>,
    ) -> Result<Self, CompileError> {
        order.validate(kind)?;

        let mut compiler = Compiler::default();
        let scope = compiler.compile_scope(kind, filter)?;

        let mut sql = String::new();
        let mut bindings = Vec::new();

        // CTEs first: their placeholders precede the main WHERE clause
        if !compiler.ctes.is_empty() {
            sql.push_str("WITH RECURSIVE ");
            for (index, cte) in compiler.ctes.iter().enumerate() {
                if index > 0 {
                    sql.push_str(", ");
                }
                cte.render(&mut sql, &mut bindings);
            }
            sql.push(' ');
        }

        let columns = select
            .iter()
            .map(|column| format!("{}.{column}", scope.alias))
            .collect::<Vec<_>>()
            .join(", ");
        sql.push_str(&format!(
            "SELECT {columns} FROM {} AS {}",
            kind.table(),
            scope.alias
        ));

        for join in &scope.joins {
            join.render(&mut sql);
        }

        if !scope.condition.is_true() {
            sql.push_str(" WHERE ");
            scope.condition.render(&mut sql, &mut bindings);
        }

        let group_column = select.first().copied().unwrap_or(kind.primary_key());
        sql.push_str(&format!(" GROUP BY {}.{group_column}", scope.alias));

        match order {
            Order::Random => sql.push_str(" ORDER BY RANDOM()"),
            Order::Field { field, ascending } => {
                let direction = if *ascending { "ASC" } else { "DESC" };
                sql.push_str(&format!(
                    " ORDER BY {}.{} {direction}",
                    scope.alias,
                    field.column()
                ));
            }
        }

        if let Some(limit) = limit {
            sql.push_str(&format!(" LIMIT {limit}"));
        }

        let cte_joins: usize = compiler
            .ctes
            .iter()
            .map(|cte| match &cte.body {
                CteBody::Select(select) => select.joins.len(),
                CteBody::Closure { base, .. } => base.joins.len() + 1,
            })
            .sum();
        let joins = scope.joins.len() + cte_joins;
        let ctes = compiler.ctes.len();
        let recursive = compiler.ctes.iter().filter(|cte| cte.is_recursive()).count();

        debug!(
            kind = %kind,
            joins,
            ctes,
            recursive,
            bindings = bindings.len(),
            "compiled statement"
        );
        sink::record(MetricsEvent::StatementCompiled {
            kind,
            joins: joins as u64,
            ctes: ctes as u64,
        });

        Ok(Self {
            kind,
            sql,
            bindings,
            tables: compiler.tables,
            joins,
            ctes,
        })
    }

    #[must_use]
    pub const fn kind(&self) -> ObjectKind {
        self.kind
    }

    #[must_use]
    pub fn sql(&self) -> &str {
        &self.sql
    }

    #[must_use]
    pub fn bindings(&self) -> &[Binding] {
        &self.bindings
    }

    /// Alias registry, in instantiation order.
    #[must_use]
    pub fn tables(&self) -> &[TableRef] {
        &self.tables
    }

    #[must_use]
    pub const fn join_count(&self) -> usize {
        self.joins
    }

    #[must_use]
    pub const fn cte_count(&self) -> usize {
        self.ctes
    }
}
