use crate::db::{
    binding::Binding,
    statement::{condition::Condition, join::Join},
};

///
/// Select
/// Single-column sub-select forming the body (or base case) of a CTE.
///

#[derive(Clone, Debug)]
pub(super) struct Select {
    pub(super) alias: String,
    pub(super) column: &'static str,
    pub(super) table: &'static str,
    pub(super) joins: Vec<Join>,
    pub(super) condition: Condition,
}

impl Select {
    fn render(&self, sql: &mut String, bindings: &mut Vec<Binding>) {
        sql.push_str(&format!(
            "SELECT {alias}.{column} FROM {table} AS {alias}",
            alias = self.alias,
            column = self.column,
            table = self.table,
        ));

        for join in &self.joins {
            join.render(sql);
        }

        if !self.condition.is_true() {
            sql.push_str(" WHERE ");
            self.condition.render(sql, bindings);
        }
    }
}

///
/// CteBody
///

#[derive(Clone, Debug)]
pub(super) enum CteBody {
    Select(Select),

    /// Transitive closure: base rows, then every row related through
    /// `table` to a row already in the set.
    Closure {
        base: Select,
        table: &'static str,
        alias: String,
        join_column: &'static str,
        foreign_join_column: &'static str,
    },
}

///
/// Cte
/// Named, single-column common table expression; always hoisted to the
/// outermost statement.
///

#[derive(Clone, Debug)]
pub(super) struct Cte {
    pub(super) name: String,
    pub(super) column: &'static str,
    pub(super) body: CteBody,
}

impl Cte {
    pub(super) const fn is_recursive(&self) -> bool {
        matches!(self.body, CteBody::Closure { .. })
    }

    pub(super) fn render(&self, sql: &mut String, bindings: &mut Vec<Binding>) {
        sql.push_str(&format!("{}({}) AS (", self.name, self.column));

        match &self.body {
            CteBody::Select(select) => select.render(sql, bindings),
            CteBody::Closure {
                base,
                table,
                alias,
                join_column,
                foreign_join_column,
            } => {
                base.render(sql, bindings);
                sql.push_str(&format!(
                    " UNION SELECT {alias}.{join_column} FROM {table} AS {alias} \
                     INNER JOIN {name} ON {alias}.{foreign_join_column} = {name}.{column}",
                    name = self.name,
                    column = self.column,
                ));
            }
        }

        sql.push(')');
    }
}
