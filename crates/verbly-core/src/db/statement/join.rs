///
/// Join
/// One aliased table (or CTE instance) joined into a scope.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub(super) struct Join {
    pub(super) outer: bool,
    pub(super) table: String,
    pub(super) alias: String,
    pub(super) on: Vec<JoinOn>,
}

///
/// JoinOn
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub(super) enum JoinOn {
    Columns {
        left: String,
        left_column: &'static str,
        right: String,
        right_column: &'static str,
    },
    /// Fixed equality of a conditioned relationship; never a placeholder.
    Literal {
        alias: String,
        column: &'static str,
        value: i64,
    },
}

impl JoinOn {
    pub(super) fn columns(
        left: &str,
        left_column: &'static str,
        right: &str,
        right_column: &'static str,
    ) -> Self {
        Self::Columns {
            left: left.to_string(),
            left_column,
            right: right.to_string(),
            right_column,
        }
    }
}

impl Join {
    pub(super) fn inner(table: impl Into<String>, alias: &str, on: Vec<JoinOn>) -> Self {
        Self {
            outer: false,
            table: table.into(),
            alias: alias.to_string(),
            on,
        }
    }

    pub(super) fn left(table: impl Into<String>, alias: &str, on: Vec<JoinOn>) -> Self {
        Self {
            outer: true,
            ..Self::inner(table, alias, on)
        }
    }

    pub(super) fn render(&self, sql: &mut String) {
        let keyword = if self.outer {
            "LEFT JOIN"
        } else {
            "INNER JOIN"
        };
        sql.push_str(&format!(" {keyword} {} AS {} ON ", self.table, self.alias));

        for (index, on) in self.on.iter().enumerate() {
            if index > 0 {
                sql.push_str(" AND ");
            }

            match on {
                JoinOn::Columns {
                    left,
                    left_column,
                    right,
                    right_column,
                } => sql.push_str(&format!("{left}.{left_column} = {right}.{right_column}")),
                JoinOn::Literal {
                    alias,
                    column,
                    value,
                } => sql.push_str(&format!("{alias}.{column} = {value}")),
            }
        }
    }
}
