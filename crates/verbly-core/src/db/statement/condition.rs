use crate::db::{binding::Binding, filter::Connective};

///
/// Condition
///
/// WHERE tree anchored to concrete aliases. `True` marks a subtree whose
/// constraint is carried entirely by joins.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub(super) enum Condition {
    True,
    Compare {
        alias: String,
        column: &'static str,
        op: &'static str,
        binding: Binding,
    },
    Literal {
        alias: String,
        column: &'static str,
        value: i64,
    },
    Null {
        alias: String,
        column: &'static str,
        negated: bool,
    },
    Group {
        connective: Connective,
        children: Vec<Self>,
    },
}

impl Condition {
    /// Group constructor. `True` children are dropped under `AND`; under
    /// `OR` they stay in place so sibling placeholders are still emitted.
    pub(super) fn group(connective: Connective, children: Vec<Self>) -> Self {
        if children.iter().all(Self::is_true) {
            return Self::True;
        }

        let children = match connective {
            Connective::And => children.into_iter().filter(|child| !child.is_true()).collect(),
            Connective::Or => children,
        };

        Self::Group {
            connective,
            children,
        }
    }

    pub(super) fn and(lhs: Self, rhs: Self) -> Self {
        Self::group(Connective::And, vec![lhs, rhs])
    }

    pub(super) const fn is_true(&self) -> bool {
        matches!(self, Self::True)
    }

    /// Append SQL text, pushing one binding per placeholder written.
    pub(super) fn render(&self, sql: &mut String, bindings: &mut Vec<Binding>) {
        match self {
            Self::True => sql.push('1'),
            Self::Compare {
                alias,
                column,
                op,
                binding,
            } => {
                sql.push_str(&format!("{alias}.{column} {op} ?"));
                bindings.push(binding.clone());
            }
            Self::Literal {
                alias,
                column,
                value,
            } => sql.push_str(&format!("{alias}.{column} = {value}")),
            Self::Null {
                alias,
                column,
                negated,
            } => {
                let op = if *negated { "IS NOT NULL" } else { "IS NULL" };
                sql.push_str(&format!("{alias}.{column} {op}"));
            }
            Self::Group {
                connective,
                children,
            } => {
                for (index, child) in children.iter().enumerate() {
                    if index > 0 {
                        sql.push(' ');
                        sql.push_str(connective.keyword());
                        sql.push(' ');
                    }

                    if matches!(child, Self::Group { .. }) {
                        sql.push('(');
                        child.render(sql, bindings);
                        sql.push(')');
                    } else {
                        child.render(sql, bindings);
                    }
                }
            }
        }
    }
}

///
/// TESTS
///
