use crate::{
    db::{
        binding::Binding,
        filter::{Clause, Comparison, Filter},
        statement::{
            CompileError, TableRef,
            condition::Condition,
            cte::{Cte, CteBody, Select},
            join::{Join, JoinOn},
        },
    },
    model::{Field, FieldKind, ObjectKind},
};

///
/// Scope
/// One compiled (sub-)statement rooted at an aliased table.
///

pub(super) struct Scope {
    pub(super) alias: String,
    pub(super) joins: Vec<Join>,
    pub(super) condition: Condition,
}

///
/// Relation
/// Columns of a two-hop join through an association or self-relation table.
///

struct Relation {
    table: &'static str,
    near_column: &'static str,
    far_column: &'static str,
    target_column: &'static str,
}

///
/// Compiler
///
/// Lowers normalized filters into scopes. Alias and CTE counters live here
/// and are threaded through every sub-statement, so identifiers never
/// collide; CTEs are collected in dependency order for hoisting.
///

#[derive(Default)]
pub(super) struct Compiler {
    next_table: usize,
    next_with: usize,
    pub(super) tables: Vec<TableRef>,
    pub(super) ctes: Vec<Cte>,
}

impl Compiler {
    pub(super) fn compile_scope(
        &mut self,
        kind: ObjectKind,
        filter: &Filter,
    ) -> Result<Scope, CompileError> {
        let alias = self.alias(kind.table());
        let mut joins = Vec::new();
        let condition = self.compile_filter(kind, &alias, filter, &mut joins)?;

        Ok(Scope {
            alias,
            joins,
            condition,
        })
    }

    // ------------------------------------------------------------------
    // Identifiers
    // ------------------------------------------------------------------

    fn alias(&mut self, table: &str) -> String {
        self.next_table += 1;
        let alias = format!("{table}_{}", self.next_table);
        self.tables.push(TableRef {
            alias: alias.clone(),
            table: table.to_string(),
        });

        alias
    }

    fn cte_name(&mut self, table: &str) -> String {
        self.next_with += 1;
        format!("{table}_tree_{}", self.next_with)
    }

    // ------------------------------------------------------------------
    // Filters
    // ------------------------------------------------------------------

    fn compile_filter(
        &mut self,
        kind: ObjectKind,
        alias: &str,
        filter: &Filter,
        joins: &mut Vec<Join>,
    ) -> Result<Condition, CompileError> {
        match filter {
            Filter::Empty => Ok(Condition::True),
            Filter::Clause(clause) => self.compile_clause(kind, alias, clause, joins),
            Filter::Group {
                connective,
                children,
            } => {
                let mut compiled = Vec::with_capacity(children.len());
                for child in children {
                    compiled.push(self.compile_filter(kind, alias, child, joins)?);
                }

                Ok(Condition::group(*connective, compiled))
            }
        }
    }

    fn compile_clause(
        &mut self,
        kind: ObjectKind,
        alias: &str,
        clause: &Clause,
        joins: &mut Vec<Join>,
    ) -> Result<Condition, CompileError> {
        let field = clause.field();
        if field.object() != kind {
            return Err(CompileError::ForeignField {
                field: field.to_string(),
                kind,
            });
        }

        let comparison = clause.comparison();
        let op = match comparison {
            Comparison::IsNull | Comparison::IsNotNull => {
                return Ok(Condition::Null {
                    alias: alias.to_string(),
                    column: field.column(),
                    negated: comparison == Comparison::IsNotNull,
                });
            }
            Comparison::Matches
            | Comparison::DoesNotMatch
            | Comparison::HierarchicallyMatches
            | Comparison::DoesNotHierarchicallyMatch => {
                return self.compile_join(alias, clause, joins);
            }
            Comparison::IntEquals | Comparison::StringEquals | Comparison::BooleanEquals => "=",
            Comparison::IntDoesNotEqual | Comparison::StringDoesNotEqual => "!=",
            Comparison::IntIsAtLeast => ">=",
            Comparison::IntIsGreaterThan => ">",
            Comparison::IntIsAtMost => "<=",
            Comparison::IntIsLessThan => "<",
            Comparison::StringIsLike => "LIKE",
            Comparison::StringIsNotLike => "NOT LIKE",
        };

        let binding =
            Binding::from_operand(clause.operand()).ok_or_else(|| CompileError::MissingOperand {
                field: field.to_string(),
                comparison,
            })?;

        Ok(Condition::Compare {
            alias: alias.to_string(),
            column: field.column(),
            op,
            binding,
        })
    }

    // ------------------------------------------------------------------
    // Joins
    // ------------------------------------------------------------------

    fn compile_join(
        &mut self,
        alias: &str,
        clause: &Clause,
        joins: &mut Vec<Join>,
    ) -> Result<Condition, CompileError> {
        let field = *clause.field();
        let far = field.join_object()?;
        let positive = clause.comparison().is_positive_join();

        // conditions are resolved against the far side here so that
        // hand-built join clauses compile like normalized ones
        let condition = clause
            .join_condition()
            .map(|inner| inner.normalize(far).compact())
            .unwrap_or_default();

        match field.kind() {
            FieldKind::Join { .. } | FieldKind::JoinWhere { .. } => {
                self.belongs_to(alias, &field, far, &condition, positive, joins)
            }
            FieldKind::JoinThrough { foreign_column, .. }
            | FieldKind::JoinThroughWhere { foreign_column, .. } => {
                let relation = Relation {
                    table: field.table()?,
                    near_column: field.column(),
                    far_column: foreign_column,
                    target_column: foreign_column,
                };
                self.relation(alias, &field, far, &relation, &condition, positive, joins)
            }
            FieldKind::SelfJoin { .. } => {
                let relation = self_relation(&field)?;
                self.relation(alias, &field, far, &relation, &condition, positive, joins)
            }
            FieldKind::HierarchicalSelfJoin { .. } => match clause.comparison() {
                Comparison::HierarchicallyMatches | Comparison::DoesNotHierarchicallyMatch => {
                    self.closure(alias, &field, far, &condition, positive, joins)
                }
                _ => {
                    let relation = self_relation(&field)?;
                    self.relation(alias, &field, far, &relation, &condition, positive, joins)
                }
            },
            FieldKind::String { .. } | FieldKind::Integer { .. } | FieldKind::Boolean => {
                Err(CompileError::NotARelationship {
                    field: field.to_string(),
                })
            }
        }
    }

    /// `near.column = far.column`, optionally with a fixed equality on the
    /// far row.
    fn belongs_to(
        &mut self,
        alias: &str,
        field: &Field,
        far: ObjectKind,
        condition: &Filter,
        positive: bool,
        joins: &mut Vec<Join>,
    ) -> Result<Condition, CompileError> {
        let column = field.column();
        let fixed = field.condition().ok();
        let sub = self.compile_scope(far, condition)?;

        if positive {
            let mut on = vec![JoinOn::columns(alias, column, &sub.alias, column)];
            if let Some(fixed) = fixed {
                on.push(JoinOn::Literal {
                    alias: sub.alias.clone(),
                    column: fixed.column,
                    value: fixed.value,
                });
            }

            joins.push(Join::inner(far.table(), &sub.alias, on));
            joins.extend(sub.joins);

            return Ok(sub.condition);
        }

        let mut predicate = sub.condition;
        if let Some(fixed) = fixed {
            predicate = Condition::and(
                predicate,
                Condition::Literal {
                    alias: sub.alias.clone(),
                    column: fixed.column,
                    value: fixed.value,
                },
            );
        }

        let select = Select {
            alias: sub.alias,
            column,
            table: far.table(),
            joins: sub.joins,
            condition: predicate,
        };

        Ok(self.anti_join(alias, column, far, CteBody::Select(select), joins))
    }

    /// Two hops: `near.column = rel.near_column`, then
    /// `rel.far_column = far.target_column`.
    #[allow(clippy::too_many_arguments)]
    fn relation(
        &mut self,
        alias: &str,
        field: &Field,
        far: ObjectKind,
        relation: &Relation,
        condition: &Filter,
        positive: bool,
        joins: &mut Vec<Join>,
    ) -> Result<Condition, CompileError> {
        let column = field.column();
        let fixed = field.condition().ok();
        let rel_alias = self.alias(relation.table);
        let sub = self.compile_scope(far, condition)?;

        let far_join = Join::inner(
            far.table(),
            &sub.alias,
            vec![JoinOn::columns(
                &rel_alias,
                relation.far_column,
                &sub.alias,
                relation.target_column,
            )],
        );

        if positive {
            let mut on = vec![JoinOn::columns(
                alias,
                column,
                &rel_alias,
                relation.near_column,
            )];
            if let Some(fixed) = fixed {
                on.push(JoinOn::Literal {
                    alias: rel_alias.clone(),
                    column: fixed.column,
                    value: fixed.value,
                });
            }

            joins.push(Join::inner(relation.table, &rel_alias, on));
            joins.push(far_join);
            joins.extend(sub.joins);

            return Ok(sub.condition);
        }

        // the relation table may list one anchor many times; negate over
        // the set of anchors instead of over individual relation rows
        let mut predicate = sub.condition;
        if let Some(fixed) = fixed {
            predicate = Condition::and(
                predicate,
                Condition::Literal {
                    alias: rel_alias.clone(),
                    column: fixed.column,
                    value: fixed.value,
                },
            );
        }

        let mut cte_joins = vec![far_join];
        cte_joins.extend(sub.joins);

        let select = Select {
            alias: rel_alias,
            column: relation.near_column,
            table: relation.table,
            joins: cte_joins,
            condition: predicate,
        };

        Ok(self.anti_join(alias, column, far, CteBody::Select(select), joins))
    }

    /// Recursive closure over a self-relation table, seeded with the rows
    /// satisfying `condition`.
    fn closure(
        &mut self,
        alias: &str,
        field: &Field,
        kind: ObjectKind,
        condition: &Filter,
        positive: bool,
        joins: &mut Vec<Join>,
    ) -> Result<Condition, CompileError> {
        let column = field.column();
        let table = field.table()?;
        let join_column = field.join_column()?;
        let foreign_join_column = field.foreign_join_column()?;

        let sub = self.compile_scope(kind, condition)?;
        let name = self.cte_name(kind.table());
        let step_alias = self.alias(table);

        self.ctes.push(Cte {
            name: name.clone(),
            column,
            body: CteBody::Closure {
                base: Select {
                    alias: sub.alias,
                    column,
                    table: kind.table(),
                    joins: sub.joins,
                    condition: sub.condition,
                },
                table,
                alias: step_alias,
                join_column,
                foreign_join_column,
            },
        });

        let instance = self.alias(&name);
        let on = vec![JoinOn::columns(alias, column, &instance, column)];

        if positive {
            joins.push(Join::inner(name, &instance, on));
            Ok(Condition::True)
        } else {
            joins.push(Join::left(name, &instance, on));
            Ok(Condition::Null {
                alias: instance,
                column,
                negated: false,
            })
        }
    }

    /// Hoist `body` as a CTE, LEFT JOIN it and keep rows without a partner.
    fn anti_join(
        &mut self,
        alias: &str,
        column: &'static str,
        far: ObjectKind,
        body: CteBody,
        joins: &mut Vec<Join>,
    ) -> Condition {
        let name = self.cte_name(far.table());
        self.ctes.push(Cte {
            name: name.clone(),
            column,
            body,
        });

        let instance = self.alias(&name);
        joins.push(Join::left(
            name,
            &instance,
            vec![JoinOn::columns(alias, column, &instance, column)],
        ));

        Condition::Null {
            alias: instance,
            column,
            negated: false,
        }
    }
}

fn self_relation(field: &Field) -> Result<Relation, CompileError> {
    Ok(Relation {
        table: field.table()?,
        near_column: field.join_column()?,
        far_column: field.foreign_join_column()?,
        target_column: field.column(),
    })
}
