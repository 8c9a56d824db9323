use crate::{
    db::filter::{Clause, Comparison, Connective, Filter, Operand},
    model::{Field, ObjectKind},
    schema::route,
};
use std::collections::HashMap;

impl Filter {
    ///
    /// Rewrite every clause relative to `target`.
    ///
    /// A clause on a field of another kind is wrapped in the relationship
    /// leading from `target` towards that kind, and the wrapper's inner
    /// condition is normalized against the far side. Sibling join clauses
    /// on the same field are merged so the compiler emits one join each.
    ///
    /// Normalization is idempotent.
    ///
    #[must_use]
    pub fn normalize(&self, target: ObjectKind) -> Self {
        match self {
            Self::Empty => Self::Empty,
            Self::Clause(clause) => normalize_clause(clause, target),
            Self::Group {
                connective,
                children,
            } => normalize_group(*connective, children, target),
        }
    }

    /// Drop empty nodes; a group left without children becomes empty.
    ///
    /// Repeats bottom-up until nothing changes, so a group whose children
    /// all collapse is itself removed from its parent.
    #[must_use]
    pub fn compact(&self) -> Self {
        match self {
            Self::Empty => Self::Empty,
            Self::Clause(clause) => match &clause.operand {
                Operand::Filter(inner) => Self::Clause(Clause {
                    field: clause.field,
                    comparison: clause.comparison,
                    operand: Operand::Filter(Box::new(inner.compact())),
                }),
                _ => Self::Clause(clause.clone()),
            },
            Self::Group {
                connective,
                children,
            } => {
                let children: Vec<_> = children
                    .iter()
                    .map(Self::compact)
                    .filter(|child| !child.is_empty())
                    .collect();

                if children.is_empty() {
                    Self::Empty
                } else {
                    Self::Group {
                        connective: *connective,
                        children,
                    }
                }
            }
        }
    }
}

fn normalize_clause(clause: &Clause, target: ObjectKind) -> Filter {
    let Some((via, far)) = route(target, clause.field.object()) else {
        return Filter::Clause(normalize_join_condition(clause));
    };

    let inner = Filter::Clause(clause.clone()).normalize(far);

    Filter::Clause(Clause {
        field: via,
        comparison: Comparison::Matches,
        operand: Operand::Filter(Box::new(inner)),
    })
}

// A join clause already on the target kind still needs its condition
// resolved against the far side.
fn normalize_join_condition(clause: &Clause) -> Clause {
    match (&clause.operand, clause.field.join_object()) {
        (Operand::Filter(inner), Ok(far)) => Clause {
            field: clause.field,
            comparison: clause.comparison,
            operand: Operand::Filter(Box::new(inner.normalize(far))),
        },
        _ => clause.clone(),
    }
}

///
/// Slot
/// Output position of one normalized child; merged joins collect every
/// inner condition at the position of their first occurrence.
///

enum Slot {
    Filter(Filter),
    Join {
        field: Field,
        far: ObjectKind,
        comparison: Comparison,
        conditions: Vec<Filter>,
    },
}

impl Slot {
    fn into_filter(self, parent: Connective) -> Filter {
        match self {
            Self::Filter(filter) => filter,
            Self::Join {
                field,
                far,
                comparison,
                mut conditions,
            } => {
                let condition = if conditions.len() == 1 {
                    conditions.remove(0)
                } else {
                    let connective = if comparison.is_positive_join() {
                        parent
                    } else {
                        parent.flip()
                    };

                    // the conditions may now share joins of their own
                    Filter::Group {
                        connective,
                        children: conditions,
                    }
                    .normalize(far)
                };

                Filter::Clause(Clause {
                    field,
                    comparison,
                    operand: Operand::Filter(Box::new(condition)),
                })
            }
        }
    }
}

fn normalize_group(connective: Connective, children: &[Filter], target: ObjectKind) -> Filter {
    let mut slots: Vec<Slot> = Vec::with_capacity(children.len());
    let mut merged: HashMap<(Field, Comparison), usize> = HashMap::new();

    for child in children {
        let normalized = child.normalize(target);

        let Some((field, far, comparison, condition)) = merge_candidate(&normalized, connective)
        else {
            slots.push(Slot::Filter(normalized));
            continue;
        };

        if let Some(&index) = merged.get(&(field, comparison)) {
            if let Slot::Join { conditions, .. } = &mut slots[index] {
                conditions.push(condition);
            }
        } else {
            merged.insert((field, comparison), slots.len());
            slots.push(Slot::Join {
                field,
                far,
                comparison,
                conditions: vec![condition],
            });
        }
    }

    Filter::Group {
        connective,
        children: slots
            .into_iter()
            .map(|slot| slot.into_filter(connective))
            .collect(),
    }
}

// Join clauses eligible for merging under `parent`. Transitive closures
// only merge where the union of conditions preserves the closure.
fn merge_candidate(
    filter: &Filter,
    parent: Connective,
) -> Option<(Field, ObjectKind, Comparison, Filter)> {
    let clause = filter.as_clause()?;
    let condition = clause.join_condition()?;
    let far = clause.field.join_object().ok()?;

    let mergeable = match clause.comparison {
        Comparison::Matches | Comparison::DoesNotMatch => true,
        Comparison::HierarchicallyMatches => parent == Connective::Or,
        Comparison::DoesNotHierarchicallyMatch => parent == Connective::And,
        _ => false,
    };

    mergeable.then(|| (clause.field, far, clause.comparison, condition.clone()))
}

///
/// TESTS
///
