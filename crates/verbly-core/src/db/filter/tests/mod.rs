
use crate::{
    db::filter::{Comparison, Connective, Filter, FilterError, Operand},
    model::ObjectKind,
    schema::{PartOfSpeech, form, notion, part, word},
};

// ---- construction ----

#[test]
fn builders_pick_comparison_from_flavour() {
    let text = form::TEXT.eq("happy").unwrap();
    let count = word::TAG_COUNT.eq(3).unwrap();
    let proper = form::PROPER.eq(true).unwrap();

    assert_eq!(text.as_clause().unwrap().comparison(), Comparison::StringEquals);
    assert_eq!(count.as_clause().unwrap().comparison(), Comparison::IntEquals);
    assert_eq!(proper.as_clause().unwrap().comparison(), Comparison::BooleanEquals);
}

#[test]
fn boolean_inequality_flips_the_operand() {
    let filter = form::PROPER.ne(true).unwrap();
    let clause = filter.as_clause().unwrap();

    assert_eq!(clause.comparison(), Comparison::BooleanEquals);
    assert_eq!(clause.operand(), &Operand::Boolean(false));
}

#[test]
fn schema_enums_are_integer_operands() {
    let filter = notion::PART_OF_SPEECH.eq(PartOfSpeech::Verb).unwrap();

    assert_eq!(filter.as_clause().unwrap().operand(), &Operand::Integer(3));
}

#[test]
fn null_checks_require_a_nullable_field() {
    assert!(word::TAG_COUNT.is_null().is_ok());
    assert!(word::GROUPS.is_not_null().is_ok());

    let err = word::ID.is_null().unwrap_err();
    assert!(matches!(
        err,
        FilterError::IncompatibleComparison {
            comparison: Comparison::IsNull,
            ..
        }
    ));
}

#[test]
fn operand_shape_is_checked() {
    let err = form::TEXT.eq(4).unwrap_err();

    assert_eq!(
        err,
        FilterError::OperandMismatch {
            field: "form.form".to_string(),
            comparison: Comparison::StringEquals,
            expected: "string",
            found: "integer",
        }
    );
}

#[test]
fn ordering_and_patterns_are_flavour_bound() {
    assert!(form::TEXT.lt(3).is_err());
    assert!(word::TAG_COUNT.like("a%").is_err());
    assert!(part::ROLE.not_like("Agent%").is_ok());
    assert!(word::SYNONYMS.eq(1).is_err());
}

#[test]
fn hierarchical_comparisons_need_a_hierarchical_field() {
    let condition = notion::WNID.eq(1).unwrap();

    assert!(notion::HYPERNYMS.hierarchically_matches(condition.clone()).is_err());
    assert!(notion::FULL_HYPERNYMS.hierarchically_matches(condition.clone()).is_ok());
    assert!(notion::FULL_HYPERNYMS.matches(condition.clone()).is_ok());
    assert!(word::TAG_COUNT.matches(condition).is_err());
}

#[test]
fn general_constructor_rejects_join_comparison_with_scalar_operand() {
    let err = Filter::new(word::SYNONYMS, Comparison::Matches, 5).unwrap_err();

    assert!(matches!(err, FilterError::OperandMismatch { .. }));
}

// ---- composition ----

#[test]
fn and_extends_same_polarity_group() {
    let a = word::ID.eq(1).unwrap();
    let b = word::ID.eq(2).unwrap();
    let c = word::ID.eq(3).unwrap();

    let filter = a.clone() & b.clone() & c.clone();

    assert_eq!(filter, Filter::and(vec![a, b, c]));
}

#[test]
fn opposite_polarity_wraps_the_group() {
    let a = word::ID.eq(1).unwrap();
    let b = word::ID.eq(2).unwrap();
    let c = word::ID.eq(3).unwrap();

    let filter = (a.clone() | b.clone()) & c.clone();

    assert_eq!(filter, Filter::and(vec![Filter::or(vec![a, b]), c]));
}

#[test]
fn empty_is_neutral_for_composition() {
    let a = word::ID.eq(1).unwrap();

    assert_eq!(Filter::empty() & a.clone(), a);
    assert_eq!(Filter::empty() | a.clone(), a);
}

#[test]
fn push_appends_to_groups() {
    let mut filter = Filter::group(Connective::Or);
    filter.push(word::ID.eq(1).unwrap());
    filter.push(word::ID.eq(2).unwrap());

    assert_eq!(
        filter,
        Filter::or(vec![word::ID.eq(1).unwrap(), word::ID.eq(2).unwrap()])
    );

    let mut single = word::ID.eq(1).unwrap();
    single.push(word::ID.eq(2).unwrap());
    assert!(matches!(
        single,
        Filter::Group {
            connective: Connective::And,
            ..
        }
    ));
}

// ---- negation ----

#[test]
fn scalar_negation_pairs() {
    let cases = [
        (word::TAG_COUNT.eq(1).unwrap(), Comparison::IntDoesNotEqual),
        (word::TAG_COUNT.ge(1).unwrap(), Comparison::IntIsLessThan),
        (word::TAG_COUNT.gt(1).unwrap(), Comparison::IntIsAtMost),
        (word::TAG_COUNT.is_null().unwrap(), Comparison::IsNotNull),
        (form::TEXT.like("a%").unwrap(), Comparison::StringIsNotLike),
    ];

    for (filter, expected) in cases {
        assert_eq!((!filter).as_clause().unwrap().comparison(), expected);
    }
}

#[test]
fn join_negation_keeps_inner_condition() {
    let inner = form::TEXT.eq("happy").unwrap();
    let filter = word::SYNONYMS.matches(inner.clone()).unwrap();

    let negated = !filter;
    let clause = negated.as_clause().unwrap();

    assert_eq!(clause.comparison(), Comparison::DoesNotMatch);
    assert_eq!(clause.join_condition(), Some(&inner));
}

#[test]
fn group_negation_flips_connective() {
    let a = word::ID.eq(1).unwrap();
    let b = word::ID.eq(2).unwrap();

    assert_eq!(!(a.clone() & b.clone()), Filter::or(vec![!a, !b]));
}

// ---- normalization boundary ----

#[test]
fn normalized_tree_only_references_target_fields_at_top() {
    let filter = form::TEXT.eq("happy").unwrap() & notion::WNID.eq(9).unwrap();
    let Filter::Group { children, .. } = filter.normalize(ObjectKind::Word) else {
        panic!("expected group");
    };

    for child in children {
        assert_eq!(child.as_clause().unwrap().field().object(), ObjectKind::Word);
    }
}
