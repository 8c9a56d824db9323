use crate::{
    db::{
        binding::Binding,
        filter::{Filter, Operand, tests::property::arb_filter},
        order::Order,
        statement::{CompileError, Statement},
    },
    model::ObjectKind,
    schema::{Inflection, PartOfSpeech, form, notion, word},
};
use proptest::prelude::*;
use std::collections::BTreeSet;

fn compile(kind: ObjectKind, select: &[&str], filter: &Filter) -> Statement {
    let filter = filter.normalize(kind).compact();

    Statement::compile(kind, select, &filter, &Order::Random, None).unwrap()
}

// Values of every value-bearing comparison in left-to-right order,
// descending into join conditions in place.
fn traversal_values(filter: &Filter, out: &mut Vec<Binding>) {
    match filter {
        Filter::Empty => {}
        Filter::Clause(clause) => match clause.operand() {
            Operand::Filter(inner) => traversal_values(inner, out),
            operand => out.extend(Binding::from_operand(operand)),
        },
        Filter::Group { children, .. } => {
            for child in children {
                traversal_values(child, out);
            }
        }
    }
}

// ---- scalar ----

#[test]
fn scalar_comparison_shape() {
    let filter = word::TAG_COUNT.gt(3).unwrap();
    let filter = filter.normalize(ObjectKind::Word).compact();
    let statement = Statement::compile(
        ObjectKind::Word,
        &["word_id", "tag_count"],
        &filter,
        &Order::Random,
        Some(5),
    )
    .unwrap();

    assert_eq!(
        statement.sql(),
        "SELECT words_1.word_id, words_1.tag_count FROM words AS words_1 \
         WHERE words_1.tag_count > ? GROUP BY words_1.word_id ORDER BY RANDOM() LIMIT 5"
    );
    assert_eq!(statement.bindings(), &[Binding::Integer(3)]);
}

#[test]
fn empty_filter_has_no_where_clause() {
    let statement = compile(ObjectKind::Form, form::SELECT, &Filter::Empty);

    assert!(!statement.sql().contains("WHERE"));
    assert!(statement.sql().contains("GROUP BY forms_1.form_id"));
}

#[test]
fn null_checks_and_patterns() {
    let filter = word::TAG_COUNT.is_not_null().unwrap() & word::ADJECTIVE_POSITION.is_null().unwrap();
    let statement = compile(ObjectKind::Word, &["word_id"], &filter);

    assert!(statement.sql().contains(
        "WHERE words_1.tag_count IS NOT NULL AND words_1.position IS NULL GROUP BY"
    ));
    assert!(statement.bindings().is_empty());

    let filter = form::TEXT.not_like("%ly").unwrap();
    let statement = compile(ObjectKind::Form, &["form_id"], &filter);
    assert!(statement.sql().contains("WHERE forms_1.form NOT LIKE ?"));
}

#[test]
fn booleans_bind_as_integers() {
    let statement = compile(ObjectKind::Form, &["form_id"], &form::PROPER.eq(true).unwrap());

    assert_eq!(statement.bindings(), &[Binding::Integer(1)]);
}

// ---- belongs-to ----

#[test]
fn belongs_to_match_is_an_inner_join() {
    let filter = word::NOTIONS
        .matches(notion::PART_OF_SPEECH.eq(PartOfSpeech::Verb).unwrap())
        .unwrap();
    let filter = filter.normalize(ObjectKind::Word).compact();
    let statement = Statement::compile(
        ObjectKind::Word,
        &["word_id"],
        &filter,
        &Order::ascending(word::TAG_COUNT),
        None,
    )
    .unwrap();

    assert_eq!(
        statement.sql(),
        "SELECT words_1.word_id FROM words AS words_1 \
         INNER JOIN notions AS notions_2 ON words_1.notion_id = notions_2.notion_id \
         WHERE notions_2.part_of_speech = ? GROUP BY words_1.word_id ORDER BY words_1.tag_count ASC"
    );
    assert_eq!(statement.bindings(), &[Binding::Integer(3)]);
}

#[test]
fn belongs_to_non_match_uses_cte_and_left_join() {
    let filter = word::NOTIONS
        .does_not_match(notion::PART_OF_SPEECH.eq(PartOfSpeech::Verb).unwrap())
        .unwrap();
    let statement = compile(ObjectKind::Word, &["word_id"], &filter);

    assert_eq!(
        statement.sql(),
        "WITH RECURSIVE notions_tree_1(notion_id) AS (SELECT notions_2.notion_id \
         FROM notions AS notions_2 WHERE notions_2.part_of_speech = ?) \
         SELECT words_1.word_id FROM words AS words_1 \
         LEFT JOIN notions_tree_1 AS notions_tree_1_3 ON words_1.notion_id = notions_tree_1_3.notion_id \
         WHERE notions_tree_1_3.notion_id IS NULL GROUP BY words_1.word_id ORDER BY RANDOM()"
    );
    assert_eq!(statement.cte_count(), 1);
}

// ---- through / self ----

#[test]
fn self_join_match_joins_relation_then_far_table() {
    let filter = word::SYNONYMS.matches(word::ID.eq(2).unwrap()).unwrap();
    let statement = compile(ObjectKind::Word, &["word_id"], &filter);

    assert_eq!(
        statement.sql(),
        "SELECT words_1.word_id FROM words AS words_1 \
         INNER JOIN synonymy AS synonymy_2 ON words_1.word_id = synonymy_2.word_1_id \
         INNER JOIN words AS words_3 ON synonymy_2.word_2_id = words_3.word_id \
         WHERE words_3.word_id = ? GROUP BY words_1.word_id ORDER BY RANDOM()"
    );
}

#[test]
fn conditioned_through_non_match_negates_over_anchors() {
    let filter = word::forms(Inflection::Plural)
        .does_not_match(form::TEXT.eq("geese").unwrap())
        .unwrap();
    let statement = compile(ObjectKind::Word, &["word_id"], &filter);

    assert_eq!(
        statement.sql(),
        "WITH RECURSIVE forms_tree_1(lemma_id) AS (SELECT lemmas_forms_2.lemma_id \
         FROM lemmas_forms AS lemmas_forms_2 \
         INNER JOIN forms AS forms_3 ON lemmas_forms_2.form_id = forms_3.form_id \
         WHERE forms_3.form = ? AND lemmas_forms_2.category = 1) \
         SELECT words_1.word_id FROM words AS words_1 \
         LEFT JOIN forms_tree_1 AS forms_tree_1_4 ON words_1.lemma_id = forms_tree_1_4.lemma_id \
         WHERE forms_tree_1_4.lemma_id IS NULL GROUP BY words_1.word_id ORDER BY RANDOM()"
    );
    assert_eq!(statement.bindings(), &[Binding::String("geese".to_string())]);
}

#[test]
fn conditioned_through_match_puts_literal_on_relation_join() {
    let filter = word::forms(Inflection::Plural)
        .matches(form::TEXT.eq("geese").unwrap())
        .unwrap();
    let statement = compile(ObjectKind::Word, &["word_id"], &filter);

    assert!(statement.sql().contains(
        "INNER JOIN lemmas_forms AS lemmas_forms_2 ON words_1.lemma_id = lemmas_forms_2.lemma_id \
         AND lemmas_forms_2.category = 1"
    ));
    assert!(!statement.sql().contains("category = ?"));
}

// ---- hierarchical ----

#[test]
fn hierarchical_match_is_a_recursive_cte() {
    let filter = notion::FULL_HYPERNYMS
        .hierarchically_matches(notion::ID.eq(3).unwrap())
        .unwrap();
    let statement = compile(ObjectKind::Notion, &["notion_id"], &filter);

    assert_eq!(
        statement.sql(),
        "WITH RECURSIVE notions_tree_1(notion_id) AS (SELECT notions_2.notion_id \
         FROM notions AS notions_2 WHERE notions_2.notion_id = ? \
         UNION SELECT hypernymy_3.hyponym_id FROM hypernymy AS hypernymy_3 \
         INNER JOIN notions_tree_1 ON hypernymy_3.hypernym_id = notions_tree_1.notion_id) \
         SELECT notions_1.notion_id FROM notions AS notions_1 \
         INNER JOIN notions_tree_1 AS notions_tree_1_4 ON notions_1.notion_id = notions_tree_1_4.notion_id \
         GROUP BY notions_1.notion_id ORDER BY RANDOM()"
    );
}

#[test]
fn hierarchical_non_match_null_checks_the_closure() {
    let filter = notion::FULL_HYPONYMS
        .does_not_hierarchically_match(notion::ID.eq(1).unwrap())
        .unwrap();
    let statement = compile(ObjectKind::Notion, &["notion_id"], &filter);

    assert!(statement.sql().contains("LEFT JOIN notions_tree_1 AS notions_tree_1_4"));
    assert!(statement.sql().contains("WHERE notions_tree_1_4.notion_id IS NULL"));
}

#[test]
fn direct_match_on_hierarchical_field_is_one_hop() {
    let filter = notion::FULL_HYPERNYMS.matches(notion::ID.eq(3).unwrap()).unwrap();
    let statement = compile(ObjectKind::Notion, &["notion_id"], &filter);

    assert_eq!(statement.cte_count(), 0);
    assert!(statement.sql().contains("INNER JOIN hypernymy AS hypernymy_2"));
}

// ---- hoisting and merging ----

#[test]
fn nested_ctes_are_hoisted_dependencies_first() {
    // words whose notion is not a (transitive) hyponym of notion 1
    let filter = word::NOTIONS
        .does_not_match(
            notion::FULL_HYPERNYMS
                .hierarchically_matches(notion::ID.eq(1).unwrap())
                .unwrap(),
        )
        .unwrap();
    let statement = compile(ObjectKind::Word, &["word_id"], &filter);
    let sql = statement.sql();

    assert_eq!(statement.cte_count(), 2);
    assert_eq!(sql.matches("WITH").count(), 1);

    let closure = sql.find("notions_tree_1(notion_id) AS").unwrap();
    let outer = sql.find("notions_tree_2(notion_id) AS").unwrap();
    assert!(closure < outer);
}

#[test]
fn sibling_matches_compile_to_one_join() {
    let filter = word::SYNONYMS.matches(word::ID.eq(1).unwrap()).unwrap()
        | word::SYNONYMS.matches(word::ID.eq(2).unwrap()).unwrap();
    let statement = compile(ObjectKind::Word, &["word_id"], &filter);

    assert_eq!(statement.sql().matches("JOIN synonymy").count(), 1);
    assert!(statement.sql().contains("(words_3.word_id = ? OR words_3.word_id = ?)"));
    assert_eq!(
        statement.bindings(),
        &[Binding::Integer(1), Binding::Integer(2)]
    );
}

#[test]
fn aliases_and_cte_names_are_unique() {
    let filter = Filter::and(vec![
        word::SYNONYMS.does_not_match(form::TEXT.eq("a").unwrap()).unwrap(),
        word::ANTONYMS.does_not_match(form::TEXT.eq("b").unwrap()).unwrap(),
        notion::FULL_HYPERNYMS
            .hierarchically_matches(notion::ID.eq(1).unwrap())
            .unwrap(),
    ]);
    let statement = compile(ObjectKind::Word, &["word_id"], &filter);

    let aliases: BTreeSet<_> = statement.tables().iter().map(|t| t.alias.as_str()).collect();
    assert_eq!(aliases.len(), statement.tables().len());
    assert!(statement.cte_count() >= 3);
}

// ---- validation ----

#[test]
fn foreign_sort_field_is_rejected() {
    let err = Statement::compile(
        ObjectKind::Word,
        word::SELECT,
        &Filter::Empty,
        &Order::ascending(form::LENGTH),
        None,
    )
    .unwrap_err();

    assert!(matches!(err, CompileError::ForeignSortField { .. }));
}

#[test]
fn unnormalized_filter_is_rejected() {
    let err = Statement::compile(
        ObjectKind::Word,
        word::SELECT,
        &form::TEXT.eq("happy").unwrap(),
        &Order::Random,
        None,
    )
    .unwrap_err();

    assert!(matches!(err, CompileError::ForeignField { .. }));
}

proptest! {
    #[test]
    fn placeholders_align_with_bindings(filter in arb_filter()) {
        let normalized = filter.normalize(ObjectKind::Word).compact();
        let statement =
            Statement::compile(ObjectKind::Word, word::SELECT, &normalized, &Order::Random, None)
                .unwrap();

        let mut expected = Vec::new();
        traversal_values(&normalized, &mut expected);

        prop_assert_eq!(statement.sql().matches('?').count(), statement.bindings().len());
        prop_assert_eq!(statement.bindings().len(), expected.len());

        if statement.cte_count() == 0 {
            prop_assert_eq!(statement.bindings(), expected.as_slice());
        } else {
            let mut actual = statement.bindings().to_vec();
            actual.sort_by_key(ToString::to_string);
            expected.sort_by_key(ToString::to_string);
            prop_assert_eq!(actual, expected);
        }
    }
}
