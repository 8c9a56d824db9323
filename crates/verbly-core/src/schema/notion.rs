//! Fields of [`ObjectKind::Notion`]: one WordNet synset.

use crate::model::{Field, ObjectKind};

const fn related(table: &'static str, join_column: &'static str, foreign: &'static str) -> Field {
    Field::self_join(ObjectKind::Notion, "notion_id", table, join_column, foreign)
}

const fn full(table: &'static str, join_column: &'static str, foreign: &'static str) -> Field {
    Field::hierarchical_self_join(ObjectKind::Notion, "notion_id", table, join_column, foreign)
}

pub const SELECT: &[&str] = &["notion_id", "part_of_speech", "wnid", "images"];

pub const ID: Field = Field::integer(ObjectKind::Notion, "notion_id");
pub const PART_OF_SPEECH: Field = Field::integer(ObjectKind::Notion, "part_of_speech");
pub const WNID: Field = Field::nullable_integer(ObjectKind::Notion, "wnid");
pub const NUM_OF_IMAGES: Field = Field::nullable_integer(ObjectKind::Notion, "images");

pub const WORDS: Field = Field::join(ObjectKind::Notion, "notion_id", ObjectKind::Word);

// Hypernymy
pub const HYPERNYMS: Field = related("hypernymy", "hyponym_id", "hypernym_id");
pub const HYPONYMS: Field = related("hypernymy", "hypernym_id", "hyponym_id");
pub const FULL_HYPERNYMS: Field = full("hypernymy", "hyponym_id", "hypernym_id");
pub const FULL_HYPONYMS: Field = full("hypernymy", "hypernym_id", "hyponym_id");

// Instantiation
pub const CLASSES: Field = related("instantiation", "instance_id", "class_id");
pub const INSTANCES: Field = related("instantiation", "class_id", "instance_id");

// Meronymy
pub const MEMBER_MERONYMS: Field = related("member_meronymy", "holonym_id", "meronym_id");
pub const MEMBER_HOLONYMS: Field = related("member_meronymy", "meronym_id", "holonym_id");
pub const FULL_MEMBER_MERONYMS: Field = full("member_meronymy", "holonym_id", "meronym_id");
pub const FULL_MEMBER_HOLONYMS: Field = full("member_meronymy", "meronym_id", "holonym_id");

pub const PART_MERONYMS: Field = related("part_meronymy", "holonym_id", "meronym_id");
pub const PART_HOLONYMS: Field = related("part_meronymy", "meronym_id", "holonym_id");
pub const FULL_PART_MERONYMS: Field = full("part_meronymy", "holonym_id", "meronym_id");
pub const FULL_PART_HOLONYMS: Field = full("part_meronymy", "meronym_id", "holonym_id");

pub const SUBSTANCE_MERONYMS: Field = related("substance_meronymy", "holonym_id", "meronym_id");
pub const SUBSTANCE_HOLONYMS: Field = related("substance_meronymy", "meronym_id", "holonym_id");
pub const FULL_SUBSTANCE_MERONYMS: Field = full("substance_meronymy", "holonym_id", "meronym_id");
pub const FULL_SUBSTANCE_HOLONYMS: Field = full("substance_meronymy", "meronym_id", "holonym_id");

// Verb relations
pub const ENTAILMENTS: Field = related("entailment", "given_id", "entailment_id");
pub const ENTAILED_BY: Field = related("entailment", "entailment_id", "given_id");
pub const CAUSES: Field = related("causality", "effect_id", "cause_id");
pub const EFFECTS: Field = related("causality", "cause_id", "effect_id");

// Adjective relations
pub const SIMILAR_ADJECTIVES: Field = related("similarity", "adjective_1_id", "adjective_2_id");
