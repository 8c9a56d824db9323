//! Fields of [`ObjectKind::Word`]: one sense of a lemma within a notion.

use crate::{
    model::{Field, ObjectKind},
    schema::Inflection,
};

pub const SELECT: &[&str] = &[
    "word_id",
    "notion_id",
    "lemma_id",
    "tag_count",
    "position",
    "group_id",
];

pub const ID: Field = Field::integer(ObjectKind::Word, "word_id");
pub const LEMMA_ID: Field = Field::integer(ObjectKind::Word, "lemma_id");
pub const TAG_COUNT: Field = Field::nullable_integer(ObjectKind::Word, "tag_count");
pub const ADJECTIVE_POSITION: Field = Field::nullable_integer(ObjectKind::Word, "position");

pub const NOTIONS: Field = Field::join(ObjectKind::Word, "notion_id", ObjectKind::Notion);
pub const GROUPS: Field = Field::nullable_join(ObjectKind::Word, "group_id", ObjectKind::Group);

/// Forms of this word's lemma in one inflection category.
#[must_use]
pub const fn forms(inflection: Inflection) -> Field {
    Field::join_through_where(
        ObjectKind::Word,
        "lemma_id",
        ObjectKind::Form,
        "lemmas_forms",
        "form_id",
        "category",
        inflection.as_i64(),
    )
}

pub const SYNONYMS: Field = Field::self_join(
    ObjectKind::Word,
    "word_id",
    "synonymy",
    "word_1_id",
    "word_2_id",
);

pub const ANTONYMS: Field = Field::self_join(
    ObjectKind::Word,
    "word_id",
    "antonymy",
    "antonym_1_id",
    "antonym_2_id",
);

pub const PERTAINYMS: Field = Field::self_join(
    ObjectKind::Word,
    "word_id",
    "pertainymy",
    "noun_id",
    "pertainym_id",
);

pub const ANTI_PERTAINYMS: Field = Field::self_join(
    ObjectKind::Word,
    "word_id",
    "pertainymy",
    "pertainym_id",
    "noun_id",
);
