//! Fields of [`ObjectKind::Form`]: one spelled-out string.

use crate::{
    model::{Field, ObjectKind},
    schema::Inflection,
};

pub const SELECT: &[&str] = &["form_id", "form", "complexity", "proper", "length"];

pub const ID: Field = Field::integer(ObjectKind::Form, "form_id");
pub const TEXT: Field = Field::string(ObjectKind::Form, "form");
pub const COMPLEXITY: Field = Field::integer(ObjectKind::Form, "complexity");
pub const PROPER: Field = Field::boolean(ObjectKind::Form, "proper");
pub const LENGTH: Field = Field::integer(ObjectKind::Form, "length");

pub const PRONUNCIATIONS: Field = Field::join_through(
    ObjectKind::Form,
    "form_id",
    ObjectKind::Pronunciation,
    "forms_pronunciations",
    "pronunciation_id",
);

/// Words whose lemma has this form in one inflection category.
#[must_use]
pub const fn words(inflection: Inflection) -> Field {
    Field::join_through_where(
        ObjectKind::Form,
        "form_id",
        ObjectKind::Word,
        "lemmas_forms",
        "lemma_id",
        "category",
        inflection.as_i64(),
    )
}
