//! Fields of [`ObjectKind::Pronunciation`]: one CMUDICT transcription.

use crate::model::{Field, ObjectKind};

pub const SELECT: &[&str] = &[
    "pronunciation_id",
    "phonemes",
    "prerhyme",
    "rhyme",
    "syllables",
    "stress",
];

pub const ID: Field = Field::integer(ObjectKind::Pronunciation, "pronunciation_id");
pub const PHONEMES: Field = Field::string(ObjectKind::Pronunciation, "phonemes");
pub const PRERHYME: Field = Field::nullable_string(ObjectKind::Pronunciation, "prerhyme");
pub const RHYME: Field = Field::nullable_string(ObjectKind::Pronunciation, "rhyme");
pub const NUM_OF_SYLLABLES: Field = Field::integer(ObjectKind::Pronunciation, "syllables");
pub const STRESS: Field = Field::string(ObjectKind::Pronunciation, "stress");

pub const FORMS: Field = Field::join_through(
    ObjectKind::Pronunciation,
    "pronunciation_id",
    ObjectKind::Form,
    "forms_pronunciations",
    "form_id",
);
