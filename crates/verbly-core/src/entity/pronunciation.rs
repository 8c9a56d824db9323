use crate::{
    db::{
        Database,
        filter::{Filter, FilterError},
        order::Order,
    },
    entity::{self, Entity, Form},
    error::Error,
    model::{Field, ObjectKind},
    schema::{form, pronunciation},
};
use rusqlite::Row;
use std::cell::OnceCell;

///
/// Pronunciation
///
/// One CMUDICT transcription. `rhyme` is the tail from the last stressed
/// vowel onwards and `prerhyme` the consonants right before it; both are
/// absent when the transcription has no stressed vowel.
///

#[derive(Debug)]
pub struct Pronunciation {
    db: Database,
    id: i64,
    phonemes: String,
    prerhyme: Option<String>,
    rhyme: Option<String>,
    syllables: i64,
    stress: String,

    forms: OnceCell<Vec<Form>>,
}

impl Entity for Pronunciation {
    const KIND: ObjectKind = ObjectKind::Pronunciation;
    const SELECT: &'static [&'static str] = pronunciation::SELECT;
    const ID: Field = pronunciation::ID;

    fn from_row(db: &Database, row: &Row<'_>) -> Result<Self, Error> {
        Ok(Self {
            db: db.clone(),
            id: entity::column(row, Self::KIND, 0)?,
            phonemes: entity::column(row, Self::KIND, 1)?,
            prerhyme: entity::column(row, Self::KIND, 2)?,
            rhyme: entity::column(row, Self::KIND, 3)?,
            syllables: entity::column(row, Self::KIND, 4)?,
            stress: entity::column(row, Self::KIND, 5)?,
            forms: OnceCell::new(),
        })
    }

    fn id(&self) -> i64 {
        self.id
    }
}

impl Pronunciation {
    #[must_use]
    pub fn phonemes(&self) -> &str {
        &self.phonemes
    }

    #[must_use]
    pub fn prerhyme(&self) -> Option<&str> {
        self.prerhyme.as_deref()
    }

    #[must_use]
    pub fn rhyme(&self) -> Option<&str> {
        self.rhyme.as_deref()
    }

    #[must_use]
    pub const fn num_of_syllables(&self) -> i64 {
        self.syllables
    }

    /// One digit per syllable: `1` primary, `2` secondary, `0` unstressed.
    #[must_use]
    pub fn stress(&self) -> &str {
        &self.stress
    }

    pub fn forms(&self) -> Result<&[Form], Error> {
        let forms = entity::hydrate(&self.forms, Self::KIND, "forms", || {
            entity::load_many(&self.db, self.identity_filter(), Order::ascending(form::ID))
        })?;

        Ok(forms.as_slice())
    }

    /// Pronunciations sharing this rhyme but not this onset.
    ///
    /// `None` when this transcription has no rhyme to match on.
    pub fn rhymes_filter(&self) -> Result<Option<Filter>, FilterError> {
        let Some(rhyme) = self.rhyme.as_deref() else {
            return Ok(None);
        };

        let mut filter = pronunciation::RHYME.eq(rhyme)? & pronunciation::ID.ne(self.id)?;
        if let Some(prerhyme) = self.prerhyme.as_deref() {
            filter.push(pronunciation::PRERHYME.ne(prerhyme)?);
        }

        Ok(Some(filter))
    }
}
