use crate::{
    db::{
        Database,
        filter::{Filter, FilterError},
        order::Order,
    },
    entity::{self, Entity, Pronunciation},
    error::Error,
    model::{Field, ObjectKind},
    schema::{form, pronunciation},
};
use rusqlite::Row;
use std::cell::OnceCell;

///
/// Form
///

#[derive(Debug)]
pub struct Form {
    db: Database,
    id: i64,
    text: String,
    complexity: i64,
    proper: bool,
    length: i64,

    pronunciations: OnceCell<Vec<Pronunciation>>,
}

impl Entity for Form {
    const KIND: ObjectKind = ObjectKind::Form;
    const SELECT: &'static [&'static str] = form::SELECT;
    const ID: Field = form::ID;

    fn from_row(db: &Database, row: &Row<'_>) -> Result<Self, Error> {
        Ok(Self {
            db: db.clone(),
            id: entity::column(row, Self::KIND, 0)?,
            text: entity::column(row, Self::KIND, 1)?,
            complexity: entity::column(row, Self::KIND, 2)?,
            proper: entity::column(row, Self::KIND, 3)?,
            length: entity::column(row, Self::KIND, 4)?,
            pronunciations: OnceCell::new(),
        })
    }

    fn id(&self) -> i64 {
        self.id
    }
}

impl Form {
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Number of space-separated tokens.
    #[must_use]
    pub const fn complexity(&self) -> i64 {
        self.complexity
    }

    #[must_use]
    pub const fn is_proper(&self) -> bool {
        self.proper
    }

    #[must_use]
    pub const fn length(&self) -> i64 {
        self.length
    }

    pub fn pronunciations(&self) -> Result<&[Pronunciation], Error> {
        let pronunciations = entity::hydrate(&self.pronunciations, Self::KIND, "pronunciations", || {
            entity::load_many(
                &self.db,
                self.identity_filter(),
                Order::ascending(pronunciation::ID),
            )
        })?;

        Ok(pronunciations.as_slice())
    }

    /// Forms spelled exactly `text`.
    pub fn text_filter(text: &str) -> Result<Filter, FilterError> {
        form::TEXT.eq(text)
    }
}
