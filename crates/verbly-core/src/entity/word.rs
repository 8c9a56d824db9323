use crate::{
    db::{
        Database,
        filter::{Filter, FilterError},
        order::Order,
    },
    entity::{self, Entity, Form, Group, Notion},
    error::Error,
    model::{Field, ObjectKind},
    schema::{Inflection, form, group, notion, word},
};
use rusqlite::Row;
use std::cell::OnceCell;

///
/// Word
///
/// One sense of a lemma: the pairing of a lemma with a notion.
///

#[derive(Debug)]
pub struct Word {
    db: Database,
    id: i64,
    notion_id: i64,
    lemma_id: i64,
    tag_count: Option<i64>,
    position: Option<i64>,
    group_id: Option<i64>,

    notion: OnceCell<Notion>,
    group: OnceCell<Option<Group>>,
    inflections: [OnceCell<Vec<Form>>; Inflection::COUNT],
}

impl Entity for Word {
    const KIND: ObjectKind = ObjectKind::Word;
    const SELECT: &'static [&'static str] = word::SELECT;
    const ID: Field = word::ID;

    fn from_row(db: &Database, row: &Row<'_>) -> Result<Self, Error> {
        Ok(Self {
            db: db.clone(),
            id: entity::column(row, Self::KIND, 0)?,
            notion_id: entity::column(row, Self::KIND, 1)?,
            lemma_id: entity::column(row, Self::KIND, 2)?,
            tag_count: entity::column(row, Self::KIND, 3)?,
            position: entity::column(row, Self::KIND, 4)?,
            group_id: entity::column(row, Self::KIND, 5)?,
            notion: OnceCell::new(),
            group: OnceCell::new(),
            inflections: std::array::from_fn(|_| OnceCell::new()),
        })
    }

    fn id(&self) -> i64 {
        self.id
    }
}

impl Word {
    #[must_use]
    pub const fn notion_id(&self) -> i64 {
        self.notion_id
    }

    #[must_use]
    pub const fn lemma_id(&self) -> i64 {
        self.lemma_id
    }

    /// Sense frequency in the tagged corpus, when recorded.
    #[must_use]
    pub const fn tag_count(&self) -> Option<i64> {
        self.tag_count
    }

    /// Syntactic position restriction; adjectives only.
    #[must_use]
    pub const fn adjective_position(&self) -> Option<i64> {
        self.position
    }

    #[must_use]
    pub const fn group_id(&self) -> Option<i64> {
        self.group_id
    }

    // ------------------------------------------------------------------
    // Relationships
    // ------------------------------------------------------------------

    pub fn notion(&self) -> Result<&Notion, Error> {
        entity::hydrate(&self.notion, Self::KIND, "notion", || {
            entity::load_one(&self.db, notion::ID.eq(self.notion_id))
        })
    }

    /// The verb group this word belongs to; `None` for words outside VerbNet.
    pub fn group(&self) -> Result<Option<&Group>, Error> {
        let group = entity::hydrate(&self.group, Self::KIND, "group", || {
            self.group_id
                .map(|id| entity::load_one(&self.db, group::ID.eq(id)))
                .transpose()
        })?;

        Ok(group.as_ref())
    }

    /// Forms of this word's lemma in one inflection category.
    pub fn inflections(&self, inflection: Inflection) -> Result<&[Form], Error> {
        let cell = &self.inflections[inflection.index()];
        let forms = entity::hydrate(cell, Self::KIND, "inflections", || {
            entity::load_many(
                &self.db,
                self.identity_filter()
                    .and_then(|me| form::words(inflection).matches(me)),
                Order::ascending(form::ID),
            )
        })?;

        Ok(forms.as_slice())
    }

    pub fn base_form(&self) -> Result<&Form, Error> {
        entity::first_of(self.inflections(Inflection::Base)?, ObjectKind::Form)
    }

    // ------------------------------------------------------------------
    // Filters
    // ------------------------------------------------------------------

    /// Words listed as synonyms of this one.
    pub fn synonyms_filter(&self) -> Result<Filter, FilterError> {
        word::SYNONYMS.matches(self.identity_filter()?)
    }

    pub fn antonyms_filter(&self) -> Result<Filter, FilterError> {
        word::ANTONYMS.matches(self.identity_filter()?)
    }

    /// Adjectives pertaining to this noun.
    pub fn pertainyms_filter(&self) -> Result<Filter, FilterError> {
        word::ANTI_PERTAINYMS.matches(self.identity_filter()?)
    }

    /// Nouns this adjective pertains to.
    pub fn anti_pertainyms_filter(&self) -> Result<Filter, FilterError> {
        word::PERTAINYMS.matches(self.identity_filter()?)
    }

    /// Words whose notion is a direct hypernym of this word's notion.
    pub fn hypernyms_filter(&self) -> Result<Filter, FilterError> {
        notion::HYPONYMS.matches(notion::ID.eq(self.notion_id)?)
    }

    /// Words whose notion is a direct hyponym of this word's notion.
    pub fn hyponyms_filter(&self) -> Result<Filter, FilterError> {
        notion::HYPERNYMS.matches(notion::ID.eq(self.notion_id)?)
    }

    /// Other words sharing this word's notion.
    pub fn notion_mates_filter(&self) -> Result<Filter, FilterError> {
        Ok(notion::ID.eq(self.notion_id)? & word::ID.ne(self.id)?)
    }
}
