use crate::{
    db::{
        Database,
        filter::{Filter, FilterError},
        order::Order,
    },
    entity::{self, Entity, Word},
    error::Error,
    model::{Field, ObjectKind},
    schema::{PartOfSpeech, notion, word},
};
use rusqlite::Row;
use std::cell::OnceCell;

///
/// Notion
///
/// One WordNet synset: a concept shared by every word listed under it.
///

#[derive(Debug)]
pub struct Notion {
    db: Database,
    id: i64,
    part_of_speech: PartOfSpeech,
    wnid: Option<i64>,
    images: Option<i64>,

    words: OnceCell<Vec<Word>>,
}

impl Entity for Notion {
    const KIND: ObjectKind = ObjectKind::Notion;
    const SELECT: &'static [&'static str] = notion::SELECT;
    const ID: Field = notion::ID;

    fn from_row(db: &Database, row: &Row<'_>) -> Result<Self, Error> {
        Ok(Self {
            db: db.clone(),
            id: entity::column(row, Self::KIND, 0)?,
            part_of_speech: entity::enum_column(row, Self::KIND, 1)?,
            wnid: entity::column(row, Self::KIND, 2)?,
            images: entity::column(row, Self::KIND, 3)?,
            words: OnceCell::new(),
        })
    }

    fn id(&self) -> i64 {
        self.id
    }
}

impl Notion {
    #[must_use]
    pub const fn part_of_speech(&self) -> PartOfSpeech {
        self.part_of_speech
    }

    /// WordNet offset; nouns only.
    #[must_use]
    pub const fn wnid(&self) -> Option<i64> {
        self.wnid
    }

    #[must_use]
    pub const fn num_of_images(&self) -> Option<i64> {
        self.images
    }

    pub fn words(&self) -> Result<&[Word], Error> {
        let words = entity::hydrate(&self.words, Self::KIND, "words", || {
            entity::load_many(&self.db, self.identity_filter(), Order::ascending(word::ID))
        })?;

        Ok(words.as_slice())
    }

    // ------------------------------------------------------------------
    // Filters
    // ------------------------------------------------------------------

    pub fn hypernyms_filter(&self) -> Result<Filter, FilterError> {
        notion::HYPONYMS.matches(self.identity_filter()?)
    }

    pub fn hyponyms_filter(&self) -> Result<Filter, FilterError> {
        notion::HYPERNYMS.matches(self.identity_filter()?)
    }

    /// Every ancestor along hypernymy, including this notion.
    pub fn full_hypernyms_filter(&self) -> Result<Filter, FilterError> {
        notion::FULL_HYPONYMS.hierarchically_matches(self.identity_filter()?)
    }

    /// Every descendant along hypernymy, including this notion.
    pub fn full_hyponyms_filter(&self) -> Result<Filter, FilterError> {
        notion::FULL_HYPERNYMS.hierarchically_matches(self.identity_filter()?)
    }

    pub fn member_holonyms_filter(&self) -> Result<Filter, FilterError> {
        notion::MEMBER_MERONYMS.matches(self.identity_filter()?)
    }

    pub fn part_holonyms_filter(&self) -> Result<Filter, FilterError> {
        notion::PART_MERONYMS.matches(self.identity_filter()?)
    }

    pub fn instances_filter(&self) -> Result<Filter, FilterError> {
        notion::CLASSES.matches(self.identity_filter()?)
    }
}
