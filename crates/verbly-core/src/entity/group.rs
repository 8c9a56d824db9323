use crate::{
    db::{Database, order::Order},
    entity::{self, Entity, Frame, Word},
    error::Error,
    model::{Field, ObjectKind},
    schema::{frame, group, word},
};
use rusqlite::Row;
use std::cell::OnceCell;

///
/// Group
/// One VerbNet class: verbs sharing a set of syntactic frames.
///

#[derive(Debug)]
pub struct Group {
    db: Database,
    id: i64,
    data: String,

    frames: OnceCell<Vec<Frame>>,
    words: OnceCell<Vec<Word>>,
}

impl Entity for Group {
    const KIND: ObjectKind = ObjectKind::Group;
    const SELECT: &'static [&'static str] = group::SELECT;
    const ID: Field = group::ID;

    fn from_row(db: &Database, row: &Row<'_>) -> Result<Self, Error> {
        Ok(Self {
            db: db.clone(),
            id: entity::column(row, Self::KIND, 0)?,
            data: entity::column(row, Self::KIND, 1)?,
            frames: OnceCell::new(),
            words: OnceCell::new(),
        })
    }

    fn id(&self) -> i64 {
        self.id
    }
}

impl Group {
    #[must_use]
    pub fn data(&self) -> &str {
        &self.data
    }

    pub fn frames(&self) -> Result<&[Frame], Error> {
        let frames = entity::hydrate(&self.frames, Self::KIND, "frames", || {
            entity::load_many(&self.db, self.identity_filter(), Order::ascending(frame::ID))
        })?;

        Ok(frames.as_slice())
    }

    pub fn words(&self) -> Result<&[Word], Error> {
        let words = entity::hydrate(&self.words, Self::KIND, "words", || {
            entity::load_many(&self.db, self.identity_filter(), Order::ascending(word::ID))
        })?;

        Ok(words.as_slice())
    }
}
