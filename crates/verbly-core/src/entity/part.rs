use crate::{
    db::Database,
    entity::{self, Entity, Frame},
    error::Error,
    model::{Field, ObjectKind},
    schema::{PartType, frame, part},
};
use rusqlite::Row;
use std::cell::OnceCell;

///
/// Part
/// One slot of a frame: a noun phrase, the verb, a preposition, a literal...
///

#[derive(Debug)]
pub struct Part {
    db: Database,
    id: i64,
    frame_id: i64,
    index: i64,
    part_type: PartType,
    role: Option<String>,
    value: Option<String>,

    frame: OnceCell<Frame>,
}

impl Entity for Part {
    const KIND: ObjectKind = ObjectKind::Part;
    const SELECT: &'static [&'static str] = part::SELECT;
    const ID: Field = part::ID;

    fn from_row(db: &Database, row: &Row<'_>) -> Result<Self, Error> {
        Ok(Self {
            db: db.clone(),
            id: entity::column(row, Self::KIND, 0)?,
            frame_id: entity::column(row, Self::KIND, 1)?,
            index: entity::column(row, Self::KIND, 2)?,
            part_type: entity::enum_column(row, Self::KIND, 3)?,
            role: entity::column(row, Self::KIND, 4)?,
            value: entity::column(row, Self::KIND, 5)?,
            frame: OnceCell::new(),
        })
    }

    fn id(&self) -> i64 {
        self.id
    }
}

impl Part {
    #[must_use]
    pub const fn frame_id(&self) -> i64 {
        self.frame_id
    }

    #[must_use]
    pub const fn index(&self) -> i64 {
        self.index
    }

    #[must_use]
    pub const fn part_type(&self) -> PartType {
        self.part_type
    }

    /// Thematic role; noun phrases only.
    #[must_use]
    pub fn role(&self) -> Option<&str> {
        self.role.as_deref()
    }

    /// Literal text of a preposition or literal slot.
    #[must_use]
    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    pub fn frame(&self) -> Result<&Frame, Error> {
        entity::hydrate(&self.frame, Self::KIND, "frame", || {
            entity::load_one(&self.db, frame::ID.eq(self.frame_id))
        })
    }
}
