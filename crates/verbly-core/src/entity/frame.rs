use crate::{
    db::{
        Database,
        filter::{Filter, FilterError},
        order::Order,
    },
    entity::{self, Entity, Group, Part},
    error::Error,
    model::{Field, ObjectKind},
    schema::{frame, group, part},
};
use rusqlite::Row;
use std::cell::OnceCell;

///
/// Frame
///

#[derive(Debug)]
pub struct Frame {
    db: Database,
    id: i64,
    group_id: i64,
    data: String,

    group: OnceCell<Group>,
    parts: OnceCell<Vec<Part>>,
}

impl Entity for Frame {
    const KIND: ObjectKind = ObjectKind::Frame;
    const SELECT: &'static [&'static str] = frame::SELECT;
    const ID: Field = frame::ID;

    fn from_row(db: &Database, row: &Row<'_>) -> Result<Self, Error> {
        Ok(Self {
            db: db.clone(),
            id: entity::column(row, Self::KIND, 0)?,
            group_id: entity::column(row, Self::KIND, 1)?,
            data: entity::column(row, Self::KIND, 2)?,
            group: OnceCell::new(),
            parts: OnceCell::new(),
        })
    }

    fn id(&self) -> i64 {
        self.id
    }
}

impl Frame {
    #[must_use]
    pub const fn group_id(&self) -> i64 {
        self.group_id
    }

    #[must_use]
    pub fn data(&self) -> &str {
        &self.data
    }

    pub fn group(&self) -> Result<&Group, Error> {
        entity::hydrate(&self.group, Self::KIND, "group", || {
            entity::load_one(&self.db, group::ID.eq(self.group_id))
        })
    }

    /// Slots of this frame in index order.
    pub fn parts(&self) -> Result<&[Part], Error> {
        let parts = entity::hydrate(&self.parts, Self::KIND, "parts", || {
            entity::load_many(&self.db, self.identity_filter(), Order::ascending(part::INDEX))
        })?;

        Ok(parts.as_slice())
    }

    /// Frames whose slot `index` satisfies `condition`.
    pub fn part_filter(index: i64, condition: Filter) -> Result<Filter, FilterError> {
        frame::part_at(index).matches(condition)
    }
}
