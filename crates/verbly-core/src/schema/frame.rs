//! Fields of [`ObjectKind::Frame`]: one syntactic frame of a verb group.

use crate::model::{Field, ObjectKind};

pub const SELECT: &[&str] = &["frame_id", "group_id", "data"];

pub const ID: Field = Field::integer(ObjectKind::Frame, "frame_id");
pub const DATA: Field = Field::string(ObjectKind::Frame, "data");

pub const GROUPS: Field = Field::join(ObjectKind::Frame, "group_id", ObjectKind::Group);
pub const PARTS: Field = Field::join(ObjectKind::Frame, "frame_id", ObjectKind::Part);

/// The part occupying slot `index` of the frame.
#[must_use]
pub const fn part_at(index: i64) -> Field {
    Field::join_where(
        ObjectKind::Frame,
        "frame_id",
        ObjectKind::Part,
        "part_index",
        index,
    )
}
