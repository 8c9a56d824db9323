//! Fields of [`ObjectKind::Part`]: one slot of a frame.

use crate::model::{Field, ObjectKind};

pub const SELECT: &[&str] = &[
    "part_id",
    "frame_id",
    "part_index",
    "part_type",
    "role",
    "value",
];

pub const ID: Field = Field::integer(ObjectKind::Part, "part_id");
pub const INDEX: Field = Field::integer(ObjectKind::Part, "part_index");
pub const TYPE: Field = Field::integer(ObjectKind::Part, "part_type");
pub const ROLE: Field = Field::nullable_string(ObjectKind::Part, "role");
pub const VALUE: Field = Field::nullable_string(ObjectKind::Part, "value");

pub const FRAMES: Field = Field::join(ObjectKind::Part, "frame_id", ObjectKind::Frame);
