//! Fields of [`ObjectKind::Group`]: one VerbNet class.

use crate::model::{Field, ObjectKind};

pub const SELECT: &[&str] = &["group_id", "data"];

pub const ID: Field = Field::integer(ObjectKind::Group, "group_id");
pub const DATA: Field = Field::string(ObjectKind::Group, "data");

pub const WORDS: Field = Field::join(ObjectKind::Group, "group_id", ObjectKind::Word);
pub const FRAMES: Field = Field::join(ObjectKind::Group, "group_id", ObjectKind::Frame);
