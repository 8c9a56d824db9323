use serde::Serialize;
use std::fmt;

///
/// ObjectKind
///
/// Closed set of schema entities. Each kind maps 1:1 onto one physical table.
///

#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ObjectKind {
    Notion,
    Word,
    Group,
    Frame,
    Part,
    Form,
    Pronunciation,
}

impl ObjectKind {
    pub const ALL: [Self; 7] = [
        Self::Notion,
        Self::Word,
        Self::Group,
        Self::Frame,
        Self::Part,
        Self::Form,
        Self::Pronunciation,
    ];

    /// Physical table backing this kind.
    #[must_use]
    pub const fn table(self) -> &'static str {
        match self {
            Self::Notion => "notions",
            Self::Word => "words",
            Self::Group => "groups",
            Self::Frame => "frames",
            Self::Part => "parts",
            Self::Form => "forms",
            Self::Pronunciation => "pronunciations",
        }
    }

    /// Primary key column; always the first entry of the kind's select list.
    #[must_use]
    pub const fn primary_key(self) -> &'static str {
        match self {
            Self::Notion => "notion_id",
            Self::Word => "word_id",
            Self::Group => "group_id",
            Self::Frame => "frame_id",
            Self::Part => "part_id",
            Self::Form => "form_id",
            Self::Pronunciation => "pronunciation_id",
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Notion => "notion",
            Self::Word => "word",
            Self::Group => "group",
            Self::Frame => "frame",
            Self::Part => "part",
            Self::Form => "form",
            Self::Pronunciation => "pronunciation",
        }
    }
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

///
/// TESTS
///
