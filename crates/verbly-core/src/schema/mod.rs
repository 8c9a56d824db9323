//! Static field declarations for every object kind, plus the fixed
//! adjacency used to route a filter from one kind to another.

pub mod form;
pub mod frame;
pub mod group;
pub mod notion;
pub mod part;
pub mod pronunciation;
pub mod word;

mod enums;

pub use enums::{Inflection, PartOfSpeech, PartType, UnknownDiscriminant};

use crate::model::{Field, ObjectKind};

/// Relationship field leading from `target` one hop towards `other`,
/// paired with the kind on its far side.
///
/// Returns `None` when both kinds are the same. Following the returned
/// hops repeatedly always reaches `other`.
#[must_use]
pub const fn route(target: ObjectKind, other: ObjectKind) -> Option<(Field, ObjectKind)> {
    use ObjectKind as K;

    if target as u8 == other as u8 {
        return None;
    }

    let hop = match target {
        K::Notion => (notion::WORDS, K::Word),
        K::Word => match other {
            K::Notion => (word::NOTIONS, K::Notion),
            K::Group | K::Frame | K::Part => (word::GROUPS, K::Group),
            _ => (word::forms(Inflection::Base), K::Form),
        },
        K::Group => match other {
            K::Frame | K::Part => (group::FRAMES, K::Frame),
            _ => (group::WORDS, K::Word),
        },
        K::Frame => match other {
            K::Part => (frame::PARTS, K::Part),
            _ => (frame::GROUPS, K::Group),
        },
        K::Part => (part::FRAMES, K::Frame),
        K::Form => match other {
            K::Pronunciation => (form::PRONUNCIATIONS, K::Pronunciation),
            _ => (form::words(Inflection::Base), K::Word),
        },
        K::Pronunciation => (pronunciation::FORMS, K::Form),
    };

    Some(hop)
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn routes_terminate_at_the_requested_kind() {
        for target in ObjectKind::ALL {
            for other in ObjectKind::ALL {
                let mut current = target;
                let mut hops = 0;

                while let Some((field, far)) = route(current, other) {
                    assert_eq!(field.object(), current);
                    assert_eq!(field.join_object(), Ok(far));
                    current = far;
                    hops += 1;
                    assert!(hops <= ObjectKind::ALL.len(), "{target} -> {other} loops");
                }

                assert_eq!(current, other);
            }
        }
    }

    #[test]
    fn routing_fields_are_never_hierarchical() {
        for target in ObjectKind::ALL {
            for other in ObjectKind::ALL {
                if let Some((field, _)) = route(target, other) {
                    assert!(field.is_join());
                    assert!(!field.is_hierarchical());
                }
            }
        }
    }
}
