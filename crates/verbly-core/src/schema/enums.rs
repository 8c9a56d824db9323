use serde::Serialize;
use thiserror::Error as ThisError;

///
/// UnknownDiscriminant
/// Stored integer that does not name any variant of the target enum.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq, ThisError)]
#[error("unknown {name} discriminant {value}")]
pub struct UnknownDiscriminant {
    pub name: &'static str,
    pub value: i64,
}

// Declares an integer-backed schema enum with lossless conversions in both
// directions.
macro_rules! schema_enum {
    (
        $(#[$meta:meta])*
        $name:ident ($label:literal) {
            $($variant:ident = $value:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
        #[serde(rename_all = "snake_case")]
        #[repr(i64)]
        pub enum $name {
            $($variant = $value),+
        }

        impl $name {
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];
            pub const COUNT: usize = Self::ALL.len();

            #[must_use]
            pub const fn as_i64(self) -> i64 {
                self as i64
            }

            /// Dense position within [`Self::ALL`].
            #[must_use]
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            pub const fn index(self) -> usize {
                self as usize
            }
        }

        impl TryFrom<i64> for $name {
            type Error = UnknownDiscriminant;

            fn try_from(value: i64) -> Result<Self, Self::Error> {
                match value {
                    $($value => Ok(Self::$variant),)+
                    _ => Err(UnknownDiscriminant { name: $label, value }),
                }
            }
        }

        impl From<$name> for i64 {
            fn from(value: $name) -> Self {
                value.as_i64()
            }
        }
    };
}

schema_enum! {
    ///
    /// PartOfSpeech
    ///
    PartOfSpeech ("part of speech") {
        Noun = 0,
        Adjective = 1,
        Adverb = 2,
        Verb = 3,
    }
}

schema_enum! {
    ///
    /// Inflection
    /// Category of a lemma/form association.
    ///
    Inflection ("inflection") {
        Base = 0,
        Plural = 1,
        Comparative = 2,
        Superlative = 3,
        PastTense = 4,
        PastParticiple = 5,
        IngForm = 6,
        SForm = 7,
    }
}

schema_enum! {
    ///
    /// PartType
    /// Syntactic role of one slot in a verb frame.
    ///
    PartType ("part type") {
        NounPhrase = 0,
        Verb = 1,
        Preposition = 2,
        Adjective = 3,
        Adverb = 4,
        Literal = 5,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn discriminants_round_trip() {
        assert_eq!(Inflection::try_from(4), Ok(Inflection::PastTense));
        assert_eq!(i64::from(PartOfSpeech::Verb), 3);
    }

    #[test]
    fn index_matches_position_in_all() {
        for (position, inflection) in Inflection::ALL.iter().enumerate() {
            assert_eq!(inflection.index(), position);
        }
        assert_eq!(PartType::COUNT, 6);
    }

    #[test]
    fn unknown_discriminant_is_rejected() {
        let err = PartType::try_from(42).unwrap_err();

        assert_eq!(err.to_string(), "unknown part type discriminant 42");
    }
}
