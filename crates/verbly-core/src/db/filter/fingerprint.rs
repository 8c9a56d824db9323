//! Deterministic structural fingerprinting of filter trees.

use crate::{
    db::filter::{Connective, Filter, Operand},
    model::{Field, ObjectKind},
};
use sha2::{Digest, Sha256};
use std::fmt::{self, Write as _};

///
/// FilterFingerprint
///
/// Stable SHA-256 digest of a filter's structure. Equal trees always hash
/// equally, independently of how they were built.
///

#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct FilterFingerprint([u8; 32]);

impl FilterFingerprint {
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    #[must_use]
    pub fn as_hex(&self) -> String {
        let mut out = String::with_capacity(64);
        for byte in self.0 {
            let _ = write!(out, "{byte:02x}");
        }
        out
    }

    /// First eight hex digits, enough to correlate log lines.
    #[must_use]
    pub fn short(&self) -> String {
        self.as_hex()[..8].to_string()
    }
}

impl fmt::Display for FilterFingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_hex())
    }
}

impl Filter {
    #[must_use]
    pub fn fingerprint(&self) -> FilterFingerprint {
        let mut hasher = Sha256::new();
        hasher.update(b"filterfp:v1");
        hash_filter(&mut hasher, self);

        let digest = hasher.finalize();
        let mut out = [0u8; 32];
        out.copy_from_slice(&digest);

        FilterFingerprint(out)
    }
}

fn hash_filter(hasher: &mut Sha256, filter: &Filter) {
    match filter {
        Filter::Empty => write_tag(hasher, 0x20),
        Filter::Clause(clause) => {
            write_tag(hasher, 0x21);
            hash_field(hasher, &clause.field);
            write_tag(hasher, clause.comparison.tag());
            hash_operand(hasher, &clause.operand);
        }
        Filter::Group {
            connective,
            children,
        } => {
            write_tag(
                hasher,
                match connective {
                    Connective::And => 0x22,
                    Connective::Or => 0x23,
                },
            );
            write_len_u32(hasher, children.len());
            for child in children {
                hash_filter(hasher, child);
            }
        }
    }
}

fn hash_field(hasher: &mut Sha256, field: &Field) {
    let (
        tag,
        object,
        column,
        join_object,
        table,
        join_column,
        condition_column,
        condition_value,
    ) = field.identity();

    write_tag(hasher, tag);
    write_str(hasher, object.name());
    write_str(hasher, column);
    write_opt_str(hasher, join_object.map(ObjectKind::name));
    write_opt_str(hasher, table);
    write_opt_str(hasher, join_column);
    write_opt_str(hasher, condition_column);
    match condition_value {
        Some(value) => {
            write_tag(hasher, 0x01);
            hasher.update(value.to_be_bytes());
        }
        None => write_tag(hasher, 0x00),
    }
}

fn hash_operand(hasher: &mut Sha256, operand: &Operand) {
    match operand {
        Operand::None => write_tag(hasher, 0x30),
        Operand::Integer(value) => {
            write_tag(hasher, 0x31);
            hasher.update(value.to_be_bytes());
        }
        Operand::Boolean(value) => {
            write_tag(hasher, 0x32);
            write_tag(hasher, u8::from(*value));
        }
        Operand::String(value) => {
            write_tag(hasher, 0x33);
            write_str(hasher, value);
        }
        Operand::Filter(inner) => {
            write_tag(hasher, 0x34);
            hash_filter(hasher, inner);
        }
    }
}

fn write_opt_str(hasher: &mut Sha256, value: Option<&str>) {
    match value {
        Some(value) => {
            write_tag(hasher, 0x01);
            write_str(hasher, value);
        }
        None => write_tag(hasher, 0x00),
    }
}

///
/// Encode one string with length prefix into the hash stream.
///

fn write_str(hasher: &mut Sha256, value: &str) {
    write_len_u32(hasher, value.len());
    hasher.update(value.as_bytes());
}

/// Encode a platform-sized length as u32 with deterministic saturation.
fn write_len_u32(hasher: &mut Sha256, len: usize) {
    let len = u32::try_from(len).unwrap_or(u32::MAX);
    hasher.update(len.to_be_bytes());
}

fn write_tag(hasher: &mut Sha256, tag: u8) {
    hasher.update([tag]);
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use crate::{
        db::filter::Filter,
        schema::{form, group, word},
    };

    #[test]
    fn equal_trees_share_a_fingerprint() {
        let a = word::SYNONYMS.matches(form::TEXT.eq("happy").unwrap()).unwrap();
        let b = word::SYNONYMS.matches(form::TEXT.eq("happy").unwrap()).unwrap();

        assert_eq!(a.fingerprint(), b.fingerprint());
        assert_eq!(a.fingerprint().as_hex().len(), 64);
    }

    #[test]
    fn operand_and_polarity_change_the_fingerprint() {
        let happy = form::TEXT.eq("happy").unwrap();
        let glad = form::TEXT.eq("glad").unwrap();

        assert_ne!(happy.fingerprint(), glad.fingerprint());
        assert_ne!(
            (happy.clone() & glad.clone()).fingerprint(),
            (happy | glad).fingerprint()
        );
        assert_ne!(Filter::Empty.fingerprint(), Filter::and(Vec::new()).fingerprint());
    }

    #[test]
    fn relationships_to_different_kinds_fingerprint_apart() {
        let words = group::WORDS.does_not_match(Filter::Empty).unwrap();
        let frames = group::FRAMES.does_not_match(Filter::Empty).unwrap();

        assert_ne!(words.fingerprint(), frames.fingerprint());
    }
}
