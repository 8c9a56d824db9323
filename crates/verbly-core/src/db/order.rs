use crate::{
    db::statement::CompileError,
    model::{Field, ObjectKind},
};

///
/// Order
/// Result ordering; a sort field must be a scalar column of the queried kind.
///

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum Order {
    #[default]
    Random,
    Field {
        field: Field,
        ascending: bool,
    },
}

impl Order {
    #[must_use]
    pub const fn ascending(field: Field) -> Self {
        Self::Field {
            field,
            ascending: true,
        }
    }

    #[must_use]
    pub const fn descending(field: Field) -> Self {
        Self::Field {
            field,
            ascending: false,
        }
    }

    pub(crate) fn validate(&self, kind: ObjectKind) -> Result<(), CompileError> {
        let Self::Field { field, .. } = self else {
            return Ok(());
        };

        if field.object() != kind {
            return Err(CompileError::ForeignSortField {
                field: field.to_string(),
                kind,
            });
        }

        if field.is_join() {
            return Err(CompileError::NonScalarSortField {
                field: field.to_string(),
            });
        }

        Ok(())
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{form, word};

    #[test]
    fn random_is_the_default() {
        assert_eq!(Order::default(), Order::Random);
        assert!(Order::Random.validate(ObjectKind::Word).is_ok());
    }

    #[test]
    fn sort_field_must_belong_to_the_kind() {
        assert!(Order::ascending(word::TAG_COUNT).validate(ObjectKind::Word).is_ok());

        let err = Order::ascending(form::TEXT)
            .validate(ObjectKind::Word)
            .unwrap_err();
        assert!(matches!(err, CompileError::ForeignSortField { .. }));

        let err = Order::descending(word::SYNONYMS)
            .validate(ObjectKind::Word)
            .unwrap_err();
        assert!(matches!(err, CompileError::NonScalarSortField { .. }));
    }
}
