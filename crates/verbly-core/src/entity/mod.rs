//! Domain entities: one typed row per object kind, with relationships
//! hydrated lazily through further queries on first access.

mod form;
mod frame;
mod group;
mod notion;
mod part;
mod pronunciation;
mod word;


pub use form::Form;
pub use frame::Frame;
pub use group::Group;
pub use notion::Notion;
pub use part::Part;
pub use pronunciation::Pronunciation;
pub use word::Word;

use crate::{
    db::{
        Database,
        filter::{Filter, FilterError},
        order::Order,
        response::ResponseError,
    },
    error::Error,
    model::{Field, ObjectKind},
    obs::sink::{self, MetricsEvent},
};
use rusqlite::{Row, types::FromSql};
use std::{cell::OnceCell, fmt};
use tracing::trace;

///
/// Entity
///
/// Contract every object kind's row type satisfies: the kind and its
/// select list (primary key first), the identity field, and a constructor
/// from one result row.
///

pub trait Entity: Sized + fmt::Debug {
    const KIND: ObjectKind;
    const SELECT: &'static [&'static str];
    const ID: Field;

    fn from_row(db: &Database, row: &Row<'_>) -> Result<Self, Error>;

    fn id(&self) -> i64;

    /// "my identity equals `self.id()`", the seed of every relationship
    /// filter anchored at this entity.
    fn identity_filter(&self) -> Result<Filter, FilterError> {
        Self::ID.eq(self.id())
    }
}

// ---- Row decoding ----

/// Read column `index` of a row selected for `kind`.
pub(crate) fn column<T: FromSql>(row: &Row<'_>, kind: ObjectKind, index: usize) -> Result<T, Error> {
    row.get(index).map_err(|err| {
        let name = kind_column(kind, index);
        Error::entity_decode(format!("cannot decode {kind}.{name}: {err}"))
    })
}

/// Read an integer column and convert it into a schema enum.
pub(crate) fn enum_column<T>(row: &Row<'_>, kind: ObjectKind, index: usize) -> Result<T, Error>
where
    T: TryFrom<i64>,
    Error: From<T::Error>,
{
    let raw: i64 = column(row, kind, index)?;

    Ok(T::try_from(raw)?)
}

fn kind_column(kind: ObjectKind, index: usize) -> &'static str {
    let select = match kind {
        ObjectKind::Notion => Notion::SELECT,
        ObjectKind::Word => Word::SELECT,
        ObjectKind::Group => Group::SELECT,
        ObjectKind::Frame => Frame::SELECT,
        ObjectKind::Part => Part::SELECT,
        ObjectKind::Form => Form::SELECT,
        ObjectKind::Pronunciation => Pronunciation::SELECT,
    };

    select.get(index).copied().unwrap_or("?")
}

// ---- Lazy hydration ----

/// Return the cached value, or load, cache and return it.
///
/// The check and the fill happen on one thread with no intervening
/// borrow of `cell`, so a value is loaded at most once per instance.
pub(crate) fn hydrate<'a, T>(
    cell: &'a OnceCell<T>,
    owner: ObjectKind,
    relation: &'static str,
    load: impl FnOnce() -> Result<T, Error>,
) -> Result<&'a T, Error> {
    if let Some(value) = cell.get() {
        return Ok(value);
    }

    trace!(kind = %owner, relation, "hydrating");
    sink::record(MetricsEvent::Hydration { kind: owner });
    let value = load()?;

    Ok(cell.get_or_init(|| value))
}

/// Every `E` satisfying `filter`, in `order`.
pub(crate) fn load_many<E: Entity>(
    db: &Database,
    filter: Result<Filter, FilterError>,
    order: Order,
) -> Result<Vec<E>, Error> {
    let filter = filter?;
    let mut query = db.query::<E>(&filter, order, None)?;

    Ok(query.all()?.entities())
}

/// The `E` satisfying `filter`; a missing row is a `NotFound` error.
pub(crate) fn load_one<E: Entity>(
    db: &Database,
    filter: Result<Filter, FilterError>,
) -> Result<E, Error> {
    let filter = filter?;
    let mut query = db.query::<E>(&filter, Order::ascending(E::ID), Some(1))?;

    query.first()
}

/// First element of a hydrated list, or `NotFound` for `kind`.
pub(crate) fn first_of<E>(items: &[E], kind: ObjectKind) -> Result<&E, Error> {
    items
        .first()
        .ok_or_else(|| ResponseError::NotFound { kind }.into())
}
