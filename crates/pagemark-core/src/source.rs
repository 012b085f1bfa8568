//! Module: source
//! Responsibility: the storage port a paginator reads batches through.
//! Does not own: page construction or token handling.
//! Boundary: implementations honor the advice contract; nothing else is assumed.

use crate::{
    advice::QueryAdvice,
    order::sort_pageables,
    traits::{Pageable, Timestamp},
};
use std::{
    convert::Infallible,
    sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard},
};

///
/// PageSource
///
/// Storage collaborator queried once per page request.
///
/// `fetch` returns up to `advice.limit` entities with
/// `timestamp >= advice.timestamp`, in any order. When more qualify, the
/// returned set must be the lowest `limit` by `(timestamp, id)`.
///

pub trait PageSource {
    type Entity: Pageable;
    type Error: std::error::Error + Send + Sync + 'static;

    fn fetch(&self, advice: QueryAdvice) -> Result<Vec<Self::Entity>, Self::Error>;
}

impl<S: PageSource + ?Sized> PageSource for &S {
    type Entity = S::Entity;
    type Error = S::Error;

    fn fetch(&self, advice: QueryAdvice) -> Result<Vec<Self::Entity>, Self::Error> {
        (**self).fetch(advice)
    }
}

///
/// MemorySource
///
/// In-memory collection keyed by entity id. Each fetch reads a consistent
/// snapshot; writes between fetches model concurrent mutation.
///

#[derive(Debug)]
pub struct MemorySource<E> {
    rows: RwLock<Vec<E>>,
}

impl<E> Default for MemorySource<E> {
    fn default() -> Self {
        Self {
            rows: RwLock::new(Vec::new()),
        }
    }
}

impl<E: Pageable + Clone> MemorySource<E> {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            rows: RwLock::new(Vec::new()),
        }
    }

    /// Insert `entity`, replacing any row with the same id.
    ///
    /// Returns the replaced row.
    pub fn upsert(&self, entity: E) -> Option<E> {
        let mut rows = self.write();

        match rows.iter().position(|row| row.id() == entity.id()) {
            Some(index) => Some(std::mem::replace(&mut rows[index], entity)),
            None => {
                rows.push(entity);
                None
            }
        }
    }

    /// Insert `entity` only when its id is not present yet.
    ///
    /// Returns `false` and leaves the store unchanged on a duplicate id.
    pub fn insert(&self, entity: E) -> bool {
        let mut rows = self.write();
        if rows.iter().any(|row| row.id() == entity.id()) {
            return false;
        }
        rows.push(entity);

        true
    }

    pub fn remove(&self, id: &str) -> Option<E> {
        let mut rows = self.write();
        let index = rows.iter().position(|row| row.id() == id)?;

        Some(rows.swap_remove(index))
    }

    /// Move the row with `id` to `timestamp` in place.
    ///
    /// `stamp` writes the new timestamp into the entity, since the store never
    /// interprets entity fields itself. Returns `false` when `id` is absent.
    pub fn touch(
        &self,
        id: &str,
        timestamp: Timestamp,
        stamp: impl FnOnce(&mut E, Timestamp),
    ) -> bool {
        let mut rows = self.write();
        let Some(row) = rows.iter_mut().find(|row| row.id() == id) else {
            return false;
        };
        stamp(row, timestamp);

        true
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<E> {
        self.read().iter().find(|row| row.id() == id).cloned()
    }

    /// All rows in canonical order.
    #[must_use]
    pub fn snapshot(&self) -> Vec<E> {
        let mut rows = self.read().clone();
        sort_pageables(&mut rows);

        rows
    }

    /// Largest timestamp currently stored, or `None` when empty.
    #[must_use]
    pub fn max_timestamp(&self) -> Option<Timestamp> {
        self.read().iter().map(Pageable::timestamp).max()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.read().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    // Every write leaves the vector whole; a poisoned lock is recovered.
    fn read(&self) -> RwLockReadGuard<'_, Vec<E>> {
        self.rows.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Vec<E>> {
        self.rows.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<E: Pageable + Clone> FromIterator<E> for MemorySource<E> {
    /// Later duplicates of an id replace earlier ones.
    fn from_iter<I: IntoIterator<Item = E>>(iter: I) -> Self {
        let source = Self::new();
        for entity in iter {
            source.upsert(entity);
        }

        source
    }
}

impl<E: Pageable + Clone> PageSource for MemorySource<E> {
    type Entity = E;
    type Error = Infallible;

    fn fetch(&self, advice: QueryAdvice) -> Result<Vec<E>, Infallible> {
        let mut rows: Vec<E> = self
            .read()
            .iter()
            .filter(|row| row.timestamp() >= advice.timestamp)
            .cloned()
            .collect();
        sort_pageables(&mut rows);
        rows.truncate(advice.limit_len());

        Ok(rows)
    }
}

///
/// TESTS
///
