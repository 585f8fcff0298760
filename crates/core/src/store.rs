//! Ordered in-memory record store.
//!
//! A [`RecordStore`] keeps records in insertion order and is keyed by the
//! record's ID for replacement and removal. It owns an [`IdAllocator`], so
//! IDs are unique within one store for its whole lifetime.

use std::fmt;

use crate::allocator::IdAllocator;

/// A record that can live in a [`RecordStore`].
pub trait Record: Clone {
    /// Typed identifier of the record.
    type Id: Copy + Eq + fmt::Display + From<u64> + Into<u64>;

    /// Entity name used in errors and logs.
    const ENTITY: &'static str;

    /// The record's ID, `None` for a record that was never saved.
    fn id(&self) -> Option<Self::Id>;

    /// Assign the record's ID.
    fn set_id(&mut self, id: Self::Id);
}

/// Result of [`RecordStore::upsert`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Upserted<I> {
    /// ID the record is stored under.
    pub id: I,
    /// `true` if the record was appended, `false` if it replaced an entry.
    pub created: bool,
}

/// Ordered collection with upsert-by-id and delete-by-id.
#[derive(Debug, Clone)]
pub struct RecordStore<R: Record> {
    records: Vec<R>,
    ids: IdAllocator,
}

impl<R: Record> Default for RecordStore<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Record> RecordStore<R> {
    /// Create an empty store.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            records: Vec::new(),
            ids: IdAllocator::new(),
        }
    }

    /// Create a store holding `records` in the given order.
    ///
    /// Records keep their own IDs. A record without an ID, or whose ID is
    /// already taken by an earlier record, is treated like [`RecordStore::upsert`]
    /// would treat it.
    #[must_use]
    pub fn from_records(records: impl IntoIterator<Item = R>) -> Self {
        let mut store = Self::new();
        for record in records {
            match record.id() {
                Some(id) if store.position(id).is_none() => {
                    store.ids.observe(id.into());
                    store.records.push(record);
                }
                Some(_) => {
                    let mut record = record;
                    let id = store.ids.allocate();
                    record.set_id(id);
                    store.records.push(record);
                }
                None => {
                    store.upsert(record);
                }
            }
        }
        store
    }

    /// Insert or replace a record.
    ///
    /// A record whose ID matches an existing entry replaces that entry in
    /// place. Any other record gets a fresh ID and is appended.
    pub fn upsert(&mut self, mut record: R) -> Upserted<R::Id> {
        if let Some(id) = record.id()
            && let Some(slot) = self.records.iter_mut().find(|r| r.id() == Some(id))
        {
            *slot = record;
            return Upserted { id, created: false };
        }

        let id = self.ids.allocate();
        record.set_id(id);
        self.records.push(record);
        Upserted { id, created: true }
    }

    /// Remove the record with `id`.
    ///
    /// Returns `false` when no such record exists; that is not an error.
    pub fn delete(&mut self, id: R::Id) -> bool {
        let before = self.records.len();
        self.records.retain(|r| r.id() != Some(id));
        self.records.len() != before
    }

    /// All records in order.
    #[must_use]
    pub fn list(&self) -> &[R] {
        &self.records
    }

    /// The record with `id`, if present.
    #[must_use]
    pub fn get(&self, id: R::Id) -> Option<&R> {
        self.records.iter().find(|r| r.id() == Some(id))
    }

    /// Number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the store holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn position(&self, id: R::Id) -> Option<usize> {
        self.records.iter().position(|r| r.id() == Some(id))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::models::{Role, User};
    use crate::types::{RoleId, UserId, UserStatus};

    fn seeded() -> RecordStore<User> {
        RecordStore::from_records([
            User::new("Alice", "alice@example.com", &["Admin"], UserStatus::Active)
                .with_id(UserId::new(1)),
            User::new("Bob", "bob@example.com", &["Viewer"], UserStatus::Inactive)
                .with_id(UserId::new(2)),
        ])
    }

    #[test]
    fn test_upsert_without_id_appends_with_fresh_id() {
        let mut store = seeded();
        let existing: Vec<_> = store.list().iter().filter_map(User::id).collect();

        let outcome = store.upsert(User::new("Carol", "", &[], UserStatus::Active));

        assert!(outcome.created);
        assert!(!existing.contains(&outcome.id));
        assert_eq!(store.len(), 3);
        let last = store.list().last().unwrap();
        assert_eq!(last.name, "Carol");
        assert_eq!(last.id, Some(outcome.id));
    }

    #[test]
    fn test_upsert_with_known_id_replaces_in_place() {
        let mut store = seeded();
        let mut alice = store.get(UserId::new(1)).unwrap().clone();
        alice.status = UserStatus::Inactive;
        alice.roles = vec![];

        let outcome = store.upsert(alice.clone());

        assert_eq!(outcome, Upserted { id: UserId::new(1), created: false });
        assert_eq!(store.len(), 2);
        assert_eq!(store.list()[0], alice);
        assert_eq!(store.list()[1].name, "Bob");
    }

    #[test]
    fn test_upsert_with_unknown_id_appends_with_fresh_id() {
        let mut store = seeded();
        let ghost = User::new("Ghost", "", &[], UserStatus::Active).with_id(UserId::new(99));

        let outcome = store.upsert(ghost);

        assert!(outcome.created);
        assert_eq!(outcome.id, UserId::new(3));
        assert!(store.get(UserId::new(99)).is_none());
    }

    #[test]
    fn test_ids_stay_unique_after_deletes() {
        let mut store = seeded();
        assert!(store.delete(UserId::new(2)));
        let outcome = store.upsert(User::default());
        assert_ne!(outcome.id, UserId::new(2));
        assert_ne!(outcome.id, UserId::new(1));
    }

    #[test]
    fn test_delete_is_idempotent() {
        let mut store = seeded();
        assert!(store.delete(UserId::new(1)));
        let after_first: Vec<User> = store.list().to_vec();

        assert!(!store.delete(UserId::new(1)));
        assert_eq!(store.list(), after_first.as_slice());
    }

    #[test]
    fn test_delete_missing_on_empty_store() {
        let mut store: RecordStore<Role> = RecordStore::new();
        assert!(!store.delete(RoleId::new(1)));
        assert!(store.is_empty());
    }

    #[test]
    fn test_from_records_resolves_duplicate_ids() {
        let store = RecordStore::from_records([
            Role::new("Admin", &["Read"]).with_id(RoleId::new(5)),
            Role::new("Copy", &["Read"]).with_id(RoleId::new(5)),
            Role::new("Fresh", &[]),
        ]);
        let ids: Vec<u64> = store
            .list()
            .iter()
            .map(|r| r.id.unwrap().as_u64())
            .collect();
        assert_eq!(ids, vec![5, 6, 7]);
    }

    #[test]
    fn test_list_is_a_snapshot_for_owned_copies() {
        let store = seeded();
        let mut copy = store.list().to_vec();
        copy[0].name = "Mallory".to_string();
        copy.clear();
        assert_eq!(store.list()[0].name, "Alice");
        assert_eq!(store.len(), 2);
    }
}
