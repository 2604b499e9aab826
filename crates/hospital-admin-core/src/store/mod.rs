//! In-memory record collections.
//!
//! Each collection owns the canonical list for one kind of record, assigns
//! identifiers the form controllers do not produce, and filters records for
//! display. Contents live for the lifetime of the process only.

mod medications;
mod reports;
mod schedules;

pub use medications::StockSummary;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::forms::{FormResult, FormSink};

/// Store errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("Record not found: {0}")]
    NotFound(String),

    #[error("Duplicate record id: {0}")]
    DuplicateId(String),

    #[error("Record carries id {own} but was stored under {id}")]
    IdMismatch { id: String, own: String },
}

pub type StoreResult<T> = Result<T, StoreError>;

/// A record kind that can live in a [`RecordStore`].
pub trait StoreRecord: Clone {
    /// Identifier carried by the record itself, if its form mints one.
    fn own_id(&self) -> Option<&str> {
        None
    }

    /// Text fields matched by [`RecordStore::search`].
    fn search_text(&self) -> Vec<&str>;
}

/// A record paired with its collection id.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Stored<R> {
    pub id: String,
    #[serde(flatten)]
    pub record: R,
}

/// Ordered collection of one kind of record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct RecordStore<R> {
    items: Vec<Stored<R>>,
}

impl<R> Default for RecordStore<R> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<R: StoreRecord> RecordStore<R> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record and return its id.
    pub fn insert(&mut self, record: R) -> StoreResult<String> {
        let id = match record.own_id() {
            Some(id) => id.to_string(),
            None => uuid::Uuid::new_v4().to_string(),
        };
        if self.position(&id).is_some() {
            return Err(StoreError::DuplicateId(id));
        }
        tracing::debug!(id = %id, "inserted record");
        self.items.push(Stored {
            id: id.clone(),
            record,
        });
        Ok(id)
    }

    /// Replace the record stored under `id`, keeping its position. A record
    /// that carries its own id must carry this one.
    pub fn update(&mut self, id: &str, record: R) -> StoreResult<()> {
        if let Some(own) = record.own_id().filter(|own| *own != id) {
            return Err(StoreError::IdMismatch {
                id: id.to_string(),
                own: own.to_string(),
            });
        }
        let index = self
            .position(id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        self.items[index].record = record;
        tracing::debug!(id = %id, "updated record");
        Ok(())
    }

    /// Remove and return the record stored under `id`.
    pub fn remove(&mut self, id: &str) -> StoreResult<R> {
        let index = self
            .position(id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        Ok(self.items.remove(index).record)
    }

    pub fn get(&self, id: &str) -> Option<&R> {
        self.position(id).map(|i| &self.items[i].record)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Stored<R>> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Records whose searchable text contains `query` (case-insensitive).
    /// A blank query matches everything.
    pub fn search(&self, query: &str) -> Vec<&Stored<R>> {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return self.items.iter().collect();
        }
        self.filter(|record| {
            record
                .search_text()
                .iter()
                .any(|text| text.to_lowercase().contains(&query))
        })
    }

    /// Records matching a predicate, in collection order.
    pub fn filter<P>(&self, mut predicate: P) -> Vec<&Stored<R>>
    where
        P: FnMut(&R) -> bool,
    {
        self.items.iter().filter(|s| predicate(&s.record)).collect()
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.items.iter().position(|s| s.id == id)
    }
}

impl<R: StoreRecord> FormSink<R> for RecordStore<R> {
    fn on_add(&mut self, record: R) -> FormResult<()> {
        self.insert(record)?;
        Ok(())
    }

    fn on_update(&mut self, id: &str, record: R) -> FormResult<()> {
        self.update(id, record)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Note {
        key: Option<String>,
        text: String,
    }

    impl StoreRecord for Note {
        fn own_id(&self) -> Option<&str> {
            self.key.as_deref()
        }

        fn search_text(&self) -> Vec<&str> {
            vec![self.text.as_str()]
        }
    }

    fn note(text: &str) -> Note {
        Note {
            key: None,
            text: text.into(),
        }
    }

    #[test]
    fn test_insert_mints_id() {
        let mut store = RecordStore::new();
        let a = store.insert(note("first")).unwrap();
        let b = store.insert(note("second")).unwrap();

        assert_ne!(a, b);
        assert_eq!(a.len(), 36);
        assert_eq!(store.len(), 2);
        assert_eq!(store.get(&a).unwrap().text, "first");
    }

    #[test]
    fn test_insert_uses_own_id() {
        let mut store = RecordStore::new();
        let keyed = Note {
            key: Some("n-1".into()),
            text: "keyed".into(),
        };
        assert_eq!(store.insert(keyed.clone()).unwrap(), "n-1");
        assert_eq!(
            store.insert(keyed),
            Err(StoreError::DuplicateId("n-1".into()))
        );
    }

    #[test]
    fn test_update_keeps_position() {
        let mut store = RecordStore::new();
        let a = store.insert(note("a")).unwrap();
        store.insert(note("b")).unwrap();

        store.update(&a, note("a2")).unwrap();
        let texts: Vec<_> = store.iter().map(|s| s.record.text.as_str()).collect();
        assert_eq!(texts, vec!["a2", "b"]);

        assert_eq!(
            store.update("missing", note("x")),
            Err(StoreError::NotFound("missing".into()))
        );
    }

    #[test]
    fn test_update_rejects_foreign_own_id() {
        let mut store = RecordStore::new();
        let keyed = |key: &str, text: &str| Note {
            key: Some(key.into()),
            text: text.into(),
        };
        store.insert(keyed("n-1", "first")).unwrap();
        store.insert(keyed("n-2", "second")).unwrap();

        assert_eq!(
            store.update("n-1", keyed("n-2", "moved")),
            Err(StoreError::IdMismatch {
                id: "n-1".into(),
                own: "n-2".into(),
            })
        );
        assert_eq!(store.get("n-1").unwrap().text, "first");

        store.update("n-1", keyed("n-1", "edited")).unwrap();
        assert_eq!(store.get("n-1").unwrap().text, "edited");
    }

    #[test]
    fn test_remove() {
        let mut store = RecordStore::new();
        let a = store.insert(note("a")).unwrap();

        assert_eq!(store.remove(&a).unwrap().text, "a");
        assert!(store.is_empty());
        assert!(store.remove(&a).is_err());
    }

    #[test]
    fn test_search_case_insensitive() {
        let mut store = RecordStore::new();
        store.insert(note("Amoxicillin")).unwrap();
        store.insert(note("Ibuprofen")).unwrap();

        assert_eq!(store.search("amox").len(), 1);
        assert_eq!(store.search("  ").len(), 2);
        assert!(store.search("zzz").is_empty());
    }

    #[test]
    fn test_sink_update_missing_is_error() {
        let mut store: RecordStore<Note> = RecordStore::new();
        let err = store.on_update("nope", note("x")).unwrap_err();
        assert!(matches!(err, crate::forms::FormError::Store(StoreError::NotFound(_))));
    }
}
