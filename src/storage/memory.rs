//! In-memory storage backend

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use chrono::Utc;
use parking_lot::RwLock;

use crate::error::Result;
use crate::fingerprint::Fingerprint;
use crate::locks::{SubjectLock, SubjectLocks};
use crate::record::SchemaRecord;
use crate::storage::StorageGateway;

/// In-process store backing the registry
///
/// Records live in a map of subject to version-ordered records. Every mutation
/// happens under a single write-lock acquisition, so `find_latest` and the
/// listing reads observe either the pre- or post-insert state, never a partial
/// write.
pub struct MemoryStore {
    records: RwLock<HashMap<String, Vec<SchemaRecord>>>,
    next_id: AtomicU64,
    locks: SubjectLocks,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            records: RwLock::new(HashMap::new()),
            next_id: AtomicU64::new(1),
            locks: SubjectLocks::new(),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl StorageGateway for MemoryStore {
    fn lock_subject(&self, subject: &str, timeout: Duration) -> Result<SubjectLock> {
        self.locks.acquire(subject, timeout)
    }

    fn max_version(&self, subject: &str) -> Result<Option<u32>> {
        let records = self.records.read();
        Ok(records
            .get(subject)
            .and_then(|rows| rows.iter().map(|r| r.version).max()))
    }

    fn find_by_fingerprint(
        &self,
        subject: &str,
        fingerprint: &Fingerprint,
    ) -> Result<Option<SchemaRecord>> {
        let records = self.records.read();
        Ok(records
            .get(subject)
            .and_then(|rows| rows.iter().find(|r| &r.fingerprint == fingerprint))
            .cloned())
    }

    fn insert(
        &self,
        subject: &str,
        version: u32,
        schema_text: &str,
        fingerprint: &Fingerprint,
    ) -> Result<SchemaRecord> {
        let record = SchemaRecord {
            id: self.next_id.fetch_add(1, Ordering::Relaxed),
            subject: subject.to_string(),
            version,
            schema: schema_text.to_string(),
            fingerprint: fingerprint.clone(),
            created_at: Utc::now(),
        };

        let mut records = self.records.write();
        records
            .entry(subject.to_string())
            .or_default()
            .push(record.clone());

        Ok(record)
    }

    fn find_latest(&self, subject: &str) -> Result<Option<SchemaRecord>> {
        let records = self.records.read();
        Ok(records
            .get(subject)
            .and_then(|rows| rows.iter().max_by_key(|r| r.version))
            .cloned())
    }

    fn list_subjects(&self) -> Result<Vec<String>> {
        let records = self.records.read();
        let mut subjects: Vec<String> = records.keys().cloned().collect();
        subjects.sort();
        Ok(subjects)
    }

    fn list_versions(&self, subject: &str) -> Result<Option<Vec<u32>>> {
        let records = self.records.read();
        Ok(records.get(subject).map(|rows| {
            let mut versions: Vec<u32> = rows.iter().map(|r| r.version).collect();
            versions.sort_unstable();
            versions
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fp(text: &str) -> Fingerprint {
        Fingerprint::of(text)
    }

    #[test]
    fn test_fresh_subject_has_no_versions() {
        let store = MemoryStore::new();
        assert_eq!(store.max_version("orders").unwrap(), None);
        assert_eq!(store.find_latest("orders").unwrap(), None);
        assert_eq!(store.list_versions("orders").unwrap(), None);
    }

    #[test]
    fn test_insert_assigns_distinct_ids() {
        let store = MemoryStore::new();
        let a = store.insert("orders", 1, "a", &fp("a")).unwrap();
        let b = store.insert("orders", 2, "b", &fp("b")).unwrap();
        assert_ne!(a.id, b.id);
        assert_eq!(store.max_version("orders").unwrap(), Some(2));
    }

    #[test]
    fn test_find_by_fingerprint_is_subject_scoped() {
        let store = MemoryStore::new();
        store.insert("orders", 1, "a", &fp("a")).unwrap();

        assert!(store.find_by_fingerprint("orders", &fp("a")).unwrap().is_some());
        assert!(store.find_by_fingerprint("payments", &fp("a")).unwrap().is_none());
        assert!(store.find_by_fingerprint("orders", &fp("b")).unwrap().is_none());
    }

    #[test]
    fn test_find_latest_returns_highest_version() {
        let store = MemoryStore::new();
        store.insert("orders", 1, "a", &fp("a")).unwrap();
        store.insert("orders", 2, "b", &fp("b")).unwrap();

        let latest = store.find_latest("orders").unwrap().unwrap();
        assert_eq!(latest.version, 2);
        assert_eq!(latest.schema, "b");
    }

    #[test]
    fn test_listings() {
        let store = MemoryStore::new();
        store.insert("payments", 1, "a", &fp("a")).unwrap();
        store.insert("orders", 1, "b", &fp("b")).unwrap();
        store.insert("orders", 2, "c", &fp("c")).unwrap();

        assert_eq!(store.list_subjects().unwrap(), vec!["orders", "payments"]);
        assert_eq!(store.list_versions("orders").unwrap(), Some(vec![1, 2]));
    }
}
