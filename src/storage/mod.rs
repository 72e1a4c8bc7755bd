//! Storage gateway for schema records
//!
//! The registration engine talks to storage only through [`StorageGateway`].
//! The contract requires that, while a caller holds the [`SubjectLock`] for a
//! subject, no other caller can read or mutate that subject's version state
//! through the locking path: the dedup lookup, the max-version read, and the
//! insert all happen under the same lock, which is what makes the version
//! sequence gap-free under concurrent registration.

mod memory;

pub use memory::MemoryStore;

use std::time::Duration;

use crate::error::Result;
use crate::fingerprint::Fingerprint;
use crate::locks::SubjectLock;
use crate::record::SchemaRecord;

/// Transactional store for schema records
///
/// Implementations must make `insert` atomic: readers never observe a
/// partially written record. A relational backend would implement
/// `lock_subject` as a row lock inside the registration transaction; the
/// in-memory backend uses a keyed mutex registry.
pub trait StorageGateway: Send + Sync {
    /// Acquire the exclusive registration lock for `subject`
    fn lock_subject(&self, subject: &str, timeout: Duration) -> Result<SubjectLock>;

    /// Highest version registered under `subject`, or `None` for a fresh subject
    fn max_version(&self, subject: &str) -> Result<Option<u32>>;

    /// Find the record with this content fingerprint under `subject`
    fn find_by_fingerprint(
        &self,
        subject: &str,
        fingerprint: &Fingerprint,
    ) -> Result<Option<SchemaRecord>>;

    /// Insert a new record, assigning its `id`
    fn insert(
        &self,
        subject: &str,
        version: u32,
        schema_text: &str,
        fingerprint: &Fingerprint,
    ) -> Result<SchemaRecord>;

    /// The record with the highest version under `subject`
    fn find_latest(&self, subject: &str) -> Result<Option<SchemaRecord>>;

    /// All subject names, sorted
    fn list_subjects(&self) -> Result<Vec<String>>;

    /// Versions under `subject` in ascending order, or `None` for an unknown subject
    fn list_versions(&self, subject: &str) -> Result<Option<Vec<u32>>>;
}
