//! Registration engine
//!
//! Orchestrates validation, fingerprinting, subject locking, version
//! assignment, and persistence. This is the only code path that creates
//! schema records.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info};

use crate::error::{RegistryError, Result};
use crate::fingerprint::Fingerprint;
use crate::record::{Registration, SchemaRecord};
use crate::storage::StorageGateway;
use crate::validator::Validator;

/// Default bound on waiting for a subject's registration lock
pub const DEFAULT_LOCK_TIMEOUT: Duration = Duration::from_secs(5);

/// The schema registration engine
///
/// One engine instance is shared across all inbound requests; it holds no
/// mutable state of its own, so concurrent calls only contend on the
/// per-subject locks inside the storage gateway.
pub struct RegistrationEngine<S: StorageGateway> {
    storage: Arc<S>,
    validator: Validator,
    lock_timeout: Duration,
}

impl<S: StorageGateway> RegistrationEngine<S> {
    /// Create an engine over the given storage gateway
    pub fn new(storage: Arc<S>, validator: Validator) -> Self {
        Self {
            storage,
            validator,
            lock_timeout: DEFAULT_LOCK_TIMEOUT,
        }
    }

    /// Override the bound on subject-lock acquisition
    pub fn with_lock_timeout(mut self, timeout: Duration) -> Self {
        self.lock_timeout = timeout;
        self
    }

    /// Register `schema_text` under `subject`
    ///
    /// Returns the existing record when the subject already holds identical
    /// content, otherwise assigns the next version and persists a new record.
    /// Validation failures abort before any storage access.
    pub fn register(&self, subject: &str, schema_text: &str) -> Result<Registration> {
        if subject.is_empty() {
            return Err(RegistryError::InvalidSubject);
        }
        self.validator.validate(schema_text)?;

        let fingerprint = Fingerprint::of(schema_text);

        // Critical section: dedup lookup, max-version read, and insert must
        // not interleave with another registration for the same subject.
        let _lock = self.storage.lock_subject(subject, self.lock_timeout)?;

        if let Some(existing) = self.storage.find_by_fingerprint(subject, &fingerprint)? {
            debug!(
                subject,
                version = existing.version,
                "schema already registered, returning existing version"
            );
            return Ok(Registration {
                record: existing,
                is_new: false,
            });
        }

        let next_version = self.storage.max_version(subject)?.map_or(1, |v| v + 1);
        let record = self
            .storage
            .insert(subject, next_version, schema_text, &fingerprint)?;

        info!(
            subject,
            version = record.version,
            id = record.id,
            "registered new schema version"
        );
        Ok(Registration {
            record,
            is_new: true,
        })
    }

    /// The record with the highest version under `subject`
    ///
    /// Lock-free point-in-time read; may race with an in-flight registration
    /// and observe either the pre- or post-registration state.
    pub fn latest(&self, subject: &str) -> Result<SchemaRecord> {
        self.storage
            .find_latest(subject)?
            .ok_or_else(|| RegistryError::SubjectNotFound(subject.to_string()))
    }

    /// All registered subject names, sorted
    pub fn list_subjects(&self) -> Result<Vec<String>> {
        self.storage.list_subjects()
    }

    /// Versions registered under `subject`, ascending
    pub fn list_versions(&self, subject: &str) -> Result<Vec<u32>> {
        self.storage
            .list_versions(subject)?
            .ok_or_else(|| RegistryError::SubjectNotFound(subject.to_string()))
    }
}
