//! Persisted schema records

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::fingerprint::Fingerprint;

/// A registered schema version
///
/// Records are write-once: created by registration, read by everything else,
/// never updated or deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemaRecord {
    /// Storage-assigned identifier, unique across the store
    pub id: u64,
    /// Subject this schema was registered under (case-sensitive)
    pub subject: String,
    /// Version within the subject, contiguous from 1
    pub version: u32,
    /// Raw schema text, stored verbatim
    pub schema: String,
    /// SHA256 fingerprint of `schema`, unique within the subject
    pub fingerprint: Fingerprint,
    /// When this record was inserted
    pub created_at: DateTime<Utc>,
}

/// Result of a registration call
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Registration {
    /// The record the submission resolved to
    pub record: SchemaRecord,
    /// True when a new version was created; false when the content already
    /// existed under this subject and the existing version was returned
    pub is_new: bool,
}
