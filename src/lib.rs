//! Schemabank
//!
//! A subject-versioned, append-only schema registry: schemas are submitted
//! under a named subject, receive a contiguous version number scoped to that
//! subject, and identical content is deduplicated per subject by SHA256
//! fingerprint.
//!
//! ## Features
//!
//! - **Gap-free versioning**: each subject's versions form a contiguous
//!   sequence from 1, serialized by a per-subject lock
//! - **Content dedup**: re-registering identical text returns the existing
//!   version instead of allocating a new one
//! - **Byte-exact fingerprints**: SHA256 over the submitted text, no
//!   normalization
//! - **Syntactic validation**: AVRO (default) or JSON Schema, checked before
//!   anything touches storage
//! - **Pluggable storage**: the engine talks to a [`StorageGateway`] trait;
//!   an in-memory transactional store ships in-crate
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//! use schemabank::{MemoryStore, RegistrationEngine, Validator};
//!
//! let engine = RegistrationEngine::new(Arc::new(MemoryStore::new()), Validator::default());
//!
//! let schema = r#"{"type": "record", "name": "User", "fields": [{"name": "id", "type": "long"}]}"#;
//! let first = engine.register("user-value", schema).unwrap();
//! assert_eq!(first.record.version, 1);
//! assert!(first.is_new);
//!
//! // Identical content is idempotent
//! let again = engine.register("user-value", schema).unwrap();
//! assert!(!again.is_new);
//! assert_eq!(again.record.id, first.record.id);
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod fingerprint;
pub mod locks;
pub mod record;
pub mod server;
pub mod storage;
pub mod validator;

pub use config::RegistryConfig;
pub use engine::RegistrationEngine;
pub use error::{RegistryError, Result};
pub use fingerprint::Fingerprint;
pub use locks::{SubjectLock, SubjectLocks};
pub use record::{Registration, SchemaRecord};
pub use storage::{MemoryStore, StorageGateway};
pub use validator::{SchemaFormat, Validator};
