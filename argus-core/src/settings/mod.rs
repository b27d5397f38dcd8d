//! Persistent device settings
//!
//! The settings record (network identity, Wi-Fi credentials, time and
//! update endpoints, static addressing) lives in a single blob in the
//! backing store. [`store::SettingsStore`] owns the in-memory record and
//! mediates all persistence:
//!
//! - `startup` loads the record, validating its layout fingerprint, and
//!   falls back to compiled-in defaults on any failure
//! - `save` rewrites the whole record as one committed blob
//! - `reset` restores the compiled-in defaults
//! - `shutdown` saves and releases the backing store

pub mod defaults;
pub mod record;
pub mod store;

pub use record::SettingsRecord;
pub use store::{SettingsError, SettingsStore};
