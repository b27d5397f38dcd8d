//! Argus Hardware Abstraction Layer
//!
//! This crate defines the storage abstraction consumed by the Argus core
//! crates. Chip-specific backends (an ESP32 NVS partition, a
//! sequential-storage region on raw flash, etc.) implement the traits
//! defined here; the core never touches a concrete flash driver.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Application (argus-core, firmware)     │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  argus-hal (this crate - traits)        │
//! └─────────────────────────────────────────┘
//!                     │
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │ chip backend  │       │ mem::MemStore │
//! │ (out of tree) │       │ (host tests)  │
//! └───────────────┘       └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`store::BlobStore`] - Namespaced key-value blob storage
//! - [`store::NamespaceHandle`] - Scoped access to one open namespace

#![no_std]
#![deny(unsafe_code)]

pub mod mem;
pub mod store;

// Re-export key traits at crate root for convenience
pub use store::{BlobStore, NamespaceHandle, OpenMode, StoreError};
