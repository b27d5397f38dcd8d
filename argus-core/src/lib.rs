//! Board-agnostic core logic for the Argus firmware
//!
//! This crate contains the persistent-settings subsystem: the settings
//! record consumed by network, time and update bring-up, its compiled-in
//! defaults, and the load/validate/fallback lifecycle that keeps the
//! record intact across power cycles. Storage backends are abstracted
//! behind the `argus-hal` traits, so the whole crate runs on the host.

#![no_std]
#![deny(unsafe_code)]

// This module must come first so its macros are visible to the rest of
// the crate.
mod fmt;

pub mod net;
pub mod settings;
