//! Hardware Abstraction Layer (HAL) for the ChirpBox clip player
//!
//! This crate provides trait-based abstractions for every hardware
//! collaborator of the device, enabling development and testing without
//! physical hardware.
//!
//! # Architecture Layers
//!
//! ```text
//! Application Layer (firmware crate)
//!         ↓
//! Feature Layers (catalog, playback)
//!         ↓
//! Platform HAL (this crate - trait abstractions)
//!         ↓
//! Hardware Layer (Embassy HAL + PAC)
//! ```
//!
//! # Collaborators
//!
//! - [`TriggerPin`] / [`StatusPin`] - the touch input and busy indicator
//! - [`ClipPlayer`] - audio clip load/decode and single-channel playback
//! - [`Storage`] - directory listing and file access for the clip directory
//! - [`SleepControl`] - tiered light/deep sleep and the boot wake reason
//!
//! # Features
//!
//! - `std`: Enable standard library support (desktop simulator + tests)
//! - `hardware`: Physical hardware implementations
//! - `defmt`: Enable defmt logging derives

// ── Lint policy ─────────────────────────────────────────────────────────────
#![deny(clippy::unwrap_used)] // no .unwrap() in production code
#![deny(clippy::expect_used)] // no .expect() in production code
#![deny(clippy::panic)] // no panic!() in production code
#![deny(unused_must_use)]
// ────────────────────────────────────────────────────────────────────────────
#![cfg_attr(not(any(test, feature = "std")), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_op_in_unsafe_fn)]
#![warn(clippy::print_stdout)] // prefer tracing/defmt over println! in lib code
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)] // hardware accessors — callers decide
#![allow(async_fn_in_trait)] // single-threaded device: Send bounds not needed

pub mod audio;
pub mod config;
pub mod gpio;
pub mod power;
pub mod storage;

#[cfg(any(test, feature = "std"))]
pub mod storage_local;

#[cfg(any(test, feature = "std"))]
pub mod mocks;

// Re-export main high-level traits
pub use audio::ClipPlayer;
pub use gpio::{PinState, StatusPin, TriggerPin};
pub use power::{BootReason, SleepControl, SleepWake};
pub use storage::{DirError, DirListing, File, FileName, Storage, MAX_DIR_ENTRIES, MAX_NAME_LEN};
