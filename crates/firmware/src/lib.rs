//! ChirpBox Firmware
//!
//! Battery-powered, touch-triggered audio clip player for RP2040.
//!
//! # Architecture
//!
//! This firmware follows a layered architecture:
//!
//! ```text
//! Application Layer (main.rs, power, session)
//!         ↓
//! Feature crates (catalog, playback)
//!         ↓
//! Platform HAL (trait abstractions)
//!         ↓
//! Hardware (Embassy, RP2040)
//! ```
//!
//! The device's whole life is the power cycle: play clips while someone is
//! touching the pad, count down an idle window, light-sleep for a while in
//! case they come back, then deep-sleep until the next touch reboots us.
//!
//! # Features
//!
//! - `hardware` - Build for the RP2040 target (embassy-rp, defmt)
//! - `simulator` - Build the desktop simulator example (std, rodio, tracing)
//!
//! # Examples
//!
//! ## Hardware Target
//!
//! ```bash
//! cargo build --release --target thumbv6m-none-eabi --features hardware
//! ```
//!
//! ## Simulator
//!
//! ```bash
//! cargo run --example simulator --features simulator
//! ```

#![cfg_attr(all(not(test), not(feature = "std")), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::await_holding_lock)]
#![deny(unsafe_op_in_unsafe_fn)]
#![warn(clippy::print_stdout)] // prefer tracing/defmt over println! in lib code
// Intentional allows for this codebase:
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]

pub mod boot;
pub mod power;
pub mod session;

#[cfg(feature = "hardware")]
pub mod hal;

// Re-export key types
pub use power::{PowerError, PowerVerdict};
pub use session::{PlaySession, SessionError};
