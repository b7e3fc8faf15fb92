//! Pure play/idle state machines — cursor, idle countdown, timing config.
//!
//! These types deliberately have **no** I/O — they do not sample pins, drive
//! hardware, or sleep. The firmware's session loop owns the polling and
//! feeds observations in; that separation makes the machines trivially
//! testable on the host.

#![cfg_attr(not(test), no_std)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::panic)]
#![deny(clippy::expect_used)]
#![warn(missing_docs)]

pub mod countdown;
pub mod cursor;
pub mod timing;

// Top-level re-exports for convenience
pub use countdown::IdleCountdown;
pub use cursor::PlayCursor;
pub use timing::TimingConfig;
