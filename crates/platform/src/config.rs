//! Application configuration and constants
//!
//! Central configuration values used across the application. Branding,
//! naming, and board wiring reference these constants rather than hardcoding
//! values.

/// The application name
pub const APP_NAME: &str = "ChirpBox";

/// Application version (synchronized with Cargo.toml)
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Directory holding the playable clips, relative to the filesystem root.
pub const CLIP_DIR: &str = "audio";

/// Touch/trigger pad — GP1, active-low behind an internal pull-up.
pub const TRIGGER_PIN: u8 = 1;

/// PWM audio output — GP0.
pub const AUDIO_PIN: u8 = 0;

/// Busy/loading indicator LED — GP25.
pub const STATUS_PIN: u8 = 25;
