//! Timing configuration for the interaction and power loops.
//!
//! One immutable value passed in at construction — no global mutable
//! constants. The defaults give roughly 2 s of post-playback attention
//! (20 × 100 ms) before the device tries to sleep, and a 30 s light-sleep
//! window before it goes fully dark.

use embassy_time::Duration;

/// Immutable timing parameters shared by the session and power loops.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimingConfig {
    /// Idle countdown length in ticks. The countdown refills to this value
    /// on every observed trigger.
    pub idle_ticks: u32,
    /// Length of one idle/polling tick.
    pub tick_period: Duration,
    /// Pause after issuing a play instruction, letting playback spin up
    /// before the completion wait starts polling.
    pub settle_delay: Duration,
    /// How long a light sleep waits for the signal before giving up.
    pub light_sleep_timeout: Duration,
}

impl TimingConfig {
    /// Production timing for the shipped device.
    pub const fn production() -> Self {
        Self {
            idle_ticks: 20,
            tick_period: Duration::from_millis(100),
            settle_delay: Duration::from_millis(500),
            light_sleep_timeout: Duration::from_secs(30),
        }
    }

    /// Millisecond-scale timing so host tests run in real time without
    /// multi-second waits.
    pub const fn fast() -> Self {
        Self {
            idle_ticks: 4,
            tick_period: Duration::from_millis(1),
            settle_delay: Duration::from_millis(1),
            light_sleep_timeout: Duration::from_millis(20),
        }
    }
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self::production()
    }
}
