//! Tiered sleep control.
//!
//! The device knows exactly two low-power states and they differ in kind, not
//! degree:
//!
//! - **Light sleep** suspends peripherals but preserves program state; it ends
//!   on the wake signal or a timeout and execution resumes at the call site
//!   with a [`SleepWake`] saying which.
//! - **Deep sleep** tears the process down. The only exit is an external wake
//!   that restarts the firmware from its entry point, so the call diverges.
//!
//! The implementation owns the wake pad — callers never pass a pin in. This
//! keeps the "same pad is both trigger and wake source" wiring in one place.

use embassy_time::Duration;

/// Why a light sleep attempt ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SleepWake {
    /// The external wake signal fired.
    Signal,
    /// The timeout elapsed with no signal.
    Timeout,
}

/// Why the firmware is running right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BootReason {
    /// Power applied, reset button, or flash — not a sleep exit.
    ColdBoot,
    /// Deep sleep ended by the wake pad.
    PinWake,
    /// Deep sleep ended by a timer source.
    ///
    /// Only the pad wake is armed before deep sleep in the current hardware,
    /// so this value should be unreachable after deep sleep; it is kept for a
    /// historical long-duration wake timer and for scripted tests.
    TimerWake,
}

/// Tiered sleep controller.
pub trait SleepControl {
    /// Why the process started. Stable for the process lifetime.
    fn boot_reason(&self) -> BootReason;

    /// Enter light sleep for at most `timeout`, waking early on the signal.
    fn light_sleep(
        &mut self,
        timeout: Duration,
    ) -> impl core::future::Future<Output = SleepWake>;

    /// Enter deep sleep armed on the wake signal. Does not return; a wake
    /// restarts the whole process from its entry point.
    fn deep_sleep(&mut self) -> !;
}
