//! GPIO pin abstraction for the two device pins: trigger input and status output.
//!
//! Both traits are deliberately infallible — on the target class of MCU a GPIO
//! register read/write cannot fail, and propagating a phantom error type
//! through every polling loop buys nothing. Implementations that wrap a
//! fallible transport must latch the fault internally.
//!
//! Both traits expose [`release`](TriggerPin::release): returning the pin to
//! a floating/inert state. A play session leases the pins for its duration
//! and must release them before the power loop sleeps, so the pads draw no
//! current while the device is dark.

/// Pin state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PinState {
    /// High (logic 1)
    High,
    /// Low (logic 0)
    Low,
}

impl From<bool> for PinState {
    fn from(value: bool) -> Self {
        if value {
            Self::High
        } else {
            Self::Low
        }
    }
}

impl From<PinState> for bool {
    fn from(value: PinState) -> Self {
        matches!(value, PinState::High)
    }
}

/// The touch/button input used both to advance playback and to wake from sleep.
///
/// The reading is **logical**: `is_pressed` returns `true` while the pad is
/// touched, regardless of the electrical polarity. The hardware adapter owns
/// the inversion (the physical pad is active-low behind an internal pull-up),
/// so the idle steady state is always `false`.
pub trait TriggerPin {
    /// Sample the trigger. `true` = touched/pressed right now.
    fn is_pressed(&self) -> bool;

    /// `true` while the pad is untouched.
    fn is_idle(&self) -> bool {
        !self.is_pressed()
    }

    /// Return the pad to its inert (floating input, no pull) state.
    ///
    /// Called when a play session ends; the sleep controller re-arms the pad
    /// as a wake source afterwards.
    fn release(&mut self);
}

/// Optional busy/loading indicator output.
///
/// Asserted only between "play instruction issued" and "completion wait
/// returned", so an external peripheral (or a probing engineer) can observe
/// when the device is actually working.
pub trait StatusPin {
    /// Drive the indicator high.
    fn set_high(&mut self);

    /// Drive the indicator low.
    fn set_low(&mut self);

    /// Drive the indicator to `state`.
    fn set(&mut self, state: PinState) {
        match state {
            PinState::High => self.set_high(),
            PinState::Low => self.set_low(),
        }
    }

    /// Return the pin to its inert (floating input) state.
    fn release(&mut self);
}
