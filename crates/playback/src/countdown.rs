//! IdleCountdown — how long the device stays attentive after playback.

/// Tick-based idle countdown.
///
/// Starts full, loses one per tick, refills to full on any trigger. The
/// session loop exits — and the power loop may sleep — only when it reaches
/// zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdleCountdown {
    full: u32,
    remaining: u32,
}

impl IdleCountdown {
    /// A full countdown of `ticks`.
    pub const fn new(ticks: u32) -> Self {
        Self { full: ticks, remaining: ticks }
    }

    /// Consume one tick.
    pub fn tick(&mut self) {
        self.remaining = self.remaining.saturating_sub(1);
    }

    /// Refill to the full tick count (a trigger was observed).
    pub fn reset(&mut self) {
        self.remaining = self.full;
    }

    /// `true` once every tick has been consumed without a reset.
    pub const fn expired(&self) -> bool {
        self.remaining == 0
    }

    /// Ticks left before expiry.
    pub const fn remaining(&self) -> u32 {
        self.remaining
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expires_after_exactly_full_ticks() {
        let mut cd = IdleCountdown::new(3);
        cd.tick();
        cd.tick();
        assert!(!cd.expired());
        cd.tick();
        assert!(cd.expired());
    }

    #[test]
    fn reset_refills_to_full() {
        let mut cd = IdleCountdown::new(3);
        cd.tick();
        cd.tick();
        cd.reset();
        assert_eq!(cd.remaining(), 3);
        assert!(!cd.expired());
    }

    #[test]
    fn tick_saturates_at_zero() {
        let mut cd = IdleCountdown::new(1);
        cd.tick();
        cd.tick();
        assert!(cd.expired());
        assert_eq!(cd.remaining(), 0);
    }
}
