//! Boot-reason policy.
//!
//! The first decision after reset is whether to play at all. A pin wake or a
//! cold boot means someone may be touching the pad — go interactive. A
//! timer-kind wake means the previous run already sat out its light-sleep
//! window with no activity, so the right move is straight back to dark.
//!
//! # Reachability
//!
//! Only the pad wake is armed before deep sleep on current hardware, so
//! [`BootReason::TimerWake`] should never be observed after a deep sleep.
//! The branch is kept anyway: a long-duration deep-sleep wake timer existed
//! on an earlier board revision, the policy is inert when unreachable, and
//! scripted sleep controllers exercise it in tests.

use platform::power::BootReason;

/// `true` when this boot should skip playback and return to deep sleep
/// immediately.
pub fn skip_playback(reason: BootReason) -> bool {
    matches!(reason, BootReason::TimerWake)
}
