//! PowerCycle — the device's outer state machine.
//!
//! ```text
//! boot ──► Active (PlaySession) ──► LightSleep(timeout) ──┬─ signal ─► Active
//!                                                         └─ timeout ─► DeepSleep
//! ```
//!
//! [`run_until_dark`] is the testable core: it returns a [`PowerVerdict`]
//! instead of touching the non-returning deep-sleep primitive, so scripted
//! sleep controllers can drive every path on the host. [`commit`] is the
//! thin diverging shell the entry points hand the verdict to.

use catalog::{CatalogError, ClipCatalog, Resolver};
use embassy_time::{Duration, Timer};
use platform::audio::ClipPlayer;
use platform::gpio::{StatusPin, TriggerPin};
use platform::power::{SleepControl, SleepWake};
use platform::storage::Storage;
use playback::TimingConfig;
use thiserror_no_std::Error;

use crate::boot;
use crate::session::{PlaySession, SessionError};

/// How a power cycle ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PowerVerdict {
    /// No further activity — the device should go dark.
    DeepSleep,
    /// The clip directory produced zero usable clips; there is nothing to
    /// play, ever. The device parks instead of sleeping.
    NoClips,
}

/// Fatal power-cycle errors.
#[derive(Debug, Error)]
pub enum PowerError<SE, PE> {
    /// The catalog scan failed (anything but a missing directory).
    #[error("catalog build failed")]
    Catalog(CatalogError<SE>),
    /// A play session died on a player fault.
    #[error("play session failed")]
    Session(SessionError<PE>),
}

/// Run the interactive life of the device until it should go dark.
///
/// Builds the catalog once, then alternates play sessions and light sleeps
/// until a light sleep times out with no signal. Each session starts with a
/// fresh play cursor; only the resolver's random state carries across.
#[allow(clippy::too_many_arguments)] // one call site per target; a builder would be ceremony
pub async fn run_until_dark<St, P, T, S, Sl>(
    storage: &mut St,
    player: &mut P,
    trigger: &mut T,
    mut status: Option<&mut S>,
    sleep: &mut Sl,
    timing: TimingConfig,
    clip_dir: &str,
    seed: u64,
) -> Result<PowerVerdict, PowerError<St::Error, P::Error>>
where
    St: Storage,
    P: ClipPlayer,
    T: TriggerPin,
    S: StatusPin,
    Sl: SleepControl,
{
    if boot::skip_playback(sleep.boot_reason()) {
        #[cfg(feature = "defmt")]
        defmt::info!("timer wake — going straight back to deep sleep");
        return Ok(PowerVerdict::DeepSleep);
    }

    let mut catalog = ClipCatalog::build(storage, clip_dir)
        .await
        .map_err(PowerError::Catalog)?;
    if catalog.is_empty() {
        return Ok(PowerVerdict::NoClips);
    }
    #[cfg(feature = "defmt")]
    defmt::info!(
        "catalog ready: {=usize} clips, max index {=u32}",
        catalog.len(),
        catalog.max_index()
    );

    let mut resolver = Resolver::with_seed(seed);

    PlaySession::new(
        &mut catalog,
        &mut resolver,
        &mut *player,
        &mut *trigger,
        status.as_deref_mut(),
        timing,
    )
    .run()
    .await
    .map_err(PowerError::Session)?;

    loop {
        match sleep.light_sleep(timing.light_sleep_timeout).await {
            SleepWake::Signal => {
                #[cfg(feature = "defmt")]
                defmt::debug!("light sleep ended by signal — new session");
                PlaySession::new(
                    &mut catalog,
                    &mut resolver,
                    &mut *player,
                    &mut *trigger,
                    status.as_deref_mut(),
                    timing,
                )
                .run()
                .await
                .map_err(PowerError::Session)?;
            }
            SleepWake::Timeout => break,
        }
    }

    Ok(PowerVerdict::DeepSleep)
}

/// Commit a verdict. Deep sleep diverges by restarting the process on wake;
/// the no-clips park idles forever. Never actually returns — the
/// `Infallible` is only there because `-> !` is not expressible on an
/// `async fn`.
pub async fn commit<Sl: SleepControl>(
    verdict: PowerVerdict,
    sleep: &mut Sl,
) -> core::convert::Infallible {
    match verdict {
        PowerVerdict::DeepSleep => sleep.deep_sleep(),
        PowerVerdict::NoClips => {
            #[cfg(feature = "defmt")]
            defmt::warn!("no playable clips — parking");
            loop {
                // Known gap: an assetless device parks at full idle power
                // rather than sleeping. Kept until the intended behavior is
                // decided.
                Timer::after(Duration::from_secs(60)).await;
            }
        }
    }
}
