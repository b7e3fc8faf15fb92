//! PlaySession — one awake episode of the device.
//!
//! A session starts because something woke the device (boot, or the pad
//! during light sleep), so it always plays the clip for index 0 first. It
//! then stays attentive for an idle countdown, replaying and advancing the
//! cursor on every touch, and returns once the countdown runs out.
//!
//! # Pin lease
//!
//! The session borrows the trigger pad and the optional status LED for its
//! whole run and releases both to their floating state on **every** exit
//! path — including error returns — via its `Drop` impl. The power loop
//! re-acquires them on the next session; between sessions the sleep
//! controller owns the pad as a wake source.
//!
//! # Completion wait
//!
//! Playback is never cut short: a touch during a clip is only remembered
//! (as `next_play`) and acted on after the clip ends naturally.

use catalog::{CacheError, ClipCatalog, Resolver};
use embassy_time::Timer;
use platform::audio::ClipPlayer;
use platform::gpio::{PinState, StatusPin, TriggerPin};
use playback::{IdleCountdown, PlayCursor, TimingConfig};
use thiserror_no_std::Error;

/// Errors ending a session early. All map to the player; pins and catalog
/// state cannot fail.
#[derive(Debug, Error)]
pub enum SessionError<E> {
    /// The clip cache is over capacity.
    #[error("clip cache over capacity")]
    CacheFull,
    /// A clip failed to load/decode.
    #[error("clip failed to load")]
    Load(E),
    /// The player refused to start a clip.
    #[error("player failed to start")]
    Player(E),
}

impl<E> From<CacheError<E>> for SessionError<E> {
    fn from(err: CacheError<E>) -> Self {
        match err {
            CacheError::Full => Self::CacheFull,
            CacheError::Load(e) => Self::Load(e),
        }
    }
}

/// One playback-and-idle-wait episode. See the module docs.
pub struct PlaySession<'a, P, T, S>
where
    P: ClipPlayer,
    T: TriggerPin,
    S: StatusPin,
{
    catalog: &'a mut ClipCatalog<P::Clip>,
    resolver: &'a mut Resolver,
    player: &'a mut P,
    trigger: &'a mut T,
    status: Option<&'a mut S>,
    timing: TimingConfig,
}

impl<'a, P, T, S> PlaySession<'a, P, T, S>
where
    P: ClipPlayer,
    T: TriggerPin,
    S: StatusPin,
{
    /// Lease the collaborators for one session.
    pub fn new(
        catalog: &'a mut ClipCatalog<P::Clip>,
        resolver: &'a mut Resolver,
        player: &'a mut P,
        trigger: &'a mut T,
        status: Option<&'a mut S>,
        timing: TimingConfig,
    ) -> Self {
        Self { catalog, resolver, player, trigger, status, timing }
    }

    /// Run the session to its idle exit. Consumes the lease; the pins are
    /// released when this returns, error or not.
    pub async fn run(mut self) -> Result<(), SessionError<P::Error>> {
        let mut cursor = PlayCursor::new();
        let mut countdown = IdleCountdown::new(self.timing.idle_ticks);

        // Something woke us — the first clip plays unconditionally.
        let mut next_play = self.play_step(&mut cursor).await?;

        while !countdown.expired() {
            if next_play || self.trigger.is_pressed() {
                next_play = self.play_step(&mut cursor).await?;
                countdown.reset();
            }
            Timer::after(self.timing.tick_period).await;
            countdown.tick();
        }
        Ok(())
    }

    /// Resolve, play, and wait out the clip for the current cursor, then
    /// advance the cursor. Returns the `next_play` flag: a touch was seen
    /// during playback and the next clip should start without waiting on
    /// the idle countdown.
    async fn play_step(
        &mut self,
        cursor: &mut PlayCursor,
    ) -> Result<bool, SessionError<P::Error>> {
        let next_play = match self.resolver.resolve(self.catalog, cursor.value()) {
            Some(pos) => {
                let name = match self.catalog.entry(pos) {
                    Some(entry) => entry.name.clone(),
                    None => return Ok(false),
                };
                #[cfg(feature = "defmt")]
                defmt::debug!("play cursor={=u32} clip={=str}", cursor.value(), name.as_str());

                self.set_status(PinState::High);
                let clip = self.catalog.open(name.as_str(), &mut *self.player).await?;
                self.player.play(clip).await.map_err(SessionError::Player)?;
                let observed = self.wait_for_completion_or_signal().await;
                self.set_status(PinState::Low);
                observed
            }
            None => {
                // Nothing playable for this index or below — stay silent.
                #[cfg(feature = "defmt")]
                defmt::debug!("no playable clip for cursor={=u32}", cursor.value());
                false
            }
        };
        cursor.advance(self.catalog.max_index());
        Ok(next_play)
    }

    /// Let playback settle, then poll until the clip ends, remembering any
    /// touch seen along the way.
    async fn wait_for_completion_or_signal(&mut self) -> bool {
        Timer::after(self.timing.settle_delay).await;
        // Covers the clip already being over with the pad still held.
        let mut observed = self.trigger.is_pressed();
        while self.player.is_playing() {
            if self.trigger.is_pressed() {
                observed = true;
            }
            Timer::after(self.timing.tick_period).await;
        }
        observed
    }

    fn set_status(&mut self, state: PinState) {
        if let Some(status) = self.status.as_mut() {
            status.set(state);
        }
    }
}

impl<P, T, S> Drop for PlaySession<'_, P, T, S>
where
    P: ClipPlayer,
    T: TriggerPin,
    S: StatusPin,
{
    fn drop(&mut self) {
        self.trigger.release();
        if let Some(status) = self.status.as_mut() {
            status.release();
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use platform::mocks::{MockPlayer, MockStatus, MockStorage, MockTrigger};

    async fn built(names: &[&str]) -> ClipCatalog<platform::mocks::MockClip> {
        let mut storage = MockStorage::with_files(names);
        ClipCatalog::build(&mut storage, "audio").await.unwrap()
    }

    fn timing() -> TimingConfig {
        TimingConfig::fast() // 4 idle ticks, 1 ms periods
    }

    #[tokio::test]
    async fn idle_session_plays_once_then_expires() {
        let mut catalog = built(&["0-2_hello.wav"]).await;
        let mut resolver = Resolver::with_seed(1);
        let mut player = MockPlayer::new(2);
        let mut trigger = MockTrigger::idle();
        let mut status = MockStatus::new();

        PlaySession::new(
            &mut catalog,
            &mut resolver,
            &mut player,
            &mut trigger,
            Some(&mut status),
            timing(),
        )
        .run()
        .await
        .unwrap();

        assert_eq!(player.played, ["0-2_hello.wav"]);
        // Busy flag framed the one playback.
        assert_eq!(status.events, [PinState::High, PinState::Low]);
    }

    #[tokio::test]
    async fn touch_during_playback_queues_immediate_replay() {
        let mut catalog = built(&["0-9_clip.wav"]).await;
        let mut resolver = Resolver::with_seed(1);
        let mut player = MockPlayer::new(2);
        // First wait samples the pad 3 times (pre-poll + 2 playing frames);
        // the second read is a touch. All later reads are idle.
        let mut trigger = MockTrigger::scripted(&[false, true]);
        let mut status = MockStatus::new();

        PlaySession::new(
            &mut catalog,
            &mut resolver,
            &mut player,
            &mut trigger,
            Some(&mut status),
            timing(),
        )
        .run()
        .await
        .unwrap();

        // The remembered touch replayed without a fresh pad read.
        assert_eq!(player.played.len(), 2);
    }

    #[tokio::test]
    async fn touch_during_idle_countdown_replays_and_resets() {
        let mut catalog = built(&["0-9_clip.wav"]).await;
        let mut resolver = Resolver::with_seed(1);
        let mut player = MockPlayer::new(1);
        // Playback wait consumes 2 reads (pre-poll + 1 playing frame); the
        // 3rd read is the first idle-loop sample — a touch.
        let mut trigger = MockTrigger::scripted(&[false, false, true]);
        let mut status = MockStatus::new();

        PlaySession::new(
            &mut catalog,
            &mut resolver,
            &mut player,
            &mut trigger,
            Some(&mut status),
            timing(),
        )
        .run()
        .await
        .unwrap();

        assert_eq!(player.played.len(), 2);
        assert_eq!(status.events.len(), 4); // High/Low per playback
    }

    #[tokio::test]
    async fn cursor_advances_and_wraps_across_replays() {
        // Rules: 0 → zero.wav, 1 → one.wav; max_index = 1, so the third
        // play wraps back to zero.wav.
        let mut catalog = built(&["0-zero.wav", "1-one.wav"]).await;
        let mut resolver = Resolver::with_seed(1);
        let mut player = MockPlayer::new(1);
        // Two touches in the idle loop trigger replays two and three.
        let mut trigger = MockTrigger::scripted(&[false, false, true, false, false, true]);
        let mut status = MockStatus::new();

        PlaySession::new(
            &mut catalog,
            &mut resolver,
            &mut player,
            &mut trigger,
            Some(&mut status),
            timing(),
        )
        .run()
        .await
        .unwrap();

        assert_eq!(player.played, ["0-zero.wav", "1-one.wav", "0-zero.wav"]);
    }

    #[tokio::test]
    async fn empty_catalog_is_a_silent_session() {
        let mut catalog: ClipCatalog<platform::mocks::MockClip> = ClipCatalog::empty();
        let mut resolver = Resolver::with_seed(1);
        let mut player = MockPlayer::new(1);
        let mut trigger = MockTrigger::idle();
        let mut status = MockStatus::new();

        PlaySession::new(
            &mut catalog,
            &mut resolver,
            &mut player,
            &mut trigger,
            Some(&mut status),
            timing(),
        )
        .run()
        .await
        .unwrap();

        assert!(player.played.is_empty());
        assert!(status.events.is_empty());
    }

    #[tokio::test]
    async fn pins_release_on_normal_exit() {
        let mut catalog = built(&["0-2_hello.wav"]).await;
        let mut resolver = Resolver::with_seed(1);
        let mut player = MockPlayer::new(1);
        let mut trigger = MockTrigger::idle();
        let mut status = MockStatus::new();

        PlaySession::new(
            &mut catalog,
            &mut resolver,
            &mut player,
            &mut trigger,
            Some(&mut status),
            timing(),
        )
        .run()
        .await
        .unwrap();

        assert!(trigger.was_released());
        assert!(status.was_released());
    }

    #[tokio::test]
    async fn pins_release_on_error_exit() {
        let mut catalog = built(&["0-2_hello.wav"]).await;
        let mut resolver = Resolver::with_seed(1);
        let mut player = MockPlayer::new(1);
        player.fail_load = true;
        let mut trigger = MockTrigger::idle();
        let mut status = MockStatus::new();

        let result = PlaySession::new(
            &mut catalog,
            &mut resolver,
            &mut player,
            &mut trigger,
            Some(&mut status),
            timing(),
        )
        .run()
        .await;

        assert!(matches!(result, Err(SessionError::Load(_))));
        assert!(trigger.was_released());
        assert!(status.was_released());
    }

    #[tokio::test]
    async fn countdown_expiry_takes_exactly_idle_ticks_of_quiet() {
        let mut catalog = built(&["0-2_hello.wav"]).await;
        let mut resolver = Resolver::with_seed(1);
        let mut player = MockPlayer::new(2);
        let mut trigger = MockTrigger::idle();
        let mut status = MockStatus::new();

        PlaySession::new(
            &mut catalog,
            &mut resolver,
            &mut player,
            &mut trigger,
            Some(&mut status),
            timing(),
        )
        .run()
        .await
        .unwrap();

        // Playback wait reads the pad 3 times (pre-poll + 2 frames); the
        // idle loop reads once per of its 4 ticks.
        assert_eq!(trigger.reads(), 7);
    }
}
