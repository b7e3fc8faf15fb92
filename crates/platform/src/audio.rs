//! Audio clip player abstraction.
//!
//! One trait covers decode and output because they are one peripheral on this
//! device: the WAV reader feeds the PWM/I2S output directly, and a decoded
//! clip handle is only meaningful to the player that produced it.
//!
//! The device plays exactly one clip at a time; `play` on a busy player
//! replaces the current clip.

/// Single-channel audio clip player.
pub trait ClipPlayer {
    /// Decoded/opened clip handle. Produced by [`load`](Self::load), cached by
    /// the catalog, and consumed by [`play`](Self::play).
    type Clip;

    /// Error type
    type Error: core::fmt::Debug;

    /// Open and decode the clip stored under `name` in the clip directory.
    fn load(
        &mut self,
        name: &str,
    ) -> impl core::future::Future<Output = Result<Self::Clip, Self::Error>>;

    /// Start playing `clip` from the beginning. Returns as soon as playback
    /// has been issued; completion is observed by polling
    /// [`is_playing`](Self::is_playing).
    fn play(
        &mut self,
        clip: &Self::Clip,
    ) -> impl core::future::Future<Output = Result<(), Self::Error>>;

    /// Stop playback immediately.
    fn stop(&mut self) -> impl core::future::Future<Output = Result<(), Self::Error>>;

    /// `true` while a clip is audibly playing.
    fn is_playing(&self) -> bool;
}
