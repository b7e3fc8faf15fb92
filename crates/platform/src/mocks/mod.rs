//! Mock implementations for testing
//!
//! This module provides mock implementations of all platform traits
//! for use in unit and integration tests. Every mock is scripted up front and
//! records what the code under test did to it.

#![cfg(any(test, feature = "std"))]
#![allow(clippy::unwrap_used)]

use core::cell::Cell;
use std::collections::VecDeque;

use embassy_time::Duration;

use crate::audio::ClipPlayer;
use crate::gpio::{PinState, StatusPin, TriggerPin};
use crate::power::{BootReason, SleepControl, SleepWake};
use crate::storage::{DirError, DirListing, File, FileName, Storage};

/// Mock trigger pad replaying a scripted sequence of samples.
///
/// Each `is_pressed` call consumes one sample; once the script is exhausted
/// the pad reads idle forever (the pull-to-known-state steady state).
pub struct MockTrigger {
    trace: Vec<bool>,
    pos: Cell<usize>,
    released: bool,
}

impl MockTrigger {
    /// Pad that replays `trace` one sample per read, then stays idle.
    pub fn scripted(trace: &[bool]) -> Self {
        Self { trace: trace.to_vec(), pos: Cell::new(0), released: false }
    }

    /// Pad that always reads idle.
    pub fn idle() -> Self {
        Self::scripted(&[])
    }

    /// Number of samples consumed so far.
    pub fn reads(&self) -> usize {
        self.pos.get()
    }

    /// `true` once `release` has been called.
    pub fn was_released(&self) -> bool {
        self.released
    }
}

impl TriggerPin for MockTrigger {
    fn is_pressed(&self) -> bool {
        let i = self.pos.get();
        self.pos.set(i.saturating_add(1));
        self.trace.get(i).copied().unwrap_or(false)
    }

    fn release(&mut self) {
        self.released = true;
    }
}

/// Mock status LED recording every level transition.
pub struct MockStatus {
    /// Every state driven onto the pin, in order.
    pub events: Vec<PinState>,
    released: bool,
}

impl MockStatus {
    /// New indicator with an empty event log.
    pub fn new() -> Self {
        Self { events: Vec::new(), released: false }
    }

    /// `true` once `release` has been called.
    pub fn was_released(&self) -> bool {
        self.released
    }

    /// The most recently driven state, if any.
    pub fn last(&self) -> Option<PinState> {
        self.events.last().copied()
    }
}

impl Default for MockStatus {
    fn default() -> Self {
        Self::new()
    }
}

impl StatusPin for MockStatus {
    fn set_high(&mut self) {
        self.events.push(PinState::High);
    }

    fn set_low(&mut self) {
        self.events.push(PinState::Low);
    }

    fn release(&mut self) {
        self.released = true;
    }
}

/// Error type shared by the audio and storage mocks.
#[derive(Debug)]
pub struct MockError(pub &'static str);

impl core::fmt::Display for MockError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.0)
    }
}

/// Clip handle produced by [`MockPlayer::load`].
#[derive(Debug, Clone)]
pub struct MockClip {
    /// File name the clip was loaded from.
    pub name: String,
    /// How many `is_playing` polls report `true` after `play`.
    pub frames: u32,
}

/// Mock clip player with a countdown `is_playing` script.
///
/// After `play`, `is_playing` reports `true` for the clip's `frames` polls
/// and `false` afterwards, emulating a clip of known length under a polling
/// completion wait.
pub struct MockPlayer {
    clip_frames: u32,
    frames_left: Cell<u32>,
    /// Names of every clip played, in order.
    pub played: Vec<String>,
    /// Number of `load` calls (cache misses at the catalog layer).
    pub loads: usize,
    /// Number of `stop` calls.
    pub stops: usize,
    /// When set, `load` fails — exercises the fatal-error path.
    pub fail_load: bool,
}

impl MockPlayer {
    /// Player whose clips all last `clip_frames` polls.
    pub fn new(clip_frames: u32) -> Self {
        Self {
            clip_frames,
            frames_left: Cell::new(0),
            played: Vec::new(),
            loads: 0,
            stops: 0,
            fail_load: false,
        }
    }
}

impl ClipPlayer for MockPlayer {
    type Clip = MockClip;
    type Error = MockError;

    async fn load(&mut self, name: &str) -> Result<Self::Clip, Self::Error> {
        self.loads = self.loads.saturating_add(1);
        if self.fail_load {
            return Err(MockError("scripted load failure"));
        }
        Ok(MockClip { name: name.to_owned(), frames: self.clip_frames })
    }

    async fn play(&mut self, clip: &Self::Clip) -> Result<(), Self::Error> {
        self.played.push(clip.name.clone());
        self.frames_left.set(clip.frames);
        Ok(())
    }

    async fn stop(&mut self) -> Result<(), Self::Error> {
        self.frames_left.set(0);
        self.stops = self.stops.saturating_add(1);
        Ok(())
    }

    fn is_playing(&self) -> bool {
        let left = self.frames_left.get();
        if left > 0 {
            self.frames_left.set(left.saturating_sub(1));
            true
        } else {
            false
        }
    }
}

enum MockDir {
    Missing,
    Listing(Vec<String>),
    Fail,
}

/// Mock storage backed by an in-memory directory listing.
pub struct MockStorage {
    dir: MockDir,
}

impl MockStorage {
    /// Storage whose single directory contains exactly `names`.
    pub fn with_files(names: &[&str]) -> Self {
        Self { dir: MockDir::Listing(names.iter().map(|n| (*n).to_owned()).collect()) }
    }

    /// Storage whose directory does not exist.
    pub fn missing() -> Self {
        Self { dir: MockDir::Missing }
    }

    /// Storage whose listing fails with a backend error.
    pub fn failing() -> Self {
        Self { dir: MockDir::Fail }
    }
}

/// File handle for [`MockStorage`] — empty, present only to satisfy the trait.
pub struct MockFile;

impl File for MockFile {
    type Error = MockError;

    async fn read(&mut self, _buf: &mut [u8]) -> Result<usize, Self::Error> {
        Ok(0)
    }

    async fn seek(&mut self, _pos: u64) -> Result<u64, Self::Error> {
        Ok(0)
    }

    fn size(&self) -> u64 {
        0
    }
}

impl Storage for MockStorage {
    type Error = MockError;
    type File = MockFile;

    async fn list_dir(&mut self, _path: &str) -> Result<DirListing, DirError<Self::Error>> {
        match &self.dir {
            MockDir::Missing => Err(DirError::NotFound),
            MockDir::Fail => Err(DirError::Backend(MockError("scripted listing failure"))),
            MockDir::Listing(names) => {
                let mut listing = DirListing::new();
                for name in names {
                    let mut buf = FileName::new();
                    buf.push_str(name).map_err(|_| DirError::Capacity)?;
                    listing.push(buf).map_err(|_| DirError::Capacity)?;
                }
                Ok(listing)
            }
        }
    }

    async fn open_file(&mut self, _path: &str) -> Result<Self::File, Self::Error> {
        Ok(MockFile)
    }

    async fn exists(&mut self, path: &str) -> Result<bool, Self::Error> {
        match &self.dir {
            MockDir::Listing(names) => Ok(names.iter().any(|n| n == path)),
            _ => Ok(false),
        }
    }
}

/// Mock sleep controller replaying a scripted queue of wake outcomes.
pub struct MockSleep {
    boot: BootReason,
    wakes: VecDeque<SleepWake>,
    /// Timeout passed to each `light_sleep` call, in order.
    pub requested: Vec<Duration>,
}

impl MockSleep {
    /// Controller reporting `boot` and answering light sleeps from `wakes`
    /// (then `Timeout` forever once the script runs dry).
    pub fn new(boot: BootReason, wakes: &[SleepWake]) -> Self {
        Self { boot, wakes: wakes.iter().copied().collect(), requested: Vec::new() }
    }

    /// Number of light sleep attempts so far.
    pub fn light_sleeps(&self) -> usize {
        self.requested.len()
    }
}

impl SleepControl for MockSleep {
    fn boot_reason(&self) -> BootReason {
        self.boot
    }

    async fn light_sleep(&mut self, timeout: Duration) -> SleepWake {
        self.requested.push(timeout);
        self.wakes.pop_front().unwrap_or(SleepWake::Timeout)
    }

    #[allow(clippy::panic)]
    fn deep_sleep(&mut self) -> ! {
        // The host process cannot restart itself; reaching this in a test is
        // a scripting error.
        panic!("deep sleep requested on the host");
    }
}
