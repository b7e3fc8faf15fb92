//! RP2040 hardware adapters for the platform traits.
//!
//! # Pin assignments
//!
//! These constants document the target board wiring; change them to match
//! your board before flashing.
//!
//! | Signal      | MCU pin | Notes                                  |
//! |-------------|---------|----------------------------------------|
//! | Touch pad   | GP1     | Active-low, internal pull-up, wake pad |
//! | PWM audio   | GP0     | RC-filtered PWM output                 |
//! | Status LED  | GP25    | Busy/loading indicator                 |
//!
//! # Shared wake pad
//!
//! The touch pad is both the session trigger and the sleep wake source, so
//! the `Input` lives in a `RefCell` behind a `StaticCell` and [`TouchPad`]
//! and [`RpSleep`] each hold a reference. The firmware runs a single
//! executor thread, and the two facades are never active at the same time
//! (the session releases the pad before the power loop sleeps).

use core::cell::RefCell;

use embassy_futures::select::{select, Either};
use embassy_rp::gpio::{Input, Output};
use embassy_time::{Duration, Instant, Timer};

use platform::audio::ClipPlayer;
use platform::gpio::{StatusPin, TriggerPin};
use platform::power::{BootReason, SleepControl, SleepWake};
use platform::storage::{DirError, DirListing, File, FileName, Storage};

/// Clip table baked into the firmware image at factory time: file name plus
/// 16-bit mono PCM payload at [`SAMPLE_RATE_HZ`].
pub type BundledClips = &'static [(&'static str, &'static [u8])];

/// Sample rate of the bundled clip payloads.
pub const SAMPLE_RATE_HZ: u64 = 22_050;

/// The shared wake/trigger pad.
pub type SharedPad = &'static RefCell<Input<'static>>;

// ---------------------------------------------------------------------------
// Trigger pad
// ---------------------------------------------------------------------------

/// Touch pad facade over the shared wake input. Active-low: the pad reads
/// low while touched, and this adapter inverts to the logical
/// true-on-press reading.
pub struct TouchPad {
    pad: SharedPad,
}

impl TouchPad {
    /// Wrap the shared pad input.
    pub fn new(pad: SharedPad) -> Self {
        Self { pad }
    }
}

impl TriggerPin for TouchPad {
    fn is_pressed(&self) -> bool {
        self.pad.borrow().is_low()
    }

    fn release(&mut self) {
        // The pull-up stays configured: the sleep controller re-arms this
        // same pad as the wake source immediately after a session ends.
    }
}

// ---------------------------------------------------------------------------
// Status LED
// ---------------------------------------------------------------------------

/// Busy indicator LED.
pub struct StatusLed {
    pin: Output<'static>,
}

impl StatusLed {
    /// Wrap a configured output pin (LED off = low).
    pub fn new(pin: Output<'static>) -> Self {
        Self { pin }
    }
}

impl StatusPin for StatusLed {
    fn set_high(&mut self) {
        self.pin.set_high();
    }

    fn set_low(&mut self) {
        self.pin.set_low();
    }

    fn release(&mut self) {
        // Push-pull low draws nothing through the LED; the pin keeps its
        // output mode so re-acquisition is a no-op.
        self.pin.set_low();
    }
}

// ---------------------------------------------------------------------------
// Bundled clip storage
// ---------------------------------------------------------------------------

/// Error type for the bundled clip store.
#[derive(Debug)]
pub enum BundledStorageError {
    /// Byte-level file access is not part of the bundled store; clip
    /// payloads go straight to the player.
    Unsupported,
}

/// Zero-length placeholder file handle.
pub struct BundledFile;

impl File for BundledFile {
    type Error = BundledStorageError;

    async fn read(&mut self, _buf: &mut [u8]) -> Result<usize, Self::Error> {
        Err(BundledStorageError::Unsupported)
    }

    async fn seek(&mut self, _pos: u64) -> Result<u64, Self::Error> {
        Err(BundledStorageError::Unsupported)
    }

    fn size(&self) -> u64 {
        0
    }
}

/// `Storage` over the clip table baked into flash.
///
/// The device has exactly one clip directory, so `list_dir` ignores the
/// path and returns the bundled names.
pub struct BundledStorage {
    clips: BundledClips,
}

impl BundledStorage {
    /// Store listing the bundled clip table.
    pub fn new(clips: BundledClips) -> Self {
        Self { clips }
    }
}

impl Storage for BundledStorage {
    type Error = BundledStorageError;
    type File = BundledFile;

    async fn list_dir(&mut self, _path: &str) -> Result<DirListing, DirError<Self::Error>> {
        let mut listing = DirListing::new();
        for (name, _) in self.clips {
            let mut buf = FileName::new();
            buf.push_str(name).map_err(|_| DirError::Capacity)?;
            listing.push(buf).map_err(|_| DirError::Capacity)?;
        }
        Ok(listing)
    }

    async fn open_file(&mut self, _path: &str) -> Result<Self::File, Self::Error> {
        Err(BundledStorageError::Unsupported)
    }

    async fn exists(&mut self, path: &str) -> Result<bool, Self::Error> {
        Ok(self.clips.iter().any(|(name, _)| *name == path))
    }
}

// ---------------------------------------------------------------------------
// Onboard player
// ---------------------------------------------------------------------------

/// Error type for the onboard player.
#[derive(Debug)]
pub enum OnboardPlayerError {
    /// The requested name is not in the bundled clip table.
    UnknownClip,
}

/// A bundled clip ready for playback.
pub struct OnboardClip {
    data: &'static [u8],
    duration: Duration,
}

impl OnboardClip {
    /// PCM payload.
    pub fn data(&self) -> &'static [u8] {
        self.data
    }

    /// Play length at [`SAMPLE_RATE_HZ`].
    pub fn duration(&self) -> Duration {
        self.duration
    }
}

/// PWM clip player, bring-up stage.
///
/// Timing is fully wired: `play`/`is_playing` track the real clip duration
/// so the session and power loops behave exactly as they will in
/// production.
///
/// TODO: feed the PCM payload to the GP0 PWM slice via DMA
/// (`embassy_rp::pwm` + a paced DMA channel); until then playback is
/// silent.
pub struct OnboardPlayer {
    clips: BundledClips,
    deadline: Option<Instant>,
}

impl OnboardPlayer {
    /// Player over the bundled clip table.
    pub fn new(clips: BundledClips) -> Self {
        Self { clips, deadline: None }
    }
}

impl ClipPlayer for OnboardPlayer {
    type Clip = OnboardClip;
    type Error = OnboardPlayerError;

    async fn load(&mut self, name: &str) -> Result<Self::Clip, Self::Error> {
        let &(_, data) = self
            .clips
            .iter()
            .find(|(n, _)| *n == name)
            .ok_or(OnboardPlayerError::UnknownClip)?;
        // 16-bit mono: two bytes per sample.
        let samples = (data.len() as u64) / 2;
        let micros = samples.saturating_mul(1_000_000) / SAMPLE_RATE_HZ;
        Ok(OnboardClip { data, duration: Duration::from_micros(micros) })
    }

    async fn play(&mut self, clip: &Self::Clip) -> Result<(), Self::Error> {
        self.deadline = Instant::now().checked_add(clip.duration);
        Ok(())
    }

    async fn stop(&mut self) -> Result<(), Self::Error> {
        self.deadline = None;
        Ok(())
    }

    fn is_playing(&self) -> bool {
        self.deadline.is_some_and(|d| Instant::now() < d)
    }
}

// ---------------------------------------------------------------------------
// Sleep controller
// ---------------------------------------------------------------------------

/// RP2040 sleep controller over the shared wake pad.
pub struct RpSleep {
    pad: SharedPad,
    boot: BootReason,
}

impl RpSleep {
    /// Controller reporting `boot` as the boot reason.
    ///
    /// TODO: classify the reason from `VREG_AND_CHIP_RESET` instead of
    /// taking it from the caller, so a dormant wake is distinguishable
    /// from a cold boot.
    pub fn new(pad: SharedPad, boot: BootReason) -> Self {
        Self { pad, boot }
    }
}

impl SleepControl for RpSleep {
    fn boot_reason(&self) -> BootReason {
        self.boot
    }

    async fn light_sleep(&mut self, timeout: Duration) -> SleepWake {
        // The executor idles in WFI while both futures are pending — that is
        // the light sleep on this chip, pending clock-gating work.
        let mut pad = self.pad.borrow_mut();
        match select(pad.wait_for_low(), Timer::after(timeout)).await {
            Either::First(()) => SleepWake::Signal,
            Either::Second(()) => SleepWake::Timeout,
        }
    }

    fn deep_sleep(&mut self) -> ! {
        // TODO: arm the pad as a level-low DORMANT wake and stop the ring
        // oscillator (XOSC/ROSC dormant sequence via the pac), then reboot
        // through the watchdog on wake so the process restarts from its
        // entry point. Until that lands, park in WFI; a wake is a power
        // cycle.
        loop {
            cortex_m::asm::wfi();
        }
    }
}
