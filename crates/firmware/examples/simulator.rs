//! Desktop simulator — the real power cycle against your speakers.
//!
//! Runs the firmware's session/power machinery with `std::fs` storage,
//! rodio playback, and the Enter key standing in for the touch pad:
//!
//! ```bash
//! mkdir -p audio && cp somewhere/*.wav audio/
//! cargo run --example simulator --features simulator
//! ```
//!
//! Each Enter press is a "touch". Deep sleep exits the process (a wake on
//! real hardware restarts the firmware; restart the binary to simulate it).

// Desktop tooling — unwrap/expect acceptable outside the firmware itself.
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use std::io::{BufRead, Cursor};
use std::sync::{Arc, Mutex};
use std::time::{Duration as StdDuration, Instant as StdInstant};

use embassy_time::Duration;
use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink};

use firmware::power;
use platform::audio::ClipPlayer;
use platform::config;
use platform::gpio::{StatusPin, TriggerPin};
use platform::power::{BootReason, SleepControl, SleepWake};
use platform::storage_local::LocalFileStorage;
use playback::TimingConfig;

/// How long one Enter press keeps the simulated pad "touched".
const TOUCH_HOLD: StdDuration = StdDuration::from_millis(300);

/// Shared "touched until" timestamp, written by the stdin thread.
type TouchState = Arc<Mutex<StdInstant>>;

/// Enter-key stand-in for the touch pad.
struct KeyPad {
    touched_until: TouchState,
}

impl KeyPad {
    fn spawn() -> Self {
        let touched_until = Arc::new(Mutex::new(StdInstant::now()));
        let writer = Arc::clone(&touched_until);
        std::thread::spawn(move || {
            let stdin = std::io::stdin();
            for line in stdin.lock().lines() {
                if line.is_err() {
                    break;
                }
                *writer.lock().unwrap() = StdInstant::now() + TOUCH_HOLD;
            }
        });
        Self { touched_until }
    }

    fn state(&self) -> TouchState {
        Arc::clone(&self.touched_until)
    }
}

impl TriggerPin for KeyPad {
    fn is_pressed(&self) -> bool {
        StdInstant::now() < *self.touched_until.lock().unwrap()
    }

    fn release(&mut self) {
        tracing::debug!("pad released");
    }
}

/// Status LED rendered as log lines.
struct LogLed;

impl StatusPin for LogLed {
    fn set_high(&mut self) {
        tracing::info!("[busy on]");
    }

    fn set_low(&mut self) {
        tracing::info!("[busy off]");
    }

    fn release(&mut self) {}
}

/// A clip loaded into memory, decodable on every play.
struct LoadedClip {
    name: String,
    bytes: Vec<u8>,
}

/// rodio-backed clip player.
struct RodioPlayer {
    root: std::path::PathBuf,
    _stream: OutputStream,
    handle: OutputStreamHandle,
    sink: Option<Sink>,
}

impl RodioPlayer {
    fn new(root: &str) -> Self {
        let (stream, handle) = OutputStream::try_default().expect("no audio output device");
        Self { root: root.into(), _stream: stream, handle, sink: None }
    }
}

impl ClipPlayer for RodioPlayer {
    type Clip = LoadedClip;
    type Error = std::io::Error;

    async fn load(&mut self, name: &str) -> Result<Self::Clip, Self::Error> {
        let path = self.root.join(config::CLIP_DIR).join(name);
        let bytes = std::fs::read(path)?;
        tracing::debug!(name, len = bytes.len(), "clip loaded");
        Ok(LoadedClip { name: name.to_owned(), bytes })
    }

    async fn play(&mut self, clip: &Self::Clip) -> Result<(), Self::Error> {
        if let Some(old) = self.sink.take() {
            old.stop();
        }
        let sink = Sink::try_new(&self.handle)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e.to_string()))?;
        let source = Decoder::new(Cursor::new(clip.bytes.clone()))
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))?;
        sink.append(source);
        self.sink = Some(sink);
        tracing::info!(name = clip.name.as_str(), "playing");
        Ok(())
    }

    async fn stop(&mut self) -> Result<(), Self::Error> {
        if let Some(sink) = self.sink.take() {
            sink.stop();
        }
        Ok(())
    }

    fn is_playing(&self) -> bool {
        self.sink.as_ref().is_some_and(|s| !s.empty())
    }
}

/// Sleep controller: polls the pad against a timeout; deep sleep exits.
struct SimSleep {
    touched: TouchState,
}

impl SleepControl for SimSleep {
    fn boot_reason(&self) -> BootReason {
        BootReason::ColdBoot
    }

    async fn light_sleep(&mut self, timeout: Duration) -> SleepWake {
        tracing::info!(secs = timeout.as_secs(), "light sleep — press Enter to wake");
        let deadline = StdInstant::now() + StdDuration::from_micros(timeout.as_micros());
        while StdInstant::now() < deadline {
            if StdInstant::now() < *self.touched.lock().unwrap() {
                return SleepWake::Signal;
            }
            embassy_time::Timer::after(Duration::from_millis(20)).await;
        }
        SleepWake::Timeout
    }

    fn deep_sleep(&mut self) -> ! {
        tracing::info!("deep sleep — exiting (restart the binary to wake)");
        std::process::exit(0);
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    tracing::info!("{} v{} simulator", config::APP_NAME, config::APP_VERSION);
    tracing::info!("clip directory: ./{}", config::CLIP_DIR);
    tracing::info!("press Enter to touch the pad");

    let pad = KeyPad::spawn();
    let touched = pad.state();
    let mut trigger = pad;
    let mut status = LogLed;
    let mut sleep = SimSleep { touched };
    let mut storage = LocalFileStorage::new(".");
    let mut player = RodioPlayer::new(".");

    let seed = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(1)
        | 1;

    let verdict = power::run_until_dark(
        &mut storage,
        &mut player,
        &mut trigger,
        Some(&mut status),
        &mut sleep,
        TimingConfig::production(),
        config::CLIP_DIR,
        seed,
    )
    .await;

    match verdict {
        Ok(verdict) => {
            tracing::info!(?verdict, "power cycle finished");
            let never = power::commit(verdict, &mut sleep).await;
            match never {}
        }
        Err(e) => {
            tracing::error!("fatal power-cycle error: {e:?}");
            std::process::exit(1);
        }
    }
}
