//! ChirpBox Firmware - Main Entry Point
//!
//! Hardware-only entry point for RP2040.

#![no_std]
#![no_main]

use core::cell::RefCell;

use embassy_executor::Spawner;
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_time::{Duration, Instant, Timer};
use static_cell::StaticCell;

use firmware::hal::{BundledStorage, OnboardPlayer, RpSleep, StatusLed, TouchPad};
use firmware::power;
use platform::config;
use platform::power::BootReason;
use playback::TimingConfig;

use defmt_rtt as _;
// Panic handler
use panic_probe as _;

/// Clip table baked in at factory time. Names carry the selection rules;
/// payloads are 16-bit mono PCM at `hal::SAMPLE_RATE_HZ`.
///
/// Placeholder payloads until the factory flashing step lands — the catalog,
/// selection, and power machinery run against the real names either way.
static BUNDLED_CLIPS: &[(&str, &[u8])] = &[
    ("0-2_greeting-a.wav", &[]),
    ("0-2_greeting-b.wav", &[]),
    ("3-9_chime.wav", &[]),
];

/// The wake pad is shared between the session trigger and the sleep
/// controller; single executor thread, so a `RefCell` suffices.
static WAKE_PAD: StaticCell<RefCell<Input<'static>>> = StaticCell::new();

#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    defmt::info!("{=str} v{=str}", config::APP_NAME, config::APP_VERSION);
    defmt::info!("Initializing RP2040");

    let p = embassy_rp::init(Default::default());

    // GP1: touch pad, active-low behind the internal pull-up. Also the
    // sleep/dormant wake source, hence the shared cell.
    let pad: &'static RefCell<Input<'static>> =
        WAKE_PAD.init(RefCell::new(Input::new(p.PIN_1, Pull::Up)));
    let mut trigger = TouchPad::new(pad);

    // GP25: busy LED.
    let mut status = StatusLed::new(Output::new(p.PIN_25, Level::Low));

    // TODO: read VREG_AND_CHIP_RESET to classify dormant wakes; until then
    // every boot reports as cold (see RpSleep::new).
    let mut sleep = RpSleep::new(pad, BootReason::ColdBoot);

    let mut storage = BundledStorage::new(BUNDLED_CLIPS);
    let mut player = OnboardPlayer::new(BUNDLED_CLIPS);

    // Seeded from the boot clock; XOSC startup jitter varies it per boot.
    let seed = Instant::now().as_ticks();

    defmt::info!("Entering power cycle");
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
            defmt::info!("power cycle verdict: {}", verdict);
            let never = power::commit(verdict, &mut sleep).await;
            match never {}
        }
        Err(_) => {
            // No retry policy anywhere in this device: a fatal storage or
            // player fault parks the unit for inspection.
            defmt::error!("fatal power-cycle error — parking");
            loop {
                Timer::after(Duration::from_secs(1)).await;
            }
        }
    }
}
