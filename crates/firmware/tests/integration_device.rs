//! Full-device integration: real files on disk, scripted pad and sleep,
//! one complete life from boot to the deep-sleep verdict.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use firmware::power::{self, PowerVerdict};
use platform::mocks::{MockPlayer, MockSleep, MockStatus, MockTrigger};
use platform::power::{BootReason, SleepWake};
use platform::storage_local::LocalFileStorage;
use playback::TimingConfig;
use std::fs;
use tempfile::TempDir;

fn device_image(names: &[&str]) -> TempDir {
    let tmp = TempDir::new().unwrap();
    let audio = tmp.path().join("audio");
    fs::create_dir(&audio).unwrap();
    for name in names {
        fs::write(audio.join(name), b"RIFF").unwrap();
    }
    tmp
}

#[tokio::test]
async fn one_full_life_from_boot_to_dark() {
    let tmp = device_image(&["0-2_greeting-a.wav", "0-2_greeting-b.wav", "3-9_chime.wav"]);
    let mut storage = LocalFileStorage::new(tmp.path().to_str().unwrap());
    let mut player = MockPlayer::new(1);
    // One touch lands in the first session's idle window; everything after
    // is quiet.
    let mut trigger = MockTrigger::scripted(&[false, false, true]);
    let mut status = MockStatus::new();
    // The wake signal interrupts the first light sleep; the second times out.
    let mut sleep = MockSleep::new(BootReason::ColdBoot, &[SleepWake::Signal]);

    let verdict = power::run_until_dark(
        &mut storage,
        &mut player,
        &mut trigger,
        Some(&mut status),
        &mut sleep,
        TimingConfig::fast(),
        "audio",
        42,
    )
    .await
    .unwrap();

    assert_eq!(verdict, PowerVerdict::DeepSleep);
    // Session 1: boot play (index 0) + touched replay (index 1);
    // session 2 (after the signal wake): boot play with a fresh index 0.
    assert_eq!(player.played.len(), 3);
    for name in &player.played {
        assert!(name.starts_with("0-2_greeting"), "unexpected clip {name}");
    }
    assert_eq!(sleep.light_sleeps(), 2);
    assert!(trigger.was_released());
    assert!(status.was_released());
    // Both greeting variants plus nothing else can ever have been loaded;
    // the cache keeps loads at or below the distinct-clip count.
    assert!(player.loads <= 2);
}

#[tokio::test]
async fn device_without_assets_parks() {
    let tmp = TempDir::new().unwrap(); // no audio/ directory at all
    let mut storage = LocalFileStorage::new(tmp.path().to_str().unwrap());
    let mut player = MockPlayer::new(1);
    let mut trigger = MockTrigger::idle();
    let mut status = MockStatus::new();
    let mut sleep = MockSleep::new(BootReason::ColdBoot, &[]);

    let verdict = power::run_until_dark(
        &mut storage,
        &mut player,
        &mut trigger,
        Some(&mut status),
        &mut sleep,
        TimingConfig::fast(),
        "audio",
        42,
    )
    .await
    .unwrap();

    assert_eq!(verdict, PowerVerdict::NoClips);
    assert_eq!(sleep.light_sleeps(), 0);
    assert!(player.played.is_empty());
}
