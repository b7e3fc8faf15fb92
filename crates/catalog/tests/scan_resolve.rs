//! End-to-end: scan a real on-disk clip directory, resolve a play sequence,
//! and exercise the lazy cache — the same path the firmware takes at boot.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use catalog::{ClipCatalog, Resolver};
use platform::mocks::{MockClip, MockPlayer};
use platform::storage_local::LocalFileStorage;
use std::fs;
use tempfile::TempDir;

fn fixture_dir(names: &[&str]) -> TempDir {
    let tmp = TempDir::new().unwrap();
    let audio = tmp.path().join("audio");
    fs::create_dir(&audio).unwrap();
    for name in names {
        fs::write(audio.join(name), b"RIFF").unwrap();
    }
    tmp
}

async fn scan(tmp: &TempDir) -> ClipCatalog<MockClip> {
    let mut storage = LocalFileStorage::new(tmp.path().to_str().unwrap());
    ClipCatalog::build(&mut storage, "audio").await.unwrap()
}

#[tokio::test]
async fn scan_and_resolve_a_session_worth_of_indices() {
    let tmp = fixture_dir(&[
        "0-2_hello.wav",
        "1-5_a.wav",
        "1-5_b.wav",
        "notes.txt",
        ".hidden.wav",
    ]);
    let catalog = scan(&tmp).await;

    assert_eq!(catalog.len(), 3);
    assert_eq!(catalog.max_index(), 5);

    let mut resolver = Resolver::with_seed(2024);
    // Index 0 is covered only by the hello clip.
    let pos = resolver.resolve(&catalog, 0).unwrap();
    assert_eq!(catalog.entry(pos).unwrap().name(), "0-2_hello.wav");

    // Index 4 is covered by both variant clips, never the hello clip.
    for _ in 0..16 {
        let pos = resolver.resolve(&catalog, 4).unwrap();
        let name = catalog.entry(pos).unwrap().name();
        assert!(name == "1-5_a.wav" || name == "1-5_b.wav", "unexpected {name}");
    }

    // Index 9 is out past every rule; the walk falls back into 5.
    assert!(resolver.resolve(&catalog, 9).is_some());
    assert!(!Resolver::has(&catalog, 9));
}

#[tokio::test]
async fn cache_fills_once_per_distinct_clip() {
    let tmp = fixture_dir(&["0-2_hello.wav", "1-5_a.wav"]);
    let mut catalog = scan(&tmp).await;
    let mut player = MockPlayer::new(2);

    for _ in 0..4 {
        let _ = catalog.open("0-2_hello.wav", &mut player).await.unwrap();
        let _ = catalog.open("1-5_a.wav", &mut player).await.unwrap();
    }
    assert_eq!(player.loads, 2);
    assert_eq!(catalog.cached(), 2);
}

#[tokio::test]
async fn missing_audio_directory_yields_empty_catalog() {
    let tmp = TempDir::new().unwrap(); // no audio/ inside
    let mut storage = LocalFileStorage::new(tmp.path().to_str().unwrap());
    let catalog: ClipCatalog<MockClip> =
        ClipCatalog::build(&mut storage, "audio").await.unwrap();
    assert!(catalog.is_empty());
}
