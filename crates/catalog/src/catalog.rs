//! ClipCatalog — one-shot directory scan plus the lazy clip-handle cache.
//!
//! The catalog is built once per boot and is immutable afterwards except for
//! the cache, which grows monotonically (open-once, reuse forever — the
//! asset set of a device is small and fixed, so nothing ever needs evicting).

use heapless::Vec;
use platform::audio::ClipPlayer;
use platform::storage::{DirError, FileName, Storage};
use thiserror_no_std::Error;

use crate::entry::CatalogEntry;

/// Maximum number of usable clips a device image may carry.
pub const MAX_CLIPS: usize = 64;

/// Fatal catalog construction errors.
///
/// A missing clip directory is *not* an error — `build` returns an empty
/// catalog for that case and the caller decides what an assetless device
/// does.
#[derive(Debug, Error)]
pub enum CatalogError<E> {
    /// More usable clips than [`MAX_CLIPS`], or a listing over capacity.
    #[error("too many clips for the catalog")]
    Full,
    /// The directory listing failed for a reason other than absence.
    #[error("clip directory listing failed")]
    Storage(E),
}

/// Fatal clip-cache errors.
#[derive(Debug, Error)]
pub enum CacheError<E> {
    /// The cache is at capacity. Unreachable in practice: the cache holds at
    /// most one handle per catalog entry and shares [`MAX_CLIPS`].
    #[error("clip cache over capacity")]
    Full,
    /// The player failed to load/decode the clip.
    #[error("clip failed to load")]
    Load(E),
}

/// The device's clip table: scanned entries, the selection-rule bound, and
/// the lazily filled handle cache.
///
/// `C` is the player's clip-handle type; the catalog never inspects it.
pub struct ClipCatalog<C> {
    entries: Vec<CatalogEntry, MAX_CLIPS>,
    max_index: u32,
    cache: Vec<(FileName, C), MAX_CLIPS>,
}

impl<C> ClipCatalog<C> {
    /// A catalog with no entries (missing or empty clip directory).
    pub const fn empty() -> Self {
        Self { entries: Vec::new(), max_index: 0, cache: Vec::new() }
    }

    /// Scan `dir` on `storage` and build the catalog.
    ///
    /// Hidden files (leading `.`) and files without a case-insensitive `wav`
    /// extension are skipped. A missing directory yields an empty catalog;
    /// any other storage failure is fatal.
    pub async fn build<S: Storage>(
        storage: &mut S,
        dir: &str,
    ) -> Result<Self, CatalogError<S::Error>> {
        let listing = match storage.list_dir(dir).await {
            Ok(listing) => listing,
            Err(DirError::NotFound) => return Ok(Self::empty()),
            Err(DirError::Capacity) => return Err(CatalogError::Full),
            Err(DirError::Backend(e)) => return Err(CatalogError::Storage(e)),
        };

        let mut catalog = Self::empty();
        for name in listing {
            if !is_clip_name(name.as_str()) {
                continue;
            }
            let entry = CatalogEntry::from_name(name);
            if let Some(spec) = &entry.spec {
                catalog.max_index = catalog.max_index.max(spec.upper_bound());
            }
            catalog.entries.push(entry).map_err(|_| CatalogError::Full)?;
        }
        Ok(catalog)
    }

    /// All scanned entries, in listing order.
    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    /// The entry at `pos`, if any.
    pub fn entry(&self, pos: usize) -> Option<&CatalogEntry> {
        self.entries.get(pos)
    }

    /// Number of usable clips.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// `true` when the scan produced no usable clips.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The highest index any selection rule covers; `0` when no entry has a
    /// rule. Fixed at construction.
    pub fn max_index(&self) -> u32 {
        self.max_index
    }

    /// Number of clip handles currently cached.
    pub fn cached(&self) -> usize {
        self.cache.len()
    }

    /// Fetch the clip handle for `name`, loading it through `player` on the
    /// first request and from the cache afterwards.
    pub async fn open<P>(
        &mut self,
        name: &str,
        player: &mut P,
    ) -> Result<&P::Clip, CacheError<P::Error>>
    where
        P: ClipPlayer<Clip = C>,
    {
        let pos = match self.cache.iter().position(|(n, _)| n.as_str() == name) {
            Some(pos) => pos,
            None => {
                let clip = player.load(name).await.map_err(CacheError::Load)?;
                let mut key = FileName::new();
                key.push_str(name).map_err(|_| CacheError::Full)?;
                self.cache.push((key, clip)).map_err(|_| CacheError::Full)?;
                self.cache.len().saturating_sub(1)
            }
        };
        // `pos` came from `position` or the push above, so the lookup cannot
        // miss; the error arm only satisfies the no-panic policy.
        self.cache.get(pos).map(|(_, clip)| clip).ok_or(CacheError::Full)
    }
}

/// `true` for visible files with the device's audio extension.
fn is_clip_name(name: &str) -> bool {
    if name.starts_with('.') {
        return false;
    }
    name.rsplit_once('.')
        .is_some_and(|(_, ext)| ext.eq_ignore_ascii_case("wav"))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use platform::mocks::{MockPlayer, MockStorage};

    async fn built(names: &[&str]) -> ClipCatalog<platform::mocks::MockClip> {
        let mut storage = MockStorage::with_files(names);
        ClipCatalog::build(&mut storage, "audio").await.unwrap()
    }

    #[tokio::test]
    async fn build_parses_rules_and_max_index() {
        let catalog = built(&["05-10_20-25-greeting.wav"]).await;
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.max_index(), 25);
        let spec = catalog.entry(0).unwrap().spec.as_ref().unwrap();
        assert_eq!(spec.len(), 2);
    }

    #[tokio::test]
    async fn build_filters_hidden_and_foreign_files() {
        let catalog = built(&[
            "._resource-fork.wav",
            ".hidden.wav",
            "notes.txt",
            "LOOP.WAV",
            "1-2_a.wav",
        ])
        .await;
        assert_eq!(catalog.len(), 2); // LOOP.WAV + 1-2_a.wav
    }

    #[tokio::test]
    async fn build_without_rules_has_zero_max_index() {
        let catalog = built(&["intro.wav", "outro.wav"]).await;
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.max_index(), 0);
    }

    #[tokio::test]
    async fn missing_directory_builds_empty_catalog() {
        let mut storage = MockStorage::missing();
        let catalog: ClipCatalog<platform::mocks::MockClip> =
            ClipCatalog::build(&mut storage, "audio").await.unwrap();
        assert!(catalog.is_empty());
        assert_eq!(catalog.max_index(), 0);
    }

    #[tokio::test]
    async fn backend_failure_is_fatal() {
        let mut storage = MockStorage::failing();
        let result: Result<ClipCatalog<platform::mocks::MockClip>, _> =
            ClipCatalog::build(&mut storage, "audio").await;
        assert!(matches!(result, Err(CatalogError::Storage(_))));
    }

    #[tokio::test]
    async fn open_loads_once_then_hits_cache() {
        let mut catalog = built(&["1-5_a.wav"]).await;
        let mut player = MockPlayer::new(3);
        {
            let clip = catalog.open("1-5_a.wav", &mut player).await.unwrap();
            assert_eq!(clip.name, "1-5_a.wav");
        }
        let _ = catalog.open("1-5_a.wav", &mut player).await.unwrap();
        assert_eq!(player.loads, 1);
        assert_eq!(catalog.cached(), 1);
    }

    #[tokio::test]
    async fn open_propagates_load_failure() {
        let mut catalog = built(&["1-5_a.wav"]).await;
        let mut player = MockPlayer::new(3);
        player.fail_load = true;
        let result = catalog.open("1-5_a.wav", &mut player).await;
        assert!(matches!(result, Err(CacheError::Load(_))));
        assert_eq!(catalog.cached(), 0);
    }
}
