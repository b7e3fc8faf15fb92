//! CatalogEntry — one (rule, clip) pair built from a scanned file name.

use platform::storage::FileName;

use crate::range::{parse_prefix, RangeSpec};

/// One clip in the catalog: its file name and the selection rule parsed from
/// it. Immutable after construction.
#[derive(Debug, Clone)]
pub struct CatalogEntry {
    /// Selection rule from the filename prefix. `None` means the clip has no
    /// rule and is eligible only in pure-random mode.
    pub spec: Option<RangeSpec>,
    /// File name inside the clip directory (also the cache key).
    pub name: FileName,
}

impl CatalogEntry {
    /// Build an entry from a scanned file name, parsing its rule prefix.
    pub fn from_name(name: FileName) -> Self {
        let spec = parse_prefix(name.as_str());
        Self { spec, name }
    }

    /// The file name as a borrowed string.
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// `true` when `index` may select this clip in ranged mode.
    pub fn covers(&self, index: u32) -> bool {
        self.spec.as_ref().is_some_and(|s| s.contains(index))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;

    fn file_name(s: &str) -> FileName {
        let mut n = FileName::new();
        n.push_str(s).unwrap();
        n
    }

    #[test]
    fn entry_with_rule() {
        let e = CatalogEntry::from_name(file_name("1-5_a.wav"));
        assert!(e.spec.is_some());
        assert!(e.covers(3));
        assert!(!e.covers(6));
        assert_eq!(e.name(), "1-5_a.wav");
    }

    #[test]
    fn entry_without_rule_covers_nothing() {
        let e = CatalogEntry::from_name(file_name("intro.wav"));
        assert!(e.spec.is_none());
        assert!(!e.covers(0));
    }
}
