//! Property tests for the filename rule grammar and the resolver walk.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(clippy::arithmetic_side_effects)]

use catalog::{parse_prefix, ClipCatalog, Resolver};
use platform::mocks::{MockClip, MockStorage};
use proptest::prelude::*;

proptest! {
    #[test]
    fn parse_never_panics(name in ".{0,80}") {
        let _ = parse_prefix(&name);
    }

    #[test]
    fn parsed_intervals_keep_ordered_bounds(name in "[0-9_-]{0,24}[a-z]{1,8}\\.wav") {
        if let Some(spec) = parse_prefix(&name) {
            for iv in spec.intervals() {
                prop_assert!(iv.min <= iv.max);
            }
        }
    }

    #[test]
    fn names_starting_with_a_letter_never_carry_a_rule(
        name in "[a-z][a-z0-9_-]{0,16}\\.wav"
    ) {
        prop_assert!(parse_prefix(&name).is_none());
    }

    #[test]
    fn resolve_result_covers_some_index_at_or_below_request(index in 0u32..200) {
        let rt = tokio::runtime::Builder::new_current_thread().build().unwrap();
        let catalog: ClipCatalog<MockClip> = rt.block_on(async {
            let mut storage =
                MockStorage::with_files(&["05-10_20-25-a.wav", "20-25_b.wav", "40_c.wav"]);
            ClipCatalog::build(&mut storage, "audio").await.unwrap()
        });

        let mut resolver = Resolver::with_seed(u64::from(index) + 1);
        match resolver.resolve(&catalog, index) {
            Some(pos) => {
                let entry = catalog.entry(pos).unwrap();
                let covered = (0..=index).any(|j| entry.covers(j));
                prop_assert!(covered, "pick at {index} covers nothing at or below it");
            }
            None => {
                // Nothing in the catalog may cover any index <= the request.
                let any = catalog
                    .entries()
                    .iter()
                    .any(|e| (0..=index).any(|j| e.covers(j)));
                prop_assert!(!any, "resolver gave up at {index} despite coverage");
            }
        }
    }
}
