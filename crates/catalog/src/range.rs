//! Filename range rules.
//!
//! A clip's file name may start with a rule prefix gating which play indices
//! can select it: `_`-separated tokens of `N` (a single index) or `N-M` (an
//! inclusive range), terminated by a `-` or `_` before the rest of the name.
//!
//! ```text
//! 05-10_20-25-greeting.wav   →  {5..=10, 20..=25}
//! 3_chime.wav                →  {3..=3}
//! intro.wav                  →  no rule (random-mode only)
//! ```
//!
//! The grammar is `^([0-9\-_]+)[-_].+` with greedy capture: the longest run
//! of rule characters is taken and the **rightmost** separator inside it
//! terminates the capture, so `5-10.wav` captures `5` (the `-10` becomes the
//! separator plus name) rather than failing. A malformed token drops
//! silently; it never invalidates the other tokens in the same prefix.

use heapless::Vec;

/// Maximum intervals one rule prefix can carry.
pub const MAX_INTERVALS: usize = 8;

/// One inclusive index interval, `min <= max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Interval {
    /// Lowest play index this interval covers.
    pub min: u32,
    /// Highest play index this interval covers (inclusive).
    pub max: u32,
}

impl Interval {
    /// Interval covering `min..=max`, or `None` when the bounds are inverted.
    pub fn new(min: u32, max: u32) -> Option<Self> {
        (min <= max).then_some(Self { min, max })
    }

    /// Interval covering exactly one index.
    pub const fn point(index: u32) -> Self {
        Self { min: index, max: index }
    }

    /// `true` when `index` falls inside the interval.
    pub fn contains(&self, index: u32) -> bool {
        self.min <= index && index <= self.max
    }
}

/// A parsed rule: the set of intervals from one filename prefix.
///
/// Intervals may overlap or be disjoint; no canonicalization happens.
/// A spec can be structurally present yet empty (every token malformed) —
/// it then matches no index, and its presence still disables pure-random
/// selection for the catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RangeSpec {
    intervals: Vec<Interval, MAX_INTERVALS>,
}

impl RangeSpec {
    /// `true` when some interval contains `index`.
    pub fn contains(&self, index: u32) -> bool {
        self.intervals.iter().any(|iv| iv.contains(index))
    }

    /// The highest index any interval covers; `0` for an empty spec.
    pub fn upper_bound(&self) -> u32 {
        self.intervals.iter().map(|iv| iv.max).max().unwrap_or(0)
    }

    /// Number of intervals parsed out of the prefix.
    pub fn len(&self) -> usize {
        self.intervals.len()
    }

    /// `true` when no token of the prefix survived parsing.
    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }

    /// The parsed intervals, in prefix order.
    pub fn intervals(&self) -> &[Interval] {
        &self.intervals
    }
}

/// Parse the rule prefix of `name`, if it has one.
///
/// Returns `None` for names with no rule prefix (they participate only in
/// pure-random selection) and `Some` — possibly with zero intervals — when
/// the grammar matched.
pub fn parse_prefix(name: &str) -> Option<RangeSpec> {
    let bytes = name.as_bytes();
    // Longest leading run of rule characters.
    let run = bytes
        .iter()
        .take_while(|&&b| matches!(b, b'0'..=b'9' | b'-' | b'_'))
        .count();
    // Greedy capture: the rightmost separator inside the run ends the rule,
    // provided the capture is non-empty and something follows the separator.
    let sep = (1..run)
        .rev()
        .find(|&i| {
            matches!(bytes.get(i), Some(&(b'-' | b'_'))) && i.saturating_add(1) < bytes.len()
        })?;
    let prefix = name.get(..sep)?;

    let mut spec = RangeSpec::default();
    for token in prefix.split('_') {
        if let Some(interval) = parse_token(token) {
            // More than MAX_INTERVALS tokens: the extras drop like any other
            // unusable token.
            let _ = spec.intervals.push(interval);
        }
    }
    Some(spec)
}

/// Parse one `_`-separated token: `N` or `N-M`. Anything else is `None`.
fn parse_token(token: &str) -> Option<Interval> {
    match token.split_once('-') {
        Some((min, max)) => Interval::new(min.parse().ok()?, max.parse().ok()?),
        None => token.parse().ok().map(Interval::point),
    }
}
