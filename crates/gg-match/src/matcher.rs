use std::collections::{BTreeMap, BTreeSet};
use std::ops::Bound;

use gg_core::error::MatchError;
use gg_core::rounding::RoundMethod;

use crate::raster::{glyph_brightness, GlyphRasterizer};

/// Finite brightness value usable as an ordered map key.
///
/// Brightness is always derived from pixel data or a linear rescale of it,
/// so values are finite; `total_cmp` gives the map a total order without
/// ever touching NaN semantics.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Brightness(f64);

impl Brightness {
    fn new(value: f64) -> Self {
        debug_assert!(value.is_finite(), "brightness must be finite");
        Self(value)
    }

    /// The underlying scalar.
    #[must_use]
    pub fn value(self) -> f64 {
        self.0
    }
}

impl Eq for Brightness {}

impl Ord for Brightness {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl PartialOrd for Brightness {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

/// The active character set, keyed by brightness.
///
/// Two ordered maps are kept in lockstep: raw brightness → characters, and
/// the same buckets rekeyed by brightness normalized against the current
/// (min, max) raw range. Mutations take an O(log n) fast path whenever the
/// range is unchanged; only a range change triggers a full re-derivation of
/// the normalized map.
pub struct CharMatcher {
    rasterizer: Box<dyn GlyphRasterizer>,
    raw: BTreeMap<Brightness, BTreeSet<char>>,
    normalized: BTreeMap<Brightness, BTreeSet<char>>,
    min_raw: f64,
    max_raw: f64,
    #[cfg(test)]
    rebuilds: usize,
}

impl CharMatcher {
    /// Builds a matcher from an initial character set.
    ///
    /// # Errors
    /// Returns [`MatchError::EmptyCharset`] if `initial` is empty.
    pub fn new(
        initial: &[char],
        rasterizer: Box<dyn GlyphRasterizer>,
    ) -> Result<Self, MatchError> {
        if initial.is_empty() {
            return Err(MatchError::EmptyCharset);
        }
        let mut matcher = Self {
            rasterizer,
            raw: BTreeMap::new(),
            normalized: BTreeMap::new(),
            min_raw: 0.0,
            max_raw: 0.0,
            #[cfg(test)]
            rebuilds: 0,
        };
        for &ch in initial {
            let brightness = matcher.raw_brightness(ch);
            matcher
                .raw
                .entry(Brightness::new(brightness))
                .or_default()
                .insert(ch);
        }
        matcher.refresh_bounds();
        matcher.rebuild_normalized();
        Ok(matcher)
    }

    /// A character's intrinsic ink-density score, independent of the set.
    #[must_use]
    pub fn raw_brightness(&self, ch: char) -> f64 {
        glyph_brightness(&self.rasterizer.rasterize(ch))
    }

    /// Inserts `ch` into the active set.
    ///
    /// If its raw brightness extends the current (min, max) range, every
    /// normalized key may have shifted and the normalized map is rebuilt
    /// from the raw map. Otherwise no other character's normalized value is
    /// affected and only `ch` is placed into its normalized bucket.
    pub fn add_char(&mut self, ch: char) {
        let brightness = self.raw_brightness(ch);
        let was_empty = self.raw.is_empty();
        self.raw
            .entry(Brightness::new(brightness))
            .or_default()
            .insert(ch);

        if was_empty || brightness < self.min_raw || brightness > self.max_raw {
            self.refresh_bounds();
            self.rebuild_normalized();
        } else {
            let norm = self.normalize(brightness);
            self.normalized
                .entry(Brightness::new(norm))
                .or_default()
                .insert(ch);
        }
    }

    /// Removes `ch` from the active set. Absent characters (and an already
    /// empty set) are a no-op.
    ///
    /// Removing a character at the brightness boundary may shrink the range,
    /// so (min, max) is recomputed and the normalized map rebuilt; interior
    /// removals touch only the character's own buckets.
    pub fn remove_char(&mut self, ch: char) {
        if self.raw.is_empty() {
            return;
        }
        let key = Brightness::new(self.raw_brightness(ch));
        let Some(bucket) = self.raw.get_mut(&key) else {
            return;
        };
        if !bucket.remove(&ch) {
            return;
        }
        if bucket.is_empty() {
            self.raw.remove(&key);
        }

        if key.value() == self.min_raw || key.value() == self.max_raw {
            self.refresh_bounds();
            self.rebuild_normalized();
        } else {
            let norm = Brightness::new(self.normalize(key.value()));
            if let Some(norm_bucket) = self.normalized.get_mut(&norm) {
                norm_bucket.remove(&ch);
                if norm_bucket.is_empty() {
                    self.normalized.remove(&norm);
                }
            }
        }
    }

    /// Answers a nearest-brightness query under `method`.
    ///
    /// On an exact key hit the bucket's smallest-codepoint character is
    /// returned. Otherwise the floor and ceiling neighbors are consulted:
    /// a missing neighbor falls back to the other side (out-of-range
    /// queries never panic), `Lower`/`Higher` pick their side, and
    /// `Nearest` picks the numerically closer key with an exact tie going
    /// to the lower one.
    ///
    /// # Errors
    /// Returns [`MatchError::EmptyCharset`] if the active set is empty.
    pub fn char_by_brightness(
        &self,
        target: f64,
        method: RoundMethod,
    ) -> Result<char, MatchError> {
        let key = Brightness::new(target);
        if let Some(bucket) = self.normalized.get(&key) {
            return first_char(bucket);
        }

        let lower = self.normalized.range(..key).next_back();
        let higher = self
            .normalized
            .range((Bound::Excluded(key), Bound::Unbounded))
            .next();
        match (lower, higher) {
            (None, None) => Err(MatchError::EmptyCharset),
            (None, Some((_, bucket))) | (Some((_, bucket)), None) => first_char(bucket),
            (Some((lo, lo_bucket)), Some((hi, hi_bucket))) => match method {
                RoundMethod::Lower => first_char(lo_bucket),
                RoundMethod::Higher => first_char(hi_bucket),
                RoundMethod::Nearest => {
                    if target - lo.value() <= hi.value() - target {
                        first_char(lo_bucket)
                    } else {
                        first_char(hi_bucket)
                    }
                }
            },
        }
    }

    /// All characters currently in the set, sorted by codepoint.
    #[must_use]
    pub fn chars(&self) -> Vec<char> {
        let sorted: BTreeSet<char> = self.raw.values().flatten().copied().collect();
        sorted.into_iter().collect()
    }

    /// Number of characters in the set.
    #[must_use]
    pub fn len(&self) -> usize {
        self.raw.values().map(BTreeSet::len).sum()
    }

    /// Whether the set is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// The normalized brightness currently assigned to `ch`, if present.
    #[must_use]
    pub fn normalized_brightness(&self, ch: char) -> Option<f64> {
        self.normalized
            .iter()
            .find(|(_, bucket)| bucket.contains(&ch))
            .map(|(key, _)| key.value())
    }

    fn refresh_bounds(&mut self) {
        let min = self.raw.keys().next().copied();
        let max = self.raw.keys().next_back().copied();
        match (min, max) {
            (Some(min), Some(max)) => {
                self.min_raw = min.value();
                self.max_raw = max.value();
            }
            _ => {
                self.min_raw = 0.0;
                self.max_raw = 0.0;
            }
        }
    }

    /// Rescale against the current range. A set with a single distinct raw
    /// brightness has no range; every such character normalizes to 0.0.
    fn normalize(&self, brightness: f64) -> f64 {
        let span = self.max_raw - self.min_raw;
        if span == 0.0 {
            0.0
        } else {
            (brightness - self.min_raw) / span
        }
    }

    fn rebuild_normalized(&mut self) {
        #[cfg(test)]
        {
            self.rebuilds += 1;
        }
        let mut normalized = BTreeMap::new();
        for (key, bucket) in &self.raw {
            normalized.insert(Brightness::new(self.normalize(key.value())), bucket.clone());
        }
        self.normalized = normalized;
    }
}

fn first_char(bucket: &BTreeSet<char>) -> Result<char, MatchError> {
    bucket
        .iter()
        .next()
        .copied()
        .ok_or(MatchError::EmptyCharset)
}
