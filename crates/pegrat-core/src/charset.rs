//! Character-set representation for `Char` transitions.
//!
//! A set is a union of individual code points and inclusive ranges. Built
//! sets are stored as a sorted, merged list of `(lo, hi)` ranges and queried
//! with binary search, matching the sorted-table-with-binary-search
//! convention used for type lookups elsewhere in this crate.

/// An immutable, normalized set of `char`s.
///
/// Construct one via [`CharSetBuilder`]; `CharSet` itself has no public
/// constructor besides `from_ranges`, which assumes its input is already
/// sorted and non-overlapping (the builder's job).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharSet {
    ranges: Vec<(char, char)>,
}

impl CharSet {
    /// Build directly from an already-sorted, non-overlapping range list.
    /// Prefer [`CharSetBuilder`] unless you can guarantee that invariant.
    pub fn from_sorted_ranges(ranges: Vec<(char, char)>) -> Self {
        debug_assert!(
            ranges.windows(2).all(|w| w[0].1 < w[1].0),
            "CharSet::from_sorted_ranges requires sorted, non-overlapping, non-adjacent ranges"
        );
        Self { ranges }
    }

    /// A set containing a single character.
    pub fn single(c: char) -> Self {
        Self {
            ranges: vec![(c, c)],
        }
    }

    /// Whether `c` is a member of this set.
    pub fn contains(&self, c: char) -> bool {
        self.ranges
            .binary_search_by(|&(lo, hi)| {
                if c < lo {
                    std::cmp::Ordering::Greater
                } else if c > hi {
                    std::cmp::Ordering::Less
                } else {
                    std::cmp::Ordering::Equal
                }
            })
            .is_ok()
    }

    /// Number of disjoint ranges after normalization.
    pub fn range_count(&self) -> usize {
        self.ranges.len()
    }

    pub fn ranges(&self) -> &[(char, char)] {
        &self.ranges
    }
}

/// Accumulates individual characters and ranges, then normalizes them into
/// a [`CharSet`] on `build()`.
#[derive(Debug, Clone, Default)]
pub struct CharSetBuilder {
    raw: Vec<(char, char)>,
}

impl CharSetBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn char(mut self, c: char) -> Self {
        self.raw.push((c, c));
        self
    }

    pub fn range(mut self, lo: char, hi: char) -> Self {
        assert!(lo <= hi, "CharSetBuilder::range requires lo <= hi");
        self.raw.push((lo, hi));
        self
    }

    /// Sort, then merge overlapping or touching ranges.
    pub fn build(mut self) -> CharSet {
        self.raw.sort_by_key(|&(lo, _)| lo);

        let mut merged: Vec<(char, char)> = Vec::with_capacity(self.raw.len());
        for (lo, hi) in self.raw {
            match merged.last_mut() {
                Some((_, last_hi)) if touches_or_overlaps(*last_hi, lo) => {
                    if hi > *last_hi {
                        *last_hi = hi;
                    }
                }
                _ => merged.push((lo, hi)),
            }
        }

        CharSet::from_sorted_ranges(merged)
    }
}

/// True if `lo` continues immediately after `prev_hi` (or overlaps it), so
/// the two ranges should be merged into one.
fn touches_or_overlaps(prev_hi: char, lo: char) -> bool {
    match u32::from(prev_hi).checked_add(1) {
        Some(next) => lo as u32 <= next,
        None => true, // prev_hi is char::MAX, nothing can come after it
    }
}

#[cfg(test)]
#[path = "charset_tests.rs"]
mod tests;
