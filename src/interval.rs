//! Interval and strand-order utilities.
//!
//! All coordinates are 1-based and inclusive on both ends, matching GFF3
//! columns 4 and 5.

use crate::strand::Strand;

/// A closed genomic interval with `start <= end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Interval {
    pub start: u64,
    pub end: u64,
}

impl Interval {
    #[must_use]
    pub fn new(start: u64, end: u64) -> Self {
        debug_assert!(start <= end);
        Interval { start, end }
    }

    /// Number of bases covered, inclusive of both ends.
    #[must_use]
    pub fn len(&self) -> u64 {
        self.end - self.start + 1
    }

    /// Whether `other` lies entirely within this interval.
    #[must_use]
    pub fn contains(&self, other: &Interval) -> bool {
        self.start <= other.start && other.end <= self.end
    }

    /// Number of bases shared with `other` (0 when disjoint).
    #[must_use]
    pub fn shared_bases(&self, other: &Interval) -> u64 {
        let lo = self.start.max(other.start);
        let hi = self.end.min(other.end);
        if hi >= lo { hi - lo + 1 } else { 0 }
    }

    /// Whether two intervals overlap in the sense that matters for
    /// validation findings.
    ///
    /// Sharing exactly one base at a boundary (`a.end == b.start` or the
    /// mirror case) counts as touching, not overlapping. Identical intervals
    /// always overlap, even single-base ones. Any other shared coverage is
    /// an overlap.
    #[must_use]
    pub fn overlaps(&self, other: &Interval) -> bool {
        if self == other {
            return true;
        }
        match self.shared_bases(other) {
            0 => false,
            1 => self.end != other.start && other.end != self.start,
            _ => true,
        }
    }

    /// Number of uncovered bases between this interval and a later one.
    ///
    /// Zero means the intervals are directly adjacent; negative means they
    /// share coverage. Widened arithmetic keeps the result exact across the
    /// full coordinate range.
    #[must_use]
    pub fn gap_to(&self, next: &Interval) -> i128 {
        i128::from(next.start) - i128::from(self.end) - 1
    }
}

/// Iterate indices `0..n` in biological 5' to 3' order for the given strand.
///
/// Callers keep their feature lists in ascending genomic order; this is the
/// single place where strand flips the walk direction, so downstream checks
/// never branch on strand themselves.
#[must_use]
pub fn biological_indices(n: usize, strand: Strand) -> Box<dyn Iterator<Item = usize>> {
    if strand.is_reverse() {
        Box::new((0..n).rev())
    } else {
        Box::new(0..n)
    }
}
