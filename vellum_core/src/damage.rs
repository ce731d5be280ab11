// Copyright 2026 the Vellum Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Damage lists with merge-on-insert.
//!
//! A [`DamageList`] holds a handful of pairwise non-overlapping rectangles.
//! Inserting a rect that intersects an existing entry removes that entry and
//! retries with the bounding box of both, because the enlarged box may now
//! reach a third entry the original rect never touched.
//!
//! The result is conservative: merging may cover pixels nobody damaged (two
//! overlapping strips in an L shape become their bounding box), but a pixel
//! that was damaged is always covered.
//!
//! Lists are expected to stay small. [`DamageList::set_limit`] optionally caps
//! the number of regions; exceeding the cap collapses the list to its single
//! bounding rectangle.

use alloc::vec::Vec;
use core::slice;

use crate::geometry::{Point, Rect};

/// An unordered set of non-overlapping, non-empty damage rectangles.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DamageList {
    rects: Vec<Rect>,
    limit: Option<usize>,
}

impl DamageList {
    /// Creates an empty list with no region cap.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            rects: Vec::new(),
            limit: None,
        }
    }

    /// Creates an empty list that collapses to its bounding box once it holds
    /// more than `limit` regions. A limit of zero is treated as one.
    #[must_use]
    pub fn with_limit(limit: usize) -> Self {
        Self {
            rects: Vec::new(),
            limit: Some(limit.max(1)),
        }
    }

    /// Creates a list holding a single rect (or nothing, if it is empty).
    #[must_use]
    pub fn from_rect(rect: Rect) -> Self {
        let mut list = Self::new();
        list.add(rect);
        list
    }

    /// Sets or clears the region cap. Takes effect on the next insertion.
    pub fn set_limit(&mut self, limit: Option<usize>) {
        self.limit = limit.map(|l| l.max(1));
    }

    /// Returns the region cap, if any.
    #[must_use]
    pub fn limit(&self) -> Option<usize> {
        self.limit
    }

    /// Merges `rect` into the list.
    ///
    /// Empty rects are ignored. Adding a rect that an existing entry already
    /// covers (in particular, an equal one) is a no-op. Otherwise every entry
    /// the rect, or its growing bounding box, intersects is absorbed and the
    /// final box is appended.
    pub fn add(&mut self, rect: Rect) {
        if rect.is_empty() {
            return;
        }

        let mut pending = rect;
        loop {
            if self.rects.iter().any(|r| r.contains_rect(&pending)) {
                return;
            }
            match self.rects.iter().position(|r| r.intersects(&pending)) {
                Some(i) => {
                    let absorbed = self.rects.swap_remove(i);
                    pending = absorbed.merge(&pending);
                }
                None => {
                    self.rects.push(pending);
                    break;
                }
            }
        }

        if let Some(limit) = self.limit
            && self.rects.len() > limit
        {
            let bounds = self.bounds();
            self.rects.clear();
            self.rects.push(bounds);
        }
    }

    /// Merges every rect from `rects` into the list.
    pub fn add_all<I: IntoIterator<Item = Rect>>(&mut self, rects: I) {
        for rect in rects {
            self.add(rect);
        }
    }

    /// Merges every entry of `other` into the list.
    pub fn extend_from(&mut self, other: &Self) {
        self.add_all(other.iter().copied());
    }

    /// Removes all entries. The region cap is kept.
    pub fn clear(&mut self) {
        self.rects.clear();
    }

    /// Moves the entries out, leaving the list empty with its cap intact.
    #[must_use]
    pub fn take(&mut self) -> Self {
        Self {
            rects: core::mem::take(&mut self.rects),
            limit: self.limit,
        }
    }

    /// Number of regions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rects.len()
    }

    /// Returns `true` if nothing is damaged.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rects.is_empty()
    }

    /// The regions, in no particular order.
    #[must_use]
    pub fn as_slice(&self) -> &[Rect] {
        &self.rects
    }

    /// Iterates over the regions.
    pub fn iter(&self) -> slice::Iter<'_, Rect> {
        self.rects.iter()
    }

    /// The bounding box of every region, or [`Rect::EMPTY`].
    #[must_use]
    pub fn bounds(&self) -> Rect {
        self.rects.iter().fold(Rect::EMPTY, |acc, r| acc.merge(r))
    }

    /// Total number of damaged pixels.
    ///
    /// Exact, since regions never overlap.
    #[must_use]
    pub fn covered_area(&self) -> u64 {
        self.rects.iter().map(Rect::area).sum()
    }

    /// Returns `true` if any region covers `point`.
    #[must_use]
    pub fn contains_point(&self, point: Point) -> bool {
        self.rects.iter().any(|r| r.contains(point))
    }
}

impl<'a> IntoIterator for &'a DamageList {
    type Item = &'a Rect;
    type IntoIter = slice::Iter<'a, Rect>;

    fn into_iter(self) -> Self::IntoIter {
        self.rects.iter()
    }
}

impl FromIterator<Rect> for DamageList {
    fn from_iter<I: IntoIterator<Item = Rect>>(iter: I) -> Self {
        let mut list = Self::new();
        list.add_all(iter);
        list
    }
}

impl Extend<Rect> for DamageList {
    fn extend<I: IntoIterator<Item = Rect>>(&mut self, iter: I) {
        self.add_all(iter);
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;
    use alloc::vec::Vec;

    use super::*;

    /// Deterministic xorshift so sweeps are reproducible.
    struct XorShift(u64);

    impl XorShift {
        fn next(&mut self) -> u64 {
            self.0 ^= self.0 << 13;
            self.0 ^= self.0 >> 7;
            self.0 ^= self.0 << 17;
            self.0
        }

        fn range(&mut self, max: u64) -> i32 {
            i32::try_from(self.next() % max).unwrap()
        }

        fn rect(&mut self) -> Rect {
            Rect::new(self.range(56), self.range(56), self.range(12), self.range(12))
        }
    }

    const GRID: i32 = 64;

    fn covered(rects: &[Rect], p: Point) -> bool {
        rects.iter().any(|r| r.contains(p))
    }

    fn assert_invariants(list: &DamageList) {
        for (i, a) in list.iter().enumerate() {
            assert!(!a.is_empty(), "empty rect {a:?} in list");
            for b in &list.as_slice()[i + 1..] {
                assert!(!a.intersects(b), "{a:?} overlaps {b:?}");
                assert_ne!(a, b, "duplicate rect {a:?}");
            }
        }
    }

    fn coverage(list: &DamageList) -> Vec<bool> {
        let mut out = Vec::new();
        for y in 0..GRID {
            for x in 0..GRID {
                out.push(list.contains_point(Point::new(x, y)));
            }
        }
        out
    }

    #[test]
    fn insert_into_empty() {
        let mut list = DamageList::new();
        list.add(Rect::new(0, 0, 100, 100));
        assert_eq!(list.as_slice(), &[Rect::new(0, 0, 100, 100)]);
    }

    #[test]
    fn containing_rect_replaces_existing() {
        let mut list = DamageList::new();
        list.add(Rect::new(0, 0, 100, 100));
        list.add(Rect::new(0, 0, 200, 200));
        assert_eq!(list.len(), 1);
        assert_eq!(list.as_slice(), &[Rect::new(0, 0, 200, 200)]);
    }

    #[test]
    fn disjoint_rects_are_kept_as_is() {
        let mut list = DamageList::new();
        list.add(Rect::new(0, 0, 10, 10));
        list.add(Rect::new(20, 20, 10, 10));
        assert_eq!(list.len(), 2);
        assert!(list.as_slice().contains(&Rect::new(0, 0, 10, 10)));
        assert!(list.as_slice().contains(&Rect::new(20, 20, 10, 10)));
    }

    #[test]
    fn edge_adjacent_rects_stay_separate() {
        let mut list = DamageList::new();
        list.add(Rect::new(0, 0, 10, 10));
        list.add(Rect::new(10, 0, 10, 10));
        assert_eq!(list.len(), 2, "touching edges do not merge");
    }

    #[test]
    fn one_pixel_overlap_merges() {
        let mut list = DamageList::new();
        list.add(Rect::new(0, 0, 10, 10));
        list.add(Rect::new(9, 0, 10, 10));
        assert_eq!(list.as_slice(), &[Rect::new(0, 0, 19, 10)]);
    }

    #[test]
    fn one_pixel_gap_stays_separate() {
        let mut list = DamageList::new();
        list.add(Rect::new(0, 0, 10, 10));
        list.add(Rect::new(11, 0, 10, 10));
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn empty_rect_is_ignored() {
        let mut list = DamageList::new();
        list.add(Rect::EMPTY);
        list.add(Rect::new(5, 5, 0, 3));
        assert!(list.is_empty());
    }

    #[test]
    fn merge_cascades_into_untouched_rect() {
        // The new rect only touches the first entry, but the merged box
        // reaches the second.
        let mut list = DamageList::new();
        list.add(Rect::new(0, 0, 30, 10));
        list.add(Rect::new(20, 20, 10, 10));
        assert_eq!(list.len(), 2);

        list.add(Rect::new(0, 5, 10, 20));
        assert_eq!(list.as_slice(), &[Rect::new(0, 0, 30, 30)]);
        assert_invariants(&list);
    }

    #[test]
    fn l_shape_over_damages_to_bounding_box() {
        let mut list = DamageList::new();
        list.add(Rect::new(0, 0, 100, 10));
        list.add(Rect::new(0, 5, 10, 100));
        assert_eq!(list.as_slice(), &[Rect::new(0, 0, 100, 105)]);
    }

    #[test]
    fn limit_collapses_to_bounds() {
        let mut list = DamageList::with_limit(2);
        list.add(Rect::new(0, 0, 5, 5));
        list.add(Rect::new(10, 0, 5, 5));
        assert_eq!(list.len(), 2);
        list.add(Rect::new(20, 20, 5, 5));
        assert_eq!(list.as_slice(), &[Rect::new(0, 0, 25, 25)]);
        assert_eq!(list.limit(), Some(2));
    }

    #[test]
    fn take_keeps_limit() {
        let mut list = DamageList::with_limit(4);
        list.add(Rect::new(0, 0, 5, 5));
        let taken = list.take();
        assert!(list.is_empty());
        assert_eq!(list.limit(), Some(4));
        assert_eq!(taken.len(), 1);
    }

    #[test]
    fn rects_reaching_the_coordinate_limit_merge() {
        let mut list = DamageList::new();
        list.add(Rect::new(i32::MAX - 5, 0, 10, 10));
        list.add(Rect::new(i32::MAX - 20, 0, 18, 10));
        assert_eq!(list.as_slice(), &[Rect::new(i32::MAX - 20, 0, 20, 10)]);
        assert_invariants(&list);
    }

    #[test]
    fn bounds_and_area() {
        let list: DamageList = vec![Rect::new(0, 0, 10, 10), Rect::new(20, 20, 10, 10)]
            .into_iter()
            .collect();
        assert_eq!(list.bounds(), Rect::new(0, 0, 30, 30));
        assert_eq!(list.covered_area(), 200);
        assert_eq!(DamageList::new().bounds(), Rect::EMPTY);
    }

    #[test]
    fn adding_twice_is_idempotent() {
        let mut rng = XorShift(0x9e37_79b9_7f4a_7c15);
        for _ in 0..200 {
            let mut list = DamageList::new();
            for _ in 0..6 {
                list.add(rng.rect());
            }
            let r = rng.rect();
            list.add(r);
            let once = list.clone();
            list.add(r);
            assert_eq!(list, once, "second insert of {r:?} changed the list");
        }
    }

    #[test]
    fn random_sequences_keep_invariants_and_coverage() {
        let mut rng = XorShift(0xdead_beef_cafe_f00d);
        for _ in 0..200 {
            let inserted: Vec<Rect> = (0..12).map(|_| rng.rect()).collect();
            let mut list = DamageList::new();
            for &r in &inserted {
                list.add(r);
                assert_invariants(&list);
            }
            for y in 0..GRID {
                for x in 0..GRID {
                    let p = Point::new(x, y);
                    if covered(&inserted, p) {
                        assert!(list.contains_point(p), "lost damage at {p:?}");
                    }
                }
            }
        }
    }

    #[test]
    fn insertion_order_does_not_change_coverage_of_pairs() {
        let mut rng = XorShift(0x0123_4567_89ab_cdef);
        for _ in 0..500 {
            let a = rng.rect();
            let b = rng.rect();
            let forward: DamageList = [a, b].into_iter().collect();
            let backward: DamageList = [b, a].into_iter().collect();
            assert_eq!(
                coverage(&forward),
                coverage(&backward),
                "order changed coverage for {a:?}, {b:?}"
            );
            assert_eq!(forward.covered_area(), backward.covered_area());
        }
    }
}
