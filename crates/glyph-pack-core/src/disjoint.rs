//! Pairwise non-overlap checks for placed rectangles.
//!
//! Not used by the planner itself; it serves as an oracle for layouts produced by
//! [`MaxRectsBinPack`](crate::packer::maxrects::MaxRectsBinPack) and the page planner.

use crate::model::Rect;

/// A growing set of rectangles that are pairwise disjoint.
///
/// Rectangles with a zero side are accepted by [`add`](Self::add) but never stored,
/// since they cover no pixels.
#[derive(Debug, Clone, Default)]
pub struct DisjointRectCollection {
    rects: Vec<Rect>,
}

impl DisjointRectCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `r` if it does not overlap any stored rectangle. Returns false on overlap.
    pub fn add(&mut self, r: Rect) -> bool {
        if r.is_empty() {
            return true;
        }
        if !self.is_disjoint(&r) {
            return false;
        }
        self.rects.push(r);
        true
    }

    pub fn clear(&mut self) {
        self.rects.clear();
    }

    pub fn rects(&self) -> &[Rect] {
        &self.rects
    }

    /// Returns true if `r` overlaps none of the stored rectangles.
    pub fn is_disjoint(&self, r: &Rect) -> bool {
        if r.is_empty() {
            return true;
        }
        self.rects.iter().all(|s| rects_disjoint(s, r))
    }
}

/// Returns true if `a` and `b` share no interior point. Shared edges are allowed.
pub fn rects_disjoint(a: &Rect, b: &Rect) -> bool {
    a.x2() <= b.x || b.x2() <= a.x || a.y2() <= b.y || b.y2() <= a.y
}

/// Returns true if every pair drawn from `rects` is disjoint.
pub fn all_disjoint<'a>(rects: impl IntoIterator<Item = &'a Rect>) -> bool {
    let mut set = DisjointRectCollection::new();
    rects.into_iter().all(|r| set.add(*r))
}
