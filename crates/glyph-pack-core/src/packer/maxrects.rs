use crate::config::MaxRectsHeuristic;
use crate::model::Rect;

/// Single-bin MaxRects packer.
///
/// Free space is tracked as a list of maximal free rectangles which may overlap each
/// other. Every placement splits the free rectangles it touches into up to four
/// residues and then prunes any free rectangle contained in another one.
/// Placements are never rotated.
#[derive(Debug, Clone)]
pub struct MaxRectsBinPack {
    width: u32,
    height: u32,
    free: Vec<Rect>,
    used: Vec<Rect>,
}

impl MaxRectsBinPack {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            free: vec![Rect::new(0, 0, width, height)],
            used: Vec::new(),
        }
    }

    pub fn bin_size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn free_rects(&self) -> &[Rect] {
        &self.free
    }

    pub fn used_rects(&self) -> &[Rect] {
        &self.used
    }

    /// Places a `w` x `h` rectangle using `heuristic`.
    ///
    /// Returns `None` when no free rectangle can host the size; the bin is left untouched
    /// in that case. Callers skip zero-area glyphs instead of inserting them.
    pub fn insert(&mut self, w: u32, h: u32, heuristic: MaxRectsHeuristic) -> Option<Rect> {
        let node = self.find_position(w, h, heuristic)?;
        self.place_rect(&node);
        Some(node)
    }

    /// Used area divided by bin area, in `[0, 1]`.
    pub fn occupancy(&self) -> f32 {
        let bin_area = (self.width as u64) * (self.height as u64);
        if bin_area == 0 {
            return 0.0;
        }
        let used_area: u64 = self.used.iter().map(Rect::area).sum();
        (used_area as f64 / bin_area as f64) as f32
    }

    fn find_position(&self, w: u32, h: u32, heuristic: MaxRectsHeuristic) -> Option<Rect> {
        let mut best: Option<(Rect, (i64, i64))> = None;
        for fr in &self.free {
            if fr.w < w || fr.h < h {
                continue;
            }
            let score = self.score(fr, w, h, heuristic);
            // strict comparison: the first free rect wins ties
            if best.is_none_or(|(_, best_score)| score < best_score) {
                best = Some((Rect::new(fr.x, fr.y, w, h), score));
            }
        }
        best.map(|(rect, _)| rect)
    }

    /// Lexicographic (primary, secondary) score; lower is better.
    fn score(&self, fr: &Rect, w: u32, h: u32, heuristic: MaxRectsHeuristic) -> (i64, i64) {
        let leftover_h = (fr.w - w) as i64;
        let leftover_v = (fr.h - h) as i64;
        let short_fit = leftover_h.min(leftover_v);
        let long_fit = leftover_h.max(leftover_v);
        match heuristic {
            MaxRectsHeuristic::BestShortSideFit => (short_fit, long_fit),
            MaxRectsHeuristic::BestLongSideFit => (long_fit, short_fit),
            MaxRectsHeuristic::BestAreaFit => {
                let area_fit = fr.area() as i64 - ((w as i64) * (h as i64));
                (area_fit, short_fit)
            }
            MaxRectsHeuristic::BottomLeft => ((fr.y + h) as i64, fr.x as i64),
            MaxRectsHeuristic::ContactPoint => {
                // maximize contact score: negate for minimization
                let contact = self.contact_point_score(fr.x, fr.y, w, h);
                (-(contact as i64), 0)
            }
        }
    }

    fn contact_point_score(&self, x: u32, y: u32, w: u32, h: u32) -> u64 {
        let node = Rect::new(x, y, w, h);
        let mut score = 0u64;
        if node.x == 0 || node.x2() == self.width {
            score += node.h as u64;
        }
        if node.y == 0 || node.y2() == self.height {
            score += node.w as u64;
        }

        for u in &self.used {
            // left/right edges shared
            if u.x == node.x2() || u.x2() == node.x {
                score += overlap_1d(u.y, u.y2(), node.y, node.y2()) as u64;
            }
            // top/bottom edges shared
            if u.y == node.y2() || u.y2() == node.y {
                score += overlap_1d(u.x, u.x2(), node.x, node.x2()) as u64;
            }
        }
        score
    }

    fn place_rect(&mut self, node: &Rect) {
        // Build the replacement list instead of mutating while iterating. Survivors keep
        // their order and split residues follow, so scoring ties stay stable.
        let mut kept: Vec<Rect> = Vec::with_capacity(self.free.len());
        let mut residues: Vec<Rect> = Vec::new();
        for fr in &self.free {
            if fr.intersects(node) {
                split_free_node(fr, node, &mut residues);
            } else {
                kept.push(*fr);
            }
        }
        kept.extend(residues);
        self.free = kept;
        self.prune_free_list();
        self.used.push(*node);
    }

    /// Removes every free rectangle contained in another one.
    fn prune_free_list(&mut self) {
        let mut i = 0;
        while i < self.free.len() {
            let a = self.free[i];
            let mut remove_i = false;
            let mut j = i + 1;
            while j < self.free.len() {
                let b = self.free[j];
                if b.contains(&a) {
                    remove_i = true;
                    break;
                }
                if a.contains(&b) {
                    self.free.remove(j);
                    continue;
                }
                j += 1;
            }
            if remove_i {
                self.free.remove(i);
            } else {
                i += 1;
            }
        }
    }
}

/// Pushes the parts of `fr` not covered by `node` (top, bottom, left, right). Each residue
/// spans the full extent of `fr` along the other axis, so residues overlap each other.
fn split_free_node(fr: &Rect, node: &Rect, out: &mut Vec<Rect>) {
    let residues = [
        // top
        (node.y > fr.y && node.y < fr.y2()).then(|| Rect::new(fr.x, fr.y, fr.w, node.y - fr.y)),
        // bottom
        (node.y2() < fr.y2()).then(|| Rect::new(fr.x, node.y2(), fr.w, fr.y2() - node.y2())),
        // left
        (node.x > fr.x && node.x < fr.x2()).then(|| Rect::new(fr.x, fr.y, node.x - fr.x, fr.h)),
        // right
        (node.x2() < fr.x2()).then(|| Rect::new(node.x2(), fr.y, fr.x2() - node.x2(), fr.h)),
    ];
    out.extend(residues.into_iter().flatten().filter(|r| !r.is_empty()));
}

fn overlap_1d(a1: u32, a2: u32, b1: u32, b2: u32) -> u32 {
    let start = a1.max(b1);
    let end = a2.min(b2);
    end.saturating_sub(start)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_insert_lands_top_left() {
        for heuristic in MaxRectsHeuristic::GROWTH {
            let mut bin = MaxRectsBinPack::new(32, 32);
            assert_eq!(bin.insert(10, 10, heuristic), Some(Rect::new(0, 0, 10, 10)));
        }
        let mut bin = MaxRectsBinPack::new(32, 32);
        assert_eq!(
            bin.insert(10, 10, MaxRectsHeuristic::ContactPoint),
            Some(Rect::new(0, 0, 10, 10))
        );
    }

    #[test]
    fn split_leaves_right_and_bottom_residues() {
        let mut bin = MaxRectsBinPack::new(32, 32);
        bin.insert(10, 12, MaxRectsHeuristic::BestShortSideFit);
        // bottom residue comes before right residue
        assert_eq!(
            bin.free_rects(),
            &[Rect::new(0, 12, 32, 20), Rect::new(10, 0, 22, 32)]
        );
        assert_eq!(bin.used_rects(), &[Rect::new(0, 0, 10, 12)]);
    }

    #[test]
    fn oversized_insert_fails_without_side_effects() {
        let mut bin = MaxRectsBinPack::new(32, 32);
        bin.insert(20, 20, MaxRectsHeuristic::BestAreaFit);
        let free_before = bin.free_rects().to_vec();
        assert_eq!(bin.insert(33, 1, MaxRectsHeuristic::BestAreaFit), None);
        assert_eq!(bin.insert(20, 20, MaxRectsHeuristic::BestAreaFit), None);
        assert_eq!(bin.free_rects(), free_before.as_slice());
        assert_eq!(bin.used_rects().len(), 1);
    }

    #[test]
    fn exact_fill_empties_free_list() {
        let mut bin = MaxRectsBinPack::new(32, 32);
        for _ in 0..4 {
            assert!(bin.insert(16, 16, MaxRectsHeuristic::BottomLeft).is_some());
        }
        assert!(bin.free_rects().is_empty());
        assert_eq!(bin.occupancy(), 1.0);
        assert_eq!(bin.insert(1, 1, MaxRectsHeuristic::BottomLeft), None);
    }

    #[test]
    fn bottom_left_prefers_lowest_top_edge() {
        let mut bin = MaxRectsBinPack::new(64, 64);
        bin.insert(40, 10, MaxRectsHeuristic::BottomLeft);
        // free: (0,10,64,54) and (40,0,24,64); the latter keeps y + h smaller
        assert_eq!(
            bin.insert(20, 10, MaxRectsHeuristic::BottomLeft),
            Some(Rect::new(40, 0, 20, 10))
        );
    }

    #[test]
    fn contact_point_hugs_existing_glyphs() {
        let mut bin = MaxRectsBinPack::new(64, 64);
        bin.insert(32, 32, MaxRectsHeuristic::ContactPoint);
        let placed = bin.insert(16, 16, MaxRectsHeuristic::ContactPoint).unwrap();
        // (0,32): left border 16 + shared top edge 16; (32,0): top border 16 + shared left edge 16
        assert_eq!(placed, Rect::new(0, 32, 16, 16));
    }

    #[test]
    fn contact_score_credits_borders_once_per_axis() {
        let bin = MaxRectsBinPack::new(16, 16);
        // touches all four borders: height once for left/right, width once for top/bottom
        assert_eq!(bin.contact_point_score(0, 0, 16, 16), 32);
        assert_eq!(bin.contact_point_score(4, 4, 4, 4), 0);
    }

    #[test]
    fn prune_is_idempotent() {
        let mut bin = MaxRectsBinPack::new(128, 128);
        for (w, h) in [(30, 20), (15, 40), (50, 10), (7, 7), (60, 33)] {
            bin.insert(w, h, MaxRectsHeuristic::BestShortSideFit);
        }
        bin.prune_free_list();
        let once = bin.free_rects().to_vec();
        bin.prune_free_list();
        assert_eq!(bin.free_rects(), once.as_slice());
    }

    #[test]
    fn prune_drops_duplicates_and_contained() {
        let mut bin = MaxRectsBinPack::new(8, 8);
        bin.free = vec![
            Rect::new(0, 0, 4, 4),
            Rect::new(0, 0, 8, 8),
            Rect::new(0, 0, 8, 8),
            Rect::new(2, 2, 2, 2),
        ];
        bin.prune_free_list();
        assert_eq!(bin.free_rects(), &[Rect::new(0, 0, 8, 8)]);
    }

    #[test]
    fn occupancy_of_empty_bin() {
        assert_eq!(MaxRectsBinPack::new(32, 32).occupancy(), 0.0);
        assert_eq!(MaxRectsBinPack::new(0, 0).occupancy(), 0.0);
    }
}
