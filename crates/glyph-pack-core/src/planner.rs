use crate::config::{MaxRectsHeuristic, PlannerConfig};
use crate::error::{GlyphPackError, Result};
use crate::model::{GlyphRequest, Page, PlacedGlyph, Rect};
use crate::packer::maxrects::MaxRectsBinPack;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, instrument, trace};

/// Cooperative cancellation flag shared between the thread running a pack and the
/// thread that wants to abort it. Clones observe the same flag.
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    /// Clears the flag so the next pack can run.
    pub fn reset(&self) {
        self.0.store(false, Ordering::Relaxed);
    }

    pub fn is_canceled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Outcome of a throwaway trial pack of the whole remaining stack.
#[derive(Debug, Clone, Copy, PartialEq)]
enum TrialFit {
    All,
    Partial { occupancy: f32 },
}

/// Plans the pages for an entire glyph set.
///
/// Pages start at `initial_page_extent` squared and double until every remaining glyph
/// fits with one of [`MaxRectsHeuristic::GROWTH`]. Once doubling would exceed
/// `max_page_extent`, the page is filled as far as possible with the heuristic that
/// reached the highest trial occupancy, and the leftovers start over on a new page.
#[derive(Debug, Clone, Default)]
pub struct PagePlanner {
    config: PlannerConfig,
    cancel: CancelFlag,
}

impl PagePlanner {
    pub fn new(config: PlannerConfig) -> Self {
        Self {
            config,
            cancel: CancelFlag::new(),
        }
    }

    pub fn with_cancel_flag(config: PlannerConfig, cancel: CancelFlag) -> Self {
        Self { config, cancel }
    }

    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// Handle for canceling packs run by this planner from another thread.
    pub fn cancel_flag(&self) -> CancelFlag {
        self.cancel.clone()
    }

    /// Packs `requests` into pages.
    ///
    /// Requests are consumed as a stack: the last request is placed first, and glyphs
    /// appear on their page in placement order. The cancel flag is polled once per page
    /// decision, never per glyph. No partial result survives `Canceled` or `DoesNotFit`.
    #[instrument(skip_all, fields(glyphs = requests.len(), max_page_extent = self.config.max_page_extent))]
    pub fn pack<K: Clone>(&self, requests: &[GlyphRequest<K>]) -> Result<Vec<Page<K>>> {
        self.config.validate()?;

        if requests.is_empty() {
            return Err(GlyphPackError::Empty);
        }

        let initial = self.config.initial_page_extent;
        let max_extent = self.config.max_page_extent;
        // The stack is `requests[..remaining]`; its top is the last element.
        let mut remaining = requests.len();
        let mut bin_size = (initial, initial);
        let mut pages: Vec<Page<K>> = Vec::new();

        while remaining > 0 {
            if self.cancel.is_canceled() {
                debug!(committed_pages = pages.len(), "pack canceled");
                return Err(GlyphPackError::Canceled);
            }

            let stack = &requests[..remaining];
            let mut occupancies = [0f32; MaxRectsHeuristic::GROWTH.len()];
            let mut fitting = None;
            for (i, heuristic) in MaxRectsHeuristic::GROWTH.into_iter().enumerate() {
                match trial_fit(stack, bin_size, heuristic) {
                    TrialFit::All => {
                        fitting = Some(heuristic);
                        break;
                    }
                    TrialFit::Partial { occupancy } => occupancies[i] = occupancy,
                }
            }

            if let Some(heuristic) = fitting {
                let page = fill_page(stack, bin_size, heuristic);
                debug_assert_eq!(page.glyphs.len(), remaining);
                debug!(
                    width = bin_size.0,
                    height = bin_size.1,
                    ?heuristic,
                    glyphs = page.glyphs.len(),
                    "committed page holding all remaining glyphs"
                );
                remaining -= page.glyphs.len();
                pages.push(page);
                continue;
            }

            let doubled = (bin_size.0.saturating_mul(2), bin_size.1.saturating_mul(2));
            if doubled.0 <= max_extent && doubled.1 <= max_extent {
                trace!(width = doubled.0, height = doubled.1, "growing page");
                bin_size = doubled;
                continue;
            }

            let heuristic = best_heuristic(&occupancies);
            let page = fill_page(stack, bin_size, heuristic);
            if page.glyphs.is_empty() {
                let placed = requests.len() - remaining;
                debug!(placed, total = requests.len(), "glyph does not fit an empty page");
                return Err(GlyphPackError::DoesNotFit {
                    placed,
                    total: requests.len(),
                });
            }
            debug!(
                width = bin_size.0,
                height = bin_size.1,
                ?heuristic,
                glyphs = page.glyphs.len(),
                left = remaining - page.glyphs.len(),
                "committed overflow page"
            );
            remaining -= page.glyphs.len();
            pages.push(page);
            bin_size = (initial, initial);
        }

        for (index, page) in pages.iter_mut().enumerate() {
            page.index = index;
            for glyph in &mut page.glyphs {
                glyph.page_index = index;
            }
        }

        Ok(pages)
    }
}

/// Packs `requests` with the default configuration and the given size ceiling.
///
/// Ceilings below the default initial extent start (and stay) at the ceiling itself.
pub fn pack_glyphs<K: Clone>(
    requests: &[GlyphRequest<K>],
    max_page_extent: u32,
) -> Result<Vec<Page<K>>> {
    let initial = PlannerConfig::default().initial_page_extent;
    let cfg = PlannerConfig::builder()
        .max_page_extent(max_page_extent)
        .initial_page_extent(initial.min(max_page_extent))
        .build();
    PagePlanner::new(cfg).pack(requests)
}

/// Tries to place the whole stack, top first, into a fresh bin.
fn trial_fit<K>(
    stack: &[GlyphRequest<K>],
    bin_size: (u32, u32),
    heuristic: MaxRectsHeuristic,
) -> TrialFit {
    let mut bin = MaxRectsBinPack::new(bin_size.0, bin_size.1);
    for req in stack.iter().rev() {
        if req.is_degenerate() {
            continue;
        }
        if bin.insert(req.w, req.h, heuristic).is_none() {
            return TrialFit::Partial {
                occupancy: bin.occupancy(),
            };
        }
    }
    TrialFit::All
}

/// Places glyphs from the top of the stack until the first one that does not fit.
/// The returned page holds exactly the glyphs to pop, in placement order.
fn fill_page<K: Clone>(
    stack: &[GlyphRequest<K>],
    bin_size: (u32, u32),
    heuristic: MaxRectsHeuristic,
) -> Page<K> {
    let mut bin = MaxRectsBinPack::new(bin_size.0, bin_size.1);
    let mut glyphs = Vec::new();
    for req in stack.iter().rev() {
        let rect = if req.is_degenerate() {
            Rect::default()
        } else {
            match bin.insert(req.w, req.h, heuristic) {
                Some(rect) => rect,
                None => break,
            }
        };
        glyphs.push(PlacedGlyph {
            id: req.id.clone(),
            rect,
            page_index: 0,
        });
    }
    Page {
        index: 0,
        width: bin_size.0,
        height: bin_size.1,
        glyphs,
    }
}

/// Growth heuristic with the highest trial occupancy; the earliest one wins ties.
fn best_heuristic(occupancies: &[f32; MaxRectsHeuristic::GROWTH.len()]) -> MaxRectsHeuristic {
    let mut best = 0;
    for (i, occ) in occupancies.iter().enumerate() {
        if *occ > occupancies[best] {
            best = i;
        }
    }
    MaxRectsHeuristic::GROWTH[best]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reqs(sizes: &[(u32, u32)]) -> Vec<GlyphRequest<usize>> {
        sizes
            .iter()
            .enumerate()
            .map(|(i, &(w, h))| GlyphRequest::new(i, w, h))
            .collect()
    }

    #[test]
    fn trial_skips_degenerate_glyphs() {
        let stack = reqs(&[(0, 0), (32, 32), (0, 0)]);
        assert_eq!(
            trial_fit(&stack, (32, 32), MaxRectsHeuristic::BestAreaFit),
            TrialFit::All
        );
    }

    #[test]
    fn trial_reports_occupancy_before_first_failure() {
        // top of stack is (16, 32), then (32, 32) fails
        let stack = reqs(&[(32, 32), (16, 32)]);
        assert_eq!(
            trial_fit(&stack, (32, 32), MaxRectsHeuristic::BestShortSideFit),
            TrialFit::Partial { occupancy: 0.5 }
        );
    }

    #[test]
    fn fill_page_stops_at_first_misfit() {
        let stack = reqs(&[(8, 8), (40, 40), (16, 16), (0, 0)]);
        let page = fill_page(&stack, (32, 32), MaxRectsHeuristic::BottomLeft);
        let ids: Vec<usize> = page.glyphs.iter().map(|g| g.id).collect();
        // (8, 8) would fit but sits below the misfit on the stack
        assert_eq!(ids, vec![3, 2]);
        assert_eq!(page.glyphs[0].rect, Rect::default());
        assert_eq!(page.glyphs[1].rect, Rect::new(0, 0, 16, 16));
    }

    #[test]
    fn best_heuristic_prefers_earliest_on_ties() {
        assert_eq!(
            best_heuristic(&[0.25, 0.5, 0.5, 0.1]),
            MaxRectsHeuristic::BestLongSideFit
        );
        assert_eq!(
            best_heuristic(&[0.0, 0.0, 0.0, 0.0]),
            MaxRectsHeuristic::BestShortSideFit
        );
    }

    #[test]
    fn cancel_flag_clones_share_state() {
        let flag = CancelFlag::new();
        let planner = PagePlanner::with_cancel_flag(PlannerConfig::default(), flag.clone());
        assert!(!planner.cancel_flag().is_canceled());
        flag.cancel();
        assert!(planner.cancel_flag().is_canceled());
        planner.cancel_flag().reset();
        assert!(!flag.is_canceled());
    }
}
