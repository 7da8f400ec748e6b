use crate::error::{GlyphPackError, Result};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// MaxRects free-rectangle choice heuristics.
///
/// All heuristics minimize their score except `ContactPoint`, which maximizes
/// the length of edges shared with the bin border and already placed glyphs.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum MaxRectsHeuristic {
    BestShortSideFit,
    BestLongSideFit,
    BestAreaFit,
    BottomLeft,
    ContactPoint,
}

impl MaxRectsHeuristic {
    /// Heuristics tried by the page planner when probing whether a page size fits,
    /// in the order they are tried. Earlier entries win occupancy ties.
    pub const GROWTH: [MaxRectsHeuristic; 4] = [
        MaxRectsHeuristic::BestShortSideFit,
        MaxRectsHeuristic::BestLongSideFit,
        MaxRectsHeuristic::BestAreaFit,
        MaxRectsHeuristic::BottomLeft,
    ];
}

impl FromStr for MaxRectsHeuristic {
    type Err = ();
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "bssf" | "bestshortsidefit" => Ok(Self::BestShortSideFit),
            "blsf" | "bestlongsidefit" => Ok(Self::BestLongSideFit),
            "baf" | "bestareafit" => Ok(Self::BestAreaFit),
            "bl" | "bottomleft" => Ok(Self::BottomLeft),
            "cp" | "contactpoint" => Ok(Self::ContactPoint),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlannerConfig {
    /// Largest page width/height in pixels a page may grow to.
    #[serde(default = "default_max_page_extent")]
    pub max_page_extent: u32,
    /// Side length of the first page size tried, and of every page started after an overflow.
    #[serde(default = "default_initial_page_extent")]
    pub initial_page_extent: u32,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            max_page_extent: default_max_page_extent(),
            initial_page_extent: default_initial_page_extent(),
        }
    }
}

impl PlannerConfig {
    /// Create a fluent builder for `PlannerConfig`.
    pub fn builder() -> PlannerConfigBuilder {
        PlannerConfigBuilder::new()
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.max_page_extent == 0 {
            return Err(GlyphPackError::InvalidConfig(
                "max_page_extent must be positive".into(),
            ));
        }
        if self.initial_page_extent == 0 {
            return Err(GlyphPackError::InvalidConfig(
                "initial_page_extent must be positive".into(),
            ));
        }
        if self.initial_page_extent > self.max_page_extent {
            return Err(GlyphPackError::InvalidConfig(format!(
                "initial_page_extent ({}) exceeds max_page_extent ({})",
                self.initial_page_extent, self.max_page_extent
            )));
        }
        Ok(())
    }
}

fn default_max_page_extent() -> u32 {
    1024
}
fn default_initial_page_extent() -> u32 {
    32
}

/// Builder for `PlannerConfig` for ergonomic construction.
#[derive(Debug, Default, Clone)]
pub struct PlannerConfigBuilder {
    cfg: PlannerConfig,
}

impl PlannerConfigBuilder {
    pub fn new() -> Self {
        Self {
            cfg: PlannerConfig::default(),
        }
    }
    pub fn max_page_extent(mut self, v: u32) -> Self {
        self.cfg.max_page_extent = v;
        self
    }
    pub fn initial_page_extent(mut self, v: u32) -> Self {
        self.cfg.initial_page_extent = v;
        self
    }
    pub fn build(self) -> PlannerConfig {
        self.cfg
    }
}
