//! Core library for packing bitmap-font glyphs into texture pages.
//!
//! - Bin packer: MaxRects (BSSF/BLSF/BAF/BL/CP), one fixed-size bin, no rotation
//! - Planner: `pack_glyphs` / `PagePlanner::pack` grow a page by doubling, try four
//!   heuristics per size and spill overflow glyphs onto further pages
//! - Data model is serde-serializable; compositing and export are left to the caller.
//!
//! Quick example:
//! ```
//! use glyph_pack_core::{GlyphRequest, pack_glyphs};
//! # fn main() -> glyph_pack_core::Result<()> {
//! let glyphs = vec![
//!     GlyphRequest::new('a', 10, 12),
//!     GlyphRequest::new('b', 11, 14),
//!     GlyphRequest::new(' ', 0, 0),
//! ];
//! let pages = pack_glyphs(&glyphs, 1024)?;
//! assert_eq!(pages.len(), 1);
//! assert_eq!((pages[0].width, pages[0].height), (32, 32));
//! # Ok(()) }
//! ```

pub mod config;
pub mod disjoint;
pub mod error;
pub mod model;
pub mod packer;
pub mod planner;

pub use config::*;
pub use error::*;
pub use model::*;
pub use packer::*;
pub use planner::*;

/// Convenience prelude for common types and functions.
/// Importing `glyph_pack_core::prelude::*` brings the primary APIs into scope.
pub mod prelude {
    pub use crate::config::{MaxRectsHeuristic, PlannerConfig, PlannerConfigBuilder};
    pub use crate::disjoint::{DisjointRectCollection, all_disjoint};
    pub use crate::error::{GlyphPackError, Result};
    pub use crate::model::{GlyphRequest, PackStats, Page, PlacedGlyph, Rect};
    pub use crate::packer::MaxRectsBinPack;
    pub use crate::planner::{CancelFlag, PagePlanner, pack_glyphs};
}
