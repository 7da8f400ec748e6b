use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle (pixels). `x,y` is top-left; `w,h` are sizes.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
}

impl Rect {
    pub fn new(x: u32, y: u32, w: u32, h: u32) -> Self {
        Self { x, y, w, h }
    }
    /// Exclusive right edge coordinate (`x + w`).
    pub fn x2(&self) -> u32 {
        self.x + self.w
    }
    /// Exclusive bottom edge coordinate (`y + h`).
    pub fn y2(&self) -> u32 {
        self.y + self.h
    }
    pub fn area(&self) -> u64 {
        (self.w as u64) * (self.h as u64)
    }
    /// Both sides are zero (e.g. a whitespace glyph).
    pub fn is_degenerate(&self) -> bool {
        self.w == 0 && self.h == 0
    }
    /// At least one side is zero; such a rectangle covers no pixels.
    pub fn is_empty(&self) -> bool {
        self.w == 0 || self.h == 0
    }
    /// Returns true if `r` lies fully inside `self` (closed bounds on all four sides).
    pub fn contains(&self, r: &Rect) -> bool {
        r.x >= self.x && r.y >= self.y && r.x2() <= self.x2() && r.y2() <= self.y2()
    }
    /// Returns true if the interiors of `self` and `r` overlap. Touching edges do not count.
    pub fn intersects(&self, r: &Rect) -> bool {
        !(self.x >= r.x2() || r.x >= self.x2() || self.y >= r.y2() || r.y >= self.y2())
    }
}

/// A glyph to be packed: caller-owned identity plus bitmap size.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GlyphRequest<K = u32> {
    pub id: K,
    pub w: u32,
    pub h: u32,
}

impl<K> GlyphRequest<K> {
    pub fn new(id: K, w: u32, h: u32) -> Self {
        Self { id, w, h }
    }
    pub fn is_degenerate(&self) -> bool {
        self.w == 0 && self.h == 0
    }
}

/// A glyph placed on a page.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlacedGlyph<K = u32> {
    /// Identity copied from the originating [`GlyphRequest`].
    pub id: K,
    /// Final rectangle within the page. Zero-area glyphs sit at `(0, 0, 0, 0)`.
    pub rect: Rect,
    /// Position of the owning page in the pack result.
    pub page_index: usize,
}

/// A single texture page: pixel dimensions plus its glyphs in insertion order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Page<K = u32> {
    pub index: usize,
    pub width: u32,
    pub height: u32,
    pub glyphs: Vec<PlacedGlyph<K>>,
}

impl<K> Page<K> {
    pub fn area(&self) -> u64 {
        (self.width as u64) * (self.height as u64)
    }

    /// Area covered by this page's glyphs divided by the page area.
    pub fn occupancy(&self) -> f64 {
        let page_area = self.area();
        if page_area == 0 {
            return 0.0;
        }
        let used: u64 = self.glyphs.iter().map(|g| g.rect.area()).sum();
        used as f64 / page_area as f64
    }
}

/// Statistics about a multi-page glyph layout.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PackStats {
    pub num_pages: usize,
    /// Total number of glyphs placed, zero-area glyphs included.
    pub num_glyphs: usize,
    /// Zero-area glyphs (whitespace); they are assigned a page but take no space on it.
    pub num_blank_glyphs: usize,
    /// Sum of width * height over all pages.
    pub total_page_area: u64,
    /// Sum of glyph rectangle areas.
    pub used_glyph_area: u64,
    /// used_glyph_area / total_page_area (0.0 to 1.0).
    pub occupancy: f64,
    /// Occupancy of the emptiest page, usually the page holding the last leftovers.
    pub min_page_occupancy: f64,
    pub max_page_width: u32,
    pub max_page_height: u32,
}

impl PackStats {
    /// Computes statistics over a pack result.
    pub fn from_pages<K>(pages: &[Page<K>]) -> Self {
        let mut num_glyphs = 0;
        let mut num_blank_glyphs = 0;
        let mut total_page_area = 0u64;
        let mut used_glyph_area = 0u64;
        let mut min_page_occupancy = f64::INFINITY;
        let mut max_page_width = 0u32;
        let mut max_page_height = 0u32;

        for page in pages {
            total_page_area += page.area();
            min_page_occupancy = min_page_occupancy.min(page.occupancy());
            max_page_width = max_page_width.max(page.width);
            max_page_height = max_page_height.max(page.height);
            for glyph in &page.glyphs {
                num_glyphs += 1;
                if glyph.rect.is_degenerate() {
                    num_blank_glyphs += 1;
                }
                used_glyph_area += glyph.rect.area();
            }
        }

        let occupancy = if total_page_area > 0 {
            used_glyph_area as f64 / total_page_area as f64
        } else {
            0.0
        };
        if pages.is_empty() {
            min_page_occupancy = 0.0;
        }

        PackStats {
            num_pages: pages.len(),
            num_glyphs,
            num_blank_glyphs,
            total_page_area,
            used_glyph_area,
            occupancy,
            min_page_occupancy,
            max_page_width,
            max_page_height,
        }
    }

    /// One-line report, e.g. `2 pages (largest 256x256), 96 glyphs (1 blank), 71.3% filled, emptiest page 42.0%`.
    pub fn summary(&self) -> String {
        format!(
            "{} pages (largest {}x{}), {} glyphs ({} blank), {:.1}% filled, emptiest page {:.1}%",
            self.num_pages,
            self.max_page_width,
            self.max_page_height,
            self.num_glyphs,
            self.num_blank_glyphs,
            self.occupancy * 100.0,
            self.min_page_occupancy * 100.0,
        )
    }
}
