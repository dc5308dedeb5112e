//! The renderer-facing input model (§6: External Interfaces).
//!
//! The engine never parses a PDF itself; a caller constructs a
//! [`PageInput`] from whatever renderer it embeds and hands it to
//! [`crate::extract_page`].

/// A raw line rectangle reported by the renderer, in floating page units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RawLine {
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
}

/// An axis-aligned bounding box of a drawn cell, as reported by the
/// renderer's table finder. These are the "true" cells, including merged
/// ones; the skeleton grid is built independently and the two are
/// reconciled in the Cell Materialiser.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RawCell {
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
}

impl RawCell {
    /// The four corner-edges of this cell's rectangle, in clockwise order
    /// starting at the top-left, matching the direction-flag assignment
    /// the skeleton builder expects.
    pub fn edges(&self) -> [RawLine; 4] {
        [
            RawLine { x0: self.x0, y0: self.y0, x1: self.x1, y1: self.y0 },
            RawLine { x0: self.x1, y0: self.y0, x1: self.x1, y1: self.y1 },
            RawLine { x0: self.x1, y0: self.y1, x1: self.x0, y1: self.y1 },
            RawLine { x0: self.x0, y0: self.y1, x1: self.x0, y1: self.y0 },
        ]
    }
}

/// A positioned word from the page's text layer.
#[derive(Debug, Clone, PartialEq)]
pub struct Word {
    pub text: String,
    pub x0: f64,
    pub top: f64,
}

/// Everything the engine needs from a single rendered page.
#[derive(Debug, Clone, Default)]
pub struct PageInput {
    pub page_number: usize,
    /// One group of primitives per table the renderer's table finder
    /// already detected — the engine rebuilds each table's internal grid,
    /// not the table boundaries themselves.
    pub tables: Vec<RawTable>,
}

/// One table as handed over by the renderer's table finder: its drawn
/// line rectangles, its cells, the row-major text matrix aligned to the
/// renderer's own view of the grid ("ugly table"), and the words that
/// fall within the table's region (callers may pass the full page word
/// list; words outside every cell are simply never assigned).
#[derive(Debug, Clone, Default)]
pub struct RawTable {
    pub lines: Vec<RawLine>,
    pub cells: Vec<RawCell>,
    pub ugly_table: Vec<Vec<String>>,
    pub words: Vec<Word>,
    /// Text already extracted by the caller from the strip directly above
    /// this table's bounding box (sized by
    /// [`crate::config::EngineConfig::title_search_margin`]), handed
    /// as-is to the Title Extractor.
    pub title_area_text: String,
}

impl RawTable {
    /// The lines to canonicalise: `self.lines` when the renderer supplied
    /// real vector primitives, otherwise the four edges of every cell
    /// (the table finder's cells are themselves a faithful drawing of the
    /// grid when no separate line layer is available).
    pub fn effective_lines(&self) -> Vec<RawLine> {
        if !self.lines.is_empty() {
            return self.lines.clone();
        }
        self.cells.iter().flat_map(|c| c.edges()).collect()
    }
}
