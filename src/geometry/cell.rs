//! Skeleton cells: the quadrilaterals bounded by four skeleton points.

use super::point::Point;

/// A quadrilateral with corners ordered top-left, top-right, bottom-right,
/// bottom-left.
///
/// Containment uses the axis-aligned bounding box of the diagonal corners
/// `p1`/`p3`, per §3: the skeleton builder never produces genuinely
/// rotated quadrilaterals, so the diagonal is sufficient to describe the
/// rectangle.
#[derive(Debug, Clone, Copy)]
pub struct Quad {
    pub p1: Point,
    pub p2: Point,
    pub p3: Point,
    pub p4: Point,
}

impl Quad {
    pub fn new(p1: Point, p2: Point, p3: Point, p4: Point) -> Self {
        Self { p1, p2, p3, p4 }
    }

    pub fn corners(&self) -> [Point; 4] {
        [self.p1, self.p2, self.p3, self.p4]
    }

    /// Equality invariant under cyclic rotation of the four corners.
    ///
    /// Compares coordinates only, not direction flags: the same corner
    /// point can carry different accumulated flags depending on which
    /// lines were walked to reach it, but that doesn't change which
    /// quadrilateral it bounds.
    pub fn cyclic_eq(&self, other: &Quad) -> bool {
        let ours = self.corners();
        let theirs = other.corners();
        let same = |a: &Point, b: &Point| a.x == b.x && a.y == b.y;
        (0..4).any(|offset| (0..4).all(|i| same(&ours[i], &theirs[(i + offset) % 4])))
    }

    /// Axis-aligned bounding box of the p1/p3 diagonal: (x0, y0, x1, y1).
    pub fn bbox(&self) -> (i64, i64, i64, i64) {
        let x0 = self.p1.x.min(self.p3.x);
        let x1 = self.p1.x.max(self.p3.x);
        let y0 = self.p1.y.min(self.p3.y);
        let y1 = self.p1.y.max(self.p3.y);
        (x0, y0, x1, y1)
    }

    pub fn centroid(&self) -> (f64, f64) {
        let (x0, y0, x1, y1) = self.bbox();
        ((x0 + x1) as f64 / 2.0, (y0 + y1) as f64 / 2.0)
    }

    /// Strict (open-interval) containment, used for word-to-cell assignment
    /// so a word sitting exactly on a shared border is not double-counted.
    pub fn contains_point_strict(&self, x: f64, y: f64) -> bool {
        let (x0, y0, x1, y1) = self.bbox();
        x > x0 as f64 && x < x1 as f64 && y > y0 as f64 && y < y1 as f64
    }

    /// Inclusive containment, used for centroid matching where the
    /// centroid of a skeleton cell can legitimately land on a raw cell's
    /// shared edge.
    pub fn contains_point_inclusive(&self, x: f64, y: f64) -> bool {
        let (x0, y0, x1, y1) = self.bbox();
        x >= x0 as f64 && x <= x1 as f64 && y >= y0 as f64 && y <= y1 as f64
    }
}

/// Stable integer identity for a materialised cell.
///
/// The original implementation keyed spans by Python object identity
/// (`id(cell)`); Rust values have no such address-stable identity, so the
/// Cell Materialiser hands out one of these per raw cell at load time (see
/// DESIGN.md).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CellId(pub u32);

/// A materialised cell: a [`Quad`] enriched with the text assembled from
/// the renderer's "ugly table" and the words that fell inside its bbox.
#[derive(Debug, Clone)]
pub struct MaterialisedCell {
    pub id: CellId,
    pub quad: Quad,
    pub text: String,
    pub words: Vec<String>,
}

impl MaterialisedCell {
    pub fn new(id: CellId, quad: Quad) -> Self {
        Self {
            id,
            quad,
            text: String::new(),
            words: Vec::new(),
        }
    }

    pub fn push_text(&mut self, fragment: &str) {
        if !self.text.is_empty() {
            self.text.push(' ');
        }
        self.text.push_str(fragment.trim());
    }
}
