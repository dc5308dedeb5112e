//! Skeleton points: integer-quantised grid-crossing coordinates carrying
//! direction flags.

/// A grid-crossing or line-endpoint coordinate.
///
/// Coordinates are the ceiling of the renderer's floating-point input,
/// matching the spec's "integer-quantised" data model. Equality and
/// hashing are derived and therefore *exact* on these quantised
/// coordinates; the spec's ε-tolerant equality is deliberately not exposed
/// through `PartialEq`/`Hash` (doing so would make the hash/equality
/// contract inconsistent, see DESIGN.md) and is instead provided as the
/// explicit [`Point::approx_eq`] method used throughout canonicalisation
/// and skeleton building.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Point {
    pub x: i64,
    pub y: i64,
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl Point {
    /// Creates a point from floating coordinates, quantising with `ceil`.
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            x: x.ceil() as i64,
            y: y.ceil() as i64,
            up: false,
            down: false,
            left: false,
            right: false,
        }
    }

    /// ε-tolerant coordinate equality (§3: "within ε on each axis").
    pub fn approx_eq(&self, other: &Point, epsilon: f64) -> bool {
        (self.x - other.x).unsigned_abs() as f64 <= epsilon
            && (self.y - other.y).unsigned_abs() as f64 <= epsilon
    }

    pub fn distance(&self, other: &Point) -> f64 {
        (((self.x - other.x).pow(2) + (self.y - other.y).pow(2)) as f64).sqrt()
    }

    /// OR-merges direction flags from `other` into `self`.
    pub fn merge_flags(&mut self, other: &Point) {
        self.up |= other.up;
        self.down |= other.down;
        self.left |= other.left;
        self.right |= other.right;
    }

    /// Sets every direction flag, used to mark a point as a full grid
    /// junction (§4.3 step 3).
    pub fn mark_as_junction(&mut self) {
        self.up = true;
        self.down = true;
        self.left = true;
        self.right = true;
    }

    /// Other points on the same horizontal line (within ε), strictly to
    /// the right, sorted by ascending x.
    pub fn points_to_right(&self, others: &[Point], epsilon: f64) -> Vec<Point> {
        let mut found: Vec<Point> = others
            .iter()
            .copied()
            .filter(|o| {
                o != self
                    && (o.y - self.y).unsigned_abs() as f64 <= epsilon
                    && o.x > self.x
            })
            .collect();
        found.sort_by_key(|o| o.x);
        found
    }

    /// Other points on the same vertical line (within ε), strictly below,
    /// sorted by ascending y.
    pub fn points_below(&self, others: &[Point], epsilon: f64) -> Vec<Point> {
        let mut found: Vec<Point> = others
            .iter()
            .copied()
            .filter(|o| {
                o != self
                    && (o.x - self.x).unsigned_abs() as f64 <= epsilon
                    && o.y > self.y
            })
            .collect();
        found.sort_by_key(|o| o.y);
        found
    }

    /// Leftmost right-neighbour whose `down` flag is set.
    pub fn get_right(&self, others: &[Point], epsilon: f64) -> Option<Point> {
        self.points_to_right(others, epsilon)
            .into_iter()
            .find(|p| p.down)
    }

    /// Topmost below-neighbour whose `up` flag is set and, when `left`/
    /// `right` is requested, whose `right`/`left` flag is also set
    /// (§4.1: tie-break by distance along the query axis, then stable).
    pub fn get_bottom(&self, others: &[Point], left: bool, right: bool, epsilon: f64) -> Option<Point> {
        self.points_below(others, epsilon).into_iter().find(|p| {
            if !p.up {
                return false;
            }
            if left && !p.right {
                return false;
            }
            if right && !p.left {
                return false;
            }
            true
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ceil_quantisation() {
        let p = Point::new(1.2, 3.0);
        assert_eq!((p.x, p.y), (2, 3));
    }

    #[test]
    fn approx_eq_within_tolerance() {
        let a = Point::new(10.0, 10.0);
        let b = Point::new(13.0, 10.0);
        assert!(a.approx_eq(&b, 5.0));
        assert!(!a.approx_eq(&b, 2.0));
    }

    #[test]
    fn get_right_requires_down_flag() {
        let origin = Point::new(0.0, 0.0);
        let mut no_down = Point::new(10.0, 0.0);
        no_down.up = true;
        let mut with_down = Point::new(20.0, 0.0);
        with_down.down = true;
        let others = vec![no_down, with_down];
        let found = origin.get_right(&others, 1.0).expect("a right neighbour");
        assert_eq!(found.x, 20);
    }

    #[test]
    fn get_bottom_left_requires_right_flag() {
        let origin = Point::new(0.0, 0.0);
        let mut no_right = Point::new(0.0, 10.0);
        no_right.up = true;
        let mut with_right = Point::new(0.0, 20.0);
        with_right.up = true;
        with_right.right = true;
        let others = vec![no_right, with_right];
        let found = origin
            .get_bottom(&others, true, false, 1.0)
            .expect("a bottom-left neighbour");
        assert_eq!(found.y, 20);
    }

    #[test]
    fn points_sorted_ascending() {
        let origin = Point::new(0.0, 0.0);
        let far = Point::new(30.0, 0.0);
        let near = Point::new(10.0, 0.0);
        let others = vec![far, near];
        let sorted = origin.points_to_right(&others, 1.0);
        assert_eq!(sorted.iter().map(|p| p.x).collect::<Vec<_>>(), vec![10, 30]);
    }
}
