//! Skeleton Builder and Grid Synthesiser (§4.3, §4.4).
//!
//! Computes the grid crossings implied by a table's canonicalised lines,
//! then walks them into the minimal four-cornered skeleton cells and
//! groups those into dense rows.

use crate::geometry::{Line, Point, Quad};

/// Seeds the skeleton point set with every line endpoint, then adds every
/// finite vertical×horizontal intersection, marking points that sit on a
/// real grid crossing as full junctions (all four direction flags set).
pub fn build_skeleton_points(lines: &[Line], epsilon: f64) -> Vec<Point> {
    let mut points: Vec<Point> = Vec::new();
    push_unique(&mut points, lines.iter().flat_map(|l| [l.p1, l.p2]), epsilon);

    let vertical: Vec<&Line> = lines.iter().filter(|l| l.vertical).collect();
    let horizontal: Vec<&Line> = lines.iter().filter(|l| !l.vertical).collect();

    for v in &vertical {
        if v.length() < 3.0 {
            continue;
        }
        for h in &horizontal {
            let (ix, iy) = v.infinite_intersect(h);
            let (Some(ix), Some(iy)) = (ix, iy) else {
                continue;
            };
            if !ix.is_finite() || !iy.is_finite() {
                continue;
            }
            let candidate = Point::new(ix, iy);
            if !points.iter().any(|q| q.approx_eq(&candidate, epsilon)) {
                points.push(candidate);
            }
            for q in points.iter_mut() {
                if q.approx_eq(&candidate, epsilon) {
                    q.mark_as_junction();
                }
            }
        }
    }

    points
}

fn push_unique(points: &mut Vec<Point>, candidates: impl Iterator<Item = Point>, epsilon: f64) {
    for p in candidates {
        match points.iter_mut().find(|q| q.approx_eq(&p, epsilon)) {
            Some(existing) => existing.merge_flags(&p),
            None => points.push(p),
        }
    }
}

/// Walks the skeleton point set into the minimal four-cornered quads,
/// deduplicating by cyclic-rotation equality.
pub fn build_skeleton_cells(points: &[Point], epsilon: f64) -> Vec<Quad> {
    let mut sorted = points.to_vec();
    sorted.sort_by_key(|p| p.y);

    let mut cells: Vec<Quad> = Vec::new();
    for p1 in &sorted {
        let Some(p2) = p1.get_right(points, epsilon) else {
            continue;
        };
        let Some(p3) = p2.get_bottom(points, false, true, epsilon) else {
            continue;
        };
        let Some(p4) = p1.get_bottom(points, true, false, epsilon) else {
            continue;
        };
        let quad = Quad::new(*p1, p2, p3, p4);
        if !cells.iter().any(|c| c.cyclic_eq(&quad)) {
            cells.push(quad);
        }
    }
    cells
}

/// Groups skeleton cells sharing a top-edge y into rows, each sorted by
/// left-edge x, and orders the rows themselves by ascending top-edge y
/// (§4.4: the dense row/column addressing).
pub fn rows_from_cells(cells: &[Quad], epsilon: f64) -> Vec<Vec<Quad>> {
    let mut rows: Vec<Vec<Quad>> = Vec::new();
    for cell in cells {
        let already_covered = rows
            .iter()
            .any(|row| (row[0].p1.y - cell.p1.y).unsigned_abs() as f64 <= epsilon);
        if already_covered {
            continue;
        }
        let mut row: Vec<Quad> = cells
            .iter()
            .copied()
            .filter(|c| (c.p1.y - cell.p1.y).unsigned_abs() as f64 <= epsilon)
            .collect();
        row.sort_by_key(|c| c.p1.x);
        rows.push(row);
    }
    rows.sort_by_key(|row| row[0].p1.y);
    rows
}
