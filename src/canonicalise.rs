//! Line Canonicaliser (§4.2): raw line rectangles to deduplicated,
//! canonically oriented lines with merged endpoint flags.

use crate::config::EngineConfig;
use crate::geometry::{Line, Point};
use crate::primitives::RawLine;

/// Converts a table's raw lines into the deduplicated, canonically
/// oriented set the skeleton builder operates on.
pub fn canonicalise(raw: &[RawLine], config: &EngineConfig) -> Vec<Line> {
    let mut lines: Vec<Line> = raw
        .iter()
        .filter_map(|r| {
            let p1 = Point::new(r.x0, r.y0);
            let p2 = Point::new(r.x1, r.y1);
            let line = Line::new(p1, p2, config.epsilon);
            if line.length() < config.min_segment_length {
                None
            } else {
                Some(line)
            }
        })
        .collect();

    let mut deduped: Vec<Line> = Vec::with_capacity(lines.len());
    'outer: for line in lines.drain(..) {
        for existing in deduped.iter_mut() {
            if existing.same_line(&line, config.epsilon) {
                existing.p1.merge_flags(&line.p1);
                existing.p2.merge_flags(&line.p2);
                continue 'outer;
            }
        }
        deduped.push(line);
    }

    merge_shared_endpoints(&mut deduped, config.epsilon);
    deduped
}

/// A line's endpoints may coincide with another line's endpoints without
/// the lines themselves being co-linear (a corner of the grid). Folds
/// direction flags across every such shared point so a junction sees the
/// flags contributed by every incident line.
fn merge_shared_endpoints(lines: &mut [Line], epsilon: f64) {
    let mut unique_points: Vec<Point> = Vec::new();
    for line in lines.iter() {
        for p in [line.p1, line.p2] {
            match unique_points.iter_mut().find(|u| u.approx_eq(&p, epsilon)) {
                Some(u) => u.merge_flags(&p),
                None => unique_points.push(p),
            }
        }
    }
    for line in lines.iter_mut() {
        if let Some(u) = unique_points.iter().find(|u| u.approx_eq(&line.p1, epsilon)) {
            line.p1.merge_flags(u);
        }
        if let Some(u) = unique_points.iter().find(|u| u.approx_eq(&line.p2, epsilon)) {
            line.p2.merge_flags(u);
        }
    }
}
