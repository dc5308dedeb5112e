//! Cell Materialiser (§4.5) and the [`Table`] it produces.

use std::collections::BTreeMap;

use crate::geometry::{CellId, MaterialisedCell, Point, Quad};
use crate::primitives::{RawCell, Word};

/// A reconstructed logical table: materialised cells, the skeleton grid
/// that gave them dense addressing, and the sparse row→col→cell map that
/// records spans by repeating a [`CellId`] across every slot it occupies.
#[derive(Debug, Clone)]
pub struct Table {
    pub cells: Vec<MaterialisedCell>,
    pub rows: Vec<Vec<Quad>>,
    pub global_map: BTreeMap<usize, BTreeMap<usize, CellId>>,
}

impl Table {
    pub fn cell(&self, id: CellId) -> &MaterialisedCell {
        &self.cells[id.0 as usize]
    }

    /// Row span and column span of `id`: the number of distinct rows that
    /// store it, and the number of columns it occupies within the first
    /// such row (§4.5: "Span inference").
    pub fn cell_span(&self, id: CellId) -> (usize, usize) {
        let mut rows_with_id: Vec<&BTreeMap<usize, CellId>> = Vec::new();
        for row in self.global_map.values() {
            if row.values().any(|&v| v == id) {
                rows_with_id.push(row);
            }
        }
        let row_span = rows_with_id.len();
        let col_span = rows_with_id
            .first()
            .map(|row| row.values().filter(|&&v| v == id).count())
            .unwrap_or(0);
        (row_span, col_span)
    }

    /// The rectangular hull of every (row, col) slot storing `id`, as
    /// `(row0, col0, row1, col1)` inclusive — used by the XLSX adapter to
    /// compute a merge range.
    pub fn span_bounds(&self, id: CellId) -> Option<(usize, usize, usize, usize)> {
        let mut bounds: Option<(usize, usize, usize, usize)> = None;
        for (&row_idx, row) in &self.global_map {
            for (&col_idx, &cell_id) in row {
                if cell_id != id {
                    continue;
                }
                bounds = Some(match bounds {
                    None => (row_idx, col_idx, row_idx, col_idx),
                    Some((r0, c0, r1, c1)) => {
                        (r0.min(row_idx), c0.min(col_idx), r1.max(row_idx), c1.max(col_idx))
                    }
                });
            }
        }
        bounds
    }
}

fn quad_from_raw_cell(cell: &RawCell) -> Quad {
    let mut p1 = Point::new(cell.x0, cell.y0);
    p1.right = true;
    p1.down = true;
    let mut p2 = Point::new(cell.x1, cell.y0);
    p2.left = true;
    p2.down = true;
    let mut p3 = Point::new(cell.x1, cell.y1);
    p3.up = true;
    p3.left = true;
    let mut p4 = Point::new(cell.x0, cell.y1);
    p4.up = true;
    p4.right = true;
    Quad::new(p1, p2, p3, p4)
}

/// Maps the renderer's raw cells onto the skeleton grid and assigns text
/// and words to each (§4.5).
pub fn materialise(
    raw_cells: &[RawCell],
    rows: &[Vec<Quad>],
    ugly_table: &[Vec<String>],
    words: &[Word],
) -> Table {
    let mut cells: Vec<MaterialisedCell> = raw_cells
        .iter()
        .enumerate()
        .map(|(i, c)| MaterialisedCell::new(CellId(i as u32), quad_from_raw_cell(c)))
        .collect();

    let mut global_map: BTreeMap<usize, BTreeMap<usize, CellId>> = BTreeMap::new();

    for (y, row) in rows.iter().enumerate() {
        let mut map_row: BTreeMap<usize, CellId> = BTreeMap::new();
        for (x, skel_cell) in row.iter().enumerate() {
            let text = ugly_table.get(y).and_then(|r| r.get(x)).map(String::as_str).unwrap_or("");
            let (cx, cy) = skel_cell.centroid();
            let Some(idx) = cells.iter().position(|c| c.quad.contains_point_inclusive(cx, cy)) else {
                continue;
            };
            if !text.trim().is_empty() {
                cells[idx].push_text(text);
            }
            map_row.insert(x, cells[idx].id);
        }
        global_map.insert(y, map_row);
    }

    for cell in cells.iter_mut() {
        cell.words = words
            .iter()
            .filter(|w| cell.quad.contains_point_strict(w.x0, w.top))
            .map(|w| w.text.clone())
            .collect();
    }

    Table { cells, rows: rows.to_vec(), global_map }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid() -> (Vec<RawCell>, Vec<Vec<Quad>>, Vec<Vec<String>>) {
        let raw = vec![
            RawCell { x0: 0.0, y0: 0.0, x1: 50.0, y1: 50.0 },
            RawCell { x0: 50.0, y0: 0.0, x1: 100.0, y1: 50.0 },
            RawCell { x0: 0.0, y0: 50.0, x1: 50.0, y1: 100.0 },
            RawCell { x0: 50.0, y0: 50.0, x1: 100.0, y1: 100.0 },
        ];
        let mk_quad = |x0: f64, y0: f64, x1: f64, y1: f64| {
            Quad::new(
                Point::new(x0, y0),
                Point::new(x1, y0),
                Point::new(x1, y1),
                Point::new(x0, y1),
            )
        };
        let rows = vec![
            vec![mk_quad(0.0, 0.0, 50.0, 50.0), mk_quad(50.0, 0.0, 100.0, 50.0)],
            vec![mk_quad(0.0, 50.0, 50.0, 100.0), mk_quad(50.0, 50.0, 100.0, 100.0)],
        ];
        let ugly = vec![
            vec!["A".to_string(), "B".to_string()],
            vec!["C".to_string(), "D".to_string()],
        ];
        (raw, rows, ugly)
    }

    #[test]
    fn assigns_text_to_matching_cell() {
        let (raw, rows, ugly) = grid();
        let table = materialise(&raw, &rows, &ugly, &[]);
        assert_eq!(table.cells[0].text, "A");
        assert_eq!(table.cells[3].text, "D");
    }

    #[test]
    fn global_map_covers_every_slot() {
        let (raw, rows, ugly) = grid();
        let table = materialise(&raw, &rows, &ugly, &[]);
        assert_eq!(table.global_map.len(), 2);
        assert_eq!(table.global_map[&0].len(), 2);
    }

    #[test]
    fn spanning_cell_appears_at_every_slot_it_covers() {
        let raw = vec![
            RawCell { x0: 0.0, y0: 0.0, x1: 100.0, y1: 50.0 },
            RawCell { x0: 0.0, y0: 50.0, x1: 50.0, y1: 100.0 },
            RawCell { x0: 50.0, y0: 50.0, x1: 100.0, y1: 100.0 },
        ];
        let mk_quad = |x0: f64, y0: f64, x1: f64, y1: f64| {
            Quad::new(Point::new(x0, y0), Point::new(x1, y0), Point::new(x1, y1), Point::new(x0, y1))
        };
        let rows = vec![
            vec![mk_quad(0.0, 0.0, 50.0, 50.0), mk_quad(50.0, 0.0, 100.0, 50.0)],
            vec![mk_quad(0.0, 50.0, 50.0, 100.0), mk_quad(50.0, 50.0, 100.0, 100.0)],
        ];
        let ugly = vec![
            vec!["Header".to_string(), "".to_string()],
            vec!["L".to_string(), "R".to_string()],
        ];
        let table = materialise(&raw, &rows, &ugly, &[]);
        let spanning_id = table.global_map[&0][&0];
        assert_eq!(spanning_id, table.global_map[&0][&1]);
        let (row_span, col_span) = table.cell_span(spanning_id);
        assert_eq!((row_span, col_span), (1, 2));
        assert_eq!(table.span_bounds(spanning_id), Some((0, 0, 0, 1)));
    }

    #[test]
    fn word_assigned_only_to_containing_cell() {
        let (raw, rows, ugly) = grid();
        let words = vec![Word { text: "hi".into(), x0: 10.0, top: 10.0 }];
        let table = materialise(&raw, &rows, &ugly, &words);
        assert_eq!(table.cells[0].words, vec!["hi".to_string()]);
        assert!(table.cells[1].words.is_empty());
    }
}
