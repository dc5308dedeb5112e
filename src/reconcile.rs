//! Continuation Reconciler (§4.7) and the run-level [`RunResult`] (§6).

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::debug;

use crate::geometry::CellId;
use crate::materialise::Table;
use crate::title::TitleInfo;

#[derive(Debug, Clone, Serialize)]
pub struct SuccessEntry {
    pub page: usize,
    pub table_number: String,
    pub clean_title: String,
    pub saved_paths: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MergedEntry {
    pub main_page: usize,
    pub continued_on: usize,
    pub title: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct SkippedEntry {
    pub page: usize,
    pub table_index: usize,
    pub reason: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ErrorEntry {
    pub path: String,
    pub message: String,
}

/// The run-level result object handed back to a caller (§6): every
/// table's fate, whether a fresh success, a continuation merge, or a
/// skip, plus any I/O errors from the serialisation adapters.
#[derive(Debug, Clone, Serialize, Default)]
pub struct RunResult {
    pub success: Vec<SuccessEntry>,
    pub merged: Vec<MergedEntry>,
    pub skipped: Vec<SkippedEntry>,
    pub errors: Vec<ErrorEntry>,
    pub total_tables: usize,
    pub total_pages_processed: usize,
}

struct LastTableInfo {
    table: Table,
    clean_title: String,
    dest_paths: Vec<String>,
    page: usize,
}

/// Outcome of handing one freshly materialised table to the reconciler.
pub enum ReconcileOutcome<'a> {
    /// A brand-new table, to be persisted at `dest_paths`.
    New { table: &'a Table, dest_paths: &'a [String] },
    /// Continuation rows were appended to the previous table, which must
    /// be re-emitted in full at its own destinations.
    Merged { table: &'a Table, dest_paths: &'a [String], main_page: usize },
    /// The table could not be placed; `reason` is recorded under `skipped`.
    Skipped { reason: &'static str },
}

/// Carries `last_table_info` across page boundaries and decides, for each
/// freshly materialised table, whether it starts a new output, continues
/// the previous one, or cannot be placed.
///
/// Only the immediately preceding table can be continued (§9 Design
/// Notes: "single-cycle reconciler") — deliberately, since continuation
/// markers in the corpus are always adjacent. `last` is the single piece
/// of mutable state; swapping it for a `HashMap<String, TableRecord>` to
/// support non-adjacent continuations would only touch this struct.
#[derive(Default)]
pub struct Reconciler {
    last: Option<LastTableInfo>,
}

impl Reconciler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ingest(
        &mut self,
        page: usize,
        title: &TitleInfo,
        table: Table,
        dest_paths: Vec<String>,
    ) -> ReconcileOutcome<'_> {
        let clean_title = title.clean_title.clone().unwrap_or_default();

        if title.is_continued {
            let matches_previous = self
                .last
                .as_ref()
                .is_some_and(|l| l.clean_title == clean_title);
            if !matches_previous {
                debug!(page, "continuation with no matching previous table");
                return ReconcileOutcome::Skipped {
                    reason: "continuation with no matching previous",
                };
            }

            let mut prior = self.last.take().expect("checked above");
            append_continuation_rows(&mut prior.table, &table);
            let main_page = prior.page;
            self.last = Some(prior);
            let prior = self.last.as_ref().expect("just inserted");
            debug!(main_page, continued_on = page, "merged continuation table");
            return ReconcileOutcome::Merged {
                table: &prior.table,
                dest_paths: &prior.dest_paths,
                main_page,
            };
        }

        self.last = Some(LastTableInfo { table, clean_title, dest_paths, page });
        let last = self.last.as_ref().expect("just inserted");
        ReconcileOutcome::New { table: &last.table, dest_paths: &last.dest_paths }
    }
}

/// Appends every non-header row (row index > 0) of `continuation` onto
/// `table`, renumbering them to continue `table`'s own row keys (§4.7).
///
/// `continuation`'s `CellId`s are independent 0-based indices into its own
/// `cells`; since its cells are appended after `table`'s existing ones,
/// every id carried over in `global_map` must be offset by `table.cells.len()`
/// first, or it would address one of `table`'s own cells instead.
fn append_continuation_rows(table: &mut Table, continuation: &Table) {
    let offset = table.cells.len() as u32;
    let remap = |id: CellId| CellId(id.0 + offset);

    let next_start = table.global_map.keys().max().copied().map(|k| k + 1).unwrap_or(0);
    let mut next = next_start;
    for (&row_idx, row) in &continuation.global_map {
        if row_idx == 0 {
            continue;
        }
        let remapped_row: BTreeMap<usize, CellId> =
            row.iter().map(|(&col, &id)| (col, remap(id))).collect();
        table.global_map.insert(next, remapped_row);
        next += 1;
    }
    for row in continuation.rows.iter().skip(1) {
        table.rows.push(row.clone());
    }
    for cell in &continuation.cells {
        let mut cell = cell.clone();
        cell.id = remap(cell.id);
        table.cells.push(cell);
    }
}
