//! Geometry-driven reconstruction of logical tables from the line and
//! cell primitives a PDF renderer draws on a page.
//!
//! The crate never touches a PDF file itself: a caller feeds it
//! [`PageInput`]s built from whatever renderer it embeds, and gets back
//! reconstructed [`Table`]s plus a run-level [`RunResult`] summarising
//! successes, continuation merges, and skips.

pub mod canonicalise;
pub mod config;
pub mod error;
pub mod geometry;
pub mod materialise;
pub mod primitives;
pub mod reconcile;
pub mod serialize;
pub mod skeleton;
pub mod title;

pub use config::EngineConfig;
pub use error::{Result, SkeletonError};
pub use materialise::Table;
pub use primitives::{PageInput, RawCell, RawLine, RawTable, Word};
pub use reconcile::{
    ErrorEntry, MergedEntry, ReconcileOutcome, Reconciler, RunResult, SkippedEntry, SuccessEntry,
};
pub use title::TitleInfo;

use tracing::{debug, warn};

/// Runs a single table's primitives through canonicalisation, skeleton
/// building, grid synthesis, and materialisation. Fails with
/// [`SkeletonError::DegenerateGeometry`] when the geometry yields no
/// skeleton points or no skeleton cells (§7: "degenerate table").
pub fn extract_table(raw: &RawTable, config: &EngineConfig) -> Result<Table> {
    let lines = canonicalise::canonicalise(&raw.effective_lines(), config);
    let points = skeleton::build_skeleton_points(&lines, config.epsilon);
    if points.is_empty() {
        return Err(SkeletonError::DegenerateGeometry("zero skeleton points".to_string()));
    }
    let cells = skeleton::build_skeleton_cells(&points, config.epsilon);
    if cells.is_empty() {
        return Err(SkeletonError::DegenerateGeometry("zero skeleton cells".to_string()));
    }
    let rows = skeleton::rows_from_cells(&cells, config.epsilon);
    debug!(points = points.len(), cells = cells.len(), "built skeleton");
    Ok(materialise::materialise(&raw.cells, &rows, &raw.ugly_table, &raw.words))
}

/// The result of running a whole page's tables through [`extract_table`].
pub enum PageOutcome {
    /// The renderer reported more tables than
    /// [`EngineConfig::max_tables_per_page`]; the whole page is discarded.
    Exploded,
    /// One entry per table the renderer found; `Err` carries the reason a
    /// table's geometry was degenerate (see [`extract_table`]).
    Tables(Vec<Result<(Table, TitleInfo)>>),
}

/// Extracts every table on a page, applying the page-explosion guard
/// before doing any geometry work.
pub fn extract_page(page: &PageInput, config: &EngineConfig) -> PageOutcome {
    if page.tables.len() > config.max_tables_per_page {
        warn!(page = page.page_number, tables = page.tables.len(), "page discarded: too many tables");
        return PageOutcome::Exploded;
    }
    debug!(page = page.page_number, tables = page.tables.len(), "extracting page");
    let tables = page
        .tables
        .iter()
        .map(|raw| {
            extract_table(raw, config).map(|table| {
                let title = title::extract_title(&raw.title_area_text);
                (table, title)
            })
        })
        .collect();
    PageOutcome::Tables(tables)
}

#[cfg(not(feature = "parallel"))]
fn extract_all_pages(pages: &[PageInput], config: &EngineConfig) -> Vec<PageOutcome> {
    pages.iter().map(|p| extract_page(p, config)).collect()
}

#[cfg(feature = "parallel")]
fn extract_all_pages(pages: &[PageInput], config: &EngineConfig) -> Vec<PageOutcome> {
    use rayon::prelude::*;
    pages.par_iter().map(|p| extract_page(p, config)).collect()
}

/// Runs the full pipeline over every page: extraction (optionally
/// parallel, see the `parallel` feature), then a strictly serial fold, in
/// page order, through a single [`Reconciler`] (§5: the reconciler must
/// observe pages in order regardless of how extraction itself is
/// scheduled).
///
/// `dest_paths` decides where a table's output should live given its page
/// number and title; `writer` performs the actual write (CSV, XLSX, or
/// both) and is called once per new table and again on every
/// continuation merge, per §5's "full rewrite, not append".
pub fn extract_pages(
    pages: &[PageInput],
    config: &EngineConfig,
    dest_paths: impl Fn(usize, &TitleInfo) -> Vec<String>,
    writer: impl Fn(&Table, &[String]) -> Result<()>,
) -> RunResult {
    let per_page = extract_all_pages(pages, config);
    let mut result = RunResult::default();
    let mut reconciler = Reconciler::new();

    for (page, outcome) in pages.iter().zip(per_page) {
        result.total_pages_processed += 1;
        let tables = match outcome {
            PageOutcome::Exploded => {
                result.skipped.push(SkippedEntry {
                    page: page.page_number,
                    table_index: 0,
                    reason: "page explosion".to_string(),
                });
                continue;
            }
            PageOutcome::Tables(tables) => tables,
        };

        for (table_index, slot) in tables.into_iter().enumerate() {
            let (table, title_info) = match slot {
                Ok(pair) => pair,
                Err(e) => {
                    result.skipped.push(SkippedEntry {
                        page: page.page_number,
                        table_index,
                        reason: e.to_string(),
                    });
                    continue;
                }
            };
            if !title_info.has_title {
                result.skipped.push(SkippedEntry {
                    page: page.page_number,
                    table_index,
                    reason: "no table title".to_string(),
                });
                continue;
            }

            let paths = dest_paths(page.page_number, &title_info);
            match reconciler.ingest(page.page_number, &title_info, table, paths) {
                ReconcileOutcome::Skipped { reason } => {
                    result.skipped.push(SkippedEntry {
                        page: page.page_number,
                        table_index,
                        reason: reason.to_string(),
                    });
                }
                ReconcileOutcome::New { table, dest_paths } => {
                    if let Err(e) = writer(table, dest_paths) {
                        result.errors.push(ErrorEntry {
                            path: dest_paths.join(", "),
                            message: e.to_string(),
                        });
                    }
                    result.total_tables += 1;
                    result.success.push(SuccessEntry {
                        page: page.page_number,
                        table_number: title_info.table_number.clone().unwrap_or_default(),
                        clean_title: title_info.clean_title.clone().unwrap_or_default(),
                        saved_paths: dest_paths.to_vec(),
                    });
                }
                ReconcileOutcome::Merged { table, dest_paths, main_page } => {
                    if let Err(e) = writer(table, dest_paths) {
                        result.errors.push(ErrorEntry {
                            path: dest_paths.join(", "),
                            message: e.to_string(),
                        });
                    }
                    result.merged.push(MergedEntry {
                        main_page,
                        continued_on: page.page_number,
                        title: title_info.clean_title.clone().unwrap_or_default(),
                    });
                }
            }
        }
    }

    result
}
