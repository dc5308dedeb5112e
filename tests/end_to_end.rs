use pretty_assertions::assert_eq;
use std::cell::RefCell;

use skeletable::primitives::{PageInput, RawCell, RawTable};
use skeletable::{extract_pages, EngineConfig, Table, TitleInfo};

fn grid_cells(rows: usize, cols: usize, cell_w: f64, cell_h: f64) -> Vec<RawCell> {
    let mut cells = Vec::new();
    for r in 0..rows {
        for c in 0..cols {
            cells.push(RawCell {
                x0: c as f64 * cell_w,
                y0: r as f64 * cell_h,
                x1: (c + 1) as f64 * cell_w,
                y1: (r + 1) as f64 * cell_h,
            });
        }
    }
    cells
}

fn ugly_table(rows: usize, cols: usize, label: &str) -> Vec<Vec<String>> {
    (0..rows)
        .map(|r| (0..cols).map(|c| format!("{label}-{r}-{c}")).collect())
        .collect()
}

fn table_with_title(rows: usize, cols: usize, title: &str) -> RawTable {
    table_with_title_labelled(rows, cols, title, "v")
}

/// Same as [`table_with_title`] but lets the caller pick the cell-text
/// label prefix, so two pages' grids carry distinguishable content.
fn table_with_title_labelled(rows: usize, cols: usize, title: &str, label: &str) -> RawTable {
    RawTable {
        lines: Vec::new(),
        cells: grid_cells(rows, cols, 50.0, 20.0),
        ugly_table: ugly_table(rows, cols, label),
        words: Vec::new(),
        title_area_text: title.to_string(),
    }
}

#[test]
fn single_titled_grid_produces_one_success_entry() {
    let config = EngineConfig::default();
    let pages = vec![PageInput {
        page_number: 1,
        tables: vec![table_with_title(3, 3, "Table 1. Pin description")],
    }];

    let written: RefCell<Vec<(String, usize)>> = RefCell::new(Vec::new());
    let result = extract_pages(
        &pages,
        &config,
        |page, title: &TitleInfo| vec![format!("page{}-{}.csv", page, title.table_number.clone().unwrap())],
        |table, paths| {
            written.borrow_mut().push((paths[0].clone(), table.global_map.len()));
            Ok(())
        },
    );

    assert_eq!(result.success.len(), 1);
    assert_eq!(result.merged.len(), 0);
    assert_eq!(result.skipped.len(), 0);
    assert_eq!(result.total_tables, 1);
    assert_eq!(result.success[0].clean_title, "Pin description");
    assert_eq!(written.borrow().len(), 1);
    assert_eq!(written.borrow()[0].1, 3);
}

#[test]
fn continuation_merges_into_previous_table() {
    let config = EngineConfig::default();
    let pages = vec![
        PageInput {
            page_number: 1,
            tables: vec![table_with_title_labelled(3, 3, "Table 1. Pin description", "page1")],
        },
        PageInput {
            page_number: 2,
            tables: vec![table_with_title_labelled(
                3,
                3,
                "Table 1. Pin description (continued)",
                "page2",
            )],
        },
    ];

    let written: RefCell<Vec<Table>> = RefCell::new(Vec::new());
    let result = extract_pages(
        &pages,
        &config,
        |page, title: &TitleInfo| vec![format!("page{}-{}.csv", page, title.table_number.clone().unwrap())],
        |table, _paths| {
            written.borrow_mut().push(table.clone());
            Ok(())
        },
    );

    assert_eq!(result.success.len(), 1);
    assert_eq!(result.merged.len(), 1);
    assert_eq!(result.merged[0].main_page, 1);
    assert_eq!(result.merged[0].continued_on, 2);
    assert_eq!(result.total_pages_processed, 2);

    // The merged write (scenario 2, §8) must carry all 5 rows, and a
    // continuation-only row must hold the continuation page's own text,
    // not a stale reference into page 1's cells.
    let merged_table = written.borrow().last().expect("a merge write happened").clone();
    assert_eq!(merged_table.global_map.len(), 5);
    let continuation_row = &merged_table.global_map[&3];
    let continuation_cell_id = continuation_row[&0];
    assert_eq!(merged_table.cell(continuation_cell_id).text, "page2-1-0");
}

#[test]
fn page_with_no_table_title_is_skipped() {
    let config = EngineConfig::default();
    let pages = vec![PageInput {
        page_number: 1,
        tables: vec![table_with_title(2, 2, "Note. Foo")],
    }];

    let result = extract_pages(&pages, &config, |_, _| vec!["out.csv".to_string()], |_, _| Ok(()));

    assert_eq!(result.success.len(), 0);
    assert_eq!(result.skipped.len(), 1);
    assert_eq!(result.skipped[0].reason, "no table title");
}

#[test]
fn continuation_with_different_title_is_skipped_as_mismatched() {
    let config = EngineConfig::default();
    let pages = vec![
        PageInput { page_number: 1, tables: vec![table_with_title(2, 2, "Table 7. A")] },
        PageInput { page_number: 2, tables: vec![table_with_title(2, 2, "Table 9. B (continued)")] },
    ];

    let result = extract_pages(&pages, &config, |_, _| vec!["out.csv".to_string()], |_, _| Ok(()));

    assert_eq!(result.success.len(), 1);
    assert_eq!(result.skipped.len(), 1);
    assert_eq!(result.skipped[0].reason, "continuation with no matching previous");
}

#[test]
fn page_explosion_discards_every_table_on_the_page() {
    let config = EngineConfig::default();
    let tables = (0..6).map(|i| table_with_title(2, 2, &format!("Table {i}. X"))).collect();
    let pages = vec![PageInput { page_number: 1, tables }];

    let result = extract_pages(&pages, &config, |_, _| vec!["out.csv".to_string()], |_, _| Ok(()));

    assert_eq!(result.success.len(), 0);
    assert_eq!(result.skipped.len(), 1);
    assert_eq!(result.skipped[0].reason, "page explosion");
}
