//! Minimal end-to-end demonstration: a single 3x3 "Table 1. Pin
//! description" grid on one page, written out as CSV.

use skeletable::primitives::{PageInput, RawCell, RawTable};
use skeletable::serialize::write_csv;
use skeletable::{extract_table, EngineConfig};

fn main() {
    tracing_subscriber::fmt::init();

    let config = EngineConfig::default();
    let cells = vec![
        RawCell { x0: 0.0, y0: 0.0, x1: 50.0, y1: 20.0 },
        RawCell { x0: 50.0, y0: 0.0, x1: 100.0, y1: 20.0 },
        RawCell { x0: 100.0, y0: 0.0, x1: 150.0, y1: 20.0 },
        RawCell { x0: 0.0, y0: 20.0, x1: 50.0, y1: 40.0 },
        RawCell { x0: 50.0, y0: 20.0, x1: 100.0, y1: 40.0 },
        RawCell { x0: 100.0, y0: 20.0, x1: 150.0, y1: 40.0 },
        RawCell { x0: 0.0, y0: 40.0, x1: 50.0, y1: 60.0 },
        RawCell { x0: 50.0, y0: 40.0, x1: 100.0, y1: 60.0 },
        RawCell { x0: 100.0, y0: 40.0, x1: 150.0, y1: 60.0 },
    ];
    let ugly_table = vec![
        vec!["Pin".to_string(), "Name".to_string(), "Function".to_string()],
        vec!["1".to_string(), "VDD".to_string(), "Power".to_string()],
        vec!["2".to_string(), "GND".to_string(), "Ground".to_string()],
    ];

    let raw = RawTable {
        lines: Vec::new(),
        cells,
        ugly_table,
        words: Vec::new(),
        title_area_text: "Table 1. Pin description".to_string(),
    };
    let page = PageInput { page_number: 1, tables: vec![raw.clone()] };

    let table = extract_table(&raw, &config).expect("a well-formed grid should never be degenerate");
    println!("reconstructed {} rows for page {}", table.global_map.len(), page.page_number);

    write_csv(&table, std::path::Path::new("Pin_description.csv")).expect("write csv");
}
