//! Serialisation Adapters (§4.8): CSV, XLSX, and filename sanitisation.

use std::path::Path;

use crate::error::{Result, SkeletonError};
use crate::materialise::Table;

/// Writes `table` as CSV: one row per `global_map` row in ascending key
/// order, columns in ascending key order within a row, trimmed cell text,
/// and an empty field for any slot with no stored cell.
pub fn write_csv(table: &Table, path: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    let col_count = table
        .global_map
        .values()
        .map(|row| row.keys().max().copied().map(|m| m + 1).unwrap_or(0))
        .max()
        .unwrap_or(0);

    for row in table.global_map.values() {
        let mut record: Vec<String> = vec![String::new(); col_count];
        for (&col, &id) in row {
            record[col] = table.cell(id).text.trim().to_string();
        }
        writer.write_record(&record)?;
    }
    writer.flush()?;
    Ok(())
}

/// Writes `table` as XLSX with `umya-spreadsheet`: 1-based indexing, a
/// merged range per unique cell id (the rectangular hull of every
/// (row, col) slot storing it), text written only at the top-left corner
/// of each range.
pub fn write_xlsx(table: &Table, path: &Path) -> Result<()> {
    let mut book = umya_spreadsheet::new_file();
    let sheet = book
        .get_sheet_mut(&0)
        .ok_or_else(|| SkeletonError::Xlsx("workbook has no default sheet".to_string()))?;

    let mut seen = std::collections::BTreeSet::new();
    for row in table.global_map.values() {
        for &id in row.values() {
            if !seen.insert(id) {
                continue;
            }
            let Some((r0, c0, r1, c1)) = table.span_bounds(id) else {
                continue;
            };
            let text = table.cell(id).text.trim().to_string();
            let top_left = format!("{}{}", column_letter((c0 as u32) + 1), r0 + 1);
            sheet.get_cell_mut(top_left.as_str()).set_value(text);
            if (r0, c0) != (r1, c1) {
                let range = format!(
                    "{}:{}{}",
                    top_left,
                    column_letter((c1 as u32) + 1),
                    r1 + 1
                );
                sheet.add_merge_cells(range.as_str());
            }
        }
    }

    umya_spreadsheet::writer::xlsx::write(&book, path)
        .map_err(|e| SkeletonError::Xlsx(e.to_string()))?;
    Ok(())
}

fn column_letter(mut col: u32) -> String {
    let mut letters = Vec::new();
    while col > 0 {
        let rem = (col - 1) % 26;
        letters.push((b'A' + rem as u8) as char);
        col = (col - 1) / 26;
    }
    letters.iter().rev().collect()
}

/// Sanitises a title into a filesystem-safe filename (§4.8, §6).
pub fn sanitize_filename(name: &str) -> String {
    let mut s = name.strip_suffix(".csv").unwrap_or(name).to_string();

    let replacements: &[(char, &str)] = &[
        ('/', "_"),
        ('\\', "_"),
        (':', "-"),
        ('*', ""),
        ('?', ""),
        ('"', ""),
        ('<', ""),
        ('>', ""),
        ('|', "_"),
        ('(', ""),
        (')', ""),
    ];
    for &(from, to) in replacements {
        s = s.replace(from, to);
    }

    let s = s.trim_matches(|c: char| c == '.' || c == ' ');
    let mut out = String::with_capacity(s.len());
    let mut last_was_space = false;
    for c in s.chars() {
        if c.is_whitespace() {
            if !last_was_space {
                out.push('_');
            }
            last_was_space = true;
        } else {
            out.push(c);
            last_was_space = false;
        }
    }

    if out.len() > 200 {
        out.truncate(200);
    }
    out
}
