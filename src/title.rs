//! Title Extractor (§4.6).
//!
//! The engine never crops or extracts text from a PDF page itself — a
//! caller reads the strip above a table's bounding box (sized by
//! [`crate::config::EngineConfig::title_search_margin`]) with whatever
//! renderer it embeds, and hands the resulting text to [`extract_title`].

use lazy_static::lazy_static;
use regex::Regex;

/// Parsed title metadata for a table.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TitleInfo {
    pub has_title: bool,
    pub full_title: Option<String>,
    pub clean_title: Option<String>,
    pub table_number: Option<String>,
    pub is_continued: bool,
}

impl TitleInfo {
    fn absent() -> Self {
        Self::default()
    }
}

lazy_static! {
    static ref SPACED_TABLE: Regex = Regex::new(r"(?i)T\s*a\s*b\s*l\s*e").unwrap();
    static ref TABLE_MARKER: Regex = Regex::new(r"(?i)Table\s+(\d+)\s*[.:\-]\s*(.+)").unwrap();
    static ref ANOTHER_TABLE: Regex = Regex::new(r"(?i)T\s*a\s*b\s*l\s*e\s+\d+").unwrap();
    static ref CONTINUED_SUFFIX: Regex = Regex::new(r"(?i)\s*\(continued\)\s*").unwrap();
}

/// Extracts a table's title from the text of the strip above it.
pub fn extract_title(text: &str) -> TitleInfo {
    let text = text.trim();
    if text.is_empty() {
        return TitleInfo::absent();
    }

    let normalised = SPACED_TABLE.replace_all(text, "Table");
    let lines: Vec<&str> = normalised
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect();

    for (i, line) in lines.iter().enumerate() {
        let Some(captures) = TABLE_MARKER.captures(line) else {
            continue;
        };
        let table_number = captures[1].to_string();
        let mut title_text = captures[2].trim().to_string();
        let mut full_title_lines = vec![line.to_string()];

        for next_line in &lines[i + 1..] {
            if ANOTHER_TABLE.is_match(next_line) {
                break;
            }
            full_title_lines.push(next_line.to_string());
            title_text.push(' ');
            title_text.push_str(next_line.trim());
        }

        let full_title = full_title_lines.join(" ");
        let is_continued = title_text.to_lowercase().contains("continued");
        let clean_title = CONTINUED_SUFFIX.replace_all(&title_text, "").trim().to_string();

        return TitleInfo {
            has_title: true,
            full_title: Some(full_title),
            clean_title: Some(clean_title),
            table_number: Some(table_number),
            is_continued,
        };
    }

    TitleInfo::absent()
}
