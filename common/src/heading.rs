//! シート見出しの抽出
//!
//! 成績表の1行目にある「PCM JEE CT-1 Marks Score List」のようなタイトルを拾う。

use crate::types::CellValue;

/// 1行目で走査する列数
const HEADING_SCAN_COLUMNS: usize = 20;

const A1_EXCLUDES: [&str; 2] = ["candidate", "roll"];
const ROW_EXCLUDES: [&str; 5] = ["candidate", "name", "marks", "roll", "total"];

/// シート1行目（A1から）のセルから見出しを抽出する
///
/// 1. A1 が5文字以上・英字を含む・"candidate"/"roll" を含まない
/// 2. 1行目（先頭20列）で10文字以上・英字を含む・列見出しらしい語を含まない最初のセル
pub fn extract_heading(first_row: &[CellValue]) -> Option<String> {
    if let Some(a1) = first_row.first() {
        let text = a1.as_text().trim().to_string();
        if looks_like_heading(&text, 5, &A1_EXCLUDES) {
            return Some(text);
        }
    }

    first_row
        .iter()
        .take(HEADING_SCAN_COLUMNS)
        .map(|cell| cell.as_text().trim().to_string())
        .find(|text| looks_like_heading(text, 10, &ROW_EXCLUDES))
}

fn looks_like_heading(text: &str, min_len: usize, excludes: &[&str]) -> bool {
    let lower = text.to_lowercase();
    text.chars().count() >= min_len
        && text.chars().any(|c| c.is_ascii_alphabetic())
        && !excludes.iter().any(|word| lower.contains(*word))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cells: &[&str]) -> Vec<CellValue> {
        cells.iter().map(|c| CellValue::from(*c)).collect()
    }

    #[test]
    fn test_heading_from_a1() {
        let cells = row(&["PCM JEE CT-1 Marks Score List", ""]);
        assert_eq!(extract_heading(&cells).as_deref(), Some("PCM JEE CT-1 Marks Score List"));
    }

    #[test]
    fn test_a1_column_header_is_rejected() {
        let cells = row(&["Candidate ID", "Candidate Name", "PHY"]);
        assert_eq!(extract_heading(&cells), None);
    }

    #[test]
    fn test_heading_from_later_column() {
        let cells = row(&["", "", "Weekly Assessment 2024"]);
        assert_eq!(extract_heading(&cells).as_deref(), Some("Weekly Assessment 2024"));
    }

    #[test]
    fn test_later_column_rules_are_stricter() {
        // A1 以外は "marks" を含むと見出しとみなさない
        let cells = row(&["1234", "Total Marks Obtained"]);
        assert_eq!(extract_heading(&cells), None);
    }

    #[test]
    fn test_short_or_numeric_a1() {
        assert_eq!(extract_heading(&row(&["Test"])), None);
        assert_eq!(extract_heading(&row(&["2024-25"])), None);
        assert_eq!(extract_heading(&[]), None);
    }
}
