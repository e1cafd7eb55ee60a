//! スプレッドシート読み込み
//!
//! calamine で先頭シートを読み、A1 起点のセル表（SheetGrid）に変換する。
//! 行データへの変換は2通り:
//! - `lettered_rows`: 列記号（A, B, ...）をキーにした全行（成績表用）
//! - `keyed_rows`: 先頭行の見出しをキーにしたデータ行（名簿用）

use crate::error::{EduRankError, Result};
use calamine::{open_workbook_auto, Data, Reader};
use eduranker_common::{CellValue, RawRow};
use std::collections::HashMap;
use std::path::Path;

/// 見出しが空の列のキー
const EMPTY_HEADER_KEY: &str = "__EMPTY";

/// A1 起点のセル表
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SheetGrid {
    name: String,
    rows: Vec<Vec<CellValue>>,
}

impl SheetGrid {
    pub fn new(name: impl Into<String>, rows: Vec<Vec<CellValue>>) -> Self {
        Self { name: name.into(), rows }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn rows(&self) -> &[Vec<CellValue>] {
        &self.rows
    }

    /// 1行目のセル（見出し抽出用）
    pub fn first_row(&self) -> &[CellValue] {
        self.rows.first().map(Vec::as_slice).unwrap_or(&[])
    }

    fn width(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }

    /// 列記号をキーにした全行
    pub fn lettered_rows(&self) -> Vec<RawRow> {
        let letters: Vec<String> = (0..self.width()).map(column_letter).collect();
        self.rows
            .iter()
            .map(|row| {
                letters
                    .iter()
                    .enumerate()
                    .map(|(i, letter)| (letter.clone(), row.get(i).cloned().unwrap_or_default()))
                    .collect()
            })
            .collect()
    }

    /// 最初の空でない行を見出しとして、以降の行をキー付きに変換（空行は除外）
    pub fn keyed_rows(&self) -> Vec<RawRow> {
        let Some(header_index) = self.rows.iter().position(|row| row.iter().any(|c| !c.is_empty())) else {
            return Vec::new();
        };
        let keys = header_keys(&self.rows[header_index], self.width());

        self.rows[header_index + 1..]
            .iter()
            .filter(|row| row.iter().any(|c| !c.is_empty()))
            .map(|row| {
                keys.iter()
                    .enumerate()
                    .map(|(i, key)| (key.clone(), row.get(i).cloned().unwrap_or_default()))
                    .collect()
            })
            .collect()
    }
}

/// 見出しセルから一意なキーを作る（空は `__EMPTY`, `__EMPTY_1`、重複は `NAME_1`）
fn header_keys(header: &[CellValue], width: usize) -> Vec<String> {
    let mut seen: HashMap<String, usize> = HashMap::new();
    (0..width)
        .map(|i| {
            let text = header.get(i).map(CellValue::as_text).unwrap_or_default();
            let base = match text.trim() {
                "" => EMPTY_HEADER_KEY.to_string(),
                trimmed => trimmed.to_string(),
            };
            let count = seen.entry(base.clone()).or_insert(0);
            let key = if *count == 0 { base } else { format!("{}_{}", base, count) };
            *count += 1;
            key
        })
        .collect()
}

/// 0始まりの列番号 → 列記号（0 → A, 26 → AA）
pub fn column_letter(index: usize) -> String {
    let mut n = index + 1;
    let mut letters = Vec::new();
    while n > 0 {
        let rem = (n - 1) % 26;
        letters.push((b'A' + rem as u8) as char);
        n = (n - 1) / 26;
    }
    letters.iter().rev().collect()
}

fn convert_cell(data: &Data) -> CellValue {
    match data {
        Data::Empty => CellValue::Empty,
        Data::String(s) => CellValue::Text(s.clone()),
        Data::Float(f) => CellValue::Number(*f),
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::Bool(b) => CellValue::Text(b.to_string()),
        Data::DateTime(dt) => CellValue::Number(dt.as_f64()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => CellValue::Text(s.clone()),
        Data::Error(_) => CellValue::Empty,
    }
}

/// ワークブックの先頭シートを読み込む
pub fn read_first_sheet(path: &Path) -> Result<SheetGrid> {
    if !path.exists() {
        return Err(EduRankError::FileNotFound(path.display().to_string()));
    }

    let mut workbook = open_workbook_auto(path)
        .map_err(|e| EduRankError::WorkbookRead(format!("{}: {}", path.display(), e)))?;

    let sheet_name = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| EduRankError::NoSheets(path.display().to_string()))?;

    let range = workbook
        .worksheet_range(&sheet_name)
        .map_err(|e| EduRankError::WorkbookRead(format!("{}: {}", sheet_name, e)))?;

    // 使用範囲の開始位置まで空セルで埋めて A1 起点にそろえる
    let (start_row, start_col) = range.start().unwrap_or((0, 0));
    let mut rows: Vec<Vec<CellValue>> = vec![Vec::new(); start_row as usize];
    for row in range.rows() {
        let mut cells = vec![CellValue::Empty; start_col as usize];
        cells.extend(row.iter().map(convert_cell));
        rows.push(cells);
    }

    tracing::debug!(sheet = %sheet_name, rows = rows.len(), "シート読み込み完了");
    Ok(SheetGrid::new(sheet_name, rows))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(rows: Vec<Vec<&str>>) -> SheetGrid {
        SheetGrid::new(
            "Sheet1",
            rows.into_iter()
                .map(|r| r.into_iter().map(CellValue::from).collect())
                .collect(),
        )
    }

    #[test]
    fn test_column_letter() {
        assert_eq!(column_letter(0), "A");
        assert_eq!(column_letter(25), "Z");
        assert_eq!(column_letter(26), "AA");
        assert_eq!(column_letter(27), "AB");
        assert_eq!(column_letter(701), "ZZ");
        assert_eq!(column_letter(702), "AAA");
    }

    #[test]
    fn test_lettered_rows_pads_short_rows() {
        let sheet = grid(vec![vec!["Title"], vec!["Candidate ID", "Name", "PHY"]]);
        let rows = sheet.lettered_rows();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].len(), 3);
        assert_eq!(rows[0].text("A"), "Title");
        assert!(rows[0].get("C").is_some_and(CellValue::is_empty));
        assert_eq!(rows[1].text("C"), "PHY");
    }

    #[test]
    fn test_keyed_rows_empty_and_duplicate_headers() {
        let sheet = grid(vec![
            vec![],
            vec!["Roll No", "", "Name", "Name", ""],
            vec!["101", "x", "Amy", "A", "y"],
            vec!["", "", "", "", ""],
            vec!["102", "", "Bob"],
        ]);
        let rows = sheet.keyed_rows();
        assert_eq!(rows.len(), 2);
        let keys: Vec<&str> = rows[0].keys().collect();
        assert_eq!(keys, vec!["Roll No", "__EMPTY", "Name", "Name_1", "__EMPTY_1"]);
        assert_eq!(rows[0].text("Name_1"), "A");
        assert_eq!(rows[1].text("Name"), "Bob");
    }

    #[test]
    fn test_keyed_rows_of_empty_sheet() {
        assert!(grid(vec![]).keyed_rows().is_empty());
        assert!(grid(vec![vec!["", ""]]).keyed_rows().is_empty());
    }

    #[test]
    fn test_first_row() {
        let sheet = grid(vec![vec!["PCM CT-1 Result"]]);
        assert_eq!(sheet.first_row()[0].as_text(), "PCM CT-1 Result");
        assert!(SheetGrid::default().first_row().is_empty());
    }

    #[test]
    fn test_read_missing_file() {
        let err = read_first_sheet(Path::new("/nonexistent/marks.xlsx")).unwrap_err();
        assert!(matches!(err, EduRankError::FileNotFound(_)));
    }
}
