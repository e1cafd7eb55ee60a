//! ヘッダー行の検出
//!
//! 成績表は1行目にタイトルや空行が入ることが多いため、
//! 先頭10行から "candidate id" などを含む行を探す。

use crate::error::{Error, Result};
use crate::types::RawRow;

/// ヘッダー探索の対象行数
pub const HEADER_SCAN_LIMIT: usize = 10;

/// ヘッダー行とみなすトークン
const HEADER_TOKENS: [&str; 3] = ["candidate id", "candidate name", "roll no"];

/// 検出したヘッダー行
#[derive(Debug, Clone, Copy)]
pub struct HeaderMatch<'a> {
    /// 元データ内の行インデックス
    pub index: usize,
    pub row: &'a RawRow,
}

/// ヘッダー行を検出する
pub fn locate_header(rows: &[RawRow]) -> Result<HeaderMatch<'_>> {
    rows.iter()
        .take(HEADER_SCAN_LIMIT)
        .enumerate()
        .find(|(_, row)| is_header_row(row))
        .map(|(index, row)| HeaderMatch { index, row })
        .ok_or(Error::HeaderNotFound {
            scanned: rows.len().min(HEADER_SCAN_LIMIT),
        })
}

/// ヘッダートークンを含む行か
pub fn is_header_row(row: &RawRow) -> bool {
    row.values().any(|value| {
        let text = normalize_header_text(&value.as_text());
        HEADER_TOKENS.iter().any(|token| text.contains(token))
    })
}

/// 見出し文字列の正規化: 連続空白を1つに、前後トリム、小文字化
pub fn normalize_header_text(text: &str) -> String {
    text.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn title_row() -> RawRow {
        RawRow::new().with("A", "PCM JEE CT-1 Marks Score List")
    }

    fn header_row() -> RawRow {
        RawRow::new()
            .with("A", "CANDIDATE ID")
            .with("B", "CANDIDATE NAME")
            .with("C", "PHY")
    }

    #[test]
    fn test_locate_header_on_first_row() {
        let rows = vec![header_row(), RawRow::new().with("A", "101")];
        let found = locate_header(&rows).unwrap();
        assert_eq!(found.index, 0);
    }

    #[test]
    fn test_locate_header_below_title_rows() {
        let rows = vec![title_row(), RawRow::new(), header_row()];
        let found = locate_header(&rows).unwrap();
        assert_eq!(found.index, 2);
        assert_eq!(found.row.text("B"), "CANDIDATE NAME");
    }

    #[test]
    fn test_locate_header_roll_no_with_extra_spaces() {
        let rows = vec![RawRow::new().with("A", "  Roll   No. ").with("B", "Name")];
        assert!(locate_header(&rows).is_ok());
    }

    #[test]
    fn test_locate_header_outside_scan_window() {
        let mut rows: Vec<RawRow> = (0..HEADER_SCAN_LIMIT).map(|_| title_row()).collect();
        rows.push(header_row());
        let err = locate_header(&rows).unwrap_err();
        assert!(matches!(err, Error::HeaderNotFound { scanned: 10 }));
    }

    #[test]
    fn test_locate_header_empty_rows() {
        let err = locate_header(&[]).unwrap_err();
        assert!(matches!(err, Error::HeaderNotFound { scanned: 0 }));
    }

    #[test]
    fn test_normalize_header_text() {
        assert_eq!(normalize_header_text("  Candidate \n  ID "), "candidate id");
        assert_eq!(normalize_header_text("PHY TOTAL"), "phy total");
    }
}
