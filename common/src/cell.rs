//! セル値の数値変換
//!
//! 点数セルは数値・"75/100" 形式・ラベル文字列が混在する。
//! ラベル（"JEE - 1", "Group A" など）から数字を拾わないこと。

use crate::types::CellValue;
use regex::Regex;

lazy_static::lazy_static! {
    // "75/100" 形式（分子を点数とする）
    static ref FRACTION_RE: Regex = Regex::new(r"^\s*(\d+)\s*/\s*\d+\s*$").unwrap();
    // 整数・小数
    static ref PLAIN_NUMBER_RE: Regex = Regex::new(r"^\s*\d+(?:\.\d+)?\s*$").unwrap();
    // 数字・空白・カンマのみ（氏名欄に番号が入っているケースの判定）
    static ref NUMERIC_LIKE_RE: Regex = Regex::new(r"^[\d\s,]+$").unwrap();
}

/// セル値を点数に変換する
///
/// 変換できない値は常に0。例外は発生しない。
pub fn parse_numeric(value: &CellValue) -> f64 {
    match value {
        CellValue::Empty => 0.0,
        CellValue::Number(n) => {
            if n.is_finite() {
                *n
            } else {
                0.0
            }
        }
        CellValue::Text(s) => parse_mark_text(s),
    }
}

/// 文字列の点数を変換
fn parse_mark_text(text: &str) -> f64 {
    let s = text.trim();
    if !looks_like_mark(s) {
        return 0.0;
    }

    match FRACTION_RE.captures(s) {
        Some(cap) => cap[1].parse::<f64>().unwrap_or(0.0),
        None => s.parse::<f64>().ok().filter(|n| n.is_finite()).unwrap_or(0.0),
    }
}

/// 点数として妥当な文字列か（分数形式または数値）
pub fn looks_like_mark(text: &str) -> bool {
    FRACTION_RE.is_match(text) || PLAIN_NUMBER_RE.is_match(text)
}

/// 数値だけで構成された値か（氏名として不適切）
pub fn is_numeric_like(value: &CellValue) -> bool {
    match value {
        CellValue::Empty => false,
        CellValue::Number(_) => true,
        CellValue::Text(s) => !s.trim().is_empty() && NUMERIC_LIKE_RE.is_match(s),
    }
}
