//! 共通型定義
//!
//! スプレッドシートリーダーから受け取る行データと、ランキング結果の型。

use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// セル値（文字列・数値・空）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    #[default]
    Empty,
    Number(f64),
    Text(String),
}

impl CellValue {
    /// 空セル判定（空白のみの文字列も空とみなす）
    pub fn is_empty(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Number(_) => false,
            CellValue::Text(s) => s.trim().is_empty(),
        }
    }

    /// 文字列表現（整数値の数値は小数点なし）
    pub fn as_text(&self) -> String {
        match self {
            CellValue::Empty => String::new(),
            CellValue::Number(n) => format_number(*n),
            CellValue::Text(s) => s.clone(),
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_text())
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Text(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::Text(s)
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        CellValue::Number(n)
    }
}

impl From<i64> for CellValue {
    fn from(n: i64) -> Self {
        CellValue::Number(n as f64)
    }
}

impl From<i32> for CellValue {
    fn from(n: i32) -> Self {
        CellValue::Number(f64::from(n))
    }
}

/// 数値を表示用文字列に変換: 150.0 → "150", 72.5 → "72.5"
pub fn format_number(n: f64) -> String {
    if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{}", n)
    }
}

/// 生の行データ（列ラベル → セル値、列順を保持）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawRow {
    cells: Vec<(String, CellValue)>,
}

impl RawRow {
    pub fn new() -> Self {
        Self::default()
    }

    /// ビルダー形式で列を追加
    pub fn with(mut self, key: impl Into<String>, value: impl Into<CellValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// 列を追加（同じキーがあれば位置を保ったまま上書き）
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<CellValue>) {
        let key = key.into();
        let value = value.into();
        match self.cells.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => *existing = value,
            None => self.cells.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&CellValue> {
        self.cells.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// 値を文字列で取得（存在しない列は空文字）
    pub fn text(&self, key: &str) -> String {
        self.get(key).map(CellValue::as_text).unwrap_or_default()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.cells.iter().map(|(k, _)| k.as_str())
    }

    pub fn values(&self) -> impl Iterator<Item = &CellValue> {
        self.cells.iter().map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &CellValue)> {
        self.cells.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// 全セルが空かどうか
    pub fn is_blank(&self) -> bool {
        self.cells.iter().all(|(_, v)| v.is_empty())
    }
}

impl<K: Into<String>, V: Into<CellValue>> FromIterator<(K, V)> for RawRow {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut row = RawRow::new();
        for (k, v) in iter {
            row.insert(k, v);
        }
        row
    }
}

/// 教科（固定語彙）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Subject {
    Phy,
    Chem,
    Maths,
    Bio,
}

impl Subject {
    pub const ALL: [Subject; 4] = [Subject::Phy, Subject::Chem, Subject::Maths, Subject::Bio];

    /// 列名に現れる教科コード
    pub fn code(&self) -> &'static str {
        match self {
            Subject::Phy => "PHY",
            Subject::Chem => "CHEM",
            Subject::Maths => "MATHS",
            Subject::Bio => "BIO",
        }
    }

    /// タイトル用の正式名
    pub fn full_name(&self) -> &'static str {
        match self {
            Subject::Phy => "PHYSICS",
            Subject::Chem => "CHEMISTRY",
            Subject::Maths => "MATHS",
            Subject::Bio => "BIOLOGY",
        }
    }
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for Subject {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_uppercase();
        Subject::ALL
            .into_iter()
            .find(|subject| subject.code() == upper)
            .ok_or_else(|| Error::UnknownSubject(s.trim().to_string()))
    }
}

/// ランキング済みの受験者レコード
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateRecord {
    /// 受験番号（トリム済み）
    pub candidate_id: String,
    /// 氏名
    pub name: String,
    /// 集計対象教科の得点
    pub subjects: BTreeMap<Subject, f64>,
    /// 集計対象教科の合計
    pub total: f64,
    /// 順位（1始まり、デンスランキング）
    pub rank: u32,
}

impl CandidateRecord {
    /// 教科の得点（未取得は0）
    pub fn score(&self, subject: Subject) -> f64 {
        self.subjects.get(&subject).copied().unwrap_or(0.0)
    }
}
