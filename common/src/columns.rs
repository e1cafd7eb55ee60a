//! 列マッピング
//!
//! ヘッダー行の見出しから、受験番号・氏名・各教科の列を特定する。
//!
//! ## 教科列の判定
//! 1. 完全一致: `PHY` / `PHY TOTAL` / `PHY MARKS`
//! 2. 前方一致: `PHYSICS` など。ただし `SEC` / `INT` を含む小計列は除外

use crate::error::{Error, Result, SheetKind};
use crate::header::normalize_header_text;
use crate::types::{RawRow, Subject};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

const ID_TOKENS: [&str; 3] = ["candidate id", "roll no", "roll number"];
const NAME_TOKENS: [&str; 3] = ["candidate name", "student name", "name"];

/// 小計列（セクション別・内部評価）を示す語
const DECOY_TOKENS: [&str; 2] = ["SEC", "INT"];

/// 列の意味的な役割
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ColumnRole {
    Id,
    Name,
}

impl fmt::Display for ColumnRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnRole::Id => write!(f, "id"),
            ColumnRole::Name => write!(f, "name"),
        }
    }
}

/// 教科列の判定方法
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnMatch {
    Exact,
    Prefix,
}

/// 教科列
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubjectColumn {
    pub key: String,
    pub strategy: ColumnMatch,
}

/// 役割 → 列キーの対応表
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnMap {
    pub id: String,
    pub name: String,
    pub subjects: BTreeMap<Subject, SubjectColumn>,
    /// 氏名欄が数値だった場合の代替列（"name" を含む他の列）
    pub name_fallbacks: Vec<String>,
}

impl ColumnMap {
    pub fn subject_key(&self, subject: Subject) -> Option<&str> {
        self.subjects.get(&subject).map(|c| c.key.as_str())
    }

    /// 検出された教科（PHY, CHEM, MATHS, BIO の順）
    pub fn detected_subjects(&self) -> Vec<Subject> {
        self.subjects.keys().copied().collect()
    }
}

/// ヘッダー行から列マッピングを作成する
pub fn map_columns(header_row: &RawRow) -> Result<ColumnMap> {
    let columns: Vec<(String, &str)> = header_row
        .iter()
        .map(|(key, value)| (normalize_header_text(&value.as_text()), key))
        .filter(|(text, _)| !text.is_empty())
        .collect();

    let id = find_column(&columns, &ID_TOKENS, &[]).ok_or(Error::MissingRequiredColumn {
        role: ColumnRole::Id,
        sheet: SheetKind::Marks,
    })?;
    let name = find_column(&columns, &NAME_TOKENS, &[id]).ok_or(Error::MissingRequiredColumn {
        role: ColumnRole::Name,
        sheet: SheetKind::Marks,
    })?;

    let subjects = Subject::ALL
        .into_iter()
        .filter_map(|subject| resolve_subject(&columns, subject).map(|column| (subject, column)))
        .collect();

    let name_fallbacks = columns
        .iter()
        .filter(|(text, key)| text.contains("name") && *key != id && *key != name)
        .map(|(_, key)| key.to_string())
        .collect();

    Ok(ColumnMap {
        id: id.to_string(),
        name: name.to_string(),
        subjects,
        name_fallbacks,
    })
}

/// トークンと一致または含む最初の列
fn find_column<'a>(columns: &[(String, &'a str)], tokens: &[&str], exclude: &[&str]) -> Option<&'a str> {
    columns
        .iter()
        .filter(|(_, key)| !exclude.contains(key))
        .find(|(text, _)| tokens.iter().any(|token| text.contains(*token)))
        .map(|(_, key)| *key)
}

fn resolve_subject(columns: &[(String, &str)], subject: Subject) -> Option<SubjectColumn> {
    let code = subject.code();
    let exact_names = [
        code.to_string(),
        format!("{} TOTAL", code),
        format!("{} MARKS", code),
    ];

    let exact = columns
        .iter()
        .find(|(text, _)| exact_names.contains(&text.to_uppercase()))
        .map(|(_, key)| SubjectColumn {
            key: key.to_string(),
            strategy: ColumnMatch::Exact,
        });
    if exact.is_some() {
        return exact;
    }

    columns
        .iter()
        .find(|(text, _)| {
            let upper = text.to_uppercase();
            upper.starts_with(code) && !DECOY_TOKENS.iter().any(|decoy| upper.contains(*decoy))
        })
        .map(|(_, key)| SubjectColumn {
            key: key.to_string(),
            strategy: ColumnMatch::Prefix,
        })
}
