//! エラー型定義

use crate::columns::ColumnRole;
use std::fmt;
use thiserror::Error;

/// どのシートの取り込みで失敗したか
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SheetKind {
    /// 成績表
    Marks,
    /// 写真マスタ（名簿）
    Roster,
}

impl fmt::Display for SheetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SheetKind::Marks => write!(f, "marks sheet"),
            SheetKind::Roster => write!(f, "roster sheet"),
        }
    }
}

/// 共通エラー型
#[derive(Error, Debug)]
pub enum Error {
    #[error("Header row not found in the first {scanned} rows (expected \"Candidate ID\", \"Candidate Name\" or \"Roll No\")")]
    HeaderNotFound { scanned: usize },

    #[error("Missing column: could not detect the {role} column in the {sheet}")]
    MissingRequiredColumn { role: ColumnRole, sheet: SheetKind },

    #[error("Empty sheet: no data rows found in the {sheet}")]
    EmptySheet { sheet: SheetKind },

    #[error("Unknown subject: {0} (expected PHY, CHEM, MATHS or BIO)")]
    UnknownSubject(String),

    #[error("Config error: {0}")]
    Config(String),
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;
