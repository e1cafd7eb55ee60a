//! 検出トレース
//!
//! 列検出・行スキップの経緯を結果と一緒に返す（コンソール出力はしない）。

use crate::columns::{ColumnMap, ColumnMatch};
use crate::types::Subject;
use serde::Serialize;

/// 成績表取り込みの検出経緯
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectionTrace {
    /// ヘッダー行のインデックス（0始まり）
    pub header_index: usize,
    pub id_column: String,
    pub name_column: String,
    pub subjects: Vec<SubjectTrace>,
    pub skipped_rows: Vec<SkippedRow>,
    /// 代替列から氏名を取得した行
    pub name_fallback_rows: Vec<usize>,
    /// 取り込んだ受験者数
    pub candidates: usize,
}

impl DetectionTrace {
    pub fn new(header_index: usize, column_map: &ColumnMap) -> Self {
        Self {
            header_index,
            id_column: column_map.id.clone(),
            name_column: column_map.name.clone(),
            subjects: column_map
                .subjects
                .iter()
                .map(|(subject, column)| SubjectTrace {
                    subject: *subject,
                    column: column.key.clone(),
                    strategy: column.strategy,
                })
                .collect(),
            ..Default::default()
        }
    }

    pub fn skip(&mut self, row_index: usize, reason: SkipReason) {
        self.skipped_rows.push(SkippedRow { row_index, reason });
    }
}

/// 教科列の検出結果
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubjectTrace {
    pub subject: Subject,
    pub column: String,
    pub strategy: ColumnMatch,
}

/// スキップした行
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SkippedRow {
    pub row_index: usize,
    pub reason: SkipReason,
}

/// スキップ理由
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum SkipReason {
    /// 受験番号が空
    EmptyId,
    /// 途中に繰り返されたヘッダー行
    RepeatedHeader,
}
