//! ランキングエンジン
//!
//! ## 処理フロー
//! 1. ヘッダー行の検出・列マッピング
//! 2. データ行 → 受験者（全検出教科の得点を保持）
//! 3. 集計対象教科で合計を再計算し、ソート・順位付け
//!
//! 順位はデンスランキング（同点は同順位、次の点数は +1）。
//! 集計対象教科を変更した場合は、必ず全受験者に対して 3 をやり直す。
//! 上位N件への切り詰めは順位付けの後に行うこと。

use crate::cell::{is_numeric_like, parse_numeric};
use crate::columns::{map_columns, ColumnMap};
use crate::error::{Error, Result, SheetKind};
use crate::header::locate_header;
use crate::trace::{DetectionTrace, SkipReason};
use crate::types::{CandidateRecord, RawRow, Subject};
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// 取り込み済みの受験者（全検出教科の得点）
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub candidate_id: String,
    pub name: String,
    pub scores: BTreeMap<Subject, f64>,
}

impl Candidate {
    /// 集計対象教科だけを残したレコードを作成（順位は未設定）
    fn to_record(&self, included: &[Subject]) -> CandidateRecord {
        let subjects: BTreeMap<Subject, f64> = included
            .iter()
            .filter_map(|subject| self.scores.get(subject).map(|score| (*subject, *score)))
            .collect();
        let total = subjects.values().sum();

        CandidateRecord {
            candidate_id: self.candidate_id.clone(),
            name: self.name.clone(),
            subjects,
            total,
            rank: 0,
        }
    }
}

/// ソートキー
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    /// 合計点（2教科以上）
    Total,
    /// 単一教科の得点
    Subject(Subject),
}

impl SortKey {
    pub fn for_subjects(included: &[Subject]) -> Self {
        match included {
            [single] => SortKey::Subject(*single),
            _ => SortKey::Total,
        }
    }

    pub fn score(&self, record: &CandidateRecord) -> f64 {
        match self {
            SortKey::Total => record.total,
            SortKey::Subject(subject) => record.score(*subject),
        }
    }
}

/// 取り込み済みの成績表
#[derive(Debug, Clone)]
pub struct MarksTable {
    column_map: ColumnMap,
    candidates: Vec<Candidate>,
    trace: DetectionTrace,
}

impl MarksTable {
    /// 生の行データから取り込む
    pub fn from_rows(rows: &[RawRow]) -> Result<Self> {
        let header = locate_header(rows)?;
        let column_map = map_columns(header.row)?;
        let data_start = header.index + 1;

        let mut trace = DetectionTrace::new(header.index, &column_map);
        let candidates = extract_candidates(&rows[data_start..], &column_map, data_start, &mut trace);
        if candidates.is_empty() {
            return Err(Error::EmptySheet { sheet: SheetKind::Marks });
        }
        trace.candidates = candidates.len();

        Ok(Self {
            column_map,
            candidates,
            trace,
        })
    }

    pub fn column_map(&self) -> &ColumnMap {
        &self.column_map
    }

    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    pub fn trace(&self) -> &DetectionTrace {
        &self.trace
    }

    /// 検出された教科
    pub fn subjects_detected(&self) -> Vec<Subject> {
        self.column_map.detected_subjects()
    }

    /// 指定教科で全受験者を順位付けする（未検出の教科は無視）
    pub fn rank(&self, included: &[Subject]) -> Vec<CandidateRecord> {
        let active = active_subjects(included, &self.column_map);
        rank_candidates(&self.candidates, &active)
    }

    /// 検出された全教科で順位付け
    pub fn rank_all(&self) -> Vec<CandidateRecord> {
        rank_candidates(&self.candidates, &self.subjects_detected())
    }
}

/// ヘッダー行より後のデータ行を順位付けする
pub fn rank(data_rows: &[RawRow], column_map: &ColumnMap, included: &[Subject]) -> Vec<CandidateRecord> {
    let mut trace = DetectionTrace::default();
    let candidates = extract_candidates(data_rows, column_map, 0, &mut trace);
    let active = active_subjects(included, column_map);
    rank_candidates(&candidates, &active)
}

/// 受験者を集計対象教科で順位付けする
pub fn rank_candidates(candidates: &[Candidate], included: &[Subject]) -> Vec<CandidateRecord> {
    let mut active: Vec<Subject> = Vec::with_capacity(included.len());
    for subject in included {
        if !active.contains(subject) {
            active.push(*subject);
        }
    }

    let key = SortKey::for_subjects(&active);
    let mut records: Vec<CandidateRecord> = candidates.iter().map(|c| c.to_record(&active)).collect();

    records.sort_by(|a, b| {
        compare_scores(key.score(b), key.score(a)).then_with(|| compare_names(&a.name, &b.name))
    });
    assign_dense_ranks(&mut records, key);

    records
}

/// 上位N件（順位付け後に切り詰める）
pub fn top_n(ranked: &[CandidateRecord], n: usize) -> &[CandidateRecord] {
    &ranked[..n.min(ranked.len())]
}

/// ソート済みレコードにデンスランキングを付与
fn assign_dense_ranks(records: &mut [CandidateRecord], key: SortKey) {
    let mut current_rank = 1;
    let mut prev_score: Option<f64> = None;

    for record in records.iter_mut() {
        let score = key.score(record);
        if let Some(prev) = prev_score {
            if score != prev {
                current_rank += 1;
            }
        }
        record.rank = current_rank;
        prev_score = Some(score);
    }
}

fn compare_scores(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b).unwrap_or(Ordering::Equal)
}

/// 大文字小文字を区別せずに比較し、同じならバイト順
fn compare_names(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

fn active_subjects(included: &[Subject], column_map: &ColumnMap) -> Vec<Subject> {
    included
        .iter()
        .filter(|subject| column_map.subjects.contains_key(subject))
        .copied()
        .collect()
}

/// データ行から受験者を抽出
fn extract_candidates(
    rows: &[RawRow],
    column_map: &ColumnMap,
    offset: usize,
    trace: &mut DetectionTrace,
) -> Vec<Candidate> {
    let mut candidates = Vec::new();

    for (i, row) in rows.iter().enumerate() {
        let row_index = offset + i;
        if row.is_blank() {
            continue;
        }

        let id_value = row.get(&column_map.id).cloned().unwrap_or_default();
        if id_value.is_empty() {
            trace.skip(row_index, SkipReason::EmptyId);
            continue;
        }
        let candidate_id = id_value.as_text().trim().to_string();
        if candidate_id.to_lowercase().contains("candidate") {
            trace.skip(row_index, SkipReason::RepeatedHeader);
            continue;
        }

        let (name, used_fallback) = resolve_name(row, column_map);
        if used_fallback {
            trace.name_fallback_rows.push(row_index);
        }

        // 負の得点（減点方式のマイナス）は教科に含めない
        let scores = column_map
            .subjects
            .iter()
            .map(|(subject, column)| {
                let score = row.get(&column.key).map(parse_numeric).unwrap_or(0.0);
                (*subject, score)
            })
            .filter(|(_, score)| *score >= 0.0)
            .collect();

        candidates.push(Candidate {
            candidate_id,
            name,
            scores,
        });
    }

    candidates
}

/// 氏名を取得（空または数値のみの場合は代替列を使う）
fn resolve_name(row: &RawRow, column_map: &ColumnMap) -> (String, bool) {
    let primary = row.get(&column_map.name).cloned().unwrap_or_default();
    if !primary.is_empty() && !is_numeric_like(&primary) {
        return (primary.as_text().trim().to_string(), false);
    }

    column_map
        .name_fallbacks
        .iter()
        .filter_map(|key| row.get(key))
        .find(|value| !value.is_empty() && !is_numeric_like(value))
        .map(|value| (value.as_text().trim().to_string(), true))
        .unwrap_or_else(|| (primary.as_text().trim().to_string(), false))
}
