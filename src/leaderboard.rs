//! 上位者一覧の組み立て
//!
//! 順位付け済みレコードを上位N件に切り詰め、写真・イニシャルを付与する。
//! 人数が足りない場合は空欄エントリで埋める。

use eduranker_common::export::excel_core::LeaderboardRow;
use eduranker_common::matcher::{thumbnail_url, PhotoLookup};
use eduranker_common::{compose_subtitle, compose_title, top_n, Batch, CandidateRecord, Subject};
use rayon::prelude::*;
use serde::Serialize;
use std::collections::BTreeMap;

/// 一覧の1行
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntry {
    pub rank: u32,
    pub candidate_id: Option<String>,
    pub name: String,
    /// 写真が無い場合の表示用
    pub initials: String,
    pub subjects: BTreeMap<Subject, f64>,
    /// 2教科以上のときのみ
    pub total: Option<f64>,
    pub photo: Option<String>,
    pub thumbnail: Option<String>,
    /// 人数合わせの空欄
    pub placeholder: bool,
}

impl LeaderboardRow for LeaderboardEntry {
    fn rank(&self) -> u32 {
        self.rank
    }

    fn candidate_id(&self) -> Option<&str> {
        self.candidate_id.as_deref()
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn score(&self, subject: Subject) -> Option<f64> {
        self.subjects.get(&subject).copied()
    }

    fn total(&self) -> Option<f64> {
        self.total
    }

    fn photo(&self) -> Option<&str> {
        self.photo.as_deref()
    }
}

/// 出力用の上位者一覧
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Leaderboard {
    pub title: String,
    pub subtitle: Option<String>,
    pub subjects: Vec<Subject>,
    pub show_total: bool,
    pub show_candidate_id: bool,
    pub generated_at: String,
    pub entries: Vec<LeaderboardEntry>,
}

/// 一覧の組み立て設定
#[derive(Debug, Clone)]
pub struct LeaderboardOptions {
    pub top_n: usize,
    pub hide_candidate_id: bool,
    pub placeholder_name: String,
    pub standard: Option<String>,
    pub batch: Option<Batch>,
    pub test_type: Option<String>,
    pub test_marks: Option<u32>,
    pub heading: Option<String>,
}

impl Default for LeaderboardOptions {
    fn default() -> Self {
        Self {
            top_n: 10,
            hide_candidate_id: false,
            placeholder_name: "-".into(),
            standard: None,
            batch: None,
            test_type: None,
            test_marks: None,
            heading: None,
        }
    }
}

/// 上位者一覧を組み立てる
///
/// `ranked` は集計対象教科 `subjects` で順位付け済みであること。
pub fn build_leaderboard(
    ranked: &[CandidateRecord],
    subjects: &[Subject],
    lookup: Option<&PhotoLookup>,
    options: &LeaderboardOptions,
) -> Leaderboard {
    let show_total = subjects.len() >= 2;
    let show_candidate_id = !options.hide_candidate_id;

    // 名簿は読み取りのみなので並列に引く
    let mut entries: Vec<LeaderboardEntry> = top_n(ranked, options.top_n)
        .par_iter()
        .map(|record| {
            let photo = lookup
                .and_then(|l| l.resolve(&record.candidate_id))
                .map(str::to_string);
            let thumbnail = photo.as_deref().and_then(thumbnail_url);

            LeaderboardEntry {
                rank: record.rank,
                candidate_id: show_candidate_id.then(|| record.candidate_id.clone()),
                name: record.name.clone(),
                initials: initials(&record.name),
                subjects: record.subjects.clone(),
                total: show_total.then_some(record.total),
                photo,
                thumbnail,
                placeholder: false,
            }
        })
        .collect();

    let last_rank = entries.last().map(|e| e.rank).unwrap_or(0);
    let missing = options.top_n.saturating_sub(entries.len());
    entries.extend((1..=missing).map(|offset| LeaderboardEntry {
        rank: last_rank + offset as u32,
        candidate_id: None,
        name: options.placeholder_name.clone(),
        initials: String::new(),
        subjects: BTreeMap::new(),
        total: None,
        photo: None,
        thumbnail: None,
        placeholder: true,
    }));

    Leaderboard {
        title: compose_title(subjects, options.standard.as_deref(), options.batch),
        subtitle: compose_subtitle(
            options.test_type.as_deref(),
            options.test_marks,
            options.heading.as_deref(),
        ),
        subjects: subjects.to_vec(),
        show_total,
        show_candidate_id,
        generated_at: chrono::Local::now().format("%Y-%m-%d %H:%M").to_string(),
        entries,
    }
}

/// 氏名のイニシャル（先頭2語の頭文字、大文字）
pub fn initials(name: &str) -> String {
    name.split_whitespace()
        .take(2)
        .filter_map(|word| word.chars().next())
        .flat_map(char::to_uppercase)
        .collect()
}
