//! 受験番号による写真の突き合わせ
//!
//! 名簿と成績表で受験番号の表記がそろわない（先頭ゼロ・記号・大文字小文字）ため、
//! 名簿側の番号を複数のキーに展開して登録し、検索時も同じ順で候補を試す。
//!
//! ## 検索順
//! 1. 完全一致
//! 2. 数字のみ
//! 3. 先頭ゼロ除去
//! 4. 5桁ゼロ埋め
//! 5. 小文字
//! 6. 下4桁の後方一致（キーの辞書順で最初のもの）

pub mod photo;
pub mod roster;

pub use photo::{drive_file_id, normalize_photo, thumbnail_url};
pub use roster::{detect_roster_columns, RosterColumns};

use crate::columns::ColumnRole;
use crate::error::{Error, Result, SheetKind};
use crate::header::locate_header;
use crate::types::RawRow;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// ゼロ埋めの桁数
const PADDED_WIDTH: usize = 5;
/// 後方一致に使う桁数
const SUFFIX_DIGITS: usize = 4;

/// 一致した検索方法
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum MatchStrategy {
    Exact,
    Digits,
    ZeroStripped,
    ZeroPadded,
    Lowercase,
    Suffix,
}

impl fmt::Display for MatchStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            MatchStrategy::Exact => "exact",
            MatchStrategy::Digits => "digits",
            MatchStrategy::ZeroStripped => "zero-stripped",
            MatchStrategy::ZeroPadded => "zero-padded",
            MatchStrategy::Lowercase => "lowercase",
            MatchStrategy::Suffix => "suffix",
        };
        write!(f, "{}", label)
    }
}

/// 名簿取り込みの集計
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LookupStats {
    pub rows: usize,
    /// 写真を登録した行数
    pub mapped: usize,
    pub skipped_no_id: usize,
    pub skipped_no_photo: usize,
    /// 登録したキーの数（バリエーション込み）
    pub keys: usize,
}

/// 受験番号のバリエーション → 写真参照
#[derive(Debug, Clone, Default, Serialize)]
pub struct PhotoLookup {
    entries: BTreeMap<String, String>,
    columns: RosterColumns,
    stats: LookupStats,
}

impl PhotoLookup {
    pub fn new() -> Self {
        Self::default()
    }

    /// 受験番号の全バリエーションで写真を登録（後勝ち）
    pub fn insert(&mut self, id: &str, photo: &str) {
        for key in identifier_variants(id) {
            self.entries.insert(key, photo.to_string());
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn columns(&self) -> &RosterColumns {
        &self.columns
    }

    pub fn stats(&self) -> &LookupStats {
        &self.stats
    }

    pub fn resolve(&self, candidate_id: &str) -> Option<&str> {
        self.resolve_with_strategy(candidate_id).map(|(photo, _)| photo)
    }

    /// 写真参照と一致した検索方法を返す
    pub fn resolve_with_strategy(&self, candidate_id: &str) -> Option<(&str, MatchStrategy)> {
        let id = candidate_id.trim();
        if id.is_empty() {
            return None;
        }
        let digits = digits_only(id);
        let stripped = digits.trim_start_matches('0');

        let mut attempts: Vec<(String, MatchStrategy)> = vec![(id.to_string(), MatchStrategy::Exact)];
        if !digits.is_empty() {
            attempts.push((digits.clone(), MatchStrategy::Digits));
            if !stripped.is_empty() && stripped != digits {
                attempts.push((stripped.to_string(), MatchStrategy::ZeroStripped));
            }
            if digits.len() < PADDED_WIDTH {
                attempts.push((pad_digits(&digits), MatchStrategy::ZeroPadded));
            }
        }
        attempts.push((id.to_lowercase(), MatchStrategy::Lowercase));

        let found = attempts
            .into_iter()
            .find_map(|(key, strategy)| self.get(&key).map(|photo| (photo, strategy)));
        if found.is_some() {
            return found;
        }

        if digits.len() >= SUFFIX_DIGITS {
            let suffix = &digits[digits.len() - SUFFIX_DIGITS..];
            return self
                .entries
                .iter()
                .find(|(key, _)| key.ends_with(suffix))
                .map(|(_, photo)| (photo.as_str(), MatchStrategy::Suffix));
        }

        None
    }
}

/// 名簿の行データから写真ルックアップを作成する
///
/// 先頭行のキーに受験番号列が無い場合は、ヘッダー行を探してキーを付け直す。
pub fn build_lookup(rows: &[RawRow]) -> Result<PhotoLookup> {
    if rows.iter().all(RawRow::is_blank) {
        return Err(Error::EmptySheet { sheet: SheetKind::Roster });
    }

    let mut columns = detect_roster_columns(rows);
    let rekeyed;
    let mut data: &[RawRow] = rows;

    if columns.id.is_none() {
        let header = locate_header(rows).map_err(|_| Error::MissingRequiredColumn {
            role: ColumnRole::Id,
            sheet: SheetKind::Roster,
        })?;
        rekeyed = roster::rekey_rows(rows, &header);
        if rekeyed.iter().all(RawRow::is_blank) {
            return Err(Error::EmptySheet { sheet: SheetKind::Roster });
        }
        columns = detect_roster_columns(&rekeyed);
        data = &rekeyed;
    }

    let id_key = columns.id.clone().ok_or(Error::MissingRequiredColumn {
        role: ColumnRole::Id,
        sheet: SheetKind::Roster,
    })?;

    let mut lookup = PhotoLookup::new();
    for row in data.iter().filter(|row| !row.is_blank()) {
        lookup.stats.rows += 1;

        let id = row.text(&id_key);
        let id = id.trim();
        if id.is_empty() {
            lookup.stats.skipped_no_id += 1;
            continue;
        }

        match roster::row_photo_value(row, &columns).map(|raw| normalize_photo(&raw)) {
            Some(photo) if !photo.is_empty() => {
                lookup.insert(id, &photo);
                lookup.stats.mapped += 1;
            }
            _ => lookup.stats.skipped_no_photo += 1,
        }
    }
    lookup.stats.keys = lookup.entries.len();
    lookup.columns = columns;

    Ok(lookup)
}

/// 受験番号から写真参照を取得する
pub fn resolve_photo<'a>(lookup: &'a PhotoLookup, candidate_id: &str) -> Option<&'a str> {
    lookup.resolve(candidate_id)
}

/// 名簿登録時のキーの展開（空のキーは除外）
pub fn identifier_variants(raw: &str) -> Vec<String> {
    let id = raw.trim();
    let digits = digits_only(id);
    let stripped = digits.trim_start_matches('0').to_string();

    let mut variants = vec![id.to_string(), digits.clone()];
    if stripped != digits {
        variants.push(stripped.clone());
    }
    if !digits.is_empty() && digits.len() < PADDED_WIDTH {
        variants.push(pad_digits(&digits));
        variants.push(stripped);
    }
    variants.push(id.to_lowercase());

    let mut unique: Vec<String> = Vec::with_capacity(variants.len());
    for key in variants {
        if !key.is_empty() && !unique.contains(&key) {
            unique.push(key);
        }
    }
    unique
}

fn digits_only(id: &str) -> String {
    id.chars().filter(char::is_ascii_digit).collect()
}

fn pad_digits(digits: &str) -> String {
    format!("{:0>width$}", digits, width = PADDED_WIDTH)
}
