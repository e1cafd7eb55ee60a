//! 名簿シートの列検出
//!
//! 名簿の見出しは表記ゆれが大きいため、空白を除いた小文字で比較する。
//! （"Candidate ID" / "candidate  id" / "CandidateID" は同じ扱い）

use crate::header::HeaderMatch;
use crate::types::RawRow;
use regex::Regex;
use serde::Serialize;

const ID_EXACT: [&str; 3] = ["candidateid", "rollno", "rollnumber"];
const ID_CONTAINS: [&str; 2] = ["candidateid", "rollno"];
const PHOTO_EXACT: [&str; 4] = ["photo", "image", "photolink", "imagelink"];
const PHOTO_CONTAINS: [&str; 2] = ["photo", "image"];
const GENERIC_PHOTO_KEYS: [&str; 3] = ["link", "photo", "image"];

/// リンク列の入力有無を確認する行数
const LINK_SAMPLE_ROWS: usize = 10;

lazy_static::lazy_static! {
    static ref ID_GUESS_RE: Regex = Regex::new(r"roll|candidate\s*id|cand\s*id").unwrap();
}

/// 名簿の列（行データのキー）
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RosterColumns {
    pub id: Option<String>,
    /// 写真の取得元（リンク列が優先された場合はリンク列）
    pub photo: Option<String>,
    pub link: Option<String>,
}

/// 空白除去 + 小文字化
pub fn compact_key(key: &str) -> String {
    key.chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_lowercase()
}

/// 先頭行のキーから名簿の列を検出する
pub fn detect_roster_columns(rows: &[RawRow]) -> RosterColumns {
    let Some(first) = rows.first() else {
        return RosterColumns::default();
    };
    let keys: Vec<(&str, String)> = first.keys().map(|k| (k, compact_key(k))).collect();

    let find = |pred: &dyn Fn(&str) -> bool| {
        keys.iter()
            .find(|(_, compact)| pred(compact.as_str()))
            .map(|(key, _)| key.to_string())
    };

    let id = find(&|k| ID_EXACT.contains(&k))
        .or_else(|| find(&|k| ID_CONTAINS.iter().any(|t| k.contains(*t))))
        .or_else(|| {
            keys.iter()
                .find(|(key, _)| ID_GUESS_RE.is_match(&key.to_lowercase()))
                .map(|(key, _)| key.to_string())
        });

    let mut photo = find(&|k| PHOTO_EXACT.contains(&k))
        .or_else(|| find(&|k| PHOTO_CONTAINS.iter().any(|t| k.contains(*t))));

    let link = find(&|k| k == "link").or_else(|| find(&|k| k.contains("link")));

    if let Some(link_key) = &link {
        let populated = rows
            .iter()
            .take(LINK_SAMPLE_ROWS)
            .any(|row| row.get(link_key).is_some_and(|v| !v.is_empty()));
        if populated {
            photo = Some(link_key.clone());
        }
    }

    RosterColumns { id, photo, link }
}

/// 写真欄の値（写真列 → リンク列 → link/photo/image 列の順）
pub fn row_photo_value(row: &RawRow, columns: &RosterColumns) -> Option<String> {
    let preferred = [columns.photo.as_deref(), columns.link.as_deref()];
    let from_columns = preferred
        .into_iter()
        .flatten()
        .filter_map(|key| row.get(key))
        .find(|value| !value.is_empty());
    if let Some(value) = from_columns {
        return Some(value.as_text().trim().to_string());
    }

    row.iter()
        .filter(|(key, _)| GENERIC_PHOTO_KEYS.contains(&compact_key(key).as_str()))
        .map(|(_, value)| value)
        .find(|value| !value.is_empty())
        .map(|value| value.as_text().trim().to_string())
}

/// ヘッダー行の見出しでデータ行のキーを付け直す
pub fn rekey_rows(rows: &[RawRow], header: &HeaderMatch<'_>) -> Vec<RawRow> {
    rows.iter()
        .skip(header.index + 1)
        .map(|row| {
            row.iter()
                .map(|(key, value)| {
                    let label = header.row.text(key);
                    let label = label.trim();
                    let new_key = if label.is_empty() { key.to_string() } else { label.to_string() };
                    (new_key, value.clone())
                })
                .collect()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::header::locate_header;

    #[test]
    fn test_compact_key() {
        assert_eq!(compact_key(" Candidate  ID "), "candidateid");
        assert_eq!(compact_key("Photo\tLink"), "photolink");
    }

    #[test]
    fn test_detect_exact_columns() {
        let rows = vec![RawRow::new()
            .with("Sr", "1")
            .with("Roll No", "101")
            .with("Photo", "https://example.com/a.jpg")];
        let columns = detect_roster_columns(&rows);
        assert_eq!(columns.id.as_deref(), Some("Roll No"));
        assert_eq!(columns.photo.as_deref(), Some("Photo"));
        assert_eq!(columns.link, None);
    }

    #[test]
    fn test_detect_guessed_id_and_contained_photo() {
        let rows = vec![RawRow::new()
            .with("Cand ID", "7")
            .with("Student Photo URL", "x")];
        let columns = detect_roster_columns(&rows);
        assert_eq!(columns.id.as_deref(), Some("Cand ID"));
        assert_eq!(columns.photo.as_deref(), Some("Student Photo URL"));
    }

    #[test]
    fn test_populated_link_column_takes_priority() {
        let rows = vec![
            RawRow::new().with("Candidate ID", "1").with("Photo", "a.jpg").with("Link", ""),
            RawRow::new().with("Candidate ID", "2").with("Photo", "b.jpg").with("Link", "https://x/b"),
        ];
        let columns = detect_roster_columns(&rows);
        assert_eq!(columns.photo.as_deref(), Some("Link"));
        assert_eq!(columns.link.as_deref(), Some("Link"));
    }

    #[test]
    fn test_empty_link_column_is_ignored() {
        let rows = vec![RawRow::new().with("Candidate ID", "1").with("Photo", "a.jpg").with("Drive Link", "")];
        let columns = detect_roster_columns(&rows);
        assert_eq!(columns.photo.as_deref(), Some("Photo"));
        assert_eq!(columns.link.as_deref(), Some("Drive Link"));
    }

    #[test]
    fn test_row_photo_value_fallbacks() {
        let columns = RosterColumns {
            id: Some("ID".into()),
            photo: Some("Photo".into()),
            link: Some("Link".into()),
        };
        let row = RawRow::new().with("Photo", "").with("Link", " https://x/1 ");
        assert_eq!(row_photo_value(&row, &columns).as_deref(), Some("https://x/1"));

        let row = RawRow::new().with("Photo", "").with("Link", "");
        assert_eq!(row_photo_value(&row, &columns), None);

        let bare = RosterColumns::default();
        let row = RawRow::new().with("image", "pic.png");
        assert_eq!(row_photo_value(&row, &bare).as_deref(), Some("pic.png"));
    }

    #[test]
    fn test_rekey_rows_after_title() {
        let rows = vec![
            RawRow::new().with("A", "Master List 2024").with("B", ""),
            RawRow::new().with("A", "Roll No").with("B", "Photo"),
            RawRow::new().with("A", "101").with("B", "p.jpg"),
        ];
        let header = locate_header(&rows).unwrap();
        let rekeyed = rekey_rows(&rows, &header);
        assert_eq!(rekeyed.len(), 1);
        assert_eq!(rekeyed[0].text("Roll No"), "101");
        assert_eq!(rekeyed[0].text("Photo"), "p.jpg");
    }
}
