//! 写真参照の正規化
//!
//! 名簿の写真欄には data URI・プレフィックスなしのbase64・Google Driveの共有リンク・
//! 通常のURLが混在する。表示側でそのまま使える形にそろえる。

use regex::Regex;

const BASE64_PREFIX: &str = "data:image/jpeg;base64,";
const BASE64_MIN_LEN: usize = 100;

lazy_static::lazy_static! {
    static ref BASE64_RE: Regex = Regex::new(r"^[A-Za-z0-9+/=\r\n]+$").unwrap();
    static ref DRIVE_HOST_RE: Regex = Regex::new(r"(?i)https?://drive\.google\.com/").unwrap();
    // /file/d/{id}/view, /d/{id}
    static ref DRIVE_PATH_ID_RE: Regex = Regex::new(r"/(?:file/)?d/([^/?]+)").unwrap();
    // open?id={id}, uc?export=view&id={id}
    static ref DRIVE_QUERY_ID_RE: Regex = Regex::new(r"[?&]id=([^&#]+)").unwrap();
}

/// 写真欄の値を正規化する
///
/// - `data:image/` で始まる値はそのまま
/// - base64文字のみで空白除去後100文字超 → `data:image/jpeg;base64,` を付与
/// - Google Driveリンク → `https://drive.google.com/uc?export=view&id={id}`
/// - それ以外はトリムしてそのまま
pub fn normalize_photo(raw: &str) -> String {
    let value = raw.trim();
    if value.is_empty() || value.starts_with("data:image/") {
        return value.to_string();
    }

    if BASE64_RE.is_match(value) {
        let compact: String = value.chars().filter(|c| !c.is_whitespace()).collect();
        if compact.len() > BASE64_MIN_LEN {
            return format!("{}{}", BASE64_PREFIX, compact);
        }
    }

    if DRIVE_HOST_RE.is_match(value) {
        if let Some(id) = drive_file_id(value) {
            return format!("https://drive.google.com/uc?export=view&id={}", id);
        }
    }

    value.to_string()
}

/// Google DriveのURLからファイルIDを取り出す
pub fn drive_file_id(url: &str) -> Option<String> {
    if !DRIVE_HOST_RE.is_match(url) {
        return None;
    }

    [&*DRIVE_PATH_ID_RE, &*DRIVE_QUERY_ID_RE]
        .iter()
        .find_map(|re| re.captures(url).map(|cap| cap[1].to_string()))
}

/// Drive画像のサムネイルURL（幅200px）
pub fn thumbnail_url(photo: &str) -> Option<String> {
    drive_file_id(photo).map(|id| format!("https://drive.google.com/thumbnail?id={}&sz=w200", id))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_uri_unchanged() {
        let uri = "data:image/png;base64,iVBORw0KGgo=";
        assert_eq!(normalize_photo(uri), uri);
    }

    #[test]
    fn test_bare_base64_gets_prefix() {
        let blob = "A".repeat(60) + "\n" + &"B".repeat(60);
        let normalized = normalize_photo(&blob);
        assert!(normalized.starts_with("data:image/jpeg;base64,"));
        assert!(!normalized.contains('\n'));
        assert_eq!(normalized.len(), BASE64_PREFIX.len() + 120);
    }

    #[test]
    fn test_short_base64_like_value_is_not_prefixed() {
        assert_eq!(normalize_photo("abc123"), "abc123");
    }

    #[test]
    fn test_drive_file_link() {
        assert_eq!(
            normalize_photo("https://drive.google.com/file/d/1AbC_xyz/view?usp=sharing"),
            "https://drive.google.com/uc?export=view&id=1AbC_xyz"
        );
    }

    #[test]
    fn test_drive_open_link() {
        assert_eq!(
            normalize_photo("https://drive.google.com/open?id=XYZ987"),
            "https://drive.google.com/uc?export=view&id=XYZ987"
        );
    }

    #[test]
    fn test_drive_normalization_is_stable() {
        let once = normalize_photo("https://drive.google.com/file/d/abc/view");
        assert_eq!(normalize_photo(&once), once);
    }

    #[test]
    fn test_drive_folder_link_passes_through() {
        let url = "https://drive.google.com/drive/folders";
        assert_eq!(normalize_photo(url), url);
    }

    #[test]
    fn test_plain_url_and_path_pass_through() {
        assert_eq!(normalize_photo(" https://cdn.example.com/a.jpg "), "https://cdn.example.com/a.jpg");
        assert_eq!(normalize_photo("photos\\101.jpg"), "photos\\101.jpg");
    }

    #[test]
    fn test_thumbnail_url() {
        assert_eq!(
            thumbnail_url("https://drive.google.com/uc?export=view&id=abc").as_deref(),
            Some("https://drive.google.com/thumbnail?id=abc&sz=w200")
        );
        assert_eq!(thumbnail_url("https://cdn.example.com/a.jpg"), None);
    }

    #[test]
    fn test_drive_uc_link_id_after_other_params() {
        assert_eq!(
            drive_file_id("https://drive.google.com/uc?export=download&id=Q1w2&authuser=0").as_deref(),
            Some("Q1w2")
        );
    }
}
