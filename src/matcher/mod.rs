//! 写真マスタ（名簿）の読み込み

use crate::error::Result;
use crate::reader;
use eduranker_common::{build_lookup, PhotoLookup};
use std::path::Path;

/// 名簿ファイルから写真ルックアップを作成する
pub fn load_master(master_path: &Path) -> Result<PhotoLookup> {
    let grid = reader::read_first_sheet(master_path)?;
    let lookup = build_lookup(&grid.keyed_rows())?;

    let stats = lookup.stats();
    tracing::info!(
        rows = stats.rows,
        mapped = stats.mapped,
        skipped_no_id = stats.skipped_no_id,
        skipped_no_photo = stats.skipped_no_photo,
        "名簿を読み込みました"
    );
    if lookup.columns().photo.is_none() && lookup.columns().link.is_none() {
        tracing::warn!("名簿に写真/リンク列が見つかりません");
    }

    Ok(lookup)
}
