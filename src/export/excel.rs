//! Excel生成（CLI版）
//!
//! 共通ライブラリの excel_core でバッファを生成してファイルに保存する

use crate::error::{EduRankError, Result};
use crate::leaderboard::Leaderboard;
use eduranker_common::export::excel_core::{generate_leaderboard_buffer, SheetHeading};
use std::path::Path;

pub fn generate_excel(board: &Leaderboard, output_path: &Path) -> Result<()> {
    let heading = SheetHeading {
        title: &board.title,
        subtitle: board.subtitle.as_deref(),
        subjects: &board.subjects,
        show_id: board.show_candidate_id,
        show_total: board.show_total,
    };

    let buffer = generate_leaderboard_buffer(&heading, &board.entries)
        .map_err(EduRankError::ExcelGeneration)?;

    if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(output_path, buffer)?;
    Ok(())
}
