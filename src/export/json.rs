//! JSON出力（外部の描画処理向け）

use crate::error::Result;
use crate::leaderboard::Leaderboard;
use std::path::Path;

pub fn to_json_string(board: &Leaderboard) -> Result<String> {
    Ok(serde_json::to_string_pretty(board)?)
}

pub fn write_json(board: &Leaderboard, output_path: &Path) -> Result<()> {
    if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(output_path, to_json_string(board)?)?;
    Ok(())
}
