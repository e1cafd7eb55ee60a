pub mod json;
pub mod excel;

use crate::cli::ExportFormat;
use crate::error::Result;
use crate::leaderboard::Leaderboard;
use std::path::{Path, PathBuf};

/// 出力ファイル名（拡張子なし）
pub const DEFAULT_FILE_STEM: &str = "toppers";

fn output_path_for_format(output: &Path, extension: &str) -> PathBuf {
    if output.is_dir() || output.extension().is_none() {
        output.join(format!("{}.{}", DEFAULT_FILE_STEM, extension))
    } else {
        output.with_extension(extension)
    }
}

/// 指定形式で書き出し、出力したファイルのパスを返す
pub fn export_leaderboard(board: &Leaderboard, format: &ExportFormat, output: &Path) -> Result<Vec<PathBuf>> {
    let mut written = Vec::new();

    if matches!(format, ExportFormat::Json | ExportFormat::Both) {
        let path = output_path_for_format(output, "json");
        json::write_json(board, &path)?;
        println!("✔ JSON出力: {}", path.display());
        written.push(path);
    }

    if matches!(format, ExportFormat::Excel | ExportFormat::Both) {
        let path = output_path_for_format(output, "xlsx");
        println!("- Excelを生成中...");
        excel::generate_excel(board, &path)?;
        println!("✔ Excel出力: {}", path.display());
        written.push(path);
    }

    Ok(written)
}
