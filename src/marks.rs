//! 成績表の読み込み

use crate::error::Result;
use crate::reader::{self, SheetGrid};
use eduranker_common::{extract_heading, MarksTable};
use std::path::Path;

/// 読み込み済みの成績表
pub struct LoadedMarks {
    pub grid: SheetGrid,
    pub table: MarksTable,
    /// シート1行目の見出し
    pub heading: Option<String>,
}

pub fn load_marks(marks_path: &Path) -> Result<LoadedMarks> {
    let grid = reader::read_first_sheet(marks_path)?;
    let heading = extract_heading(grid.first_row());
    let table = MarksTable::from_rows(&grid.lettered_rows())?;

    let trace = table.trace();
    tracing::info!(
        header_row = trace.header_index + 1,
        id_column = %trace.id_column,
        name_column = %trace.name_column,
        candidates = trace.candidates,
        "成績表の列を検出しました"
    );
    for subject in &trace.subjects {
        tracing::debug!(subject = %subject.subject, column = %subject.column, strategy = ?subject.strategy, "教科列");
    }
    for skipped in &trace.skipped_rows {
        tracing::debug!(row = skipped.row_index + 1, reason = ?skipped.reason, "行をスキップ");
    }

    Ok(LoadedMarks { grid, table, heading })
}
