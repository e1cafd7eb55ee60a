//! テスト用のワークブック作成

use rust_xlsxwriter::Workbook;
use std::path::Path;

/// 行データからxlsxを作成（数値に見える値は数値セル、空文字は書き込まない）
pub fn write_workbook(path: &Path, rows: &[Vec<&str>]) {
    write_workbook_at(path, 0, 0, rows);
}

/// 開始位置を指定してxlsxを作成
pub fn write_workbook_at(path: &Path, start_row: u32, start_col: u16, rows: &[Vec<&str>]) {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    for (r, row) in rows.iter().enumerate() {
        for (c, value) in row.iter().enumerate() {
            let (row_num, col_num) = (start_row + r as u32, start_col + c as u16);
            if value.is_empty() {
                continue;
            }
            match value.parse::<f64>() {
                Ok(n) => worksheet.write_number(row_num, col_num, n).map(|_| ()),
                Err(_) => worksheet.write_string(row_num, col_num, *value).map(|_| ()),
            }
            .expect("セル書き込み失敗");
        }
    }

    workbook.save(path).expect("ワークブック保存失敗");
}
