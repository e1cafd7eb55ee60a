//! Excel生成（共通ライブラリ）
//!
//! 上位者一覧を1シートのExcelに書き出す。
//! 1行目: タイトル / 2行目: サブタイトル / 3行目: 見出し / 4行目以降: 各行

use crate::types::Subject;
use rust_xlsxwriter::*;

const TITLE_ROW: u32 = 0;
const SUBTITLE_ROW: u32 = 1;
const HEADER_ROW: u32 = 2;
const FIRST_DATA_ROW: u32 = 3;

/// 一覧の1行分
pub trait LeaderboardRow {
    fn rank(&self) -> u32;
    fn candidate_id(&self) -> Option<&str>;
    fn name(&self) -> &str;
    fn score(&self, subject: Subject) -> Option<f64>;
    fn total(&self) -> Option<f64>;
    fn photo(&self) -> Option<&str>;
}

/// シートの見出し情報
#[derive(Debug, Clone)]
pub struct SheetHeading<'a> {
    pub title: &'a str,
    pub subtitle: Option<&'a str>,
    pub subjects: &'a [Subject],
    pub show_id: bool,
    pub show_total: bool,
}

/// 列の種類
#[derive(Debug, Clone, Copy, PartialEq)]
enum Column {
    Rank,
    Id,
    Name,
    Subject(Subject),
    Total,
    Photo,
}

impl Column {
    fn label(&self) -> String {
        match self {
            Column::Rank => "Rank".to_string(),
            Column::Id => "Candidate ID".to_string(),
            Column::Name => "Name".to_string(),
            Column::Subject(subject) => subject.code().to_string(),
            Column::Total => "Total".to_string(),
            Column::Photo => "Photo".to_string(),
        }
    }

    fn width(&self) -> f64 {
        match self {
            Column::Rank => 7.0,
            Column::Id => 16.0,
            Column::Name => 28.0,
            Column::Subject(_) | Column::Total => 9.0,
            Column::Photo => 48.0,
        }
    }
}

fn columns_for(heading: &SheetHeading<'_>) -> Vec<Column> {
    let mut columns = vec![Column::Rank];
    if heading.show_id {
        columns.push(Column::Id);
    }
    columns.push(Column::Name);
    columns.extend(heading.subjects.iter().map(|s| Column::Subject(*s)));
    if heading.show_total {
        columns.push(Column::Total);
    }
    columns.push(Column::Photo);
    columns
}

/// 上位者一覧のExcelをバッファに生成
pub fn generate_leaderboard_buffer<T>(heading: &SheetHeading<'_>, rows: &[T]) -> Result<Vec<u8>, String>
where
    T: LeaderboardRow,
{
    let columns = columns_for(heading);
    let last_col = (columns.len() - 1) as u16;
    let mut workbook = Workbook::new();

    // フォーマット定義
    let title_format = Format::new()
        .set_bold()
        .set_font_size(16.0)
        .set_align(FormatAlign::Center)
        .set_align(FormatAlign::VerticalCenter);

    let subtitle_format = Format::new()
        .set_italic()
        .set_font_size(11.0)
        .set_font_color(Color::RGB(0x555555))
        .set_align(FormatAlign::Center);

    let header_format = Format::new()
        .set_bold()
        .set_font_size(10.0)
        .set_font_color(Color::White)
        .set_background_color(Color::RGB(0x1F3A5F))
        .set_align(FormatAlign::Center)
        .set_border(FormatBorder::Thin);

    let text_format = Format::new()
        .set_align(FormatAlign::Left)
        .set_border(FormatBorder::Hair)
        .set_border_color(Color::RGB(0xCCCCCC));

    let number_format = Format::new()
        .set_align(FormatAlign::Center)
        .set_num_format("0.##")
        .set_border(FormatBorder::Hair)
        .set_border_color(Color::RGB(0xCCCCCC));

    let worksheet = workbook.add_worksheet();
    worksheet.set_name("Toppers")
        .map_err(|e| format!("シート名設定エラー: {}", e))?;

    for (col, column) in columns.iter().enumerate() {
        worksheet.set_column_width(col as u16, column.width())
            .map_err(|e| format!("列幅設定エラー: {}", e))?;
    }

    worksheet.set_row_height(TITLE_ROW, 26.0)
        .map_err(|e| format!("行高さ設定エラー: {}", e))?;
    worksheet.merge_range(TITLE_ROW, 0, TITLE_ROW, last_col, heading.title, &title_format)
        .map_err(|e| format!("タイトル書き込みエラー: {}", e))?;
    worksheet.merge_range(SUBTITLE_ROW, 0, SUBTITLE_ROW, last_col, heading.subtitle.unwrap_or(""), &subtitle_format)
        .map_err(|e| format!("サブタイトル書き込みエラー: {}", e))?;

    for (col, column) in columns.iter().enumerate() {
        worksheet.write_string_with_format(HEADER_ROW, col as u16, column.label(), &header_format)
            .map_err(|e| format!("見出し書き込みエラー: {}", e))?;
    }

    for (i, row) in rows.iter().enumerate() {
        let excel_row = FIRST_DATA_ROW + i as u32;
        for (col, column) in columns.iter().enumerate() {
            let col = col as u16;
            let number = match column {
                Column::Rank => Some(row.rank() as f64),
                Column::Subject(subject) => row.score(*subject),
                Column::Total => row.total(),
                _ => None,
            };
            let text = match column {
                Column::Id => row.candidate_id().unwrap_or(""),
                Column::Name => row.name(),
                Column::Photo => row.photo().unwrap_or(""),
                _ => "",
            };

            match number {
                Some(value) => {
                    worksheet.write_number_with_format(excel_row, col, value, &number_format)
                        .map_err(|e| format!("数値書き込みエラー: {}", e))?;
                }
                None => {
                    worksheet.write_string_with_format(excel_row, col, text, &text_format)
                        .map_err(|e| format!("値書き込みエラー: {}", e))?;
                }
            }
        }
    }

    // バッファに書き出し
    workbook.save_to_buffer()
        .map_err(|e| format!("Excel保存エラー: {}", e))
}
