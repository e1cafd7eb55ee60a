use thiserror::Error;

#[derive(Error, Debug)]
pub enum EduRankError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("ファイルが見つかりません: {0}")]
    FileNotFound(String),

    #[error("ワークブック読み込みエラー: {0}")]
    WorkbookRead(String),

    #[error("シートが見つかりません: {0}")]
    NoSheets(String),

    #[error("集計対象の教科がありません（検出された教科: {0}）")]
    NoSubjects(String),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error("Excel生成エラー: {0}")]
    ExcelGeneration(String),

    #[error("CLI実行エラー: {0}")]
    CliExecution(String),

    #[error(transparent)]
    Common(#[from] eduranker_common::Error),
}

pub type Result<T> = std::result::Result<T, EduRankError>;
