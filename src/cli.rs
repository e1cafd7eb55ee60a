use clap::{Parser, Subcommand};
use eduranker_common::{Batch, Subject};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "eduranker")]
#[command(about = "試験成績表からトッパー一覧を生成するツール", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 成績表を順位付けして上位者一覧を出力
    Rank {
        /// 成績表（xlsx/xls/ods/csv）
        #[arg(required = true)]
        marks: PathBuf,

        /// 写真マスタ（名簿）ファイル
        #[arg(short, long)]
        master: Option<PathBuf>,

        /// 表示人数（省略時は設定値）
        #[arg(short = 'n', long)]
        top: Option<usize>,

        /// 集計する教科（例: PHY,CHEM）。省略時は検出された全教科
        #[arg(short, long, value_delimiter = ',')]
        subjects: Vec<Subject>,

        /// 教科を対話的に選択
        #[arg(short, long)]
        interactive: bool,

        /// 出力形式 (json/excel/both)
        #[arg(short, long, default_value = "json")]
        format: ExportFormat,

        /// 出力ファイル/ディレクトリ
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// 受験番号を表示しない
        #[arg(long)]
        hide_id: bool,

        /// 学年（例: 12th）
        #[arg(long)]
        standard: Option<String>,

        /// コース (jee/neet/cet)
        #[arg(long)]
        batch: Option<Batch>,

        /// テスト種別（例: weekly）
        #[arg(long)]
        test_type: Option<String>,

        /// 満点
        #[arg(long)]
        test_marks: Option<u32>,

        /// シート見出しを上書き
        #[arg(long)]
        heading: Option<String>,
    },

    /// 名簿で受験番号の写真を検索
    Lookup {
        /// 写真マスタ（名簿）ファイル
        #[arg(required = true)]
        roster: PathBuf,

        /// 検索する受験番号
        #[arg(required = true)]
        ids: Vec<String>,
    },

    /// 設定を表示/編集
    Config {
        /// 設定を表示
        #[arg(long)]
        show: bool,

        /// 表示人数を設定
        #[arg(long)]
        set_top_n: Option<usize>,

        /// 受験番号の非表示を設定 (true/false)
        #[arg(long)]
        hide_id: Option<bool>,
    },
}

#[derive(Clone, Debug, Default, PartialEq)]
pub enum ExportFormat {
    #[default]
    Json,
    Excel,
    Both,
}

impl std::str::FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(ExportFormat::Json),
            "excel" | "xlsx" => Ok(ExportFormat::Excel),
            "both" => Ok(ExportFormat::Both),
            _ => Err(format!("Unknown format: {}. Use json, excel, or both", s)),
        }
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExportFormat::Json => write!(f, "json"),
            ExportFormat::Excel => write!(f, "excel"),
            ExportFormat::Both => write!(f, "both"),
        }
    }
}
