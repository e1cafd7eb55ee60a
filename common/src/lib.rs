//! EduRanker Common Library
//!
//! 成績表の列検出・順位付けと、名簿による写真の突き合わせ。
//! ファイル読み込みや表示は行わず、行データを受け取って結果を返す。

pub mod types;
pub mod error;
pub mod cell;
pub mod header;
pub mod columns;
pub mod trace;
pub mod ranking;
pub mod matcher;
pub mod heading;
pub mod title;
pub mod export;

pub use types::{CandidateRecord, CellValue, RawRow, Subject};
pub use error::{Error, Result, SheetKind};
pub use cell::parse_numeric;
pub use header::{locate_header, HeaderMatch};
pub use columns::{map_columns, ColumnMap, ColumnMatch, ColumnRole};
pub use trace::{DetectionTrace, SkipReason};
pub use ranking::{rank, rank_candidates, top_n, Candidate, MarksTable, SortKey};
pub use matcher::{build_lookup, resolve_photo, MatchStrategy, PhotoLookup};
pub use heading::extract_heading;
pub use title::{compose_subtitle, compose_title, Batch};
