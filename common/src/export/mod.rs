//! CLIの出力処理から使う共通の書き出し処理

#[cfg(feature = "excel")]
pub mod excel_core;
