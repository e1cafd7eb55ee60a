use crate::error::{EduRankError, Result};
use eduranker_common::Subject;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 一覧に載せる人数
    pub top_n: usize,
    pub hide_candidate_id: bool,
    /// 空の場合は検出された全教科
    pub default_subjects: Vec<Subject>,
    /// 人数が足りない場合の空欄の表示名
    pub placeholder_name: String,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_config()
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(config_path: &Path) -> Result<Self> {
        if config_path.exists() {
            let content = std::fs::read_to_string(config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default_config())
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| EduRankError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("eduranker").join("config.json"))
    }

    fn default_config() -> Self {
        Self {
            top_n: 10,
            hide_candidate_id: false,
            default_subjects: Vec::new(),
            placeholder_name: "-".into(),
        }
    }

    pub fn set_top_n(&mut self, top_n: usize) -> Result<()> {
        if top_n == 0 {
            return Err(EduRankError::Config("表示人数は1以上を指定してください".into()));
        }
        self.top_n = top_n;
        Ok(())
    }
}
