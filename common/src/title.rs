//! 成績一覧のタイトル・サブタイトル
//!
//! 例: `12TH JEE PCM TOPPERS` / `Weekly Test    Total Marks: 300`

use crate::error::{Error, Result};
use crate::types::Subject;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 受験コース
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Batch {
    Jee,
    Neet,
    Cet,
}

impl Batch {
    /// タイトルに表示するラベル（NEET は PCB と表示）
    pub fn label(&self) -> &'static str {
        match self {
            Batch::Jee => "JEE",
            Batch::Neet => "PCB",
            Batch::Cet => "CET",
        }
    }
}

impl fmt::Display for Batch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Batch::Jee => "jee",
            Batch::Neet => "neet",
            Batch::Cet => "cet",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for Batch {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "jee" => Ok(Batch::Jee),
            "neet" => Ok(Batch::Neet),
            "cet" => Ok(Batch::Cet),
            other => Err(Error::Config(format!("Unknown batch: {} (expected jee, neet or cet)", other))),
        }
    }
}

/// タイトルを組み立てる
pub fn compose_title(subjects: &[Subject], standard: Option<&str>, batch: Option<Batch>) -> String {
    let mut prefix = String::new();
    if let Some(standard) = standard.map(str::trim).filter(|s| !s.is_empty()) {
        prefix.push_str(&standard.to_uppercase());
        prefix.push(' ');
    }
    if let Some(batch) = batch {
        prefix.push_str(batch.label());
        prefix.push(' ');
    }

    let present: Vec<Subject> = Subject::ALL.into_iter().filter(|s| subjects.contains(s)).collect();
    let subject_part = match batch {
        Some(Batch::Neet) => neet_subject_part(&present),
        _ => subject_part(&present),
    };

    if subject_part.is_empty() {
        format!("{}TOPPERS LIST", prefix)
    } else {
        format!("{}{} TOPPERS", prefix, subject_part)
    }
}

/// サブタイトル（テスト種別・満点）。どちらも無ければシート見出し
pub fn compose_subtitle(test_type: Option<&str>, test_marks: Option<u32>, heading: Option<&str>) -> Option<String> {
    let mut parts = Vec::new();
    if let Some(test_type) = test_type.map(str::trim).filter(|s| !s.is_empty()) {
        parts.push(format!("{} Test", capitalize(test_type)));
    }
    if let Some(marks) = test_marks {
        parts.push(format!("Total Marks: {}", marks));
    }

    if parts.is_empty() {
        heading
            .map(str::trim)
            .filter(|h| !h.is_empty())
            .map(str::to_string)
    } else {
        Some(parts.join("    "))
    }
}

fn combo_abbreviation(present: &[Subject]) -> Option<&'static str> {
    use Subject::*;
    match present {
        [Phy, Chem, Maths] => Some("PCM"),
        [Phy, Chem, Bio] => Some("PCB"),
        [_, _, _, _] => Some("PCMB"),
        _ => None,
    }
}

fn subject_part(present: &[Subject]) -> String {
    if let Some(combo) = combo_abbreviation(present) {
        return combo.to_string();
    }
    match present {
        [] => String::new(),
        [single] => single.full_name().to_string(),
        _ => present.iter().map(Subject::code).collect::<Vec<_>>().join(" + "),
    }
}

fn neet_subject_part(present: &[Subject]) -> String {
    let joined = present.iter().map(Subject::code).collect::<Vec<_>>().join("+");
    match combo_abbreviation(present) {
        Some(combo) => format!("{} {}", combo, joined),
        None => joined,
    }
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
