//! 対話式の教科選択
//!
//! 選択が変わった場合は呼び出し側で全受験者を順位付けし直すこと。

use crate::error::{EduRankError, Result};
use dialoguer::MultiSelect;
use eduranker_common::Subject;

/// 検出された教科から集計対象を選ぶ
pub fn select_subjects(detected: &[Subject], preselected: &[Subject]) -> Result<Vec<Subject>> {
    let labels: Vec<String> = detected
        .iter()
        .map(|s| format!("{} ({})", s.code(), s.full_name()))
        .collect();

    let indices = MultiSelect::new()
        .with_prompt("集計する教科を選択（スペースで切替、Enterで決定）")
        .items(&labels)
        .defaults(&selection_defaults(detected, preselected))
        .interact()
        .map_err(|e| EduRankError::CliExecution(e.to_string()))?;

    let selected = subjects_from_indices(detected, &indices);
    if selected.is_empty() {
        return Err(EduRankError::NoSubjects(subject_list(detected)));
    }
    Ok(selected)
}

/// 初期選択（指定が無ければ全教科）
pub fn selection_defaults(detected: &[Subject], preselected: &[Subject]) -> Vec<bool> {
    detected
        .iter()
        .map(|s| preselected.is_empty() || preselected.contains(s))
        .collect()
}

pub fn subjects_from_indices(detected: &[Subject], indices: &[usize]) -> Vec<Subject> {
    detected
        .iter()
        .enumerate()
        .filter(|(i, _)| indices.contains(i))
        .map(|(_, s)| *s)
        .collect()
}

/// "PHY, CHEM" 形式
pub fn subject_list(subjects: &[Subject]) -> String {
    if subjects.is_empty() {
        return "なし".to_string();
    }
    subjects.iter().map(Subject::code).collect::<Vec<_>>().join(", ")
}
