//! 成績表の読み込みから順位付け・写真照合までの統合テスト

mod support;

use eduranker::leaderboard::{build_leaderboard, LeaderboardOptions};
use eduranker::marks::load_marks;
use eduranker::matcher::load_master;
use eduranker_common::{MatchStrategy, Subject};
use support::{write_workbook, write_workbook_at};
use tempfile::tempdir;

fn marks_rows() -> Vec<Vec<&'static str>> {
    vec![
        vec!["PCM JEE CT-1 Marks Score List"],
        vec![],
        vec!["SR", "CANDIDATE ID", "CANDIDATE NAME", "PHY SEC A", "PHY", "CHEM", "MATHS", "TOTAL"],
        vec!["1", "00123", "Riya Sharma", "20", "80", "70", "90", "240"],
        vec!["2", "456", "Arjun Mehta", "25", "90", "60", "90", "240"],
        vec!["3", "789", "Kabir Rao", "10", "45/50", "JEE - 1", "40", "85"],
        vec!["", "", "", "", "", "", "", ""],
        vec!["4", "1024", "Anaya Iyer", "30", "100", "95", "30", "225"],
    ]
}

#[test]
fn test_rank_pipeline_from_workbook() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("marks.xlsx");
    write_workbook(&path, &marks_rows());

    let loaded = load_marks(&path).expect("成績表の読み込みに失敗");
    assert_eq!(loaded.heading.as_deref(), Some("PCM JEE CT-1 Marks Score List"));
    assert_eq!(loaded.table.trace().header_index, 2);
    assert_eq!(
        loaded.table.subjects_detected(),
        vec![Subject::Phy, Subject::Chem, Subject::Maths]
    );

    let ranked = loaded.table.rank_all();
    let names: Vec<&str> = ranked.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["Arjun Mehta", "Riya Sharma", "Anaya Iyer", "Kabir Rao"]);
    let ranks: Vec<u32> = ranked.iter().map(|r| r.rank).collect();
    assert_eq!(ranks, vec![1, 1, 2, 3]);

    // "PHY SEC A" ではなく "PHY" 列、ラベルは0点
    let kabir = &ranked[3];
    assert_eq!(kabir.score(Subject::Phy), 45.0);
    assert_eq!(kabir.score(Subject::Chem), 0.0);
    assert_eq!(kabir.total, 85.0);
    assert_eq!(ranked[1].candidate_id, "123");
}

#[test]
fn test_subject_filter_reranks_all_rows() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("marks.xlsx");
    write_workbook(&path, &marks_rows());
    let loaded = load_marks(&path).unwrap();

    let top_two = &loaded.table.rank_all()[..2];
    assert!(top_two.iter().all(|r| r.name != "Anaya Iyer"));

    let chem = loaded.table.rank(&[Subject::Chem]);
    assert_eq!(chem[0].name, "Anaya Iyer");
    assert_eq!(chem[0].total, 95.0);
    assert!(chem.iter().all(|r| r.subjects.len() == 1));
}

#[test]
fn test_sheet_not_starting_at_a1() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("offset.xlsx");
    write_workbook_at(
        &path,
        3,
        2,
        &[
            vec!["Roll No", "Student Name", "Biology"],
            vec!["11", "Zoya", "88"],
            vec!["12", "Aman", "88"],
        ],
    );

    let loaded = load_marks(&path).unwrap();
    assert_eq!(loaded.heading, None);
    assert_eq!(loaded.table.trace().header_index, 3);
    assert_eq!(loaded.table.trace().id_column, "C");

    let ranked = loaded.table.rank_all();
    assert_eq!(ranked[0].name, "Aman");
    assert_eq!(ranked[1].rank, 1);
}

#[test]
fn test_master_lookup_and_leaderboard() {
    let dir = tempdir().expect("Failed to create temp dir");
    let marks_path = dir.path().join("marks.xlsx");
    let master_path = dir.path().join("master.xlsx");
    write_workbook(&marks_path, &marks_rows());
    write_workbook(
        &master_path,
        &[
            vec!["Candidate ID", "Name", "Photo Link"],
            vec!["123", "Riya", "https://drive.google.com/file/d/riya01/view?usp=sharing"],
            vec!["00456", "Arjun", "https://drive.google.com/open?id=arjun02"],
            vec!["", "Nobody", "https://example.com/x.jpg"],
            vec!["991024", "Anaya", "https://cdn.example.com/anaya.jpg"],
        ],
    );

    let lookup = load_master(&master_path).expect("名簿の読み込みに失敗");
    assert_eq!(lookup.stats().mapped, 3);
    assert_eq!(lookup.stats().skipped_no_id, 1);
    assert_eq!(
        lookup.resolve_with_strategy("1024").map(|(_, s)| s),
        Some(MatchStrategy::Suffix)
    );

    let loaded = load_marks(&marks_path).unwrap();
    let subjects = loaded.table.subjects_detected();
    let ranked = loaded.table.rank(&subjects);
    let options = LeaderboardOptions {
        top_n: 6,
        heading: loaded.heading.clone(),
        ..Default::default()
    };
    let board = build_leaderboard(&ranked, &subjects, Some(&lookup), &options);

    assert_eq!(board.title, "PCM TOPPERS");
    assert_eq!(board.subtitle.as_deref(), Some("PCM JEE CT-1 Marks Score List"));
    assert_eq!(board.entries.len(), 6);
    assert_eq!(
        board.entries[0].photo.as_deref(),
        Some("https://drive.google.com/uc?export=view&id=arjun02")
    );
    assert_eq!(
        board.entries[1].photo.as_deref(),
        Some("https://drive.google.com/uc?export=view&id=riya01")
    );
    assert_eq!(board.entries[2].photo.as_deref(), Some("https://cdn.example.com/anaya.jpg"));
    assert_eq!(board.entries[3].photo, None);
    assert_eq!(board.entries[3].initials, "KR");
    assert!(board.entries[4].placeholder);
    assert_eq!(board.entries[4].rank, 4);
    assert_eq!(board.entries[5].rank, 5);
}

#[test]
fn test_master_with_title_row_is_rekeyed() {
    let dir = tempdir().expect("Failed to create temp dir");
    let master_path = dir.path().join("master.xlsx");
    write_workbook(
        &master_path,
        &[
            vec!["Student Master 2024-25"],
            vec!["Roll No", "Image"],
            vec!["789", "https://cdn.example.com/789.png"],
        ],
    );

    let lookup = load_master(&master_path).unwrap();
    assert_eq!(lookup.resolve("789"), Some("https://cdn.example.com/789.png"));
}
