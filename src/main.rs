use clap::Parser;
use eduranker::{cli, config, error, export, interactive, leaderboard, marks, matcher};
use cli::{Cli, Commands};
use config::Config;
use eduranker_common::Subject;
use error::{EduRankError, Result};
use indicatif::{ProgressBar, ProgressStyle};
use leaderboard::LeaderboardOptions;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

fn main() {
    if let Err(e) = run() {
        eprintln!("✖ {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let config = Config::load()?;

    match cli.command {
        Commands::Rank {
            marks: marks_path,
            master,
            top,
            subjects,
            interactive: pick_subjects,
            format,
            output,
            hide_id,
            standard,
            batch,
            test_type,
            test_marks,
            heading,
        } => {
            println!("🏆 eduranker - トッパー一覧\n");

            // 1. 成績表読み込み
            println!("[1/3] 成績表を読み込み中...");
            let sp = spinner(&format!("{} を解析中", marks_path.display()));
            let loaded = marks::load_marks(&marks_path);
            sp.finish_and_clear();
            let loaded = loaded?;

            let detected = loaded.table.subjects_detected();
            println!(
                "✔ {}名の受験者を検出（シート: {} / 教科: {}）\n",
                loaded.table.candidates().len(),
                loaded.grid.name(),
                interactive::subject_list(&detected)
            );

            // 2. 教科選択・順位付け
            println!("[2/3] 順位付け中...");
            let requested = if subjects.is_empty() { config.default_subjects.clone() } else { subjects };
            let included = if pick_subjects {
                interactive::select_subjects(&detected, &requested)?
            } else {
                included_subjects(&detected, &requested)?
            };
            let ranked = loaded.table.rank(&included);
            println!("✔ {} で順位付け完了\n", interactive::subject_list(&included));

            // 3. 写真照合・出力
            println!("[3/3] 一覧を出力中...");
            let lookup = match master {
                Some(master_path) => {
                    let sp = spinner("名簿を読み込み中");
                    let lookup = matcher::load_master(&master_path);
                    sp.finish_and_clear();
                    let lookup = lookup?;
                    println!("✔ 名簿から{}件の写真を登録", lookup.stats().mapped);
                    Some(lookup)
                }
                None => None,
            };

            let options = LeaderboardOptions {
                top_n: top.unwrap_or(config.top_n),
                hide_candidate_id: hide_id || config.hide_candidate_id,
                placeholder_name: config.placeholder_name.clone(),
                standard,
                batch,
                test_type,
                test_marks,
                heading: heading.or(loaded.heading),
            };
            let board = leaderboard::build_leaderboard(&ranked, &included, lookup.as_ref(), &options);

            let output_dir = output.unwrap_or_else(|| PathBuf::from("."));
            export::export_leaderboard(&board, &format, &output_dir)?;

            println!("\n{}", board.title);
            if let Some(subtitle) = &board.subtitle {
                println!("{}", subtitle);
            }
            for entry in board.entries.iter().filter(|e| !e.placeholder) {
                let score = entry
                    .total
                    .or_else(|| included.first().and_then(|s| entry.subjects.get(s).copied()))
                    .map(eduranker_common::types::format_number)
                    .unwrap_or_default();
                let photo = if entry.photo.is_some() { "📷" } else { "  " };
                println!("  {:>3}. {} {:<28} {:>6}", entry.rank, photo, entry.name, score);
            }

            println!("\n✅ 完了");
        }

        Commands::Lookup { roster, ids } => {
            println!("🔎 eduranker - 写真検索\n");

            let lookup = matcher::load_master(&roster)?;
            let stats = lookup.stats();
            println!(
                "✔ 名簿 {}行 / 登録 {}件（受験番号なし {}件, 写真なし {}件）\n",
                stats.rows, stats.mapped, stats.skipped_no_id, stats.skipped_no_photo
            );

            for id in &ids {
                match lookup.resolve_with_strategy(id) {
                    Some((photo, strategy)) => println!("  {} → [{}] {}", id, strategy, photo),
                    None => println!("  {} → 見つかりません", id),
                }
            }
        }

        Commands::Config { show, set_top_n, hide_id } => {
            let mut config = config;
            let mut changed = false;

            if let Some(top_n) = set_top_n {
                config.set_top_n(top_n)?;
                changed = true;
                println!("✔ 表示人数を設定しました: {}", top_n);
            }

            if let Some(hide) = hide_id {
                config.hide_candidate_id = hide;
                changed = true;
                println!("✔ 受験番号の非表示を設定しました: {}", hide);
            }

            if changed {
                config.save()?;
            }

            if show || !changed {
                println!("設定:");
                println!("  表示人数: {}", config.top_n);
                println!("  受験番号: {}", if config.hide_candidate_id { "非表示" } else { "表示" });
                println!("  既定の教科: {}", interactive::subject_list(&config.default_subjects));
                println!("  空欄の表示名: {}", config.placeholder_name);
                println!("  設定ファイル: {}", Config::config_path()?.display());
            }
        }
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn spinner(message: &str) -> ProgressBar {
    let sp = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner:.green} {msg} [{elapsed}]") {
        sp.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"));
    }
    sp.set_message(message.to_string());
    sp.enable_steady_tick(std::time::Duration::from_millis(80));
    sp
}

/// 指定された教科のうち検出済みのもの（指定なしは全教科）
fn included_subjects(detected: &[Subject], requested: &[Subject]) -> Result<Vec<Subject>> {
    if requested.is_empty() {
        return Ok(detected.to_vec());
    }

    for subject in requested.iter().filter(|s| !detected.contains(s)) {
        tracing::warn!(subject = %subject, "指定された教科の列が成績表にありません");
    }
    let included: Vec<Subject> = detected.iter().filter(|s| requested.contains(s)).copied().collect();
    if included.is_empty() {
        return Err(EduRankError::NoSubjects(interactive::subject_list(detected)));
    }
    Ok(included)
}
