use std::collections::BTreeSet;
use std::path::Path;

use anyhow::{Context, Result};
use rayon::prelude::*;
use rust_xlsxwriter::{Workbook, Worksheet};

use crate::analysis::{
    AnalysisConfig, RallyAnalysis, ShotDistribution, analyze_rallies, shot_distribution,
};
use crate::shot::Shot;

pub struct ExportReport {
    pub players: usize,
    pub matches: usize,
}

/// Write one workbook with per-player rally and shot sheets plus a per-match
/// overview. Per-player aggregation is independent, so it runs in parallel.
pub fn export_report(
    path: &Path,
    shots: &[Shot],
    players: &[String],
    cfg: &AnalysisConfig,
) -> Result<ExportReport> {
    let players: Vec<String> = if players.is_empty() {
        distinct_players(shots)
    } else {
        players.to_vec()
    };
    let matches = distinct_matches(shots);

    let per_player: Vec<(String, RallyAnalysis, ShotDistribution)> = players
        .par_iter()
        .map(|player| {
            let rallies = analyze_rallies(shots, None, Some(player), cfg);
            let dist = shot_distribution(shots, None, Some(player));
            (player.clone(), rallies, dist)
        })
        .collect();

    let mut rally_rows = vec![vec![
        "Player".to_string(),
        "Rallies".to_string(),
        "In Progress".to_string(),
        "Avg Rally Length".to_string(),
        "Short Count".to_string(),
        "Short Win %".to_string(),
        "Long Count".to_string(),
        "Long Win %".to_string(),
    ]];
    let mut shot_rows = vec![vec![
        "Player".to_string(),
        "Shots".to_string(),
        "Cross %".to_string(),
        "Miss %".to_string(),
        "Point %".to_string(),
        "Rear %".to_string(),
        "Mid %".to_string(),
        "Front %".to_string(),
    ]];

    for (player, rallies, dist) in &per_player {
        rally_rows.push(rally_row(player, rallies));
        shot_rows.push(shot_row(player, dist));
    }

    let mut match_rows = vec![vec![
        "Match".to_string(),
        "Shots".to_string(),
        "Rallies".to_string(),
        "In Progress".to_string(),
        "Avg Rally Length".to_string(),
    ]];
    for match_id in &matches {
        let summary = analyze_rallies(shots, Some(match_id), None, cfg);
        let match_shots = shots.iter().filter(|s| &s.match_id == match_id).count();
        match_rows.push(vec![
            match_id.clone(),
            match_shots.to_string(),
            summary.total_rallies.to_string(),
            summary.incomplete_rallies.to_string(),
            format!("{:.2}", summary.average_rally_count),
        ]);
    }

    let mut workbook = Workbook::new();
    {
        let sheet = workbook.add_worksheet();
        sheet.set_name("Rallies")?;
        write_rows(sheet, &rally_rows)?;
    }
    {
        let sheet = workbook.add_worksheet();
        sheet.set_name("Shots")?;
        write_rows(sheet, &shot_rows)?;
    }
    {
        let sheet = workbook.add_worksheet();
        sheet.set_name("Matches")?;
        write_rows(sheet, &match_rows)?;
    }

    workbook
        .save(path)
        .with_context(|| format!("save workbook {}", path.display()))?;

    Ok(ExportReport {
        players: players.len(),
        matches: matches.len(),
    })
}

fn rally_row(player: &str, analysis: &RallyAnalysis) -> Vec<String> {
    let range = &analysis.rally_range_analysis;
    vec![
        player.to_string(),
        analysis.total_rallies.to_string(),
        analysis.incomplete_rallies.to_string(),
        format!("{:.2}", analysis.average_rally_count),
        range.short.count.to_string(),
        format!("{:.1}", range.short.win_rate),
        range.long.count.to_string(),
        format!("{:.1}", range.long.win_rate),
    ]
}

fn shot_row(player: &str, dist: &ShotDistribution) -> Vec<String> {
    vec![
        player.to_string(),
        dist.total_shots.to_string(),
        format!("{:.1}", dist.cross_rate),
        format!("{:.1}", dist.miss_rate),
        format!("{:.1}", dist.point_rate),
        format!("{:.1}", dist.rear_rate),
        format!("{:.1}", dist.mid_rate),
        format!("{:.1}", dist.front_rate),
    ]
}

pub fn distinct_players(shots: &[Shot]) -> Vec<String> {
    let set: BTreeSet<&str> = shots.iter().map(|s| s.hit_player.as_str()).collect();
    set.into_iter().map(|s| s.to_string()).collect()
}

pub fn distinct_matches(shots: &[Shot]) -> Vec<String> {
    let set: BTreeSet<&str> = shots.iter().map(|s| s.match_id.as_str()).collect();
    set.into_iter().map(|s| s.to_string()).collect()
}

fn write_rows(worksheet: &mut Worksheet, rows: &[Vec<String>]) -> Result<()> {
    for (row_idx, row) in rows.iter().enumerate() {
        for (col_idx, value) in row.iter().enumerate() {
            worksheet
                .write_string(row_idx as u32, col_idx as u16, value)
                .with_context(|| format!("write cell ({row_idx},{col_idx})"))?;
        }
    }
    Ok(())
}
