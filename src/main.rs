use std::path::PathBuf;

use anyhow::{Result, anyhow};

use rally_insight::analysis::{AnalysisConfig, analyze_rallies, shot_distribution};
use rally_insight::export::{distinct_matches, distinct_players, export_report};
use rally_insight::shot_log::{load_shot_log, sort_by_recorded_at};

struct CliArgs {
    log_path: PathBuf,
    match_filter: Option<String>,
    player_filter: Option<String>,
    export_path: Option<PathBuf>,
    sort_time: bool,
    cfg: AnalysisConfig,
}

fn main() -> Result<()> {
    let args = parse_args()?;

    let mut shots = load_shot_log(&args.log_path)?;
    if args.sort_time && !sort_by_recorded_at(&mut shots) {
        eprintln!("[WARN] Log is not fully timestamped; keeping recorded order");
    }

    println!("Shot log: {}", args.log_path.display());
    println!(
        "Shots: {}  Matches: {}  Players: {}",
        shots.len(),
        distinct_matches(&shots).len(),
        distinct_players(&shots).len()
    );
    if let Some(match_id) = &args.match_filter {
        println!("Match filter: {match_id}");
    }
    if let Some(player) = &args.player_filter {
        println!("Player filter: {player}");
    }
    println!();

    let rallies = analyze_rallies(
        &shots,
        args.match_filter.as_deref(),
        args.player_filter.as_deref(),
        &args.cfg,
    );
    println!("Rallies");
    println!("  Completed: {}", rallies.total_rallies);
    println!("  In progress: {}", rallies.incomplete_rallies);
    println!("  Avg length: {:.2}", rallies.average_rally_count);
    let range = &rallies.rally_range_analysis;
    println!(
        "  Short (<= {} shots): {} rallies, {:.1}% won",
        rallies.short_rally_max, range.short.count, range.short.win_rate
    );
    println!(
        "  Long  (>  {} shots): {} rallies, {:.1}% won",
        rallies.short_rally_max, range.long.count, range.long.win_rate
    );
    if !rallies.miss_credits_opponent {
        println!("  (error-ended rallies excluded from win rates)");
    }
    println!();

    let dist = shot_distribution(
        &shots,
        args.match_filter.as_deref(),
        args.player_filter.as_deref(),
    );
    println!("Shots");
    println!("  Total: {}", dist.total_shots);
    println!("  Cross-court: {:.1}%", dist.cross_rate);
    println!(
        "  Errors: {:.1}%  Winners: {:.1}%",
        dist.miss_rate, dist.point_rate
    );
    println!(
        "  Placement: rear {:.1}%  mid {:.1}%  front {:.1}%",
        dist.rear_rate, dist.mid_rate, dist.front_rate
    );

    if let Some(export_path) = &args.export_path {
        let report = export_report(export_path, &shots, &[], &args.cfg)?;
        println!();
        println!("Exported {}", export_path.display());
        println!("Players: {}  Matches: {}", report.players, report.matches);
    }

    Ok(())
}

fn parse_args() -> Result<CliArgs> {
    let mut log_path: Option<PathBuf> = None;
    let mut match_filter = None;
    let mut player_filter = None;
    let mut export_path = None;
    let mut sort_time = false;
    let mut cfg = AnalysisConfig::default();

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--match" => match_filter = Some(expect_value(&mut args, "--match")?),
            "--player" => player_filter = Some(expect_value(&mut args, "--player")?),
            "--export" => export_path = Some(PathBuf::from(expect_value(&mut args, "--export")?)),
            "--short-max" => {
                cfg.short_rally_max = expect_value(&mut args, "--short-max")?
                    .parse()
                    .map_err(|_| anyhow!("--short-max expects a shot count"))?;
            }
            "--no-miss-credit" => cfg.miss_credits_opponent = false,
            "--sort-time" => sort_time = true,
            other if other.starts_with("--") => return Err(anyhow!("unknown flag {other}")),
            other => log_path = Some(PathBuf::from(other)),
        }
    }

    let log_path = log_path.ok_or_else(|| {
        anyhow!(
            "usage: rally_insight <shot_log.json> [--match ID] [--player ID] \
             [--short-max N] [--no-miss-credit] [--sort-time] [--export out.xlsx]"
        )
    })?;

    Ok(CliArgs {
        log_path,
        match_filter,
        player_filter,
        export_path,
        sort_time,
        cfg,
    })
}

fn expect_value(args: &mut impl Iterator<Item = String>, flag: &str) -> Result<String> {
    args.next().ok_or_else(|| anyhow!("{flag} expects a value"))
}
