use std::path::PathBuf;

use anyhow::{Result, anyhow};
use rand::SeedableRng;
use rand::rngs::StdRng;

use rally_insight::sample_log::{SampleLogConfig, generate_shot_log};
use rally_insight::shot_log::save_shot_log;

fn main() -> Result<()> {
    let mut out_path: Option<PathBuf> = None;
    let mut cfg = SampleLogConfig::default();
    let mut seed = 2026u64;

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--matches" => cfg.matches = parse_value(&mut args, "--matches")?,
            "--rallies" => cfg.rallies_per_match = parse_value(&mut args, "--rallies")?,
            "--max-rally-len" => cfg.max_rally_len = parse_value(&mut args, "--max-rally-len")?,
            "--seed" => seed = parse_value(&mut args, "--seed")?,
            "--open-tail" => cfg.leave_last_rally_open = true,
            other if other.starts_with("--") => {
                return Err(anyhow!("unknown flag {other}"));
            }
            other => out_path = Some(PathBuf::from(other)),
        }
    }

    let out_path = out_path.ok_or_else(|| {
        anyhow!("usage: gen_log <out.json> [--matches N] [--rallies N] [--max-rally-len N] [--seed N] [--open-tail]")
    })?;

    let mut rng = StdRng::seed_from_u64(seed);
    let shots = generate_shot_log(&cfg, &mut rng);
    save_shot_log(&out_path, &shots)?;

    println!("Sample shot log written");
    println!("Path: {}", out_path.display());
    println!("Matches: {}", cfg.matches);
    println!("Shots: {}", shots.len());
    Ok(())
}

fn parse_value<T: std::str::FromStr>(
    args: &mut impl Iterator<Item = String>,
    flag: &str,
) -> Result<T> {
    args.next()
        .and_then(|v| v.parse::<T>().ok())
        .ok_or_else(|| anyhow!("{flag} expects a numeric value"))
}
