use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::court::CourtZone;
use crate::shot::{Shot, ShotResult};

/// Loose mirror of a shot document as the hosted datastore returns it:
/// camelCase keys, everything optional. Mapped to the strict [`Shot`] at
/// this boundary so the aggregator never sees unknown fields.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawShot {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    match_id: Option<String>,
    #[serde(default)]
    hit_player: Option<String>,
    #[serde(default)]
    hit_area: Option<String>,
    #[serde(default)]
    is_cross: Option<bool>,
    #[serde(default)]
    result: Option<String>,
    #[serde(default)]
    recorded_at: Option<String>,
}

/// Parse a JSON shot-log snapshot. Records missing their id, match, or
/// striker are skipped with a warning; a single malformed record never
/// blanks the whole log. Unknown zone tags map to `Unclassified` and
/// unknown result tags to `in_play`.
pub fn parse_shot_log_json(raw: &str) -> Result<Vec<Shot>> {
    let rows: Vec<RawShot> = serde_json::from_str(raw).context("parse shot log json")?;
    let mut shots = Vec::with_capacity(rows.len());
    let mut skipped = 0usize;
    for row in rows {
        match shot_from_raw(row) {
            Some(shot) => shots.push(shot),
            None => skipped += 1,
        }
    }
    if skipped > 0 {
        eprintln!("[WARN] Skipped {skipped} shot records missing id/match/player");
    }
    Ok(shots)
}

fn shot_from_raw(raw: RawShot) -> Option<Shot> {
    let id = non_empty(raw.id)?;
    let match_id = non_empty(raw.match_id)?;
    let hit_player = non_empty(raw.hit_player)?;

    let hit_area = raw
        .hit_area
        .as_deref()
        .map(CourtZone::from_tag)
        .unwrap_or(CourtZone::Unclassified);
    let result = parse_result_tag(raw.result.as_deref());
    let recorded_at = raw.recorded_at.as_deref().and_then(parse_timestamp);

    Some(Shot {
        id,
        match_id,
        hit_player,
        hit_area,
        is_cross: raw.is_cross.unwrap_or(false),
        result,
        recorded_at,
    })
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

fn parse_result_tag(raw: Option<&str>) -> ShotResult {
    match raw.map(|s| s.trim().to_lowercase()).as_deref() {
        Some("point") => ShotResult::Point,
        Some("miss") => ShotResult::Miss,
        // Absent or unrecognized means the rally continued.
        _ => ShotResult::InPlay,
    }
}

fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw.trim())
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

pub fn load_shot_log(path: &Path) -> Result<Vec<Shot>> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("read shot log {}", path.display()))?;
    parse_shot_log_json(&raw)
}

pub fn save_shot_log(path: &Path, shots: &[Shot]) -> Result<()> {
    if let Some(parent) = path.parent() {
        let _ = fs::create_dir_all(parent);
    }
    let json = serde_json::to_string_pretty(shots).context("serialize shot log")?;
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, json).context("write shot log")?;
    fs::rename(&tmp, path).context("swap shot log")?;
    Ok(())
}

/// Explicit chronological ordering. Segmentation trusts input order, so this
/// only reorders when every shot carries a timestamp; a partially
/// timestamped log is left untouched and `false` is returned.
pub fn sort_by_recorded_at(shots: &mut [Shot]) -> bool {
    if shots.iter().any(|s| s.recorded_at.is_none()) {
        return false;
    }
    shots.sort_by_key(|s| s.recorded_at);
    true
}
