use chrono::{DateTime, Duration as ChronoDuration, TimeZone, Utc};
use rand::Rng;

use crate::court::CourtZone;
use crate::shot::{Shot, ShotResult};

const ROSTER: &[&str] = &["ayumi", "bram", "chen", "diya", "emil", "farah"];

const ZONES: &[CourtZone] = &[
    CourtZone::FrontLeft,
    CourtZone::FrontCenter,
    CourtZone::FrontRight,
    CourtZone::MidLeft,
    CourtZone::MidCenter,
    CourtZone::MidRight,
    CourtZone::RearLeft,
    CourtZone::RearCenter,
    CourtZone::RearRight,
    CourtZone::Net,
];

#[derive(Debug, Clone, Copy)]
pub struct SampleLogConfig {
    pub matches: usize,
    pub rallies_per_match: usize,
    pub max_rally_len: usize,
    /// Leave the last rally of each match unterminated, as a live log would.
    pub leave_last_rally_open: bool,
}

impl Default for SampleLogConfig {
    fn default() -> Self {
        Self {
            matches: 3,
            rallies_per_match: 20,
            max_rally_len: 12,
            leave_last_rally_open: false,
        }
    }
}

/// Generate a plausible multi-match shot log for demos, benches, and tests.
/// Deterministic under a seeded rng.
pub fn generate_shot_log(cfg: &SampleLogConfig, rng: &mut impl Rng) -> Vec<Shot> {
    let mut shots = Vec::new();
    let base = Utc
        .with_ymd_and_hms(2026, 3, 1, 18, 0, 0)
        .single()
        .unwrap_or(DateTime::UNIX_EPOCH);
    let mut tick = 0i64;

    for match_idx in 0..cfg.matches {
        let match_id = format!("match-{:03}", match_idx + 1);
        let side_a = ROSTER[match_idx % ROSTER.len()];
        let side_b = ROSTER[(match_idx + 1) % ROSTER.len()];
        let mut server = side_a;

        for rally_idx in 0..cfg.rallies_per_match {
            let len = rng.gen_range(1..=cfg.max_rally_len.max(1));
            let open_tail = cfg.leave_last_rally_open && rally_idx + 1 == cfg.rallies_per_match;

            for shot_idx in 0..len {
                let striker = if shot_idx % 2 == 0 {
                    server
                } else if server == side_a {
                    side_b
                } else {
                    side_a
                };
                let last = shot_idx + 1 == len;
                let result = if last && !open_tail {
                    if rng.gen_bool(0.55) {
                        ShotResult::Point
                    } else {
                        ShotResult::Miss
                    }
                } else {
                    ShotResult::InPlay
                };

                tick += rng.gen_range(1..=4);
                let mut shot = Shot::new(
                    format!("{match_id}-r{rally_idx:03}-s{shot_idx:02}"),
                    match_id.clone(),
                    striker,
                    ZONES[rng.gen_range(0..ZONES.len())],
                    rng.gen_bool(0.35),
                    result,
                );
                shot.recorded_at = Some(base + ChronoDuration::seconds(tick));
                shots.push(shot);
            }

            // Winner serves next; close enough for sample data.
            if rng.gen_bool(0.5) {
                server = if server == side_a { side_b } else { side_a };
            }
        }
    }

    shots
}
