use serde::{Deserialize, Serialize};

use crate::court::DepthBand;
use crate::segment::{Rally, segment_rallies};
use crate::shot::{Shot, ShotResult};

pub const DEFAULT_SHORT_RALLY_MAX: usize = 4;

/// Tuning knobs for rally aggregation. `miss_credits_opponent` is the
/// attribution policy for rallies that end on an error: when on (the
/// default), the point goes to the non-striking side; when off, miss-ended
/// rallies are left out of win-rate attribution entirely.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct AnalysisConfig {
    pub short_rally_max: usize,
    pub miss_credits_opponent: bool,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            short_rally_max: DEFAULT_SHORT_RALLY_MAX,
            miss_credits_opponent: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct RangeBucket {
    pub count: usize,
    /// Percentage in [0, 100]; 0 when the bucket is empty.
    pub win_rate: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct RallyRangeAnalysis {
    pub short: RangeBucket,
    pub long: RangeBucket,
}

/// Aggregated rally statistics for one match/player scope. The attribution
/// policy and bucket threshold are echoed back so consumers of a serialized
/// report can tell which rules produced the numbers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RallyAnalysis {
    pub total_rallies: usize,
    pub incomplete_rallies: usize,
    pub average_rally_count: f64,
    pub rally_range_analysis: RallyRangeAnalysis,
    pub short_rally_max: usize,
    pub miss_credits_opponent: bool,
}

/// Raw shot-level rates for one player/match scope, independent of rally
/// segmentation. Depth rates use `total_shots` as the denominator, so shots
/// at the net or in unclassified zones keep rear/mid/front from summing to
/// 100 — by the same rule the three can never exceed it.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ShotDistribution {
    pub total_shots: usize,
    pub cross_rate: f64,
    pub miss_rate: f64,
    pub point_rate: f64,
    pub rear_rate: f64,
    pub mid_rate: f64,
    pub front_rate: f64,
}

/// Segment `shots` and aggregate rally statistics.
///
/// With a player filter, scope is the completed rallies in which that player
/// struck at least one shot; a rally the player never touched is out of
/// scope, not a loss. Without a player filter, each rally is scored from its
/// server's perspective (the opening striker), so the headline win rate
/// reads as "rallies won by the serving side".
///
/// Incomplete trailing runs are counted in `incomplete_rallies` and excluded
/// from every other figure. Total over any input: empty logs and filters
/// that match nothing produce zeroed output, never an error or a NaN.
pub fn analyze_rallies(
    shots: &[Shot],
    match_filter: Option<&str>,
    player_filter: Option<&str>,
    cfg: &AnalysisConfig,
) -> RallyAnalysis {
    let log = segment_rallies(shots, match_filter);

    let in_scope = |rally: &Rally| match player_filter {
        Some(player) => rally.involves(player),
        None => true,
    };
    let scoped: Vec<&Rally> = log.completed.iter().filter(|r| in_scope(r)).collect();
    let incomplete_rallies = log.incomplete.iter().filter(|r| in_scope(r)).count();

    let total_rallies = scoped.len();
    let shot_total: usize = scoped.iter().map(|r| r.len()).sum();
    let average_rally_count = if total_rallies > 0 {
        shot_total as f64 / total_rallies as f64
    } else {
        0.0
    };

    let mut short = BucketAccum::default();
    let mut long = BucketAccum::default();
    for rally in &scoped {
        let bucket = if rally.len() <= cfg.short_rally_max {
            &mut short
        } else {
            &mut long
        };
        bucket.count += 1;

        let perspective = match player_filter {
            Some(player) => Some(player),
            None => rally.server(),
        };
        let Some(perspective) = perspective else {
            continue;
        };
        match rally.outcome_for(perspective, cfg.miss_credits_opponent) {
            Some(true) => {
                bucket.attributed += 1;
                bucket.wins += 1;
            }
            Some(false) => bucket.attributed += 1,
            None => {}
        }
    }

    RallyAnalysis {
        total_rallies,
        incomplete_rallies,
        average_rally_count,
        rally_range_analysis: RallyRangeAnalysis {
            short: short.into_bucket(),
            long: long.into_bucket(),
        },
        short_rally_max: cfg.short_rally_max,
        miss_credits_opponent: cfg.miss_credits_opponent,
    }
}

/// Shot-level distribution over the raw (unsegmented) shot list, restricted
/// to the given match and/or player. A scope matching zero shots yields an
/// all-zero distribution.
pub fn shot_distribution(
    shots: &[Shot],
    match_filter: Option<&str>,
    player_filter: Option<&str>,
) -> ShotDistribution {
    let mut total = 0usize;
    let mut cross = 0usize;
    let mut miss = 0usize;
    let mut point = 0usize;
    let mut rear = 0usize;
    let mut mid = 0usize;
    let mut front = 0usize;

    for shot in shots {
        if let Some(wanted) = match_filter {
            if shot.match_id != wanted {
                continue;
            }
        }
        if let Some(player) = player_filter {
            if shot.hit_player != player {
                continue;
            }
        }
        total += 1;
        if shot.is_cross {
            cross += 1;
        }
        match shot.result {
            ShotResult::Miss => miss += 1,
            ShotResult::Point => point += 1,
            ShotResult::InPlay => {}
        }
        match shot.hit_area.depth_band() {
            Some(DepthBand::Rear) => rear += 1,
            Some(DepthBand::Mid) => mid += 1,
            Some(DepthBand::Front) => front += 1,
            None => {}
        }
    }

    ShotDistribution {
        total_shots: total,
        cross_rate: pct(cross, total),
        miss_rate: pct(miss, total),
        point_rate: pct(point, total),
        rear_rate: pct(rear, total),
        mid_rate: pct(mid, total),
        front_rate: pct(front, total),
    }
}

#[derive(Default)]
struct BucketAccum {
    count: usize,
    attributed: usize,
    wins: usize,
}

impl BucketAccum {
    fn into_bucket(self) -> RangeBucket {
        RangeBucket {
            count: self.count,
            win_rate: pct(self.wins, self.attributed),
        }
    }
}

fn pct(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64 * 100.0
    }
}
