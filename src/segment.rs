use std::collections::HashMap;

use crate::shot::{Shot, ShotResult};

/// A maximal run of shots within one match, where only the last shot may
/// carry a terminal result. Derived and transient: recomputed on every
/// aggregation call, never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct Rally {
    pub shots: Vec<Shot>,
}

impl Rally {
    pub fn len(&self) -> usize {
        self.shots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shots.is_empty()
    }

    /// The closing shot, if this rally has one. Incomplete rallies don't.
    pub fn terminal(&self) -> Option<&Shot> {
        self.shots.last().filter(|s| s.result.is_terminal())
    }

    /// Striker of the opening shot. In badminton that is the server.
    pub fn server(&self) -> Option<&str> {
        self.shots.first().map(|s| s.hit_player.as_str())
    }

    pub fn involves(&self, player: &str) -> bool {
        self.shots.iter().any(|s| s.hit_player == player)
    }

    /// Did `player`'s side win this rally? `Some(true)`/`Some(false)` for an
    /// attributable completed rally; `None` for an incomplete rally, or for
    /// a miss-ended rally when `miss_credits_opponent` is off (in which case
    /// the rally is left unattributed rather than guessed at).
    pub fn outcome_for(&self, player: &str, miss_credits_opponent: bool) -> Option<bool> {
        let terminal = self.terminal()?;
        match terminal.result {
            ShotResult::Point => Some(terminal.hit_player == player),
            ShotResult::Miss => {
                if miss_credits_opponent {
                    Some(terminal.hit_player != player)
                } else {
                    None
                }
            }
            ShotResult::InPlay => None,
        }
    }
}

/// Segmentation output. `incomplete` holds trailing runs that never saw a
/// terminal shot; they are reported here so callers can surface a
/// "rally in progress" figure, but aggregates exclude them.
#[derive(Debug, Clone, Default)]
pub struct SegmentedLog {
    pub completed: Vec<Rally>,
    pub incomplete: Vec<Rally>,
}

impl SegmentedLog {
    /// All shots the segmentation consumed, in consumption order. Completed
    /// rallies come in closing order, then incomplete ones; within one match
    /// this reproduces the filtered input exactly.
    pub fn all_shots(&self) -> Vec<&Shot> {
        self.completed
            .iter()
            .chain(self.incomplete.iter())
            .flat_map(|r| r.shots.iter())
            .collect()
    }
}

/// Split an ordered shot log into rallies. A shot whose result is `point` or
/// `miss` closes the current rally, inclusive of itself. With no match
/// filter, every match in the log is segmented independently: logs that
/// interleave shots from several matches never produce a rally that spans
/// matches. Boundaries depend only on input order and `result` values.
pub fn segment_rallies(shots: &[Shot], match_filter: Option<&str>) -> SegmentedLog {
    let mut completed: Vec<Rally> = Vec::new();
    let mut open: HashMap<&str, Vec<Shot>> = HashMap::new();
    // First-seen match order, so leftover buffers report deterministically.
    let mut match_order: Vec<&str> = Vec::new();

    for shot in shots {
        if let Some(wanted) = match_filter {
            if shot.match_id != wanted {
                continue;
            }
        }
        let buf = open.entry(shot.match_id.as_str()).or_insert_with(|| {
            match_order.push(shot.match_id.as_str());
            Vec::new()
        });
        buf.push(shot.clone());
        if shot.result.is_terminal() {
            completed.push(Rally {
                shots: std::mem::take(buf),
            });
        }
    }

    let mut incomplete = Vec::new();
    for match_id in match_order {
        if let Some(buf) = open.remove(match_id) {
            if !buf.is_empty() {
                incomplete.push(Rally { shots: buf });
            }
        }
    }

    SegmentedLog {
        completed,
        incomplete,
    }
}
