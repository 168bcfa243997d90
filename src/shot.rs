use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::court::CourtZone;

/// How a shot ended, or didn't. `Point` wins the rally for its striker,
/// `Miss` ends the rally against its striker. Everything else is `InPlay`,
/// which is also the default when the datastore record carries no result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ShotResult {
    #[default]
    InPlay,
    Point,
    Miss,
}

impl ShotResult {
    /// A terminal result closes the rally that contains it.
    pub fn is_terminal(self) -> bool {
        matches!(self, ShotResult::Point | ShotResult::Miss)
    }
}

/// One recorded contact with the shuttle. Append-only input: the analysis
/// core only ever reads a snapshot the caller hands it. Order within a match
/// is the only signal used to reconstruct rallies, so callers must pass
/// shots in the order they were recorded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shot {
    pub id: String,
    pub match_id: String,
    pub hit_player: String,
    pub hit_area: CourtZone,
    pub is_cross: bool,
    pub result: ShotResult,
    pub recorded_at: Option<DateTime<Utc>>,
}

impl Shot {
    pub fn new(
        id: impl Into<String>,
        match_id: impl Into<String>,
        hit_player: impl Into<String>,
        hit_area: CourtZone,
        is_cross: bool,
        result: ShotResult,
    ) -> Self {
        Self {
            id: id.into(),
            match_id: match_id.into(),
            hit_player: hit_player.into(),
            hit_area,
            is_cross,
            result,
            recorded_at: None,
        }
    }
}
