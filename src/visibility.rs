use serde::{Deserialize, Serialize};

use crate::analysis::{
    AnalysisConfig, RallyAnalysis, ShotDistribution, analyze_rallies, shot_distribution,
};
use crate::shot::Shot;

/// A profile's declared analysis privacy, as stored on the profile document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrivacyLevel {
    Public,
    FriendsOnly,
    Private,
}

/// The viewer's relationship to the profile being viewed, resolved by the
/// surrounding application before any analysis call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewerRelation {
    Owner,
    Friend,
    Stranger,
}

/// The single boolean gate: may this viewer see this profile's statistics?
/// Owners always may; there is no partial-disclosure mode below this.
pub fn can_view_analysis(level: PrivacyLevel, viewer: ViewerRelation) -> bool {
    match viewer {
        ViewerRelation::Owner => true,
        ViewerRelation::Friend => level != PrivacyLevel::Private,
        ViewerRelation::Stranger => level == PrivacyLevel::Public,
    }
}

/// Gated aggregation: when the gate denies, returns `None` without reading
/// the shot data at all.
pub fn analyze_rallies_gated(
    level: PrivacyLevel,
    viewer: ViewerRelation,
    shots: &[Shot],
    match_filter: Option<&str>,
    player_filter: Option<&str>,
    cfg: &AnalysisConfig,
) -> Option<RallyAnalysis> {
    if !can_view_analysis(level, viewer) {
        return None;
    }
    Some(analyze_rallies(shots, match_filter, player_filter, cfg))
}

/// Gated counterpart of [`shot_distribution`].
pub fn shot_distribution_gated(
    level: PrivacyLevel,
    viewer: ViewerRelation,
    shots: &[Shot],
    match_filter: Option<&str>,
    player_filter: Option<&str>,
) -> Option<ShotDistribution> {
    if !can_view_analysis(level, viewer) {
        return None;
    }
    Some(shot_distribution(shots, match_filter, player_filter))
}
