use std::fs;
use std::path::PathBuf;

use rally_insight::analysis::{AnalysisConfig, analyze_rallies, shot_distribution};
use rally_insight::shot::Shot;
use rally_insight::shot_log::parse_shot_log_json;
use rally_insight::visibility::{PrivacyLevel, ViewerRelation, analyze_rallies_gated};

fn fixture_shots() -> Vec<Shot> {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests/fixtures/shot_log_small.json");
    let raw = fs::read_to_string(path).expect("fixture file should be readable");
    parse_shot_log_json(&raw).expect("fixture should parse")
}

fn close_to(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn unfiltered_analysis_scores_from_the_servers_side() {
    let shots = fixture_shots();
    let out = analyze_rallies(&shots, None, None, &AnalysisConfig::default());

    assert_eq!(out.total_rallies, 4);
    assert_eq!(out.incomplete_rallies, 1);
    assert!(close_to(out.average_rally_count, 11.0 / 4.0));

    let range = &out.rally_range_analysis;
    // Short rallies (3, 1, 2 shots): all three won by the serving side.
    assert_eq!(range.short.count, 3);
    assert!(close_to(range.short.win_rate, 100.0));
    // The one long rally ends on the server's own error.
    assert_eq!(range.long.count, 1);
    assert!(close_to(range.long.win_rate, 0.0));
}

#[test]
fn player_scope_counts_only_rallies_they_struck_in() {
    let shots = fixture_shots();
    let cfg = AnalysisConfig::default();

    let mei = analyze_rallies(&shots, None, Some("mei"), &cfg);
    // The one-shot ace by noor never involved mei.
    assert_eq!(mei.total_rallies, 3);
    assert_eq!(mei.incomplete_rallies, 1);
    assert!(close_to(mei.average_rally_count, 10.0 / 3.0));
    assert!(close_to(mei.rally_range_analysis.short.win_rate, 100.0));
    assert!(close_to(mei.rally_range_analysis.long.win_rate, 100.0));

    let noor = analyze_rallies(&shots, None, Some("noor"), &cfg);
    assert_eq!(noor.total_rallies, 3);
    assert!(close_to(noor.average_rally_count, 3.0));
    // Short bucket: lost the 3-shot rally, won the ace.
    assert_eq!(noor.rally_range_analysis.short.count, 2);
    assert!(close_to(noor.rally_range_analysis.short.win_rate, 50.0));
    // Long bucket: own error handed the rally to mei.
    assert!(close_to(noor.rally_range_analysis.long.win_rate, 0.0));
}

#[test]
fn match_and_player_filters_compose() {
    let shots = fixture_shots();
    let out = analyze_rallies(
        &shots,
        Some("m-aug-19"),
        Some("mei"),
        &AnalysisConfig::default(),
    );
    assert_eq!(out.total_rallies, 1);
    assert!(close_to(out.average_rally_count, 2.0));
    assert!(close_to(out.rally_range_analysis.short.win_rate, 100.0));
}

#[test]
fn short_threshold_is_configurable() {
    let shots = fixture_shots();
    let cfg = AnalysisConfig {
        short_rally_max: 1,
        ..AnalysisConfig::default()
    };
    let out = analyze_rallies(&shots, None, None, &cfg);
    assert_eq!(out.rally_range_analysis.short.count, 1);
    assert_eq!(out.rally_range_analysis.long.count, 3);
    assert_eq!(out.short_rally_max, 1);
}

#[test]
fn fixture_shot_distribution_for_mei() {
    let shots = fixture_shots();
    let dist = shot_distribution(&shots, None, Some("mei"));

    assert_eq!(dist.total_shots, 6);
    assert!(close_to(dist.cross_rate, 4.0 / 6.0 * 100.0));
    assert!(close_to(dist.miss_rate, 0.0));
    assert!(close_to(dist.point_rate, 1.0 / 6.0 * 100.0));
    // One unclassified zone keeps the depth rates short of 100 combined.
    assert!(close_to(dist.rear_rate, 50.0));
    assert!(close_to(dist.mid_rate, 1.0 / 6.0 * 100.0));
    assert!(close_to(dist.front_rate, 1.0 / 6.0 * 100.0));
}

#[test]
fn fixture_shot_distribution_for_noor() {
    let shots = fixture_shots();
    let dist = shot_distribution(&shots, None, Some("noor"));

    assert_eq!(dist.total_shots, 6);
    assert!(close_to(dist.cross_rate, 0.0));
    assert!(close_to(dist.miss_rate, 1.0 / 6.0 * 100.0));
    assert!(close_to(dist.point_rate, 1.0 / 6.0 * 100.0));
    assert!(close_to(dist.rear_rate, 1.0 / 6.0 * 100.0));
    assert!(close_to(dist.mid_rate, 2.0 / 6.0 * 100.0));
    assert!(close_to(dist.front_rate, 1.0 / 6.0 * 100.0));
}

#[test]
fn unknown_player_gets_zeroes_not_errors() {
    let shots = fixture_shots();
    let out = analyze_rallies(&shots, None, Some("ghost"), &AnalysisConfig::default());
    assert_eq!(out.total_rallies, 0);
    assert!(close_to(out.average_rally_count, 0.0));
    assert!(close_to(out.rally_range_analysis.short.win_rate, 0.0));

    let dist = shot_distribution(&shots, None, Some("ghost"));
    assert_eq!(dist.total_shots, 0);
}

#[test]
fn analysis_is_deterministic_over_the_fixture() {
    let shots = fixture_shots();
    let cfg = AnalysisConfig::default();
    let a = analyze_rallies(&shots, None, Some("mei"), &cfg);
    let b = analyze_rallies(&shots, None, Some("mei"), &cfg);
    assert_eq!(a, b);
}

#[test]
fn privacy_gate_blocks_stranger_views() {
    let shots = fixture_shots();
    let denied = analyze_rallies_gated(
        PrivacyLevel::FriendsOnly,
        ViewerRelation::Stranger,
        &shots,
        None,
        Some("mei"),
        &AnalysisConfig::default(),
    );
    assert!(denied.is_none());

    let allowed = analyze_rallies_gated(
        PrivacyLevel::FriendsOnly,
        ViewerRelation::Friend,
        &shots,
        None,
        Some("mei"),
        &AnalysisConfig::default(),
    );
    assert_eq!(allowed.expect("friend may view").total_rallies, 3);
}

#[test]
fn analysis_output_round_trips_through_json() {
    let shots = fixture_shots();
    let out = analyze_rallies(&shots, None, Some("mei"), &AnalysisConfig::default());
    let json = serde_json::to_string(&out).expect("analysis should serialize");
    assert!(json.contains("\"miss_credits_opponent\":true"));
    let back: rally_insight::analysis::RallyAnalysis =
        serde_json::from_str(&json).expect("analysis should deserialize");
    assert_eq!(back, out);
}
