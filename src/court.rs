use std::collections::HashMap;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// Where a shot landed. The nine depth/lane zones carry a depth band; the
/// net and service-box tags count toward shot totals but not the depth
/// distribution. Unrecognized tags from the datastore land in `Unclassified`
/// so a new zone label never aborts an aggregation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CourtZone {
    FrontLeft,
    FrontCenter,
    FrontRight,
    MidLeft,
    MidCenter,
    MidRight,
    RearLeft,
    RearCenter,
    RearRight,
    Net,
    ServiceBox,
    Unclassified,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DepthBand {
    Front,
    Mid,
    Rear,
}

static ZONE_TAGS: Lazy<HashMap<&'static str, CourtZone>> = Lazy::new(|| {
    use CourtZone::*;
    HashMap::from([
        ("front_left", FrontLeft),
        ("front_center", FrontCenter),
        ("front_right", FrontRight),
        ("mid_left", MidLeft),
        ("mid_center", MidCenter),
        ("mid_right", MidRight),
        ("rear_left", RearLeft),
        ("rear_center", RearCenter),
        ("rear_right", RearRight),
        // Legacy labels seen in older club logs.
        ("back_left", RearLeft),
        ("back_center", RearCenter),
        ("back_right", RearRight),
        ("net", Net),
        ("service_box", ServiceBox),
        ("service", ServiceBox),
    ])
});

impl CourtZone {
    /// Lenient tag parsing: accepts snake_case and camelCase spellings,
    /// falls back to `Unclassified` rather than failing.
    pub fn from_tag(raw: &str) -> CourtZone {
        let key = normalize_tag(raw);
        ZONE_TAGS
            .get(key.as_str())
            .copied()
            .unwrap_or(CourtZone::Unclassified)
    }

    pub fn as_tag(self) -> &'static str {
        use CourtZone::*;
        match self {
            FrontLeft => "front_left",
            FrontCenter => "front_center",
            FrontRight => "front_right",
            MidLeft => "mid_left",
            MidCenter => "mid_center",
            MidRight => "mid_right",
            RearLeft => "rear_left",
            RearCenter => "rear_center",
            RearRight => "rear_right",
            Net => "net",
            ServiceBox => "service_box",
            Unclassified => "unclassified",
        }
    }

    /// Depth band for the zone-distribution statistic. `None` for zones
    /// outside the nine-zone grid; those shots still count toward totals.
    pub fn depth_band(self) -> Option<DepthBand> {
        use CourtZone::*;
        match self {
            FrontLeft | FrontCenter | FrontRight => Some(DepthBand::Front),
            MidLeft | MidCenter | MidRight => Some(DepthBand::Mid),
            RearLeft | RearCenter | RearRight => Some(DepthBand::Rear),
            Net | ServiceBox | Unclassified => None,
        }
    }
}

fn normalize_tag(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len() + 2);
    for (i, c) in raw.trim().chars().enumerate() {
        if c.is_ascii_uppercase() {
            if i > 0 {
                out.push('_');
            }
            out.push(c.to_ascii_lowercase());
        } else if c == '-' || c == ' ' {
            out.push('_');
        } else {
            out.push(c);
        }
    }
    out
}

impl From<String> for CourtZone {
    fn from(raw: String) -> Self {
        CourtZone::from_tag(&raw)
    }
}

impl From<CourtZone> for String {
    fn from(zone: CourtZone) -> Self {
        zone.as_tag().to_string()
    }
}
