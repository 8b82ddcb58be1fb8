//! Region inference for nodes that have no constant-table entry.
//!
//! Plain substring matches, checked in order; the first rule that matches
//! wins and anything unmatched is Johto. Markers match loosely (`lavender`
//! also matches `lavender_radio_tower`). Exceptions go in as rules ahead of
//! the broad ones.

use crate::model::Region;

pub struct RegionRule {
    pub region: Region,
    pub markers: &'static [&'static str],
}

impl RegionRule {
    pub fn matches(&self, key: &str) -> bool {
        self.markers.iter().any(|marker| key.contains(marker))
    }
}

pub const KANTO_MARKERS: &[&str] = &[
    "kanto",
    "pallet",
    "viridian",
    "pewter",
    "cerulean",
    "vermilion",
    "lavender",
    "lav_radio",
    "celadon",
    "saffron",
    "fuchsia",
    "cinnabar",
    "indigo",
    "mount_moon",
    "mt_moon",
    "rock_tunnel",
    "digletts_cave",
    "power_plant",
    "seafoam",
    "silph",
    "safari_zone",
    "silver_cave",
    "reds_house",
    "blues_house",
    "oaks_lab",
    "copycats_house",
];

pub const ORANGE_MARKERS: &[&str] = &[
    "orange",
    "valencia",
    "tangelo",
    "mikan",
    "navel",
    "trovita",
    "kumquat",
    "pummelo",
    "shamouti",
];

pub static REGION_RULES: &[RegionRule] = &[
    RegionRule {
        region: Region::Kanto,
        markers: KANTO_MARKERS,
    },
    RegionRule {
        region: Region::Orange,
        markers: ORANGE_MARKERS,
    },
];

/// Region for a synthetic node key, using [`REGION_RULES`]
pub fn infer_region(key: &str) -> Region {
    infer_region_with(REGION_RULES, key)
}

pub fn infer_region_with(rules: &[RegionRule], key: &str) -> Region {
    rules
        .iter()
        .find(|rule| rule.matches(key))
        .map(|rule| rule.region)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_johto() {
        assert_eq!(infer_region("goldenrod_dept_store_1f"), Region::Johto);
        assert_eq!(infer_region("route_29"), Region::Johto);
    }

    #[test]
    fn test_marker_lists() {
        assert_eq!(infer_region("celadon_mansion_roof"), Region::Kanto);
        assert_eq!(infer_region("kanto_region"), Region::Kanto);
        assert_eq!(infer_region("shamouti_shrine"), Region::Orange);
        assert_eq!(infer_region("orange_region"), Region::Orange);
    }

    #[test]
    fn test_first_rule_wins() {
        static RULES: &[RegionRule] = &[
            RegionRule {
                region: Region::Orange,
                markers: &["navel"],
            },
            RegionRule {
                region: Region::Kanto,
                markers: &["navel", "pallet"],
            },
        ];
        assert_eq!(infer_region_with(RULES, "navel_gym"), Region::Orange);
        assert_eq!(infer_region_with(RULES, "pallet_town"), Region::Kanto);
        assert_eq!(infer_region_with(&[], "pallet_town"), Region::Johto);
    }
}
