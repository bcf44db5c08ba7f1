use std::fmt;
use std::str::FromStr;

use serde::{
    Deserialize,
    Serialize
};

use crate::tvi::profileerror::ProfileError;
use crate::tvi::tviprofile::TviProfile;

const MINIMAL_POINTS: [(f64, f64); 9] = [
    (10.0, 2.0), (20.0, 4.0), (30.0, 6.0), (40.0, 7.0), (50.0, 8.0),
    (60.0, 7.0), (70.0, 6.0), (80.0, 4.0), (90.0, 2.0)
];

const LIGHT_POINTS: [(f64, f64); 9] = [
    (10.0, 3.0), (20.0, 6.0), (30.0, 9.0), (40.0, 11.0), (50.0, 12.0),
    (60.0, 11.0), (70.0, 9.0), (80.0, 6.0), (90.0, 3.0)
];

const MEDIUM_POINTS: [(f64, f64); 9] = [
    (10.0, 5.0), (20.0, 10.0), (30.0, 14.0), (40.0, 16.0), (50.0, 17.0),
    (60.0, 15.0), (70.0, 12.0), (80.0, 8.0), (90.0, 4.0)
];

const HEAVY_POINTS: [(f64, f64); 9] = [
    (10.0, 8.0), (20.0, 14.0), (30.0, 19.0), (40.0, 22.0), (50.0, 24.0),
    (60.0, 22.0), (70.0, 18.0), (80.0, 12.0), (90.0, 6.0)
];

/// 內建的 TVI profile。
///
/// 大致對應由平頂網點（minimal）到軟性基材、高網線數（heavy）的常見印刷條件。
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TviPreset {
    Minimal,
    Light,
    #[default]
    Medium,
    Heavy
}

impl TviPreset {
    pub const ALL: [TviPreset; 4] = [
        TviPreset::Minimal,
        TviPreset::Light,
        TviPreset::Medium,
        TviPreset::Heavy
    ];

    pub fn slug(&self) -> &'static str {
        match self {
            TviPreset::Minimal => "minimal",
            TviPreset::Light => "light",
            TviPreset::Medium => "medium",
            TviPreset::Heavy => "heavy"
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            TviPreset::Minimal => "Minimal gain (flat-top dots)",
            TviPreset::Light => "Light gain",
            TviPreset::Medium => "Medium gain",
            TviPreset::Heavy => "Heavy gain (film / high LPI)"
        }
    }

    fn raw_points(&self) -> &'static [(f64, f64)] {
        match self {
            TviPreset::Minimal => &MINIMAL_POINTS,
            TviPreset::Light => &LIGHT_POINTS,
            TviPreset::Medium => &MEDIUM_POINTS,
            TviPreset::Heavy => &HEAVY_POINTS
        }
    }

    pub fn profile(&self) -> TviProfile {
        self.raw_points().iter().copied().collect()
    }
}

impl fmt::Display for TviPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.slug())
    }
}

impl FromStr for TviPreset {
    type Err = ProfileError;

    fn from_str(s: &str) -> Result<TviPreset, ProfileError> {
        let name = s.trim();
        TviPreset::ALL
            .into_iter()
            .find(|preset| preset.slug().eq_ignore_ascii_case(name))
            .ok_or_else(|| ProfileError::UnknownPreset(name.to_owned()))
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_preset_spans_ten_to_ninety() {
        for preset in TviPreset::ALL {
            let profile = preset.profile();
            assert_eq!(profile.len(), 9, "{preset}");
            assert_eq!(profile.control_points()[0].input_tone(), 10.0);
            assert_eq!(profile.control_points()[8].input_tone(), 90.0);
        }
    }

    #[test]
    fn medium_is_default_and_peaks_at_midtone() {
        let profile = TviPreset::default().profile();
        assert_eq!(profile.gain_at(50.0), Some(17.0));
    }

    #[test]
    fn parses_slugs_case_insensitively() {
        assert_eq!("Heavy".parse::<TviPreset>(), Ok(TviPreset::Heavy));
        assert_eq!(" light ".parse::<TviPreset>(), Ok(TviPreset::Light));
        assert_eq!(
            "gravure".parse::<TviPreset>(),
            Err(ProfileError::UnknownPreset("gravure".to_owned())));
    }
}
