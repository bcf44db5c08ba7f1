use std::fmt;

use serde::Serialize;

use crate::math::round::round;
use crate::tvi::tviprofile::TviProfile;

const VERY_SIMILAR_BELOW: f64 = 1.0;
const MODERATE_BELOW: f64 = 2.5;

/// 兩個 profile 的平均網點擴大量差距等級。
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GainDifference {
    VerySimilar,
    Moderate,
    Significant
}

impl GainDifference {
    /// 平均絕對差 < 1 為 very similar，< 2.5 為 moderate，其餘為 significant。
    pub fn classify(mean_abs_delta: f64) -> GainDifference {
        if mean_abs_delta < VERY_SIMILAR_BELOW {
            GainDifference::VerySimilar
        } else if mean_abs_delta < MODERATE_BELOW {
            GainDifference::Moderate
        } else {
            GainDifference::Significant
        }
    }

    pub fn recommendation(&self) -> &'static str {
        match self {
            GainDifference::VerySimilar => "Minimal curve adjustment needed",
            GainDifference::Moderate => "Use suggested DGC as starting point",
            GainDifference::Significant => "Full re-fingerprinting recommended"
        }
    }
}

impl fmt::Display for GainDifference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            GainDifference::VerySimilar => "Very similar dot gain behavior",
            GainDifference::Moderate => "Moderate difference",
            GainDifference::Significant => "Significant difference"
        };
        write!(f, "{}. {}.", label, self.recommendation())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct ToneDelta {
    tone: f64,
    current: f64,
    target: f64,
    delta: f64
}

impl ToneDelta {
    pub fn tone(&self) -> f64 {
        self.tone
    }

    pub fn current(&self) -> f64 {
        self.current
    }

    pub fn target(&self) -> f64 {
        self.target
    }

    /// `target − current`，捨入到兩位小數。
    pub fn delta(&self) -> f64 {
        self.delta
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// ProfileComparison
// ─────────────────────────────────────────────────────────────────────────────
//
// 換版材或換印刷條件時，比較現行 profile 與目標 profile 的 TVI。
// 比較點取兩者量測點網點值的聯集，每點以各自的 `tvi` 取值，
// 因此一邊沒有量測的網點也會以插值參與比較。

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ProfileComparison {
    deltas: Vec<ToneDelta>,
    mean_abs_delta: f64,
    difference: GainDifference
}

impl ProfileComparison {
    /// 兩個 profile 都沒有量測點時，平均差為 0。
    pub fn evaluate(current: &TviProfile, target: &TviProfile) -> ProfileComparison {
        let mut tones: Vec<f64> = current
            .control_points()
            .iter()
            .chain(target.control_points())
            .map(|pt| pt.input_tone())
            .collect();
        tones.sort_by(f64::total_cmp);
        tones.dedup();

        let deltas: Vec<ToneDelta> = tones
            .into_iter()
            .map(|tone| {
                let current = current.tvi(tone);
                let target = target.tvi(tone);
                ToneDelta { tone, current, target, delta: round(target - current, 2) }
            })
            .collect();

        let mean_abs_delta = if deltas.is_empty() {
            0.0
        } else {
            deltas.iter().map(|d| d.delta.abs()).sum::<f64>() / deltas.len() as f64
        };

        ProfileComparison {
            deltas,
            mean_abs_delta,
            difference: GainDifference::classify(mean_abs_delta)
        }
    }

    pub fn deltas(&self) -> &[ToneDelta] {
        &self.deltas
    }

    pub fn mean_abs_delta(&self) -> f64 {
        self.mean_abs_delta
    }

    pub fn difference(&self) -> GainDifference {
        self.difference
    }
}
