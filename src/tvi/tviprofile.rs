use std::collections::BTreeMap;

use serde::{
    Deserialize,
    Serialize
};

use crate::math::curve::curve::Curve;
use crate::math::curve::nonparametriccurve::nonparametriccurve::{
    NonparametricCurve,
    Point2D
};
use crate::math::curve::nonparametriccurve::piecewiselinear::PiecewiseLinear;
use crate::math::round::round1;
use crate::tvi::profileerror::ProfileError;

pub const TONE_MIN: f64 = 0.0;
pub const TONE_MAX: f64 = 100.0;

/// 單一量測點：標稱網點 `input_tone`（%）印出後增加的 `gain`（%）。
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ControlPoint {
    input_tone: f64,
    gain: f64
}

impl ControlPoint {
    pub fn new(input_tone: f64, gain: f64) -> ControlPoint {
        ControlPoint { input_tone, gain }
    }

    pub fn input_tone(&self) -> f64 {
        self.input_tone
    }

    pub fn gain(&self) -> f64 {
        self.gain
    }
}

impl From<(f64, f64)> for ControlPoint {
    fn from((input_tone, gain): (f64, f64)) -> ControlPoint {
        ControlPoint::new(input_tone, gain)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// TviProfile
// ─────────────────────────────────────────────────────────────────────────────

/// TVI profile：網點 → 網點擴大量的對應表。
///
/// 建構時依網點值遞增排序，重複的網點以後者為準（與 map 插入語意相同）。
/// 建好之後不可變；曲線計算只讀取 profile，不會修改它。
///
/// 任意網點的 TVI 由 [`Curve::value`] 給出：
/// - 0% 與 100% 固定為 0，不論 profile 是否在這兩點有資料；
/// - 第一個量測點之前由 (0, 0) 線性爬升；
/// - 最後一個量測點之後線性衰減到 (100, 0)；
/// - 其餘在相鄰量測點之間線性插值。
///
/// 負的 gain 是合法輸入，照樣傳遞，不做修正。
///
/// JSON 表示法是以網點字串為 key 的物件，例如 `{"10": 5, "20": 10}`。
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "BTreeMap<String, f64>", into = "BTreeMap<String, f64>")]
pub struct TviProfile {
    control_points: Vec<ControlPoint>,
    gain_curve: PiecewiseLinear
}

impl TviProfile {
    pub fn new<I>(points: I) -> TviProfile
        where I: IntoIterator<Item = ControlPoint> {
        let mut sorted: Vec<ControlPoint> = points.into_iter().collect();
        sorted.sort_by(|lhs, rhs| lhs.input_tone.total_cmp(&rhs.input_tone));

        let mut control_points: Vec<ControlPoint> = Vec::with_capacity(sorted.len());
        for pt in sorted {
            match control_points.last_mut() {
                Some(last) if last.input_tone == pt.input_tone => *last = pt,
                _ => control_points.push(pt)
            }
        }

        let gain_curve = PiecewiseLinear::anchored_at_zero(
            control_points.iter().map(|pt| Point2D::new(pt.input_tone, pt.gain)).collect(),
            TONE_MIN,
            TONE_MAX);
        TviProfile { control_points, gain_curve }
    }

    pub fn empty() -> TviProfile {
        TviProfile::new(Vec::new())
    }

    /// 由 `{"10": 5, ...}` 形式的對應表建構，key 必須能解析成有限數值。
    pub fn from_map(map: &BTreeMap<String, f64>) -> Result<TviProfile, ProfileError> {
        let mut points = Vec::with_capacity(map.len());
        for (key, &gain) in map.iter() {
            let tone: f64 = key
                .trim()
                .parse()
                .map_err(|_| ProfileError::InvalidTone(key.to_owned()))?;
            if !tone.is_finite() {
                return Err(ProfileError::InvalidTone(key.to_owned()));
            }
            if !gain.is_finite() {
                return Err(ProfileError::NonFiniteGain { tone });
            }
            points.push(ControlPoint::new(tone, gain));
        }
        Ok(TviProfile::new(points))
    }

    /// 由量測結果 `(標稱網點, 實測網點)` 建構，gain 為兩者之差，捨入到一位小數。
    pub fn from_measurements(measurements: &[(f64, f64)]) -> Result<TviProfile, ProfileError> {
        let mut points = Vec::with_capacity(measurements.len());
        for &(nominal, measured) in measurements {
            if !nominal.is_finite() {
                return Err(ProfileError::InvalidTone(nominal.to_string()));
            }
            if !measured.is_finite() {
                return Err(ProfileError::NonFiniteGain { tone: nominal });
            }
            points.push(ControlPoint::new(nominal, round1(measured - nominal)));
        }
        Ok(TviProfile::new(points))
    }

    pub fn to_map(&self) -> BTreeMap<String, f64> {
        self.control_points
            .iter()
            .map(|pt| (pt.input_tone.to_string(), pt.gain))
            .collect()
    }

    pub fn control_points(&self) -> &[ControlPoint] {
        &self.control_points
    }

    pub fn len(&self) -> usize {
        self.control_points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.control_points.is_empty()
    }

    pub fn gain_at(&self, input_tone: f64) -> Option<f64> {
        self.control_points
            .iter()
            .find(|pt| pt.input_tone == input_tone)
            .map(|pt| pt.gain)
    }

    /// 未捨入的 TVI。
    pub fn tvi(&self, x: f64) -> f64 {
        if x == TONE_MIN || x == TONE_MAX {
            return 0.0;
        }
        self.gain_curve.value(x)
    }
}

impl Default for TviProfile {
    fn default() -> TviProfile {
        TviProfile::empty()
    }
}

impl FromIterator<(f64, f64)> for TviProfile {
    fn from_iter<I: IntoIterator<Item = (f64, f64)>>(iter: I) -> TviProfile {
        TviProfile::new(iter.into_iter().map(ControlPoint::from))
    }
}

impl TryFrom<BTreeMap<String, f64>> for TviProfile {
    type Error = ProfileError;

    fn try_from(map: BTreeMap<String, f64>) -> Result<TviProfile, ProfileError> {
        TviProfile::from_map(&map)
    }
}

impl From<TviProfile> for BTreeMap<String, f64> {
    fn from(profile: TviProfile) -> BTreeMap<String, f64> {
        profile.to_map()
    }
}

impl Curve for TviProfile {
    fn value(&self, x: f64) -> f64 {
        self.tvi(x)
    }

    fn derivative(&self, x: f64) -> f64 {
        self.gain_curve.derivative(x)
    }
}

impl NonparametricCurve for TviProfile {
    fn points(&self) -> Vec<Point2D> {
        self.gain_curve.points()
    }

    fn min_x(&self) -> f64 {
        self.gain_curve.min_x()
    }

    fn max_x(&self) -> f64 {
        self.gain_curve.max_x()
    }
}
