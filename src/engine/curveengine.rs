use log::{
    debug,
    warn
};
use serde::Serialize;

use crate::engine::samplepoint::{
    SamplePoint,
    ToneCurve
};
use crate::math::round::{
    round,
    round1
};
use crate::tvi::tviprofile::{
    TONE_MAX,
    TONE_MIN,
    TviProfile
};

pub const DEFAULT_STEP: f64 = 5.0;
pub const MIN_STEP: f64 = 0.01;

/// 取樣點數上限：floor(100 / MIN_STEP) + 1。
pub const MAX_SAMPLES: usize = 10_001;

/// 反查時，取樣點 output 與目標相差在此範圍內即直接採用。
pub const MATCH_TOLERANCE: f64 = 2.5;

/// 正規化取樣步距：
/// - 非有限值或非正數改用 `DEFAULT_STEP`；
/// - 小於 `MIN_STEP` 的步距提高到 `MIN_STEP`，藉此把取樣點數封頂在 `MAX_SAMPLES`。
///
/// 點數公式 floor(100 / step) + 1 套用在正規化後的步距上（即 [`ToneCurve::step`]），
/// 對 (0, 0.01) 的步距而言不是呼叫端傳入的值。
pub fn normalize_step(step: f64) -> f64 {
    if !step.is_finite() || step <= 0.0 {
        warn!("sampling step {} is not a positive number, falling back to {}", step, DEFAULT_STEP);
        return DEFAULT_STEP;
    }
    if step < MIN_STEP {
        warn!("sampling step {} is below {}, clamping", step, MIN_STEP);
        return MIN_STEP;
    }
    step
}

// ─────────────────────────────────────────────────────────────────────────────
// 正向：profile → 取樣曲線
// ─────────────────────────────────────────────────────────────────────────────

/// 單點取樣。捨入順序固定：
///   1. tvi    = round1(tvi_raw)
///   2. output = round1(min(100, x + tvi_raw))   ← 用未捨入的 tvi
///   3. bump   = round1(output - x)              ← 用已捨入的 output
pub fn sample_point(profile: &TviProfile, x: f64) -> SamplePoint {
    let raw_tvi = profile.tvi(x);
    let output = round1((x + raw_tvi).min(TONE_MAX));
    SamplePoint::new(x, round1(raw_tvi), output, round1(output - x))
}

/// 0, step, 2·step, ... 直到 100 的取樣網點，共 floor(100 / step) + 1 個。
///
/// `step` 應已經過 [`normalize_step`]。
pub fn sample_inputs(step: f64) -> impl Iterator<Item = f64> {
    let count = ((TONE_MAX - TONE_MIN) / step + 1e-9).floor() as usize + 1;

    // 以 i * step 計算而非累加，再捨去乘法留下的二進位尾數
    (0..count).map(move |i| round(TONE_MIN + i as f64 * step, 9).min(TONE_MAX))
}

/// 在 [0, 100] 上以正規化後的 `step` 取樣，共 floor(100 / step) + 1 點。
///
/// 不會失敗：空 profile 得到 TVI 全為 0 的曲線。
pub fn compute_curve(profile: &TviProfile, step: f64) -> ToneCurve {
    let step = normalize_step(step);
    let samples: Vec<SamplePoint> = sample_inputs(step)
        .map(|x| sample_point(profile, x))
        .collect();

    debug!("computed {} samples at step {} from {} control points",
           samples.len(), step, profile.len());
    ToneCurve::new(step, samples)
}

// ─────────────────────────────────────────────────────────────────────────────
// 反向：目標 output → 需要的 input
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CompensationMatch {
    /// 第一個 output 落在 `MATCH_TOLERANCE` 內的取樣點。
    Tolerance { input: f64 },
    /// 相鄰兩點夾住目標，依步距線性插值。
    Interpolated { input: f64 },
    /// 目標不在曲線的 output 範圍內。
    Unavailable
}

impl CompensationMatch {
    pub fn input(&self) -> Option<f64> {
        match self {
            CompensationMatch::Tolerance { input } => Some(*input),
            CompensationMatch::Interpolated { input } => Some(*input),
            CompensationMatch::Unavailable => None
        }
    }

    pub fn input_or(&self, fallback: f64) -> f64 {
        self.input().unwrap_or(fallback)
    }

    pub fn is_available(&self) -> bool {
        self.input().is_some()
    }
}

/// 三段式反查，依序：
///   1. 容差比對：依 input 遞增掃描，第一個 |output - target| ≤ 2.5 的點勝出，
///      同樣接近時偏向較低的 input；
///   2. 夾擠插值：第一組 out[i] ≤ target ≤ out[i+1]，
///      input = in[i] + (target - out[i]) / (out[i+1] - out[i]) · step，捨入一位小數；
///   3. 都找不到時回傳 `Unavailable`。
///
/// 插值假設取樣點等距，因此乘上曲線的固定步距，而非兩點實際的 input 差。
pub fn resolve_compensation(curve: &ToneCurve, target: f64) -> CompensationMatch {
    let tolerance_hit = curve
        .iter()
        .find(|sample| (sample.output() - target).abs() <= MATCH_TOLERANCE);
    if let Some(sample) = tolerance_hit {
        debug!("target {} matched sample {} within tolerance", target, sample.input());
        return CompensationMatch::Tolerance { input: sample.input() };
    }

    let bracket = curve
        .samples()
        .windows(2)
        .find(|pair| pair[0].output() <= target && target <= pair[1].output());
    if let Some(pair) = bracket {
        let (lower, upper) = (pair[0], pair[1]);
        let span = upper.output() - lower.output();
        let input = if span == 0.0 {
            lower.input()
        } else {
            round1(lower.input() + (target - lower.output()) / span * curve.step())
        };
        debug!("target {} interpolated between {} and {} to {}",
               target, lower.input(), upper.input(), input);
        return CompensationMatch::Interpolated { input };
    }

    debug!("target {} is outside the curve output range", target);
    CompensationMatch::Unavailable
}

/// 找不到補償值時原樣回傳 `target`；呼叫端可用「回傳值等於 target」判斷失敗，
/// 或改用 [`resolve_compensation`] 取得明確的結果。
pub fn compensate_for(curve: &ToneCurve, target: f64) -> f64 {
    resolve_compensation(curve, target).input_or(target)
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::tvi::tvipreset::TviPreset;

    fn medium_curve() -> ToneCurve {
        compute_curve(&TviPreset::Medium.profile(), DEFAULT_STEP)
    }

    #[test]
    fn medium_curve_has_21_samples() {
        let curve = medium_curve();
        assert_eq!(curve.len(), 21);
        assert_eq!(curve.samples()[0].input(), 0.0);
        assert_eq!(curve.samples()[20].input(), 100.0);
    }

    #[test]
    fn medium_midtone_sample() {
        let curve = medium_curve();
        assert_eq!(curve.sample_at(50.0), Some(&SamplePoint::new(50.0, 17.0, 67.0, 17.0)));
        assert_eq!(curve.sample_at(5.0), Some(&SamplePoint::new(5.0, 2.5, 7.5, 2.5)));
        assert_eq!(curve.sample_at(25.0), Some(&SamplePoint::new(25.0, 12.0, 37.0, 12.0)));
    }

    #[test]
    fn endpoints_never_gain() {
        let odd: TviProfile = [(5.0, 30.0), (95.0, -10.0)].into_iter().collect();
        for profile in TviPreset::ALL.iter().map(|p| p.profile()).chain([odd]) {
            let curve = compute_curve(&profile, DEFAULT_STEP);
            assert_eq!(curve.samples()[0].tvi(), 0.0);
            assert_eq!(curve.samples()[curve.len() - 1].tvi(), 0.0);
        }
    }

    #[test]
    fn output_stays_between_input_and_100() {
        let heavy: TviProfile = [(50.0, 50.0), (90.0, 40.0)].into_iter().collect();
        for profile in TviPreset::ALL.iter().map(|p| p.profile()).chain([heavy]) {
            for sample in &compute_curve(&profile, DEFAULT_STEP) {
                assert!(sample.output() >= sample.input(), "{sample:?}");
                assert!(sample.output() <= 100.0, "{sample:?}");
            }
        }
    }

    #[test]
    fn clamped_output_derives_bump_from_output() {
        let profile: TviProfile = [(90.0, 40.0)].into_iter().collect();
        let curve = compute_curve(&profile, DEFAULT_STEP);
        assert_eq!(curve.sample_at(90.0), Some(&SamplePoint::new(90.0, 40.0, 100.0, 10.0)));
    }

    #[test]
    fn negative_gain_is_accepted_and_clamp_still_holds() {
        let profile: TviProfile = [(50.0, -8.0)].into_iter().collect();
        let curve = compute_curve(&profile, DEFAULT_STEP);
        let mid = curve.sample_at(50.0).unwrap();
        assert_eq!(mid.output(), 42.0);
        assert_eq!(mid.bump(), -8.0);
        assert!(curve.iter().all(|s| s.output() <= 100.0));
    }

    #[test]
    fn empty_profile_is_identity() {
        let curve = compute_curve(&TviProfile::empty(), DEFAULT_STEP);
        assert_eq!(curve.len(), 21);
        for sample in &curve {
            assert_eq!(sample.tvi(), 0.0);
            assert_eq!(sample.output(), sample.input());
            assert_eq!(sample.bump(), 0.0);
        }
    }

    #[test]
    fn medium_output_is_monotonic() {
        assert!(medium_curve().is_monotonic());
    }

    #[test]
    fn step_controls_sample_count() {
        let profile = TviPreset::Medium.profile();
        assert_eq!(compute_curve(&profile, 10.0).len(), 11);
        let coarse = compute_curve(&profile, 30.0);
        let inputs: Vec<f64> = coarse.iter().map(|s| s.input()).collect();
        assert_eq!(inputs, vec![0.0, 30.0, 60.0, 90.0]);
        assert_eq!(compute_curve(&profile, 0.1).len(), 1001);
    }

    #[test]
    fn sample_inputs_stay_on_grid() {
        let inputs: Vec<f64> = sample_inputs(0.1).collect();
        assert_eq!(inputs.len(), 1001);
        assert_eq!(inputs[3], 0.3);
        assert_eq!(inputs[1000], 100.0);
        assert_eq!(sample_inputs(40.0).collect::<Vec<_>>(), vec![0.0, 40.0, 80.0]);
    }

    #[test]
    fn tiny_step_is_capped_at_max_samples() {
        let profile = TviPreset::Medium.profile();
        for step in [0.001, 1e-12] {
            let curve = compute_curve(&profile, step);
            assert_eq!(curve.step(), MIN_STEP);
            assert_eq!(curve.len(), MAX_SAMPLES);
        }
        assert_eq!(compute_curve(&profile, MIN_STEP).len(), MAX_SAMPLES);
    }

    #[test]
    fn invalid_step_falls_back_to_default() {
        let profile = TviPreset::Medium.profile();
        for step in [0.0, -5.0, f64::NAN, f64::INFINITY] {
            let curve = compute_curve(&profile, step);
            assert_eq!(curve.step(), DEFAULT_STEP);
            assert_eq!(curve.len(), 21);
        }
    }

    #[test]
    fn midtone_target_needs_much_less_input() {
        let curve = medium_curve();
        assert_eq!(resolve_compensation(&curve, 50.0), CompensationMatch::Tolerance { input: 35.0 });
        assert!(compensate_for(&curve, 50.0) < 50.0);
    }

    #[test]
    fn tolerance_tie_prefers_lower_input() {
        let curve = compute_curve(&TviProfile::empty(), DEFAULT_STEP);
        assert_eq!(compensate_for(&curve, 2.5), 0.0);
        assert_eq!(compensate_for(&curve, 52.5), 50.0);
    }

    #[test]
    fn interpolates_when_no_sample_is_close() {
        let curve = medium_curve();
        assert_eq!(resolve_compensation(&curve, 3.75), CompensationMatch::Interpolated { input: 2.5 });

        let heavy = compute_curve(&TviPreset::Heavy.profile(), DEFAULT_STEP);
        assert_eq!(compensate_for(&heavy, 4.5), 2.5);
    }

    #[test]
    fn out_of_range_target_falls_back_to_identity() {
        let curve = medium_curve();
        assert_eq!(resolve_compensation(&curve, 130.0), CompensationMatch::Unavailable);
        assert_eq!(compensate_for(&curve, 130.0), 130.0);
        assert_eq!(compensate_for(&curve, -20.0), -20.0);

        let empty = ToneCurve::new(DEFAULT_STEP, Vec::new());
        assert_eq!(compensate_for(&empty, 40.0), 40.0);
    }

    #[test]
    fn compensation_round_trips_within_one_step() {
        for preset in TviPreset::ALL {
            let curve = compute_curve(&preset.profile(), DEFAULT_STEP);
            for sample in curve.iter().filter(|s| s.input() > 0.0 && s.input() < 100.0) {
                let input = compensate_for(&curve, sample.output());
                assert!((input - sample.input()).abs() <= DEFAULT_STEP,
                        "{preset}: {} -> {}", sample.input(), input);
            }
        }
    }

    #[test]
    fn switching_profiles_recomputes_every_sample() {
        let empty = compute_curve(&TviProfile::empty(), DEFAULT_STEP);
        let filled = compute_curve(&TviPreset::Medium.profile(), DEFAULT_STEP);
        assert_eq!(filled, medium_curve());
        let changed = empty
            .iter()
            .zip(filled.iter())
            .filter(|(before, after)| before != after)
            .count();
        assert_eq!(changed, 19);
    }
}
