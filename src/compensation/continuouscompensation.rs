use argmin::core::{
    CostFunction,
    Error as ArgminError,
    Executor,
    State
};
use argmin::solver::brent::BrentRoot;
use log::debug;
use serde::Serialize;
use thiserror::Error;

use crate::engine::curveengine::{
    normalize_step,
    sample_inputs
};
use crate::math::curve::curve::Curve;
use crate::math::round::round1;
use crate::tvi::tviprofile::{
    TONE_MAX,
    TONE_MIN,
    TviProfile
};

const ROOT_TOLERANCE: f64 = 1e-9;
const MAX_ITERS: u64 = 200;

#[derive(Debug, Error)]
pub enum CompensationError {
    #[error("root search for target {target} failed: {message}")]
    RootSearch { target: f64, message: String },

    #[error("root search for target {target} finished without a solution")]
    NoSolution { target: f64 }
}

// ─────────────────────────────────────────────────────────────────────────────
// DGC（Dot Gain Compensation）
// ─────────────────────────────────────────────────────────────────────────────
//
// 取樣曲線的反查只有一位小數、步距為 5 的解析度。這裡直接對連續的正向函數
//
//   f(x) = x + tvi(x),  x ∈ [0, 100]
//
// 求 f(x) = target 的根。tvi(0) = tvi(100) = 0，所以 f(0) = 0、f(100) = 100，
// target 在 [0, 100] 內時區間兩端必定異號（或端點即為根），可以直接用 Brent 法。
// f 不經過 100 的上限截斷，否則暗部會出現整段平坦的解。

struct ForwardToneResidual<'a> {
    profile: &'a TviProfile,
    target: f64
}

impl CostFunction for ForwardToneResidual<'_> {
    type Param = f64;
    type Output = f64;

    fn cost(&self, x: &Self::Param) -> Result<Self::Output, ArgminError> {
        Ok(*x + self.profile.value(*x) - self.target)
    }
}

/// 求印出 `target` 所需的 input，四捨五入至一位小數。
///
/// target 超出 [0, 100] 時回傳 `Ok(None)`。
pub fn solve_input_for_output(profile: &TviProfile, target: f64) -> Result<Option<f64>, CompensationError> {
    if !(TONE_MIN..=TONE_MAX).contains(&target) {
        debug!("target {} is outside [{}, {}], nothing to solve", target, TONE_MIN, TONE_MAX);
        return Ok(None);
    }
    if target == TONE_MIN || target == TONE_MAX {
        return Ok(Some(target));
    }

    let residual = ForwardToneResidual { profile, target };
    let solver = BrentRoot::new(TONE_MIN, TONE_MAX, ROOT_TOLERANCE);
    let result = Executor::new(residual, solver)
        .configure(|state| state.param(target).max_iters(MAX_ITERS))
        .run()
        .map_err(|error| CompensationError::RootSearch { target, message: error.to_string() })?;

    let state = result.state();
    let root = state
        .get_best_param()
        .or_else(|| state.get_param())
        .copied()
        .ok_or(CompensationError::NoSolution { target })?;
    debug!("target {} solved to input {} after {} iterations", target, root, state.get_iter());
    Ok(Some(round1(root)))
}

/// DGC 表的一列：要印出 `target`，製版時應使用 `input`。
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct CompensationPoint {
    target: f64,
    input: Option<f64>
}

impl CompensationPoint {
    pub fn target(&self) -> f64 {
        self.target
    }

    pub fn input(&self) -> Option<f64> {
        self.input
    }
}

/// 對 0, step, ..., 100 每個目標網點求補償值。
pub fn compensation_table(profile: &TviProfile, step: f64) -> Result<Vec<CompensationPoint>, CompensationError> {
    sample_inputs(normalize_step(step))
        .map(|target| {
            solve_input_for_output(profile, target)
                .map(|input| CompensationPoint { target, input })
        })
        .collect()
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::curveengine::DEFAULT_STEP;
    use crate::tvi::tvipreset::TviPreset;

    #[test]
    fn exact_control_point_is_recovered() {
        let profile = TviPreset::Medium.profile();
        assert_eq!(solve_input_for_output(&profile, 67.0).unwrap(), Some(50.0));
        assert_eq!(solve_input_for_output(&profile, 50.0).unwrap(), Some(35.0));
    }

    #[test]
    fn solution_agrees_with_forward_mapping() {
        let profile = TviPreset::Heavy.profile();
        for target in [3.0, 12.5, 40.0, 77.7, 97.0] {
            let input = solve_input_for_output(&profile, target).unwrap().unwrap();
            let printed = input + profile.tvi(input);
            assert!((printed - target).abs() < 0.2, "{target}: {input} prints {printed}");
        }
    }

    #[test]
    fn empty_profile_is_identity() {
        let profile = TviProfile::empty();
        assert_eq!(solve_input_for_output(&profile, 42.0).unwrap(), Some(42.0));
    }

    #[test]
    fn out_of_range_targets_have_no_solution() {
        let profile = TviPreset::Medium.profile();
        assert_eq!(solve_input_for_output(&profile, 101.0).unwrap(), None);
        assert_eq!(solve_input_for_output(&profile, -1.0).unwrap(), None);
        assert_eq!(solve_input_for_output(&profile, 100.0).unwrap(), Some(100.0));
    }

    #[test]
    fn table_covers_every_target() {
        let table = compensation_table(&TviPreset::Medium.profile(), DEFAULT_STEP).unwrap();
        assert_eq!(table.len(), 21);
        assert_eq!(table[0].input(), Some(0.0));
        assert_eq!(table[20].input(), Some(100.0));
        assert!(table.iter().all(|pt| pt.input().is_some()));
        assert!(table.windows(2).all(|pair| pair[0].input() <= pair[1].input()));
        assert!(table[10].input().unwrap() < 50.0);
    }

    #[test]
    fn table_targets_share_the_curve_grid() {
        let profile = TviPreset::Heavy.profile();
        for step in [30.0, 7.5, -1.0] {
            let table = compensation_table(&profile, step).unwrap();
            let curve = crate::engine::curveengine::compute_curve(&profile, step);
            let targets: Vec<f64> = table.iter().map(|pt| pt.target()).collect();
            let inputs: Vec<f64> = curve.iter().map(|s| s.input()).collect();
            assert_eq!(targets, inputs);
        }
    }
}
