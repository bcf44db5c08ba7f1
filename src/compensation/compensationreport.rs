use std::fmt;

use serde::Serialize;

use crate::compensation::targettones::TargetTones;
use crate::engine::curveengine::{
    CompensationMatch,
    resolve_compensation
};
use crate::engine::samplepoint::ToneCurve;

/// 單一目標的反查結果。
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct TargetCompensation {
    target: f64,
    result: CompensationMatch
}

impl TargetCompensation {
    pub fn evaluate(curve: &ToneCurve, target: f64) -> TargetCompensation {
        TargetCompensation { target, result: resolve_compensation(curve, target) }
    }

    pub fn target(&self) -> f64 {
        self.target
    }

    pub fn result(&self) -> CompensationMatch {
        self.result
    }

    /// 補償後的 input；找不到時為 target 本身。
    pub fn input(&self) -> f64 {
        self.result.input_or(self.target)
    }

    pub fn is_fallback(&self) -> bool {
        !self.result.is_available()
    }
}

impl fmt::Display for TargetCompensation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.result {
            CompensationMatch::Tolerance { input } => {
                write!(f, "{}% -> {}% (nearest sample)", self.target, input)
            },
            CompensationMatch::Interpolated { input } => {
                write!(f, "{}% -> {}% (interpolated)", self.target, input)
            },
            CompensationMatch::Unavailable => {
                write!(f, "{}% -> no compensation available", self.target)
            }
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct CompensationReport {
    highlight: TargetCompensation,
    shadow: TargetCompensation
}

impl CompensationReport {
    pub fn evaluate(curve: &ToneCurve, targets: &TargetTones) -> CompensationReport {
        CompensationReport {
            highlight: TargetCompensation::evaluate(curve, targets.highlight()),
            shadow: TargetCompensation::evaluate(curve, targets.shadow())
        }
    }

    pub fn highlight(&self) -> &TargetCompensation {
        &self.highlight
    }

    pub fn shadow(&self) -> &TargetCompensation {
        &self.shadow
    }
}

impl fmt::Display for CompensationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Highlight: {}", self.highlight)?;
        write!(f, "Shadow:    {}", self.shadow)
    }
}
