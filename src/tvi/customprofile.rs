use std::collections::BTreeMap;

use crate::tvi::profileerror::ProfileError;
use crate::tvi::tviprofile::{
    ControlPoint,
    TviProfile
};
use crate::tvi::tvipreset::TviPreset;

/// 可編輯的網點：10, 20, ..., 90。
pub const CUSTOM_TONES: [f64; 9] = [10.0, 20.0, 30.0, 40.0, 50.0, 60.0, 70.0, 80.0, 90.0];
pub const MAX_CUSTOM_GAIN: f64 = 50.0;

/// 使用者自訂 profile 的編輯器。
///
/// 從空白開始（或由 preset 複製），逐點設定後以 [`build`](Self::build) 取得
/// 不可變的 [`TviProfile`] 快照；之後的編輯不影響已取得的快照。
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CustomProfileBuilder {
    gains: BTreeMap<u8, f64>
}

impl CustomProfileBuilder {
    pub fn new() -> CustomProfileBuilder {
        CustomProfileBuilder::default()
    }

    pub fn from_preset(preset: TviPreset) -> CustomProfileBuilder {
        let mut builder = CustomProfileBuilder::new();
        for pt in preset.profile().control_points() {
            if let Ok(slot) = CustomProfileBuilder::slot(pt.input_tone()) {
                builder.gains.insert(slot, pt.gain());
            }
        }
        builder
    }

    fn slot(tone: f64) -> Result<u8, ProfileError> {
        CUSTOM_TONES
            .iter()
            .position(|&t| t == tone)
            .map(|idx| (idx + 1) as u8)
            .ok_or(ProfileError::ToneNotOnGrid(tone))
    }

    pub fn set(&mut self, tone: f64, gain: f64) -> Result<&mut CustomProfileBuilder, ProfileError> {
        let slot = CustomProfileBuilder::slot(tone)?;
        if !gain.is_finite() {
            return Err(ProfileError::NonFiniteGain { tone });
        }
        if !(0.0..=MAX_CUSTOM_GAIN).contains(&gain) {
            return Err(ProfileError::GainOutOfRange { tone, gain });
        }
        self.gains.insert(slot, gain);
        Ok(self)
    }

    pub fn remove(&mut self, tone: f64) -> Option<f64> {
        CustomProfileBuilder::slot(tone)
            .ok()
            .and_then(|slot| self.gains.remove(&slot))
    }

    pub fn clear(&mut self) {
        self.gains.clear();
    }

    pub fn len(&self) -> usize {
        self.gains.len()
    }

    pub fn is_empty(&self) -> bool {
        self.gains.is_empty()
    }

    pub fn build(&self) -> TviProfile {
        TviProfile::new(
            self.gains
                .iter()
                .map(|(&slot, &gain)| ControlPoint::new(f64::from(slot) * 10.0, gain)))
    }
}
