use serde::{
    Deserialize,
    Serialize
};

pub const DEFAULT_HIGHLIGHT: f64 = 50.0;
pub const DEFAULT_SHADOW: f64 = 95.0;
pub const HIGHLIGHT_RANGE: (f64, f64) = (1.0, 50.0);
pub const SHADOW_RANGE: (f64, f64) = (50.0, 100.0);

#[derive(Deserialize)]
#[serde(default)]
struct TargetTonesJsonProp {
    highlight: f64,
    shadow: f64
}

impl Default for TargetTonesJsonProp {
    fn default() -> Self {
        TargetTonesJsonProp { highlight: DEFAULT_HIGHLIGHT, shadow: DEFAULT_SHADOW }
    }
}

/// 要補償的兩個目標網點：亮部（highlight）與暗部（shadow）。
///
/// 建構時夾回各自的範圍，非有限值改用預設值。
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "TargetTonesJsonProp")]
pub struct TargetTones {
    highlight: f64,
    shadow: f64
}

fn clamp_or(value: f64, (lo, hi): (f64, f64), fallback: f64) -> f64 {
    if value.is_finite() {
        value.clamp(lo, hi)
    } else {
        fallback
    }
}

impl TargetTones {
    pub fn new(highlight: f64, shadow: f64) -> TargetTones {
        TargetTones {
            highlight: clamp_or(highlight, HIGHLIGHT_RANGE, DEFAULT_HIGHLIGHT),
            shadow: clamp_or(shadow, SHADOW_RANGE, DEFAULT_SHADOW)
        }
    }

    pub fn highlight(&self) -> f64 {
        self.highlight
    }

    pub fn shadow(&self) -> f64 {
        self.shadow
    }

    pub fn with_highlight(&self, highlight: f64) -> TargetTones {
        TargetTones::new(highlight, self.shadow)
    }

    pub fn with_shadow(&self, shadow: f64) -> TargetTones {
        TargetTones::new(self.highlight, shadow)
    }
}

impl Default for TargetTones {
    fn default() -> TargetTones {
        TargetTones::new(DEFAULT_HIGHLIGHT, DEFAULT_SHADOW)
    }
}

impl From<TargetTonesJsonProp> for TargetTones {
    fn from(json_prop: TargetTonesJsonProp) -> TargetTones {
        TargetTones::new(json_prop.highlight, json_prop.shadow)
    }
}
