use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProfileError {
    #[error("control point key '{0}' is not a tone value")]
    InvalidTone(String),

    #[error("control point at tone {tone} has a non-finite gain")]
    NonFiniteGain { tone: f64 },

    #[error("tone {0} is not one of the editable tones 10, 20, ..., 90")]
    ToneNotOnGrid(f64),

    #[error("gain {gain} at tone {tone} is outside [0, 50]")]
    GainOutOfRange { tone: f64, gain: f64 },

    #[error("unknown preset '{0}'")]
    UnknownPreset(String)
}
