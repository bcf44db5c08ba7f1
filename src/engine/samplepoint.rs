use serde::Serialize;

/// 曲線上的一個取樣點，數值皆已捨入至一位小數。
///
/// `output` 是印出後預期的網點值（上限 100），`bump = output - input`。
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct SamplePoint {
    input: f64,
    tvi: f64,
    output: f64,
    bump: f64
}

impl SamplePoint {
    pub fn new(input: f64, tvi: f64, output: f64, bump: f64) -> SamplePoint {
        SamplePoint { input, tvi, output, bump }
    }

    pub fn input(&self) -> f64 {
        self.input
    }

    pub fn tvi(&self) -> f64 {
        self.tvi
    }

    pub fn output(&self) -> f64 {
        self.output
    }

    pub fn bump(&self) -> f64 {
        self.bump
    }
}

/// 以固定步距取樣 [0, 100] 的網點擴大曲線，依 input 遞增排列。
///
/// 完全由 (profile, step) 決定；profile 改變時整條重算，不做局部更新。
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ToneCurve {
    step: f64,
    samples: Vec<SamplePoint>
}

impl ToneCurve {
    pub fn new(step: f64, samples: Vec<SamplePoint>) -> ToneCurve {
        ToneCurve { step, samples }
    }

    pub fn step(&self) -> f64 {
        self.step
    }

    pub fn samples(&self) -> &[SamplePoint] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SamplePoint> {
        self.samples.iter()
    }

    pub fn sample_at(&self, input: f64) -> Option<&SamplePoint> {
        self.samples.iter().find(|sample| sample.input == input)
    }

    /// output 是否隨 input 單調不減。
    pub fn is_monotonic(&self) -> bool {
        self.samples
            .windows(2)
            .all(|pair| pair[0].output <= pair[1].output)
    }
}

impl<'a> IntoIterator for &'a ToneCurve {
    type Item = &'a SamplePoint;
    type IntoIter = std::slice::Iter<'a, SamplePoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.samples.iter()
    }
}
