// ── curvecache.rs ───────────────────────────────────────────────────────────

use std::cell::RefCell;
use std::sync::{
    Arc,
    RwLock
};

use log::debug;

use crate::compensation::compensationreport::CompensationReport;
use crate::compensation::targettones::TargetTones;
use crate::engine::curveengine::{
    compensate_for,
    compute_curve,
    normalize_step
};
use crate::engine::samplepoint::ToneCurve;
use crate::tvi::tviprofile::TviProfile;

/// (profile, step) 的數值指紋。
///
/// 以 f64 的 bit pattern 組成，內容相同的兩個 profile 得到相同的 key，
/// 不看是否為同一個物件。-0.0 先正規化成 0.0。
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ProfileKey {
    step_bits: u64,
    point_bits: Vec<(u64, u64)>
}

impl ProfileKey {
    pub fn new(profile: &TviProfile, step: f64) -> ProfileKey {
        let bits = |v: f64| (v + 0.0).to_bits();
        ProfileKey {
            step_bits: bits(step),
            point_bits: profile
                .control_points()
                .iter()
                .map(|pt| (bits(pt.input_tone()), bits(pt.gain())))
                .collect()
        }
    }
}

/// 單一項目的曲線快取：key 改變時整條曲線作廢重算，不做合併或局部修補。
pub trait CurveCacheBackend {
    fn get_or_compute(
        &self,
        key: ProfileKey,
        compute: impl FnOnce() -> ToneCurve,
    ) -> Arc<ToneCurve>;

    fn invalidate(&self);
}

struct CacheEntry {
    key: ProfileKey,
    curve: Arc<ToneCurve>
}

// ── 單執行緒版：RefCell ──────────────────────────────────────────────────────

pub struct RefCellBackend {
    entry: RefCell<Option<CacheEntry>>
}

impl RefCellBackend {
    pub fn new() -> Self {
        Self { entry: RefCell::new(None) }
    }
}

impl Default for RefCellBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl CurveCacheBackend for RefCellBackend {
    fn get_or_compute(
        &self,
        key: ProfileKey,
        compute: impl FnOnce() -> ToneCurve,
    ) -> Arc<ToneCurve> {
        let mut entry = self.entry.borrow_mut();

        if let Some(cached) = entry.as_ref().filter(|cached| cached.key == key) {
            return Arc::clone(&cached.curve);
        }

        debug!("curve cache miss, recomputing");
        let curve = Arc::new(compute());
        *entry = Some(CacheEntry { key, curve: Arc::clone(&curve) });
        curve
    }

    fn invalidate(&self) {
        self.entry.borrow_mut().take();
    }
}

// ── 多執行緒版：RwLock ───────────────────────────────────────────────────────
//
// 讀鎖查到相同 key 直接回傳；否則在鎖外計算，再以寫鎖寫入。
// 兩條執行緒可能同時 miss 並各自計算，(profile, step) 相同時結果相同，
// 後寫入者覆蓋前者即可。

pub struct RwLockBackend {
    entry: RwLock<Option<CacheEntry>>
}

impl RwLockBackend {
    pub fn new() -> Self {
        Self { entry: RwLock::new(None) }
    }
}

impl Default for RwLockBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl CurveCacheBackend for RwLockBackend {
    fn get_or_compute(
        &self,
        key: ProfileKey,
        compute: impl FnOnce() -> ToneCurve,
    ) -> Arc<ToneCurve> {
        {
            let entry = self.entry.read().unwrap_or_else(|poisoned| poisoned.into_inner());
            if let Some(cached) = entry.as_ref().filter(|cached| cached.key == key) {
                return Arc::clone(&cached.curve);
            }
        }

        debug!("curve cache miss, recomputing");
        let curve = Arc::new(compute());
        let mut entry = self.entry.write().unwrap_or_else(|poisoned| poisoned.into_inner());
        *entry = Some(CacheEntry { key, curve: Arc::clone(&curve) });
        curve
    }

    fn invalidate(&self) {
        self.entry
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .take();
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// CachedCurveEngine
// ─────────────────────────────────────────────────────────────────────────────

/// 核心 struct 只寫一次，C 決定執行緒安全性
pub struct CachedCurveEngine<C: CurveCacheBackend> {
    step: f64,
    backend: C
}

impl<C: CurveCacheBackend> CachedCurveEngine<C> {
    fn new_with_backend(step: f64, backend: C) -> Self {
        Self { step: normalize_step(step), backend }
    }

    pub fn step(&self) -> f64 {
        self.step
    }

    pub fn curve(&self, profile: &TviProfile) -> Arc<ToneCurve> {
        let key = ProfileKey::new(profile, self.step);
        self.backend.get_or_compute(key, || compute_curve(profile, self.step))
    }

    pub fn compensate(&self, profile: &TviProfile, target: f64) -> f64 {
        compensate_for(&self.curve(profile), target)
    }

    pub fn report(&self, profile: &TviProfile, targets: &TargetTones) -> CompensationReport {
        CompensationReport::evaluate(&self.curve(profile), targets)
    }

    pub fn invalidate(&self) {
        self.backend.invalidate();
    }
}

impl CachedCurveEngine<RefCellBackend> {
    pub fn new(step: f64) -> Self {
        Self::new_with_backend(step, RefCellBackend::new())
    }
}

impl CachedCurveEngine<RwLockBackend> {
    pub fn new_threadsafe(step: f64) -> Self {
        Self::new_with_backend(step, RwLockBackend::new())
    }
}

// ── Type alias：對外只暴露這兩個名字 ─────────────────────────────────────────

pub type SingleThreadedCurveEngine = CachedCurveEngine<RefCellBackend>;
pub type MultiThreadedCurveEngine  = CachedCurveEngine<RwLockBackend>;
