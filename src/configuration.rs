use std::cell::{
    Cell,
    Ref,
    RefCell
};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use log::{
    info,
    warn
};
use serde::Deserialize;

use crate::compensation::targettones::TargetTones;
use crate::engine::curveengine::{
    DEFAULT_STEP,
    normalize_step
};
use crate::manager::manager::{
    IManager,
    Manager
};
use crate::manager::managererror::ManagerError;
use crate::tvi::profilemanager::ProfileManager;
use crate::tvi::tviprofile::TviProfile;


#[derive(Deserialize, Default)]
#[serde(default)]
struct ConfigurationJsonProp {
    step: Option<f64>,
    targets: Option<TargetTones>,
    profiles: Vec<serde_json::Value>
}

/// 計算所需的設定：取樣步距、預設目標網點，以及具名 profile 登錄表。
///
/// JSON 設定檔（所有欄位皆可省略）：
///
/// ```json
/// {
///   "step": 5,
///   "targets": { "highlight": 50, "shadow": 95 },
///   "profiles": [ { "name": "press-a", "points": { "10": 6, "50": 18 } } ]
/// }
/// ```
pub struct Configuration {
    step: Cell<f64>,
    targets: Cell<TargetTones>,
    profile_manager_cell: RefCell<Manager<TviProfile>>
}


impl Configuration {
    pub fn new() -> Configuration {
        Configuration {
            step: Cell::new(DEFAULT_STEP),
            targets: Cell::new(TargetTones::default()),
            profile_manager_cell: RefCell::new(ProfileManager::new())
        }
    }

    pub fn step(&self) -> f64 {
        self.step.get()
    }

    pub fn targets(&self) -> TargetTones {
        self.targets.get()
    }

    pub fn profile_manager(&self) -> Ref<'_, Manager<TviProfile>> {
        self.profile_manager_cell.borrow()
    }

    pub fn profile(&self, name: &str) -> Result<TviProfile, ManagerError> {
        self.profile_manager().get(name.trim())
    }

    pub fn from_reader(&self, file_path: &Path) -> Result<(), ManagerError> {
        let file = File::open(file_path)?;
        let reader = BufReader::new(file);
        let json_prop: ConfigurationJsonProp = serde_json::from_reader(reader)?;
        self.apply(json_prop)?;
        info!("loaded configuration from {}", file_path.display());
        Ok(())
    }

    pub fn from_json_str(&self, json: &str) -> Result<(), ManagerError> {
        let json_prop: ConfigurationJsonProp = serde_json::from_str(json)?;
        self.apply(json_prop)
    }

    fn apply(&self, json_prop: ConfigurationJsonProp) -> Result<(), ManagerError> {
        if let Some(step) = json_prop.step {
            let normalized = normalize_step(step);
            if normalized != step {
                warn!("configured step {} replaced by {}", step, normalized);
            }
            self.step.set(normalized);
        }
        if let Some(targets) = json_prop.targets {
            self.targets.set(targets);
        }
        let profile_manager = self.profile_manager_cell.borrow();
        profile_manager.insert_obj_from_json_vec(&json_prop.profiles)
    }
}

impl Default for Configuration {
    fn default() -> Configuration {
        Configuration::new()
    }
}
