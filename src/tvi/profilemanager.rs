use std::collections::BTreeMap;

use serde::Deserialize;

use crate::manager::manager::{
    IManager,
    Manager
};
use crate::manager::managererror::{
    ManagerError,
    parse_json_value
};
use crate::tvi::tviprofile::TviProfile;
use crate::tvi::tvipreset::TviPreset;

#[derive(Deserialize)]
struct TviProfileJsonProp {
    points: BTreeMap<String, f64>
}

fn tvi_profile_from_json(name: &str, json_value: serde_json::Value) -> Result<TviProfile, ManagerError> {
    let json_prop: TviProfileJsonProp = parse_json_value(json_value)?;
    TviProfile::from_map(&json_prop.points).map_err(|source| ManagerError::ProfileError {
        name: name.to_owned(),
        source
    })
}

/// 具名 profile 的登錄表，建構時已放入所有內建 preset（以 slug 為名）。
///
/// JSON 格式：`{ "name": "press-a", "points": { "10": 6, "50": 18 } }`。
/// 同名的自訂 profile 會覆蓋 preset。
pub struct ProfileManager {}

impl ProfileManager {
    pub fn new() -> Manager<TviProfile> {
        let manager = Manager::new(tvi_profile_from_json);
        for preset in TviPreset::ALL {
            manager.insert(preset.slug(), preset.profile());
        }
        manager
    }
}
