use serde::{
    Serialize,
    Deserialize
};

/// 只讀出 JSON 物件的 `name` 欄位，其餘欄位交給各自的 parser。
#[derive(Clone, Serialize, Deserialize)]
pub struct NamedJsonObject {
    name: String
}


impl NamedJsonObject {
    pub fn new(name: String) -> NamedJsonObject {
        NamedJsonObject { name: name }
    }

    pub fn name(&self) -> &str {
        self.name.trim()
    }
}
