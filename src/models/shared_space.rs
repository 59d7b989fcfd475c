use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SharedSpace {
    pub id: i64,
    pub name: String,
    pub capacity: i32,
    pub description: String,
}
