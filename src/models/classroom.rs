use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Classroom {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub capacity: Option<i32>,
    pub teacher_id: Option<i64>,
}

/// A piece of equipment assigned to a classroom.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ClassroomResource {
    pub id: i64,
    pub name: String,
    pub kind_of_resource: Option<String>,
    pub description: Option<String>,
    pub classroom_id: Option<i64>,
}
