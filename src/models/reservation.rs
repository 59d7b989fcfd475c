use serde::{Deserialize, Serialize};

/// A teacher's booking of a shared area.
/// Dates travel as ISO `YYYY-MM-DD` / `HH:MM` strings, matching the backend.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Reservation {
    pub id: i64,
    pub title: Option<String>,
    pub day: Option<String>,
    pub start: Option<String>,
    pub end: Option<String>,
    pub area_id: Option<i64>,
    pub teacher_id: Option<i64>,
    pub status: Option<String>,
}
