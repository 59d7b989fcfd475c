use serde::{Deserialize, Serialize};

/// Breakdown report a teacher files against a classroom resource.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BreakdownReport {
    pub id: i64,
    pub kind_of_report: String,
    pub description: String,
    pub resource_id: i64,
    pub created_at: Option<String>,
    pub status: Option<String>,
}
