use serde::{Deserialize, Serialize};

use super::classroom::Classroom;
use super::profile::{AdministratorProfile, TeacherProfile};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Meeting {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub day: String,
    pub start: String,
    pub end: String,
    pub classroom: Option<Classroom>,
    pub administrator: Option<AdministratorProfile>,
    pub teachers: Vec<TeacherProfile>,
}
