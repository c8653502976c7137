use super::entities::{GradingSystem, ResolvedGrade};
use serde::Serialize;
use ts_rs::TS;

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/grading.ts")]
pub struct GradingSystemListResponse {
    pub items: Vec<GradingSystem>,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/grading.ts")]
pub struct ResolveGradeResponse {
    pub grading_system_id: i64,
    pub score: f64,
    #[serde(flatten)]
    #[ts(flatten)]
    pub resolved: ResolvedGrade,
}
