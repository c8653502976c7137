use super::entities::StudentTermSummary;
use crate::models::common::PaginationInfo;
use serde::Serialize;
use ts_rs::TS;

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/summary.ts")]
pub struct SummaryListResponse {
    pub pagination: PaginationInfo,
    pub items: Vec<StudentTermSummary>,
}

/// 重新生成的统计
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/summary.ts")]
pub struct GenerateSummariesResponse {
    pub exam_series_id: i64,
    pub generated: usize,
    pub removed: usize,
    pub generated_at: chrono::DateTime<chrono::Utc>,
}
