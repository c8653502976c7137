use super::entities::ExamSeries;
use crate::models::common::PaginationInfo;
use serde::Serialize;
use ts_rs::TS;

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/exam_series.ts")]
pub struct ExamSeriesListResponse {
    pub pagination: PaginationInfo,
    pub items: Vec<ExamSeries>,
}
