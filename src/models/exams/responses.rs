use super::entities::{Exam, ExamCategory};
use crate::models::FieldError;
use serde::Serialize;
use ts_rs::TS;

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/exam.ts")]
pub struct ExamListResponse {
    pub items: Vec<Exam>,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/exam.ts")]
pub struct ExamCategoryListResponse {
    pub items: Vec<ExamCategory>,
}

/// 结构校验报告
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/exam.ts")]
pub struct ExamValidationResponse {
    pub exam_id: i64,
    pub is_valid: bool,
    pub errors: Vec<FieldError>,
}
