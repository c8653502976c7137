use chrono::NaiveDate;
use serde::Deserialize;
use ts_rs::TS;

/// 创建考试系列请求
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/exam_series.ts")]
pub struct CreateExamSeriesRequest {
    pub school_id: i64,
    pub name: String,
    pub academic_year: String,
    pub term: i32,
    pub start_date: NaiveDate, // "2026-01-24"
    pub end_date: NaiveDate,
}

// 考试系列列表查询参数
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/exam_series.ts")]
pub struct ExamSeriesListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub school_id: i64,
    pub academic_year: Option<String>,
}
