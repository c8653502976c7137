use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// 学生单科成绩
///
/// 缺考记录固定为 `grade = "ABS"`、分数与绩点为 0，且不参与任何排名与平均。
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/result.ts")]
pub struct ExamResult {
    pub id: i64,
    pub exam_id: i64,
    pub student_id: i64,
    pub subject_id: i64,
    pub theory_score: Option<f64>,
    pub practical_score: Option<f64>,
    pub total_score: f64,
    pub grade: String,
    pub points: f64,
    pub position: Option<i32>,
    pub class_position: Option<i32>,
    pub stream_position: Option<i32>,
    pub is_absent: bool,
    pub remarks: Option<String>,
    pub entered_by: Option<i64>,
    pub entered_at: chrono::DateTime<chrono::Utc>,
    pub verified_by: Option<i64>,
    pub verified_at: Option<chrono::DateTime<chrono::Utc>>,
}

/// 学生单张试卷的原始得分
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/result.ts")]
pub struct ExamPaperResult {
    pub id: i64,
    pub exam_result_id: i64,
    pub exam_paper_id: i64,
    pub student_id: i64,
    pub marks: f64,
    pub is_absent: bool,
    pub position: Option<i32>,
    pub entered_by: Option<i64>,
    pub entered_at: chrono::DateTime<chrono::Utc>,
}
