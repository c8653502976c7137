use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// 学生学期汇总，(student_id, exam_series_id) 唯一
///
/// 这是派生缓存：每次生成都由成绩表完整重算，不做增量更新。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/summary.ts")]
pub struct StudentTermSummary {
    pub id: i64,
    pub student_id: i64,
    pub exam_series_id: i64,
    pub school_id: i64,
    pub class_id: Option<i64>,
    pub stream_id: Option<i64>,
    pub total_subjects: i32,
    // 各科总分之和
    pub total_points: f64,
    pub total_possible_marks: f64,
    // 各科等级绩点之和
    pub total_grade_points: f64,
    pub average_score: f64,
    pub average_percentage: f64,
    pub average_grade: String,
    pub overall_position: Option<i32>,
    pub class_position: Option<i32>,
    pub stream_position: Option<i32>,
    pub generated_at: chrono::DateTime<chrono::Utc>,
}
