use super::entities::ScopeType;
use chrono::NaiveDate;
use serde::Deserialize;
use ts_rs::TS;

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/exam.ts")]
pub struct CreateExamCategoryRequest {
    pub school_id: i64,
    pub name: String,
    pub weight: Option<f64>,
}

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/exam.ts")]
pub struct ExamCategoryListQuery {
    pub school_id: i64,
}

// 单个科目的考试配置
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/exam.ts")]
pub struct SubjectSetting {
    pub subject_id: i64,
    pub total_marks: Option<f64>, // 默认 100
    pub pass_mark: Option<f64>,
    #[serde(default)]
    pub has_papers: bool,
    pub paper_count: Option<i32>,
}

/// 创建考试请求
///
/// `class_ids` 在 `scope_type = all_school` 时忽略；
/// `subjects` 在 `subject_scope_type = all_school` 时仅用于覆盖个别科目的配置。
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/exam.ts")]
pub struct CreateExamRequest {
    pub exam_series_id: i64,
    pub exam_category_id: i64,
    pub grading_system_id: i64,
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub scope_type: ScopeType,
    #[serde(default)]
    pub class_ids: Vec<i64>,
    pub subject_scope_type: ScopeType,
    #[serde(default)]
    pub subjects: Vec<SubjectSetting>,
    #[serde(default)]
    pub has_practical: bool,
    pub theory_percentage: Option<f64>,
    pub practical_percentage: Option<f64>,
    pub created_by: Option<i64>,
}

/// 创建试卷请求
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/exam.ts")]
pub struct CreateExamPaperRequest {
    pub subject_id: i64,
    pub paper_number: i32,
    pub name: Option<String>,
    pub total_marks: f64,
    pub pass_mark: Option<f64>,
    pub duration_minutes: Option<i32>,
    pub percentage_weight: f64,
    #[serde(default)]
    pub is_practical: bool,
}

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/exam.ts")]
pub struct ExamListQuery {
    pub exam_series_id: i64,
}
