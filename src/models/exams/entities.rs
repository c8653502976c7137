use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 考试状态：draft → active → completed → published
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/exam.ts")]
pub enum ExamStatus {
    Draft,     // 草稿，可编辑结构
    Active,    // 进行中，可录入成绩
    Completed, // 已结束，仍可补录
    Published, // 已发布
}

impl ExamStatus {
    pub const DRAFT: &'static str = "draft";
    pub const ACTIVE: &'static str = "active";
    pub const COMPLETED: &'static str = "completed";
    pub const PUBLISHED: &'static str = "published";

    /// 是否允许录入成绩
    pub fn accepts_results(&self) -> bool {
        matches!(self, ExamStatus::Active | ExamStatus::Completed)
    }
}

impl<'de> Deserialize<'de> for ExamStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(|_| {
            serde::de::Error::custom(format!(
                "无效的考试状态: '{s}'. 支持的状态: draft, active, completed, published"
            ))
        })
    }
}

impl std::fmt::Display for ExamStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExamStatus::Draft => write!(f, "{}", ExamStatus::DRAFT),
            ExamStatus::Active => write!(f, "{}", ExamStatus::ACTIVE),
            ExamStatus::Completed => write!(f, "{}", ExamStatus::COMPLETED),
            ExamStatus::Published => write!(f, "{}", ExamStatus::PUBLISHED),
        }
    }
}

impl std::str::FromStr for ExamStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            ExamStatus::DRAFT => Ok(ExamStatus::Draft),
            ExamStatus::ACTIVE => Ok(ExamStatus::Active),
            ExamStatus::COMPLETED => Ok(ExamStatus::Completed),
            ExamStatus::PUBLISHED => Ok(ExamStatus::Published),
            _ => Err(format!("Invalid exam status: {s}")),
        }
    }
}

// 考试范围（班级或科目）
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/exam.ts")]
pub enum ScopeType {
    AllSchool,       // 全校
    SelectedClasses, // 指定若干
    SingleClass,     // 仅一个
}

impl ScopeType {
    pub const ALL_SCHOOL: &'static str = "all_school";
    pub const SELECTED_CLASSES: &'static str = "selected_classes";
    pub const SINGLE_CLASS: &'static str = "single_class";
}

impl<'de> Deserialize<'de> for ScopeType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(|_| {
            serde::de::Error::custom(format!(
                "无效的范围类型: '{s}'. 支持的类型: all_school, selected_classes, single_class"
            ))
        })
    }
}

impl std::fmt::Display for ScopeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScopeType::AllSchool => write!(f, "{}", ScopeType::ALL_SCHOOL),
            ScopeType::SelectedClasses => write!(f, "{}", ScopeType::SELECTED_CLASSES),
            ScopeType::SingleClass => write!(f, "{}", ScopeType::SINGLE_CLASS),
        }
    }
}

impl std::str::FromStr for ScopeType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            ScopeType::ALL_SCHOOL => Ok(ScopeType::AllSchool),
            ScopeType::SELECTED_CLASSES => Ok(ScopeType::SelectedClasses),
            ScopeType::SINGLE_CLASS => Ok(ScopeType::SingleClass),
            _ => Err(format!("Invalid scope type: {s}")),
        }
    }
}

/// 考试类别（决定在学期总评中的权重）
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/exam.ts")]
pub struct ExamCategory {
    pub id: i64,
    pub school_id: i64,
    pub name: String,
    pub weight: f64,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/exam.ts")]
pub struct Exam {
    pub id: i64,
    pub school_id: i64,
    pub exam_series_id: i64,
    pub exam_category_id: i64,
    pub grading_system_id: i64,
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub scope_type: ScopeType,
    pub subject_scope_type: ScopeType,
    // 理论/实践拆分计分
    pub has_practical: bool,
    pub theory_percentage: Option<f64>,
    pub practical_percentage: Option<f64>,
    pub status: ExamStatus,
    pub created_by: Option<i64>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

/// 考试-科目关联上的配置
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/exam.ts")]
pub struct ExamSubject {
    pub id: i64,
    pub exam_id: i64,
    pub subject_id: i64,
    pub total_marks: f64,
    pub pass_mark: f64,
    pub has_papers: bool,
    pub paper_count: Option<i32>,
}

/// 试卷：科目下带权重的组成部分
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/exam.ts")]
pub struct ExamPaper {
    pub id: i64,
    pub exam_id: i64,
    pub subject_id: i64,
    pub paper_number: i32,
    pub name: Option<String>,
    pub total_marks: f64,
    pub pass_mark: f64,
    pub duration_minutes: Option<i32>,
    pub percentage_weight: f64,
    pub is_practical: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// 考试详情：结构校验与状态流转都基于它
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/exam.ts")]
pub struct ExamDetail {
    #[serde(flatten)]
    #[ts(flatten)]
    pub exam: Exam,
    pub class_ids: Vec<i64>,
    pub subjects: Vec<ExamSubject>,
    pub papers: Vec<ExamPaper>,
    pub result_count: i64,
}

impl ExamDetail {
    pub fn subject(&self, subject_id: i64) -> Option<&ExamSubject> {
        self.subjects.iter().find(|s| s.subject_id == subject_id)
    }

    pub fn papers_of(&self, subject_id: i64) -> impl Iterator<Item = &ExamPaper> {
        self.papers.iter().filter(move |p| p.subject_id == subject_id)
    }
}
