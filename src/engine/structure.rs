//! 考试结构校验与状态机

use super::scoring::{PaperWeight, ScoringMode};
use crate::models::FieldError;
use crate::models::exams::entities::{ExamDetail, ExamStatus};

/// 试卷权重之和允许的误差
pub const WEIGHT_TOLERANCE: f64 = 0.01;

/// 考试状态流转
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExamTransition {
    Activate,
    Complete,
    Publish,
}

impl ExamTransition {
    pub fn name(&self) -> &'static str {
        match self {
            ExamTransition::Activate => "activate",
            ExamTransition::Complete => "complete",
            ExamTransition::Publish => "publish",
        }
    }

    /// 流转要求的当前状态
    pub fn from_status(&self) -> ExamStatus {
        match self {
            ExamTransition::Activate => ExamStatus::Draft,
            ExamTransition::Complete => ExamStatus::Active,
            ExamTransition::Publish => ExamStatus::Completed,
        }
    }

    pub fn to_status(&self) -> ExamStatus {
        match self {
            ExamTransition::Activate => ExamStatus::Active,
            ExamTransition::Complete => ExamStatus::Completed,
            ExamTransition::Publish => ExamStatus::Published,
        }
    }
}

impl std::fmt::Display for ExamTransition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// 对一场考试的结构视图
pub struct ExamStructure<'a> {
    detail: &'a ExamDetail,
}

impl<'a> ExamStructure<'a> {
    pub fn new(detail: &'a ExamDetail) -> Self {
        Self { detail }
    }

    /// 结构完整性校验，返回全部问题（不短路）
    ///
    /// 检查顺序：科目、班级、日期、分卷权重。
    pub fn validate(&self) -> Vec<FieldError> {
        let detail = self.detail;
        let mut errors = Vec::new();

        if detail.subjects.is_empty() {
            errors.push(FieldError::new("subjects", "考试至少需要关联一个科目"));
        }
        if detail.class_ids.is_empty() {
            errors.push(FieldError::new("classes", "考试至少需要关联一个班级"));
        }
        if detail.exam.start_date > detail.exam.end_date {
            errors.push(FieldError::new(
                "end_date",
                format!(
                    "结束日期 {} 早于开始日期 {}",
                    detail.exam.end_date, detail.exam.start_date
                ),
            ));
        }

        for subject in detail.subjects.iter().filter(|s| s.has_papers) {
            let field = format!("subjects[{}].papers", subject.subject_id);
            let papers: Vec<_> = detail.papers_of(subject.subject_id).collect();
            if papers.is_empty() {
                errors.push(FieldError::new(field, "分卷科目尚未添加试卷"));
                continue;
            }
            let sum: f64 = papers.iter().map(|p| p.percentage_weight).sum();
            if (sum - 100.0).abs() > WEIGHT_TOLERANCE {
                errors.push(FieldError::new(
                    field,
                    format!("试卷权重之和为 {sum}，必须为 100"),
                ));
            }
        }

        errors
    }

    /// 检查状态流转前置条件，成功时返回目标状态
    ///
    /// 不做任何写入；实际写入由存储层以"当前状态 = from_status"为条件原子完成。
    pub fn check_transition(&self, transition: ExamTransition) -> Result<ExamStatus, Vec<FieldError>> {
        let mut errors = Vec::new();
        let current = self.detail.exam.status;

        if current != transition.from_status() {
            errors.push(FieldError::new(
                "status",
                format!(
                    "考试当前状态为 {current}，只有 {} 状态可以执行 {transition}",
                    transition.from_status()
                ),
            ));
        }

        match transition {
            ExamTransition::Activate => errors.extend(self.validate()),
            ExamTransition::Complete => {}
            ExamTransition::Publish => {
                if self.detail.result_count == 0 {
                    errors.push(FieldError::new("results", "考试尚无任何成绩，无法发布"));
                }
            }
        }

        if errors.is_empty() {
            Ok(transition.to_status())
        } else {
            Err(errors)
        }
    }

    /// 解析某科目的计分方式，科目未关联时返回 None
    pub fn scoring_mode(&self, subject_id: i64) -> Option<ScoringMode> {
        let subject = self.detail.subject(subject_id)?;
        if subject.has_papers {
            let mut papers: Vec<_> = self.detail.papers_of(subject_id).collect();
            papers.sort_by_key(|p| p.paper_number);
            return Some(ScoringMode::MultiPaper(
                papers
                    .into_iter()
                    .map(|p| PaperWeight {
                        paper_id: p.id,
                        weight: p.percentage_weight,
                    })
                    .collect(),
            ));
        }
        let exam = &self.detail.exam;
        if exam.has_practical {
            return Some(ScoringMode::TheoryPractical {
                theory_weight: exam.theory_percentage.unwrap_or(0.0),
                practical_weight: exam.practical_percentage.unwrap_or(0.0),
            });
        }
        Some(ScoringMode::Simple)
    }
}
