//! 学期汇总

use std::collections::HashMap;

use super::catalog::GradingCatalog;
use super::ranking::{RankScope, Rankable, rank_all_scopes};
use super::round2;
use crate::models::grading::entities::ResolvedGrade;

/// 参与汇总的学生
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StudentRecord {
    pub student_id: i64,
    pub class_id: Option<i64>,
    pub stream_id: Option<i64>,
}

/// 一条科目成绩在汇总中的贡献
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SubjectOutcome {
    pub student_id: i64,
    pub total_score: f64,
    /// 该科在考试中配置的满分
    pub possible_marks: f64,
    /// 按考试评分体系得到的绩点
    pub points: f64,
    pub is_absent: bool,
}

/// 尚未落库的学期汇总
#[derive(Debug, Clone, PartialEq)]
pub struct TermSummaryDraft {
    pub student_id: i64,
    pub class_id: Option<i64>,
    pub stream_id: Option<i64>,
    pub total_subjects: i32,
    pub total_points: f64,
    pub total_possible_marks: f64,
    pub total_grade_points: f64,
    pub average_score: f64,
    pub average_percentage: f64,
    pub average_grade: String,
    pub overall_position: Option<i32>,
    pub class_position: Option<i32>,
    pub stream_position: Option<i32>,
}

impl Rankable for TermSummaryDraft {
    fn rank_score(&self) -> f64 {
        self.average_percentage
    }

    fn tie_breaker(&self) -> f64 {
        self.total_points
    }

    fn identity(&self) -> i64 {
        self.student_id
    }

    fn class_id(&self) -> Option<i64> {
        self.class_id
    }

    fn stream_id(&self) -> Option<i64> {
        self.stream_id
    }

    fn set_position(&mut self, scope: RankScope, position: Option<i32>) {
        match scope {
            RankScope::Overall => self.overall_position = position,
            RankScope::Class => self.class_position = position,
            RankScope::Stream => self.stream_position = position,
        }
    }
}

/// 汇总一名学生的全部成绩
///
/// 缺考成绩不计入；没有任何有效成绩时返回 None（不生成零分记录）。
/// 总评等级按学校默认评分体系对 `average_percentage` 查表，无默认体系时为 `"N/A"`。
pub fn summarize_student<'a>(
    student: &StudentRecord,
    outcomes: impl IntoIterator<Item = &'a SubjectOutcome>,
    default_catalog: Option<&GradingCatalog<'_>>,
) -> Option<TermSummaryDraft> {
    let mut total_subjects = 0;
    let mut total_points = 0.0;
    let mut total_possible_marks = 0.0;
    let mut total_grade_points = 0.0;

    for outcome in outcomes.into_iter().filter(|o| !o.is_absent) {
        total_subjects += 1;
        total_points += outcome.total_score;
        total_possible_marks += outcome.possible_marks;
        total_grade_points += outcome.points;
    }

    if total_subjects == 0 {
        return None;
    }

    let average_percentage = if total_possible_marks > 0.0 {
        round2(total_points / total_possible_marks * 100.0)
    } else {
        0.0
    };
    let average_score = round2(total_points / total_subjects as f64);

    let average_grade = match default_catalog {
        Some(catalog) => catalog.resolve_or_ungraded(average_percentage).grade,
        None => ResolvedGrade::UNGRADED.to_string(),
    };

    Some(TermSummaryDraft {
        student_id: student.student_id,
        class_id: student.class_id,
        stream_id: student.stream_id,
        total_subjects,
        total_points: round2(total_points),
        total_possible_marks: round2(total_possible_marks),
        total_grade_points: round2(total_grade_points),
        average_score,
        average_percentage,
        average_grade,
        overall_position: None,
        class_position: None,
        stream_position: None,
    })
}

/// 生成整个考试系列的汇总并完成三个范围的排名
///
/// 先汇总全部学生，再排名；结果按学生 id 升序，同样的输入总是得到同样的输出。
pub fn build_series_summaries(
    students: &[StudentRecord],
    outcomes: &[SubjectOutcome],
    default_catalog: Option<&GradingCatalog<'_>>,
) -> Vec<TermSummaryDraft> {
    let mut by_student: HashMap<i64, Vec<&SubjectOutcome>> = HashMap::new();
    for outcome in outcomes {
        by_student.entry(outcome.student_id).or_default().push(outcome);
    }

    let mut ordered: Vec<&StudentRecord> = students.iter().collect();
    ordered.sort_by_key(|s| s.student_id);
    ordered.dedup_by_key(|s| s.student_id);

    let mut drafts: Vec<TermSummaryDraft> = ordered
        .into_iter()
        .filter_map(|student| {
            let outcomes = by_student.get(&student.student_id)?;
            summarize_student(student, outcomes.iter().copied(), default_catalog)
        })
        .collect();

    rank_all_scopes(&mut drafts);
    drafts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::catalog::tests::kcse_bands;

    fn student(student_id: i64, class_id: Option<i64>, stream_id: Option<i64>) -> StudentRecord {
        StudentRecord {
            student_id,
            class_id,
            stream_id,
        }
    }

    fn outcome(student_id: i64, total_score: f64) -> SubjectOutcome {
        SubjectOutcome {
            student_id,
            total_score,
            possible_marks: 100.0,
            points: 0.0,
            is_absent: false,
        }
    }

    fn absent(student_id: i64) -> SubjectOutcome {
        SubjectOutcome {
            student_id,
            total_score: 0.0,
            possible_marks: 100.0,
            points: 0.0,
            is_absent: true,
        }
    }

    #[test]
    fn test_summary_derivation() {
        let outcomes = [outcome(1, 70.0), outcome(1, 80.0), outcome(1, 90.0)];
        let bands = kcse_bands();
        let catalog = GradingCatalog::new(&bands);
        let summary = summarize_student(&student(1, None, None), &outcomes, Some(&catalog)).unwrap();

        assert_eq!(summary.average_percentage, 80.0);
        assert_eq!(summary.total_points, 240.0);
        assert_eq!(summary.total_subjects, 3);
        assert_eq!(summary.average_score, 80.0);
        assert_eq!(summary.total_possible_marks, 300.0);
        assert_eq!(summary.average_grade, "A");
    }

    #[test]
    fn test_zero_possible_marks_gives_zero_percentage() {
        let outcomes = [SubjectOutcome {
            possible_marks: 0.0,
            ..outcome(1, 0.0)
        }];
        let summary = summarize_student(&student(1, None, None), &outcomes, None).unwrap();
        assert_eq!(summary.average_percentage, 0.0);
        assert!(!summary.average_percentage.is_nan());
    }

    #[test]
    fn test_absent_results_are_excluded() {
        let outcomes = [outcome(1, 60.0), absent(1)];
        let summary = summarize_student(&student(1, None, None), &outcomes, None).unwrap();
        assert_eq!(summary.total_subjects, 1);
        assert_eq!(summary.total_possible_marks, 100.0);
        assert_eq!(summary.average_percentage, 60.0);

        let only_absent = [absent(2)];
        assert!(summarize_student(&student(2, None, None), &only_absent, None).is_none());
    }

    #[test]
    fn test_student_without_results_gets_no_summary() {
        let students = [student(1, Some(1), None), student(2, Some(1), None)];
        let drafts = build_series_summaries(&students, &[outcome(1, 50.0)], None);
        assert_eq!(drafts.len(), 1);
        assert_eq!(drafts[0].student_id, 1);
        assert_eq!(drafts[0].average_grade, "N/A");
    }

    #[test]
    fn test_series_ranking_across_scopes() {
        let students = [
            student(1, Some(1), Some(11)),
            student(2, Some(1), Some(12)),
            student(3, Some(2), None),
            student(4, Some(2), None),
        ];
        let outcomes = [
            outcome(1, 80.0),
            outcome(2, 90.0),
            outcome(3, 80.0),
            outcome(4, 40.0),
            absent(4),
        ];
        let drafts = build_series_summaries(&students, &outcomes, None);
        let positions: Vec<_> = drafts
            .iter()
            .map(|d| {
                (
                    d.student_id,
                    d.overall_position,
                    d.class_position,
                    d.stream_position,
                )
            })
            .collect();
        assert_eq!(
            positions,
            vec![
                (1, Some(2), Some(2), Some(1)),
                (2, Some(1), Some(1), Some(1)),
                (3, Some(2), Some(1), Some(1)),
                (4, Some(4), Some(2), Some(2)),
            ]
        );
    }

    #[test]
    fn test_tie_on_percentage_shares_rank() {
        // 平均百分比相同则名次相同，总分只决定组内顺序
        let students = [student(1, None, None), student(2, None, None)];
        let outcomes = [
            outcome(1, 50.0),
            outcome(1, 50.0),
            SubjectOutcome {
                possible_marks: 200.0,
                ..outcome(2, 100.0)
            },
        ];
        let drafts = build_series_summaries(&students, &outcomes, None);
        assert_eq!(drafts[0].overall_position, Some(1));
        assert_eq!(drafts[1].overall_position, Some(1));
    }

    #[test]
    fn test_rebuild_is_identical() {
        let students = [student(1, Some(1), None), student(2, Some(1), None)];
        let outcomes = [outcome(1, 33.33), outcome(1, 66.67), outcome(2, 71.0)];
        let bands = kcse_bands();
        let catalog = GradingCatalog::new(&bands);
        let first = build_series_summaries(&students, &outcomes, Some(&catalog));
        let second = build_series_summaries(&students, &outcomes, Some(&catalog));
        assert_eq!(first, second);
    }
}
