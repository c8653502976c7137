//! 单科成绩计分

use super::catalog::GradingCatalog;
use super::round2;
use crate::models::grading::entities::ResolvedGrade;

/// 分卷权重
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PaperWeight {
    pub paper_id: i64,
    pub weight: f64,
}

/// 科目的计分方式，在读取考试结构时确定一次
#[derive(Debug, Clone, PartialEq)]
pub enum ScoringMode {
    /// 直接使用录入分数
    Simple,
    /// 理论/实践按百分比加权
    TheoryPractical {
        theory_weight: f64,
        practical_weight: f64,
    },
    /// 各分卷 `marks × weight / 100` 之和
    MultiPaper(Vec<PaperWeight>),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PaperMark {
    pub paper_id: i64,
    pub marks: f64,
    pub is_absent: bool,
}

/// 一条待计分的成绩
#[derive(Debug, Clone, Copy, Default)]
pub struct ScoreInput<'a> {
    pub is_absent: bool,
    pub score: Option<f64>,
    pub theory_score: Option<f64>,
    pub practical_score: Option<f64>,
    pub paper_marks: &'a [PaperMark],
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScoredResult {
    pub total_score: f64,
    pub grade: String,
    pub points: f64,
}

impl ScoredResult {
    pub fn absent() -> Self {
        let resolved = ResolvedGrade::absent();
        Self {
            total_score: 0.0,
            grade: resolved.grade,
            points: resolved.points,
        }
    }

    pub fn is_absent(&self) -> bool {
        self.grade == ResolvedGrade::ABSENT
    }
}

impl ScoringMode {
    /// 计算科目总分（保留两位小数）
    ///
    /// 分数范围已在入口校验过，这里不做截断。
    pub fn compute_total(&self, input: &ScoreInput<'_>) -> f64 {
        let total = match self {
            ScoringMode::Simple => input.score.or(input.theory_score).unwrap_or(0.0),
            ScoringMode::TheoryPractical {
                theory_weight,
                practical_weight,
            } => {
                input.theory_score.unwrap_or(0.0) * theory_weight / 100.0
                    + input.practical_score.unwrap_or(0.0) * practical_weight / 100.0
            }
            ScoringMode::MultiPaper(weights) => input
                .paper_marks
                .iter()
                .filter(|m| !m.is_absent)
                .filter_map(|m| {
                    weights
                        .iter()
                        .find(|w| w.paper_id == m.paper_id)
                        .map(|w| m.marks * w.weight / 100.0)
                })
                .sum(),
        };
        round2(total)
    }

    /// 计分并定级；缺考直接返回 ABS，不查评分体系
    pub fn assign_grade(&self, input: &ScoreInput<'_>, catalog: &GradingCatalog<'_>) -> ScoredResult {
        if input.is_absent {
            return ScoredResult::absent();
        }
        let total_score = self.compute_total(input);
        let resolved = catalog.resolve_or_ungraded(total_score);
        ScoredResult {
            total_score,
            grade: resolved.grade,
            points: resolved.points,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::catalog::tests::kcse_bands;

    fn two_papers() -> ScoringMode {
        ScoringMode::MultiPaper(vec![
            PaperWeight { paper_id: 1, weight: 60.0 },
            PaperWeight { paper_id: 2, weight: 40.0 },
        ])
    }

    fn mark(paper_id: i64, marks: f64) -> PaperMark {
        PaperMark {
            paper_id,
            marks,
            is_absent: false,
        }
    }

    #[test]
    fn test_weighted_paper_total() {
        let marks = [mark(1, 80.0), mark(2, 50.0)];
        let input = ScoreInput {
            paper_marks: &marks,
            ..Default::default()
        };
        assert_eq!(two_papers().compute_total(&input), 68.0);
    }

    #[test]
    fn test_absent_paper_is_skipped() {
        let marks = [
            mark(1, 80.0),
            PaperMark {
                paper_id: 2,
                marks: 90.0,
                is_absent: true,
            },
        ];
        let input = ScoreInput {
            paper_marks: &marks,
            ..Default::default()
        };
        assert_eq!(two_papers().compute_total(&input), 48.0);
    }

    #[test]
    fn test_theory_practical_split() {
        let mode = ScoringMode::TheoryPractical {
            theory_weight: 70.0,
            practical_weight: 30.0,
        };
        let input = ScoreInput {
            theory_score: Some(60.0),
            practical_score: Some(90.0),
            ..Default::default()
        };
        assert_eq!(mode.compute_total(&input), 69.0);
    }

    #[test]
    fn test_simple_score_passes_through() {
        let input = ScoreInput {
            score: Some(72.5),
            ..Default::default()
        };
        assert_eq!(ScoringMode::Simple.compute_total(&input), 72.5);
    }

    #[test]
    fn test_assign_grade_resolves_band() {
        let bands = kcse_bands();
        let catalog = GradingCatalog::new(&bands);
        let input = ScoreInput {
            score: Some(81.0),
            ..Default::default()
        };
        let scored = ScoringMode::Simple.assign_grade(&input, &catalog);
        assert_eq!(scored.grade, "A");
        assert_eq!(scored.points, 12.0);
        assert_eq!(scored.total_score, 81.0);
    }

    #[test]
    fn test_absent_is_abs_with_zero() {
        let bands = kcse_bands();
        let catalog = GradingCatalog::new(&bands);
        let input = ScoreInput {
            is_absent: true,
            score: Some(95.0),
            ..Default::default()
        };
        let scored = ScoringMode::Simple.assign_grade(&input, &catalog);
        assert!(scored.is_absent());
        assert_eq!(scored.grade, "ABS");
        assert_eq!(scored.points, 0.0);
        assert_eq!(scored.total_score, 0.0);
    }

    #[test]
    fn test_unresolved_total_is_na() {
        let catalog = GradingCatalog::new(&[]);
        let input = ScoreInput {
            score: Some(50.0),
            ..Default::default()
        };
        let scored = ScoringMode::Simple.assign_grade(&input, &catalog);
        assert_eq!(scored.grade, ResolvedGrade::UNGRADED);
        assert_eq!(scored.points, 0.0);
        assert_eq!(scored.total_score, 50.0);
    }
}
