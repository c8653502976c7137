//! 评分体系查表

use crate::models::FieldError;
use crate::models::grading::entities::{GradeBand, ResolvedGrade};
use crate::models::grading::requests::GradeBandInput;

/// 一个评分体系的等级区间集合
///
/// 区间按 `sort_order` 升序查找，第一个包含分数的区间胜出。
/// 写入时已拒绝重叠区间，因此对合法数据查找结果唯一。
#[derive(Debug, Clone, Copy)]
pub struct GradingCatalog<'a> {
    bands: &'a [GradeBand],
}

impl<'a> GradingCatalog<'a> {
    pub fn new(bands: &'a [GradeBand]) -> Self {
        Self { bands }
    }

    pub fn is_empty(&self) -> bool {
        self.bands.is_empty()
    }

    /// 查找包含 `score` 的区间（两端闭合）
    pub fn resolve(&self, score: f64) -> Option<&'a GradeBand> {
        if score.is_nan() {
            return None;
        }
        self.bands.iter().find(|band| band.contains(score))
    }

    /// 查找失败时返回 `"N/A"`，不视为错误
    pub fn resolve_or_ungraded(&self, score: f64) -> ResolvedGrade {
        self.resolve(score)
            .map(ResolvedGrade::from)
            .unwrap_or_else(ResolvedGrade::ungraded)
    }
}

/// 校验等级区间定义
///
/// 拒绝：空列表、空等级名、越出 [0, 100]、min > max、负绩点、两两重叠。
/// 区间之间允许有空档，落在空档内的分数解析为 `"N/A"`。
pub fn validate_bands(bands: &[GradeBandInput]) -> Vec<FieldError> {
    let mut errors = Vec::new();

    if bands.is_empty() {
        errors.push(FieldError::new("bands", "至少需要一个等级区间"));
        return errors;
    }

    for (i, band) in bands.iter().enumerate() {
        let field = |name: &str| format!("bands[{i}].{name}");

        if band.grade.trim().is_empty() {
            errors.push(FieldError::new(field("grade"), "等级名称不能为空"));
        }
        if !(0.0..=100.0).contains(&band.min_score) {
            errors.push(FieldError::new(field("min_score"), "必须在 0 到 100 之间"));
        }
        if !(0.0..=100.0).contains(&band.max_score) {
            errors.push(FieldError::new(field("max_score"), "必须在 0 到 100 之间"));
        }
        if band.min_score > band.max_score {
            errors.push(FieldError::new(
                field("min_score"),
                format!(
                    "下限 {} 大于上限 {}",
                    band.min_score, band.max_score
                ),
            ));
        }
        if band.points.is_some_and(|p| p < 0.0) {
            errors.push(FieldError::new(field("points"), "绩点不能为负数"));
        }
    }

    for i in 0..bands.len() {
        for j in (i + 1)..bands.len() {
            let (a, b) = (&bands[i], &bands[j]);
            if a.min_score > a.max_score || b.min_score > b.max_score {
                continue;
            }
            if a.min_score <= b.max_score && b.min_score <= a.max_score {
                errors.push(FieldError::new(
                    format!("bands[{j}]"),
                    format!(
                        "区间 {} [{}, {}] 与 {} [{}, {}] 重叠",
                        b.grade, b.min_score, b.max_score, a.grade, a.min_score, a.max_score
                    ),
                ));
            }
        }
    }

    errors
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn band(grade: &str, min: f64, max: f64, points: f64) -> GradeBand {
        GradeBand {
            id: 0,
            grading_system_id: 1,
            min_score: min,
            max_score: max,
            grade: grade.to_string(),
            points,
            remarks: None,
            sort_order: 0,
        }
    }

    /// 常见的 12 级体系，区间边界用 .99 衔接覆盖 [0, 100]
    pub(crate) fn kcse_bands() -> Vec<GradeBand> {
        vec![
            band("A", 80.0, 100.0, 12.0),
            band("A-", 75.0, 79.99, 11.0),
            band("B+", 70.0, 74.99, 10.0),
            band("B", 65.0, 69.99, 9.0),
            band("B-", 60.0, 64.99, 8.0),
            band("C+", 55.0, 59.99, 7.0),
            band("C", 50.0, 54.99, 6.0),
            band("C-", 45.0, 49.99, 5.0),
            band("D+", 40.0, 44.99, 4.0),
            band("D", 35.0, 39.99, 3.0),
            band("D-", 30.0, 34.99, 2.0),
            band("E", 0.0, 29.99, 1.0),
        ]
    }

    fn input(grade: &str, min: f64, max: f64) -> GradeBandInput {
        GradeBandInput {
            grade: grade.to_string(),
            min_score: min,
            max_score: max,
            points: None,
            remarks: None,
        }
    }

    #[test]
    fn test_every_score_resolves_on_full_coverage() {
        let bands = kcse_bands();
        let catalog = GradingCatalog::new(&bands);
        for whole in 0..=100 {
            let score = whole as f64;
            assert!(catalog.resolve(score).is_some(), "score {score} unresolved");
        }
        for score in [0.5, 29.99, 44.5, 79.99, 99.99] {
            assert!(catalog.resolve(score).is_some(), "score {score} unresolved");
        }
    }

    #[test]
    fn test_bounds_are_inclusive() {
        let bands = kcse_bands();
        let catalog = GradingCatalog::new(&bands);
        assert_eq!(catalog.resolve(80.0).unwrap().grade, "A");
        assert_eq!(catalog.resolve(100.0).unwrap().grade, "A");
        assert_eq!(catalog.resolve(79.99).unwrap().grade, "A-");
        assert_eq!(catalog.resolve(0.0).unwrap().grade, "E");
    }

    #[test]
    fn test_unmatched_score_is_ungraded() {
        let bands = vec![band("P", 50.0, 100.0, 1.0)];
        let catalog = GradingCatalog::new(&bands);
        let resolved = catalog.resolve_or_ungraded(20.0);
        assert_eq!(resolved.grade, ResolvedGrade::UNGRADED);
        assert_eq!(resolved.points, 0.0);
        assert!(GradingCatalog::new(&[]).resolve(50.0).is_none());
    }

    #[test]
    fn test_overlap_resolves_first_in_order() {
        let bands = vec![band("X", 40.0, 60.0, 2.0), band("Y", 50.0, 70.0, 3.0)];
        let catalog = GradingCatalog::new(&bands);
        assert_eq!(catalog.resolve(55.0).unwrap().grade, "X");
    }

    #[test]
    fn test_validate_rejects_overlap_and_inverted_bounds() {
        let errors = validate_bands(&[
            input("A", 70.0, 100.0),
            input("B", 60.0, 70.0),
            input("C", 59.0, 10.0),
        ]);
        assert!(errors.iter().any(|e| e.field == "bands[1]"));
        assert!(errors.iter().any(|e| e.field == "bands[2].min_score"));
    }

    #[test]
    fn test_validate_accepts_contiguous_bands() {
        let errors = validate_bands(&[
            input("A", 70.0, 100.0),
            input("B", 50.0, 69.99),
            input("C", 0.0, 49.99),
        ]);
        assert!(errors.is_empty(), "{errors:?}");
    }

    #[test]
    fn test_validate_reports_all_errors() {
        let errors = validate_bands(&[input("", -5.0, 120.0)]);
        assert_eq!(errors.len(), 3);
        assert!(validate_bands(&[]).iter().any(|e| e.field == "bands"));
    }
}
