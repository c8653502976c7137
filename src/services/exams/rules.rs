//! 考试与试卷创建规则（纯函数，便于单测）

use std::collections::BTreeMap;

use crate::engine::structure::WEIGHT_TOLERANCE;
use crate::models::FieldError;
use crate::models::exams::{
    entities::{ExamDetail, ExamStatus, ScopeType},
    requests::{CreateExamPaperRequest, CreateExamRequest, SubjectSetting},
};
use crate::models::schools::entities::{SchoolClass, Subject};
use crate::utils::validate::{push_error, validate_name};

/// 按范围解析后的班级与科目
#[derive(Debug, Clone)]
pub struct ResolvedScope {
    pub class_ids: Vec<i64>,
    pub subjects: Vec<SubjectSetting>,
}

fn default_setting(subject_id: i64) -> SubjectSetting {
    SubjectSetting {
        subject_id,
        total_marks: None,
        pass_mark: None,
        has_papers: false,
        paper_count: None,
    }
}

fn check_setting(index: usize, setting: &SubjectSetting, errors: &mut Vec<FieldError>) {
    let field = format!("subjects[{index}]");
    let total = setting.total_marks.unwrap_or(100.0);
    if !(total.is_finite() && total > 0.0) {
        errors.push(FieldError::new(
            format!("{field}.total_marks"),
            "满分必须大于 0",
        ));
    }
    if setting
        .pass_mark
        .is_some_and(|pass| !(0.0..=total).contains(&pass))
    {
        errors.push(FieldError::new(
            format!("{field}.pass_mark"),
            format!("及格分必须在 0 到 {total} 之间"),
        ));
    }
    if setting.paper_count.is_some_and(|count| count < 1) {
        errors.push(FieldError::new(
            format!("{field}.paper_count"),
            "试卷数量至少为 1",
        ));
    }
}

/// 校验与范围无关的字段
pub fn validate_exam_request(req: &CreateExamRequest) -> Vec<FieldError> {
    let mut errors = Vec::new();
    push_error(&mut errors, "name", validate_name(&req.name, 128));

    if req.end_date < req.start_date {
        errors.push(FieldError::new("end_date", "结束日期不能早于开始日期"));
    }

    if req.has_practical {
        match (req.theory_percentage, req.practical_percentage) {
            (Some(theory), Some(practical)) => {
                for (field, value) in [
                    ("theory_percentage", theory),
                    ("practical_percentage", practical),
                ] {
                    if !(0.0..=100.0).contains(&value) {
                        errors.push(FieldError::new(field, "百分比必须在 0 到 100 之间"));
                    }
                }
                if ((theory + practical) - 100.0).abs() > WEIGHT_TOLERANCE {
                    errors.push(FieldError::new(
                        "practical_percentage",
                        format!("理论与实践占比之和必须为 100，当前为 {}", theory + practical),
                    ));
                }
            }
            _ => errors.push(FieldError::new(
                "theory_percentage",
                "理论/实践拆分计分时必须同时指定两个占比",
            )),
        }
    }

    errors
}

/// 按范围类型解析出要关联的班级与科目
///
/// `all_school` 取学校全部班级/科目，请求中的科目配置用于覆盖对应科目；
/// `single_class` 只能有一项，`selected_classes` 至少一项，且都必须属于本校。
pub fn resolve_scope(
    req: &CreateExamRequest,
    school_classes: &[SchoolClass],
    school_subjects: &[Subject],
) -> Result<ResolvedScope, Vec<FieldError>> {
    let mut errors = Vec::new();

    let class_ids = match req.scope_type {
        ScopeType::AllSchool => {
            let ids: Vec<i64> = school_classes.iter().map(|c| c.id).collect();
            if ids.is_empty() {
                errors.push(FieldError::new("class_ids", "学校还没有任何班级"));
            }
            ids
        }
        scope => {
            let mut ids = req.class_ids.clone();
            ids.sort_unstable();
            ids.dedup();
            check_count("class_ids", scope, ids.len(), &mut errors);
            for id in &ids {
                if !school_classes.iter().any(|c| c.id == *id) {
                    errors.push(FieldError::new("class_ids", format!("班级 {id} 不属于本校")));
                }
            }
            ids
        }
    };

    let mut overrides: BTreeMap<i64, &SubjectSetting> = BTreeMap::new();
    for setting in &req.subjects {
        if overrides.insert(setting.subject_id, setting).is_some() {
            errors.push(FieldError::new(
                "subjects",
                format!("科目 {} 重复", setting.subject_id),
            ));
        }
        if !school_subjects.iter().any(|s| s.id == setting.subject_id) {
            errors.push(FieldError::new(
                "subjects",
                format!("科目 {} 不属于本校", setting.subject_id),
            ));
        }
    }

    let subjects: Vec<SubjectSetting> = match req.subject_scope_type {
        ScopeType::AllSchool => {
            if school_subjects.is_empty() {
                errors.push(FieldError::new("subjects", "学校还没有任何科目"));
            }
            school_subjects
                .iter()
                .map(|s| {
                    overrides
                        .get(&s.id)
                        .map(|o| (*o).clone())
                        .unwrap_or_else(|| default_setting(s.id))
                })
                .collect()
        }
        scope => {
            check_count("subjects", scope, overrides.len(), &mut errors);
            overrides.values().map(|s| (*s).clone()).collect()
        }
    };

    for (index, setting) in subjects.iter().enumerate() {
        check_setting(index, setting, &mut errors);
    }

    if errors.is_empty() {
        Ok(ResolvedScope {
            class_ids,
            subjects,
        })
    } else {
        Err(errors)
    }
}

fn check_count(field: &str, scope: ScopeType, count: usize, errors: &mut Vec<FieldError>) {
    match scope {
        ScopeType::SingleClass if count != 1 => {
            errors.push(FieldError::new(field, "single_class 范围必须且只能指定一项"));
        }
        ScopeType::SelectedClasses if count == 0 => {
            errors.push(FieldError::new(field, "selected_classes 范围至少指定一项"));
        }
        _ => {}
    }
}

/// 新增试卷前的检查：考试必须是草稿，科目已关联且分卷计分，卷号与权重合法
pub fn validate_new_paper(detail: &ExamDetail, req: &CreateExamPaperRequest) -> Vec<FieldError> {
    let mut errors = Vec::new();

    if detail.exam.status != ExamStatus::Draft {
        errors.push(FieldError::new(
            "status",
            format!("只有草稿状态的考试可以添加试卷，当前为 {}", detail.exam.status),
        ));
    }

    let Some(subject) = detail.subject(req.subject_id) else {
        errors.push(FieldError::new(
            "subject_id",
            format!("科目 {} 未关联到该考试", req.subject_id),
        ));
        return errors;
    };

    if !subject.has_papers {
        errors.push(FieldError::new(
            "subject_id",
            format!("科目 {} 未启用分卷计分", req.subject_id),
        ));
    }

    if req.paper_number < 1 {
        errors.push(FieldError::new("paper_number", "卷号从 1 开始"));
    } else if let Some(count) = subject.paper_count.filter(|c| req.paper_number > *c) {
        errors.push(FieldError::new(
            "paper_number",
            format!("卷号不能超过该科目的试卷数量 {count}"),
        ));
    }

    if !(req.total_marks.is_finite() && req.total_marks > 0.0) {
        errors.push(FieldError::new("total_marks", "满分必须大于 0"));
    }
    if req
        .pass_mark
        .is_some_and(|pass| !(0.0..=req.total_marks).contains(&pass))
    {
        errors.push(FieldError::new("pass_mark", "及格分必须在 0 到满分之间"));
    }

    if !(req.percentage_weight > 0.0 && req.percentage_weight <= 100.0) {
        errors.push(FieldError::new(
            "percentage_weight",
            "权重必须在 (0, 100] 之间",
        ));
    } else {
        let existing: f64 = detail
            .papers_of(req.subject_id)
            .map(|p| p.percentage_weight)
            .sum();
        if existing + req.percentage_weight > 100.0 + WEIGHT_TOLERANCE {
            errors.push(FieldError::new(
                "percentage_weight",
                format!(
                    "该科目试卷权重合计将超过 100（已有 {existing}，新增 {}）",
                    req.percentage_weight
                ),
            ));
        }
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::structure::tests::{exam_detail, paper, subject as exam_subject};
    use chrono::NaiveDate;

    fn class(id: i64) -> SchoolClass {
        SchoolClass {
            id,
            school_id: 1,
            name: format!("Form {id}"),
            created_at: chrono::DateTime::default(),
        }
    }

    fn subject(id: i64) -> Subject {
        Subject {
            id,
            school_id: 1,
            name: format!("Subject {id}"),
            code: format!("S{id}"),
            created_at: chrono::DateTime::default(),
        }
    }

    fn request(scope_type: ScopeType, class_ids: Vec<i64>) -> CreateExamRequest {
        CreateExamRequest {
            exam_series_id: 1,
            exam_category_id: 1,
            grading_system_id: 1,
            name: "Mid term".to_string(),
            start_date: NaiveDate::from_ymd_opt(2026, 3, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2026, 3, 5).unwrap(),
            scope_type,
            class_ids,
            subject_scope_type: ScopeType::AllSchool,
            subjects: vec![],
            has_practical: false,
            theory_percentage: None,
            practical_percentage: None,
            created_by: None,
        }
    }

    fn paper_request(subject_id: i64, paper_number: i32, weight: f64) -> CreateExamPaperRequest {
        CreateExamPaperRequest {
            subject_id,
            paper_number,
            name: None,
            total_marks: 100.0,
            pass_mark: None,
            duration_minutes: Some(120),
            percentage_weight: weight,
            is_practical: false,
        }
    }

    #[test]
    fn test_all_school_attaches_every_class_and_subject() {
        let classes = [class(1), class(2)];
        let subjects = [subject(10), subject(11)];
        let mut req = request(ScopeType::AllSchool, vec![]);
        req.subjects = vec![SubjectSetting {
            total_marks: Some(80.0),
            ..default_setting(11)
        }];

        let scope = resolve_scope(&req, &classes, &subjects).unwrap();
        assert_eq!(scope.class_ids, vec![1, 2]);
        assert_eq!(scope.subjects.len(), 2);
        assert_eq!(scope.subjects[0].total_marks, None);
        assert_eq!(scope.subjects[1].total_marks, Some(80.0));
    }

    #[test]
    fn test_single_class_requires_exactly_one() {
        let classes = [class(1), class(2)];
        let subjects = [subject(10)];
        let errors = resolve_scope(&request(ScopeType::SingleClass, vec![1, 2]), &classes, &subjects)
            .unwrap_err();
        assert_eq!(errors[0].field, "class_ids");

        let scope =
            resolve_scope(&request(ScopeType::SingleClass, vec![2]), &classes, &subjects).unwrap();
        assert_eq!(scope.class_ids, vec![2]);
    }

    #[test]
    fn test_selected_classes_must_belong_to_school() {
        let classes = [class(1)];
        let subjects = [subject(10)];
        let errors = resolve_scope(
            &request(ScopeType::SelectedClasses, vec![1, 9]),
            &classes,
            &subjects,
        )
        .unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].message.contains('9'));

        let errors =
            resolve_scope(&request(ScopeType::SelectedClasses, vec![]), &classes, &subjects)
                .unwrap_err();
        assert_eq!(errors[0].field, "class_ids");
    }

    #[test]
    fn test_practical_percentages_must_sum_to_100() {
        let mut req = request(ScopeType::AllSchool, vec![]);
        req.has_practical = true;
        req.theory_percentage = Some(70.0);
        req.practical_percentage = Some(20.0);
        let errors = validate_exam_request(&req);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "practical_percentage");

        req.practical_percentage = Some(30.0);
        assert!(validate_exam_request(&req).is_empty());

        req.practical_percentage = None;
        assert_eq!(validate_exam_request(&req).len(), 1);
    }

    #[test]
    fn test_end_before_start_is_rejected() {
        let mut req = request(ScopeType::AllSchool, vec![]);
        req.end_date = NaiveDate::from_ymd_opt(2026, 2, 1).unwrap();
        let errors = validate_exam_request(&req);
        assert_eq!(errors[0].field, "end_date");
    }

    #[test]
    fn test_new_paper_rules() {
        let mut detail = exam_detail(ExamStatus::Draft);
        detail.subjects = vec![exam_subject(1, true), exam_subject(2, false)];
        assert!(validate_new_paper(&detail, &paper_request(1, 1, 60.0)).is_empty());

        // 未启用分卷的科目
        let errors = validate_new_paper(&detail, &paper_request(2, 1, 60.0));
        assert_eq!(errors[0].field, "subject_id");

        // 权重合计超过 100
        detail.papers.push(paper(1, 1, 1, 60.0));
        let errors = validate_new_paper(&detail, &paper_request(1, 2, 50.0));
        assert_eq!(errors[0].field, "percentage_weight");
        assert!(validate_new_paper(&detail, &paper_request(1, 2, 40.0)).is_empty());
    }

    #[test]
    fn test_new_paper_requires_draft() {
        let detail = exam_detail(ExamStatus::Active);
        let errors = validate_new_paper(&detail, &paper_request(1, 1, 100.0));
        assert_eq!(errors[0].field, "status");
    }
}
