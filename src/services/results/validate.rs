//! 成绩录入的入口校验
//!
//! 所有违规一次性收集返回；只要有一条错误，整批都不写入。

use std::collections::{HashMap, HashSet};

use crate::models::FieldError;
use crate::models::exams::entities::{ExamDetail, ExamPaper, ScopeType};
use crate::models::results::requests::{PaperResultEntry, ResultEntry};
use crate::models::schools::entities::Student;

/// 检查分数是有限值且落在 `[0, bound]`
fn check_score(errors: &mut Vec<FieldError>, field: String, value: Option<f64>, bound: f64) {
    match value {
        None => errors.push(FieldError::new(field, "未缺考时必须填写分数")),
        Some(v) if !v.is_finite() || v < 0.0 || v > bound => {
            errors.push(FieldError::new(field, format!("分数 {v} 超出范围 [0, {bound}]")))
        }
        Some(_) => {}
    }
}

/// 学生必须属于考试所在学校；按班级范围的考试还要求学生在已关联的班级中
fn check_students(
    detail: &ExamDetail,
    student_ids: &[i64],
    students: &[Student],
    errors: &mut Vec<FieldError>,
) {
    let by_id: HashMap<i64, &Student> = students.iter().map(|s| (s.id, s)).collect();
    let class_scoped = detail.exam.scope_type != ScopeType::AllSchool;
    let mut seen = HashSet::new();

    for (index, student_id) in student_ids.iter().enumerate() {
        let field = format!("results[{index}].student_id");
        if !seen.insert(*student_id) {
            errors.push(FieldError::new(field, format!("学生 {student_id} 重复出现")));
            continue;
        }
        match by_id.get(student_id) {
            Some(student) if student.school_id != detail.exam.school_id => {
                errors.push(FieldError::new(field, format!("学生 {student_id} 不属于本校")));
            }
            Some(student)
                if class_scoped
                    && !student
                        .class_id
                        .is_some_and(|c| detail.class_ids.contains(&c)) =>
            {
                errors.push(FieldError::new(
                    field,
                    format!("学生 {student_id} 不在本次考试的班级范围内"),
                ));
            }
            Some(_) => {}
            None => errors.push(FieldError::new(field, format!("学生 {student_id} 不存在"))),
        }
    }
}

/// 批量导入某科成绩前的检查
pub fn validate_subject_entries(
    detail: &ExamDetail,
    subject_id: i64,
    entries: &[ResultEntry],
    students: &[Student],
) -> Vec<FieldError> {
    let mut errors = Vec::new();

    let Some(subject) = detail.subject(subject_id) else {
        errors.push(FieldError::new(
            "subject_id",
            format!("科目 {subject_id} 未关联到本次考试"),
        ));
        return errors;
    };
    if subject.has_papers {
        errors.push(FieldError::new(
            "subject_id",
            format!("科目 {subject_id} 按试卷计分，请通过试卷录入成绩"),
        ));
        return errors;
    }
    if entries.is_empty() {
        errors.push(FieldError::new("results", "至少需要一条成绩"));
        return errors;
    }

    let student_ids: Vec<i64> = entries.iter().map(|e| e.student_id).collect();
    check_students(detail, &student_ids, students, &mut errors);

    let bound = subject.total_marks;
    for (index, entry) in entries.iter().enumerate() {
        if entry.is_absent {
            continue;
        }
        if detail.exam.has_practical {
            check_score(
                &mut errors,
                format!("results[{index}].theory_score"),
                entry.theory_score,
                bound,
            );
            check_score(
                &mut errors,
                format!("results[{index}].practical_score"),
                entry.practical_score,
                bound,
            );
        } else {
            check_score(
                &mut errors,
                format!("results[{index}].score"),
                entry.score,
                bound,
            );
        }
    }

    errors
}

/// 录入试卷成绩前的检查
pub fn validate_paper_entries(
    detail: &ExamDetail,
    paper: &ExamPaper,
    entries: &[PaperResultEntry],
    students: &[Student],
) -> Vec<FieldError> {
    let mut errors = Vec::new();

    if entries.is_empty() {
        errors.push(FieldError::new("results", "至少需要一条成绩"));
        return errors;
    }

    let student_ids: Vec<i64> = entries.iter().map(|e| e.student_id).collect();
    check_students(detail, &student_ids, students, &mut errors);

    for (index, entry) in entries.iter().enumerate() {
        if !entry.is_absent {
            check_score(
                &mut errors,
                format!("results[{index}].marks"),
                entry.marks,
                paper.total_marks,
            );
        }
    }

    errors
}
