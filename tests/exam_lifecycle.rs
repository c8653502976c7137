mod common;

use common::{Fixture, score};
use rust_examsystem::engine::{ExamStructure, ExamTransition};
use rust_examsystem::errors::ExamSystemError;
use rust_examsystem::models::exams::entities::ExamStatus;
use rust_examsystem::models::exams::requests::CreateExamPaperRequest;

fn paper_request(subject_id: i64, paper_number: i32, weight: f64) -> CreateExamPaperRequest {
    CreateExamPaperRequest {
        subject_id,
        paper_number,
        name: Some(format!("Paper {paper_number}")),
        total_marks: 100.0,
        pass_mark: Some(40.0),
        duration_minutes: Some(120),
        percentage_weight: weight,
        is_practical: false,
    }
}

#[tokio::test]
async fn test_exam_created_as_draft_with_scope() {
    let fx = Fixture::new().await;
    let detail = fx
        .create_exam(vec![fx.setting(fx.subject_ids[0], false)])
        .await;

    assert_eq!(detail.exam.status, ExamStatus::Draft);
    assert_eq!(detail.class_ids, fx.class_ids);
    assert_eq!(detail.subjects.len(), 1);
    assert_eq!(detail.subjects[0].total_marks, 100.0);
    assert_eq!(detail.result_count, 0);

    let reloaded = fx.detail(detail.exam.id).await;
    assert_eq!(reloaded.class_ids, detail.class_ids);
    assert!(ExamStructure::new(&reloaded).validate().is_empty());
}

#[tokio::test]
async fn test_conditional_transition_applies_once() {
    let fx = Fixture::new().await;
    let detail = fx
        .create_exam(vec![fx.setting(fx.subject_ids[0], false)])
        .await;
    let exam_id = detail.exam.id;

    let applied = fx
        .storage
        .transition_exam_status(exam_id, ExamStatus::Draft, ExamStatus::Active)
        .await
        .unwrap();
    assert!(applied);

    // 基于过期状态的第二次写入不生效
    let stale = fx
        .storage
        .transition_exam_status(exam_id, ExamStatus::Draft, ExamStatus::Active)
        .await
        .unwrap();
    assert!(!stale);

    let reloaded = fx.detail(exam_id).await;
    assert_eq!(reloaded.exam.status, ExamStatus::Active);
}

#[tokio::test]
async fn test_publish_requires_results() {
    let fx = Fixture::new().await;
    let subject_id = fx.subject_ids[0];
    let exam_id = fx.create_exam(vec![fx.setting(subject_id, false)]).await.exam.id;

    for (from, to) in [
        (ExamStatus::Draft, ExamStatus::Active),
        (ExamStatus::Active, ExamStatus::Completed),
    ] {
        assert!(fx.storage.transition_exam_status(exam_id, from, to).await.unwrap());
    }

    let detail = fx.detail(exam_id).await;
    let errors = ExamStructure::new(&detail)
        .check_transition(ExamTransition::Publish)
        .unwrap_err();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].field, "results");

    // 已结束的考试仍可补录
    let ctx = fx.context(exam_id, subject_id).await;
    fx.storage
        .import_subject_results(ctx, vec![score(fx.student_ids[0], 55.0)])
        .await
        .unwrap();

    let detail = fx.detail(exam_id).await;
    assert_eq!(detail.result_count, 1);
    assert_eq!(
        ExamStructure::new(&detail)
            .check_transition(ExamTransition::Publish)
            .unwrap(),
        ExamStatus::Published
    );
}

#[tokio::test]
async fn test_duplicate_paper_number_is_conflict() {
    let fx = Fixture::new().await;
    let subject_id = fx.subject_ids[0];
    let exam_id = fx.create_exam(vec![fx.setting(subject_id, true)]).await.exam.id;

    let first = fx
        .storage
        .create_exam_paper(exam_id, paper_request(subject_id, 1, 60.0))
        .await
        .unwrap();
    assert_eq!(first.paper_number, 1);

    let duplicate = fx
        .storage
        .create_exam_paper(exam_id, paper_request(subject_id, 1, 40.0))
        .await;
    assert!(matches!(duplicate, Err(ExamSystemError::Conflict(_))));

    let detail = fx.detail(exam_id).await;
    assert_eq!(detail.papers.len(), 1);
    assert_eq!(detail.papers[0].percentage_weight, 60.0);
}

#[tokio::test]
async fn test_activation_checks_paper_weights() {
    let fx = Fixture::new().await;
    let subject_id = fx.subject_ids[0];
    let exam_id = fx.create_exam(vec![fx.setting(subject_id, true)]).await.exam.id;

    fx.storage
        .create_exam_paper(exam_id, paper_request(subject_id, 1, 60.0))
        .await
        .unwrap();
    let detail = fx.detail(exam_id).await;
    assert!(
        ExamStructure::new(&detail)
            .check_transition(ExamTransition::Activate)
            .is_err()
    );

    fx.storage
        .create_exam_paper(exam_id, paper_request(subject_id, 2, 40.0))
        .await
        .unwrap();
    let detail = fx.detail(exam_id).await;
    assert_eq!(
        ExamStructure::new(&detail)
            .check_transition(ExamTransition::Activate)
            .unwrap(),
        ExamStatus::Active
    );
}
