mod common;

use common::{Fixture, absent, score};
use rust_examsystem::errors::ExamSystemError;
use rust_examsystem::models::exams::entities::{ExamPaper, ExamStatus};
use rust_examsystem::models::exams::requests::CreateExamPaperRequest;
use rust_examsystem::models::results::entities::ExamResult;
use rust_examsystem::models::results::requests::PaperResultEntry;
use sea_orm::ConnectionTrait;

fn by_student(results: &[ExamResult], student_id: i64) -> &ExamResult {
    results
        .iter()
        .find(|r| r.student_id == student_id)
        .expect("result for student")
}

async fn activate(fx: &Fixture, exam_id: i64) {
    assert!(
        fx.storage
            .transition_exam_status(exam_id, ExamStatus::Draft, ExamStatus::Active)
            .await
            .unwrap()
    );
}

#[tokio::test]
async fn test_import_rejected_before_activation() {
    let fx = Fixture::new().await;
    let subject_id = fx.subject_ids[0];
    let exam_id = fx.create_exam(vec![fx.setting(subject_id, false)]).await.exam.id;

    let ctx = fx.context(exam_id, subject_id).await;
    let outcome = fx
        .storage
        .import_subject_results(ctx, vec![score(fx.student_ids[0], 70.0)])
        .await;
    assert!(matches!(outcome, Err(ExamSystemError::InvalidTransition(_))));

    let results = fx.storage.list_exam_results(exam_id, None).await.unwrap();
    assert!(results.is_empty());
}

#[tokio::test]
async fn test_import_grades_and_ranks_every_scope() {
    let fx = Fixture::new().await;
    let subject_id = fx.subject_ids[0];
    let exam_id = fx.create_exam(vec![fx.setting(subject_id, false)]).await.exam.id;
    activate(&fx, exam_id).await;
    let [s1, s2, s3, s4] = [
        fx.student_ids[0],
        fx.student_ids[1],
        fx.student_ids[2],
        fx.student_ids[3],
    ];

    let ctx = fx.context(exam_id, subject_id).await;
    let results = fx
        .storage
        .import_subject_results(
            ctx,
            vec![score(s1, 80.0), score(s2, 90.0), score(s3, 80.0), absent(s4)],
        )
        .await
        .unwrap();

    assert_eq!(results.len(), 4);
    assert_eq!(by_student(&results, s2).position, Some(1));
    assert_eq!(by_student(&results, s1).position, Some(2));
    assert_eq!(by_student(&results, s3).position, Some(2));

    let missing = by_student(&results, s4);
    assert_eq!(missing.grade, "ABS");
    assert_eq!(missing.points, 0.0);
    assert_eq!(missing.total_score, 0.0);
    assert_eq!(missing.position, None);
    assert_eq!(missing.class_position, None);

    assert_eq!(by_student(&results, s1).grade, "A");
    assert_eq!(by_student(&results, s1).points, 12.0);

    // 一班：s2 第一，s1 第二；二班只有 s3 参与排名
    assert_eq!(by_student(&results, s2).class_position, Some(1));
    assert_eq!(by_student(&results, s1).class_position, Some(2));
    assert_eq!(by_student(&results, s3).class_position, Some(1));

    // 分流：s1 独占 North，s2 在一班的无分流组
    assert_eq!(by_student(&results, s1).stream_position, Some(1));
    assert_eq!(by_student(&results, s2).stream_position, Some(1));

    // 缺考排在最后
    assert_eq!(results.last().map(|r| r.student_id), Some(s4));
}

#[tokio::test]
async fn test_reimport_overwrites_and_reranks() {
    let fx = Fixture::new().await;
    let subject_id = fx.subject_ids[0];
    let exam_id = fx.create_exam(vec![fx.setting(subject_id, false)]).await.exam.id;
    activate(&fx, exam_id).await;
    let [s1, s2] = [fx.student_ids[0], fx.student_ids[1]];

    let ctx = fx.context(exam_id, subject_id).await;
    fx.storage
        .import_subject_results(ctx.clone(), vec![score(s1, 50.0), absent(s2)])
        .await
        .unwrap();

    let results = fx
        .storage
        .import_subject_results(ctx, vec![score(s2, 65.0)])
        .await
        .unwrap();

    assert_eq!(results.len(), 2);
    let second = by_student(&results, s2);
    assert!(!second.is_absent);
    assert_eq!(second.grade, "B");
    assert_eq!(second.position, Some(1));
    assert_eq!(by_student(&results, s1).position, Some(2));
}

#[tokio::test]
async fn test_failed_import_rolls_back_whole_batch() {
    let fx = Fixture::new().await;
    let subject_id = fx.subject_ids[0];
    let exam_id = fx.create_exam(vec![fx.setting(subject_id, false)]).await.exam.id;
    activate(&fx, exam_id).await;
    let [s1, s2] = [fx.student_ids[0], fx.student_ids[1]];

    let ctx = fx.context(exam_id, subject_id).await;
    fx.storage
        .import_subject_results(ctx, vec![score(s1, 50.0), score(s2, 65.0)])
        .await
        .unwrap();

    // 第二行引用不存在的学生，整批失败
    let ctx = fx.context(exam_id, subject_id).await;
    let outcome = fx
        .storage
        .import_subject_results(ctx, vec![score(s1, 90.0), score(999_999, 40.0)])
        .await;
    assert!(outcome.is_err());

    let results = fx
        .storage
        .list_exam_results(exam_id, Some(subject_id))
        .await
        .unwrap();
    assert_eq!(results.len(), 2);
    assert_eq!(by_student(&results, s1).total_score, 50.0);
    assert_eq!(by_student(&results, s1).position, Some(2));
    assert_eq!(by_student(&results, s2).position, Some(1));
}

#[tokio::test]
async fn test_unreadable_exam_status_is_reported() {
    let fx = Fixture::new().await;
    let subject_id = fx.subject_ids[0];
    let exam_id = fx.create_exam(vec![fx.setting(subject_id, false)]).await.exam.id;
    activate(&fx, exam_id).await;
    let ctx = fx.context(exam_id, subject_id).await;

    fx.db
        .execute_unprepared(&format!(
            "UPDATE exams SET status = 'archived' WHERE id = {exam_id}"
        ))
        .await
        .unwrap();

    let outcome = fx
        .storage
        .import_subject_results(ctx, vec![score(fx.student_ids[0], 70.0)])
        .await;
    assert!(matches!(outcome, Err(ExamSystemError::DatabaseOperation(_))));
}

#[tokio::test]
async fn test_verify_marks_subject_results() {
    let fx = Fixture::new().await;
    let [math, english] = [fx.subject_ids[0], fx.subject_ids[1]];
    let exam_id = fx
        .create_exam(vec![fx.setting(math, false), fx.setting(english, false)])
        .await
        .exam
        .id;
    activate(&fx, exam_id).await;

    for subject_id in [math, english] {
        let ctx = fx.context(exam_id, subject_id).await;
        fx.storage
            .import_subject_results(ctx, vec![score(fx.student_ids[0], 70.0)])
            .await
            .unwrap();
    }

    let verified = fx
        .storage
        .verify_exam_results(exam_id, Some(math), 42)
        .await
        .unwrap();
    assert_eq!(verified, 1);

    let results = fx.storage.list_exam_results(exam_id, None).await.unwrap();
    for result in results {
        if result.subject_id == math {
            assert_eq!(result.verified_by, Some(42));
            assert!(result.verified_at.is_some());
        } else {
            assert_eq!(result.verified_by, None);
        }
    }
}

fn paper_request(subject_id: i64, paper_number: i32, weight: f64) -> CreateExamPaperRequest {
    CreateExamPaperRequest {
        subject_id,
        paper_number,
        name: None,
        total_marks: 100.0,
        pass_mark: None,
        duration_minutes: None,
        percentage_weight: weight,
        is_practical: false,
    }
}

fn marks(student_id: i64, value: f64) -> PaperResultEntry {
    PaperResultEntry {
        student_id,
        marks: Some(value),
        is_absent: false,
    }
}

fn paper_absent(student_id: i64) -> PaperResultEntry {
    PaperResultEntry {
        student_id,
        marks: None,
        is_absent: true,
    }
}

async fn two_paper_exam(fx: &Fixture) -> (i64, ExamPaper, ExamPaper) {
    let subject_id = fx.subject_ids[0];
    let exam_id = fx.create_exam(vec![fx.setting(subject_id, true)]).await.exam.id;
    let first = fx
        .storage
        .create_exam_paper(exam_id, paper_request(subject_id, 1, 60.0))
        .await
        .unwrap();
    let second = fx
        .storage
        .create_exam_paper(exam_id, paper_request(subject_id, 2, 40.0))
        .await
        .unwrap();
    activate(fx, exam_id).await;
    (exam_id, first, second)
}

#[tokio::test]
async fn test_paper_entry_recomputes_weighted_parent() {
    let fx = Fixture::new().await;
    let (exam_id, first, second) = two_paper_exam(&fx).await;
    let subject_id = first.subject_id;
    let [s1, s2] = [fx.student_ids[0], fx.student_ids[1]];

    let ctx = fx.context(exam_id, subject_id).await;
    let response = fx
        .storage
        .enter_paper_results(ctx.clone(), first.clone(), vec![marks(s1, 80.0), marks(s2, 70.0)])
        .await
        .unwrap();

    assert_eq!(response.exam_paper_id, first.id);
    assert_eq!(response.paper_results.len(), 2);
    let paper_rank: Vec<_> = response
        .paper_results
        .iter()
        .map(|p| (p.student_id, p.position))
        .collect();
    assert_eq!(paper_rank, vec![(s1, Some(1)), (s2, Some(2))]);
    // 只有第一卷：80 × 60%
    assert_eq!(by_student(&response.results, s1).total_score, 48.0);

    let response = fx
        .storage
        .enter_paper_results(ctx, second, vec![marks(s1, 50.0), marks(s2, 100.0)])
        .await
        .unwrap();

    let first_student = by_student(&response.results, s1);
    let second_student = by_student(&response.results, s2);
    assert_eq!(first_student.total_score, 68.0);
    assert_eq!(first_student.grade, "B");
    assert_eq!(second_student.total_score, 82.0);
    assert_eq!(second_student.grade, "A");
    assert_eq!(second_student.position, Some(1));
    assert_eq!(first_student.position, Some(2));
}

#[tokio::test]
async fn test_all_papers_absent_makes_parent_absent() {
    let fx = Fixture::new().await;
    let (exam_id, first, second) = two_paper_exam(&fx).await;
    let [s1, s2] = [fx.student_ids[0], fx.student_ids[1]];

    let ctx = fx.context(exam_id, first.subject_id).await;
    fx.storage
        .enter_paper_results(ctx.clone(), first, vec![marks(s1, 90.0), paper_absent(s2)])
        .await
        .unwrap();
    let response = fx
        .storage
        .enter_paper_results(ctx, second, vec![marks(s1, 90.0), paper_absent(s2)])
        .await
        .unwrap();

    let missing = by_student(&response.results, s2);
    assert!(missing.is_absent);
    assert_eq!(missing.grade, "ABS");
    assert_eq!(missing.position, None);
    assert_eq!(by_student(&response.results, s1).total_score, 90.0);
    assert_eq!(by_student(&response.results, s1).position, Some(1));

    let absent_paper = response
        .paper_results
        .iter()
        .find(|p| p.student_id == s2)
        .expect("paper row for absent student");
    assert_eq!(absent_paper.position, None);
    assert_eq!(absent_paper.marks, 0.0);
}
