mod common;

use common::{Fixture, absent, score};
use rust_examsystem::errors::ExamSystemError;
use rust_examsystem::models::exams::entities::ExamStatus;
use rust_examsystem::models::grading::entities::GradingType;
use rust_examsystem::models::grading::requests::CreateGradingSystemRequest;
use rust_examsystem::models::summaries::entities::StudentTermSummary;
use rust_examsystem::models::summaries::requests::SummaryListQuery;
use sea_orm::ConnectionTrait;

fn all_pages() -> SummaryListQuery {
    SummaryListQuery {
        page: None,
        size: None,
        class_id: None,
        stream_id: None,
    }
}

/// 两科成绩：
/// - 数学 s1=80 s2=90 s3=80 s4=缺考
/// - 英语 s1=60 s2=70 s3=40 s4=50
async fn seed_two_subjects(fx: &Fixture) -> i64 {
    let [math, english] = [fx.subject_ids[0], fx.subject_ids[1]];
    let [s1, s2, s3, s4] = [
        fx.student_ids[0],
        fx.student_ids[1],
        fx.student_ids[2],
        fx.student_ids[3],
    ];
    let exam_id = fx
        .create_exam(vec![fx.setting(math, false), fx.setting(english, false)])
        .await
        .exam
        .id;
    assert!(
        fx.storage
            .transition_exam_status(exam_id, ExamStatus::Draft, ExamStatus::Active)
            .await
            .unwrap()
    );

    let ctx = fx.context(exam_id, math).await;
    fx.storage
        .import_subject_results(
            ctx,
            vec![score(s1, 80.0), score(s2, 90.0), score(s3, 80.0), absent(s4)],
        )
        .await
        .unwrap();
    let ctx = fx.context(exam_id, english).await;
    fx.storage
        .import_subject_results(
            ctx,
            vec![score(s1, 60.0), score(s2, 70.0), score(s3, 40.0), score(s4, 50.0)],
        )
        .await
        .unwrap();
    exam_id
}

fn find(items: &[StudentTermSummary], student_id: i64) -> &StudentTermSummary {
    items
        .iter()
        .find(|s| s.student_id == student_id)
        .expect("summary for student")
}

#[tokio::test]
async fn test_summary_totals_and_positions() {
    let fx = Fixture::new().await;
    seed_two_subjects(&fx).await;
    let [s1, s2, s3, s4] = [
        fx.student_ids[0],
        fx.student_ids[1],
        fx.student_ids[2],
        fx.student_ids[3],
    ];

    let generated = fx
        .storage
        .regenerate_series_summaries(&fx.series)
        .await
        .unwrap();
    assert_eq!(generated.generated, 4);
    assert_eq!(generated.removed, 0);

    let list = fx
        .storage
        .list_series_summaries(fx.series.id, all_pages())
        .await
        .unwrap();
    assert_eq!(list.items.len(), 4);
    let order: Vec<i64> = list.items.iter().map(|s| s.student_id).collect();
    assert_eq!(order, vec![s2, s1, s3, s4]);

    let first = find(&list.items, s1);
    assert_eq!(first.total_subjects, 2);
    assert_eq!(first.total_points, 140.0);
    assert_eq!(first.total_possible_marks, 200.0);
    assert_eq!(first.average_score, 70.0);
    assert_eq!(first.average_percentage, 70.0);
    assert_eq!(first.average_grade, "B");
    assert_eq!(first.total_grade_points, 21.0);
    assert_eq!(first.class_id, Some(fx.class_ids[0]));
    assert_eq!(first.stream_id, Some(fx.stream_id));

    // 缺考科目不计入
    let fourth = find(&list.items, s4);
    assert_eq!(fourth.total_subjects, 1);
    assert_eq!(fourth.average_percentage, 50.0);
    assert_eq!(fourth.average_grade, "C");

    let positions: Vec<_> = [s1, s2, s3, s4]
        .iter()
        .map(|id| {
            let s = find(&list.items, *id);
            (s.overall_position, s.class_position, s.stream_position)
        })
        .collect();
    assert_eq!(
        positions,
        vec![
            (Some(2), Some(2), Some(1)),
            (Some(1), Some(1), Some(1)),
            (Some(3), Some(1), Some(1)),
            (Some(4), Some(2), Some(2)),
        ]
    );
}

#[tokio::test]
async fn test_regeneration_is_idempotent() {
    let fx = Fixture::new().await;
    seed_two_subjects(&fx).await;

    fx.storage
        .regenerate_series_summaries(&fx.series)
        .await
        .unwrap();
    let first = fx
        .storage
        .list_series_summaries(fx.series.id, all_pages())
        .await
        .unwrap()
        .items;

    let rerun = fx
        .storage
        .regenerate_series_summaries(&fx.series)
        .await
        .unwrap();
    assert_eq!(rerun.generated, first.len());
    assert_eq!(rerun.removed, 0);
    let second = fx
        .storage
        .list_series_summaries(fx.series.id, all_pages())
        .await
        .unwrap()
        .items;

    // 除生成时间外逐字段相同，行 id 保持不变
    let strip = |items: Vec<StudentTermSummary>| -> Vec<StudentTermSummary> {
        items
            .into_iter()
            .map(|s| StudentTermSummary {
                generated_at: chrono::DateTime::default(),
                ..s
            })
            .collect()
    };
    assert_eq!(strip(first), strip(second));
}

#[tokio::test]
async fn test_regeneration_after_result_change_drops_stale_rows() {
    let fx = Fixture::new().await;
    let exam_id = seed_two_subjects(&fx).await;
    let english = fx.subject_ids[1];
    let [s1, s2, s3, s4] = [
        fx.student_ids[0],
        fx.student_ids[1],
        fx.student_ids[2],
        fx.student_ids[3],
    ];

    fx.storage
        .regenerate_series_summaries(&fx.series)
        .await
        .unwrap();

    // s3 英语改为 100，s4 两科都缺考
    let ctx = fx.context(exam_id, english).await;
    fx.storage
        .import_subject_results(
            ctx,
            vec![score(s1, 60.0), score(s2, 70.0), score(s3, 100.0), absent(s4)],
        )
        .await
        .unwrap();

    let regenerated = fx
        .storage
        .regenerate_series_summaries(&fx.series)
        .await
        .unwrap();
    assert_eq!(regenerated.generated, 3);
    assert_eq!(regenerated.removed, 1);

    assert!(
        fx.storage
            .get_student_summary(fx.series.id, s4)
            .await
            .unwrap()
            .is_none()
    );

    let list = fx
        .storage
        .list_series_summaries(fx.series.id, all_pages())
        .await
        .unwrap();
    assert_eq!(list.items.len(), 3);

    let leader = find(&list.items, s3);
    assert_eq!(leader.average_percentage, 90.0);
    assert_eq!(leader.overall_position, Some(1));
    assert_eq!(leader.class_position, Some(1));
    assert_eq!(find(&list.items, s2).overall_position, Some(2));
    assert_eq!(find(&list.items, s1).overall_position, Some(3));
    assert_eq!(find(&list.items, s1).class_position, Some(2));
}

#[tokio::test]
async fn test_result_without_exam_subject_fails_generation() {
    let fx = Fixture::new().await;
    let exam_id = seed_two_subjects(&fx).await;
    let english = fx.subject_ids[1];

    fx.db
        .execute_unprepared(&format!(
            "DELETE FROM exam_subjects WHERE exam_id = {exam_id} AND subject_id = {english}"
        ))
        .await
        .unwrap();

    let outcome = fx.storage.regenerate_series_summaries(&fx.series).await;
    assert!(matches!(outcome, Err(ExamSystemError::DatabaseOperation(_))));

    let list = fx
        .storage
        .list_series_summaries(fx.series.id, all_pages())
        .await
        .unwrap();
    assert!(list.items.is_empty());
}

#[tokio::test]
async fn test_filters_and_single_student_lookup() {
    let fx = Fixture::new().await;
    seed_two_subjects(&fx).await;
    fx.storage
        .regenerate_series_summaries(&fx.series)
        .await
        .unwrap();

    let second_class = fx
        .storage
        .list_series_summaries(
            fx.series.id,
            SummaryListQuery {
                class_id: Some(fx.class_ids[1]),
                ..all_pages()
            },
        )
        .await
        .unwrap();
    assert_eq!(second_class.items.len(), 2);
    assert!(
        second_class
            .items
            .iter()
            .all(|s| s.class_id == Some(fx.class_ids[1]))
    );

    let one = fx
        .storage
        .get_student_summary(fx.series.id, fx.student_ids[1])
        .await
        .unwrap()
        .expect("summary exists");
    assert_eq!(one.overall_position, Some(1));
    assert_eq!(one.average_grade, "A");

    let none = fx
        .storage
        .get_student_summary(fx.series.id, 9_999)
        .await
        .unwrap();
    assert!(none.is_none());
}

#[tokio::test]
async fn test_empty_series_generates_nothing() {
    let fx = Fixture::new().await;
    let generated = fx
        .storage
        .regenerate_series_summaries(&fx.series)
        .await
        .unwrap();
    assert_eq!(generated.generated, 0);
    assert_eq!(generated.removed, 0);
}

#[tokio::test]
async fn test_default_grading_switch_changes_term_grade() {
    let fx = Fixture::new().await;
    seed_two_subjects(&fx).await;

    // 新的默认体系：只有 P (50-100) 与 F (0-49.99)
    let pass_fail = fx
        .storage
        .create_grading_system(CreateGradingSystemRequest {
            school_id: fx.school_id,
            name: "Pass/Fail".to_string(),
            grading_type: GradingType::Letter,
            bands: vec![
                common::band("P", 50.0, 100.0, 1.0),
                common::band("F", 0.0, 49.99, 0.0),
            ],
            is_default: Some(true),
        })
        .await
        .unwrap();

    let current = fx
        .storage
        .get_default_grading_system(fx.school_id)
        .await
        .unwrap()
        .expect("default exists");
    assert_eq!(current.id, pass_fail.system.id);
    let original = fx
        .storage
        .get_grading_system_by_id(fx.grading_system_id)
        .await
        .unwrap()
        .expect("original exists");
    assert!(!original.system.is_default);

    fx.storage
        .regenerate_series_summaries(&fx.series)
        .await
        .unwrap();
    let summary = fx
        .storage
        .get_student_summary(fx.series.id, fx.student_ids[0])
        .await
        .unwrap()
        .unwrap();
    assert_eq!(summary.average_grade, "P");
    // 绩点来自考试自己的评分体系，不随默认体系变化
    assert_eq!(summary.total_grade_points, 21.0);

    fx.storage
        .set_default_grading_system(fx.grading_system_id)
        .await
        .unwrap();
    fx.storage
        .regenerate_series_summaries(&fx.series)
        .await
        .unwrap();
    let summary = fx
        .storage
        .get_student_summary(fx.series.id, fx.student_ids[0])
        .await
        .unwrap()
        .unwrap();
    assert_eq!(summary.average_grade, "B");
}
