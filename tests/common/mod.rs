#![allow(dead_code)]

use std::sync::Arc;

use chrono::NaiveDate;
use rust_examsystem::engine::{ExamStructure, ScoringMode};
use rust_examsystem::models::exam_series::entities::ExamSeries;
use rust_examsystem::models::exam_series::requests::CreateExamSeriesRequest;
use rust_examsystem::models::exams::entities::{ExamDetail, ScopeType};
use rust_examsystem::models::exams::requests::{
    CreateExamCategoryRequest, CreateExamRequest, SubjectSetting,
};
use rust_examsystem::models::grading::entities::GradingType;
use rust_examsystem::models::grading::requests::{CreateGradingSystemRequest, GradeBandInput};
use rust_examsystem::models::results::requests::ResultEntry;
use rust_examsystem::models::schools::requests::{
    CreateSchoolClassRequest, CreateSchoolRequest, CreateStreamRequest, CreateStudentRequest,
    CreateSubjectRequest,
};
use rust_examsystem::storage::sea_orm_storage::SeaOrmStorage;
use rust_examsystem::storage::{ScoringContext, Storage};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};

/// 单连接的内存 SQLite，连接断开即丢弃全部数据
pub async fn memory_storage() -> Arc<dyn Storage> {
    memory_storage_with_connection().await.0
}

/// 同上，另外返回同一连接池的句柄，供测试直接改写数据
pub async fn memory_storage_with_connection() -> (Arc<dyn Storage>, DatabaseConnection) {
    let mut opt = ConnectOptions::new("sqlite::memory:");
    opt.max_connections(1).min_connections(1).sqlx_logging(false);
    let db = Database::connect(opt).await.expect("connect in-memory sqlite");
    let storage = SeaOrmStorage::from_connection(db.clone())
        .await
        .expect("run migrations");
    (Arc::new(storage), db)
}

pub fn band(grade: &str, min_score: f64, max_score: f64, points: f64) -> GradeBandInput {
    GradeBandInput {
        grade: grade.to_string(),
        min_score,
        max_score,
        points: Some(points),
        remarks: None,
    }
}

pub fn four_bands() -> Vec<GradeBandInput> {
    vec![
        band("A", 80.0, 100.0, 12.0),
        band("B", 60.0, 79.99, 9.0),
        band("C", 40.0, 59.99, 6.0),
        band("D", 0.0, 39.99, 3.0),
    ]
}

pub fn date(month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, month, day).expect("valid date")
}

/// 两个班、一个分流、四名学生、两个科目的学校
///
/// - s1: 一班，分流 North
/// - s2: 一班，无分流
/// - s3, s4: 二班
pub struct Fixture {
    pub storage: Arc<dyn Storage>,
    pub db: DatabaseConnection,
    pub school_id: i64,
    pub class_ids: Vec<i64>,
    pub stream_id: i64,
    pub student_ids: Vec<i64>,
    pub subject_ids: Vec<i64>,
    pub grading_system_id: i64,
    pub category_id: i64,
    pub series: ExamSeries,
}

impl Fixture {
    pub async fn new() -> Self {
        let (storage, db) = memory_storage_with_connection().await;

        let school = storage
            .create_school(CreateSchoolRequest {
                name: "Riverside High".to_string(),
            })
            .await
            .expect("create school");

        let mut class_ids = Vec::new();
        for name in ["Form 1", "Form 2"] {
            let class = storage
                .create_school_class(
                    school.id,
                    CreateSchoolClassRequest {
                        name: name.to_string(),
                    },
                )
                .await
                .expect("create class");
            class_ids.push(class.id);
        }

        let stream = storage
            .create_stream(
                class_ids[0],
                CreateStreamRequest {
                    name: "North".to_string(),
                },
            )
            .await
            .expect("create stream");

        let placements = [
            (Some(class_ids[0]), Some(stream.id)),
            (Some(class_ids[0]), None),
            (Some(class_ids[1]), None),
            (Some(class_ids[1]), None),
        ];
        let mut student_ids = Vec::new();
        for (index, (class_id, stream_id)) in placements.into_iter().enumerate() {
            let student = storage
                .create_student(
                    school.id,
                    CreateStudentRequest {
                        admission_number: format!("ADM{:03}", index + 1),
                        name: format!("Student {}", index + 1),
                        class_id,
                        stream_id,
                    },
                )
                .await
                .expect("create student");
            student_ids.push(student.id);
        }

        let mut subject_ids = Vec::new();
        for (name, code) in [("Mathematics", "MAT"), ("English", "ENG")] {
            let subject = storage
                .create_subject(
                    school.id,
                    CreateSubjectRequest {
                        name: name.to_string(),
                        code: code.to_string(),
                    },
                )
                .await
                .expect("create subject");
            subject_ids.push(subject.id);
        }

        let grading = storage
            .create_grading_system(CreateGradingSystemRequest {
                school_id: school.id,
                name: "Standard".to_string(),
                grading_type: GradingType::Letter,
                bands: four_bands(),
                is_default: Some(true),
            })
            .await
            .expect("create grading system");

        let category = storage
            .create_exam_category(CreateExamCategoryRequest {
                school_id: school.id,
                name: "Mid-term".to_string(),
                weight: Some(40.0),
            })
            .await
            .expect("create category");

        let series = storage
            .create_exam_series(CreateExamSeriesRequest {
                school_id: school.id,
                name: "Term 1 2025".to_string(),
                academic_year: "2025".to_string(),
                term: 1,
                start_date: date(1, 6),
                end_date: date(4, 4),
            })
            .await
            .expect("create series");

        Self {
            storage,
            db,
            school_id: school.id,
            class_ids,
            stream_id: stream.id,
            student_ids,
            subject_ids,
            grading_system_id: grading.system.id,
            category_id: category.id,
            series,
        }
    }

    pub fn setting(&self, subject_id: i64, has_papers: bool) -> SubjectSetting {
        SubjectSetting {
            subject_id,
            total_marks: None,
            pass_mark: None,
            has_papers,
            paper_count: has_papers.then_some(2),
        }
    }

    /// 覆盖全校班级的草稿考试
    pub async fn create_exam(&self, subjects: Vec<SubjectSetting>) -> ExamDetail {
        self.storage
            .create_exam(
                self.school_id,
                CreateExamRequest {
                    exam_series_id: self.series.id,
                    exam_category_id: self.category_id,
                    grading_system_id: self.grading_system_id,
                    name: "Mid-term".to_string(),
                    start_date: date(2, 10),
                    end_date: date(2, 14),
                    scope_type: ScopeType::AllSchool,
                    class_ids: self.class_ids.clone(),
                    subject_scope_type: ScopeType::SelectedClasses,
                    subjects,
                    has_practical: false,
                    theory_percentage: None,
                    practical_percentage: None,
                    created_by: None,
                },
            )
            .await
            .expect("create exam")
    }

    pub async fn detail(&self, exam_id: i64) -> ExamDetail {
        self.storage
            .get_exam_detail(exam_id)
            .await
            .expect("load exam")
            .expect("exam exists")
    }

    pub async fn context(&self, exam_id: i64, subject_id: i64) -> ScoringContext {
        let detail = self.detail(exam_id).await;
        let mode: ScoringMode = ExamStructure::new(&detail)
            .scoring_mode(subject_id)
            .expect("subject attached");
        let bands = self
            .storage
            .list_grade_bands(detail.exam.grading_system_id)
            .await
            .expect("load bands");
        ScoringContext {
            exam_id,
            subject_id,
            mode,
            bands,
            entered_by: Some(1),
        }
    }
}

pub fn score(student_id: i64, value: f64) -> ResultEntry {
    ResultEntry {
        student_id,
        score: Some(value),
        theory_score: None,
        practical_score: None,
        is_absent: false,
        remarks: None,
    }
}

pub fn absent(student_id: i64) -> ResultEntry {
    ResultEntry {
        student_id,
        score: None,
        theory_score: None,
        practical_score: None,
        is_absent: true,
        remarks: None,
    }
}
