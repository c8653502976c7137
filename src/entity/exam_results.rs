//! 考试成绩实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "exam_results")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub exam_id: i64,
    pub student_id: i64,
    pub subject_id: i64,
    pub theory_score: Option<f64>,
    pub practical_score: Option<f64>,
    pub total_score: f64,
    pub grade: String,
    pub points: f64,
    pub position: Option<i32>,
    pub class_position: Option<i32>,
    pub stream_position: Option<i32>,
    pub is_absent: bool,
    #[sea_orm(column_type = "Text", nullable)]
    pub remarks: Option<String>,
    pub entered_by: Option<i64>,
    pub entered_at: i64,
    pub verified_by: Option<i64>,
    pub verified_at: Option<i64>,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::exams::Entity",
        from = "Column::ExamId",
        to = "super::exams::Column::Id"
    )]
    Exam,
    #[sea_orm(
        belongs_to = "super::students::Entity",
        from = "Column::StudentId",
        to = "super::students::Column::Id"
    )]
    Student,
    #[sea_orm(has_many = "super::exam_paper_results::Entity")]
    PaperResults,
}

impl Related<super::exams::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Exam.def()
    }
}

impl Related<super::students::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Student.def()
    }
}

impl Related<super::exam_paper_results::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PaperResults.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// 从数据库模型转换为业务模型
impl Model {
    pub fn into_exam_result(self) -> crate::models::results::entities::ExamResult {
        use crate::models::results::entities::ExamResult;
        use chrono::{DateTime, Utc};

        ExamResult {
            id: self.id,
            exam_id: self.exam_id,
            student_id: self.student_id,
            subject_id: self.subject_id,
            theory_score: self.theory_score,
            practical_score: self.practical_score,
            total_score: self.total_score,
            grade: self.grade,
            points: self.points,
            position: self.position,
            class_position: self.class_position,
            stream_position: self.stream_position,
            is_absent: self.is_absent,
            remarks: self.remarks,
            entered_by: self.entered_by,
            entered_at: DateTime::<Utc>::from_timestamp(self.entered_at, 0).unwrap_or_default(),
            verified_by: self.verified_by,
            verified_at: self
                .verified_at
                .map(|ts| DateTime::<Utc>::from_timestamp(ts, 0).unwrap_or_default()),
        }
    }
}
