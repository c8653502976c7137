//! 学期汇总实体（派生数据，可随时由成绩重建）

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "student_term_summaries")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub student_id: i64,
    pub exam_series_id: i64,
    pub school_id: i64,
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
    pub generated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::exam_series::Entity",
        from = "Column::ExamSeriesId",
        to = "super::exam_series::Column::Id"
    )]
    ExamSeries,
    #[sea_orm(
        belongs_to = "super::students::Entity",
        from = "Column::StudentId",
        to = "super::students::Column::Id"
    )]
    Student,
}

impl Related<super::exam_series::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ExamSeries.def()
    }
}

impl Related<super::students::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Student.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_term_summary(self) -> crate::models::summaries::entities::StudentTermSummary {
        use crate::models::summaries::entities::StudentTermSummary;
        use chrono::{DateTime, Utc};

        StudentTermSummary {
            id: self.id,
            student_id: self.student_id,
            exam_series_id: self.exam_series_id,
            school_id: self.school_id,
            class_id: self.class_id,
            stream_id: self.stream_id,
            total_subjects: self.total_subjects,
            total_points: self.total_points,
            total_possible_marks: self.total_possible_marks,
            total_grade_points: self.total_grade_points,
            average_score: self.average_score,
            average_percentage: self.average_percentage,
            average_grade: self.average_grade,
            overall_position: self.overall_position,
            class_position: self.class_position,
            stream_position: self.stream_position,
            generated_at: DateTime::<Utc>::from_timestamp(self.generated_at, 0).unwrap_or_default(),
        }
    }
}
