//! 考试系列实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "exam_series")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub school_id: i64,
    pub name: String,
    pub academic_year: String,
    pub term: i32,
    pub start_date: Date,
    pub end_date: Date,
    pub is_active: bool,
    pub is_published: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::exams::Entity")]
    Exams,
    #[sea_orm(has_many = "super::student_term_summaries::Entity")]
    Summaries,
}

impl Related<super::exams::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Exams.def()
    }
}

impl Related<super::student_term_summaries::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Summaries.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_exam_series(self) -> crate::models::exam_series::entities::ExamSeries {
        use crate::models::exam_series::entities::ExamSeries;
        use chrono::{DateTime, Utc};

        ExamSeries {
            id: self.id,
            school_id: self.school_id,
            name: self.name,
            academic_year: self.academic_year,
            term: self.term,
            start_date: self.start_date,
            end_date: self.end_date,
            is_active: self.is_active,
            is_published: self.is_published,
            created_at: DateTime::<Utc>::from_timestamp(self.created_at, 0).unwrap_or_default(),
            updated_at: DateTime::<Utc>::from_timestamp(self.updated_at, 0).unwrap_or_default(),
        }
    }
}
