//! 试卷实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "exam_papers")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub exam_id: i64,
    pub subject_id: i64,
    pub paper_number: i32,
    pub name: Option<String>,
    pub total_marks: f64,
    pub pass_mark: f64,
    pub duration_minutes: Option<i32>,
    pub percentage_weight: f64,
    pub is_practical: bool,
    pub created_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::exams::Entity",
        from = "Column::ExamId",
        to = "super::exams::Column::Id"
    )]
    Exam,
    #[sea_orm(has_many = "super::exam_paper_results::Entity")]
    PaperResults,
}

impl Related<super::exams::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Exam.def()
    }
}

impl Related<super::exam_paper_results::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PaperResults.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_exam_paper(self) -> crate::models::exams::entities::ExamPaper {
        use crate::models::exams::entities::ExamPaper;
        use chrono::{DateTime, Utc};

        ExamPaper {
            id: self.id,
            exam_id: self.exam_id,
            subject_id: self.subject_id,
            paper_number: self.paper_number,
            name: self.name,
            total_marks: self.total_marks,
            pass_mark: self.pass_mark,
            duration_minutes: self.duration_minutes,
            percentage_weight: self.percentage_weight,
            is_practical: self.is_practical,
            created_at: DateTime::<Utc>::from_timestamp(self.created_at, 0).unwrap_or_default(),
        }
    }
}
