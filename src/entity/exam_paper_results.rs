//! 试卷成绩实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "exam_paper_results")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub exam_result_id: i64,
    pub exam_paper_id: i64,
    pub student_id: i64,
    pub marks: f64,
    pub is_absent: bool,
    pub position: Option<i32>,
    pub entered_by: Option<i64>,
    pub entered_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::exam_results::Entity",
        from = "Column::ExamResultId",
        to = "super::exam_results::Column::Id"
    )]
    ExamResult,
    #[sea_orm(
        belongs_to = "super::exam_papers::Entity",
        from = "Column::ExamPaperId",
        to = "super::exam_papers::Column::Id"
    )]
    ExamPaper,
}

impl Related<super::exam_results::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ExamResult.def()
    }
}

impl Related<super::exam_papers::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ExamPaper.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_exam_paper_result(self) -> crate::models::results::entities::ExamPaperResult {
        use crate::models::results::entities::ExamPaperResult;
        use chrono::{DateTime, Utc};

        ExamPaperResult {
            id: self.id,
            exam_result_id: self.exam_result_id,
            exam_paper_id: self.exam_paper_id,
            student_id: self.student_id,
            marks: self.marks,
            is_absent: self.is_absent,
            position: self.position,
            entered_by: self.entered_by,
            entered_at: DateTime::<Utc>::from_timestamp(self.entered_at, 0).unwrap_or_default(),
        }
    }
}
