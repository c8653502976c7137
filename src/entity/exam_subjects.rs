//! 考试-科目关联（带每科配置）

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "exam_subjects")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub exam_id: i64,
    pub subject_id: i64,
    pub total_marks: f64,
    pub pass_mark: f64,
    pub has_papers: bool,
    pub paper_count: Option<i32>,
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
        belongs_to = "super::subjects::Entity",
        from = "Column::SubjectId",
        to = "super::subjects::Column::Id"
    )]
    Subject,
}

impl Related<super::exams::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Exam.def()
    }
}

impl Related<super::subjects::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Subject.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_exam_subject(self) -> crate::models::exams::entities::ExamSubject {
        crate::models::exams::entities::ExamSubject {
            id: self.id,
            exam_id: self.exam_id,
            subject_id: self.subject_id,
            total_marks: self.total_marks,
            pass_mark: self.pass_mark,
            has_papers: self.has_papers,
            paper_count: self.paper_count,
        }
    }
}
