//! 考试实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "exams")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub school_id: i64,
    pub exam_series_id: i64,
    pub exam_category_id: i64,
    pub grading_system_id: i64,
    pub name: String,
    pub start_date: Date,
    pub end_date: Date,
    pub scope_type: String,
    pub subject_scope_type: String,
    pub has_practical: bool,
    pub theory_percentage: Option<f64>,
    pub practical_percentage: Option<f64>,
    pub status: String,
    pub created_by: Option<i64>,
    pub created_at: i64,
    pub updated_at: i64,
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
        belongs_to = "super::exam_categories::Entity",
        from = "Column::ExamCategoryId",
        to = "super::exam_categories::Column::Id"
    )]
    ExamCategory,
    #[sea_orm(has_many = "super::exam_classes::Entity")]
    ExamClasses,
    #[sea_orm(has_many = "super::exam_subjects::Entity")]
    ExamSubjects,
    #[sea_orm(has_many = "super::exam_papers::Entity")]
    ExamPapers,
    #[sea_orm(has_many = "super::exam_results::Entity")]
    ExamResults,
}

impl Related<super::exam_series::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ExamSeries.def()
    }
}

impl Related<super::exam_categories::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ExamCategory.def()
    }
}

impl Related<super::exam_classes::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ExamClasses.def()
    }
}

impl Related<super::exam_subjects::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ExamSubjects.def()
    }
}

impl Related<super::exam_papers::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ExamPapers.def()
    }
}

impl Related<super::exam_results::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ExamResults.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// 从数据库模型转换为业务模型
impl Model {
    pub fn into_exam(self) -> crate::models::exams::entities::Exam {
        use crate::models::exams::entities::{Exam, ExamStatus, ScopeType};
        use chrono::{DateTime, Utc};

        Exam {
            id: self.id,
            school_id: self.school_id,
            exam_series_id: self.exam_series_id,
            exam_category_id: self.exam_category_id,
            grading_system_id: self.grading_system_id,
            name: self.name,
            start_date: self.start_date,
            end_date: self.end_date,
            scope_type: self
                .scope_type
                .parse::<ScopeType>()
                .unwrap_or(ScopeType::AllSchool),
            subject_scope_type: self
                .subject_scope_type
                .parse::<ScopeType>()
                .unwrap_or(ScopeType::AllSchool),
            has_practical: self.has_practical,
            theory_percentage: self.theory_percentage,
            practical_percentage: self.practical_percentage,
            status: self.status.parse::<ExamStatus>().unwrap_or(ExamStatus::Draft),
            created_by: self.created_by,
            created_at: DateTime::<Utc>::from_timestamp(self.created_at, 0).unwrap_or_default(),
            updated_at: DateTime::<Utc>::from_timestamp(self.updated_at, 0).unwrap_or_default(),
        }
    }
}
