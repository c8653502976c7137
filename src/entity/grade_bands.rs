//! 等级区间实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "grade_bands")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub grading_system_id: i64,
    pub min_score: f64,
    pub max_score: f64,
    pub grade: String,
    pub points: f64,
    #[sea_orm(column_type = "Text", nullable)]
    pub remarks: Option<String>,
    pub sort_order: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::grading_systems::Entity",
        from = "Column::GradingSystemId",
        to = "super::grading_systems::Column::Id"
    )]
    GradingSystem,
}

impl Related<super::grading_systems::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::GradingSystem.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_grade_band(self) -> crate::models::grading::entities::GradeBand {
        crate::models::grading::entities::GradeBand {
            id: self.id,
            grading_system_id: self.grading_system_id,
            min_score: self.min_score,
            max_score: self.max_score,
            grade: self.grade,
            points: self.points,
            remarks: self.remarks,
            sort_order: self.sort_order,
        }
    }
}
