//! 评分体系实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "grading_systems")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub school_id: i64,
    pub name: String,
    pub grading_type: String,
    pub is_default: bool,
    pub is_active: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::schools::Entity",
        from = "Column::SchoolId",
        to = "super::schools::Column::Id"
    )]
    School,
    #[sea_orm(has_many = "super::grade_bands::Entity")]
    GradeBands,
}

impl Related<super::schools::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::School.def()
    }
}

impl Related<super::grade_bands::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::GradeBands.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// 从数据库模型转换为业务模型
impl Model {
    pub fn into_grading_system(self) -> crate::models::grading::entities::GradingSystem {
        use crate::models::grading::entities::{GradingSystem, GradingType};
        use chrono::{DateTime, Utc};

        GradingSystem {
            id: self.id,
            school_id: self.school_id,
            name: self.name,
            grading_type: self
                .grading_type
                .parse::<GradingType>()
                .unwrap_or(GradingType::Letter),
            is_default: self.is_default,
            is_active: self.is_active,
            created_at: DateTime::<Utc>::from_timestamp(self.created_at, 0).unwrap_or_default(),
            updated_at: DateTime::<Utc>::from_timestamp(self.updated_at, 0).unwrap_or_default(),
        }
    }
}
