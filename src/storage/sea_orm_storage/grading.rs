//! 评分体系存储操作

use super::{SeaOrmStorage, write_err};
use crate::entity::grade_bands::{self, ActiveModel as GradeBandActiveModel, Entity as GradeBands};
use crate::entity::grading_systems::{
    self, ActiveModel as GradingSystemActiveModel, Entity as GradingSystems,
};
use crate::errors::{ExamSystemError, Result};
use crate::models::grading::{
    entities::{GradeBand, GradingSystem, GradingSystemDetail},
    requests::{CreateGradingSystemRequest, GradeBandInput},
};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, IntoActiveModel, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};

/// 按请求顺序写入等级区间，sort_order 即数组下标
async fn insert_bands<C: ConnectionTrait>(
    db: &C,
    grading_system_id: i64,
    bands: Vec<GradeBandInput>,
) -> Result<Vec<GradeBand>> {
    let mut inserted = Vec::with_capacity(bands.len());
    for (index, band) in bands.into_iter().enumerate() {
        let model = GradeBandActiveModel {
            grading_system_id: Set(grading_system_id),
            min_score: Set(band.min_score),
            max_score: Set(band.max_score),
            grade: Set(band.grade.trim().to_string()),
            points: Set(band.points.unwrap_or(0.0)),
            remarks: Set(band.remarks),
            sort_order: Set(index as i32),
            ..Default::default()
        };
        let result = model.insert(db).await.map_err(write_err("写入等级区间"))?;
        inserted.push(result.into_grade_band());
    }
    Ok(inserted)
}

/// 清除学校内所有默认标记
async fn clear_default<C: ConnectionTrait>(db: &C, school_id: i64) -> Result<()> {
    GradingSystems::update_many()
        .col_expr(grading_systems::Column::IsDefault, Expr::value(false))
        .filter(grading_systems::Column::SchoolId.eq(school_id))
        .exec(db)
        .await
        .map_err(|e| ExamSystemError::database_operation(format!("清除默认评分体系失败: {e}")))?;
    Ok(())
}

impl SeaOrmStorage {
    /// 创建评分体系及其等级区间
    pub async fn create_grading_system_impl(
        &self,
        req: CreateGradingSystemRequest,
    ) -> Result<GradingSystemDetail> {
        let now = chrono::Utc::now().timestamp();
        let is_default = req.is_default.unwrap_or(false);

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| ExamSystemError::database_operation(format!("开启事务失败: {e}")))?;

        if is_default {
            clear_default(&txn, req.school_id).await?;
        }

        let model = GradingSystemActiveModel {
            school_id: Set(req.school_id),
            name: Set(req.name),
            grading_type: Set(req.grading_type.to_string()),
            is_default: Set(is_default),
            is_active: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };
        let system = model.insert(&txn).await.map_err(write_err("创建评分体系"))?;
        let bands = insert_bands(&txn, system.id, req.bands).await?;

        txn.commit()
            .await
            .map_err(|e| ExamSystemError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(GradingSystemDetail {
            system: system.into_grading_system(),
            bands,
        })
    }

    pub async fn get_grading_system_by_id_impl(
        &self,
        id: i64,
    ) -> Result<Option<GradingSystemDetail>> {
        let system = GradingSystems::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| ExamSystemError::database_operation(format!("查询评分体系失败: {e}")))?;

        let Some(system) = system else {
            return Ok(None);
        };
        let bands = self.list_grade_bands_impl(id).await?;

        Ok(Some(GradingSystemDetail {
            system: system.into_grading_system(),
            bands,
        }))
    }

    pub async fn list_grading_systems_impl(&self, school_id: i64) -> Result<Vec<GradingSystem>> {
        let result = GradingSystems::find()
            .filter(grading_systems::Column::SchoolId.eq(school_id))
            .order_by_desc(grading_systems::Column::IsDefault)
            .order_by_asc(grading_systems::Column::Name)
            .all(&self.db)
            .await
            .map_err(|e| {
                ExamSystemError::database_operation(format!("查询评分体系列表失败: {e}"))
            })?;

        Ok(result.into_iter().map(|m| m.into_grading_system()).collect())
    }

    /// 等级区间，按查找顺序排列
    pub async fn list_grade_bands_impl(&self, grading_system_id: i64) -> Result<Vec<GradeBand>> {
        let result = GradeBands::find()
            .filter(grade_bands::Column::GradingSystemId.eq(grading_system_id))
            .order_by_asc(grade_bands::Column::SortOrder)
            .order_by_asc(grade_bands::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| ExamSystemError::database_operation(format!("查询等级区间失败: {e}")))?;

        Ok(result.into_iter().map(|m| m.into_grade_band()).collect())
    }

    /// 整体替换等级区间
    pub async fn replace_grade_bands_impl(
        &self,
        grading_system_id: i64,
        bands: Vec<GradeBandInput>,
    ) -> Result<GradingSystemDetail> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| ExamSystemError::database_operation(format!("开启事务失败: {e}")))?;

        let system = GradingSystems::find_by_id(grading_system_id)
            .one(&txn)
            .await
            .map_err(|e| ExamSystemError::database_operation(format!("查询评分体系失败: {e}")))?
            .ok_or_else(|| {
                ExamSystemError::not_found(format!("评分体系 {grading_system_id} 不存在"))
            })?;

        GradeBands::delete_many()
            .filter(grade_bands::Column::GradingSystemId.eq(grading_system_id))
            .exec(&txn)
            .await
            .map_err(|e| ExamSystemError::database_operation(format!("删除等级区间失败: {e}")))?;

        let bands = insert_bands(&txn, grading_system_id, bands).await?;

        let mut active = system.into_active_model();
        active.updated_at = Set(chrono::Utc::now().timestamp());
        let system = active
            .update(&txn)
            .await
            .map_err(write_err("更新评分体系"))?;

        txn.commit()
            .await
            .map_err(|e| ExamSystemError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(GradingSystemDetail {
            system: system.into_grading_system(),
            bands,
        })
    }

    /// 设为学校默认评分体系：同一事务内先清除再设置
    pub async fn set_default_grading_system_impl(
        &self,
        grading_system_id: i64,
    ) -> Result<GradingSystem> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| ExamSystemError::database_operation(format!("开启事务失败: {e}")))?;

        let system = GradingSystems::find_by_id(grading_system_id)
            .one(&txn)
            .await
            .map_err(|e| ExamSystemError::database_operation(format!("查询评分体系失败: {e}")))?
            .ok_or_else(|| {
                ExamSystemError::not_found(format!("评分体系 {grading_system_id} 不存在"))
            })?;

        clear_default(&txn, system.school_id).await?;

        let mut active = system.into_active_model();
        active.is_default = Set(true);
        active.updated_at = Set(chrono::Utc::now().timestamp());
        let system = active
            .update(&txn)
            .await
            .map_err(write_err("设置默认评分体系"))?;

        txn.commit()
            .await
            .map_err(|e| ExamSystemError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(system.into_grading_system())
    }

    pub async fn get_default_grading_system_impl(
        &self,
        school_id: i64,
    ) -> Result<Option<GradingSystem>> {
        let result = GradingSystems::find()
            .filter(grading_systems::Column::SchoolId.eq(school_id))
            .filter(grading_systems::Column::IsDefault.eq(true))
            .filter(grading_systems::Column::IsActive.eq(true))
            .one(&self.db)
            .await
            .map_err(|e| {
                ExamSystemError::database_operation(format!("查询默认评分体系失败: {e}"))
            })?;

        Ok(result.map(|m| m.into_grading_system()))
    }
}
