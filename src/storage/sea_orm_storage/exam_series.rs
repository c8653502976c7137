//! 考试系列存储操作

use super::{SeaOrmStorage, write_err};
use crate::entity::exam_series::{ActiveModel, Column, Entity as ExamSeriesEntity};
use crate::errors::{ExamSystemError, Result};
use crate::models::{
    PaginationInfo,
    exam_series::{
        entities::ExamSeries,
        requests::{CreateExamSeriesRequest, ExamSeriesListQuery},
        responses::ExamSeriesListResponse,
    },
    normalize_page,
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
};

impl SeaOrmStorage {
    /// 创建考试系列
    pub async fn create_exam_series_impl(&self, req: CreateExamSeriesRequest) -> Result<ExamSeries> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            school_id: Set(req.school_id),
            name: Set(req.name),
            academic_year: Set(req.academic_year),
            term: Set(req.term),
            start_date: Set(req.start_date),
            end_date: Set(req.end_date),
            is_active: Set(true),
            is_published: Set(false),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(write_err("创建考试系列"))?;

        Ok(result.into_exam_series())
    }

    pub async fn get_exam_series_by_id_impl(&self, series_id: i64) -> Result<Option<ExamSeries>> {
        let result = ExamSeriesEntity::find_by_id(series_id)
            .one(&self.db)
            .await
            .map_err(|e| ExamSystemError::database_operation(format!("查询考试系列失败: {e}")))?;

        Ok(result.map(|m| m.into_exam_series()))
    }

    /// 分页列出考试系列，按学年、学期倒序
    pub async fn list_exam_series_with_pagination_impl(
        &self,
        query: ExamSeriesListQuery,
    ) -> Result<ExamSeriesListResponse> {
        let (page, size) = normalize_page(query.page, query.size);

        let mut select = ExamSeriesEntity::find().filter(Column::SchoolId.eq(query.school_id));

        if let Some(ref academic_year) = query.academic_year
            && !academic_year.trim().is_empty()
        {
            select = select.filter(Column::AcademicYear.eq(academic_year.trim()));
        }

        let paginator = select
            .order_by_desc(Column::AcademicYear)
            .order_by_desc(Column::Term)
            .order_by_desc(Column::Id)
            .paginate(&self.db, size);

        let total = paginator.num_items().await.map_err(|e| {
            ExamSystemError::database_operation(format!("查询考试系列总数失败: {e}"))
        })?;

        let items = paginator.fetch_page(page - 1).await.map_err(|e| {
            ExamSystemError::database_operation(format!("查询考试系列列表失败: {e}"))
        })?;

        Ok(ExamSeriesListResponse {
            pagination: PaginationInfo::new(page, size, total),
            items: items.into_iter().map(|m| m.into_exam_series()).collect(),
        })
    }
}
