pub mod band_cache;
pub mod create;
pub mod default;
pub mod get;
pub mod list;
pub mod replace;
pub mod resolve;

pub use band_cache::GradeBandCache;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::grading::requests::{
    CreateGradingSystemRequest, GradingSystemListQuery, ReplaceGradeBandsRequest,
    ResolveGradeQuery,
};
use crate::storage::Storage;

pub struct GradingService {
    storage: Option<Arc<dyn Storage>>,
}

impl GradingService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        if let Some(storage) = &self.storage {
            storage.clone()
        } else {
            request
                .app_data::<actix_web::web::Data<Arc<dyn Storage>>>()
                .expect("Storage not found in app data")
                .get_ref()
                .clone()
        }
    }

    // 创建评分体系（含等级区间）
    pub async fn create_grading_system(
        &self,
        request: &HttpRequest,
        req: CreateGradingSystemRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_grading_system(self, request, req).await
    }

    pub async fn get_grading_system(
        &self,
        request: &HttpRequest,
        grading_system_id: i64,
    ) -> ActixResult<HttpResponse> {
        get::get_grading_system(self, request, grading_system_id).await
    }

    pub async fn list_grading_systems(
        &self,
        request: &HttpRequest,
        query: GradingSystemListQuery,
    ) -> ActixResult<HttpResponse> {
        list::list_grading_systems(self, request, query).await
    }

    // 整体替换等级区间
    pub async fn replace_bands(
        &self,
        request: &HttpRequest,
        grading_system_id: i64,
        req: ReplaceGradeBandsRequest,
    ) -> ActixResult<HttpResponse> {
        replace::replace_bands(self, request, grading_system_id, req).await
    }

    // 设为学校默认评分体系
    pub async fn set_default(
        &self,
        request: &HttpRequest,
        grading_system_id: i64,
    ) -> ActixResult<HttpResponse> {
        default::set_default(self, request, grading_system_id).await
    }

    pub async fn get_default(&self, request: &HttpRequest, school_id: i64) -> ActixResult<HttpResponse> {
        default::get_default(self, request, school_id).await
    }

    // 按评分体系查分数对应的等级
    pub async fn resolve_grade(
        &self,
        request: &HttpRequest,
        grading_system_id: i64,
        query: ResolveGradeQuery,
    ) -> ActixResult<HttpResponse> {
        resolve::resolve_grade(self, request, grading_system_id, query).await
    }
}
