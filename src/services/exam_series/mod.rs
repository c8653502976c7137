pub mod create;
pub mod get;
pub mod list;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::exam_series::requests::{CreateExamSeriesRequest, ExamSeriesListQuery};
use crate::storage::Storage;

pub struct ExamSeriesService {
    storage: Option<Arc<dyn Storage>>,
}

impl ExamSeriesService {
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

    pub async fn create_series(
        &self,
        request: &HttpRequest,
        req: CreateExamSeriesRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_series(self, request, req).await
    }

    pub async fn get_series(&self, request: &HttpRequest, series_id: i64) -> ActixResult<HttpResponse> {
        get::get_series(self, request, series_id).await
    }

    // 列出系列内的考试
    pub async fn list_series_exams(
        &self,
        request: &HttpRequest,
        series_id: i64,
    ) -> ActixResult<HttpResponse> {
        get::list_series_exams(self, request, series_id).await
    }

    pub async fn list_series(
        &self,
        request: &HttpRequest,
        query: ExamSeriesListQuery,
    ) -> ActixResult<HttpResponse> {
        list::list_series(self, request, query).await
    }
}
