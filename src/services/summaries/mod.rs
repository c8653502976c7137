pub mod generate;
pub mod get;
pub mod list;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::ErrorCode;
use crate::models::exam_series::entities::ExamSeries;
use crate::models::summaries::requests::SummaryListQuery;
use crate::services::{not_found_response, storage_error_response};
use crate::storage::Storage;

pub struct SummaryService {
    storage: Option<Arc<dyn Storage>>,
}

impl SummaryService {
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

    // 重新生成系列汇总
    pub async fn generate_summaries(
        &self,
        request: &HttpRequest,
        series_id: i64,
    ) -> ActixResult<HttpResponse> {
        generate::generate_summaries(self, request, series_id).await
    }

    pub async fn list_summaries(
        &self,
        request: &HttpRequest,
        series_id: i64,
        query: SummaryListQuery,
    ) -> ActixResult<HttpResponse> {
        list::list_summaries(self, request, series_id, query).await
    }

    pub async fn get_student_summary(
        &self,
        request: &HttpRequest,
        series_id: i64,
        student_id: i64,
    ) -> ActixResult<HttpResponse> {
        get::get_student_summary(self, request, series_id, student_id).await
    }
}

pub(crate) async fn load_series(
    storage: &Arc<dyn Storage>,
    series_id: i64,
) -> Result<ExamSeries, HttpResponse> {
    match storage.get_exam_series_by_id(series_id).await {
        Ok(Some(series)) => Ok(series),
        Ok(None) => Err(not_found_response(
            ErrorCode::ExamSeriesNotFound,
            format!("Exam series {series_id} not found"),
        )),
        Err(e) => Err(storage_error_response(&e, "Failed to load exam series")),
    }
}
