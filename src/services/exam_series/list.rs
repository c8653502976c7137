use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ExamSeriesService;
use crate::models::ApiResponse;
use crate::models::exam_series::requests::ExamSeriesListQuery;
use crate::services::storage_error_response;

pub async fn list_series(
    service: &ExamSeriesService,
    request: &HttpRequest,
    query: ExamSeriesListQuery,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.list_exam_series_with_pagination(query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            response,
            "Exam series list retrieved successfully",
        ))),
        Err(e) => Ok(storage_error_response(&e, "Failed to retrieve exam series list")),
    }
}
