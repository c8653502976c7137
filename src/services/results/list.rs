use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ResultService;
use crate::models::ApiResponse;
use crate::models::results::{requests::ResultListQuery, responses::ResultListResponse};
use crate::services::exams::load_exam_detail;
use crate::services::storage_error_response;

pub async fn list_results(
    service: &ResultService,
    request: &HttpRequest,
    exam_id: i64,
    query: ResultListQuery,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    if let Err(resp) = load_exam_detail(&storage, exam_id).await {
        return Ok(resp);
    }

    match storage.list_exam_results(exam_id, query.subject_id).await {
        Ok(items) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            ResultListResponse { items },
            "Result list retrieved successfully",
        ))),
        Err(e) => Ok(storage_error_response(&e, "Failed to retrieve result list")),
    }
}
