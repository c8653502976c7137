use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::SummaryService;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{not_found_response, storage_error_response};

pub async fn get_student_summary(
    service: &SummaryService,
    request: &HttpRequest,
    series_id: i64,
    student_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.get_student_summary(series_id, student_id).await {
        Ok(Some(summary)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            summary,
            "Term summary retrieved successfully",
        ))),
        Ok(None) => Ok(not_found_response(
            ErrorCode::SummaryNotFound,
            format!("No summary for student {student_id} in series {series_id}"),
        )),
        Err(e) => Ok(storage_error_response(&e, "Failed to retrieve term summary")),
    }
}
