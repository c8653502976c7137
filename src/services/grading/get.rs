use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::GradingService;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{not_found_response, storage_error_response};

pub async fn get_grading_system(
    service: &GradingService,
    request: &HttpRequest,
    grading_system_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.get_grading_system_by_id(grading_system_id).await {
        Ok(Some(detail)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            detail,
            "Grading system retrieved successfully",
        ))),
        Ok(None) => Ok(not_found_response(
            ErrorCode::GradingSystemNotFound,
            format!("Grading system {grading_system_id} not found"),
        )),
        Err(e) => Ok(storage_error_response(&e, "Failed to retrieve grading system")),
    }
}
