use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::SchoolService;
use crate::models::ApiResponse;
use crate::services::storage_error_response;

pub async fn list_schools(service: &SchoolService, request: &HttpRequest) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.list_schools().await {
        Ok(schools) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            schools,
            "School list retrieved successfully",
        ))),
        Err(e) => Ok(storage_error_response(&e, "Failed to retrieve school list")),
    }
}
