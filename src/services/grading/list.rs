use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::GradingService;
use crate::models::ApiResponse;
use crate::models::grading::{
    requests::GradingSystemListQuery, responses::GradingSystemListResponse,
};
use crate::services::storage_error_response;

pub async fn list_grading_systems(
    service: &GradingService,
    request: &HttpRequest,
    query: GradingSystemListQuery,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.list_grading_systems(query.school_id).await {
        Ok(items) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            GradingSystemListResponse { items },
            "Grading system list retrieved successfully",
        ))),
        Err(e) => Ok(storage_error_response(&e, "Failed to retrieve grading system list")),
    }
}
