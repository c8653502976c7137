use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::SchoolService;
use crate::models::ApiResponse;
use crate::models::schools::requests::CreateSchoolRequest;
use crate::services::{storage_error_response, validation_response};
use crate::utils::validate::{push_error, validate_name};

pub async fn create_school(
    service: &SchoolService,
    request: &HttpRequest,
    req: CreateSchoolRequest,
) -> ActixResult<HttpResponse> {
    let mut errors = Vec::new();
    push_error(&mut errors, "name", validate_name(&req.name, 128));
    if !errors.is_empty() {
        return Ok(validation_response(errors, "School data is invalid"));
    }

    let storage = service.get_storage(request);
    match storage.create_school(req).await {
        Ok(school) => {
            info!("School {} created", school.id);
            Ok(HttpResponse::Created().json(ApiResponse::success(school, "School created successfully")))
        }
        Err(e) => Ok(storage_error_response(&e, "School creation failed")),
    }
}
