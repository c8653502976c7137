use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{SchoolService, ensure_school};
use crate::models::ApiResponse;
use crate::models::schools::{requests::CreateSchoolClassRequest, responses::SchoolClassListResponse};
use crate::services::{storage_error_response, validation_response};
use crate::utils::validate::{push_error, validate_name};

pub async fn create_class(
    service: &SchoolService,
    request: &HttpRequest,
    school_id: i64,
    req: CreateSchoolClassRequest,
) -> ActixResult<HttpResponse> {
    let mut errors = Vec::new();
    push_error(&mut errors, "name", validate_name(&req.name, 64));
    if !errors.is_empty() {
        return Ok(validation_response(errors, "Class data is invalid"));
    }

    let storage = service.get_storage(request);
    if let Err(resp) = ensure_school(&storage, school_id).await {
        return Ok(resp);
    }

    match storage.create_school_class(school_id, req).await {
        Ok(class) => {
            info!("Class {} created in school {}", class.id, school_id);
            Ok(HttpResponse::Created().json(ApiResponse::success(class, "Class created successfully")))
        }
        Err(e) => Ok(storage_error_response(&e, "Class creation failed")),
    }
}

pub async fn list_classes(
    service: &SchoolService,
    request: &HttpRequest,
    school_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.list_school_classes(school_id).await {
        Ok(items) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            SchoolClassListResponse { items },
            "Class list retrieved successfully",
        ))),
        Err(e) => Ok(storage_error_response(&e, "Failed to retrieve class list")),
    }
}
