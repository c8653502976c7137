use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::SchoolService;
use crate::models::schools::{requests::CreateStreamRequest, responses::StreamListResponse};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{not_found_response, storage_error_response, validation_response};
use crate::utils::validate::{push_error, validate_name};

pub async fn create_stream(
    service: &SchoolService,
    request: &HttpRequest,
    class_id: i64,
    req: CreateStreamRequest,
) -> ActixResult<HttpResponse> {
    let mut errors = Vec::new();
    push_error(&mut errors, "name", validate_name(&req.name, 64));
    if !errors.is_empty() {
        return Ok(validation_response(errors, "Stream data is invalid"));
    }

    let storage = service.get_storage(request);
    match storage.get_school_class_by_id(class_id).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            return Ok(not_found_response(
                ErrorCode::ClassNotFound,
                format!("Class {class_id} not found"),
            ));
        }
        Err(e) => return Ok(storage_error_response(&e, "Failed to load class")),
    }

    match storage.create_stream(class_id, req).await {
        Ok(stream) => {
            info!("Stream {} created in class {}", stream.id, class_id);
            Ok(HttpResponse::Created().json(ApiResponse::success(stream, "Stream created successfully")))
        }
        Err(e) => Ok(storage_error_response(&e, "Stream creation failed")),
    }
}

pub async fn list_streams(
    service: &SchoolService,
    request: &HttpRequest,
    class_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.list_streams(class_id).await {
        Ok(items) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            StreamListResponse { items },
            "Stream list retrieved successfully",
        ))),
        Err(e) => Ok(storage_error_response(&e, "Failed to retrieve stream list")),
    }
}
