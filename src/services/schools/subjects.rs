use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{SchoolService, ensure_school};
use crate::models::ApiResponse;
use crate::models::schools::{requests::CreateSubjectRequest, responses::SubjectListResponse};
use crate::services::{storage_error_response, validation_response};
use crate::utils::validate::{push_error, validate_name, validate_subject_code};

pub async fn create_subject(
    service: &SchoolService,
    request: &HttpRequest,
    school_id: i64,
    req: CreateSubjectRequest,
) -> ActixResult<HttpResponse> {
    let mut errors = Vec::new();
    push_error(&mut errors, "name", validate_name(&req.name, 64));
    push_error(&mut errors, "code", validate_subject_code(&req.code));
    if !errors.is_empty() {
        return Ok(validation_response(errors, "Subject data is invalid"));
    }

    let storage = service.get_storage(request);
    if let Err(resp) = ensure_school(&storage, school_id).await {
        return Ok(resp);
    }

    match storage.create_subject(school_id, req).await {
        Ok(subject) => {
            info!("Subject {} ({}) created", subject.code, subject.id);
            Ok(HttpResponse::Created().json(ApiResponse::success(subject, "Subject created successfully")))
        }
        Err(e) => Ok(storage_error_response(&e, "Subject creation failed")),
    }
}

pub async fn list_subjects(
    service: &SchoolService,
    request: &HttpRequest,
    school_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.list_subjects(school_id).await {
        Ok(items) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            SubjectListResponse { items },
            "Subject list retrieved successfully",
        ))),
        Err(e) => Ok(storage_error_response(&e, "Failed to retrieve subject list")),
    }
}
