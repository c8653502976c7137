use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{GradeBandCache, GradingService};
use crate::engine::catalog::validate_bands;
use crate::models::ApiResponse;
use crate::models::grading::requests::CreateGradingSystemRequest;
use crate::services::schools::ensure_school;
use crate::services::{storage_error_response, validation_response};
use crate::utils::validate::{push_error, validate_name};

pub async fn create_grading_system(
    service: &GradingService,
    request: &HttpRequest,
    req: CreateGradingSystemRequest,
) -> ActixResult<HttpResponse> {
    let mut errors = Vec::new();
    push_error(&mut errors, "name", validate_name(&req.name, 64));
    errors.extend(validate_bands(&req.bands));
    if !errors.is_empty() {
        return Ok(validation_response(errors, "Grading system is invalid"));
    }

    let storage = service.get_storage(request);
    if let Err(resp) = ensure_school(&storage, req.school_id).await {
        return Ok(resp);
    }

    match storage.create_grading_system(req).await {
        Ok(detail) => {
            GradeBandCache::global().invalidate(detail.system.id).await;
            info!(
                "Grading system {} created with {} bands",
                detail.system.id,
                detail.bands.len()
            );
            Ok(HttpResponse::Created().json(ApiResponse::success(
                detail,
                "Grading system created successfully",
            )))
        }
        Err(e) => Ok(storage_error_response(&e, "Grading system creation failed")),
    }
}
