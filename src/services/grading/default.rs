use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{GradeBandCache, GradingService};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{not_found_response, storage_error_response};

pub async fn set_default(
    service: &GradingService,
    request: &HttpRequest,
    grading_system_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.set_default_grading_system(grading_system_id).await {
        Ok(system) => {
            GradeBandCache::global().invalidate(system.id).await;
            info!(
                "Grading system {} is now the default of school {}",
                system.id, system.school_id
            );
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                system,
                "Default grading system updated",
            )))
        }
        Err(e) => Ok(storage_error_response(&e, "Failed to set default grading system")),
    }
}

pub async fn get_default(
    service: &GradingService,
    request: &HttpRequest,
    school_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.get_default_grading_system(school_id).await {
        Ok(Some(system)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            system,
            "Default grading system retrieved successfully",
        ))),
        Ok(None) => Ok(not_found_response(
            ErrorCode::GradingSystemNotFound,
            format!("School {school_id} has no default grading system"),
        )),
        Err(e) => Ok(storage_error_response(&e, "Failed to retrieve default grading system")),
    }
}
