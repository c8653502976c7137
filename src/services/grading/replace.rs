use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{GradeBandCache, GradingService};
use crate::engine::catalog::validate_bands;
use crate::models::ApiResponse;
use crate::models::grading::requests::ReplaceGradeBandsRequest;
use crate::services::{storage_error_response, validation_response};

/// 整体替换等级区间
///
/// 已录入的成绩不会被重新定级，只影响之后的计分。
pub async fn replace_bands(
    service: &GradingService,
    request: &HttpRequest,
    grading_system_id: i64,
    req: ReplaceGradeBandsRequest,
) -> ActixResult<HttpResponse> {
    let errors = validate_bands(&req.bands);
    if !errors.is_empty() {
        return Ok(validation_response(errors, "Grade bands are invalid"));
    }

    let storage = service.get_storage(request);
    let result = storage.replace_grade_bands(grading_system_id, req.bands).await;

    // 无论成功与否都失效，失败时下次读取会重新加载
    GradeBandCache::global().invalidate(grading_system_id).await;

    match result {
        Ok(detail) => {
            info!(
                "Grading system {} bands replaced ({} bands)",
                grading_system_id,
                detail.bands.len()
            );
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                detail,
                "Grade bands replaced successfully",
            )))
        }
        Err(e) => Ok(storage_error_response(&e, "Grade band replacement failed")),
    }
}
