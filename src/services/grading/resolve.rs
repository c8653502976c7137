use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{GradeBandCache, GradingService};
use crate::engine::GradingCatalog;
use crate::models::grading::{requests::ResolveGradeQuery, responses::ResolveGradeResponse};
use crate::models::{ApiResponse, ErrorCode, FieldError};
use crate::services::{not_found_response, storage_error_response, validation_response};

/// 查询分数在某评分体系下的等级，没有匹配区间时返回 `N/A`
pub async fn resolve_grade(
    service: &GradingService,
    request: &HttpRequest,
    grading_system_id: i64,
    query: ResolveGradeQuery,
) -> ActixResult<HttpResponse> {
    if !query.score.is_finite() {
        return Ok(validation_response(
            vec![FieldError::new("score", "分数必须是有限数值")],
            "Score is invalid",
        ));
    }

    let storage = service.get_storage(request);
    match storage.get_grading_system_by_id(grading_system_id).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            return Ok(not_found_response(
                ErrorCode::GradingSystemNotFound,
                format!("Grading system {grading_system_id} not found"),
            ));
        }
        Err(e) => return Ok(storage_error_response(&e, "Failed to retrieve grading system")),
    }

    let bands = match GradeBandCache::global()
        .get_or_load(&storage, grading_system_id)
        .await
    {
        Ok(bands) => bands,
        Err(e) => return Ok(storage_error_response(&e, "Failed to load grade bands")),
    };

    let resolved = GradingCatalog::new(&bands).resolve_or_ungraded(query.score);
    Ok(HttpResponse::Ok().json(ApiResponse::success(
        ResolveGradeResponse {
            grading_system_id,
            score: query.score,
            resolved,
        },
        "Grade resolved successfully",
    )))
}
