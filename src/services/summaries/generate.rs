use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{SummaryService, load_series};
use crate::models::ApiResponse;
use crate::services::locks::SERIES_LOCKS;
use crate::services::storage_error_response;

/// 由成绩表完整重建某系列的学期汇总
///
/// 同一系列的重建串行执行，结果与执行次数无关。
pub async fn generate_summaries(
    service: &SummaryService,
    request: &HttpRequest,
    series_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let _guard = SERIES_LOCKS.lock(series_id).await;

    let series = match load_series(&storage, series_id).await {
        Ok(series) => series,
        Err(resp) => return Ok(resp),
    };

    match storage.regenerate_series_summaries(&series).await {
        Ok(response) => {
            info!(
                "Regenerated {} summaries for series {} ({} stale removed)",
                response.generated, series_id, response.removed
            );
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                response,
                "Term summaries generated successfully",
            )))
        }
        Err(e) => Ok(storage_error_response(&e, "Term summary generation failed")),
    }
}
