use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{SummaryService, load_series};
use crate::models::ApiResponse;
use crate::models::summaries::requests::SummaryListQuery;
use crate::services::storage_error_response;

pub async fn list_summaries(
    service: &SummaryService,
    request: &HttpRequest,
    series_id: i64,
    query: SummaryListQuery,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    if let Err(resp) = load_series(&storage, series_id).await {
        return Ok(resp);
    }

    match storage.list_series_summaries(series_id, query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            response,
            "Term summary list retrieved successfully",
        ))),
        Err(e) => Ok(storage_error_response(&e, "Failed to retrieve term summary list")),
    }
}
