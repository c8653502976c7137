use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::ResultService;
use crate::models::ApiResponse;
use crate::models::results::{requests::VerifyResultsRequest, responses::VerifyResultsResponse};
use crate::services::exams::load_exam_detail;
use crate::services::storage_error_response;

pub async fn verify_results(
    service: &ResultService,
    request: &HttpRequest,
    exam_id: i64,
    req: VerifyResultsRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    if let Err(resp) = load_exam_detail(&storage, exam_id).await {
        return Ok(resp);
    }

    match storage
        .verify_exam_results(exam_id, req.subject_id, req.verified_by)
        .await
    {
        Ok(verified) => {
            info!(
                "User {} verified {} results of exam {}",
                req.verified_by, verified, exam_id
            );
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                VerifyResultsResponse { verified },
                "Results verified successfully",
            )))
        }
        Err(e) => Ok(storage_error_response(&e, "Result verification failed")),
    }
}
