use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{ExamService, load_exam_detail};
use crate::models::ApiResponse;

pub async fn get_exam(
    service: &ExamService,
    request: &HttpRequest,
    exam_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match load_exam_detail(&storage, exam_id).await {
        Ok(detail) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            detail,
            "Exam retrieved successfully",
        ))),
        Err(resp) => Ok(resp),
    }
}
