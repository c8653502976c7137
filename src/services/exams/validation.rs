use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{ExamService, load_exam_detail};
use crate::engine::ExamStructure;
use crate::models::ApiResponse;
use crate::models::exams::responses::ExamValidationResponse;

/// 返回与激活时相同的结构校验结果，不修改任何数据
pub async fn validate_exam(
    service: &ExamService,
    request: &HttpRequest,
    exam_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let detail = match load_exam_detail(&storage, exam_id).await {
        Ok(detail) => detail,
        Err(resp) => return Ok(resp),
    };

    let errors = ExamStructure::new(&detail).validate();
    Ok(HttpResponse::Ok().json(ApiResponse::success(
        ExamValidationResponse {
            exam_id,
            is_valid: errors.is_empty(),
            errors,
        },
        "Exam structure checked",
    )))
}
