use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{info, warn};

use super::{ExamService, load_exam_detail};
use crate::engine::{ExamStructure, ExamTransition};
use crate::models::common::validation::join_field_errors;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::locks::EXAM_LOCKS;
use crate::services::storage_error_response;

/// 执行状态流转
///
/// 守卫失败返回 409 与完整的违规列表；写入以当前状态为条件，并发下不会重复流转。
pub async fn transition_exam(
    service: &ExamService,
    request: &HttpRequest,
    exam_id: i64,
    transition: ExamTransition,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let _guard = EXAM_LOCKS.lock(exam_id).await;

    let detail = match load_exam_detail(&storage, exam_id).await {
        Ok(detail) => detail,
        Err(resp) => return Ok(resp),
    };

    let target = match ExamStructure::new(&detail).check_transition(transition) {
        Ok(target) => target,
        Err(errors) => {
            warn!(
                "Exam {} cannot {}: {}",
                exam_id,
                transition,
                join_field_errors(&errors)
            );
            return Ok(HttpResponse::Conflict().json(ApiResponse::error(
                ErrorCode::ExamInvalidTransition,
                errors,
                format!("Exam cannot {transition} in its current state"),
            )));
        }
    };

    match storage
        .transition_exam_status(exam_id, detail.exam.status, target)
        .await
    {
        Ok(true) => {
            info!("Exam {} moved {} -> {}", exam_id, detail.exam.status, target);
            let mut exam = detail.exam;
            exam.status = target;
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                exam,
                format!("Exam moved to {target}"),
            )))
        }
        Ok(false) => {
            warn!("Exam {} status changed concurrently, {} aborted", exam_id, transition);
            Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
                ErrorCode::ExamInvalidTransition,
                "Exam status changed concurrently, please retry",
            )))
        }
        Err(e) => Ok(storage_error_response(&e, "Exam status update failed")),
    }
}
