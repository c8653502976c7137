use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::rules::validate_new_paper;
use super::{ExamService, load_exam_detail};
use crate::errors::ExamSystemError;
use crate::models::exams::requests::CreateExamPaperRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::locks::EXAM_LOCKS;
use crate::services::{storage_error_response, validation_response};

pub async fn create_paper(
    service: &ExamService,
    request: &HttpRequest,
    exam_id: i64,
    req: CreateExamPaperRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    // 权重合计检查与写入之间不能插入其他试卷
    let _guard = EXAM_LOCKS.lock(exam_id).await;

    let detail = match load_exam_detail(&storage, exam_id).await {
        Ok(detail) => detail,
        Err(resp) => return Ok(resp),
    };

    let errors = validate_new_paper(&detail, &req);
    if !errors.is_empty() {
        return Ok(validation_response(errors, "Exam paper is invalid"));
    }

    let subject_id = req.subject_id;
    let paper_number = req.paper_number;
    match storage.create_exam_paper(exam_id, req).await {
        Ok(paper) => {
            info!(
                "Paper {} of subject {} added to exam {}",
                paper.paper_number, paper.subject_id, exam_id
            );
            Ok(HttpResponse::Created().json(ApiResponse::success(
                paper,
                "Exam paper created successfully",
            )))
        }
        Err(ExamSystemError::Conflict(_)) => Ok(HttpResponse::Conflict().json(
            ApiResponse::error_empty(
                ErrorCode::ExamPaperDuplicate,
                format!("Paper {paper_number} of subject {subject_id} already exists"),
            ),
        )),
        Err(e) => Ok(storage_error_response(&e, "Exam paper creation failed")),
    }
}
