use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::validate::validate_paper_entries;
use super::{ResultService, load_students, not_editable_response, scoring_context};
use crate::models::results::requests::EnterPaperResultsRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::exams::load_exam_detail;
use crate::services::locks::EXAM_LOCKS;
use crate::services::{not_found_response, storage_error_response, validation_response};

pub async fn enter_paper_results(
    service: &ResultService,
    request: &HttpRequest,
    paper_id: i64,
    req: EnterPaperResultsRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let exam_id = match storage.get_exam_paper_by_id(paper_id).await {
        Ok(Some(paper)) => paper.exam_id,
        Ok(None) => {
            return Ok(not_found_response(
                ErrorCode::ExamPaperNotFound,
                format!("Exam paper {paper_id} not found"),
            ));
        }
        Err(e) => return Ok(storage_error_response(&e, "Failed to load exam paper")),
    };

    let _guard = EXAM_LOCKS.lock(exam_id).await;
    let detail = match load_exam_detail(&storage, exam_id).await {
        Ok(detail) => detail,
        Err(resp) => return Ok(resp),
    };
    if !detail.exam.status.accepts_results() {
        return Ok(not_editable_response(&detail));
    }
    let Some(paper) = detail.papers.iter().find(|p| p.id == paper_id).cloned() else {
        return Ok(not_found_response(
            ErrorCode::ExamPaperNotFound,
            format!("Exam paper {paper_id} not found"),
        ));
    };

    let student_ids: Vec<i64> = req.results.iter().map(|r| r.student_id).collect();
    let students = match load_students(&storage, &student_ids).await {
        Ok(students) => students,
        Err(resp) => return Ok(resp),
    };

    let errors = validate_paper_entries(&detail, &paper, &req.results, &students);
    if !errors.is_empty() {
        return Ok(validation_response(errors, "Paper results rejected"));
    }

    let ctx = match scoring_context(&storage, &detail, paper.subject_id, req.entered_by).await {
        Ok(ctx) => ctx,
        Err(resp) => return Ok(resp),
    };

    let count = req.results.len();
    match storage.enter_paper_results(ctx, paper, req.results).await {
        Ok(response) => {
            info!(
                "Entered {} results for paper {} of exam {}",
                count, paper_id, exam_id
            );
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                response,
                "Paper results entered successfully",
            )))
        }
        Err(e) => Ok(storage_error_response(&e, "Paper result entry failed")),
    }
}
