use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::validate::validate_subject_entries;
use super::{ResultService, load_students, not_editable_response, scoring_context};
use crate::models::ApiResponse;
use crate::models::results::{requests::BulkImportResultsRequest, responses::BulkImportResponse};
use crate::services::exams::load_exam_detail;
use crate::services::locks::EXAM_LOCKS;
use crate::services::{storage_error_response, validation_response};

/// 批量导入某科成绩
///
/// 先整批校验，任何一行不合法都不写入；通过后在一个事务内逐行 upsert、计分，
/// 再对该科重新排名。同一考试的导入串行执行。
pub async fn import_results(
    service: &ResultService,
    request: &HttpRequest,
    exam_id: i64,
    req: BulkImportResultsRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let _guard = EXAM_LOCKS.lock(exam_id).await;

    let detail = match load_exam_detail(&storage, exam_id).await {
        Ok(detail) => detail,
        Err(resp) => return Ok(resp),
    };
    if !detail.exam.status.accepts_results() {
        return Ok(not_editable_response(&detail));
    }

    let student_ids: Vec<i64> = req.results.iter().map(|r| r.student_id).collect();
    let students = match load_students(&storage, &student_ids).await {
        Ok(students) => students,
        Err(resp) => return Ok(resp),
    };

    let errors = validate_subject_entries(&detail, req.subject_id, &req.results, &students);
    if !errors.is_empty() {
        return Ok(validation_response(errors, "Result import rejected"));
    }

    let ctx = match scoring_context(&storage, &detail, req.subject_id, req.entered_by).await {
        Ok(ctx) => ctx,
        Err(resp) => return Ok(resp),
    };

    let imported = req.results.len();
    let absent = req.results.iter().filter(|r| r.is_absent).count();
    match storage.import_subject_results(ctx, req.results).await {
        Ok(results) => {
            info!(
                "Imported {} results ({} absent) for exam {} subject {}",
                imported, absent, exam_id, req.subject_id
            );
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                BulkImportResponse {
                    exam_id,
                    subject_id: req.subject_id,
                    imported,
                    absent,
                    results,
                },
                "Results imported successfully",
            )))
        }
        Err(e) => Ok(storage_error_response(&e, "Result import failed")),
    }
}
