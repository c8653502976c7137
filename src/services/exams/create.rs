use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::ExamService;
use super::rules::{resolve_scope, validate_exam_request};
use crate::models::exams::requests::CreateExamRequest;
use crate::models::{ApiResponse, ErrorCode, FieldError};
use crate::services::{not_found_response, storage_error_response, validation_response};

pub async fn create_exam(
    service: &ExamService,
    request: &HttpRequest,
    mut req: CreateExamRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    // 考试归属于系列所在的学校
    let series = match storage.get_exam_series_by_id(req.exam_series_id).await {
        Ok(Some(series)) => series,
        Ok(None) => {
            return Ok(not_found_response(
                ErrorCode::ExamSeriesNotFound,
                format!("Exam series {} not found", req.exam_series_id),
            ));
        }
        Err(e) => return Ok(storage_error_response(&e, "Failed to load exam series")),
    };
    let school_id = series.school_id;

    let mut errors = validate_exam_request(&req);

    match storage.get_exam_category_by_id(req.exam_category_id).await {
        Ok(Some(category)) if category.school_id == school_id => {}
        Ok(_) => errors.push(FieldError::new(
            "exam_category_id",
            format!("考试类别 {} 不存在或不属于本校", req.exam_category_id),
        )),
        Err(e) => return Ok(storage_error_response(&e, "Failed to load exam category")),
    }

    match storage.get_grading_system_by_id(req.grading_system_id).await {
        Ok(Some(detail)) if detail.system.school_id == school_id => {}
        Ok(_) => errors.push(FieldError::new(
            "grading_system_id",
            format!("评分体系 {} 不存在或不属于本校", req.grading_system_id),
        )),
        Err(e) => return Ok(storage_error_response(&e, "Failed to load grading system")),
    }

    let classes = match storage.list_school_classes(school_id).await {
        Ok(classes) => classes,
        Err(e) => return Ok(storage_error_response(&e, "Failed to load classes")),
    };
    let subjects = match storage.list_subjects(school_id).await {
        Ok(subjects) => subjects,
        Err(e) => return Ok(storage_error_response(&e, "Failed to load subjects")),
    };

    match resolve_scope(&req, &classes, &subjects) {
        Ok(scope) => {
            req.class_ids = scope.class_ids;
            req.subjects = scope.subjects;
        }
        Err(scope_errors) => errors.extend(scope_errors),
    }

    if !errors.is_empty() {
        return Ok(validation_response(errors, "Exam is invalid"));
    }

    match storage.create_exam(school_id, req).await {
        Ok(detail) => {
            info!(
                "Exam {} created in series {} with {} classes and {} subjects",
                detail.exam.id,
                detail.exam.exam_series_id,
                detail.class_ids.len(),
                detail.subjects.len()
            );
            Ok(HttpResponse::Created().json(ApiResponse::success(detail, "Exam created successfully")))
        }
        Err(e) => Ok(storage_error_response(&e, "Exam creation failed")),
    }
}
