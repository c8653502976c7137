use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::ExamService;
use crate::models::exams::{
    requests::{CreateExamCategoryRequest, ExamCategoryListQuery},
    responses::ExamCategoryListResponse,
};
use crate::models::{ApiResponse, FieldError};
use crate::services::schools::ensure_school;
use crate::services::{storage_error_response, validation_response};
use crate::utils::validate::{push_error, validate_name};

pub async fn create_category(
    service: &ExamService,
    request: &HttpRequest,
    req: CreateExamCategoryRequest,
) -> ActixResult<HttpResponse> {
    let mut errors = Vec::new();
    push_error(&mut errors, "name", validate_name(&req.name, 64));
    if req.weight.is_some_and(|w| !(0.0..=100.0).contains(&w)) {
        errors.push(FieldError::new("weight", "权重必须在 0 到 100 之间"));
    }
    if !errors.is_empty() {
        return Ok(validation_response(errors, "Exam category is invalid"));
    }

    let storage = service.get_storage(request);
    if let Err(resp) = ensure_school(&storage, req.school_id).await {
        return Ok(resp);
    }

    match storage.create_exam_category(req).await {
        Ok(category) => {
            info!("Exam category {} created", category.id);
            Ok(HttpResponse::Created().json(ApiResponse::success(
                category,
                "Exam category created successfully",
            )))
        }
        Err(e) => Ok(storage_error_response(&e, "Exam category creation failed")),
    }
}

pub async fn list_categories(
    service: &ExamService,
    request: &HttpRequest,
    query: ExamCategoryListQuery,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.list_exam_categories(query.school_id).await {
        Ok(items) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            ExamCategoryListResponse { items },
            "Exam category list retrieved successfully",
        ))),
        Err(e) => Ok(storage_error_response(&e, "Failed to retrieve exam category list")),
    }
}
