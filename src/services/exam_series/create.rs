use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::ExamSeriesService;
use crate::models::exam_series::requests::CreateExamSeriesRequest;
use crate::models::{ApiResponse, FieldError};
use crate::services::schools::ensure_school;
use crate::services::{storage_error_response, validation_response};
use crate::utils::validate::{push_error, validate_academic_year, validate_name, validate_term};

fn validate_series(req: &CreateExamSeriesRequest) -> Vec<FieldError> {
    let mut errors = Vec::new();
    push_error(&mut errors, "name", validate_name(&req.name, 128));
    push_error(
        &mut errors,
        "academic_year",
        validate_academic_year(&req.academic_year),
    );
    push_error(&mut errors, "term", validate_term(req.term));
    if req.end_date < req.start_date {
        errors.push(FieldError::new("end_date", "结束日期不能早于开始日期"));
    }
    errors
}

pub async fn create_series(
    service: &ExamSeriesService,
    request: &HttpRequest,
    req: CreateExamSeriesRequest,
) -> ActixResult<HttpResponse> {
    let errors = validate_series(&req);
    if !errors.is_empty() {
        return Ok(validation_response(errors, "Exam series is invalid"));
    }

    let storage = service.get_storage(request);
    if let Err(resp) = ensure_school(&storage, req.school_id).await {
        return Ok(resp);
    }

    match storage.create_exam_series(req).await {
        Ok(series) => {
            info!(
                "Exam series {} ({} term {}) created",
                series.id, series.academic_year, series.term
            );
            Ok(HttpResponse::Created().json(ApiResponse::success(
                series,
                "Exam series created successfully",
            )))
        }
        Err(e) => Ok(storage_error_response(&e, "Exam series creation failed")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn request(term: i32, start: (i32, u32, u32), end: (i32, u32, u32)) -> CreateExamSeriesRequest {
        CreateExamSeriesRequest {
            school_id: 1,
            name: "Term 1 2026".to_string(),
            academic_year: "2026".to_string(),
            term,
            start_date: NaiveDate::from_ymd_opt(start.0, start.1, start.2).unwrap(),
            end_date: NaiveDate::from_ymd_opt(end.0, end.1, end.2).unwrap(),
        }
    }

    #[test]
    fn test_valid_series() {
        assert!(validate_series(&request(1, (2026, 1, 5), (2026, 4, 3))).is_empty());
    }

    #[test]
    fn test_all_errors_are_reported() {
        let errors = validate_series(&request(5, (2026, 4, 3), (2026, 1, 5)));
        let fields: Vec<_> = errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, vec!["term", "end_date"]);
    }
}
