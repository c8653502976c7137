use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ExamSeriesService;
use crate::models::exams::responses::ExamListResponse;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{not_found_response, storage_error_response};

pub async fn get_series(
    service: &ExamSeriesService,
    request: &HttpRequest,
    series_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.get_exam_series_by_id(series_id).await {
        Ok(Some(series)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            series,
            "Exam series retrieved successfully",
        ))),
        Ok(None) => Ok(not_found_response(
            ErrorCode::ExamSeriesNotFound,
            format!("Exam series {series_id} not found"),
        )),
        Err(e) => Ok(storage_error_response(&e, "Failed to retrieve exam series")),
    }
}

pub async fn list_series_exams(
    service: &ExamSeriesService,
    request: &HttpRequest,
    series_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.get_exam_series_by_id(series_id).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            return Ok(not_found_response(
                ErrorCode::ExamSeriesNotFound,
                format!("Exam series {series_id} not found"),
            ));
        }
        Err(e) => return Ok(storage_error_response(&e, "Failed to retrieve exam series")),
    }

    match storage.list_exams_by_series(series_id).await {
        Ok(items) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            ExamListResponse { items },
            "Exam list retrieved successfully",
        ))),
        Err(e) => Ok(storage_error_response(&e, "Failed to retrieve exam list")),
    }
}
