pub mod exam_series;
pub mod exams;
pub mod grading;
pub mod locks;
pub mod results;
pub mod schools;
pub mod summaries;

pub use exam_series::ExamSeriesService;
pub use exams::ExamService;
pub use grading::GradingService;
pub use results::ResultService;
pub use schools::SchoolService;
pub use summaries::SummaryService;

use actix_web::HttpResponse;
use actix_web::http::StatusCode;
use tracing::{error, warn};

use crate::errors::ExamSystemError;
use crate::models::{ApiResponse, ErrorCode, FieldError};

/// 存储层错误转换为 HTTP 响应
///
/// 5xx 记 error 日志，其余记 warn。
pub(crate) fn storage_error_response(err: &ExamSystemError, context: &str) -> HttpResponse {
    let code = match err {
        ExamSystemError::NotFound(_) => ErrorCode::NotFound,
        ExamSystemError::Conflict(_) => ErrorCode::Conflict,
        ExamSystemError::InvalidTransition(_) => ErrorCode::ExamInvalidTransition,
        ExamSystemError::Validation(_) => ErrorCode::ValidationFailed,
        _ => ErrorCode::InternalServerError,
    };
    let status =
        StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

    if status.is_server_error() {
        error!("{}: {}", context, err);
    } else {
        warn!("{}: {}", context, err);
    }

    HttpResponse::build(status).json(ApiResponse::error_empty(
        code,
        format!("{context}: {}", err.message()),
    ))
}

/// 校验失败响应，一次返回全部字段错误
pub(crate) fn validation_response(
    errors: Vec<FieldError>,
    message: impl Into<String>,
) -> HttpResponse {
    HttpResponse::UnprocessableEntity().json(ApiResponse::validation_failed(errors, message))
}

pub(crate) fn not_found_response(code: ErrorCode, message: impl Into<String>) -> HttpResponse {
    HttpResponse::NotFound().json(ApiResponse::error_empty(code, message))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_error_status_mapping() {
        let cases = [
            (ExamSystemError::not_found("x"), StatusCode::NOT_FOUND),
            (ExamSystemError::conflict("x"), StatusCode::CONFLICT),
            (ExamSystemError::invalid_transition("x"), StatusCode::CONFLICT),
            (ExamSystemError::validation("x"), StatusCode::UNPROCESSABLE_ENTITY),
            (
                ExamSystemError::database_operation("x"),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (err, status) in cases {
            assert_eq!(storage_error_response(&err, "test").status(), status);
        }
    }

    #[test]
    fn test_validation_response_is_422() {
        let resp = validation_response(vec![FieldError::new("name", "不能为空")], "invalid");
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }
}
