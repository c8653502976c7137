use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::models::exam_series::requests::{CreateExamSeriesRequest, ExamSeriesListQuery};
use crate::services::ExamSeriesService;

// 懒加载的全局 EXAM_SERIES_SERVICE 实例
static EXAM_SERIES_SERVICE: Lazy<ExamSeriesService> = Lazy::new(ExamSeriesService::new_lazy);

pub async fn list_series(
    req: HttpRequest,
    query: web::Query<ExamSeriesListQuery>,
) -> ActixResult<HttpResponse> {
    EXAM_SERIES_SERVICE
        .list_series(&req, query.into_inner())
        .await
}

pub async fn create_series(
    req: HttpRequest,
    series_data: web::Json<CreateExamSeriesRequest>,
) -> ActixResult<HttpResponse> {
    EXAM_SERIES_SERVICE
        .create_series(&req, series_data.into_inner())
        .await
}

pub async fn get_series(req: HttpRequest, series_id: web::Path<i64>) -> ActixResult<HttpResponse> {
    EXAM_SERIES_SERVICE
        .get_series(&req, series_id.into_inner())
        .await
}

pub async fn list_series_exams(
    req: HttpRequest,
    series_id: web::Path<i64>,
) -> ActixResult<HttpResponse> {
    EXAM_SERIES_SERVICE
        .list_series_exams(&req, series_id.into_inner())
        .await
}

// 配置路由
pub fn configure_exam_series_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/exam-series")
            .service(
                web::resource("")
                    .route(web::get().to(list_series))
                    .route(web::post().to(create_series)),
            )
            .service(web::resource("/{series_id}").route(web::get().to(get_series)))
            .service(web::resource("/{series_id}/exams").route(web::get().to(list_series_exams))),
    );
}
