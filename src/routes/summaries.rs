use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::models::summaries::requests::SummaryListQuery;
use crate::services::SummaryService;

// 懒加载的全局 SUMMARY_SERVICE 实例
static SUMMARY_SERVICE: Lazy<SummaryService> = Lazy::new(SummaryService::new_lazy);

pub async fn list_summaries(
    req: HttpRequest,
    series_id: web::Path<i64>,
    query: web::Query<SummaryListQuery>,
) -> ActixResult<HttpResponse> {
    SUMMARY_SERVICE
        .list_summaries(&req, series_id.into_inner(), query.into_inner())
        .await
}

pub async fn generate_summaries(
    req: HttpRequest,
    series_id: web::Path<i64>,
) -> ActixResult<HttpResponse> {
    SUMMARY_SERVICE
        .generate_summaries(&req, series_id.into_inner())
        .await
}

pub async fn get_student_summary(
    req: HttpRequest,
    path: web::Path<(i64, i64)>,
) -> ActixResult<HttpResponse> {
    let (series_id, student_id) = path.into_inner();
    SUMMARY_SERVICE
        .get_student_summary(&req, series_id, student_id)
        .await
}

// 配置路由，须在 /api/v1/exam-series 之前注册
pub fn configure_summaries_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/exam-series/{series_id}/summaries")
            .service(web::resource("").route(web::get().to(list_summaries)))
            .service(web::resource("/generate").route(web::post().to(generate_summaries)))
            .service(web::resource("/{student_id}").route(web::get().to(get_student_summary))),
    );
}
