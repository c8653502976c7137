use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::models::results::requests::{
    BulkImportResultsRequest, EnterPaperResultsRequest, ResultListQuery, VerifyResultsRequest,
};
use crate::services::ResultService;

// 懒加载的全局 RESULT_SERVICE 实例
static RESULT_SERVICE: Lazy<ResultService> = Lazy::new(ResultService::new_lazy);

pub async fn list_results(
    req: HttpRequest,
    exam_id: web::Path<i64>,
    query: web::Query<ResultListQuery>,
) -> ActixResult<HttpResponse> {
    RESULT_SERVICE
        .list_results(&req, exam_id.into_inner(), query.into_inner())
        .await
}

pub async fn import_results(
    req: HttpRequest,
    exam_id: web::Path<i64>,
    results_data: web::Json<BulkImportResultsRequest>,
) -> ActixResult<HttpResponse> {
    RESULT_SERVICE
        .import_results(&req, exam_id.into_inner(), results_data.into_inner())
        .await
}

pub async fn verify_results(
    req: HttpRequest,
    exam_id: web::Path<i64>,
    verify_data: web::Json<VerifyResultsRequest>,
) -> ActixResult<HttpResponse> {
    RESULT_SERVICE
        .verify_results(&req, exam_id.into_inner(), verify_data.into_inner())
        .await
}

pub async fn enter_paper_results(
    req: HttpRequest,
    paper_id: web::Path<i64>,
    results_data: web::Json<EnterPaperResultsRequest>,
) -> ActixResult<HttpResponse> {
    RESULT_SERVICE
        .enter_paper_results(&req, paper_id.into_inner(), results_data.into_inner())
        .await
}

// 配置路由，须在 /api/v1/exams 之前注册
pub fn configure_results_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/exams/{exam_id}/results")
            .service(
                web::resource("")
                    .route(web::get().to(list_results))
                    .route(web::post().to(import_results)),
            )
            .service(web::resource("/verify").route(web::post().to(verify_results))),
    )
    .service(
        web::scope("/api/v1/exam-papers").service(
            web::resource("/{paper_id}/results").route(web::post().to(enter_paper_results)),
        ),
    );
}
