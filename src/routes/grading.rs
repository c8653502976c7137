use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::models::grading::requests::{
    CreateGradingSystemRequest, GradingSystemListQuery, ReplaceGradeBandsRequest,
    ResolveGradeQuery,
};
use crate::services::GradingService;

// 懒加载的全局 GRADING_SERVICE 实例
static GRADING_SERVICE: Lazy<GradingService> = Lazy::new(GradingService::new_lazy);

pub async fn list_grading_systems(
    req: HttpRequest,
    query: web::Query<GradingSystemListQuery>,
) -> ActixResult<HttpResponse> {
    GRADING_SERVICE
        .list_grading_systems(&req, query.into_inner())
        .await
}

pub async fn create_grading_system(
    req: HttpRequest,
    system_data: web::Json<CreateGradingSystemRequest>,
) -> ActixResult<HttpResponse> {
    GRADING_SERVICE
        .create_grading_system(&req, system_data.into_inner())
        .await
}

pub async fn get_grading_system(
    req: HttpRequest,
    grading_system_id: web::Path<i64>,
) -> ActixResult<HttpResponse> {
    GRADING_SERVICE
        .get_grading_system(&req, grading_system_id.into_inner())
        .await
}

pub async fn replace_bands(
    req: HttpRequest,
    grading_system_id: web::Path<i64>,
    bands_data: web::Json<ReplaceGradeBandsRequest>,
) -> ActixResult<HttpResponse> {
    GRADING_SERVICE
        .replace_bands(&req, grading_system_id.into_inner(), bands_data.into_inner())
        .await
}

pub async fn set_default(
    req: HttpRequest,
    grading_system_id: web::Path<i64>,
) -> ActixResult<HttpResponse> {
    GRADING_SERVICE
        .set_default(&req, grading_system_id.into_inner())
        .await
}

pub async fn resolve_grade(
    req: HttpRequest,
    grading_system_id: web::Path<i64>,
    query: web::Query<ResolveGradeQuery>,
) -> ActixResult<HttpResponse> {
    GRADING_SERVICE
        .resolve_grade(&req, grading_system_id.into_inner(), query.into_inner())
        .await
}

// 配置路由
pub fn configure_grading_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/grading-systems")
            .service(
                web::resource("")
                    .route(web::get().to(list_grading_systems))
                    .route(web::post().to(create_grading_system)),
            )
            .service(web::resource("/{grading_system_id}").route(web::get().to(get_grading_system)))
            .service(
                web::resource("/{grading_system_id}/bands").route(web::put().to(replace_bands)),
            )
            .service(web::resource("/{grading_system_id}/default").route(web::post().to(set_default)))
            .service(
                web::resource("/{grading_system_id}/resolve").route(web::get().to(resolve_grade)),
            ),
    );
}
