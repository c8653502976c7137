use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::engine::ExamTransition;
use crate::models::exams::requests::{
    CreateExamCategoryRequest, CreateExamPaperRequest, CreateExamRequest, ExamCategoryListQuery,
};
use crate::services::ExamService;

// 懒加载的全局 EXAM_SERVICE 实例
static EXAM_SERVICE: Lazy<ExamService> = Lazy::new(ExamService::new_lazy);

pub async fn create_exam(
    req: HttpRequest,
    exam_data: web::Json<CreateExamRequest>,
) -> ActixResult<HttpResponse> {
    EXAM_SERVICE.create_exam(&req, exam_data.into_inner()).await
}

pub async fn get_exam(req: HttpRequest, exam_id: web::Path<i64>) -> ActixResult<HttpResponse> {
    EXAM_SERVICE.get_exam(&req, exam_id.into_inner()).await
}

pub async fn validate_exam(req: HttpRequest, exam_id: web::Path<i64>) -> ActixResult<HttpResponse> {
    EXAM_SERVICE.validate_exam(&req, exam_id.into_inner()).await
}

pub async fn activate_exam(req: HttpRequest, exam_id: web::Path<i64>) -> ActixResult<HttpResponse> {
    EXAM_SERVICE
        .transition_exam(&req, exam_id.into_inner(), ExamTransition::Activate)
        .await
}

pub async fn complete_exam(req: HttpRequest, exam_id: web::Path<i64>) -> ActixResult<HttpResponse> {
    EXAM_SERVICE
        .transition_exam(&req, exam_id.into_inner(), ExamTransition::Complete)
        .await
}

pub async fn publish_exam(req: HttpRequest, exam_id: web::Path<i64>) -> ActixResult<HttpResponse> {
    EXAM_SERVICE
        .transition_exam(&req, exam_id.into_inner(), ExamTransition::Publish)
        .await
}

pub async fn create_paper(
    req: HttpRequest,
    exam_id: web::Path<i64>,
    paper_data: web::Json<CreateExamPaperRequest>,
) -> ActixResult<HttpResponse> {
    EXAM_SERVICE
        .create_paper(&req, exam_id.into_inner(), paper_data.into_inner())
        .await
}

pub async fn list_categories(
    req: HttpRequest,
    query: web::Query<ExamCategoryListQuery>,
) -> ActixResult<HttpResponse> {
    EXAM_SERVICE
        .list_categories(&req, query.into_inner())
        .await
}

pub async fn create_category(
    req: HttpRequest,
    category_data: web::Json<CreateExamCategoryRequest>,
) -> ActixResult<HttpResponse> {
    EXAM_SERVICE
        .create_category(&req, category_data.into_inner())
        .await
}

// 配置路由
pub fn configure_exams_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/exams")
            .service(web::resource("").route(web::post().to(create_exam)))
            .service(web::resource("/{exam_id}").route(web::get().to(get_exam)))
            .service(web::resource("/{exam_id}/validation").route(web::get().to(validate_exam)))
            // 状态流转：draft → active → completed → published
            .service(web::resource("/{exam_id}/activate").route(web::post().to(activate_exam)))
            .service(web::resource("/{exam_id}/complete").route(web::post().to(complete_exam)))
            .service(web::resource("/{exam_id}/publish").route(web::post().to(publish_exam)))
            .service(web::resource("/{exam_id}/papers").route(web::post().to(create_paper))),
    )
    .service(
        web::scope("/api/v1/exam-categories").service(
            web::resource("")
                .route(web::get().to(list_categories))
                .route(web::post().to(create_category)),
        ),
    );
}
