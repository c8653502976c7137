use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::models::schools::requests::{
    CreateSchoolClassRequest, CreateSchoolRequest, CreateStreamRequest, CreateStudentRequest,
    CreateSubjectRequest, StudentListQuery,
};
use crate::services::{GradingService, SchoolService};

// 懒加载的全局 SCHOOL_SERVICE 实例
static SCHOOL_SERVICE: Lazy<SchoolService> = Lazy::new(SchoolService::new_lazy);
static GRADING_SERVICE: Lazy<GradingService> = Lazy::new(GradingService::new_lazy);

// HTTP处理程序
pub async fn list_schools(req: HttpRequest) -> ActixResult<HttpResponse> {
    SCHOOL_SERVICE.list_schools(&req).await
}

pub async fn create_school(
    req: HttpRequest,
    school_data: web::Json<CreateSchoolRequest>,
) -> ActixResult<HttpResponse> {
    SCHOOL_SERVICE
        .create_school(&req, school_data.into_inner())
        .await
}

pub async fn get_school(req: HttpRequest, school_id: web::Path<i64>) -> ActixResult<HttpResponse> {
    SCHOOL_SERVICE.get_school(&req, school_id.into_inner()).await
}

pub async fn list_classes(req: HttpRequest, school_id: web::Path<i64>) -> ActixResult<HttpResponse> {
    SCHOOL_SERVICE
        .list_classes(&req, school_id.into_inner())
        .await
}

pub async fn create_class(
    req: HttpRequest,
    school_id: web::Path<i64>,
    class_data: web::Json<CreateSchoolClassRequest>,
) -> ActixResult<HttpResponse> {
    SCHOOL_SERVICE
        .create_class(&req, school_id.into_inner(), class_data.into_inner())
        .await
}

pub async fn list_students(
    req: HttpRequest,
    school_id: web::Path<i64>,
    query: web::Query<StudentListQuery>,
) -> ActixResult<HttpResponse> {
    SCHOOL_SERVICE
        .list_students(&req, school_id.into_inner(), query.into_inner())
        .await
}

pub async fn create_student(
    req: HttpRequest,
    school_id: web::Path<i64>,
    student_data: web::Json<CreateStudentRequest>,
) -> ActixResult<HttpResponse> {
    SCHOOL_SERVICE
        .create_student(&req, school_id.into_inner(), student_data.into_inner())
        .await
}

pub async fn list_subjects(req: HttpRequest, school_id: web::Path<i64>) -> ActixResult<HttpResponse> {
    SCHOOL_SERVICE
        .list_subjects(&req, school_id.into_inner())
        .await
}

pub async fn create_subject(
    req: HttpRequest,
    school_id: web::Path<i64>,
    subject_data: web::Json<CreateSubjectRequest>,
) -> ActixResult<HttpResponse> {
    SCHOOL_SERVICE
        .create_subject(&req, school_id.into_inner(), subject_data.into_inner())
        .await
}

pub async fn get_default_grading_system(
    req: HttpRequest,
    school_id: web::Path<i64>,
) -> ActixResult<HttpResponse> {
    GRADING_SERVICE
        .get_default(&req, school_id.into_inner())
        .await
}

pub async fn list_streams(req: HttpRequest, class_id: web::Path<i64>) -> ActixResult<HttpResponse> {
    SCHOOL_SERVICE
        .list_streams(&req, class_id.into_inner())
        .await
}

pub async fn create_stream(
    req: HttpRequest,
    class_id: web::Path<i64>,
    stream_data: web::Json<CreateStreamRequest>,
) -> ActixResult<HttpResponse> {
    SCHOOL_SERVICE
        .create_stream(&req, class_id.into_inner(), stream_data.into_inner())
        .await
}

// 配置路由
pub fn configure_schools_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/schools")
            .service(
                web::resource("")
                    .route(web::get().to(list_schools))
                    .route(web::post().to(create_school)),
            )
            .service(web::resource("/{school_id}").route(web::get().to(get_school)))
            .service(
                web::resource("/{school_id}/classes")
                    .route(web::get().to(list_classes))
                    .route(web::post().to(create_class)),
            )
            .service(
                web::resource("/{school_id}/students")
                    .route(web::get().to(list_students))
                    .route(web::post().to(create_student)),
            )
            .service(
                web::resource("/{school_id}/subjects")
                    .route(web::get().to(list_subjects))
                    .route(web::post().to(create_subject)),
            )
            .service(
                web::resource("/{school_id}/default-grading-system")
                    .route(web::get().to(get_default_grading_system)),
            ),
    )
    .service(
        // 分流挂在班级下
        web::scope("/api/v1/classes").service(
            web::resource("/{class_id}/streams")
                .route(web::get().to(list_streams))
                .route(web::post().to(create_stream)),
        ),
    );
}
