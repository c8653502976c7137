pub mod classes;
pub mod create;
pub mod get;
pub mod list;
pub mod streams;
pub mod students;
pub mod subjects;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::schools::requests::{
    CreateSchoolClassRequest, CreateSchoolRequest, CreateStreamRequest, CreateStudentRequest,
    CreateSubjectRequest, StudentListQuery,
};
use crate::storage::Storage;

pub struct SchoolService {
    storage: Option<Arc<dyn Storage>>,
}

impl SchoolService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        if let Some(storage) = &self.storage {
            storage.clone()
        } else {
            request
                .app_data::<actix_web::web::Data<Arc<dyn Storage>>>()
                .expect("Storage not found in app data")
                .get_ref()
                .clone()
        }
    }

    pub async fn create_school(
        &self,
        request: &HttpRequest,
        req: CreateSchoolRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_school(self, request, req).await
    }

    pub async fn get_school(&self, request: &HttpRequest, school_id: i64) -> ActixResult<HttpResponse> {
        get::get_school(self, request, school_id).await
    }

    pub async fn list_schools(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        list::list_schools(self, request).await
    }

    // 班级
    pub async fn create_class(
        &self,
        request: &HttpRequest,
        school_id: i64,
        req: CreateSchoolClassRequest,
    ) -> ActixResult<HttpResponse> {
        classes::create_class(self, request, school_id, req).await
    }

    pub async fn list_classes(&self, request: &HttpRequest, school_id: i64) -> ActixResult<HttpResponse> {
        classes::list_classes(self, request, school_id).await
    }

    // 分流
    pub async fn create_stream(
        &self,
        request: &HttpRequest,
        class_id: i64,
        req: CreateStreamRequest,
    ) -> ActixResult<HttpResponse> {
        streams::create_stream(self, request, class_id, req).await
    }

    pub async fn list_streams(&self, request: &HttpRequest, class_id: i64) -> ActixResult<HttpResponse> {
        streams::list_streams(self, request, class_id).await
    }

    // 学生
    pub async fn create_student(
        &self,
        request: &HttpRequest,
        school_id: i64,
        req: CreateStudentRequest,
    ) -> ActixResult<HttpResponse> {
        students::create_student(self, request, school_id, req).await
    }

    pub async fn list_students(
        &self,
        request: &HttpRequest,
        school_id: i64,
        query: StudentListQuery,
    ) -> ActixResult<HttpResponse> {
        students::list_students(self, request, school_id, query).await
    }

    // 科目
    pub async fn create_subject(
        &self,
        request: &HttpRequest,
        school_id: i64,
        req: CreateSubjectRequest,
    ) -> ActixResult<HttpResponse> {
        subjects::create_subject(self, request, school_id, req).await
    }

    pub async fn list_subjects(&self, request: &HttpRequest, school_id: i64) -> ActixResult<HttpResponse> {
        subjects::list_subjects(self, request, school_id).await
    }
}

/// 确认学校存在，不存在时直接返回 404 响应
pub(crate) async fn ensure_school(
    storage: &Arc<dyn Storage>,
    school_id: i64,
) -> Result<(), HttpResponse> {
    use crate::models::ErrorCode;
    use crate::services::{not_found_response, storage_error_response};

    match storage.get_school_by_id(school_id).await {
        Ok(Some(_)) => Ok(()),
        Ok(None) => Err(not_found_response(
            ErrorCode::SchoolNotFound,
            format!("School {school_id} not found"),
        )),
        Err(e) => Err(storage_error_response(&e, "Failed to load school")),
    }
}
