pub mod categories;
pub mod create;
pub mod get;
pub mod papers;
pub mod rules;
pub mod transition;
pub mod validation;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::engine::ExamTransition;
use crate::models::exams::entities::ExamDetail;
use crate::models::exams::requests::{
    CreateExamCategoryRequest, CreateExamPaperRequest, CreateExamRequest, ExamCategoryListQuery,
};
use crate::models::ErrorCode;
use crate::services::{not_found_response, storage_error_response};
use crate::storage::Storage;

pub struct ExamService {
    storage: Option<Arc<dyn Storage>>,
}

impl ExamService {
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

    // 考试类别
    pub async fn create_category(
        &self,
        request: &HttpRequest,
        req: CreateExamCategoryRequest,
    ) -> ActixResult<HttpResponse> {
        categories::create_category(self, request, req).await
    }

    pub async fn list_categories(
        &self,
        request: &HttpRequest,
        query: ExamCategoryListQuery,
    ) -> ActixResult<HttpResponse> {
        categories::list_categories(self, request, query).await
    }

    // 创建考试（草稿）
    pub async fn create_exam(
        &self,
        request: &HttpRequest,
        req: CreateExamRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_exam(self, request, req).await
    }

    pub async fn get_exam(&self, request: &HttpRequest, exam_id: i64) -> ActixResult<HttpResponse> {
        get::get_exam(self, request, exam_id).await
    }

    // 结构校验报告
    pub async fn validate_exam(&self, request: &HttpRequest, exam_id: i64) -> ActixResult<HttpResponse> {
        validation::validate_exam(self, request, exam_id).await
    }

    // 状态流转
    pub async fn transition_exam(
        &self,
        request: &HttpRequest,
        exam_id: i64,
        transition: ExamTransition,
    ) -> ActixResult<HttpResponse> {
        transition::transition_exam(self, request, exam_id, transition).await
    }

    // 添加试卷
    pub async fn create_paper(
        &self,
        request: &HttpRequest,
        exam_id: i64,
        req: CreateExamPaperRequest,
    ) -> ActixResult<HttpResponse> {
        papers::create_paper(self, request, exam_id, req).await
    }
}

/// 读取考试详情，不存在时返回 404 响应
pub(crate) async fn load_exam_detail(
    storage: &Arc<dyn Storage>,
    exam_id: i64,
) -> Result<ExamDetail, HttpResponse> {
    match storage.get_exam_detail(exam_id).await {
        Ok(Some(detail)) => Ok(detail),
        Ok(None) => Err(not_found_response(
            ErrorCode::ExamNotFound,
            format!("Exam {exam_id} not found"),
        )),
        Err(e) => Err(storage_error_response(&e, "Failed to load exam")),
    }
}
