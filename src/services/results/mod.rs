pub mod import;
pub mod list;
pub mod papers;
pub mod validate;
pub mod verify;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::engine::ExamStructure;
use crate::models::ErrorCode;
use crate::models::exams::entities::ExamDetail;
use crate::models::results::requests::{
    BulkImportResultsRequest, EnterPaperResultsRequest, ResultListQuery, VerifyResultsRequest,
};
use crate::models::schools::entities::Student;
use crate::services::grading::band_cache::GradeBandCache;
use crate::services::{not_found_response, storage_error_response};
use crate::storage::{ScoringContext, Storage};

pub struct ResultService {
    storage: Option<Arc<dyn Storage>>,
}

impl ResultService {
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

    // 批量导入单科成绩
    pub async fn import_results(
        &self,
        request: &HttpRequest,
        exam_id: i64,
        req: BulkImportResultsRequest,
    ) -> ActixResult<HttpResponse> {
        import::import_results(self, request, exam_id, req).await
    }

    // 录入试卷成绩
    pub async fn enter_paper_results(
        &self,
        request: &HttpRequest,
        paper_id: i64,
        req: EnterPaperResultsRequest,
    ) -> ActixResult<HttpResponse> {
        papers::enter_paper_results(self, request, paper_id, req).await
    }

    pub async fn list_results(
        &self,
        request: &HttpRequest,
        exam_id: i64,
        query: ResultListQuery,
    ) -> ActixResult<HttpResponse> {
        list::list_results(self, request, exam_id, query).await
    }

    // 审核
    pub async fn verify_results(
        &self,
        request: &HttpRequest,
        exam_id: i64,
        req: VerifyResultsRequest,
    ) -> ActixResult<HttpResponse> {
        verify::verify_results(self, request, exam_id, req).await
    }
}

/// 考试状态不允许录入时的 409 响应
pub(crate) fn not_editable_response(detail: &ExamDetail) -> HttpResponse {
    HttpResponse::Conflict().json(crate::models::ApiResponse::error_empty(
        ErrorCode::ExamNotEditable,
        format!(
            "Exam {} is {}, results can only be entered while active or completed",
            detail.exam.id, detail.exam.status
        ),
    ))
}

pub(crate) async fn load_students(
    storage: &Arc<dyn Storage>,
    student_ids: &[i64],
) -> Result<Vec<Student>, HttpResponse> {
    storage
        .get_students_by_ids(student_ids)
        .await
        .map_err(|e| storage_error_response(&e, "Failed to load students"))
}

/// 解析计分方式并从缓存取出考试评分体系的等级区间
pub(crate) async fn scoring_context(
    storage: &Arc<dyn Storage>,
    detail: &ExamDetail,
    subject_id: i64,
    entered_by: Option<i64>,
) -> Result<ScoringContext, HttpResponse> {
    let Some(mode) = ExamStructure::new(detail).scoring_mode(subject_id) else {
        return Err(not_found_response(
            ErrorCode::SubjectNotFound,
            format!("Subject {subject_id} is not part of exam {}", detail.exam.id),
        ));
    };

    let bands = GradeBandCache::global()
        .get_or_load(storage, detail.exam.grading_system_id)
        .await
        .map_err(|e| storage_error_response(&e, "Failed to load grade bands"))?;

    Ok(ScoringContext {
        exam_id: detail.exam.id,
        subject_id,
        mode,
        bands: bands.as_ref().clone(),
        entered_by,
    })
}
