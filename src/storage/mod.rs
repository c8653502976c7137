use std::sync::Arc;

use crate::engine::ScoringMode;
use crate::models::{
    PaginatedResponse,
    exam_series::{
        entities::ExamSeries,
        requests::{CreateExamSeriesRequest, ExamSeriesListQuery},
        responses::ExamSeriesListResponse,
    },
    exams::{
        entities::{Exam, ExamCategory, ExamDetail, ExamPaper, ExamStatus},
        requests::{CreateExamCategoryRequest, CreateExamPaperRequest, CreateExamRequest},
    },
    grading::{
        entities::{GradeBand, GradingSystem, GradingSystemDetail},
        requests::{CreateGradingSystemRequest, GradeBandInput},
    },
    results::{
        entities::ExamResult,
        requests::{PaperResultEntry, ResultEntry},
        responses::PaperResultsResponse,
    },
    schools::{
        entities::{School, SchoolClass, Stream, Student, Subject},
        requests::{
            CreateSchoolClassRequest, CreateSchoolRequest, CreateStreamRequest,
            CreateStudentRequest, CreateSubjectRequest, StudentListQuery,
        },
    },
    summaries::{
        entities::StudentTermSummary, requests::SummaryListQuery,
        responses::GenerateSummariesResponse, responses::SummaryListResponse,
    },
};

use crate::errors::Result;

pub mod sea_orm_storage;

/// 一次成绩写入所需的计分上下文
///
/// 计分方式与等级区间由服务层解析（区间来自缓存），存储层在事务内据此计分并排名。
#[derive(Debug, Clone)]
pub struct ScoringContext {
    pub exam_id: i64,
    pub subject_id: i64,
    pub mode: ScoringMode,
    pub bands: Vec<GradeBand>,
    pub entered_by: Option<i64>,
}

#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 学校基础数据
    // 创建学校
    async fn create_school(&self, req: CreateSchoolRequest) -> Result<School>;
    async fn get_school_by_id(&self, school_id: i64) -> Result<Option<School>>;
    async fn list_schools(&self) -> Result<Vec<School>>;
    // 班级
    async fn create_school_class(
        &self,
        school_id: i64,
        req: CreateSchoolClassRequest,
    ) -> Result<SchoolClass>;
    async fn get_school_class_by_id(&self, class_id: i64) -> Result<Option<SchoolClass>>;
    async fn list_school_classes(&self, school_id: i64) -> Result<Vec<SchoolClass>>;
    // 分流
    async fn create_stream(&self, class_id: i64, req: CreateStreamRequest) -> Result<Stream>;
    async fn get_stream_by_id(&self, stream_id: i64) -> Result<Option<Stream>>;
    async fn list_streams(&self, class_id: i64) -> Result<Vec<Stream>>;
    // 学生
    async fn create_student(&self, school_id: i64, req: CreateStudentRequest) -> Result<Student>;
    async fn list_students_with_pagination(
        &self,
        school_id: i64,
        query: StudentListQuery,
    ) -> Result<PaginatedResponse<Student>>;
    async fn get_students_by_ids(&self, student_ids: &[i64]) -> Result<Vec<Student>>;
    // 科目
    async fn create_subject(&self, school_id: i64, req: CreateSubjectRequest) -> Result<Subject>;
    async fn list_subjects(&self, school_id: i64) -> Result<Vec<Subject>>;

    /// 评分体系
    // 创建评分体系及其等级区间；is_default 时在同一事务内清除学校其他默认
    async fn create_grading_system(
        &self,
        req: CreateGradingSystemRequest,
    ) -> Result<GradingSystemDetail>;
    async fn get_grading_system_by_id(&self, id: i64) -> Result<Option<GradingSystemDetail>>;
    async fn list_grading_systems(&self, school_id: i64) -> Result<Vec<GradingSystem>>;
    // 按 sort_order 升序
    async fn list_grade_bands(&self, grading_system_id: i64) -> Result<Vec<GradeBand>>;
    // 整体替换等级区间
    async fn replace_grade_bands(
        &self,
        grading_system_id: i64,
        bands: Vec<GradeBandInput>,
    ) -> Result<GradingSystemDetail>;
    // 设为默认（先清除再设置，单一事务）
    async fn set_default_grading_system(&self, grading_system_id: i64) -> Result<GradingSystem>;
    async fn get_default_grading_system(&self, school_id: i64) -> Result<Option<GradingSystem>>;

    /// 考试系列
    async fn create_exam_series(&self, req: CreateExamSeriesRequest) -> Result<ExamSeries>;
    async fn get_exam_series_by_id(&self, series_id: i64) -> Result<Option<ExamSeries>>;
    async fn list_exam_series_with_pagination(
        &self,
        query: ExamSeriesListQuery,
    ) -> Result<ExamSeriesListResponse>;

    /// 考试类别
    async fn create_exam_category(&self, req: CreateExamCategoryRequest) -> Result<ExamCategory>;
    async fn get_exam_category_by_id(&self, category_id: i64) -> Result<Option<ExamCategory>>;
    async fn list_exam_categories(&self, school_id: i64) -> Result<Vec<ExamCategory>>;

    /// 考试
    // 创建考试（draft），`class_ids`/`subjects` 必须已由服务层按范围解析完毕
    async fn create_exam(&self, school_id: i64, req: CreateExamRequest) -> Result<ExamDetail>;
    async fn get_exam_by_id(&self, exam_id: i64) -> Result<Option<Exam>>;
    async fn get_exam_detail(&self, exam_id: i64) -> Result<Option<ExamDetail>>;
    async fn list_exams_by_series(&self, series_id: i64) -> Result<Vec<Exam>>;
    // 条件状态写入：仅当当前状态为 from 时更新，返回是否生效
    async fn transition_exam_status(
        &self,
        exam_id: i64,
        from: ExamStatus,
        to: ExamStatus,
    ) -> Result<bool>;
    // 创建试卷，(exam, subject, paper_number) 重复时返回 Conflict
    async fn create_exam_paper(&self, exam_id: i64, req: CreateExamPaperRequest)
    -> Result<ExamPaper>;
    async fn get_exam_paper_by_id(&self, paper_id: i64) -> Result<Option<ExamPaper>>;

    /// 成绩
    // 批量导入某科成绩：逐行 upsert、计分，再对该科三个范围重新排名，整体一个事务
    async fn import_subject_results(
        &self,
        ctx: ScoringContext,
        entries: Vec<ResultEntry>,
    ) -> Result<Vec<ExamResult>>;
    // 录入试卷成绩：upsert 分卷成绩，重算父成绩，试卷范围排名后重排该科
    async fn enter_paper_results(
        &self,
        ctx: ScoringContext,
        paper: ExamPaper,
        entries: Vec<PaperResultEntry>,
    ) -> Result<PaperResultsResponse>;
    async fn list_exam_results(
        &self,
        exam_id: i64,
        subject_id: Option<i64>,
    ) -> Result<Vec<ExamResult>>;
    async fn verify_exam_results(
        &self,
        exam_id: i64,
        subject_id: Option<i64>,
        verified_by: i64,
    ) -> Result<u64>;

    /// 学期汇总
    // 全量重建某系列的汇总与三个范围的排名，单一事务
    async fn regenerate_series_summaries(
        &self,
        series: &ExamSeries,
    ) -> Result<GenerateSummariesResponse>;
    async fn list_series_summaries(
        &self,
        series_id: i64,
        query: SummaryListQuery,
    ) -> Result<SummaryListResponse>;
    async fn get_student_summary(
        &self,
        series_id: i64,
        student_id: i64,
    ) -> Result<Option<StudentTermSummary>>;
}

pub async fn create_storage() -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::new_async().await?;
    Ok(Arc::new(storage))
}
