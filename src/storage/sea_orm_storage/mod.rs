//! SeaORM 存储实现
//!
//! 统一的数据库存储层，支持 SQLite、PostgreSQL 和 MySQL。

mod exam_series;
mod exams;
mod grading;
mod ranking;
mod results;
mod schools;
mod summaries;

use crate::config::AppConfig;
use crate::errors::{ExamSystemError, Result};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr, SqlErr};
use std::time::Duration;
use tracing::info;

/// SeaORM 存储实现
#[derive(Clone)]
pub struct SeaOrmStorage {
    pub(crate) db: DatabaseConnection,
}

impl SeaOrmStorage {
    /// 创建新的 SeaORM 存储实例
    pub async fn new_async() -> Result<Self> {
        let config = AppConfig::get();
        let db_url = Self::build_database_url(&config.database.url)?;

        // 根据数据库类型选择连接方式
        let db = if db_url.starts_with("sqlite://") {
            Self::connect_sqlite(&db_url, config).await?
        } else {
            Self::connect_generic(&db_url, config).await?
        };

        let storage = Self::from_connection(db).await?;
        info!("SeaORM 存储初始化完成，数据库: {}", db_url);

        Ok(storage)
    }

    /// 基于已建立的连接创建存储并运行迁移
    pub async fn from_connection(db: DatabaseConnection) -> Result<Self> {
        Migrator::up(&db, None)
            .await
            .map_err(|e| ExamSystemError::database_operation(format!("数据库迁移失败: {e}")))?;

        Ok(Self { db })
    }

    /// SQLite 专用连接（WAL + pragma 优化）
    async fn connect_sqlite(url: &str, config: &AppConfig) -> Result<DatabaseConnection> {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::sqlite::{
            SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
        };
        use std::str::FromStr;

        let opt = SqliteConnectOptions::from_str(url)
            .map_err(|e| ExamSystemError::database_config(format!("SQLite URL 解析失败: {e}")))?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(Duration::from_secs(5))
            .pragma("cache_size", "-64000")
            .pragma("temp_store", "memory")
            .pragma("mmap_size", "536870912")
            .pragma("wal_autocheckpoint", "1000");

        let pool = SqlitePoolOptions::new()
            .max_connections(config.database.pool_size)
            .min_connections(1)
            .test_before_acquire(true)
            .acquire_timeout(Duration::from_secs(config.database.timeout))
            .idle_timeout(Duration::from_secs(300))
            .connect_with(opt)
            .await
            .map_err(|e| ExamSystemError::database_connection(format!("SQLite 连接失败: {e}")))?;

        Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
    }

    /// 通用连接（PostgreSQL、MySQL 等）
    async fn connect_generic(url: &str, config: &AppConfig) -> Result<DatabaseConnection> {
        let mut opt = ConnectOptions::new(url);
        opt.max_connections(config.database.pool_size)
            .min_connections(5)
            .connect_timeout(Duration::from_secs(config.database.timeout))
            .acquire_timeout(Duration::from_secs(config.database.timeout))
            .idle_timeout(Duration::from_secs(600))
            .max_lifetime(Duration::from_secs(1800))
            .sqlx_logging(false)
            .sqlx_logging_level(tracing::log::LevelFilter::Debug);

        Database::connect(opt)
            .await
            .map_err(|e| ExamSystemError::database_connection(format!("无法连接到数据库: {e}")))
    }

    /// 从 URL 自动推断数据库类型并构建连接 URL
    fn build_database_url(url: &str) -> Result<String> {
        if url.starts_with("sqlite://") {
            Ok(url.to_string())
        } else if url.ends_with(".db") || url.ends_with(".sqlite") || url == ":memory:" {
            Ok(format!("sqlite://{}?mode=rwc", url))
        } else if url.starts_with("postgres://")
            || url.starts_with("postgresql://")
            || url.starts_with("mysql://")
            || url.starts_with("mariadb://")
        {
            Ok(url.to_string())
        } else {
            Err(ExamSystemError::database_config(format!(
                "无法从 URL 推断数据库类型: {url}. 支持: sqlite://, postgres://, mysql://, 或 .db/.sqlite 文件路径"
            )))
        }
    }
}

/// 写操作的数据库错误映射：唯一约束冲突转为 Conflict，其余为 DatabaseOperation
pub(crate) fn write_err(action: &'static str) -> impl Fn(DbErr) -> ExamSystemError {
    move |e| match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(detail)) => {
            ExamSystemError::conflict(format!("{action}失败，记录已存在: {detail}"))
        }
        _ => ExamSystemError::database_operation(format!("{action}失败: {e}")),
    }
}

// Storage trait 实现
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
        entities::StudentTermSummary,
        requests::SummaryListQuery,
        responses::{GenerateSummariesResponse, SummaryListResponse},
    },
};
use crate::storage::{ScoringContext, Storage};
use async_trait::async_trait;

#[async_trait]
impl Storage for SeaOrmStorage {
    // 学校模块
    async fn create_school(&self, req: CreateSchoolRequest) -> Result<School> {
        self.create_school_impl(req).await
    }

    async fn get_school_by_id(&self, school_id: i64) -> Result<Option<School>> {
        self.get_school_by_id_impl(school_id).await
    }

    async fn list_schools(&self) -> Result<Vec<School>> {
        self.list_schools_impl().await
    }

    async fn create_school_class(
        &self,
        school_id: i64,
        req: CreateSchoolClassRequest,
    ) -> Result<SchoolClass> {
        self.create_school_class_impl(school_id, req).await
    }

    async fn get_school_class_by_id(&self, class_id: i64) -> Result<Option<SchoolClass>> {
        self.get_school_class_by_id_impl(class_id).await
    }

    async fn list_school_classes(&self, school_id: i64) -> Result<Vec<SchoolClass>> {
        self.list_school_classes_impl(school_id).await
    }

    async fn create_stream(&self, class_id: i64, req: CreateStreamRequest) -> Result<Stream> {
        self.create_stream_impl(class_id, req).await
    }

    async fn get_stream_by_id(&self, stream_id: i64) -> Result<Option<Stream>> {
        self.get_stream_by_id_impl(stream_id).await
    }

    async fn list_streams(&self, class_id: i64) -> Result<Vec<Stream>> {
        self.list_streams_impl(class_id).await
    }

    async fn create_student(&self, school_id: i64, req: CreateStudentRequest) -> Result<Student> {
        self.create_student_impl(school_id, req).await
    }

    async fn list_students_with_pagination(
        &self,
        school_id: i64,
        query: StudentListQuery,
    ) -> Result<PaginatedResponse<Student>> {
        self.list_students_with_pagination_impl(school_id, query)
            .await
    }

    async fn get_students_by_ids(&self, student_ids: &[i64]) -> Result<Vec<Student>> {
        self.get_students_by_ids_impl(student_ids).await
    }

    async fn create_subject(&self, school_id: i64, req: CreateSubjectRequest) -> Result<Subject> {
        self.create_subject_impl(school_id, req).await
    }

    async fn list_subjects(&self, school_id: i64) -> Result<Vec<Subject>> {
        self.list_subjects_impl(school_id).await
    }

    // 评分体系模块
    async fn create_grading_system(
        &self,
        req: CreateGradingSystemRequest,
    ) -> Result<GradingSystemDetail> {
        self.create_grading_system_impl(req).await
    }

    async fn get_grading_system_by_id(&self, id: i64) -> Result<Option<GradingSystemDetail>> {
        self.get_grading_system_by_id_impl(id).await
    }

    async fn list_grading_systems(&self, school_id: i64) -> Result<Vec<GradingSystem>> {
        self.list_grading_systems_impl(school_id).await
    }

    async fn list_grade_bands(&self, grading_system_id: i64) -> Result<Vec<GradeBand>> {
        self.list_grade_bands_impl(grading_system_id).await
    }

    async fn replace_grade_bands(
        &self,
        grading_system_id: i64,
        bands: Vec<GradeBandInput>,
    ) -> Result<GradingSystemDetail> {
        self.replace_grade_bands_impl(grading_system_id, bands)
            .await
    }

    async fn set_default_grading_system(&self, grading_system_id: i64) -> Result<GradingSystem> {
        self.set_default_grading_system_impl(grading_system_id)
            .await
    }

    async fn get_default_grading_system(&self, school_id: i64) -> Result<Option<GradingSystem>> {
        self.get_default_grading_system_impl(school_id).await
    }

    // 考试系列模块
    async fn create_exam_series(&self, req: CreateExamSeriesRequest) -> Result<ExamSeries> {
        self.create_exam_series_impl(req).await
    }

    async fn get_exam_series_by_id(&self, series_id: i64) -> Result<Option<ExamSeries>> {
        self.get_exam_series_by_id_impl(series_id).await
    }

    async fn list_exam_series_with_pagination(
        &self,
        query: ExamSeriesListQuery,
    ) -> Result<ExamSeriesListResponse> {
        self.list_exam_series_with_pagination_impl(query).await
    }

    // 考试模块
    async fn create_exam_category(&self, req: CreateExamCategoryRequest) -> Result<ExamCategory> {
        self.create_exam_category_impl(req).await
    }

    async fn get_exam_category_by_id(&self, category_id: i64) -> Result<Option<ExamCategory>> {
        self.get_exam_category_by_id_impl(category_id).await
    }

    async fn list_exam_categories(&self, school_id: i64) -> Result<Vec<ExamCategory>> {
        self.list_exam_categories_impl(school_id).await
    }

    async fn create_exam(&self, school_id: i64, req: CreateExamRequest) -> Result<ExamDetail> {
        self.create_exam_impl(school_id, req).await
    }

    async fn get_exam_by_id(&self, exam_id: i64) -> Result<Option<Exam>> {
        self.get_exam_by_id_impl(exam_id).await
    }

    async fn get_exam_detail(&self, exam_id: i64) -> Result<Option<ExamDetail>> {
        self.get_exam_detail_impl(exam_id).await
    }

    async fn list_exams_by_series(&self, series_id: i64) -> Result<Vec<Exam>> {
        self.list_exams_by_series_impl(series_id).await
    }

    async fn transition_exam_status(
        &self,
        exam_id: i64,
        from: ExamStatus,
        to: ExamStatus,
    ) -> Result<bool> {
        self.transition_exam_status_impl(exam_id, from, to).await
    }

    async fn create_exam_paper(
        &self,
        exam_id: i64,
        req: CreateExamPaperRequest,
    ) -> Result<ExamPaper> {
        self.create_exam_paper_impl(exam_id, req).await
    }

    async fn get_exam_paper_by_id(&self, paper_id: i64) -> Result<Option<ExamPaper>> {
        self.get_exam_paper_by_id_impl(paper_id).await
    }

    // 成绩模块
    async fn import_subject_results(
        &self,
        ctx: ScoringContext,
        entries: Vec<ResultEntry>,
    ) -> Result<Vec<ExamResult>> {
        self.import_subject_results_impl(ctx, entries).await
    }

    async fn enter_paper_results(
        &self,
        ctx: ScoringContext,
        paper: ExamPaper,
        entries: Vec<PaperResultEntry>,
    ) -> Result<PaperResultsResponse> {
        self.enter_paper_results_impl(ctx, paper, entries).await
    }

    async fn list_exam_results(
        &self,
        exam_id: i64,
        subject_id: Option<i64>,
    ) -> Result<Vec<ExamResult>> {
        self.list_exam_results_impl(exam_id, subject_id).await
    }

    async fn verify_exam_results(
        &self,
        exam_id: i64,
        subject_id: Option<i64>,
        verified_by: i64,
    ) -> Result<u64> {
        self.verify_exam_results_impl(exam_id, subject_id, verified_by)
            .await
    }

    // 学期汇总模块
    async fn regenerate_series_summaries(
        &self,
        series: &ExamSeries,
    ) -> Result<GenerateSummariesResponse> {
        self.regenerate_series_summaries_impl(series).await
    }

    async fn list_series_summaries(
        &self,
        series_id: i64,
        query: SummaryListQuery,
    ) -> Result<SummaryListResponse> {
        self.list_series_summaries_impl(series_id, query).await
    }

    async fn get_student_summary(
        &self,
        series_id: i64,
        student_id: i64,
    ) -> Result<Option<StudentTermSummary>> {
        self.get_student_summary_impl(series_id, student_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_database_url() {
        assert_eq!(
            SeaOrmStorage::build_database_url("exams.db").unwrap(),
            "sqlite://exams.db?mode=rwc"
        );
        assert_eq!(
            SeaOrmStorage::build_database_url("postgres://u@h/db").unwrap(),
            "postgres://u@h/db"
        );
        assert!(SeaOrmStorage::build_database_url("ftp://nope").is_err());
    }

    #[test]
    fn test_write_err_maps_generic_error() {
        let err = write_err("创建试卷")(DbErr::Custom("boom".into()));
        assert_eq!(err.code(), "E003");
        assert!(err.message().contains("创建试卷失败"));
    }
}
