//! 学期汇总存储：整系列重建与查询

use std::collections::HashMap;

use super::{SeaOrmStorage, write_err};
use crate::engine::aggregate::build_series_summaries;
use crate::engine::{GradingCatalog, StudentRecord, SubjectOutcome, TermSummaryDraft};
use crate::entity::prelude::{
    ExamResults, ExamSubjects, Exams, GradeBands, GradingSystems, StudentTermSummaries,
    StudentTermSummaryActiveModel, Students,
};
use crate::entity::{
    exam_results, exam_subjects, exams, grade_bands, grading_systems, student_term_summaries,
    students,
};
use crate::errors::{ExamSystemError, Result};
use crate::models::{
    PaginationInfo,
    exam_series::entities::ExamSeries,
    grading::entities::GradeBand,
    normalize_page,
    summaries::{
        entities::StudentTermSummary,
        requests::SummaryListQuery,
        responses::{GenerateSummariesResponse, SummaryListResponse},
    },
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};

/// 学校默认评分体系的等级区间，没有默认体系时为空
async fn load_default_bands<C: ConnectionTrait>(db: &C, school_id: i64) -> Result<Vec<GradeBand>> {
    let system = GradingSystems::find()
        .filter(grading_systems::Column::SchoolId.eq(school_id))
        .filter(grading_systems::Column::IsDefault.eq(true))
        .filter(grading_systems::Column::IsActive.eq(true))
        .one(db)
        .await
        .map_err(|e| ExamSystemError::database_operation(format!("查询默认评分体系失败: {e}")))?;

    let Some(system) = system else {
        return Ok(Vec::new());
    };

    let bands = GradeBands::find()
        .filter(grade_bands::Column::GradingSystemId.eq(system.id))
        .order_by_asc(grade_bands::Column::SortOrder)
        .order_by_asc(grade_bands::Column::Id)
        .all(db)
        .await
        .map_err(|e| ExamSystemError::database_operation(format!("查询等级区间失败: {e}")))?;

    Ok(bands.into_iter().map(|m| m.into_grade_band()).collect())
}

/// 读取系列内全部成绩，附上各科满分
async fn load_series_outcomes<C: ConnectionTrait>(
    db: &C,
    series_id: i64,
) -> Result<Vec<SubjectOutcome>> {
    let exam_ids: Vec<i64> = Exams::find()
        .filter(exams::Column::ExamSeriesId.eq(series_id))
        .all(db)
        .await
        .map_err(|e| ExamSystemError::database_operation(format!("查询系列考试失败: {e}")))?
        .into_iter()
        .map(|e| e.id)
        .collect();

    if exam_ids.is_empty() {
        return Ok(Vec::new());
    }

    let possible: HashMap<(i64, i64), f64> = ExamSubjects::find()
        .filter(exam_subjects::Column::ExamId.is_in(exam_ids.clone()))
        .all(db)
        .await
        .map_err(|e| ExamSystemError::database_operation(format!("查询考试科目失败: {e}")))?
        .into_iter()
        .map(|s| ((s.exam_id, s.subject_id), s.total_marks))
        .collect();

    let results = ExamResults::find()
        .filter(exam_results::Column::ExamId.is_in(exam_ids))
        .order_by_asc(exam_results::Column::Id)
        .all(db)
        .await
        .map_err(|e| ExamSystemError::database_operation(format!("查询系列成绩失败: {e}")))?;

    results
        .into_iter()
        .map(|r| {
            let possible_marks = possible
                .get(&(r.exam_id, r.subject_id))
                .copied()
                .ok_or_else(|| {
                    ExamSystemError::database_operation(format!(
                        "成绩 {} 对应的考试科目不存在: exam={}, subject={}",
                        r.id, r.exam_id, r.subject_id
                    ))
                })?;
            Ok(SubjectOutcome {
                student_id: r.student_id,
                total_score: r.total_score,
                possible_marks,
                points: r.points,
                is_absent: r.is_absent,
            })
        })
        .collect()
}

fn apply_draft(
    active: &mut StudentTermSummaryActiveModel,
    draft: &TermSummaryDraft,
    generated_at: i64,
) {
    active.class_id = Set(draft.class_id);
    active.stream_id = Set(draft.stream_id);
    active.total_subjects = Set(draft.total_subjects);
    active.total_points = Set(draft.total_points);
    active.total_possible_marks = Set(draft.total_possible_marks);
    active.total_grade_points = Set(draft.total_grade_points);
    active.average_score = Set(draft.average_score);
    active.average_percentage = Set(draft.average_percentage);
    active.average_grade = Set(draft.average_grade.clone());
    active.overall_position = Set(draft.overall_position);
    active.class_position = Set(draft.class_position);
    active.stream_position = Set(draft.stream_position);
    active.generated_at = Set(generated_at);
}

impl SeaOrmStorage {
    /// 全量重建某系列的学期汇总
    ///
    /// 已有 (student, series) 行逐字段覆盖，新学生插入，不再有成绩的学生删除；
    /// 全部在一个事务内完成，失败时旧数据保持不变。
    pub async fn regenerate_series_summaries_impl(
        &self,
        series: &ExamSeries,
    ) -> Result<GenerateSummariesResponse> {
        let generated_at = chrono::Utc::now();
        let now = generated_at.timestamp();

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| ExamSystemError::database_operation(format!("开启事务失败: {e}")))?;

        let students: Vec<StudentRecord> = Students::find()
            .filter(students::Column::SchoolId.eq(series.school_id))
            .all(&txn)
            .await
            .map_err(|e| ExamSystemError::database_operation(format!("查询学生失败: {e}")))?
            .into_iter()
            .map(|s| StudentRecord {
                student_id: s.id,
                class_id: s.class_id,
                stream_id: s.stream_id,
            })
            .collect();

        let outcomes = load_series_outcomes(&txn, series.id).await?;
        let bands = load_default_bands(&txn, series.school_id).await?;
        let catalog = GradingCatalog::new(&bands);
        let default_catalog = (!catalog.is_empty()).then_some(&catalog);

        let drafts = build_series_summaries(&students, &outcomes, default_catalog);

        let mut existing: HashMap<i64, _> = StudentTermSummaries::find()
            .filter(student_term_summaries::Column::ExamSeriesId.eq(series.id))
            .all(&txn)
            .await
            .map_err(|e| ExamSystemError::database_operation(format!("查询学期汇总失败: {e}")))?
            .into_iter()
            .map(|m| (m.student_id, m))
            .collect();

        for draft in &drafts {
            match existing.remove(&draft.student_id) {
                Some(row) => {
                    let mut active: StudentTermSummaryActiveModel = row.into();
                    apply_draft(&mut active, draft, now);
                    active.update(&txn).await.map_err(write_err("更新学期汇总"))?;
                }
                None => {
                    let mut active = StudentTermSummaryActiveModel {
                        student_id: Set(draft.student_id),
                        exam_series_id: Set(series.id),
                        school_id: Set(series.school_id),
                        ..Default::default()
                    };
                    apply_draft(&mut active, draft, now);
                    active.insert(&txn).await.map_err(write_err("写入学期汇总"))?;
                }
            }
        }

        // 剩下的是本次没有生成汇总的学生
        let stale: Vec<i64> = existing.into_values().map(|m| m.id).collect();
        let removed = stale.len();
        if !stale.is_empty() {
            StudentTermSummaries::delete_many()
                .filter(student_term_summaries::Column::Id.is_in(stale))
                .exec(&txn)
                .await
                .map_err(|e| {
                    ExamSystemError::database_operation(format!("删除过期学期汇总失败: {e}"))
                })?;
        }

        txn.commit()
            .await
            .map_err(|e| ExamSystemError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(GenerateSummariesResponse {
            exam_series_id: series.id,
            generated: drafts.len(),
            removed,
            generated_at,
        })
    }

    /// 分页列出汇总，按全校名次升序
    pub async fn list_series_summaries_impl(
        &self,
        series_id: i64,
        query: SummaryListQuery,
    ) -> Result<SummaryListResponse> {
        let (page, size) = normalize_page(query.page, query.size);

        let mut select = StudentTermSummaries::find()
            .filter(student_term_summaries::Column::ExamSeriesId.eq(series_id));

        if let Some(class_id) = query.class_id {
            select = select.filter(student_term_summaries::Column::ClassId.eq(class_id));
        }
        if let Some(stream_id) = query.stream_id {
            select = select.filter(student_term_summaries::Column::StreamId.eq(stream_id));
        }

        let paginator = select
            .order_by_asc(student_term_summaries::Column::OverallPosition)
            .order_by_asc(student_term_summaries::Column::StudentId)
            .paginate(&self.db, size);

        let total = paginator
            .num_items()
            .await
            .map_err(|e| ExamSystemError::database_operation(format!("查询学期汇总总数失败: {e}")))?;

        let items = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| ExamSystemError::database_operation(format!("查询学期汇总列表失败: {e}")))?;

        Ok(SummaryListResponse {
            pagination: PaginationInfo::new(page, size, total),
            items: items.into_iter().map(|m| m.into_term_summary()).collect(),
        })
    }

    pub async fn get_student_summary_impl(
        &self,
        series_id: i64,
        student_id: i64,
    ) -> Result<Option<StudentTermSummary>> {
        let result = StudentTermSummaries::find()
            .filter(student_term_summaries::Column::ExamSeriesId.eq(series_id))
            .filter(student_term_summaries::Column::StudentId.eq(student_id))
            .one(&self.db)
            .await
            .map_err(|e| ExamSystemError::database_operation(format!("查询学期汇总失败: {e}")))?;

        Ok(result.map(|m| m.into_term_summary()))
    }
}
