//! 考试类别、考试、试卷存储操作

use super::{SeaOrmStorage, write_err};
use crate::entity::prelude::{
    ExamCategories, ExamCategoryActiveModel, ExamClassActiveModel, ExamClasses,
    ExamPaperActiveModel, ExamPapers, ExamResults, ExamSubjectActiveModel, ExamSubjects, Exams,
};
use crate::entity::{exam_categories, exam_classes, exam_papers, exam_results, exam_subjects, exams};
use crate::errors::{ExamSystemError, Result};
use crate::models::exams::{
    entities::{Exam, ExamCategory, ExamDetail, ExamPaper, ExamStatus},
    requests::{CreateExamCategoryRequest, CreateExamPaperRequest, CreateExamRequest},
};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};

/// 读取考试及其班级、科目、试卷与成绩数
///
/// 可在事务内调用，成绩写入前据此复核考试状态与结构。
pub(super) async fn load_exam_detail<C: ConnectionTrait>(
    db: &C,
    exam_id: i64,
) -> Result<Option<ExamDetail>> {
    let exam = Exams::find_by_id(exam_id)
        .one(db)
        .await
        .map_err(|e| ExamSystemError::database_operation(format!("查询考试失败: {e}")))?;

    let Some(exam) = exam else {
        return Ok(None);
    };

    let class_ids = ExamClasses::find()
        .filter(exam_classes::Column::ExamId.eq(exam_id))
        .order_by_asc(exam_classes::Column::ClassId)
        .all(db)
        .await
        .map_err(|e| ExamSystemError::database_operation(format!("查询考试班级失败: {e}")))?
        .into_iter()
        .map(|m| m.class_id)
        .collect();

    let subjects = ExamSubjects::find()
        .filter(exam_subjects::Column::ExamId.eq(exam_id))
        .order_by_asc(exam_subjects::Column::SubjectId)
        .all(db)
        .await
        .map_err(|e| ExamSystemError::database_operation(format!("查询考试科目失败: {e}")))?
        .into_iter()
        .map(|m| m.into_exam_subject())
        .collect();

    let papers = ExamPapers::find()
        .filter(exam_papers::Column::ExamId.eq(exam_id))
        .order_by_asc(exam_papers::Column::SubjectId)
        .order_by_asc(exam_papers::Column::PaperNumber)
        .all(db)
        .await
        .map_err(|e| ExamSystemError::database_operation(format!("查询试卷失败: {e}")))?
        .into_iter()
        .map(|m| m.into_exam_paper())
        .collect();

    let result_count = ExamResults::find()
        .filter(exam_results::Column::ExamId.eq(exam_id))
        .count(db)
        .await
        .map_err(|e| ExamSystemError::database_operation(format!("查询成绩数量失败: {e}")))?;

    Ok(Some(ExamDetail {
        exam: exam.into_exam(),
        class_ids,
        subjects,
        papers,
        result_count: result_count as i64,
    }))
}

impl SeaOrmStorage {
    /// 创建考试类别
    pub async fn create_exam_category_impl(
        &self,
        req: CreateExamCategoryRequest,
    ) -> Result<ExamCategory> {
        let model = ExamCategoryActiveModel {
            school_id: Set(req.school_id),
            name: Set(req.name),
            weight: Set(req.weight.unwrap_or(100.0)),
            created_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(write_err("创建考试类别"))?;

        Ok(result.into_exam_category())
    }

    pub async fn get_exam_category_by_id_impl(
        &self,
        category_id: i64,
    ) -> Result<Option<ExamCategory>> {
        let result = ExamCategories::find_by_id(category_id)
            .one(&self.db)
            .await
            .map_err(|e| ExamSystemError::database_operation(format!("查询考试类别失败: {e}")))?;

        Ok(result.map(|m| m.into_exam_category()))
    }

    pub async fn list_exam_categories_impl(&self, school_id: i64) -> Result<Vec<ExamCategory>> {
        let result = ExamCategories::find()
            .filter(exam_categories::Column::SchoolId.eq(school_id))
            .order_by_asc(exam_categories::Column::Name)
            .all(&self.db)
            .await
            .map_err(|e| {
                ExamSystemError::database_operation(format!("查询考试类别列表失败: {e}"))
            })?;

        Ok(result.into_iter().map(|m| m.into_exam_category()).collect())
    }

    /// 创建考试及其班级、科目关联，初始状态为 draft
    pub async fn create_exam_impl(&self, school_id: i64, req: CreateExamRequest) -> Result<ExamDetail> {
        let now = chrono::Utc::now().timestamp();

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| ExamSystemError::database_operation(format!("开启事务失败: {e}")))?;

        let (theory_percentage, practical_percentage) = if req.has_practical {
            (req.theory_percentage, req.practical_percentage)
        } else {
            (None, None)
        };

        let model = exams::ActiveModel {
            school_id: Set(school_id),
            exam_series_id: Set(req.exam_series_id),
            exam_category_id: Set(req.exam_category_id),
            grading_system_id: Set(req.grading_system_id),
            name: Set(req.name),
            start_date: Set(req.start_date),
            end_date: Set(req.end_date),
            scope_type: Set(req.scope_type.to_string()),
            subject_scope_type: Set(req.subject_scope_type.to_string()),
            has_practical: Set(req.has_practical),
            theory_percentage: Set(theory_percentage),
            practical_percentage: Set(practical_percentage),
            status: Set(ExamStatus::Draft.to_string()),
            created_by: Set(req.created_by),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };
        let exam = model.insert(&txn).await.map_err(write_err("创建考试"))?;

        let mut class_ids = Vec::with_capacity(req.class_ids.len());
        for class_id in req.class_ids {
            let link = ExamClassActiveModel {
                exam_id: Set(exam.id),
                class_id: Set(class_id),
                ..Default::default()
            };
            link.insert(&txn).await.map_err(write_err("关联考试班级"))?;
            class_ids.push(class_id);
        }

        let mut subjects = Vec::with_capacity(req.subjects.len());
        for setting in req.subjects {
            let link = ExamSubjectActiveModel {
                exam_id: Set(exam.id),
                subject_id: Set(setting.subject_id),
                total_marks: Set(setting.total_marks.unwrap_or(100.0)),
                pass_mark: Set(setting.pass_mark.unwrap_or(0.0)),
                has_papers: Set(setting.has_papers),
                paper_count: Set(setting.paper_count),
                ..Default::default()
            };
            let inserted = link.insert(&txn).await.map_err(write_err("关联考试科目"))?;
            subjects.push(inserted.into_exam_subject());
        }

        txn.commit()
            .await
            .map_err(|e| ExamSystemError::database_operation(format!("提交事务失败: {e}")))?;

        class_ids.sort_unstable();
        subjects.sort_by_key(|s| s.subject_id);

        Ok(ExamDetail {
            exam: exam.into_exam(),
            class_ids,
            subjects,
            papers: Vec::new(),
            result_count: 0,
        })
    }

    pub async fn get_exam_by_id_impl(&self, exam_id: i64) -> Result<Option<Exam>> {
        let result = Exams::find_by_id(exam_id)
            .one(&self.db)
            .await
            .map_err(|e| ExamSystemError::database_operation(format!("查询考试失败: {e}")))?;

        Ok(result.map(|m| m.into_exam()))
    }

    pub async fn get_exam_detail_impl(&self, exam_id: i64) -> Result<Option<ExamDetail>> {
        load_exam_detail(&self.db, exam_id).await
    }

    pub async fn list_exams_by_series_impl(&self, series_id: i64) -> Result<Vec<Exam>> {
        let result = Exams::find()
            .filter(exams::Column::ExamSeriesId.eq(series_id))
            .order_by_asc(exams::Column::StartDate)
            .order_by_asc(exams::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| ExamSystemError::database_operation(format!("查询考试列表失败: {e}")))?;

        Ok(result.into_iter().map(|m| m.into_exam()).collect())
    }

    /// 以当前状态为条件的原子状态写入
    pub async fn transition_exam_status_impl(
        &self,
        exam_id: i64,
        from: ExamStatus,
        to: ExamStatus,
    ) -> Result<bool> {
        let result = Exams::update_many()
            .col_expr(exams::Column::Status, Expr::value(to.to_string()))
            .col_expr(
                exams::Column::UpdatedAt,
                Expr::value(chrono::Utc::now().timestamp()),
            )
            .filter(exams::Column::Id.eq(exam_id))
            .filter(exams::Column::Status.eq(from.to_string()))
            .exec(&self.db)
            .await
            .map_err(|e| ExamSystemError::database_operation(format!("更新考试状态失败: {e}")))?;

        Ok(result.rows_affected == 1)
    }

    /// 创建试卷
    pub async fn create_exam_paper_impl(
        &self,
        exam_id: i64,
        req: CreateExamPaperRequest,
    ) -> Result<ExamPaper> {
        let model = ExamPaperActiveModel {
            exam_id: Set(exam_id),
            subject_id: Set(req.subject_id),
            paper_number: Set(req.paper_number),
            name: Set(req.name),
            total_marks: Set(req.total_marks),
            pass_mark: Set(req.pass_mark.unwrap_or(0.0)),
            duration_minutes: Set(req.duration_minutes),
            percentage_weight: Set(req.percentage_weight),
            is_practical: Set(req.is_practical),
            created_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let result = model.insert(&self.db).await.map_err(write_err("创建试卷"))?;

        Ok(result.into_exam_paper())
    }

    pub async fn get_exam_paper_by_id_impl(&self, paper_id: i64) -> Result<Option<ExamPaper>> {
        let result = ExamPapers::find_by_id(paper_id)
            .one(&self.db)
            .await
            .map_err(|e| ExamSystemError::database_operation(format!("查询试卷失败: {e}")))?;

        Ok(result.map(|m| m.into_exam_paper()))
    }
}
