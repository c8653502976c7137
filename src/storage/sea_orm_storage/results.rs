//! 成绩存储：批量导入、试卷录入、查询与审核

use std::collections::HashMap;

use super::ranking::{rank_paper_results, rank_subject_results};
use super::{SeaOrmStorage, write_err};
use crate::engine::{GradingCatalog, PaperMark, ScoreInput, ScoringMode};
use crate::entity::prelude::{
    ExamPaperResultActiveModel, ExamPaperResults, ExamResultActiveModel, ExamResultModel,
    ExamResults, Exams,
};
use crate::entity::{exam_paper_results, exam_results};
use crate::errors::{ExamSystemError, Result};
use crate::models::exams::entities::{ExamPaper, ExamStatus};
use crate::models::grading::entities::ResolvedGrade;
use crate::models::results::{
    entities::ExamResult,
    requests::{PaperResultEntry, ResultEntry},
    responses::PaperResultsResponse,
};
use crate::storage::ScoringContext;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};

/// 在事务内复核考试仍处于可录入状态
async fn ensure_accepts_results<C: ConnectionTrait>(db: &C, exam_id: i64) -> Result<()> {
    let exam = Exams::find_by_id(exam_id)
        .one(db)
        .await
        .map_err(|e| ExamSystemError::database_operation(format!("查询考试失败: {e}")))?
        .ok_or_else(|| ExamSystemError::not_found(format!("考试不存在: {exam_id}")))?;

    let status = exam
        .status
        .parse::<ExamStatus>()
        .map_err(ExamSystemError::database_operation)?;
    if !status.accepts_results() {
        return Err(ExamSystemError::invalid_transition(format!(
            "考试当前状态为 {status}，不能录入成绩"
        )));
    }
    Ok(())
}

async fn find_subject_rows<C: ConnectionTrait>(
    db: &C,
    exam_id: i64,
    subject_id: i64,
) -> Result<Vec<ExamResultModel>> {
    ExamResults::find()
        .filter(exam_results::Column::ExamId.eq(exam_id))
        .filter(exam_results::Column::SubjectId.eq(subject_id))
        .all(db)
        .await
        .map_err(|e| ExamSystemError::database_operation(format!("查询科目成绩失败: {e}")))
}

// 名次优先，缺考（无名次）排在最后
fn sort_results(results: &mut [ExamResult]) {
    results.sort_by_key(|r| {
        (
            r.subject_id,
            r.position.unwrap_or(i32::MAX),
            r.student_id,
        )
    });
}

async fn load_subject_results<C: ConnectionTrait>(
    db: &C,
    exam_id: i64,
    subject_id: i64,
) -> Result<Vec<ExamResult>> {
    let mut results: Vec<ExamResult> = find_subject_rows(db, exam_id, subject_id)
        .await?
        .into_iter()
        .map(|m| m.into_exam_result())
        .collect();
    sort_results(&mut results);
    Ok(results)
}

/// 按分卷成绩重算父成绩；所有分卷都缺考时父成绩记为缺考
async fn recompute_parent<C: ConnectionTrait>(
    db: &C,
    parent: ExamResultModel,
    mode: &ScoringMode,
    catalog: &GradingCatalog<'_>,
    entered_by: Option<i64>,
    now: i64,
) -> Result<()> {
    let marks: Vec<PaperMark> = ExamPaperResults::find()
        .filter(exam_paper_results::Column::ExamResultId.eq(parent.id))
        .all(db)
        .await
        .map_err(|e| ExamSystemError::database_operation(format!("查询分卷成绩失败: {e}")))?
        .into_iter()
        .map(|p| PaperMark {
            paper_id: p.exam_paper_id,
            marks: p.marks,
            is_absent: p.is_absent,
        })
        .collect();

    let all_absent = marks.iter().all(|m| m.is_absent);
    let input = ScoreInput {
        is_absent: all_absent,
        paper_marks: &marks,
        ..Default::default()
    };
    let scored = mode.assign_grade(&input, catalog);

    let mut active: ExamResultActiveModel = parent.into();
    active.total_score = Set(scored.total_score);
    active.grade = Set(scored.grade);
    active.points = Set(scored.points);
    active.is_absent = Set(all_absent);
    active.entered_by = Set(entered_by);
    active.updated_at = Set(now);
    active.update(db).await.map_err(write_err("更新科目成绩"))?;

    Ok(())
}

impl SeaOrmStorage {
    /// 批量导入某科成绩
    ///
    /// 已有成绩按 (exam, student, subject) 覆盖，整个批次在一个事务内完成并重新排名。
    pub async fn import_subject_results_impl(
        &self,
        ctx: ScoringContext,
        entries: Vec<ResultEntry>,
    ) -> Result<Vec<ExamResult>> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| ExamSystemError::database_operation(format!("开启事务失败: {e}")))?;

        ensure_accepts_results(&txn, ctx.exam_id).await?;

        let catalog = GradingCatalog::new(&ctx.bands);
        let now = chrono::Utc::now().timestamp();
        let mut existing: HashMap<i64, ExamResultModel> =
            find_subject_rows(&txn, ctx.exam_id, ctx.subject_id)
                .await?
                .into_iter()
                .map(|m| (m.student_id, m))
                .collect();

        for entry in entries {
            let input = ScoreInput {
                is_absent: entry.is_absent,
                score: entry.score,
                theory_score: entry.theory_score,
                practical_score: entry.practical_score,
                paper_marks: &[],
            };
            let scored = ctx.mode.assign_grade(&input, &catalog);

            // 理论/实践分只在拆分计分且未缺考时保留
            let (theory_score, practical_score) = match ctx.mode {
                ScoringMode::TheoryPractical { .. } if !entry.is_absent => {
                    (entry.theory_score, entry.practical_score)
                }
                _ => (None, None),
            };

            match existing.remove(&entry.student_id) {
                Some(row) => {
                    let mut active: ExamResultActiveModel = row.into();
                    active.theory_score = Set(theory_score);
                    active.practical_score = Set(practical_score);
                    active.total_score = Set(scored.total_score);
                    active.grade = Set(scored.grade);
                    active.points = Set(scored.points);
                    active.is_absent = Set(entry.is_absent);
                    active.remarks = Set(entry.remarks);
                    active.entered_by = Set(ctx.entered_by);
                    active.updated_at = Set(now);
                    active.update(&txn).await.map_err(write_err("更新成绩"))?;
                }
                None => {
                    let model = ExamResultActiveModel {
                        exam_id: Set(ctx.exam_id),
                        student_id: Set(entry.student_id),
                        subject_id: Set(ctx.subject_id),
                        theory_score: Set(theory_score),
                        practical_score: Set(practical_score),
                        total_score: Set(scored.total_score),
                        grade: Set(scored.grade),
                        points: Set(scored.points),
                        is_absent: Set(entry.is_absent),
                        remarks: Set(entry.remarks),
                        entered_by: Set(ctx.entered_by),
                        entered_at: Set(now),
                        updated_at: Set(now),
                        ..Default::default()
                    };
                    model.insert(&txn).await.map_err(write_err("写入成绩"))?;
                }
            }
        }

        rank_subject_results(&txn, ctx.exam_id, ctx.subject_id).await?;
        let results = load_subject_results(&txn, ctx.exam_id, ctx.subject_id).await?;

        txn.commit()
            .await
            .map_err(|e| ExamSystemError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(results)
    }

    /// 录入一张试卷的成绩并重算所属科目
    pub async fn enter_paper_results_impl(
        &self,
        ctx: ScoringContext,
        paper: ExamPaper,
        entries: Vec<PaperResultEntry>,
    ) -> Result<PaperResultsResponse> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| ExamSystemError::database_operation(format!("开启事务失败: {e}")))?;

        ensure_accepts_results(&txn, ctx.exam_id).await?;

        let catalog = GradingCatalog::new(&ctx.bands);
        let now = chrono::Utc::now().timestamp();
        let mut parents: HashMap<i64, ExamResultModel> =
            find_subject_rows(&txn, ctx.exam_id, ctx.subject_id)
                .await?
                .into_iter()
                .map(|m| (m.student_id, m))
                .collect();

        for entry in entries {
            let parent = match parents.remove(&entry.student_id) {
                Some(row) => row,
                None => {
                    // 占位，分数随后由分卷成绩重算
                    let placeholder = ExamResultActiveModel {
                        exam_id: Set(ctx.exam_id),
                        student_id: Set(entry.student_id),
                        subject_id: Set(ctx.subject_id),
                        total_score: Set(0.0),
                        grade: Set(ResolvedGrade::UNGRADED.to_string()),
                        points: Set(0.0),
                        is_absent: Set(false),
                        entered_by: Set(ctx.entered_by),
                        entered_at: Set(now),
                        updated_at: Set(now),
                        ..Default::default()
                    };
                    placeholder
                        .insert(&txn)
                        .await
                        .map_err(write_err("写入成绩"))?
                }
            };

            let marks = if entry.is_absent {
                0.0
            } else {
                entry.marks.unwrap_or(0.0)
            };

            let existing = ExamPaperResults::find()
                .filter(exam_paper_results::Column::ExamResultId.eq(parent.id))
                .filter(exam_paper_results::Column::ExamPaperId.eq(paper.id))
                .one(&txn)
                .await
                .map_err(|e| {
                    ExamSystemError::database_operation(format!("查询试卷成绩失败: {e}"))
                })?;

            match existing {
                Some(row) => {
                    let mut active: ExamPaperResultActiveModel = row.into();
                    active.marks = Set(marks);
                    active.is_absent = Set(entry.is_absent);
                    active.entered_by = Set(ctx.entered_by);
                    active.entered_at = Set(now);
                    active.update(&txn).await.map_err(write_err("更新试卷成绩"))?;
                }
                None => {
                    let model = ExamPaperResultActiveModel {
                        exam_result_id: Set(parent.id),
                        exam_paper_id: Set(paper.id),
                        student_id: Set(entry.student_id),
                        marks: Set(marks),
                        is_absent: Set(entry.is_absent),
                        entered_by: Set(ctx.entered_by),
                        entered_at: Set(now),
                        ..Default::default()
                    };
                    model.insert(&txn).await.map_err(write_err("写入试卷成绩"))?;
                }
            }

            recompute_parent(&txn, parent, &ctx.mode, &catalog, ctx.entered_by, now).await?;
        }

        rank_paper_results(&txn, paper.id).await?;
        rank_subject_results(&txn, ctx.exam_id, ctx.subject_id).await?;

        let paper_results = ExamPaperResults::find()
            .filter(exam_paper_results::Column::ExamPaperId.eq(paper.id))
            .order_by_asc(exam_paper_results::Column::StudentId)
            .all(&txn)
            .await
            .map_err(|e| ExamSystemError::database_operation(format!("查询试卷成绩失败: {e}")))?
            .into_iter()
            .map(|m| m.into_exam_paper_result())
            .collect();
        let results = load_subject_results(&txn, ctx.exam_id, ctx.subject_id).await?;

        txn.commit()
            .await
            .map_err(|e| ExamSystemError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(PaperResultsResponse {
            exam_paper_id: paper.id,
            paper_results,
            results,
        })
    }

    pub async fn list_exam_results_impl(
        &self,
        exam_id: i64,
        subject_id: Option<i64>,
    ) -> Result<Vec<ExamResult>> {
        let mut select = ExamResults::find().filter(exam_results::Column::ExamId.eq(exam_id));
        if let Some(subject_id) = subject_id {
            select = select.filter(exam_results::Column::SubjectId.eq(subject_id));
        }

        let mut results: Vec<ExamResult> = select
            .all(&self.db)
            .await
            .map_err(|e| ExamSystemError::database_operation(format!("查询成绩列表失败: {e}")))?
            .into_iter()
            .map(|m| m.into_exam_result())
            .collect();
        sort_results(&mut results);

        Ok(results)
    }

    /// 审核成绩，返回受影响的行数
    pub async fn verify_exam_results_impl(
        &self,
        exam_id: i64,
        subject_id: Option<i64>,
        verified_by: i64,
    ) -> Result<u64> {
        let mut update = ExamResults::update_many()
            .col_expr(exam_results::Column::VerifiedBy, Expr::value(Some(verified_by)))
            .col_expr(
                exam_results::Column::VerifiedAt,
                Expr::value(Some(chrono::Utc::now().timestamp())),
            )
            .filter(exam_results::Column::ExamId.eq(exam_id));
        if let Some(subject_id) = subject_id {
            update = update.filter(exam_results::Column::SubjectId.eq(subject_id));
        }

        let result = update
            .exec(&self.db)
            .await
            .map_err(|e| ExamSystemError::database_operation(format!("审核成绩失败: {e}")))?;

        Ok(result.rows_affected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(student_id: i64, subject_id: i64, position: Option<i32>) -> ExamResult {
        ExamResult {
            id: student_id,
            exam_id: 1,
            student_id,
            subject_id,
            theory_score: None,
            practical_score: None,
            total_score: 0.0,
            grade: String::new(),
            points: 0.0,
            position,
            class_position: None,
            stream_position: None,
            is_absent: position.is_none(),
            remarks: None,
            entered_by: None,
            entered_at: chrono::DateTime::default(),
            verified_by: None,
            verified_at: None,
        }
    }

    #[test]
    fn test_sort_results_puts_absent_last() {
        let mut results = vec![
            result(3, 1, None),
            result(1, 1, Some(2)),
            result(2, 1, Some(1)),
            result(4, 2, Some(1)),
        ];
        sort_results(&mut results);
        let order: Vec<i64> = results.iter().map(|r| r.student_id).collect();
        assert_eq!(order, vec![2, 1, 3, 4]);
    }
}
