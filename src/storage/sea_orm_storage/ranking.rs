//! 成绩落库后的名次重算
//!
//! 每次写入成绩后在同一事务内调用，读取该科（或该试卷）的全部成绩，
//! 交给 `engine::ranking` 计算，再只回写名次发生变化的行。

use std::collections::HashMap;

use crate::engine::ranking::{RankScope, RankedResult, assign_positions, rank_all_scopes};
use crate::entity::prelude::{ExamPaperResults, ExamResults, Students};
use crate::entity::{exam_paper_results, exam_results, students};
use crate::errors::{ExamSystemError, Result};
use sea_orm::sea_query::Expr;
use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter};

type Positions = (Option<i32>, Option<i32>, Option<i32>);

/// 查询学生当前的班级与分流
pub(super) async fn load_placements<C: ConnectionTrait>(
    db: &C,
    student_ids: &[i64],
) -> Result<HashMap<i64, (Option<i64>, Option<i64>)>> {
    if student_ids.is_empty() {
        return Ok(HashMap::new());
    }

    let rows = Students::find()
        .filter(students::Column::Id.is_in(student_ids.to_vec()))
        .all(db)
        .await
        .map_err(|e| ExamSystemError::database_operation(format!("查询学生班级失败: {e}")))?;

    Ok(rows
        .into_iter()
        .map(|s| (s.id, (s.class_id, s.stream_id)))
        .collect())
}

/// 重新计算某场考试某科目的全校、班级、分流名次
///
/// 缺考成绩的三个名次都清空。
pub(super) async fn rank_subject_results<C: ConnectionTrait>(
    db: &C,
    exam_id: i64,
    subject_id: i64,
) -> Result<()> {
    let rows = ExamResults::find()
        .filter(exam_results::Column::ExamId.eq(exam_id))
        .filter(exam_results::Column::SubjectId.eq(subject_id))
        .all(db)
        .await
        .map_err(|e| ExamSystemError::database_operation(format!("查询科目成绩失败: {e}")))?;

    let student_ids: Vec<i64> = rows.iter().map(|r| r.student_id).collect();
    let placements = load_placements(db, &student_ids).await?;

    let mut ranked: Vec<RankedResult> = rows
        .iter()
        .filter(|r| !r.is_absent)
        .map(|r| {
            let (class_id, stream_id) = placements.get(&r.student_id).copied().unwrap_or_default();
            RankedResult::new(r.id, r.student_id, r.total_score).in_class(class_id, stream_id)
        })
        .collect();
    rank_all_scopes(&mut ranked);

    let computed: HashMap<i64, Positions> = ranked
        .into_iter()
        .map(|r| (r.result_id, (r.position, r.class_position, r.stream_position)))
        .collect();

    for row in rows {
        let next = computed.get(&row.id).copied().unwrap_or_default();
        if next == (row.position, row.class_position, row.stream_position) {
            continue;
        }

        ExamResults::update_many()
            .col_expr(exam_results::Column::Position, Expr::value(next.0))
            .col_expr(exam_results::Column::ClassPosition, Expr::value(next.1))
            .col_expr(exam_results::Column::StreamPosition, Expr::value(next.2))
            .filter(exam_results::Column::Id.eq(row.id))
            .exec(db)
            .await
            .map_err(|e| ExamSystemError::database_operation(format!("更新成绩名次失败: {e}")))?;
    }

    Ok(())
}

/// 重新计算某张试卷的名次（只有全局范围）
pub(super) async fn rank_paper_results<C: ConnectionTrait>(db: &C, paper_id: i64) -> Result<()> {
    let rows = ExamPaperResults::find()
        .filter(exam_paper_results::Column::ExamPaperId.eq(paper_id))
        .all(db)
        .await
        .map_err(|e| ExamSystemError::database_operation(format!("查询试卷成绩失败: {e}")))?;

    let mut ranked: Vec<RankedResult> = rows
        .iter()
        .filter(|r| !r.is_absent)
        .map(|r| RankedResult::new(r.id, r.student_id, r.marks))
        .collect();
    assign_positions(&mut ranked, RankScope::Overall);

    let computed: HashMap<i64, Option<i32>> =
        ranked.into_iter().map(|r| (r.result_id, r.position)).collect();

    for row in rows {
        let next = computed.get(&row.id).copied().flatten();
        if next == row.position {
            continue;
        }

        ExamPaperResults::update_many()
            .col_expr(exam_paper_results::Column::Position, Expr::value(next))
            .filter(exam_paper_results::Column::Id.eq(row.id))
            .exec(db)
            .await
            .map_err(|e| ExamSystemError::database_operation(format!("更新试卷名次失败: {e}")))?;
    }

    Ok(())
}
