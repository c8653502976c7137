//! 考试计分引擎
//!
//! 纯计算层，不做 I/O：storage 层把数据库中的行读出来交给这里，
//! 再把计算结果写回。输入在进入引擎前已完成边界校验。
//!
//! - `catalog`: 分数 → 等级/绩点
//! - `structure`: 考试结构校验与状态流转
//! - `scoring`: 单科总分与等级
//! - `ranking`: 并列感知的名次（全校/班级/分流）
//! - `aggregate`: 学期汇总与多范围排名

pub mod aggregate;
pub mod catalog;
pub mod ranking;
pub mod scoring;
pub mod structure;

pub use aggregate::{StudentRecord, SubjectOutcome, TermSummaryDraft};
pub use catalog::GradingCatalog;
pub use ranking::{RankScope, Rankable, RankedResult};
pub use scoring::{PaperMark, PaperWeight, ScoreInput, ScoredResult, ScoringMode};
pub use structure::{ExamStructure, ExamTransition};

/// 保留两位小数，所有落库的平均值/总分都经过它，保证重算结果逐字节一致
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
