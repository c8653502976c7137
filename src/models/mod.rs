//! 数据模型定义
//!
//! - `entities`: 业务实体（由 storage 层从数据库实体转换而来）
//! - `requests`: HTTP 请求体与查询参数
//! - `responses`: HTTP 响应体

pub mod common;
pub mod exam_series;
pub mod exams;
pub mod grading;
pub mod results;
pub mod schools;
pub mod summaries;

pub use common::*;

/// 程序启动时间
#[derive(Debug, Clone)]
pub struct AppStartTime {
    pub start_datetime: chrono::DateTime<chrono::Utc>,
}
