use serde::Deserialize;
use ts_rs::TS;

// 学期汇总列表查询参数
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/summary.ts")]
pub struct SummaryListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub class_id: Option<i64>,
    pub stream_id: Option<i64>,
}
