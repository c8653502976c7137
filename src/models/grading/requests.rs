use super::entities::GradingType;
use serde::Deserialize;
use ts_rs::TS;

// 等级区间输入，按数组顺序决定查找顺序
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/grading.ts")]
pub struct GradeBandInput {
    pub grade: String,
    pub min_score: f64,
    pub max_score: f64,
    pub points: Option<f64>,
    pub remarks: Option<String>,
}

/// 创建评分体系请求
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/grading.ts")]
pub struct CreateGradingSystemRequest {
    pub school_id: i64,
    pub name: String,
    pub grading_type: GradingType,
    pub bands: Vec<GradeBandInput>,
    pub is_default: Option<bool>,
}

/// 整体替换等级区间
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/grading.ts")]
pub struct ReplaceGradeBandsRequest {
    pub bands: Vec<GradeBandInput>,
}

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/grading.ts")]
pub struct GradingSystemListQuery {
    pub school_id: i64,
}

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/grading.ts")]
pub struct ResolveGradeQuery {
    pub score: f64,
}
