use serde::Deserialize;
use ts_rs::TS;

// 单行成绩录入
//
// - 单一分数科目：填写 `score`
// - 理论/实践拆分科目：填写 `theory_score` 与 `practical_score`
// - 缺考：`is_absent = true`，分数字段忽略
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/result.ts")]
pub struct ResultEntry {
    pub student_id: i64,
    pub score: Option<f64>,
    pub theory_score: Option<f64>,
    pub practical_score: Option<f64>,
    #[serde(default)]
    pub is_absent: bool,
    pub remarks: Option<String>,
}

/// 批量导入某科成绩
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/result.ts")]
pub struct BulkImportResultsRequest {
    pub subject_id: i64,
    pub entered_by: Option<i64>,
    pub results: Vec<ResultEntry>,
}

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/result.ts")]
pub struct PaperResultEntry {
    pub student_id: i64,
    pub marks: Option<f64>,
    #[serde(default)]
    pub is_absent: bool,
}

/// 录入试卷成绩
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/result.ts")]
pub struct EnterPaperResultsRequest {
    pub entered_by: Option<i64>,
    pub results: Vec<PaperResultEntry>,
}

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/result.ts")]
pub struct ResultListQuery {
    pub subject_id: Option<i64>,
}

/// 审核成绩
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/result.ts")]
pub struct VerifyResultsRequest {
    pub subject_id: Option<i64>,
    pub verified_by: i64,
}
