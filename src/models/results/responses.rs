use super::entities::{ExamPaperResult, ExamResult};
use serde::Serialize;
use ts_rs::TS;

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/result.ts")]
pub struct ResultListResponse {
    pub items: Vec<ExamResult>,
}

/// 批量导入结果：返回该科目重新排名后的全部成绩
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/result.ts")]
pub struct BulkImportResponse {
    pub exam_id: i64,
    pub subject_id: i64,
    pub imported: usize,
    pub absent: usize,
    pub results: Vec<ExamResult>,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/result.ts")]
pub struct PaperResultsResponse {
    pub exam_paper_id: i64,
    pub paper_results: Vec<ExamPaperResult>,
    pub results: Vec<ExamResult>,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/result.ts")]
pub struct VerifyResultsResponse {
    pub verified: u64,
}
