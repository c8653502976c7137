/// 业务错误码
///
/// 0 表示成功；1xxx 为通用错误；2xxx 按资源划分；5xxx 为服务端错误。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ErrorCode {
    Success = 0,

    // 通用错误
    BadRequest = 1000,
    ValidationFailed = 1001,
    NotFound = 1004,
    Conflict = 1009,

    // 学校/名册
    SchoolNotFound = 2001,
    ClassNotFound = 2002,
    StreamNotFound = 2003,
    StudentNotFound = 2004,
    SubjectNotFound = 2005,

    // 评分体系
    GradingSystemNotFound = 2101,

    // 考试系列与考试
    ExamSeriesNotFound = 2201,
    ExamCategoryNotFound = 2202,
    ExamNotFound = 2203,
    ExamInvalidTransition = 2204,
    ExamNotEditable = 2205,

    // 试卷
    ExamPaperNotFound = 2301,
    ExamPaperDuplicate = 2302,

    // 成绩与汇总
    ResultEntryRejected = 2401,
    SummaryNotFound = 2501,

    InternalServerError = 5000,
}
