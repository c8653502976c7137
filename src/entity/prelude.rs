//! 预导入模块，方便使用

pub use super::exam_categories::{
    ActiveModel as ExamCategoryActiveModel, Entity as ExamCategories, Model as ExamCategoryModel,
};
pub use super::exam_classes::{
    ActiveModel as ExamClassActiveModel, Entity as ExamClasses, Model as ExamClassModel,
};
pub use super::exam_paper_results::{
    ActiveModel as ExamPaperResultActiveModel, Entity as ExamPaperResults,
    Model as ExamPaperResultModel,
};
pub use super::exam_papers::{
    ActiveModel as ExamPaperActiveModel, Entity as ExamPapers, Model as ExamPaperModel,
};
pub use super::exam_results::{
    ActiveModel as ExamResultActiveModel, Entity as ExamResults, Model as ExamResultModel,
};
pub use super::exam_series::{
    ActiveModel as ExamSeriesActiveModel, Entity as ExamSeries, Model as ExamSeriesModel,
};
pub use super::exam_subjects::{
    ActiveModel as ExamSubjectActiveModel, Entity as ExamSubjects, Model as ExamSubjectModel,
};
pub use super::exams::{ActiveModel as ExamActiveModel, Entity as Exams, Model as ExamModel};
pub use super::grade_bands::{
    ActiveModel as GradeBandActiveModel, Entity as GradeBands, Model as GradeBandModel,
};
pub use super::grading_systems::{
    ActiveModel as GradingSystemActiveModel, Entity as GradingSystems, Model as GradingSystemModel,
};
pub use super::school_classes::{
    ActiveModel as SchoolClassActiveModel, Entity as SchoolClasses, Model as SchoolClassModel,
};
pub use super::schools::{ActiveModel as SchoolActiveModel, Entity as Schools, Model as SchoolModel};
pub use super::streams::{ActiveModel as StreamActiveModel, Entity as Streams, Model as StreamModel};
pub use super::student_term_summaries::{
    ActiveModel as StudentTermSummaryActiveModel, Entity as StudentTermSummaries,
    Model as StudentTermSummaryModel,
};
pub use super::students::{
    ActiveModel as StudentActiveModel, Entity as Students, Model as StudentModel,
};
pub use super::subjects::{
    ActiveModel as SubjectActiveModel, Entity as Subjects, Model as SubjectModel,
};
