//! SeaORM 实体定义
//!
//! 这些实体用于数据库操作，与 models 模块中的业务实体分离。
//! Storage 层使用这些实体进行 CRUD 操作，然后转换为 models 中的业务实体。

pub mod prelude;

pub mod exam_categories;
pub mod exam_classes;
pub mod exam_paper_results;
pub mod exam_papers;
pub mod exam_results;
pub mod exam_series;
pub mod exam_subjects;
pub mod exams;
pub mod grade_bands;
pub mod grading_systems;
pub mod school_classes;
pub mod schools;
pub mod streams;
pub mod student_term_summaries;
pub mod students;
pub mod subjects;
