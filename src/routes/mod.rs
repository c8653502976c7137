pub mod exam_series;

pub mod exams;

pub mod grading;

pub mod results;

pub mod schools;

pub mod summaries;

pub use exam_series::configure_exam_series_routes;
pub use exams::configure_exams_routes;
pub use grading::configure_grading_routes;
pub use results::configure_results_routes;
pub use schools::configure_schools_routes;
pub use summaries::configure_summaries_routes;
