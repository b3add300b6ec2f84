pub mod analytics;
pub mod enrollments;
pub mod exam_results;
pub mod exams;
pub mod students;
pub mod subjects;
pub mod teachers;
