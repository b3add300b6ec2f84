use serde::Serialize;

use super::entities::Exam;

/// 考试详情
///
/// `total_students` 与 `results_entered` 只统计选修该课程的学生。
#[derive(Debug, Clone, Serialize)]
pub struct ExamResponse {
    #[serde(flatten)]
    pub exam: Exam,
    pub subject_name: String,
    pub subject_code: String,
    pub assigned_teacher_id: Option<i64>,
    pub assigned_teacher_name: Option<String>,
    pub total_students: i64,
    pub results_entered: i64,
}
