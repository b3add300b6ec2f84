use std::collections::HashSet;

use super::AnalyticsService;
use crate::errors::{RecordsError, Result};
use crate::models::analytics::responses::ExamCompletion;
use crate::models::enrollments::entities::Enrollment;
use crate::models::exam_results::entities::ExamResult;

/// 只统计选修该课程的学生，退课学生遗留的成绩不计入
pub fn count_completion(
    exam_id: i64,
    enrollments: &[Enrollment],
    results: &[ExamResult],
) -> ExamCompletion {
    let enrolled: HashSet<i64> = enrollments.iter().map(|e| e.student_id).collect();
    let entered = results
        .iter()
        .filter(|r| r.exam_id == exam_id && enrolled.contains(&r.student_id))
        .count();

    ExamCompletion {
        exam_id,
        total_students: enrolled.len() as i64,
        results_entered: entered as i64,
    }
}

pub async fn exam_completion(service: &AnalyticsService, exam_id: i64) -> Result<ExamCompletion> {
    let storage = service.storage();

    let exam = storage
        .get_exam_by_id(exam_id)
        .await?
        .ok_or_else(|| RecordsError::not_found(format!("Exam not found with id {exam_id}")))?;

    let enrollments = storage.list_enrollments_by_subject(exam.subject_id).await?;
    let results = storage.list_results_by_exam(exam.id).await?;

    Ok(count_completion(exam.id, &enrollments, &results))
}
