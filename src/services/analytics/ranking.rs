use std::collections::HashMap;

use super::AnalyticsService;
use super::metrics::summarize;
use super::reports::student_row;
use crate::errors::Result;
use crate::models::analytics::responses::StudentPerformance;
use crate::models::exam_results::entities::ExamResult;

/// 按平均分降序排列并截断，平均分相同时按学号升序
pub fn rank(mut rows: Vec<StudentPerformance>, limit: usize) -> Vec<StudentPerformance> {
    rows.sort_by(|a, b| {
        b.average_marks
            .total_cmp(&a.average_marks)
            .then_with(|| a.roll_no.cmp(&b.roll_no))
    });
    rows.truncate(limit);
    rows
}

pub async fn top_students(
    service: &AnalyticsService,
    limit: usize,
    year: Option<i32>,
) -> Result<Vec<StudentPerformance>> {
    let storage = service.storage();

    let students = match year {
        Some(year) => storage.list_students_by_year(year).await?,
        None => storage.list_students().await?,
    };

    let exam_ids: Vec<i64> = storage.list_exams().await?.iter().map(|e| e.id).collect();
    let mut by_student: HashMap<i64, Vec<ExamResult>> = HashMap::new();
    for result in storage.list_results_by_exams(&exam_ids).await? {
        by_student.entry(result.student_id).or_default().push(result);
    }

    let rows = students
        .iter()
        .map(|student| {
            let metrics = by_student
                .get(&student.id)
                .map(|results| summarize(results))
                .unwrap_or_default();
            student_row(student, &metrics)
        })
        .collect();

    Ok(rank(rows, limit))
}
