use std::collections::HashMap;

use super::AnalyticsService;
use super::metrics::{Metrics, summarize};
use crate::errors::{RecordsError, Result};
use crate::models::analytics::responses::{
    StudentPerformance, SubjectPerformance, TeacherPerformance,
};
use crate::models::exam_results::entities::ExamResult;
use crate::models::students::entities::Student;

pub(crate) fn student_row(student: &Student, metrics: &Metrics) -> StudentPerformance {
    StudentPerformance {
        student_id: student.id,
        roll_no: student.roll_no.clone(),
        name: student.name.clone(),
        average_marks: metrics.average,
        pass_percentage: metrics.pass_rate,
        year: student.year,
    }
}

pub async fn student_performance(
    service: &AnalyticsService,
    roll_no: &str,
) -> Result<StudentPerformance> {
    let storage = service.storage();

    let student = storage
        .get_student_by_roll_no(roll_no)
        .await?
        .ok_or_else(|| RecordsError::not_found(format!("Student not found with rollNo {roll_no}")))?;

    let results = storage.list_results_by_student(student.id).await?;
    Ok(student_row(&student, &summarize(&results)))
}

/// 课程 ID -> 该课程所有考试的成绩
async fn results_by_subject(service: &AnalyticsService) -> Result<HashMap<i64, Vec<ExamResult>>> {
    let storage = service.storage();

    let exams = storage.list_exams().await?;
    let exam_subject: HashMap<i64, i64> = exams.iter().map(|e| (e.id, e.subject_id)).collect();
    let exam_ids: Vec<i64> = exams.iter().map(|e| e.id).collect();

    let mut grouped: HashMap<i64, Vec<ExamResult>> = HashMap::new();
    for result in storage.list_results_by_exams(&exam_ids).await? {
        if let Some(subject_id) = exam_subject.get(&result.exam_id) {
            grouped.entry(*subject_id).or_default().push(result);
        }
    }
    Ok(grouped)
}

pub async fn subject_performance_report(
    service: &AnalyticsService,
) -> Result<Vec<SubjectPerformance>> {
    let subjects = service.storage().list_subjects().await?;
    let grouped = results_by_subject(service).await?;

    Ok(subjects
        .into_iter()
        .map(|subject| {
            let metrics = grouped
                .get(&subject.id)
                .map(|results| summarize(results))
                .unwrap_or_default();
            SubjectPerformance {
                subject_id: subject.id,
                subject_name: subject.name,
                average_marks: metrics.average,
                pass_percentage: metrics.pass_rate,
                distinction_count: metrics.distinction_count,
            }
        })
        .collect())
}

pub async fn teacher_performance_report(
    service: &AnalyticsService,
) -> Result<Vec<TeacherPerformance>> {
    let storage = service.storage();

    let teachers = storage.list_teachers().await?;
    let subjects = storage.list_subjects().await?;
    let grouped = results_by_subject(service).await?;

    Ok(teachers
        .into_iter()
        .map(|teacher| {
            let metrics = summarize(
                subjects
                    .iter()
                    .filter(|s| s.assigned_teacher_id == Some(teacher.id))
                    .filter_map(|s| grouped.get(&s.id))
                    .flatten(),
            );
            TeacherPerformance {
                teacher_id: teacher.id,
                teacher_name: teacher.name,
                average_marks: metrics.average,
                pass_percentage: metrics.pass_rate,
                distinction_count: metrics.distinction_count,
                performance_score: metrics.performance_score(),
            }
        })
        .collect())
}
