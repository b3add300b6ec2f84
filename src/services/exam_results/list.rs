use std::collections::HashMap;

use super::ExamResultService;
use crate::errors::{RecordsError, Result};
use crate::models::exam_results::entities::ExamResult;
use crate::models::exam_results::responses::{ExamStudentEntry, StudentResultEntry};
use crate::models::exams::entities::Exam;
use crate::models::subjects::entities::Subject;

pub async fn exam_students(
    service: &ExamResultService,
    exam_id: i64,
) -> Result<Vec<ExamStudentEntry>> {
    let storage = service.storage();

    let exam = storage
        .get_exam_by_id(exam_id)
        .await?
        .ok_or_else(|| RecordsError::not_found(format!("Exam not found with id {exam_id}")))?;
    let subject = storage
        .get_subject_by_id(exam.subject_id)
        .await?
        .ok_or_else(|| RecordsError::not_found(format!("Subject not found with id {}", exam.subject_id)))?;

    let results: HashMap<i64, ExamResult> = storage
        .list_results_by_exam(exam.id)
        .await?
        .into_iter()
        .map(|r| (r.student_id, r))
        .collect();

    // 只列出选修该课程的学生
    let mut entries = Vec::new();
    for enrollment in storage.list_enrollments_by_subject(subject.id).await? {
        let Some(student) = storage.get_student_by_id(enrollment.student_id).await? else {
            continue;
        };
        let result = results.get(&student.id);
        entries.push(ExamStudentEntry {
            result_id: result.map(|r| r.id),
            exam_id: exam.id,
            exam_name: exam.name.clone(),
            exam_type: exam.exam_type.clone(),
            subject_name: subject.name.clone(),
            student_id: student.id,
            student_roll_no: student.roll_no,
            student_name: student.name,
            student_email: student.email,
            marks_obtained: result.and_then(|r| r.marks_obtained),
            max_marks: exam.max_marks,
        });
    }

    entries.sort_by(|a, b| a.student_roll_no.cmp(&b.student_roll_no));
    Ok(entries)
}

pub async fn student_results(
    service: &ExamResultService,
    roll_no: &str,
) -> Result<Vec<StudentResultEntry>> {
    let storage = service.storage();

    let student = storage
        .get_student_by_roll_no(roll_no)
        .await?
        .ok_or_else(|| RecordsError::not_found(format!("Student not found with rollNo {roll_no}")))?;

    let mut exams: HashMap<i64, Exam> = HashMap::new();
    let mut subjects: HashMap<i64, Subject> = HashMap::new();
    let mut entries = Vec::new();

    for result in storage.list_results_by_student(student.id).await? {
        if !exams.contains_key(&result.exam_id) {
            let Some(exam) = storage.get_exam_by_id(result.exam_id).await? else {
                continue;
            };
            exams.insert(exam.id, exam);
        }
        let Some(exam) = exams.get(&result.exam_id) else {
            continue;
        };

        if !subjects.contains_key(&exam.subject_id) {
            let Some(subject) = storage.get_subject_by_id(exam.subject_id).await? else {
                continue;
            };
            subjects.insert(subject.id, subject);
        }
        let Some(subject) = subjects.get(&exam.subject_id) else {
            continue;
        };

        entries.push(StudentResultEntry {
            result_id: result.id,
            exam_id: exam.id,
            exam_name: exam.name.clone(),
            exam_type: exam.exam_type.clone(),
            subject_name: subject.name.clone(),
            subject_code: subject.code.clone(),
            marks_obtained: result.marks_obtained,
            max_marks: result.max_marks,
        });
    }

    Ok(entries)
}
