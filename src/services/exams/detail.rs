use super::ExamService;
use crate::errors::Result;
use crate::models::exams::entities::Exam;
use crate::models::exams::responses::ExamResponse;
use crate::services::analytics::completion::count_completion;

/// 组装考试详情：课程、负责教师与录入进度
pub async fn build_response(service: &ExamService, exam: Exam) -> Result<ExamResponse> {
    let storage = service.storage();

    let subject = service.require_subject(exam.subject_id).await?;
    let teacher = match subject.assigned_teacher_id {
        Some(id) => storage.get_teacher_by_id(id).await?,
        None => None,
    };

    let enrollments = storage.list_enrollments_by_subject(subject.id).await?;
    let results = storage.list_results_by_exam(exam.id).await?;
    let completion = count_completion(exam.id, &enrollments, &results);

    Ok(ExamResponse {
        subject_name: subject.name,
        subject_code: subject.code,
        assigned_teacher_id: teacher.as_ref().map(|t| t.id),
        assigned_teacher_name: teacher.map(|t| t.name),
        total_students: completion.total_students,
        results_entered: completion.results_entered,
        exam,
    })
}
