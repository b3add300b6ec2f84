use super::{ExamService, detail};
use crate::errors::{RecordsError, Result};
use crate::models::exams::entities::Exam;
use crate::models::exams::responses::ExamResponse;

async fn build_all(service: &ExamService, exams: Vec<Exam>) -> Result<Vec<ExamResponse>> {
    let mut responses = Vec::with_capacity(exams.len());
    for exam in exams {
        responses.push(detail::build_response(service, exam).await?);
    }
    Ok(responses)
}

pub async fn list_exams(service: &ExamService) -> Result<Vec<ExamResponse>> {
    let exams = service.storage().list_exams().await?;
    build_all(service, exams).await
}

pub async fn list_exams_by_teacher(
    service: &ExamService,
    teacher_id: i64,
) -> Result<Vec<ExamResponse>> {
    let storage = service.storage();

    if storage.get_teacher_by_id(teacher_id).await?.is_none() {
        return Err(RecordsError::not_found(format!(
            "Teacher not found with id {teacher_id}"
        )));
    }

    let subject_ids: Vec<i64> = storage
        .list_subjects_by_teacher(teacher_id)
        .await?
        .into_iter()
        .map(|s| s.id)
        .collect();
    let exams = storage.list_exams_by_subjects(&subject_ids).await?;
    build_all(service, exams).await
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crate::services::ExamService;
    use crate::storage::sea_orm_storage::testing::*;

    #[tokio::test]
    async fn test_list_exams_by_teacher() {
        let storage = memory_storage().await;
        let teacher = seed_teacher(&storage, "Ada Lovelace").await;
        let idle = seed_teacher(&storage, "Alan Turing").await;
        let mine = seed_subject(&storage, "CS101", 1, Some(teacher.id)).await;
        let other = seed_subject(&storage, "CS102", 1, None).await;
        let exam = seed_exam(&storage, &mine, 20).await;
        seed_exam(&storage, &other, 20).await;
        let service = ExamService::new(Arc::clone(&storage));

        let exams = service.list_exams_by_teacher(teacher.id).await.unwrap();
        assert_eq!(exams.len(), 1);
        assert_eq!(exams[0].exam.id, exam.id);

        assert!(service.list_exams_by_teacher(idle.id).await.unwrap().is_empty());
        assert_eq!(
            service.list_exams_by_teacher(404).await.unwrap_err().code(),
            "E006"
        );
        assert_eq!(service.list_exams().await.unwrap().len(), 2);
    }
}
