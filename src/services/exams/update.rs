use tracing::info;

use super::{ExamService, detail};
use crate::errors::{RecordsError, Result};
use crate::models::exams::requests::ExamRequest;
use crate::models::exams::responses::ExamResponse;

pub async fn update_exam(service: &ExamService, id: i64, req: ExamRequest) -> Result<ExamResponse> {
    let existing = service.require_exam(id).await?;

    let mut draft = req.into_draft()?;
    service.require_subject(draft.subject_id).await?;

    // 满分不能低于已录入的成绩
    let highest = service
        .storage()
        .list_results_by_exam(id)
        .await?
        .into_iter()
        .filter_map(|r| r.marks_obtained)
        .max();
    if let Some(highest) = highest.filter(|&m| m > draft.max_marks) {
        return Err(RecordsError::validation(format!(
            "Max marks ({}) cannot be below recorded marks ({highest})",
            draft.max_marks
        )));
    }

    // 未提供日期时保留原日期
    if draft.exam_date.is_none() {
        draft.exam_date = existing.exam_date;
    }

    let exam = service
        .storage()
        .update_exam(id, draft)
        .await?
        .ok_or_else(|| RecordsError::not_found(format!("Exam not found with id {id}")))?;

    info!("Exam {} updated", exam.id);
    detail::build_response(service, exam).await
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crate::services::ExamService;
    use crate::services::exams::test_support::exam_request;
    use crate::storage::sea_orm_storage::testing::*;

    #[tokio::test]
    async fn test_update_keeps_date_when_omitted() {
        let storage = memory_storage().await;
        let subject = seed_subject(&storage, "CS101", 1, None).await;
        let service = ExamService::new(Arc::clone(&storage));
        let created = service
            .create_exam(exam_request(subject.id, 20, Some("2025-03-14")))
            .await
            .unwrap();

        let mut req = exam_request(subject.id, 50, Some(""));
        req.name = "Internal 1".to_string();
        let updated = service.update_exam(created.exam.id, req).await.unwrap();

        assert_eq!(updated.exam.name, "Internal 1");
        assert_eq!(updated.exam.max_marks, 50);
        assert_eq!(updated.exam.exam_date, created.exam.exam_date);
    }

    #[tokio::test]
    async fn test_update_unknown_exam() {
        let storage = memory_storage().await;
        let subject = seed_subject(&storage, "CS101", 1, None).await;
        let service = ExamService::new(Arc::clone(&storage));

        let err = service
            .update_exam(404, exam_request(subject.id, 20, None))
            .await
            .unwrap_err();
        assert_eq!(err.code(), "E006");
    }

    #[tokio::test]
    async fn test_update_rejects_max_below_recorded_marks() {
        let storage = memory_storage().await;
        let subject = seed_subject(&storage, "CS101", 1, None).await;
        let student = seed_student(&storage, "R001", 1).await;
        let exam = seed_exam(&storage, &subject, 100).await;
        seed_result(&storage, &exam, &student, Some(90)).await;
        let service = ExamService::new(Arc::clone(&storage));

        let err = service
            .update_exam(exam.id, exam_request(subject.id, 20, None))
            .await
            .unwrap_err();
        assert_eq!(err.code(), "E005");
        let stored = storage.get_exam_by_id(exam.id).await.unwrap().unwrap();
        assert_eq!(stored.max_marks, 100);

        // 不低于最高分的调整仍然允许
        let updated = service
            .update_exam(exam.id, exam_request(subject.id, 90, None))
            .await
            .unwrap();
        assert_eq!(updated.exam.max_marks, 90);
    }
}
