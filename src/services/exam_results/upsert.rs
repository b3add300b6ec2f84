use tracing::{info, warn};

use super::ExamResultService;
use crate::errors::{RecordsError, Result};
use crate::models::exam_results::entities::ExamResult;
use crate::models::exam_results::requests::UpsertResultRequest;
use crate::models::exam_results::responses::{BulkUpsertFailure, BulkUpsertOutcome};
use crate::models::students::entities::Student;

/// 学号优先，学号为空时按 ID 查找
async fn resolve_student(
    service: &ExamResultService,
    req: &UpsertResultRequest,
) -> Result<Student> {
    let storage = service.storage();

    match (req.student_roll_no.as_deref().map(str::trim), req.student_id) {
        (Some(roll_no), _) if !roll_no.is_empty() => storage
            .get_student_by_roll_no(roll_no)
            .await?
            .ok_or_else(|| RecordsError::not_found(format!("Student not found with rollNo {roll_no}"))),
        (_, Some(id)) => storage
            .get_student_by_id(id)
            .await?
            .ok_or_else(|| RecordsError::not_found(format!("Student not found with id {id}"))),
        _ => Err(RecordsError::validation(
            "Either student roll number or student id is required",
        )),
    }
}

fn validate_marks(marks: Option<i32>, max_marks: i32) -> Result<()> {
    match marks {
        Some(m) if m < 0 => Err(RecordsError::validation(format!(
            "Marks obtained ({m}) cannot be negative"
        ))),
        Some(m) if m > max_marks => Err(RecordsError::validation(format!(
            "Marks obtained ({m}) cannot exceed max marks ({max_marks})"
        ))),
        _ => Ok(()),
    }
}

pub async fn upsert_result(
    service: &ExamResultService,
    req: UpsertResultRequest,
) -> Result<ExamResult> {
    let storage = service.storage();

    let exam = storage
        .get_exam_by_id(req.exam_id)
        .await?
        .ok_or_else(|| RecordsError::not_found(format!("Exam not found with id {}", req.exam_id)))?;
    let student = resolve_student(service, &req).await?;

    validate_marks(req.marks_obtained, exam.max_marks)?;

    let result = match storage.get_result(exam.id, student.id).await? {
        Some(existing) => storage
            .update_result_marks(existing.id, req.marks_obtained)
            .await?
            .ok_or_else(|| RecordsError::not_found(format!("Result not found with id {}", existing.id)))?,
        None => {
            storage
                .create_result(exam.id, student.id, req.marks_obtained)
                .await?
        }
    };

    info!(
        "Result for student {} in exam {} set to {:?}/{}",
        student.roll_no, exam.id, result.marks_obtained, exam.max_marks
    );
    Ok(result)
}

pub async fn upsert_results_bulk(
    service: &ExamResultService,
    items: Vec<UpsertResultRequest>,
) -> BulkUpsertOutcome {
    let mut outcome = BulkUpsertOutcome::default();

    for (index, item) in items.into_iter().enumerate() {
        match upsert_result(service, item).await {
            Ok(_) => outcome.applied += 1,
            Err(e) => {
                warn!("Bulk result item {} rejected: {}", index, e);
                outcome.failed.push(BulkUpsertFailure {
                    index,
                    code: e.code(),
                    message: e.message().to_string(),
                });
            }
        }
    }

    outcome
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crate::models::exam_results::requests::UpsertResultRequest;
    use crate::services::ExamResultService;
    use crate::storage::sea_orm_storage::testing::*;

    fn by_roll(exam_id: i64, roll_no: &str, marks: Option<i32>) -> UpsertResultRequest {
        UpsertResultRequest {
            exam_id,
            student_roll_no: Some(roll_no.to_string()),
            student_id: None,
            marks_obtained: marks,
        }
    }

    #[tokio::test]
    async fn test_first_write_inserts_then_updates() {
        let storage = memory_storage().await;
        let subject = seed_subject(&storage, "CS101", 1, None).await;
        let student = seed_student(&storage, "R001", 1).await;
        let exam = seed_exam(&storage, &subject, 20).await;
        let service = ExamResultService::new(Arc::clone(&storage));

        let first = service.upsert_result(by_roll(exam.id, "R001", Some(12))).await.unwrap();
        let second = service
            .upsert_result(UpsertResultRequest {
                exam_id: exam.id,
                student_roll_no: Some("  ".to_string()),
                student_id: Some(student.id),
                marks_obtained: Some(18),
            })
            .await
            .unwrap();

        assert_eq!(first.id, second.id);
        assert_eq!(second.marks_obtained, Some(18));
        assert_eq!(storage.list_results_by_exam(exam.id).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_marks_exceeding_max_are_not_persisted() {
        let storage = memory_storage().await;
        let subject = seed_subject(&storage, "CS101", 1, None).await;
        seed_student(&storage, "R001", 1).await;
        let exam = seed_exam(&storage, &subject, 20).await;
        let service = ExamResultService::new(Arc::clone(&storage));

        let err = service
            .upsert_result(by_roll(exam.id, "R001", Some(25)))
            .await
            .unwrap_err();
        assert_eq!(err.code(), "E005");
        assert!(err.message().contains("cannot exceed max marks (20)"));

        let err = service
            .upsert_result(by_roll(exam.id, "R001", Some(-1)))
            .await
            .unwrap_err();
        assert_eq!(err.code(), "E005");

        assert!(storage.list_results_by_exam(exam.id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_existing_result_survives_rejected_update() {
        let storage = memory_storage().await;
        let subject = seed_subject(&storage, "CS101", 1, None).await;
        seed_student(&storage, "R001", 1).await;
        let exam = seed_exam(&storage, &subject, 20).await;
        let service = ExamResultService::new(Arc::clone(&storage));
        service.upsert_result(by_roll(exam.id, "R001", Some(14))).await.unwrap();

        assert!(service.upsert_result(by_roll(exam.id, "R001", Some(21))).await.is_err());

        let results = storage.list_results_by_exam(exam.id).await.unwrap();
        assert_eq!(results[0].marks_obtained, Some(14));
    }

    #[tokio::test]
    async fn test_unknown_references() {
        let storage = memory_storage().await;
        let subject = seed_subject(&storage, "CS101", 1, None).await;
        let exam = seed_exam(&storage, &subject, 20).await;
        let service = ExamResultService::new(Arc::clone(&storage));

        let err = service.upsert_result(by_roll(404, "R001", Some(1))).await.unwrap_err();
        assert_eq!(err.code(), "E006");
        let err = service.upsert_result(by_roll(exam.id, "R404", Some(1))).await.unwrap_err();
        assert_eq!(err.code(), "E006");

        let err = service
            .upsert_result(UpsertResultRequest {
                exam_id: exam.id,
                student_roll_no: None,
                student_id: None,
                marks_obtained: Some(1),
            })
            .await
            .unwrap_err();
        assert_eq!(err.code(), "E005");
    }

    #[tokio::test]
    async fn test_bulk_applies_items_independently() {
        let storage = memory_storage().await;
        let subject = seed_subject(&storage, "CS101", 1, None).await;
        seed_student(&storage, "R001", 1).await;
        seed_student(&storage, "R002", 1).await;
        let exam = seed_exam(&storage, &subject, 20).await;
        let service = ExamResultService::new(Arc::clone(&storage));

        let outcome = service
            .upsert_results_bulk(vec![
                by_roll(exam.id, "R001", Some(15)),
                by_roll(exam.id, "R002", Some(30)),
                by_roll(exam.id, "R404", Some(10)),
                by_roll(exam.id, "R002", None),
            ])
            .await;

        assert_eq!(outcome.applied, 2);
        let failed: Vec<(usize, &str)> = outcome.failed.iter().map(|f| (f.index, f.code)).collect();
        assert_eq!(failed, vec![(1, "E005"), (2, "E006")]);
        assert_eq!(storage.list_results_by_exam(exam.id).await.unwrap().len(), 2);
    }
}
