use tracing::info;

use super::StudentService;
use crate::errors::{RecordsError, Result};
use crate::models::students::requests::UpdateStudentRequest;
use crate::models::students::responses::StudentResponse;
use crate::services::{ensure_positive_year, map_unique_violation};

pub async fn update_student(
    service: &StudentService,
    roll_no: &str,
    req: UpdateStudentRequest,
) -> Result<StudentResponse> {
    ensure_positive_year(req.year)?;

    let storage = service.storage();
    let existing = service.require_student(roll_no).await?;

    // 学号变更时不能与其他学生冲突
    if req.roll_no != existing.roll_no {
        if let Some(other) = storage.get_student_by_roll_no(&req.roll_no).await? {
            if other.id != existing.id {
                return Err(RecordsError::conflict(format!(
                    "Student with rollNo {} already exists",
                    req.roll_no
                )));
            }
        }
    }

    let explicit = req.subject_ids.clone().unwrap_or_default();
    service.require_subjects(&explicit).await?;

    let student = storage
        .update_student(existing.id, req)
        .await
        .map_err(|e| map_unique_violation(e, "Student"))?
        .ok_or_else(|| RecordsError::not_found(format!("Student not found with rollNo {roll_no}")))?;

    let delta = service
        .roster()
        .reconcile_enrollments(&student, &explicit)
        .await?;

    info!(
        "Student {} updated (year {} -> {}), enrollments +{} -{}",
        student.roll_no, existing.year, student.year, delta.added, delta.removed
    );
    service.to_response(student).await
}

#[cfg(test)]
mod tests {
    use crate::models::students::requests::UpdateStudentRequest;
    use crate::services::students::test_support::student_service;
    use crate::storage::sea_orm_storage::testing::*;

    fn request(roll_no: &str, year: i32) -> UpdateStudentRequest {
        UpdateStudentRequest {
            roll_no: roll_no.to_string(),
            name: "Grace Hopper".to_string(),
            email: format!("{}@college.test", roll_no.to_lowercase()),
            department: "CSE".to_string(),
            year,
            subject_ids: None,
        }
    }

    #[tokio::test]
    async fn test_year_change_resyncs_enrollments() {
        let storage = memory_storage().await;
        seed_subject(&storage, "CS101", 1, None).await;
        let s2 = seed_subject(&storage, "CS201", 2, None).await;
        let s3 = seed_subject(&storage, "CS202", 2, None).await;
        seed_student(&storage, "R001", 1).await;
        let service = student_service(&storage);

        let updated = service.update_student("R001", request("R001", 2)).await.unwrap();

        assert_eq!(updated.student.year, 2);
        let mut ids = updated.subject_ids.clone();
        ids.sort();
        assert_eq!(ids, vec![s2.id, s3.id]);
    }

    #[tokio::test]
    async fn test_update_unknown_student() {
        let storage = memory_storage().await;
        let service = student_service(&storage);

        let err = service
            .update_student("R404", request("R404", 1))
            .await
            .unwrap_err();
        assert_eq!(err.code(), "E006");
    }

    #[tokio::test]
    async fn test_update_rejects_taken_roll_no() {
        let storage = memory_storage().await;
        seed_student(&storage, "R001", 1).await;
        seed_student(&storage, "R002", 1).await;
        let service = student_service(&storage);

        let mut req = request("R002", 1);
        req.email = "r001@college.test".to_string();
        let err = service.update_student("R001", req).await.unwrap_err();
        assert_eq!(err.code(), "E007");
    }

    #[tokio::test]
    async fn test_update_keeps_results_after_unenrollment() {
        let storage = memory_storage().await;
        let subject = seed_subject(&storage, "CS101", 1, None).await;
        let student = seed_student(&storage, "R001", 1).await;
        seed_enrollment(&storage, &student, &subject).await;
        let exam = seed_exam(&storage, &subject, 20).await;
        seed_result(&storage, &exam, &student, Some(15)).await;
        let service = student_service(&storage);

        let updated = service.update_student("R001", request("R001", 2)).await.unwrap();

        assert!(updated.subject_ids.is_empty());
        assert_eq!(
            storage.list_results_by_student(student.id).await.unwrap().len(),
            1
        );
    }
}
