use tracing::info;

use super::SubjectService;
use crate::errors::Result;
use crate::models::subjects::requests::SubjectRequest;
use crate::models::subjects::responses::SubjectChangeResponse;
use crate::services::{ensure_positive_year, map_unique_violation};

pub async fn create_subject(
    service: &SubjectService,
    req: SubjectRequest,
) -> Result<SubjectChangeResponse> {
    ensure_positive_year(req.year)?;
    service.require_teacher(req.assigned_teacher_id).await?;

    let subject = service
        .storage()
        .create_subject(req)
        .await
        .map_err(|e| map_unique_violation(e, "Subject"))?;

    // 新课程加入该学年全部学生的选课
    let reconciled_students = service.roster().reconcile_year(subject.year).await?;

    info!(
        "Subject {} created for year {}, {} students enrolled",
        subject.code, subject.year, reconciled_students
    );
    Ok(SubjectChangeResponse {
        subject,
        reconciled_students,
    })
}

#[cfg(test)]
mod tests {
    use crate::models::subjects::requests::SubjectRequest;
    use crate::services::subjects::test_support::subject_service;
    use crate::storage::sea_orm_storage::testing::*;

    fn request(code: &str, year: i32, teacher: Option<i64>) -> SubjectRequest {
        SubjectRequest {
            code: code.to_string(),
            name: "Data Structures".to_string(),
            year,
            assigned_teacher_id: teacher,
        }
    }

    #[tokio::test]
    async fn test_create_enrolls_students_of_year() {
        let storage = memory_storage().await;
        let student = seed_student(&storage, "R001", 2).await;
        seed_student(&storage, "R002", 1).await;
        let service = subject_service(&storage);

        let created = service.create_subject(request("CS201", 2, None)).await.unwrap();

        assert_eq!(created.reconciled_students, 1);
        assert!(storage
            .get_enrollment(student.id, created.subject.id)
            .await
            .unwrap()
            .is_some());
    }

    #[tokio::test]
    async fn test_create_with_unknown_teacher() {
        let storage = memory_storage().await;
        let service = subject_service(&storage);

        let err = service
            .create_subject(request("CS201", 2, Some(99)))
            .await
            .unwrap_err();
        assert_eq!(err.code(), "E006");
        assert!(storage.list_subjects().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_duplicate_code() {
        let storage = memory_storage().await;
        seed_subject(&storage, "CS201", 2, None).await;
        let service = subject_service(&storage);

        let err = service
            .create_subject(request("CS201", 2, None))
            .await
            .unwrap_err();
        assert_eq!(err.code(), "E007");
    }
}
