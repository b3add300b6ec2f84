use tracing::info;

use super::SubjectService;
use crate::errors::{RecordsError, Result};
use crate::models::subjects::requests::SubjectRequest;
use crate::models::subjects::responses::SubjectChangeResponse;
use crate::services::{ensure_positive_year, map_unique_violation};

pub async fn update_subject(
    service: &SubjectService,
    id: i64,
    req: SubjectRequest,
) -> Result<SubjectChangeResponse> {
    ensure_positive_year(req.year)?;

    let existing = service.require_subject(id).await?;
    service.require_teacher(req.assigned_teacher_id).await?;

    let subject = service
        .storage()
        .update_subject(id, req)
        .await
        .map_err(|e| map_unique_violation(e, "Subject"))?
        .ok_or_else(|| RecordsError::not_found(format!("Subject not found with id {id}")))?;

    // 学年变化时新旧两个学年都需要重新同步
    let mut reconciled_students = 0;
    if subject.year != existing.year {
        reconciled_students += service.roster().reconcile_year(existing.year).await?;
        reconciled_students += service.roster().reconcile_year(subject.year).await?;
    }

    info!(
        "Subject {} updated, {} students reconciled",
        subject.code, reconciled_students
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

    #[tokio::test]
    async fn test_year_change_moves_subject_between_cohorts() {
        let storage = memory_storage().await;
        let first_year = seed_student(&storage, "R001", 1).await;
        let second_year = seed_student(&storage, "R002", 2).await;
        let subject = seed_subject(&storage, "CS101", 1, None).await;
        seed_enrollment(&storage, &first_year, &subject).await;
        let service = subject_service(&storage);

        let updated = service
            .update_subject(
                subject.id,
                SubjectRequest {
                    code: "CS101".to_string(),
                    name: "Programming".to_string(),
                    year: 2,
                    assigned_teacher_id: None,
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.reconciled_students, 2);
        assert!(storage
            .get_enrollment(first_year.id, subject.id)
            .await
            .unwrap()
            .is_none());
        assert!(storage
            .get_enrollment(second_year.id, subject.id)
            .await
            .unwrap()
            .is_some());
    }

    #[tokio::test]
    async fn test_update_clears_teacher() {
        let storage = memory_storage().await;
        let teacher = seed_teacher(&storage, "Ada Lovelace").await;
        let subject = seed_subject(&storage, "CS101", 1, Some(teacher.id)).await;
        let service = subject_service(&storage);

        let updated = service
            .update_subject(
                subject.id,
                SubjectRequest {
                    code: "CS101".to_string(),
                    name: subject.name.clone(),
                    year: 1,
                    assigned_teacher_id: None,
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.subject.assigned_teacher_id, None);
        assert_eq!(updated.reconciled_students, 0);
    }
}
