use tracing::info;

use super::SubjectService;
use crate::errors::{RecordsError, Result};
use crate::models::subjects::entities::Subject;

pub async fn assign_teacher(
    service: &SubjectService,
    subject_id: i64,
    teacher_id: Option<i64>,
) -> Result<Subject> {
    service.require_teacher(teacher_id).await?;

    let subject = service
        .storage()
        .assign_teacher(subject_id, teacher_id)
        .await?
        .ok_or_else(|| RecordsError::not_found(format!("Subject not found with id {subject_id}")))?;

    info!("Subject {} assigned to teacher {:?}", subject.code, teacher_id);
    Ok(subject)
}

#[cfg(test)]
mod tests {
    use crate::services::subjects::test_support::subject_service;
    use crate::storage::sea_orm_storage::testing::*;

    #[tokio::test]
    async fn test_assign_and_unassign() {
        let storage = memory_storage().await;
        let teacher = seed_teacher(&storage, "Ada Lovelace").await;
        let subject = seed_subject(&storage, "CS101", 1, None).await;
        let service = subject_service(&storage);

        let assigned = service.assign_teacher(subject.id, Some(teacher.id)).await.unwrap();
        assert_eq!(assigned.assigned_teacher_id, Some(teacher.id));

        let cleared = service.assign_teacher(subject.id, None).await.unwrap();
        assert_eq!(cleared.assigned_teacher_id, None);
    }

    #[tokio::test]
    async fn test_assign_unknown_ids() {
        let storage = memory_storage().await;
        let teacher = seed_teacher(&storage, "Ada Lovelace").await;
        let subject = seed_subject(&storage, "CS101", 1, None).await;
        let service = subject_service(&storage);

        let err = service.assign_teacher(subject.id, Some(404)).await.unwrap_err();
        assert_eq!(err.code(), "E006");
        let err = service.assign_teacher(404, Some(teacher.id)).await.unwrap_err();
        assert_eq!(err.code(), "E006");
    }
}
