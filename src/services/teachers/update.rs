use tracing::info;

use super::TeacherService;
use crate::errors::{RecordsError, Result};
use crate::models::teachers::requests::TeacherRequest;
use crate::models::teachers::responses::TeacherResponse;
use crate::services::map_unique_violation;

pub async fn update_teacher(
    service: &TeacherService,
    id: i64,
    req: TeacherRequest,
) -> Result<TeacherResponse> {
    let teacher = service
        .storage()
        .update_teacher(id, req)
        .await
        .map_err(|e| map_unique_violation(e, "Teacher"))?
        .ok_or_else(|| RecordsError::not_found(format!("Teacher not found with id {id}")))?;

    info!("Teacher {} updated", teacher.id);
    service.to_response(teacher).await
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crate::models::teachers::requests::TeacherRequest;
    use crate::services::TeacherService;
    use crate::storage::sea_orm_storage::testing::*;

    #[tokio::test]
    async fn test_update_teacher() {
        let storage = memory_storage().await;
        let teacher = seed_teacher(&storage, "Ada Lovelace").await;
        let subject = seed_subject(&storage, "CS101", 1, Some(teacher.id)).await;
        let service = TeacherService::new(Arc::clone(&storage));

        let updated = service
            .update_teacher(
                teacher.id,
                TeacherRequest {
                    name: "Ada King".to_string(),
                    email: "ada.king@college.test".to_string(),
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.teacher.name, "Ada King");
        assert_eq!(updated.subject_ids, vec![subject.id]);
    }

    #[tokio::test]
    async fn test_update_unknown_teacher() {
        let storage = memory_storage().await;
        let service = TeacherService::new(storage);

        let err = service
            .update_teacher(
                7,
                TeacherRequest {
                    name: "Nobody".to_string(),
                    email: "nobody@college.test".to_string(),
                },
            )
            .await
            .unwrap_err();
        assert_eq!(err.code(), "E006");
    }
}
