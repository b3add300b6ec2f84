use tracing::info;

use super::TeacherService;
use crate::errors::Result;
use crate::models::teachers::requests::TeacherRequest;
use crate::models::teachers::responses::TeacherResponse;
use crate::services::map_unique_violation;

pub async fn create_teacher(
    service: &TeacherService,
    req: TeacherRequest,
) -> Result<TeacherResponse> {
    let teacher = service
        .storage()
        .create_teacher(req)
        .await
        .map_err(|e| map_unique_violation(e, "Teacher"))?;

    info!("Teacher {} ({}) created", teacher.name, teacher.id);
    service.to_response(teacher).await
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crate::models::teachers::requests::TeacherRequest;
    use crate::services::TeacherService;
    use crate::storage::sea_orm_storage::testing::*;

    #[tokio::test]
    async fn test_create_teacher_rejects_duplicate_email() {
        let storage = memory_storage().await;
        let service = TeacherService::new(Arc::clone(&storage));
        let req = TeacherRequest {
            name: "Ada Lovelace".to_string(),
            email: "ada@college.test".to_string(),
        };

        let created = service.create_teacher(req.clone()).await.unwrap();
        assert!(created.subject_ids.is_empty());

        let err = service.create_teacher(req).await.unwrap_err();
        assert_eq!(err.code(), "E007");
    }
}
