use tracing::info;

use super::TeacherService;
use crate::errors::{RecordsError, Result};

pub async fn delete_teacher(service: &TeacherService, id: i64) -> Result<()> {
    if !service.storage().delete_teacher(id).await? {
        return Err(RecordsError::not_found(format!("Teacher not found with id {id}")));
    }

    info!("Teacher {} deleted", id);
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crate::services::TeacherService;
    use crate::storage::sea_orm_storage::testing::*;

    #[tokio::test]
    async fn test_delete_teacher_keeps_subjects() {
        let storage = memory_storage().await;
        let teacher = seed_teacher(&storage, "Ada Lovelace").await;
        let subject = seed_subject(&storage, "CS101", 1, Some(teacher.id)).await;
        let service = TeacherService::new(Arc::clone(&storage));

        service.delete_teacher(teacher.id).await.unwrap();

        let subject = storage.get_subject_by_id(subject.id).await.unwrap().unwrap();
        assert!(subject.assigned_teacher_id.is_none());
        assert_eq!(service.delete_teacher(teacher.id).await.unwrap_err().code(), "E006");
    }
}
