use super::SubjectService;
use crate::errors::Result;
use crate::models::subjects::entities::Subject;

pub async fn get_subject(service: &SubjectService, id: i64) -> Result<Subject> {
    service.require_subject(id).await
}

#[cfg(test)]
mod tests {
    use crate::services::subjects::test_support::subject_service;
    use crate::storage::sea_orm_storage::testing::*;

    #[tokio::test]
    async fn test_get_and_delete_subject() {
        let storage = memory_storage().await;
        let subject = seed_subject(&storage, "CS101", 1, None).await;
        let service = subject_service(&storage);

        assert_eq!(service.get_subject(subject.id).await.unwrap().code, "CS101");
        assert_eq!(service.list_subjects().await.unwrap().len(), 1);

        service.delete_subject(subject.id).await.unwrap();
        assert_eq!(service.get_subject(subject.id).await.unwrap_err().code(), "E006");
        assert_eq!(service.delete_subject(subject.id).await.unwrap_err().code(), "E006");
    }
}
