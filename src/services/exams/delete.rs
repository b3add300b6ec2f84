use tracing::info;

use super::ExamService;
use crate::errors::{RecordsError, Result};

pub async fn delete_exam(service: &ExamService, id: i64) -> Result<()> {
    if !service.storage().delete_exam(id).await? {
        return Err(RecordsError::not_found(format!("Exam not found with id {id}")));
    }

    info!("Exam {} deleted", id);
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crate::services::ExamService;
    use crate::storage::sea_orm_storage::testing::*;

    #[tokio::test]
    async fn test_delete_exam_removes_results() {
        let storage = memory_storage().await;
        let subject = seed_subject(&storage, "CS101", 1, None).await;
        let student = seed_student(&storage, "R001", 1).await;
        let exam = seed_exam(&storage, &subject, 20).await;
        seed_result(&storage, &exam, &student, Some(12)).await;
        let service = ExamService::new(Arc::clone(&storage));

        service.delete_exam(exam.id).await.unwrap();

        assert!(storage.list_results_by_student(student.id).await.unwrap().is_empty());
        assert_eq!(service.delete_exam(exam.id).await.unwrap_err().code(), "E006");
    }
}
