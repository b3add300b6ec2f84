use tracing::info;

use super::StudentService;
use crate::errors::{RecordsError, Result};

pub async fn delete_student(service: &StudentService, roll_no: &str) -> Result<()> {
    let student = service.require_student(roll_no).await?;

    if !service.storage().delete_student(student.id).await? {
        return Err(RecordsError::not_found(format!(
            "Student not found with rollNo {roll_no}"
        )));
    }
    service.roster().forget_student(student.id);

    info!("Student {} deleted", roll_no);
    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::services::students::test_support::student_service;
    use crate::storage::sea_orm_storage::testing::*;

    #[tokio::test]
    async fn test_delete_cascades_results_and_enrollments() {
        let storage = memory_storage().await;
        let subject = seed_subject(&storage, "CS101", 1, None).await;
        let student = seed_student(&storage, "R001", 1).await;
        seed_enrollment(&storage, &student, &subject).await;
        let exam = seed_exam(&storage, &subject, 20).await;
        seed_result(&storage, &exam, &student, Some(15)).await;
        let service = student_service(&storage);

        service.delete_student("R001").await.unwrap();

        assert!(storage.get_student_by_id(student.id).await.unwrap().is_none());
        assert!(storage.list_results_by_exam(exam.id).await.unwrap().is_empty());
        assert!(storage
            .list_enrollments_by_subject(subject.id)
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn test_delete_unknown_student() {
        let storage = memory_storage().await;
        let service = student_service(&storage);

        let err = service.delete_student("R404").await.unwrap_err();
        assert_eq!(err.code(), "E006");
    }
}
