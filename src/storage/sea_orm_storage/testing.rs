//! 测试夹具：迁移后的内存 SQLite 存储与常用种子数据

use std::sync::Arc;

use super::SeaOrmStorage;
use crate::config::DatabaseConfig;
use crate::models::{
    exam_results::entities::ExamResult,
    exams::entities::{Exam, ExamDraft, ExamType},
    students::{entities::Student, requests::CreateStudentRequest},
    subjects::{entities::Subject, requests::SubjectRequest},
    teachers::{entities::Teacher, requests::TeacherRequest},
};
use crate::storage::Storage;
use sea_orm::ConnectionTrait;

pub(crate) async fn memory_sea_orm_storage() -> SeaOrmStorage {
    let config = DatabaseConfig {
        url: "sqlite::memory:".to_string(),
        pool_size: 1,
        timeout: 5,
    };
    SeaOrmStorage::connect(&config.url, &config)
        .await
        .expect("in-memory storage")
}

pub(crate) async fn memory_storage() -> Arc<dyn Storage> {
    Arc::new(memory_sea_orm_storage().await)
}

/// 安装触发器，使写入指定课程的选课记录时数据库报错
pub(crate) async fn reject_enrollments_into(storage: &SeaOrmStorage, subject_id: i64) {
    let sql = format!(
        "CREATE TRIGGER reject_enrollment_{subject_id} BEFORE INSERT ON enrollments \
         WHEN NEW.subject_id = {subject_id} \
         BEGIN SELECT RAISE(ABORT, 'enrollment rejected'); END;"
    );
    storage.db.execute_unprepared(&sql).await.expect("install trigger");
}

/// 直接写入学生，不触发选课同步
pub(crate) async fn seed_student(storage: &Arc<dyn Storage>, roll_no: &str, year: i32) -> Student {
    storage
        .create_student(
            CreateStudentRequest {
                roll_no: roll_no.to_string(),
                name: format!("Student {roll_no}"),
                email: format!("{}@college.test", roll_no.to_lowercase()),
                department: "CSE".to_string(),
                year,
                subject_ids: None,
            },
            &[],
        )
        .await
        .expect("seed student")
}

pub(crate) async fn seed_teacher(storage: &Arc<dyn Storage>, name: &str) -> Teacher {
    storage
        .create_teacher(TeacherRequest {
            name: name.to_string(),
            email: format!("{}@college.test", name.to_lowercase().replace(' ', ".")),
        })
        .await
        .expect("seed teacher")
}

pub(crate) async fn seed_subject(
    storage: &Arc<dyn Storage>,
    code: &str,
    year: i32,
    teacher_id: Option<i64>,
) -> Subject {
    storage
        .create_subject(SubjectRequest {
            code: code.to_string(),
            name: format!("Subject {code}"),
            year,
            assigned_teacher_id: teacher_id,
        })
        .await
        .expect("seed subject")
}

pub(crate) async fn seed_exam(storage: &Arc<dyn Storage>, subject: &Subject, max_marks: i32) -> Exam {
    storage
        .create_exam(ExamDraft {
            subject_id: subject.id,
            name: format!("{} Cycle Test", subject.code),
            exam_type: ExamType::CycleTest,
            target_year: subject.year,
            max_marks,
            exam_date: None,
            description: None,
        })
        .await
        .expect("seed exam")
}

pub(crate) async fn seed_result(
    storage: &Arc<dyn Storage>,
    exam: &Exam,
    student: &Student,
    marks: Option<i32>,
) -> ExamResult {
    storage
        .create_result(exam.id, student.id, marks)
        .await
        .expect("seed result")
}

/// 直接写入选课记录，绕过同步逻辑
pub(crate) async fn seed_enrollment(storage: &Arc<dyn Storage>, student: &Student, subject: &Subject) {
    storage
        .create_enrollment(student.id, subject.id)
        .await
        .expect("seed enrollment");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_delete_subject_cascades() {
        let storage = memory_storage().await;
        let student = seed_student(&storage, "R001", 1).await;
        let subject = seed_subject(&storage, "CS101", 1, None).await;
        seed_enrollment(&storage, &student, &subject).await;
        let exam = seed_exam(&storage, &subject, 20).await;
        seed_result(&storage, &exam, &student, Some(15)).await;

        assert!(storage.delete_subject(subject.id).await.unwrap());

        assert!(storage.get_exam_by_id(exam.id).await.unwrap().is_none());
        assert!(storage.list_results_by_student(student.id).await.unwrap().is_empty());
        assert!(storage
            .list_enrollments_by_student(student.id)
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn test_delete_teacher_unassigns_subjects() {
        let storage = memory_storage().await;
        let teacher = seed_teacher(&storage, "Ada Lovelace").await;
        let subject = seed_subject(&storage, "CS101", 1, Some(teacher.id)).await;

        assert!(storage.delete_teacher(teacher.id).await.unwrap());

        let subject = storage.get_subject_by_id(subject.id).await.unwrap().unwrap();
        assert_eq!(subject.assigned_teacher_id, None);
    }

    #[tokio::test]
    async fn test_results_carry_exam_max_marks() {
        let storage = memory_storage().await;
        let student = seed_student(&storage, "R001", 1).await;
        let subject = seed_subject(&storage, "CS101", 1, None).await;
        let exam = seed_exam(&storage, &subject, 50).await;
        let created = seed_result(&storage, &exam, &student, None).await;
        assert_eq!(created.max_marks, 50);

        let updated = storage
            .update_result_marks(created.id, Some(42))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.marks_obtained, Some(42));
        assert_eq!(updated.max_marks, 50);

        let fetched = storage.get_result(exam.id, student.id).await.unwrap().unwrap();
        assert_eq!(fetched.id, created.id);
    }

    #[tokio::test]
    async fn test_enrollment_carries_subject_year() {
        let storage = memory_storage().await;
        let student = seed_student(&storage, "R001", 2).await;
        let subject = seed_subject(&storage, "CS201", 2, None).await;
        seed_enrollment(&storage, &student, &subject).await;

        let enrollment = storage
            .get_enrollment(student.id, subject.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(enrollment.subject_year, 2);
        assert_eq!(
            storage.list_enrollments_by_subject(subject.id).await.unwrap().len(),
            1
        );
    }

    #[tokio::test]
    async fn test_enrollment_delta_rolls_back_on_failure() {
        let sea = memory_sea_orm_storage().await;
        let storage: Arc<dyn Storage> = Arc::new(sea.clone());
        let student = seed_student(&storage, "R001", 1).await;
        let kept = seed_subject(&storage, "CS201", 2, None).await;
        let s1 = seed_subject(&storage, "CS101", 1, None).await;
        let s2 = seed_subject(&storage, "CS102", 1, None).await;
        seed_enrollment(&storage, &student, &kept).await;
        let stale = storage.get_enrollment(student.id, kept.id).await.unwrap().unwrap();
        reject_enrollments_into(&sea, s2.id).await;

        let err = storage
            .apply_enrollment_delta(student.id, &[s1.id, s2.id], &[stale.id])
            .await
            .unwrap_err();
        assert_eq!(err.code(), "E003");

        let remaining: Vec<i64> = storage
            .list_enrollments_by_student(student.id)
            .await
            .unwrap()
            .into_iter()
            .map(|e| e.subject_id)
            .collect();
        assert_eq!(remaining, vec![kept.id]);
    }
}
