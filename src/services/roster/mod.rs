//! 选课同步服务
//!
//! 保证学生的选课集合始终等于其所在学年的全部课程，
//! 加上显式指定且学年匹配的课程。

pub mod reconcile;

use dashmap::DashMap;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::errors::{RecordsError, Result};
use crate::models::enrollments::responses::RosterDelta;
use crate::models::students::entities::Student;
use crate::storage::Storage;

pub struct RosterService {
    storage: Arc<dyn Storage>,
    // 同一学生的同步操作串行执行
    locks: DashMap<i64, Arc<Mutex<()>>>,
}

impl RosterService {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self {
            storage,
            locks: DashMap::new(),
        }
    }

    pub(crate) fn storage(&self) -> &Arc<dyn Storage> {
        &self.storage
    }

    fn student_lock(&self, student_id: i64) -> Arc<Mutex<()>> {
        self.locks
            .entry(student_id)
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    /// 同步单个学生的选课
    ///
    /// 未知的课程 ID 会使整个操作失败且不产生任何写入。
    /// 学年以库中最新记录为准，传入的学生只用于定位。
    pub async fn reconcile_enrollments(
        &self,
        student: &Student,
        explicit_subject_ids: &[i64],
    ) -> Result<RosterDelta> {
        self.reconcile_locked(student.id, explicit_subject_ids)
            .await?
            .ok_or_else(|| RecordsError::not_found(format!("Student not found with id {}", student.id)))
    }

    /// 持锁后重新读取学生再同步，学生已删除时返回 None
    async fn reconcile_locked(
        &self,
        student_id: i64,
        explicit_subject_ids: &[i64],
    ) -> Result<Option<RosterDelta>> {
        let lock = self.student_lock(student_id);
        let _guard = lock.lock().await;

        let Some(student) = self.storage.get_student_by_id(student_id).await? else {
            return Ok(None);
        };
        reconcile::reconcile_enrollments(self, &student, explicit_subject_ids)
            .await
            .map(Some)
    }

    /// 新学生应写入的初始课程
    pub(crate) async fn initial_subjects(
        &self,
        roll_no: &str,
        year: i32,
        explicit_subject_ids: &[i64],
    ) -> Result<Vec<i64>> {
        reconcile::target_subjects(self, roll_no, year, explicit_subject_ids).await
    }

    /// 课程目录变化后同步某学年的全部学生，返回发生变化的学生数
    pub async fn reconcile_year(&self, year: i32) -> Result<usize> {
        let students = self.storage.list_students_by_year(year).await?;
        let mut changed = 0;
        for student in &students {
            // 期间被删除的学生直接跳过
            if let Some(delta) = self.reconcile_locked(student.id, &[]).await? {
                if !delta.is_empty() {
                    changed += 1;
                }
            }
        }
        Ok(changed)
    }

    /// 学生删除后释放其锁，仍有任务持有时保留
    pub(crate) fn forget_student(&self, student_id: i64) {
        self.locks
            .remove_if(&student_id, |_, lock| Arc::strong_count(lock) == 1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::sea_orm_storage::testing::*;

    #[tokio::test]
    async fn test_forget_keeps_lock_while_held() {
        let storage = memory_storage().await;
        let service = RosterService::new(storage);

        let held = service.student_lock(7);
        service.forget_student(7);
        let again = service.student_lock(7);
        assert!(Arc::ptr_eq(&held, &again));

        drop(held);
        drop(again);
        service.forget_student(7);
        assert!(!service.locks.contains_key(&7));
    }

    #[tokio::test]
    async fn test_reconcile_deleted_student_is_not_found() {
        let storage = memory_storage().await;
        let student = seed_student(&storage, "R001", 1).await;
        let service = RosterService::new(Arc::clone(&storage));
        assert!(storage.delete_student(student.id).await.unwrap());

        let err = service.reconcile_enrollments(&student, &[]).await.unwrap_err();
        assert_eq!(err.code(), "E006");
    }
}
