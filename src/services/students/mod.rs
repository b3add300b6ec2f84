pub mod create;
pub mod delete;
pub mod get;
pub mod update;

use std::sync::Arc;

use crate::errors::{RecordsError, Result};
use crate::models::students::entities::Student;
use crate::models::students::requests::{CreateStudentRequest, UpdateStudentRequest};
use crate::models::students::responses::StudentResponse;
use crate::services::RosterService;
use crate::storage::Storage;

pub struct StudentService {
    storage: Arc<dyn Storage>,
    roster: Arc<RosterService>,
}

impl StudentService {
    pub fn new(storage: Arc<dyn Storage>, roster: Arc<RosterService>) -> Self {
        Self { storage, roster }
    }

    pub(crate) fn storage(&self) -> &Arc<dyn Storage> {
        &self.storage
    }

    pub(crate) fn roster(&self) -> &RosterService {
        &self.roster
    }

    // 创建学生并按学年同步选课
    pub async fn create_student(&self, req: CreateStudentRequest) -> Result<StudentResponse> {
        create::create_student(self, req).await
    }

    // 按学号更新学生
    pub async fn update_student(
        &self,
        roll_no: &str,
        req: UpdateStudentRequest,
    ) -> Result<StudentResponse> {
        update::update_student(self, roll_no, req).await
    }

    // 按学号删除学生
    pub async fn delete_student(&self, roll_no: &str) -> Result<()> {
        delete::delete_student(self, roll_no).await
    }

    // 按学号获取学生
    pub async fn get_student(&self, roll_no: &str) -> Result<StudentResponse> {
        get::get_student(self, roll_no).await
    }

    pub async fn list_students(&self) -> Result<Vec<StudentResponse>> {
        get::list_students(self).await
    }

    /// 按学号查找学生，不存在时返回 NotFound
    pub(crate) async fn require_student(&self, roll_no: &str) -> Result<Student> {
        self.storage
            .get_student_by_roll_no(roll_no)
            .await?
            .ok_or_else(|| RecordsError::not_found(format!("Student not found with rollNo {roll_no}")))
    }

    /// 确认所有课程 ID 都存在
    pub(crate) async fn require_subjects(&self, subject_ids: &[i64]) -> Result<()> {
        for &subject_id in subject_ids {
            if self.storage.get_subject_by_id(subject_id).await?.is_none() {
                return Err(RecordsError::not_found(format!(
                    "Subject not found with id {subject_id}"
                )));
            }
        }
        Ok(())
    }

    pub(crate) async fn to_response(&self, student: Student) -> Result<StudentResponse> {
        let subject_ids = self
            .storage
            .list_enrollments_by_student(student.id)
            .await?
            .into_iter()
            .map(|e| e.subject_id)
            .collect();
        Ok(StudentResponse {
            student,
            subject_ids,
        })
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::Arc;

    use super::StudentService;
    use crate::services::RosterService;
    use crate::storage::Storage;

    pub(crate) fn student_service(storage: &Arc<dyn Storage>) -> StudentService {
        let roster = Arc::new(RosterService::new(Arc::clone(storage)));
        StudentService::new(Arc::clone(storage), roster)
    }
}
