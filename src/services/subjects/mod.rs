//! 课程服务
//!
//! 课程目录的任何变化都会对受影响学年的学生重新同步选课。

pub mod assign;
pub mod create;
pub mod delete;
pub mod get;
pub mod update;

use std::sync::Arc;

use crate::errors::{RecordsError, Result};
use crate::models::subjects::entities::Subject;
use crate::models::subjects::requests::SubjectRequest;
use crate::models::subjects::responses::SubjectChangeResponse;
use crate::services::RosterService;
use crate::storage::Storage;

pub struct SubjectService {
    storage: Arc<dyn Storage>,
    roster: Arc<RosterService>,
}

impl SubjectService {
    pub fn new(storage: Arc<dyn Storage>, roster: Arc<RosterService>) -> Self {
        Self { storage, roster }
    }

    pub(crate) fn storage(&self) -> &Arc<dyn Storage> {
        &self.storage
    }

    pub(crate) fn roster(&self) -> &RosterService {
        &self.roster
    }

    pub async fn create_subject(&self, req: SubjectRequest) -> Result<SubjectChangeResponse> {
        create::create_subject(self, req).await
    }

    pub async fn update_subject(
        &self,
        id: i64,
        req: SubjectRequest,
    ) -> Result<SubjectChangeResponse> {
        update::update_subject(self, id, req).await
    }

    // 分配或取消分配教师
    pub async fn assign_teacher(&self, subject_id: i64, teacher_id: Option<i64>) -> Result<Subject> {
        assign::assign_teacher(self, subject_id, teacher_id).await
    }

    pub async fn delete_subject(&self, id: i64) -> Result<()> {
        delete::delete_subject(self, id).await
    }

    pub async fn get_subject(&self, id: i64) -> Result<Subject> {
        get::get_subject(self, id).await
    }

    pub async fn list_subjects(&self) -> Result<Vec<Subject>> {
        self.storage.list_subjects().await
    }

    pub(crate) async fn require_subject(&self, id: i64) -> Result<Subject> {
        self.storage
            .get_subject_by_id(id)
            .await?
            .ok_or_else(|| RecordsError::not_found(format!("Subject not found with id {id}")))
    }

    /// 教师 ID 非空时必须存在
    pub(crate) async fn require_teacher(&self, teacher_id: Option<i64>) -> Result<()> {
        if let Some(id) = teacher_id {
            if self.storage.get_teacher_by_id(id).await?.is_none() {
                return Err(RecordsError::not_found(format!(
                    "Teacher not found with id {id}"
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::Arc;

    use super::SubjectService;
    use crate::services::RosterService;
    use crate::storage::Storage;

    pub(crate) fn subject_service(storage: &Arc<dyn Storage>) -> SubjectService {
        let roster = Arc::new(RosterService::new(Arc::clone(storage)));
        SubjectService::new(Arc::clone(storage), roster)
    }
}
