pub mod create;
pub mod delete;
pub mod get;
pub mod update;

use std::sync::Arc;

use crate::errors::{RecordsError, Result};
use crate::models::teachers::entities::Teacher;
use crate::models::teachers::requests::TeacherRequest;
use crate::models::teachers::responses::TeacherResponse;
use crate::storage::Storage;

pub struct TeacherService {
    storage: Arc<dyn Storage>,
}

impl TeacherService {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    pub(crate) fn storage(&self) -> &Arc<dyn Storage> {
        &self.storage
    }

    pub async fn create_teacher(&self, req: TeacherRequest) -> Result<TeacherResponse> {
        create::create_teacher(self, req).await
    }

    pub async fn update_teacher(&self, id: i64, req: TeacherRequest) -> Result<TeacherResponse> {
        update::update_teacher(self, id, req).await
    }

    // 删除教师，其负责的课程变为未分配
    pub async fn delete_teacher(&self, id: i64) -> Result<()> {
        delete::delete_teacher(self, id).await
    }

    pub async fn get_teacher(&self, id: i64) -> Result<TeacherResponse> {
        get::get_teacher(self, id).await
    }

    pub async fn list_teachers(&self) -> Result<Vec<TeacherResponse>> {
        get::list_teachers(self).await
    }

    pub(crate) async fn require_teacher(&self, id: i64) -> Result<Teacher> {
        self.storage
            .get_teacher_by_id(id)
            .await?
            .ok_or_else(|| RecordsError::not_found(format!("Teacher not found with id {id}")))
    }

    pub(crate) async fn to_response(&self, teacher: Teacher) -> Result<TeacherResponse> {
        let subject_ids = self
            .storage
            .list_subjects_by_teacher(teacher.id)
            .await?
            .into_iter()
            .map(|s| s.id)
            .collect();
        Ok(TeacherResponse {
            teacher,
            subject_ids,
        })
    }
}
