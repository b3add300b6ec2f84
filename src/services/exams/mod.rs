pub mod create;
pub mod delete;
pub mod detail;
pub mod list;
pub mod update;

use std::sync::Arc;

use crate::errors::{RecordsError, Result};
use crate::models::exams::entities::Exam;
use crate::models::exams::requests::ExamRequest;
use crate::models::exams::responses::ExamResponse;
use crate::models::subjects::entities::Subject;
use crate::storage::Storage;

pub struct ExamService {
    storage: Arc<dyn Storage>,
}

impl ExamService {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    pub(crate) fn storage(&self) -> &Arc<dyn Storage> {
        &self.storage
    }

    pub async fn create_exam(&self, req: ExamRequest) -> Result<ExamResponse> {
        create::create_exam(self, req).await
    }

    pub async fn update_exam(&self, id: i64, req: ExamRequest) -> Result<ExamResponse> {
        update::update_exam(self, id, req).await
    }

    // 删除考试及其成绩
    pub async fn delete_exam(&self, id: i64) -> Result<()> {
        delete::delete_exam(self, id).await
    }

    pub async fn get_exam(&self, id: i64) -> Result<ExamResponse> {
        let exam = self.require_exam(id).await?;
        detail::build_response(self, exam).await
    }

    pub async fn list_exams(&self) -> Result<Vec<ExamResponse>> {
        list::list_exams(self).await
    }

    // 教师负责课程下的全部考试
    pub async fn list_exams_by_teacher(&self, teacher_id: i64) -> Result<Vec<ExamResponse>> {
        list::list_exams_by_teacher(self, teacher_id).await
    }

    pub(crate) async fn require_exam(&self, id: i64) -> Result<Exam> {
        self.storage
            .get_exam_by_id(id)
            .await?
            .ok_or_else(|| RecordsError::not_found(format!("Exam not found with id {id}")))
    }

    pub(crate) async fn require_subject(&self, id: i64) -> Result<Subject> {
        self.storage
            .get_subject_by_id(id)
            .await?
            .ok_or_else(|| RecordsError::not_found(format!("Subject not found with id {id}")))
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::models::exams::entities::ExamType;
    use crate::models::exams::requests::ExamRequest;

    pub(crate) fn exam_request(subject_id: i64, max_marks: i32, date: Option<&str>) -> ExamRequest {
        ExamRequest {
            subject_id,
            name: "Cycle Test 1".to_string(),
            exam_type: ExamType::CycleTest,
            target_year: 1,
            max_marks,
            exam_date: date.map(str::to_string),
            description: Some("Units 1-2".to_string()),
        }
    }
}
