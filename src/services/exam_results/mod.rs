//! 成绩录入与查询服务

pub mod list;
pub mod upsert;

use std::sync::Arc;

use crate::errors::Result;
use crate::models::exam_results::entities::ExamResult;
use crate::models::exam_results::requests::UpsertResultRequest;
use crate::models::exam_results::responses::{
    BulkUpsertOutcome, ExamStudentEntry, StudentResultEntry,
};
use crate::storage::Storage;

pub struct ExamResultService {
    storage: Arc<dyn Storage>,
}

impl ExamResultService {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    pub(crate) fn storage(&self) -> &Arc<dyn Storage> {
        &self.storage
    }

    // 录入或更新单条成绩
    pub async fn upsert_result(&self, req: UpsertResultRequest) -> Result<ExamResult> {
        upsert::upsert_result(self, req).await
    }

    // 批量录入，每条独立生效
    pub async fn upsert_results_bulk(&self, items: Vec<UpsertResultRequest>) -> BulkUpsertOutcome {
        upsert::upsert_results_bulk(self, items).await
    }

    // 某场考试的应考学生及成绩
    pub async fn exam_students(&self, exam_id: i64) -> Result<Vec<ExamStudentEntry>> {
        list::exam_students(self, exam_id).await
    }

    // 学生的全部成绩
    pub async fn student_results(&self, roll_no: &str) -> Result<Vec<StudentResultEntry>> {
        list::student_results(self, roll_no).await
    }
}
