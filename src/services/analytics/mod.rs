//! 成绩统计服务
//!
//! 只读取成绩数据，不产生任何写入。

pub mod completion;
pub mod metrics;
pub mod ranking;
pub mod reports;

use std::sync::Arc;

use crate::errors::Result;
use crate::models::analytics::responses::{
    ExamCompletion, StudentPerformance, SubjectPerformance, TeacherPerformance,
};
use crate::storage::Storage;

pub struct AnalyticsService {
    storage: Arc<dyn Storage>,
}

impl AnalyticsService {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    pub(crate) fn storage(&self) -> &Arc<dyn Storage> {
        &self.storage
    }

    // 按学号查询学生成绩表现
    pub async fn student_performance(&self, roll_no: &str) -> Result<StudentPerformance> {
        reports::student_performance(self, roll_no).await
    }

    // 全部课程的成绩报表
    pub async fn subject_performance_report(&self) -> Result<Vec<SubjectPerformance>> {
        reports::subject_performance_report(self).await
    }

    // 全部教师的教学报表
    pub async fn teacher_performance_report(&self) -> Result<Vec<TeacherPerformance>> {
        reports::teacher_performance_report(self).await
    }

    // 成绩排行榜
    pub async fn top_students(
        &self,
        limit: usize,
        year: Option<i32>,
    ) -> Result<Vec<StudentPerformance>> {
        ranking::top_students(self, limit, year).await
    }

    // 考试成绩录入进度
    pub async fn exam_completion(&self, exam_id: i64) -> Result<ExamCompletion> {
        completion::exam_completion(self, exam_id).await
    }
}
