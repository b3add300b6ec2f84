use serde::Serialize;

use super::entities::Student;

/// 学生详情（含已选课程）
#[derive(Debug, Clone, Serialize)]
pub struct StudentResponse {
    #[serde(flatten)]
    pub student: Student,
    pub subject_ids: Vec<i64>,
}
