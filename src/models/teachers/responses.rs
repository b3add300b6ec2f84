use serde::Serialize;

use super::entities::Teacher;

/// 教师详情（含负责课程）
#[derive(Debug, Clone, Serialize)]
pub struct TeacherResponse {
    #[serde(flatten)]
    pub teacher: Teacher,
    pub subject_ids: Vec<i64>,
}
