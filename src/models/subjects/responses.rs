use serde::Serialize;

use super::entities::Subject;

/// 课程变更结果
#[derive(Debug, Clone, Serialize)]
pub struct SubjectChangeResponse {
    #[serde(flatten)]
    pub subject: Subject,
    /// 因课程目录变化而选课发生变化的学生数
    pub reconciled_students: usize,
}
