use serde::{Deserialize, Serialize};

/// 考试成绩
///
/// `max_marks` 取自所属考试，便于统计时直接换算百分比。
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExamResult {
    pub id: i64,
    pub exam_id: i64,
    pub student_id: i64,
    pub marks_obtained: Option<i32>, // None 表示尚未录入
    pub max_marks: i32,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}
