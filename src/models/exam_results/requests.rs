use serde::Deserialize;

/// 录入/更新成绩请求
///
/// 学生优先按学号定位，学号为空时使用 `student_id`。
#[derive(Debug, Clone, Deserialize)]
pub struct UpsertResultRequest {
    pub exam_id: i64,
    #[serde(default)]
    pub student_roll_no: Option<String>,
    #[serde(default)]
    pub student_id: Option<i64>,
    pub marks_obtained: Option<i32>,
}
