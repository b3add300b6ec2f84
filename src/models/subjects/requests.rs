use serde::Deserialize;

/// 创建/更新课程请求
///
/// 更新时整体替换，`assigned_teacher_id` 为 None 会取消教师分配。
#[derive(Debug, Clone, Deserialize)]
pub struct SubjectRequest {
    pub code: String,
    pub name: String,
    pub year: i32,
    #[serde(default)]
    pub assigned_teacher_id: Option<i64>,
}
