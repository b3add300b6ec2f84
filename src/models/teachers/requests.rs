use serde::Deserialize;

/// 创建/更新教师请求
#[derive(Debug, Clone, Deserialize)]
pub struct TeacherRequest {
    pub name: String,
    pub email: String,
}
