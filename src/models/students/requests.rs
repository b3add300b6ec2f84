use serde::Deserialize;

/// 创建学生请求
#[derive(Debug, Clone, Deserialize)]
pub struct CreateStudentRequest {
    pub roll_no: String,
    pub name: String,
    pub email: String,
    pub department: String,
    pub year: i32,
    /// 额外指定的课程，只有与学生同一学年的课程会被保留
    #[serde(default)]
    pub subject_ids: Option<Vec<i64>>,
}

/// 更新学生请求（整体替换基本信息）
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateStudentRequest {
    pub roll_no: String,
    pub name: String,
    pub email: String,
    pub department: String,
    pub year: i32,
    /// None 表示只按学年同步选课
    #[serde(default)]
    pub subject_ids: Option<Vec<i64>>,
}
