use serde::{Deserialize, Serialize};

/// 选课记录：一个学生与一门课程的关联
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Enrollment {
    pub id: i64,
    pub student_id: i64,
    pub subject_id: i64,
    pub subject_year: i32, // 关联课程当前所属学年
    pub enrolled_at: chrono::DateTime<chrono::Utc>,
}
