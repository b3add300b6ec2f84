use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Student {
    pub id: i64,
    pub roll_no: String,
    pub name: String,
    pub email: String,
    pub department: String,
    pub year: i32, // 当前所在学年，决定应选课程
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}
