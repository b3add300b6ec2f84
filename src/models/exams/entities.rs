use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// 考试日期的存储格式
pub const EXAM_DATE_FORMAT: &str = "%Y-%m-%d";

// 考试类型，数据库中按字符串保存，未知类型原样保留
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExamType {
    CycleTest, // 单元测验
    Internal,  // 期中/内部考核
    Semester,  // 期末考试
    Other(String),
}

impl ExamType {
    pub const CYCLE_TEST: &'static str = "CYCLE_TEST";
    pub const INTERNAL: &'static str = "INTERNAL";
    pub const SEMESTER: &'static str = "SEMESTER";
}

impl From<String> for ExamType {
    fn from(s: String) -> Self {
        match s.as_str() {
            ExamType::CYCLE_TEST => ExamType::CycleTest,
            ExamType::INTERNAL => ExamType::Internal,
            ExamType::SEMESTER => ExamType::Semester,
            _ => ExamType::Other(s),
        }
    }
}

impl std::fmt::Display for ExamType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExamType::CycleTest => write!(f, "{}", ExamType::CYCLE_TEST),
            ExamType::Internal => write!(f, "{}", ExamType::INTERNAL),
            ExamType::Semester => write!(f, "{}", ExamType::SEMESTER),
            ExamType::Other(s) => write!(f, "{s}"),
        }
    }
}

impl Serialize for ExamType {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ExamType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        if s.trim().is_empty() {
            return Err(serde::de::Error::custom(
                "考试类型不能为空. 常用类型: CYCLE_TEST, INTERNAL, SEMESTER",
            ));
        }
        Ok(ExamType::from(s))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Exam {
    pub id: i64,
    pub subject_id: i64,
    pub name: String,
    pub exam_type: ExamType,
    pub target_year: i32,
    pub max_marks: i32, // 满分，必须为正数
    pub exam_date: Option<NaiveDate>,
    pub description: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

/// 经过校验、可直接写入存储层的考试数据
#[derive(Debug, Clone)]
pub struct ExamDraft {
    pub subject_id: i64,
    pub name: String,
    pub exam_type: ExamType,
    pub target_year: i32,
    pub max_marks: i32,
    pub exam_date: Option<NaiveDate>,
    pub description: Option<String>,
}
