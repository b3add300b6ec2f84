use serde::Serialize;

use crate::models::exams::entities::ExamType;

/// 某场考试下的应考学生及其成绩
#[derive(Debug, Clone, Serialize)]
pub struct ExamStudentEntry {
    pub result_id: Option<i64>,
    pub exam_id: i64,
    pub exam_name: String,
    pub exam_type: ExamType,
    pub subject_name: String,
    pub student_id: i64,
    pub student_roll_no: String,
    pub student_name: String,
    pub student_email: String,
    pub marks_obtained: Option<i32>,
    pub max_marks: i32,
}

/// 学生的单条考试成绩
#[derive(Debug, Clone, Serialize)]
pub struct StudentResultEntry {
    pub result_id: i64,
    pub exam_id: i64,
    pub exam_name: String,
    pub exam_type: ExamType,
    pub subject_name: String,
    pub subject_code: String,
    pub marks_obtained: Option<i32>,
    pub max_marks: i32,
}

/// 批量录入中失败的单项
#[derive(Debug, Clone, Serialize)]
pub struct BulkUpsertFailure {
    pub index: usize,
    pub code: &'static str,
    pub message: String,
}

/// 批量录入结果，每一项独立生效
#[derive(Debug, Clone, Default, Serialize)]
pub struct BulkUpsertOutcome {
    pub applied: usize,
    pub failed: Vec<BulkUpsertFailure>,
}
