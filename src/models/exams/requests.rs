use chrono::NaiveDate;
use serde::Deserialize;

use super::entities::{EXAM_DATE_FORMAT, ExamDraft, ExamType};
use crate::errors::{RecordsError, Result};

/// 创建/更新考试请求
#[derive(Debug, Clone, Deserialize)]
pub struct ExamRequest {
    pub subject_id: i64,
    pub name: String,
    pub exam_type: ExamType,
    pub target_year: i32,
    pub max_marks: i32,
    pub exam_date: Option<String>, // yyyy-MM-dd
    pub description: Option<String>,
}

impl ExamRequest {
    /// 校验并转换为存储层使用的数据
    pub fn into_draft(self) -> Result<ExamDraft> {
        if self.max_marks <= 0 {
            return Err(RecordsError::validation(format!(
                "Max marks must be positive, got {}",
                self.max_marks
            )));
        }
        if self.target_year <= 0 {
            return Err(RecordsError::validation(format!(
                "Target year must be positive, got {}",
                self.target_year
            )));
        }

        // 空字符串视为未设置日期
        let exam_date = match self.exam_date.as_deref().map(str::trim) {
            Some(d) if !d.is_empty() => Some(NaiveDate::parse_from_str(d, EXAM_DATE_FORMAT)?),
            _ => None,
        };

        Ok(ExamDraft {
            subject_id: self.subject_id,
            name: self.name,
            exam_type: self.exam_type,
            target_year: self.target_year,
            max_marks: self.max_marks,
            exam_date,
            description: self.description,
        })
    }
}
