//! 考试成绩存储操作

use super::SeaOrmStorage;
use crate::entity::exam_results::{ActiveModel, Column, Entity as ExamResults, Model};
use crate::entity::exams::{Entity as Exams, Model as ExamModel};
use crate::errors::{RecordsError, Result};
use crate::models::exam_results::entities::ExamResult;
use sea_orm::{ActiveModelTrait, ColumnTrait, Condition, EntityTrait, QueryFilter, QueryOrder, Set};

/// 关联查询结果转换为业务模型，满分取自所属考试
fn with_max_marks(rows: Vec<(Model, Option<ExamModel>)>) -> Vec<ExamResult> {
    rows.into_iter()
        .filter_map(|(result, exam)| exam.map(|e| result.into_exam_result(e.max_marks)))
        .collect()
}

impl SeaOrmStorage {
    /// 列出学生的全部成绩
    pub async fn list_results_by_student_impl(&self, student_id: i64) -> Result<Vec<ExamResult>> {
        let rows = ExamResults::find()
            .filter(Column::StudentId.eq(student_id))
            .order_by_asc(Column::Id)
            .find_also_related(Exams)
            .all(&self.db)
            .await
            .map_err(|e| RecordsError::database_operation(format!("查询学生成绩失败: {e}")))?;

        Ok(with_max_marks(rows))
    }

    /// 列出若干场考试的全部成绩
    pub async fn list_results_by_exams_impl(&self, exam_ids: &[i64]) -> Result<Vec<ExamResult>> {
        if exam_ids.is_empty() {
            return Ok(Vec::new());
        }

        let rows = ExamResults::find()
            .filter(Column::ExamId.is_in(exam_ids.iter().copied()))
            .order_by_asc(Column::Id)
            .find_also_related(Exams)
            .all(&self.db)
            .await
            .map_err(|e| RecordsError::database_operation(format!("查询考试成绩失败: {e}")))?;

        Ok(with_max_marks(rows))
    }

    /// 获取某学生在某场考试的成绩
    pub async fn get_result_impl(&self, exam_id: i64, student_id: i64) -> Result<Option<ExamResult>> {
        let row = ExamResults::find()
            .filter(
                Condition::all()
                    .add(Column::ExamId.eq(exam_id))
                    .add(Column::StudentId.eq(student_id)),
            )
            .find_also_related(Exams)
            .one(&self.db)
            .await
            .map_err(|e| RecordsError::database_operation(format!("查询成绩失败: {e}")))?;

        Ok(row.and_then(|(result, exam)| exam.map(|e| result.into_exam_result(e.max_marks))))
    }

    /// 创建成绩记录
    pub async fn create_result_impl(
        &self,
        exam_id: i64,
        student_id: i64,
        marks_obtained: Option<i32>,
    ) -> Result<ExamResult> {
        let exam = Exams::find_by_id(exam_id)
            .one(&self.db)
            .await
            .map_err(|e| RecordsError::database_operation(format!("查询考试失败: {e}")))?
            .ok_or_else(|| RecordsError::not_found(format!("Exam not found with id {exam_id}")))?;

        let model = ActiveModel {
            exam_id: Set(exam_id),
            student_id: Set(student_id),
            marks_obtained: Set(marks_obtained),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| RecordsError::database_operation(format!("创建成绩失败: {e}")))?;

        Ok(result.into_exam_result(exam.max_marks))
    }

    /// 更新成绩分数
    pub async fn update_result_marks_impl(
        &self,
        result_id: i64,
        marks_obtained: Option<i32>,
    ) -> Result<Option<ExamResult>> {
        let existing = ExamResults::find_by_id(result_id)
            .find_also_related(Exams)
            .one(&self.db)
            .await
            .map_err(|e| RecordsError::database_operation(format!("查询成绩失败: {e}")))?;

        let Some((_, Some(exam))) = existing else {
            return Ok(None);
        };

        let model = ActiveModel {
            id: Set(result_id),
            marks_obtained: Set(marks_obtained),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let result = model
            .update(&self.db)
            .await
            .map_err(|e| RecordsError::database_operation(format!("更新成绩失败: {e}")))?;

        Ok(Some(result.into_exam_result(exam.max_marks)))
    }
}
