//! 考试存储操作

use super::SeaOrmStorage;
use crate::entity::exam_results::{Column as ExamResultColumn, Entity as ExamResults};
use crate::entity::exams::{ActiveModel, Column, Entity as Exams};
use crate::errors::{RecordsError, Result};
use crate::models::exams::entities::{EXAM_DATE_FORMAT, Exam, ExamDraft};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};

impl SeaOrmStorage {
    /// 创建考试
    pub async fn create_exam_impl(&self, draft: ExamDraft) -> Result<Exam> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            subject_id: Set(draft.subject_id),
            name: Set(draft.name),
            exam_type: Set(draft.exam_type.to_string()),
            target_year: Set(draft.target_year),
            max_marks: Set(draft.max_marks),
            exam_date: Set(draft
                .exam_date
                .map(|d| d.format(EXAM_DATE_FORMAT).to_string())),
            description: Set(draft.description),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| RecordsError::database_operation(format!("创建考试失败: {e}")))?;

        Ok(result.into_exam())
    }

    /// 通过 ID 获取考试
    pub async fn get_exam_by_id_impl(&self, id: i64) -> Result<Option<Exam>> {
        let result = Exams::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| RecordsError::database_operation(format!("查询考试失败: {e}")))?;

        Ok(result.map(|m| m.into_exam()))
    }

    /// 列出考试，可限定课程范围
    pub async fn list_exams_impl(&self, subject_ids: Option<&[i64]>) -> Result<Vec<Exam>> {
        let mut select = Exams::find();

        if let Some(ids) = subject_ids {
            if ids.is_empty() {
                return Ok(Vec::new());
            }
            select = select.filter(Column::SubjectId.is_in(ids.iter().copied()));
        }

        let exams = select
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| RecordsError::database_operation(format!("查询考试列表失败: {e}")))?;

        Ok(exams.into_iter().map(|m| m.into_exam()).collect())
    }

    /// 更新考试（整体替换）
    pub async fn update_exam_impl(&self, id: i64, draft: ExamDraft) -> Result<Option<Exam>> {
        if self.get_exam_by_id_impl(id).await?.is_none() {
            return Ok(None);
        }

        let model = ActiveModel {
            id: Set(id),
            subject_id: Set(draft.subject_id),
            name: Set(draft.name),
            exam_type: Set(draft.exam_type.to_string()),
            target_year: Set(draft.target_year),
            max_marks: Set(draft.max_marks),
            exam_date: Set(draft
                .exam_date
                .map(|d| d.format(EXAM_DATE_FORMAT).to_string())),
            description: Set(draft.description),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let result = model
            .update(&self.db)
            .await
            .map_err(|e| RecordsError::database_operation(format!("更新考试失败: {e}")))?;

        Ok(Some(result.into_exam()))
    }

    /// 删除考试及其成绩
    pub async fn delete_exam_impl(&self, id: i64) -> Result<bool> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| RecordsError::database_operation(format!("开启事务失败: {e}")))?;

        ExamResults::delete_many()
            .filter(ExamResultColumn::ExamId.eq(id))
            .exec(&txn)
            .await
            .map_err(|e| RecordsError::database_operation(format!("删除考试成绩失败: {e}")))?;

        let result = Exams::delete_by_id(id)
            .exec(&txn)
            .await
            .map_err(|e| RecordsError::database_operation(format!("删除考试失败: {e}")))?;

        txn.commit()
            .await
            .map_err(|e| RecordsError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}
