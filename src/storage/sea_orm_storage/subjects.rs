//! 课程存储操作

use super::SeaOrmStorage;
use crate::entity::enrollments::{Column as EnrollmentColumn, Entity as Enrollments};
use crate::entity::exam_results::{Column as ExamResultColumn, Entity as ExamResults};
use crate::entity::exams::{Column as ExamColumn, Entity as Exams};
use crate::entity::subjects::{ActiveModel, Column, Entity as Subjects};
use crate::errors::{RecordsError, Result};
use crate::models::subjects::{entities::Subject, requests::SubjectRequest};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, QuerySelect, Set,
    TransactionTrait,
};

impl SeaOrmStorage {
    /// 创建课程
    pub async fn create_subject_impl(&self, req: SubjectRequest) -> Result<Subject> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            code: Set(req.code),
            name: Set(req.name),
            year: Set(req.year),
            teacher_id: Set(req.assigned_teacher_id),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| RecordsError::database_operation(format!("创建课程失败: {e}")))?;

        Ok(result.into_subject())
    }

    /// 通过 ID 获取课程
    pub async fn get_subject_by_id_impl(&self, id: i64) -> Result<Option<Subject>> {
        let result = Subjects::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| RecordsError::database_operation(format!("查询课程失败: {e}")))?;

        Ok(result.map(|m| m.into_subject()))
    }

    /// 列出课程，可按学年或教师筛选
    pub async fn list_subjects_impl(
        &self,
        year: Option<i32>,
        teacher_id: Option<i64>,
    ) -> Result<Vec<Subject>> {
        let mut select = Subjects::find();

        // 学年筛选
        if let Some(year) = year {
            select = select.filter(Column::Year.eq(year));
        }

        // 教师筛选
        if let Some(teacher_id) = teacher_id {
            select = select.filter(Column::TeacherId.eq(teacher_id));
        }

        let subjects = select
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| RecordsError::database_operation(format!("查询课程列表失败: {e}")))?;

        Ok(subjects.into_iter().map(|m| m.into_subject()).collect())
    }

    /// 更新课程（整体替换）
    pub async fn update_subject_impl(
        &self,
        id: i64,
        update: SubjectRequest,
    ) -> Result<Option<Subject>> {
        if self.get_subject_by_id_impl(id).await?.is_none() {
            return Ok(None);
        }

        let model = ActiveModel {
            id: Set(id),
            code: Set(update.code),
            name: Set(update.name),
            year: Set(update.year),
            teacher_id: Set(update.assigned_teacher_id),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let result = model
            .update(&self.db)
            .await
            .map_err(|e| RecordsError::database_operation(format!("更新课程失败: {e}")))?;

        Ok(Some(result.into_subject()))
    }

    /// 分配教师，`None` 表示取消分配
    pub async fn assign_teacher_impl(
        &self,
        subject_id: i64,
        teacher_id: Option<i64>,
    ) -> Result<Option<Subject>> {
        if self.get_subject_by_id_impl(subject_id).await?.is_none() {
            return Ok(None);
        }

        let model = ActiveModel {
            id: Set(subject_id),
            teacher_id: Set(teacher_id),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let result = model
            .update(&self.db)
            .await
            .map_err(|e| RecordsError::database_operation(format!("分配教师失败: {e}")))?;

        Ok(Some(result.into_subject()))
    }

    /// 删除课程，考试、成绩与选课记录一并删除
    pub async fn delete_subject_impl(&self, id: i64) -> Result<bool> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| RecordsError::database_operation(format!("开启事务失败: {e}")))?;

        let exam_ids: Vec<i64> = Exams::find()
            .select_only()
            .column(ExamColumn::Id)
            .filter(ExamColumn::SubjectId.eq(id))
            .into_tuple()
            .all(&txn)
            .await
            .map_err(|e| RecordsError::database_operation(format!("查询课程考试失败: {e}")))?;

        if !exam_ids.is_empty() {
            ExamResults::delete_many()
                .filter(ExamResultColumn::ExamId.is_in(exam_ids))
                .exec(&txn)
                .await
                .map_err(|e| RecordsError::database_operation(format!("删除考试成绩失败: {e}")))?;
        }

        Exams::delete_many()
            .filter(ExamColumn::SubjectId.eq(id))
            .exec(&txn)
            .await
            .map_err(|e| RecordsError::database_operation(format!("删除课程考试失败: {e}")))?;

        Enrollments::delete_many()
            .filter(EnrollmentColumn::SubjectId.eq(id))
            .exec(&txn)
            .await
            .map_err(|e| RecordsError::database_operation(format!("删除课程选课失败: {e}")))?;

        let result = Subjects::delete_by_id(id)
            .exec(&txn)
            .await
            .map_err(|e| RecordsError::database_operation(format!("删除课程失败: {e}")))?;

        txn.commit()
            .await
            .map_err(|e| RecordsError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}
