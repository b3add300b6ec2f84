//! 教师存储操作

use super::SeaOrmStorage;
use crate::entity::subjects::{Column as SubjectColumn, Entity as Subjects};
use crate::entity::teachers::{ActiveModel, Column, Entity as Teachers};
use crate::errors::{RecordsError, Result};
use crate::models::teachers::{entities::Teacher, requests::TeacherRequest};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};

impl SeaOrmStorage {
    /// 创建教师
    pub async fn create_teacher_impl(&self, req: TeacherRequest) -> Result<Teacher> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            name: Set(req.name),
            email: Set(req.email),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| RecordsError::database_operation(format!("创建教师失败: {e}")))?;

        Ok(result.into_teacher())
    }

    /// 通过 ID 获取教师
    pub async fn get_teacher_by_id_impl(&self, id: i64) -> Result<Option<Teacher>> {
        let result = Teachers::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| RecordsError::database_operation(format!("查询教师失败: {e}")))?;

        Ok(result.map(|m| m.into_teacher()))
    }

    /// 列出全部教师
    pub async fn list_teachers_impl(&self) -> Result<Vec<Teacher>> {
        let teachers = Teachers::find()
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| RecordsError::database_operation(format!("查询教师列表失败: {e}")))?;

        Ok(teachers.into_iter().map(|m| m.into_teacher()).collect())
    }

    /// 更新教师信息
    pub async fn update_teacher_impl(
        &self,
        id: i64,
        update: TeacherRequest,
    ) -> Result<Option<Teacher>> {
        if self.get_teacher_by_id_impl(id).await?.is_none() {
            return Ok(None);
        }

        let model = ActiveModel {
            id: Set(id),
            name: Set(update.name),
            email: Set(update.email),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let result = model
            .update(&self.db)
            .await
            .map_err(|e| RecordsError::database_operation(format!("更新教师失败: {e}")))?;

        Ok(Some(result.into_teacher()))
    }

    /// 删除教师，先取消其所有课程分配
    pub async fn delete_teacher_impl(&self, id: i64) -> Result<bool> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| RecordsError::database_operation(format!("开启事务失败: {e}")))?;

        Subjects::update_many()
            .col_expr(SubjectColumn::TeacherId, Expr::value(Option::<i64>::None))
            .filter(SubjectColumn::TeacherId.eq(id))
            .exec(&txn)
            .await
            .map_err(|e| RecordsError::database_operation(format!("取消课程分配失败: {e}")))?;

        let result = Teachers::delete_by_id(id)
            .exec(&txn)
            .await
            .map_err(|e| RecordsError::database_operation(format!("删除教师失败: {e}")))?;

        txn.commit()
            .await
            .map_err(|e| RecordsError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}
