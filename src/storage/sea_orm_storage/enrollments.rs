//! 选课存储操作

use super::SeaOrmStorage;
use crate::entity::enrollments::{ActiveModel, Column, Entity as Enrollments, Model};
use crate::entity::subjects::{Entity as Subjects, Model as SubjectModel};
use crate::errors::{RecordsError, Result};
use crate::models::enrollments::entities::Enrollment;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, DatabaseTransaction, EntityTrait,
    QueryFilter, QueryOrder, Set, TransactionTrait,
};

/// 关联查询结果转换为业务模型，课程缺失的记录直接丢弃
fn with_subject_year(rows: Vec<(Model, Option<SubjectModel>)>) -> Vec<Enrollment> {
    rows.into_iter()
        .filter_map(|(enrollment, subject)| {
            subject.map(|s| enrollment.into_enrollment(s.year))
        })
        .collect()
}

/// 在给定连接上批量写入选课记录
pub(super) async fn insert_enrollments<C: ConnectionTrait>(
    conn: &C,
    student_id: i64,
    subject_ids: &[i64],
) -> Result<()> {
    let now = chrono::Utc::now().timestamp();
    for &subject_id in subject_ids {
        ActiveModel {
            student_id: Set(student_id),
            subject_id: Set(subject_id),
            enrolled_at: Set(now),
            ..Default::default()
        }
        .insert(conn)
        .await
        .map_err(|e| RecordsError::database_operation(format!("创建选课记录失败: {e}")))?;
    }
    Ok(())
}

/// 事务内执行的写入失败时显式回滚，再返回原始错误
pub(super) async fn finish_transaction<T>(txn: DatabaseTransaction, outcome: Result<T>) -> Result<T> {
    match outcome {
        Ok(value) => {
            txn.commit()
                .await
                .map_err(|e| RecordsError::database_operation(format!("提交事务失败: {e}")))?;
            Ok(value)
        }
        Err(err) => {
            txn.rollback()
                .await
                .map_err(|e| RecordsError::database_operation(format!("回滚事务失败: {e}")))?;
            Err(err)
        }
    }
}

async fn write_delta(
    txn: &DatabaseTransaction,
    student_id: i64,
    add_subject_ids: &[i64],
    remove_enrollment_ids: &[i64],
) -> Result<()> {
    if !remove_enrollment_ids.is_empty() {
        Enrollments::delete_many()
            .filter(Column::StudentId.eq(student_id))
            .filter(Column::Id.is_in(remove_enrollment_ids.iter().copied()))
            .exec(txn)
            .await
            .map_err(|e| RecordsError::database_operation(format!("删除选课记录失败: {e}")))?;
    }
    insert_enrollments(txn, student_id, add_subject_ids).await
}

impl SeaOrmStorage {
    /// 列出学生的选课记录
    pub async fn list_enrollments_by_student_impl(
        &self,
        student_id: i64,
    ) -> Result<Vec<Enrollment>> {
        let rows = Enrollments::find()
            .filter(Column::StudentId.eq(student_id))
            .order_by_asc(Column::Id)
            .find_also_related(Subjects)
            .all(&self.db)
            .await
            .map_err(|e| RecordsError::database_operation(format!("查询学生选课失败: {e}")))?;

        Ok(with_subject_year(rows))
    }

    /// 列出课程的选课记录
    pub async fn list_enrollments_by_subject_impl(
        &self,
        subject_id: i64,
    ) -> Result<Vec<Enrollment>> {
        let rows = Enrollments::find()
            .filter(Column::SubjectId.eq(subject_id))
            .order_by_asc(Column::Id)
            .find_also_related(Subjects)
            .all(&self.db)
            .await
            .map_err(|e| RecordsError::database_operation(format!("查询课程选课失败: {e}")))?;

        Ok(with_subject_year(rows))
    }

    /// 获取学生与课程之间的选课记录
    pub async fn get_enrollment_impl(
        &self,
        student_id: i64,
        subject_id: i64,
    ) -> Result<Option<Enrollment>> {
        let row = Enrollments::find()
            .filter(
                Condition::all()
                    .add(Column::StudentId.eq(student_id))
                    .add(Column::SubjectId.eq(subject_id)),
            )
            .find_also_related(Subjects)
            .one(&self.db)
            .await
            .map_err(|e| RecordsError::database_operation(format!("查询选课记录失败: {e}")))?;

        Ok(row.and_then(|(enrollment, subject)| {
            subject.map(|s| enrollment.into_enrollment(s.year))
        }))
    }

    /// 创建选课记录
    pub async fn create_enrollment_impl(
        &self,
        student_id: i64,
        subject_id: i64,
    ) -> Result<Enrollment> {
        let subject = Subjects::find_by_id(subject_id)
            .one(&self.db)
            .await
            .map_err(|e| RecordsError::database_operation(format!("查询课程失败: {e}")))?
            .ok_or_else(|| RecordsError::not_found(format!("Subject not found with id {subject_id}")))?;

        let model = ActiveModel {
            student_id: Set(student_id),
            subject_id: Set(subject_id),
            enrolled_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| RecordsError::database_operation(format!("创建选课记录失败: {e}")))?;

        Ok(result.into_enrollment(subject.year))
    }

    /// 删除选课记录
    pub async fn delete_enrollment_impl(&self, enrollment_id: i64) -> Result<bool> {
        let result = Enrollments::delete_by_id(enrollment_id)
            .exec(&self.db)
            .await
            .map_err(|e| RecordsError::database_operation(format!("删除选课记录失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 在同一事务中删除并新增学生的选课记录，任一步失败则全部回滚
    pub async fn apply_enrollment_delta_impl(
        &self,
        student_id: i64,
        add_subject_ids: &[i64],
        remove_enrollment_ids: &[i64],
    ) -> Result<()> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| RecordsError::database_operation(format!("开启事务失败: {e}")))?;

        let outcome = write_delta(&txn, student_id, add_subject_ids, remove_enrollment_ids).await;
        finish_transaction(txn, outcome).await
    }
}
