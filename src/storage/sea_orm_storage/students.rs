//! 学生存储操作

use super::SeaOrmStorage;
use super::enrollments::{finish_transaction, insert_enrollments};
use crate::entity::enrollments::{Column as EnrollmentColumn, Entity as Enrollments};
use crate::entity::exam_results::{Column as ExamResultColumn, Entity as ExamResults};
use crate::entity::students::{ActiveModel, Column, Entity as Students};
use crate::errors::{RecordsError, Result};
use crate::models::students::{
    entities::Student,
    requests::{CreateStudentRequest, UpdateStudentRequest},
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};

impl SeaOrmStorage {
    /// 创建学生并写入初始选课，两者在同一事务中完成
    pub async fn create_student_impl(
        &self,
        req: CreateStudentRequest,
        subject_ids: &[i64],
    ) -> Result<Student> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            roll_no: Set(req.roll_no),
            name: Set(req.name),
            email: Set(req.email),
            department: Set(req.department),
            year: Set(req.year),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| RecordsError::database_operation(format!("开启事务失败: {e}")))?;

        let outcome = async {
            let student = model
                .insert(&txn)
                .await
                .map_err(|e| RecordsError::database_operation(format!("创建学生失败: {e}")))?;
            insert_enrollments(&txn, student.id, subject_ids).await?;
            Ok::<_, RecordsError>(student.into_student())
        }
        .await;

        finish_transaction(txn, outcome).await
    }

    /// 通过 ID 获取学生
    pub async fn get_student_by_id_impl(&self, id: i64) -> Result<Option<Student>> {
        let result = Students::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| RecordsError::database_operation(format!("查询学生失败: {e}")))?;

        Ok(result.map(|m| m.into_student()))
    }

    /// 通过学号获取学生
    pub async fn get_student_by_roll_no_impl(&self, roll_no: &str) -> Result<Option<Student>> {
        let result = Students::find()
            .filter(Column::RollNo.eq(roll_no))
            .one(&self.db)
            .await
            .map_err(|e| RecordsError::database_operation(format!("查询学生失败: {e}")))?;

        Ok(result.map(|m| m.into_student()))
    }

    /// 列出学生，可按学年筛选
    pub async fn list_students_impl(&self, year: Option<i32>) -> Result<Vec<Student>> {
        let mut select = Students::find();

        if let Some(year) = year {
            select = select.filter(Column::Year.eq(year));
        }

        let students = select
            .order_by_asc(Column::RollNo)
            .all(&self.db)
            .await
            .map_err(|e| RecordsError::database_operation(format!("查询学生列表失败: {e}")))?;

        Ok(students.into_iter().map(|m| m.into_student()).collect())
    }

    /// 更新学生信息
    pub async fn update_student_impl(
        &self,
        id: i64,
        update: UpdateStudentRequest,
    ) -> Result<Option<Student>> {
        // 先检查学生是否存在
        if self.get_student_by_id_impl(id).await?.is_none() {
            return Ok(None);
        }

        let model = ActiveModel {
            id: Set(id),
            roll_no: Set(update.roll_no),
            name: Set(update.name),
            email: Set(update.email),
            department: Set(update.department),
            year: Set(update.year),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let result = model
            .update(&self.db)
            .await
            .map_err(|e| RecordsError::database_operation(format!("更新学生失败: {e}")))?;

        Ok(Some(result.into_student()))
    }

    /// 删除学生，成绩与选课记录一并删除
    pub async fn delete_student_impl(&self, id: i64) -> Result<bool> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| RecordsError::database_operation(format!("开启事务失败: {e}")))?;

        ExamResults::delete_many()
            .filter(ExamResultColumn::StudentId.eq(id))
            .exec(&txn)
            .await
            .map_err(|e| RecordsError::database_operation(format!("删除学生成绩失败: {e}")))?;

        Enrollments::delete_many()
            .filter(EnrollmentColumn::StudentId.eq(id))
            .exec(&txn)
            .await
            .map_err(|e| RecordsError::database_operation(format!("删除学生选课失败: {e}")))?;

        let result = Students::delete_by_id(id)
            .exec(&txn)
            .await
            .map_err(|e| RecordsError::database_operation(format!("删除学生失败: {e}")))?;

        txn.commit()
            .await
            .map_err(|e| RecordsError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}
