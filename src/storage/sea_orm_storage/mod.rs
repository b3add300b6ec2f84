//! SeaORM 存储实现
//!
//! 统一的数据库存储层，支持 SQLite、PostgreSQL 和 MySQL。

mod enrollments;
mod exam_results;
mod exams;
mod students;
mod subjects;
mod teachers;

#[cfg(test)]
pub(crate) mod testing;

use crate::config::{AppConfig, DatabaseConfig};
use crate::errors::{RecordsError, Result};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::time::Duration;
use tracing::info;

/// SeaORM 存储实现
#[derive(Clone)]
pub struct SeaOrmStorage {
    pub(crate) db: DatabaseConnection,
}

impl SeaOrmStorage {
    /// 使用全局配置创建 SeaORM 存储实例
    pub async fn new_async() -> Result<Self> {
        let config = AppConfig::get();
        Self::connect(&config.database.url, &config.database).await
    }

    /// 按给定 URL 连接数据库并运行迁移
    pub async fn connect(url: &str, config: &DatabaseConfig) -> Result<Self> {
        let db_url = Self::build_database_url(url)?;

        // 根据数据库类型选择连接方式
        let db = if db_url.starts_with("sqlite:") {
            Self::connect_sqlite(&db_url, config).await?
        } else {
            Self::connect_generic(&db_url, config).await?
        };

        // 运行迁移
        Migrator::up(&db, None)
            .await
            .map_err(|e| RecordsError::database_operation(format!("数据库迁移失败: {e}")))?;

        info!("SeaORM 存储初始化完成，数据库: {}", db_url);

        Ok(Self { db })
    }

    /// SQLite 专用连接（WAL + pragma 优化）
    async fn connect_sqlite(url: &str, config: &DatabaseConfig) -> Result<DatabaseConnection> {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::sqlite::{
            SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
        };
        use std::str::FromStr;

        let opt = SqliteConnectOptions::from_str(url)
            .map_err(|e| RecordsError::database_config(format!("SQLite URL 解析失败: {e}")))?
            .create_if_missing(true)
            .foreign_keys(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(Duration::from_secs(5))
            .pragma("cache_size", "-64000")
            .pragma("temp_store", "memory");

        // 内存数据库每个连接都是独立的库，只能使用单连接且不能回收
        let in_memory = url.contains(":memory:");
        let (max_connections, idle_timeout) = if in_memory {
            (1, None)
        } else {
            (config.pool_size.max(1), Some(Duration::from_secs(300)))
        };

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .min_connections(1)
            .test_before_acquire(true)
            .acquire_timeout(Duration::from_secs(config.timeout))
            .idle_timeout(idle_timeout)
            .max_lifetime(if in_memory { None } else { Some(Duration::from_secs(1800)) })
            .connect_with(opt)
            .await
            .map_err(|e| RecordsError::database_connection(format!("SQLite 连接失败: {e}")))?;

        Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
    }

    /// 通用连接（PostgreSQL、MySQL 等）
    async fn connect_generic(url: &str, config: &DatabaseConfig) -> Result<DatabaseConnection> {
        let mut opt = ConnectOptions::new(url);
        opt.max_connections(config.pool_size)
            .min_connections(1)
            .connect_timeout(Duration::from_secs(config.timeout))
            .acquire_timeout(Duration::from_secs(config.timeout))
            .idle_timeout(Duration::from_secs(600))
            .max_lifetime(Duration::from_secs(1800))
            .sqlx_logging(false)
            .sqlx_logging_level(tracing::log::LevelFilter::Debug);

        Database::connect(opt)
            .await
            .map_err(|e| RecordsError::database_connection(format!("无法连接到数据库: {e}")))
    }

    /// 从 URL 自动推断数据库类型并构建连接 URL
    fn build_database_url(url: &str) -> Result<String> {
        if url.starts_with("sqlite:") {
            Ok(url.to_string())
        } else if url == ":memory:" {
            Ok("sqlite::memory:".to_string())
        } else if url.ends_with(".db") || url.ends_with(".sqlite") {
            Ok(format!("sqlite://{}?mode=rwc", url))
        } else if url.starts_with("postgres://")
            || url.starts_with("postgresql://")
            || url.starts_with("mysql://")
            || url.starts_with("mariadb://")
        {
            Ok(url.to_string())
        } else {
            Err(RecordsError::database_config(format!(
                "无法从 URL 推断数据库类型: {url}. 支持: sqlite://, postgres://, mysql://, 或 .db/.sqlite 文件路径"
            )))
        }
    }
}

// Storage trait 实现
use crate::models::{
    enrollments::entities::Enrollment,
    exam_results::entities::ExamResult,
    exams::entities::{Exam, ExamDraft},
    students::{
        entities::Student,
        requests::{CreateStudentRequest, UpdateStudentRequest},
    },
    subjects::{entities::Subject, requests::SubjectRequest},
    teachers::{entities::Teacher, requests::TeacherRequest},
};
use crate::storage::Storage;
use async_trait::async_trait;

#[async_trait]
impl Storage for SeaOrmStorage {
    // 学生模块
    async fn create_student(
        &self,
        student: CreateStudentRequest,
        subject_ids: &[i64],
    ) -> Result<Student> {
        self.create_student_impl(student, subject_ids).await
    }

    async fn get_student_by_id(&self, id: i64) -> Result<Option<Student>> {
        self.get_student_by_id_impl(id).await
    }

    async fn get_student_by_roll_no(&self, roll_no: &str) -> Result<Option<Student>> {
        self.get_student_by_roll_no_impl(roll_no).await
    }

    async fn list_students(&self) -> Result<Vec<Student>> {
        self.list_students_impl(None).await
    }

    async fn list_students_by_year(&self, year: i32) -> Result<Vec<Student>> {
        self.list_students_impl(Some(year)).await
    }

    async fn update_student(
        &self,
        id: i64,
        update: UpdateStudentRequest,
    ) -> Result<Option<Student>> {
        self.update_student_impl(id, update).await
    }

    async fn delete_student(&self, id: i64) -> Result<bool> {
        self.delete_student_impl(id).await
    }

    // 教师模块
    async fn create_teacher(&self, teacher: TeacherRequest) -> Result<Teacher> {
        self.create_teacher_impl(teacher).await
    }

    async fn get_teacher_by_id(&self, id: i64) -> Result<Option<Teacher>> {
        self.get_teacher_by_id_impl(id).await
    }

    async fn list_teachers(&self) -> Result<Vec<Teacher>> {
        self.list_teachers_impl().await
    }

    async fn update_teacher(&self, id: i64, update: TeacherRequest) -> Result<Option<Teacher>> {
        self.update_teacher_impl(id, update).await
    }

    async fn delete_teacher(&self, id: i64) -> Result<bool> {
        self.delete_teacher_impl(id).await
    }

    // 课程模块
    async fn create_subject(&self, subject: SubjectRequest) -> Result<Subject> {
        self.create_subject_impl(subject).await
    }

    async fn get_subject_by_id(&self, id: i64) -> Result<Option<Subject>> {
        self.get_subject_by_id_impl(id).await
    }

    async fn list_subjects(&self) -> Result<Vec<Subject>> {
        self.list_subjects_impl(None, None).await
    }

    async fn list_subjects_by_year(&self, year: i32) -> Result<Vec<Subject>> {
        self.list_subjects_impl(Some(year), None).await
    }

    async fn list_subjects_by_teacher(&self, teacher_id: i64) -> Result<Vec<Subject>> {
        self.list_subjects_impl(None, Some(teacher_id)).await
    }

    async fn update_subject(&self, id: i64, update: SubjectRequest) -> Result<Option<Subject>> {
        self.update_subject_impl(id, update).await
    }

    async fn assign_teacher(
        &self,
        subject_id: i64,
        teacher_id: Option<i64>,
    ) -> Result<Option<Subject>> {
        self.assign_teacher_impl(subject_id, teacher_id).await
    }

    async fn delete_subject(&self, id: i64) -> Result<bool> {
        self.delete_subject_impl(id).await
    }

    // 选课模块
    async fn list_enrollments_by_student(&self, student_id: i64) -> Result<Vec<Enrollment>> {
        self.list_enrollments_by_student_impl(student_id).await
    }

    async fn list_enrollments_by_subject(&self, subject_id: i64) -> Result<Vec<Enrollment>> {
        self.list_enrollments_by_subject_impl(subject_id).await
    }

    async fn get_enrollment(
        &self,
        student_id: i64,
        subject_id: i64,
    ) -> Result<Option<Enrollment>> {
        self.get_enrollment_impl(student_id, subject_id).await
    }

    async fn create_enrollment(&self, student_id: i64, subject_id: i64) -> Result<Enrollment> {
        self.create_enrollment_impl(student_id, subject_id).await
    }

    async fn delete_enrollment(&self, enrollment_id: i64) -> Result<bool> {
        self.delete_enrollment_impl(enrollment_id).await
    }

    async fn apply_enrollment_delta(
        &self,
        student_id: i64,
        add_subject_ids: &[i64],
        remove_enrollment_ids: &[i64],
    ) -> Result<()> {
        self.apply_enrollment_delta_impl(student_id, add_subject_ids, remove_enrollment_ids)
            .await
    }

    // 考试模块
    async fn create_exam(&self, exam: ExamDraft) -> Result<Exam> {
        self.create_exam_impl(exam).await
    }

    async fn get_exam_by_id(&self, id: i64) -> Result<Option<Exam>> {
        self.get_exam_by_id_impl(id).await
    }

    async fn list_exams(&self) -> Result<Vec<Exam>> {
        self.list_exams_impl(None).await
    }

    async fn list_exams_by_subjects(&self, subject_ids: &[i64]) -> Result<Vec<Exam>> {
        self.list_exams_impl(Some(subject_ids)).await
    }

    async fn update_exam(&self, id: i64, exam: ExamDraft) -> Result<Option<Exam>> {
        self.update_exam_impl(id, exam).await
    }

    async fn delete_exam(&self, id: i64) -> Result<bool> {
        self.delete_exam_impl(id).await
    }

    // 成绩模块
    async fn list_results_by_student(&self, student_id: i64) -> Result<Vec<ExamResult>> {
        self.list_results_by_student_impl(student_id).await
    }

    async fn list_results_by_exam(&self, exam_id: i64) -> Result<Vec<ExamResult>> {
        self.list_results_by_exams_impl(&[exam_id]).await
    }

    async fn list_results_by_exams(&self, exam_ids: &[i64]) -> Result<Vec<ExamResult>> {
        self.list_results_by_exams_impl(exam_ids).await
    }

    async fn get_result(&self, exam_id: i64, student_id: i64) -> Result<Option<ExamResult>> {
        self.get_result_impl(exam_id, student_id).await
    }

    async fn create_result(
        &self,
        exam_id: i64,
        student_id: i64,
        marks_obtained: Option<i32>,
    ) -> Result<ExamResult> {
        self.create_result_impl(exam_id, student_id, marks_obtained)
            .await
    }

    async fn update_result_marks(
        &self,
        result_id: i64,
        marks_obtained: Option<i32>,
    ) -> Result<Option<ExamResult>> {
        self.update_result_marks_impl(result_id, marks_obtained)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_database_url() {
        assert_eq!(
            SeaOrmStorage::build_database_url("records.db").unwrap(),
            "sqlite://records.db?mode=rwc"
        );
        assert_eq!(
            SeaOrmStorage::build_database_url(":memory:").unwrap(),
            "sqlite::memory:"
        );
        assert!(SeaOrmStorage::build_database_url("postgres://localhost/records").is_ok());
        assert!(SeaOrmStorage::build_database_url("redis://localhost").is_err());
    }
}
