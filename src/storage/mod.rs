use std::sync::Arc;

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

use crate::errors::Result;

pub mod sea_orm_storage;

/// 数据访问契约
///
/// 所有写操作对同一调用中的后续读取立即可见。
#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 学生管理方法
    // 创建学生并写入初始选课（同一事务）
    async fn create_student(
        &self,
        student: CreateStudentRequest,
        subject_ids: &[i64],
    ) -> Result<Student>;
    // 通过ID获取学生
    async fn get_student_by_id(&self, id: i64) -> Result<Option<Student>>;
    // 通过学号获取学生
    async fn get_student_by_roll_no(&self, roll_no: &str) -> Result<Option<Student>>;
    // 列出全部学生
    async fn list_students(&self) -> Result<Vec<Student>>;
    // 列出某学年的学生
    async fn list_students_by_year(&self, year: i32) -> Result<Vec<Student>>;
    // 更新学生信息
    async fn update_student(&self, id: i64, update: UpdateStudentRequest)
    -> Result<Option<Student>>;
    // 删除学生（连同成绩与选课）
    async fn delete_student(&self, id: i64) -> Result<bool>;

    /// 教师管理方法
    async fn create_teacher(&self, teacher: TeacherRequest) -> Result<Teacher>;
    async fn get_teacher_by_id(&self, id: i64) -> Result<Option<Teacher>>;
    async fn list_teachers(&self) -> Result<Vec<Teacher>>;
    async fn update_teacher(&self, id: i64, update: TeacherRequest) -> Result<Option<Teacher>>;
    // 删除教师前先取消其课程分配
    async fn delete_teacher(&self, id: i64) -> Result<bool>;

    /// 课程管理方法
    async fn create_subject(&self, subject: SubjectRequest) -> Result<Subject>;
    async fn get_subject_by_id(&self, id: i64) -> Result<Option<Subject>>;
    async fn list_subjects(&self) -> Result<Vec<Subject>>;
    // 按学年查询课程（每次都直接读库）
    async fn list_subjects_by_year(&self, year: i32) -> Result<Vec<Subject>>;
    async fn list_subjects_by_teacher(&self, teacher_id: i64) -> Result<Vec<Subject>>;
    async fn update_subject(&self, id: i64, update: SubjectRequest) -> Result<Option<Subject>>;
    // 分配或取消分配教师
    async fn assign_teacher(&self, subject_id: i64, teacher_id: Option<i64>)
    -> Result<Option<Subject>>;
    // 删除课程（连同考试、成绩与选课）
    async fn delete_subject(&self, id: i64) -> Result<bool>;

    /// 选课方法
    async fn list_enrollments_by_student(&self, student_id: i64) -> Result<Vec<Enrollment>>;
    async fn list_enrollments_by_subject(&self, subject_id: i64) -> Result<Vec<Enrollment>>;
    async fn get_enrollment(&self, student_id: i64, subject_id: i64)
    -> Result<Option<Enrollment>>;
    async fn create_enrollment(&self, student_id: i64, subject_id: i64) -> Result<Enrollment>;
    async fn delete_enrollment(&self, enrollment_id: i64) -> Result<bool>;
    // 原子地应用一次选课增删，失败时不留下部分结果
    async fn apply_enrollment_delta(
        &self,
        student_id: i64,
        add_subject_ids: &[i64],
        remove_enrollment_ids: &[i64],
    ) -> Result<()>;

    /// 考试管理方法
    async fn create_exam(&self, exam: ExamDraft) -> Result<Exam>;
    async fn get_exam_by_id(&self, id: i64) -> Result<Option<Exam>>;
    async fn list_exams(&self) -> Result<Vec<Exam>>;
    async fn list_exams_by_subjects(&self, subject_ids: &[i64]) -> Result<Vec<Exam>>;
    async fn update_exam(&self, id: i64, exam: ExamDraft) -> Result<Option<Exam>>;
    // 删除考试（连同成绩）
    async fn delete_exam(&self, id: i64) -> Result<bool>;

    /// 成绩方法
    async fn list_results_by_student(&self, student_id: i64) -> Result<Vec<ExamResult>>;
    async fn list_results_by_exam(&self, exam_id: i64) -> Result<Vec<ExamResult>>;
    async fn list_results_by_exams(&self, exam_ids: &[i64]) -> Result<Vec<ExamResult>>;
    async fn get_result(&self, exam_id: i64, student_id: i64) -> Result<Option<ExamResult>>;
    async fn create_result(
        &self,
        exam_id: i64,
        student_id: i64,
        marks_obtained: Option<i32>,
    ) -> Result<ExamResult>;
    async fn update_result_marks(
        &self,
        result_id: i64,
        marks_obtained: Option<i32>,
    ) -> Result<Option<ExamResult>>;
}

pub async fn create_storage() -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::new_async().await?;
    Ok(Arc::new(storage))
}
