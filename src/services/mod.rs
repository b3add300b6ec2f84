pub mod analytics;
pub mod exam_results;
pub mod exams;
pub mod roster;
pub mod students;
pub mod subjects;
pub mod teachers;

pub use analytics::AnalyticsService;
pub use exam_results::ExamResultService;
pub use exams::ExamService;
pub use roster::RosterService;
pub use students::StudentService;
pub use subjects::SubjectService;
pub use teachers::TeacherService;

use std::sync::Arc;

use crate::errors::RecordsError;
use crate::storage::Storage;

/// 共享同一存储与同一选课同步器的全部服务
pub struct RecordsServices {
    pub roster: Arc<RosterService>,
    pub students: StudentService,
    pub teachers: TeacherService,
    pub subjects: SubjectService,
    pub exams: ExamService,
    pub exam_results: ExamResultService,
    pub analytics: AnalyticsService,
}

impl RecordsServices {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        let roster = Arc::new(RosterService::new(Arc::clone(&storage)));
        Self {
            students: StudentService::new(Arc::clone(&storage), Arc::clone(&roster)),
            teachers: TeacherService::new(Arc::clone(&storage)),
            subjects: SubjectService::new(Arc::clone(&storage), Arc::clone(&roster)),
            exams: ExamService::new(Arc::clone(&storage)),
            exam_results: ExamResultService::new(Arc::clone(&storage)),
            analytics: AnalyticsService::new(storage),
            roster,
        }
    }
}

/// 唯一约束冲突转换为 Conflict，其余错误原样返回
pub(crate) fn map_unique_violation(err: RecordsError, what: &str) -> RecordsError {
    let msg = err.message();
    if msg.contains("UNIQUE constraint failed")
        || msg.contains("duplicate key")
        || msg.contains("Duplicate entry")
    {
        RecordsError::conflict(format!("{what} already exists"))
    } else {
        err
    }
}

pub(crate) fn ensure_positive_year(year: i32) -> crate::errors::Result<()> {
    if year <= 0 {
        return Err(RecordsError::validation(format!(
            "Year must be positive, got {year}"
        )));
    }
    Ok(())
}
