use tracing::info;

use super::StudentService;
use crate::errors::{RecordsError, Result};
use crate::models::students::requests::CreateStudentRequest;
use crate::models::students::responses::StudentResponse;
use crate::services::{ensure_positive_year, map_unique_violation};

pub async fn create_student(
    service: &StudentService,
    req: CreateStudentRequest,
) -> Result<StudentResponse> {
    ensure_positive_year(req.year)?;

    let storage = service.storage();
    if storage.get_student_by_roll_no(&req.roll_no).await?.is_some() {
        return Err(RecordsError::conflict(format!(
            "Student with rollNo {} already exists",
            req.roll_no
        )));
    }

    // 先确定初始选课，学生与选课在同一事务中写入
    let explicit = req.subject_ids.clone().unwrap_or_default();
    let subject_ids = service
        .roster()
        .initial_subjects(&req.roll_no, req.year, &explicit)
        .await?;

    let student = storage
        .create_student(req, &subject_ids)
        .await
        .map_err(|e| map_unique_violation(e, "Student"))?;

    info!(
        "Student {} created with {} enrollments",
        student.roll_no,
        subject_ids.len()
    );
    service.to_response(student).await
}
