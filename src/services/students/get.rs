use super::StudentService;
use crate::errors::Result;
use crate::models::students::responses::StudentResponse;

pub async fn get_student(service: &StudentService, roll_no: &str) -> Result<StudentResponse> {
    let student = service.require_student(roll_no).await?;
    service.to_response(student).await
}

pub async fn list_students(service: &StudentService) -> Result<Vec<StudentResponse>> {
    let students = service.storage().list_students().await?;

    let mut responses = Vec::with_capacity(students.len());
    for student in students {
        responses.push(service.to_response(student).await?);
    }
    Ok(responses)
}
