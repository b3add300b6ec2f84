use super::TeacherService;
use crate::errors::Result;
use crate::models::teachers::responses::TeacherResponse;

pub async fn get_teacher(service: &TeacherService, id: i64) -> Result<TeacherResponse> {
    let teacher = service.require_teacher(id).await?;
    service.to_response(teacher).await
}

pub async fn list_teachers(service: &TeacherService) -> Result<Vec<TeacherResponse>> {
    let teachers = service.storage().list_teachers().await?;

    let mut responses = Vec::with_capacity(teachers.len());
    for teacher in teachers {
        responses.push(service.to_response(teacher).await?);
    }
    Ok(responses)
}
