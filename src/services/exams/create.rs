use tracing::info;

use super::{ExamService, detail};
use crate::errors::Result;
use crate::models::exams::requests::ExamRequest;
use crate::models::exams::responses::ExamResponse;

pub async fn create_exam(service: &ExamService, req: ExamRequest) -> Result<ExamResponse> {
    let draft = req.into_draft()?;
    service.require_subject(draft.subject_id).await?;

    let exam = service.storage().create_exam(draft).await?;

    info!("Exam {} ({}) created for subject {}", exam.name, exam.id, exam.subject_id);
    detail::build_response(service, exam).await
}
