use tracing::info;

use super::SubjectService;
use crate::errors::{RecordsError, Result};

/// 删除课程，其考试、成绩与选课记录一并删除
pub async fn delete_subject(service: &SubjectService, id: i64) -> Result<()> {
    if !service.storage().delete_subject(id).await? {
        return Err(RecordsError::not_found(format!("Subject not found with id {id}")));
    }

    info!("Subject {} deleted", id);
    Ok(())
}
