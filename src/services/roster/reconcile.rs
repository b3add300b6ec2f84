use std::collections::HashSet;

use tracing::debug;

use super::RosterService;
use crate::errors::{RecordsError, Result};
use crate::models::enrollments::responses::RosterDelta;
use crate::models::students::entities::Student;
use crate::models::subjects::entities::Subject;

/// 计算学年应选课程：同学年的显式课程在前，其后是该学年的全部课程
///
/// 只读不写。任一显式课程不存在时返回 NotFound。
pub(crate) async fn target_subjects(
    service: &RosterService,
    roll_no: &str,
    year: i32,
    explicit_subject_ids: &[i64],
) -> Result<Vec<i64>> {
    let storage = service.storage();

    let mut requested: Vec<Subject> = Vec::with_capacity(explicit_subject_ids.len());
    let mut seen = HashSet::new();
    for &subject_id in explicit_subject_ids {
        if !seen.insert(subject_id) {
            continue;
        }
        let subject = storage
            .get_subject_by_id(subject_id)
            .await?
            .ok_or_else(|| RecordsError::not_found(format!("Subject not found with id {subject_id}")))?;
        requested.push(subject);
    }

    let mut targets = Vec::new();
    let mut included = HashSet::new();
    for subject in &requested {
        if subject.year != year {
            debug!(
                "Skipping subject {} (year {}) for student {} in year {}",
                subject.code, subject.year, roll_no, year
            );
            continue;
        }
        if included.insert(subject.id) {
            targets.push(subject.id);
        }
    }

    // 每次都重新读取课程目录
    for subject in storage.list_subjects_by_year(year).await? {
        if included.insert(subject.id) {
            targets.push(subject.id);
        }
    }

    Ok(targets)
}

pub async fn reconcile_enrollments(
    service: &RosterService,
    student: &Student,
    explicit_subject_ids: &[i64],
) -> Result<RosterDelta> {
    let storage = service.storage();
    let targets =
        target_subjects(service, &student.roll_no, student.year, explicit_subject_ids).await?;
    let enrollments = storage.list_enrollments_by_student(student.id).await?;

    let mut enrolled = HashSet::new();
    let mut remove = Vec::new();
    for enrollment in enrollments {
        // 学年不符或重复的选课一并移除
        if enrollment.subject_year != student.year || !enrolled.insert(enrollment.subject_id) {
            remove.push(enrollment.id);
        }
    }

    let add: Vec<i64> = targets
        .into_iter()
        .filter(|subject_id| !enrolled.contains(subject_id))
        .collect();

    let delta = RosterDelta {
        added: add.len(),
        removed: remove.len(),
    };
    if delta.is_empty() {
        return Ok(delta);
    }

    storage
        .apply_enrollment_delta(student.id, &add, &remove)
        .await?;

    debug!(
        "Reconciled student {}: +{} -{}",
        student.roll_no, delta.added, delta.removed
    );
    Ok(delta)
}
