//! 成绩指标计算
//!
//! 所有指标都基于百分比：`marks * 100 / max_marks`，只统计已录入的成绩。

use crate::models::exam_results::entities::ExamResult;

/// 及格线（百分比）
pub const PASS_THRESHOLD: f64 = 40.0;
/// 优秀线（百分比）
pub const DISTINCTION_THRESHOLD: f64 = 75.0;

// 教师综合评分权重
pub const AVERAGE_WEIGHT: f64 = 0.6;
pub const PASS_WEIGHT: f64 = 0.3;
pub const DISTINCTION_WEIGHT: f64 = 0.1;

/// 一组成绩的汇总指标
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Metrics {
    pub average: f64,
    pub pass_rate: f64,
    pub distinction_count: u64,
    pub graded: u64,
}

impl Metrics {
    /// 优秀率（百分比）
    pub fn distinction_rate(&self) -> f64 {
        if self.graded == 0 {
            return 0.0;
        }
        self.distinction_count as f64 * 100.0 / self.graded as f64
    }

    /// 综合评分，没有成绩时为 0
    pub fn performance_score(&self) -> f64 {
        if self.graded == 0 {
            return 0.0;
        }
        self.average * AVERAGE_WEIGHT
            + self.pass_rate * PASS_WEIGHT
            + self.distinction_rate() * DISTINCTION_WEIGHT
    }
}

/// 将得分换算为百分比
pub fn percentage(marks: i32, max_marks: i32) -> f64 {
    f64::from(marks) * 100.0 / f64::from(max_marks)
}

/// 汇总一组百分比
pub fn summarize_percentages(percentages: &[f64]) -> Metrics {
    if percentages.is_empty() {
        return Metrics::default();
    }

    let n = percentages.len() as f64;
    let passed = percentages.iter().filter(|p| **p >= PASS_THRESHOLD).count();
    let distinctions = percentages
        .iter()
        .filter(|p| **p >= DISTINCTION_THRESHOLD)
        .count();

    Metrics {
        average: percentages.iter().sum::<f64>() / n,
        pass_rate: passed as f64 * 100.0 / n,
        distinction_count: distinctions as u64,
        graded: percentages.len() as u64,
    }
}

/// 汇总考试成绩，未录入或满分非法的记录不参与统计
pub fn summarize<'a, I>(results: I) -> Metrics
where
    I: IntoIterator<Item = &'a ExamResult>,
{
    let percentages: Vec<f64> = results
        .into_iter()
        .filter(|r| r.max_marks > 0)
        .filter_map(|r| r.marks_obtained.map(|m| percentage(m, r.max_marks)))
        .collect();

    summarize_percentages(&percentages)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(marks: Option<i32>, max_marks: i32) -> ExamResult {
        ExamResult {
            id: 0,
            exam_id: 1,
            student_id: 1,
            marks_obtained: marks,
            max_marks,
            updated_at: chrono::Utc::now(),
        }
    }

    #[test]
    fn test_percentage_normalization() {
        let metrics = summarize(&[result(Some(18), 20)]);
        assert_eq!(metrics.average, 90.0);
        assert_eq!(metrics.pass_rate, 100.0);
        assert_eq!(metrics.distinction_count, 1);
    }

    #[test]
    fn test_threshold_boundaries() {
        // 40% 及格，75% 优秀；略低于线的不计入
        let metrics = summarize(&[
            result(Some(40), 100),
            result(Some(75), 100),
            result(Some(399), 1000),
            result(Some(749), 1000),
        ]);
        assert_eq!(metrics.graded, 4);
        assert_eq!(metrics.pass_rate, 75.0);
        assert_eq!(metrics.distinction_count, 1);
    }

    #[test]
    fn test_ungraded_results_are_ignored() {
        let metrics = summarize(&[result(None, 20), result(Some(10), 20)]);
        assert_eq!(metrics.graded, 1);
        assert_eq!(metrics.average, 50.0);
    }

    #[test]
    fn test_empty_results_yield_zeros() {
        let metrics = summarize(&[result(None, 20)]);
        assert_eq!(metrics, Metrics::default());
        assert_eq!(metrics.performance_score(), 0.0);
    }

    #[test]
    fn test_performance_score() {
        let metrics = Metrics {
            average: 80.0,
            pass_rate: 90.0,
            distinction_count: 5,
            graded: 10,
        };
        // 80*0.6 + 90*0.3 + 50*0.1
        assert!((metrics.performance_score() - 80.0).abs() < 1e-9);
    }
}
