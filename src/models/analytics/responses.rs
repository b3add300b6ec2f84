use serde::Serialize;

/// 学生成绩表现
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct StudentPerformance {
    pub student_id: i64,
    pub roll_no: String,
    pub name: String,
    pub average_marks: f64,   // 平均百分比
    pub pass_percentage: f64, // 及格率
    pub year: i32,
}

/// 课程成绩表现
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SubjectPerformance {
    pub subject_id: i64,
    pub subject_name: String,
    pub average_marks: f64,
    pub pass_percentage: f64,
    pub distinction_count: u64,
}

/// 教师教学表现
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TeacherPerformance {
    pub teacher_id: i64,
    pub teacher_name: String,
    pub average_marks: f64,
    pub pass_percentage: f64,
    pub distinction_count: u64,
    pub performance_score: f64, // 综合评分
}

/// 考试成绩录入进度
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct ExamCompletion {
    pub exam_id: i64,
    pub total_students: i64,
    pub results_entered: i64,
}
