//! 领域模型
//!
//! 所有实体都归后端所有，前端只持有临时副本，从不生成 id。

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::serde_helper::null_as_default;

// =========================================================
// 学生侧：课程概览
// =========================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AssignmentProgress {
    #[serde(deserialize_with = "null_as_default")]
    pub total: u32,
    #[serde(deserialize_with = "null_as_default")]
    pub completed: u32,
    #[serde(deserialize_with = "null_as_default")]
    pub active: u32,
    #[serde(deserialize_with = "null_as_default")]
    pub upcoming: u32,
    #[serde(deserialize_with = "null_as_default")]
    pub missed: u32,
}

/// 考试进度：`passed` / `completed` 是考试序号列表
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExamProgress {
    #[serde(deserialize_with = "null_as_default")]
    pub total: u32,
    #[serde(deserialize_with = "null_as_default")]
    pub passed: Vec<u32>,
    #[serde(deserialize_with = "null_as_default")]
    pub completed: Vec<u32>,
    #[serde(deserialize_with = "null_as_default")]
    pub active: u32,
    #[serde(deserialize_with = "null_as_default")]
    pub upcoming: u32,
    #[serde(deserialize_with = "null_as_default")]
    pub missed: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseSummary {
    pub course_id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub duration: Option<String>,
    #[serde(default)]
    pub mode: Option<String>,
    #[serde(default)]
    pub total_weeks: Option<u32>,
    #[serde(default)]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub expires_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub assignments: AssignmentProgress,
    #[serde(default, deserialize_with = "null_as_default")]
    pub exams: ExamProgress,
    #[serde(default, deserialize_with = "null_as_default")]
    pub eligible_for_certificate: bool,
    #[serde(default)]
    pub certificate_fee: Option<f64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub certificate_issued: bool,
}

impl CourseSummary {
    /// 计算当前周所用的起点：优先开课时间，其次创建时间
    pub fn course_start(&self) -> Option<DateTime<Utc>> {
        self.start_date.or(self.created_at)
    }
}

// =========================================================
// 学生侧：作业与考试
// =========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssignmentStatus {
    NotSubmitted,
    Submitted,
    Completed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assignment {
    #[serde(rename = "_id", default)]
    pub id: Option<String>,
    pub order: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub week: u32,
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub blog_links: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub github_links: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub study_materials: Vec<String>,
    #[serde(default)]
    pub repository_url: Option<String>,
    #[serde(default)]
    pub instructions: Option<String>,
    #[serde(default)]
    pub due_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub release_date: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub submitted: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub completed: bool,
}

impl Assignment {
    pub fn status(&self) -> AssignmentStatus {
        if self.completed {
            AssignmentStatus::Completed
        } else if self.submitted {
            AssignmentStatus::Submitted
        } else {
            AssignmentStatus::NotSubmitted
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExamQuestion {
    pub question: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub options: Vec<String>,
}

/// 学生作答用的试卷，不含正确答案
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExamPaper {
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    /// 考试时长（分钟）
    #[serde(default, deserialize_with = "null_as_default")]
    pub duration: u32,
    pub questions: Vec<ExamQuestion>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExamResult {
    pub score: f64,
    pub passed: bool,
}

// =========================================================
// 管理侧：学生与课程
// =========================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    #[serde(rename = "_id", default, deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub username: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub email: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub locked: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub courses: Vec<serde_json::Value>,
    #[serde(default)]
    pub roll_id: Option<String>,
}

impl Student {
    pub fn display_name(&self) -> &str {
        if self.name.trim().is_empty() {
            &self.username
        } else {
            &self.name
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub duration: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub mode: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub category: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub enrolled_count: u32,
    #[serde(default)]
    pub validity_months: Option<u32>,
    #[serde(default)]
    pub total_weeks: Option<u32>,
}

// =========================================================
// 提交记录
// =========================================================

/// 可能被后端 populate 的引用：要么是文档，要么只是 id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Reference<T> {
    Document(T),
    Id(String),
}

impl<T> Reference<T> {
    pub fn document(&self) -> Option<&T> {
        match self {
            Reference::Document(doc) => Some(doc),
            Reference::Id(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentRef {
    #[serde(default)]
    pub user_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourseRef {
    #[serde(default)]
    pub title: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubmissionKind {
    Assignment,
    Exam,
    Certificate,
    #[default]
    #[serde(other)]
    Module,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentSubmission {
    #[serde(default, deserialize_with = "null_as_default")]
    pub assignment_order: u32,
    #[serde(default)]
    pub repository_url: Option<String>,
    #[serde(default)]
    pub pull_request_url: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub feedback: Option<String>,
    #[serde(default)]
    pub submitted_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExamSubmission {
    #[serde(default, deserialize_with = "null_as_default")]
    pub exam_order: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub score: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub passed: bool,
    #[serde(default)]
    pub time_taken: Option<i64>,
    #[serde(default)]
    pub submitted_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CertificateRecord {
    #[serde(default)]
    pub certificate_number: Option<String>,
    #[serde(default)]
    pub payment_status: Option<String>,
    #[serde(default)]
    pub payment_amount: Option<f64>,
    #[serde(default)]
    pub issued_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "type", default, deserialize_with = "null_as_default")]
    pub kind: SubmissionKind,
    #[serde(default)]
    pub student_id: Option<Reference<StudentRef>>,
    #[serde(default)]
    pub student_user_id: Option<String>,
    #[serde(default)]
    pub course_id: Option<Reference<CourseRef>>,
    #[serde(default)]
    pub course_name: Option<String>,
    #[serde(default)]
    pub module_order: Option<u32>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
    #[serde(default)]
    pub assignment_submission: Option<AssignmentSubmission>,
    #[serde(default)]
    pub exam_submission: Option<ExamSubmission>,
    #[serde(default)]
    pub certificate: Option<CertificateRecord>,
}

/// 待人工审阅的作业提交状态
pub const STATUS_AWAITING_REVIEW: &str = "Submitted";

impl Submission {
    pub fn student_label(&self) -> String {
        self.student_id
            .as_ref()
            .and_then(|r| r.document())
            .and_then(|s| s.user_id.clone())
            .or_else(|| self.student_user_id.clone())
            .unwrap_or_default()
    }

    pub fn course_title(&self) -> String {
        self.course_id
            .as_ref()
            .and_then(|r| r.document())
            .and_then(|c| c.title.clone())
            .or_else(|| self.course_name.clone())
            .unwrap_or_default()
    }

    /// 列表中的一行标题
    pub fn headline(&self) -> String {
        match self.kind {
            SubmissionKind::Assignment => format!(
                "Assignment {} - {}",
                self.assignment_submission
                    .as_ref()
                    .map(|a| a.assignment_order)
                    .unwrap_or_default(),
                self.course_title()
            ),
            SubmissionKind::Exam => format!(
                "Exam {} - {}",
                self.exam_submission
                    .as_ref()
                    .map(|e| e.exam_order)
                    .unwrap_or_default(),
                self.course_title()
            ),
            SubmissionKind::Certificate => format!("Certificate - {}", self.course_title()),
            SubmissionKind::Module => format!(
                "{} - Module {}",
                self.course_name.clone().unwrap_or_default(),
                self.module_order.unwrap_or_default()
            ),
        }
    }

    pub fn submitted_at(&self) -> Option<DateTime<Utc>> {
        match self.kind {
            SubmissionKind::Assignment => self
                .assignment_submission
                .as_ref()
                .and_then(|a| a.submitted_at),
            SubmissionKind::Exam => self.exam_submission.as_ref().and_then(|e| e.submitted_at),
            SubmissionKind::Certificate => self.certificate.as_ref().and_then(|c| c.issued_at),
            SubmissionKind::Module => self.timestamp,
        }
    }

    pub fn status_label(&self) -> String {
        match self.kind {
            SubmissionKind::Assignment => self
                .assignment_submission
                .as_ref()
                .and_then(|a| a.status.clone())
                .unwrap_or_else(|| STATUS_AWAITING_REVIEW.to_string()),
            SubmissionKind::Exam => {
                let passed = self.exam_submission.as_ref().is_some_and(|e| e.passed);
                if passed { "Passed" } else { "Failed" }.to_string()
            }
            SubmissionKind::Certificate => "Issued".to_string(),
            SubmissionKind::Module => self
                .status
                .clone()
                .unwrap_or_else(|| STATUS_AWAITING_REVIEW.to_string()),
        }
    }

    /// 只有仍处于 Submitted 的作业提交可以审阅
    pub fn awaits_review(&self) -> bool {
        self.kind == SubmissionKind::Assignment
            && self
                .assignment_submission
                .as_ref()
                .and_then(|a| a.status.as_deref())
                == Some(STATUS_AWAITING_REVIEW)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn course_summary_tolerates_missing_optional_fields() {
        let summary: CourseSummary = serde_json::from_value(json!({
            "courseId": "c1",
            "title": "Rust",
            "startDate": "2025-01-06T00:00:00Z",
            "exams": { "total": 3, "passed": [1], "completed": [1, 2] }
        }))
        .unwrap();

        assert_eq!(summary.assignments, AssignmentProgress::default());
        assert_eq!(summary.exams.completed, vec![1, 2]);
        assert!(summary.course_start().is_some());
        assert!(!summary.eligible_for_certificate);
    }

    #[test]
    fn assignment_status_prefers_completed() {
        let mut assignment: Assignment = serde_json::from_value(json!({
            "order": 1, "week": 1, "title": "Intro", "submitted": true
        }))
        .unwrap();
        assert_eq!(assignment.status(), AssignmentStatus::Submitted);
        assignment.completed = true;
        assert_eq!(assignment.status(), AssignmentStatus::Completed);
    }

    #[test]
    fn populated_and_raw_references_both_decode() {
        let populated: Submission = serde_json::from_value(json!({
            "_id": "s1",
            "type": "assignment",
            "studentId": { "userId": "STU-7" },
            "courseId": { "title": "Rust" },
            "assignmentSubmission": { "assignmentOrder": 2, "status": "Submitted" }
        }))
        .unwrap();
        assert_eq!(populated.student_label(), "STU-7");
        assert_eq!(populated.headline(), "Assignment 2 - Rust");
        assert!(populated.awaits_review());

        let raw: Submission = serde_json::from_value(json!({
            "_id": "s2",
            "type": "exam",
            "studentId": "65f0",
            "studentUserId": "STU-9",
            "courseId": "c1",
            "courseName": "Go",
            "examSubmission": { "examOrder": 1, "score": 80, "passed": true }
        }))
        .unwrap();
        assert_eq!(raw.student_label(), "STU-9");
        assert_eq!(raw.course_title(), "Go");
        assert_eq!(raw.status_label(), "Passed");
        assert!(!raw.awaits_review());
    }

    #[test]
    fn unknown_submission_type_is_a_module() {
        let sub: Submission = serde_json::from_value(json!({
            "_id": "s3",
            "type": "project",
            "courseName": "Go",
            "moduleOrder": 4,
            "status": "Approved"
        }))
        .unwrap();
        assert_eq!(sub.kind, SubmissionKind::Module);
        assert_eq!(sub.headline(), "Go - Module 4");
        assert_eq!(sub.status_label(), "Approved");
    }

    #[test]
    fn explicit_nulls_decode_as_defaults() {
        let student: Student = serde_json::from_value(json!({
            "_id": "s1", "username": "a", "name": null, "email": "a@x",
            "locked": null, "courses": null, "rollId": null
        }))
        .unwrap();
        assert_eq!(student.display_name(), "a");
        assert!(student.courses.is_empty());

        let course: Course = serde_json::from_value(json!({
            "_id": "c1", "title": "Rust", "description": null, "mode": null,
            "category": null, "enrolledCount": null
        }))
        .unwrap();
        assert_eq!(course.description, "");
        assert_eq!(course.enrolled_count, 0);

        let summary: CourseSummary = serde_json::from_value(json!({
            "courseId": "c1", "title": "Rust", "assignments": null,
            "exams": { "total": 2, "passed": null, "completed": null },
            "eligibleForCertificate": null, "certificateIssued": null
        }))
        .unwrap();
        assert_eq!(summary.exams.total, 2);
        assert!(summary.exams.passed.is_empty());

        let assignment: Assignment = serde_json::from_value(json!({
            "order": 1, "title": "Intro", "week": null, "description": null,
            "blogLinks": null, "submitted": null
        }))
        .unwrap();
        assert_eq!(assignment.status(), AssignmentStatus::NotSubmitted);

        let submission: Submission = serde_json::from_value(json!({
            "_id": "x1", "type": null,
            "examSubmission": { "examOrder": null, "score": null, "passed": null }
        }))
        .unwrap();
        assert_eq!(submission.kind, SubmissionKind::Module);
    }
}
