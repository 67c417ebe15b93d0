//! 接口协议
//!
//! 每个后端接口对应一个实现了 [`ApiRequest`] 的请求类型：
//! 路径参数用 `#[serde(skip)]` 排除在 body 之外，其余字段即 JSON body。

use serde::de::{DeserializeOwned, IgnoredAny};
use serde::{Deserialize, Serialize};

use crate::gateway::HttpMethod;
use crate::models::{Assignment, Course, CourseSummary, ExamPaper, ExamResult, Student, Submission};
use crate::serde_helper::null_as_default;

/// 不关心内容的成功响应（包括空 body）
pub type Ack = IgnoredAny;

/// 描述一个接口的请求/响应关系与元数据
pub trait ApiRequest: Serialize {
    /// 该请求的响应类型
    type Response: DeserializeOwned;
    /// HTTP 方法
    const METHOD: HttpMethod;
    /// 由路径参数拼出的 URL path
    fn path(&self) -> String;
}

/// 路径参数按 RFC 3986 百分号编码，只保留 unreserved 字符原样输出
///
/// id 由后端生成，通常已是 URL 安全的；编码保证 `/`、`?`、`#` 之类的字符不会改写路径。
struct Segment<'a>(&'a str);

impl std::fmt::Display for Segment<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for byte in self.0.bytes() {
            match byte {
                b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'.' | b'_' | b'~' => {
                    write!(f, "{}", byte as char)?
                }
                _ => write!(f, "%{:02X}", byte)?,
            }
        }
        Ok(())
    }
}

// =========================================================
// 认证
// =========================================================

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// `role` 保持原始字符串，是否接受由登录策略决定
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: String,
    pub role: String,
    #[serde(default)]
    pub user_id: Option<String>,
}

impl ApiRequest for LoginRequest {
    type Response = LoginResponse;
    const METHOD: HttpMethod = HttpMethod::Post;
    fn path(&self) -> String {
        "/api/auth/login".to_string()
    }
}

// =========================================================
// 学生端
// =========================================================

#[derive(Debug, Clone, Serialize)]
pub struct ListStudentCourses;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct StudentCoursesResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub courses: Vec<CourseSummary>,
}

impl ApiRequest for ListStudentCourses {
    type Response = StudentCoursesResponse;
    const METHOD: HttpMethod = HttpMethod::Get;
    fn path(&self) -> String {
        "/api/student/courses".to_string()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ListCourseAssignments {
    #[serde(skip)]
    pub course_id: String,
}

impl ApiRequest for ListCourseAssignments {
    type Response = Vec<Assignment>;
    const METHOD: HttpMethod = HttpMethod::Get;
    fn path(&self) -> String {
        format!("/api/student/course/{}/assignments", Segment(&self.course_id))
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct FetchExam {
    #[serde(skip)]
    pub course_id: String,
    #[serde(skip)]
    pub order: u32,
}

impl ApiRequest for FetchExam {
    type Response = ExamPaper;
    const METHOD: HttpMethod = HttpMethod::Get;
    fn path(&self) -> String {
        format!("/api/student/course/{}/exam/{}", Segment(&self.course_id), self.order)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitExam {
    #[serde(skip)]
    pub course_id: String,
    #[serde(skip)]
    pub order: u32,
    pub answers: Vec<usize>,
    /// 用时（分钟）
    pub time_taken: i64,
}

impl ApiRequest for SubmitExam {
    type Response = ExamResult;
    const METHOD: HttpMethod = HttpMethod::Post;
    fn path(&self) -> String {
        format!(
            "/api/student/course/{}/exam/{}/submit",
            Segment(&self.course_id), self.order
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitAssignment {
    #[serde(skip)]
    pub course_id: String,
    #[serde(skip)]
    pub order: u32,
    pub repository_url: String,
    pub pull_request_url: String,
}

impl ApiRequest for SubmitAssignment {
    type Response = Ack;
    const METHOD: HttpMethod = HttpMethod::Post;
    fn path(&self) -> String {
        format!(
            "/api/student/course/{}/assignment/{}/submit",
            Segment(&self.course_id), self.order
        )
    }
}

// =========================================================
// 课程目录
// =========================================================

#[derive(Debug, Clone, Serialize)]
pub struct ListCourses;

impl ApiRequest for ListCourses {
    type Response = Vec<Course>;
    const METHOD: HttpMethod = HttpMethod::Get;
    fn path(&self) -> String {
        "/api/courses".to_string()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct GetCourse {
    #[serde(skip)]
    pub id: String,
}

impl ApiRequest for GetCourse {
    type Response = Course;
    const METHOD: HttpMethod = HttpMethod::Get;
    fn path(&self) -> String {
        format!("/api/courses/{}", Segment(&self.id))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCourse {
    pub title: String,
    pub description: String,
    pub duration: String,
    pub mode: String,
    pub category: String,
    pub tools: Vec<String>,
    pub learn_topics: Vec<String>,
    pub certification: String,
    /// 0 表示永久有效
    pub validity_months: u32,
    pub total_weeks: u32,
}

impl Default for NewCourse {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            duration: "1 Month".to_string(),
            mode: COURSE_MODES[0].to_string(),
            category: "Core Training".to_string(),
            tools: Vec::new(),
            learn_topics: Vec::new(),
            certification: String::new(),
            validity_months: 1,
            total_weeks: 4,
        }
    }
}

pub const COURSE_MODES: [&str; 3] = ["Remote", "In-Person", "Hybrid"];

impl ApiRequest for NewCourse {
    type Response = Course;
    const METHOD: HttpMethod = HttpMethod::Post;
    fn path(&self) -> String {
        "/api/courses".to_string()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DeleteCourse {
    #[serde(skip)]
    pub id: String,
}

impl ApiRequest for DeleteCourse {
    type Response = Ack;
    const METHOD: HttpMethod = HttpMethod::Delete;
    fn path(&self) -> String {
        format!("/api/courses/{}", Segment(&self.id))
    }
}

// =========================================================
// 管理端：学生
// =========================================================

#[derive(Debug, Clone, Serialize)]
pub struct ListStudents;

impl ApiRequest for ListStudents {
    type Response = Vec<Student>;
    const METHOD: HttpMethod = HttpMethod::Get;
    fn path(&self) -> String {
        "/api/admin/students".to_string()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewStudent {
    pub username: String,
    pub name: String,
    pub email: String,
    pub password: String,
    pub assigned_courses: Vec<String>,
}

impl NewStudent {
    /// 勾选/取消勾选一门课程
    pub fn toggle_course(&mut self, course_id: &str, assigned: bool) {
        self.assigned_courses.retain(|id| id != course_id);
        if assigned {
            self.assigned_courses.push(course_id.to_string());
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateStudentResponse {
    pub student: Student,
}

impl ApiRequest for NewStudent {
    type Response = CreateStudentResponse;
    const METHOD: HttpMethod = HttpMethod::Post;
    fn path(&self) -> String {
        "/api/admin/students".to_string()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DeleteStudent {
    #[serde(skip)]
    pub id: String,
}

impl ApiRequest for DeleteStudent {
    type Response = Ack;
    const METHOD: HttpMethod = HttpMethod::Delete;
    fn path(&self) -> String {
        format!("/api/admin/students/{}", Segment(&self.id))
    }
}

// =========================================================
// 管理端：作业与考试
// =========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssignmentKind {
    #[default]
    Mini,
    Major,
    Git,
}

impl AssignmentKind {
    pub const ALL: [AssignmentKind; 3] = [AssignmentKind::Mini, AssignmentKind::Major, AssignmentKind::Git];

    pub fn as_str(&self) -> &'static str {
        match self {
            AssignmentKind::Mini => "mini",
            AssignmentKind::Major => "major",
            AssignmentKind::Git => "git",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AssignmentKind::Mini => "Mini Project",
            AssignmentKind::Major => "Major Project",
            AssignmentKind::Git => "Git Task",
        }
    }

    pub fn from_value(value: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|k| k.as_str() == value)
            .unwrap_or_default()
    }
}

/// 作业创建表单；`courseId` 既在路径里也随 body 发送
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAssignment {
    pub course_id: String,
    pub title: String,
    pub description: String,
    #[serde(rename = "type")]
    pub kind: AssignmentKind,
    pub blog_links: Vec<String>,
    pub github_links: Vec<String>,
    pub study_materials: Vec<String>,
    pub due_date: String,
    pub repository_url: String,
    pub instructions: String,
    pub order: u32,
    pub week: u32,
    pub release_date: String,
}

impl Default for NewAssignment {
    fn default() -> Self {
        Self {
            course_id: String::new(),
            title: String::new(),
            description: String::new(),
            kind: AssignmentKind::default(),
            blog_links: Vec::new(),
            github_links: Vec::new(),
            study_materials: Vec::new(),
            due_date: String::new(),
            repository_url: String::new(),
            instructions: String::new(),
            order: 1,
            week: 1,
            release_date: String::new(),
        }
    }
}

impl ApiRequest for NewAssignment {
    type Response = Ack;
    const METHOD: HttpMethod = HttpMethod::Post;
    fn path(&self) -> String {
        format!("/api/admin/courses/{}/assignments", Segment(&self.course_id))
    }
}

pub const OPTIONS_PER_QUESTION: usize = 4;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftQuestion {
    pub question: String,
    pub options: [String; OPTIONS_PER_QUESTION],
    pub correct_answer: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewExam {
    pub course_id: String,
    pub title: String,
    pub description: String,
    pub questions: Vec<DraftQuestion>,
    pub passing_score: u32,
    /// 考试时长（分钟）
    pub duration: u32,
    pub due_date: String,
    pub order: u32,
    pub week: u32,
    pub release_date: String,
}

impl Default for NewExam {
    fn default() -> Self {
        Self {
            course_id: String::new(),
            title: String::new(),
            description: String::new(),
            questions: vec![DraftQuestion::default()],
            passing_score: 70,
            duration: 60,
            due_date: String::new(),
            order: 1,
            week: 1,
            release_date: String::new(),
        }
    }
}

impl NewExam {
    pub fn add_question(&mut self) {
        self.questions.push(DraftQuestion::default());
    }

    pub fn set_question_text(&mut self, index: usize, text: String) {
        if let Some(q) = self.questions.get_mut(index) {
            q.question = text;
        }
    }

    pub fn set_option(&mut self, index: usize, option: usize, text: String) {
        if let Some(slot) = self
            .questions
            .get_mut(index)
            .and_then(|q| q.options.get_mut(option))
        {
            *slot = text;
        }
    }

    pub fn set_correct(&mut self, index: usize, option: usize) {
        if option >= OPTIONS_PER_QUESTION {
            return;
        }
        if let Some(q) = self.questions.get_mut(index) {
            q.correct_answer = option;
        }
    }
}

impl ApiRequest for NewExam {
    type Response = Ack;
    const METHOD: HttpMethod = HttpMethod::Post;
    fn path(&self) -> String {
        format!("/api/admin/courses/{}/exams", Segment(&self.course_id))
    }
}

// =========================================================
// 提交审阅
// =========================================================

#[derive(Debug, Clone, Serialize)]
pub struct ListSubmissions;

impl ApiRequest for ListSubmissions {
    type Response = Vec<Submission>;
    const METHOD: HttpMethod = HttpMethod::Get;
    fn path(&self) -> String {
        "/api/submissions".to_string()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReviewDecision {
    Approved,
    Rejected,
}

impl ReviewDecision {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReviewDecision::Approved => "Approved",
            ReviewDecision::Rejected => "Rejected",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReviewSubmission {
    #[serde(skip)]
    pub id: String,
    pub status: ReviewDecision,
    pub feedback: String,
}

impl ApiRequest for ReviewSubmission {
    type Response = Ack;
    const METHOD: HttpMethod = HttpMethod::Post;
    fn path(&self) -> String {
        format!("/api/admin/submissions/{}/review", Segment(&self.id))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UpdateSubmissionStatus {
    #[serde(skip)]
    pub id: String,
    pub status: ReviewDecision,
}

impl ApiRequest for UpdateSubmissionStatus {
    type Response = Ack;
    const METHOD: HttpMethod = HttpMethod::Put;
    fn path(&self) -> String {
        format!("/api/submissions/{}", Segment(&self.id))
    }
}

/// 多行文本框：一行一个链接，丢弃空行
pub fn parse_link_lines(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}
