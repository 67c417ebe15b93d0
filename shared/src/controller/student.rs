//! 学生面板状态
//!
//! 状态迁移是同步的纯函数，网络请求由下方的 async 动作完成，
//! 组件负责把两者串起来。

use chrono::{DateTime, Utc};
use log::{debug, info};

use crate::controller::banner::Banner;
use crate::date::{self, WEEK_WINDOW};
use crate::error::PortalResult;
use crate::gateway::{ApiGateway, HttpClient, Navigator};
use crate::models::{Assignment, Course, CourseSummary, ExamPaper, ExamProgress, ExamResult};
use crate::protocol::{
    FetchExam, GetCourse, ListCourseAssignments, ListCourses, ListStudentCourses, SubmitAssignment,
    SubmitExam,
};
use crate::session::KeyValueStore;

pub const MSG_LOGIN_FIRST: &str = "Please log in first";
pub const MSG_LOAD_COURSES_FAILED: &str = "Error loading courses";
pub const MSG_LOAD_ASSIGNMENTS_FAILED: &str = "Error loading assignments";
pub const MSG_LOAD_EXAM_FAILED: &str = "Error loading exam";
pub const MSG_SUBMIT_EXAM_FAILED: &str = "Error submitting exam";
pub const MSG_ASSIGNMENT_SUBMITTED: &str = "Assignment submitted successfully!";
pub const MSG_SUBMIT_ASSIGNMENT_FAILED: &str = "Error submitting assignment";
pub const MSG_LOAD_CATALOG_FAILED: &str = "Error loading course catalog";
pub const MSG_CERTIFICATE_DISABLED: &str =
    "Certificate purchase is not enabled yet. Please contact your admin.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StudentView {
    #[default]
    Dashboard,
    Explore,
    Profile,
}

// =========================================================
// 派生计算
// =========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExamAvailability {
    Available,
    Passed,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExamSlot {
    pub order: u32,
    pub availability: ExamAvailability,
}

/// 按序号 `1..=total` 列出每场考试的状态，通过优先于已完成
pub fn exam_slots(progress: &ExamProgress) -> Vec<ExamSlot> {
    (1..=progress.total)
        .map(|order| {
            let availability = if progress.passed.contains(&order) {
                ExamAvailability::Passed
            } else if progress.completed.contains(&order) {
                ExamAvailability::Failed
            } else {
                ExamAvailability::Available
            };
            ExamSlot {
                order,
                availability,
            }
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq)]
pub struct WeekGroup {
    pub week: u32,
    pub assignments: Vec<Assignment>,
    /// 本周仍有未到期的作业
    pub is_current: bool,
}

/// 把作业分到第 1..=4 周，空周不返回
pub fn group_by_week(assignments: &[Assignment], now: DateTime<Utc>) -> Vec<WeekGroup> {
    (1..=WEEK_WINDOW)
        .filter_map(|week| {
            let items: Vec<Assignment> = assignments
                .iter()
                .filter(|a| a.week == week)
                .cloned()
                .collect();
            if items.is_empty() {
                return None;
            }
            let is_current = items
                .iter()
                .any(|a| a.due_date.is_some_and(|due| due >= now));
            Some(WeekGroup {
                week,
                assignments: items,
                is_current,
            })
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CertificateCard {
    Issued,
    Available { fee: Option<f64> },
}

/// 仅在满足证书条件时展示证书卡片
pub fn certificate_card(course: &CourseSummary) -> Option<CertificateCard> {
    if !course.eligible_for_certificate {
        return None;
    }
    if course.certificate_issued {
        Some(CertificateCard::Issued)
    } else {
        Some(CertificateCard::Available {
            fee: course.certificate_fee,
        })
    }
}

/// 个人资料页用到的统计
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileSummary {
    pub user_id: Option<String>,
    pub enrolled: usize,
    pub certificates: usize,
    pub assignments_completed: u32,
    pub exams_passed: usize,
}

pub fn profile_summary(user_id: Option<String>, courses: &[CourseSummary]) -> ProfileSummary {
    ProfileSummary {
        user_id,
        enrolled: courses.len(),
        certificates: courses.iter().filter(|c| c.certificate_issued).count(),
        assignments_completed: courses.iter().map(|c| c.assignments.completed).sum(),
        exams_passed: courses.iter().map(|c| c.exams.passed.len()).sum(),
    }
}

// =========================================================
// 考试作答
// =========================================================

#[derive(Debug, Clone, PartialEq)]
pub struct ActiveExam {
    pub course_id: String,
    pub order: u32,
    pub paper: ExamPaper,
    /// 每题一个槽位，`None` 表示未作答
    pub answers: Vec<Option<usize>>,
    pub started_at: DateTime<Utc>,
}

impl ActiveExam {
    pub fn new(course_id: String, order: u32, paper: ExamPaper, started_at: DateTime<Utc>) -> Self {
        let answers = vec![None; paper.questions.len()];
        Self {
            course_id,
            order,
            paper,
            answers,
            started_at,
        }
    }

    pub fn select(&mut self, question: usize, option: usize) {
        let in_range = self
            .paper
            .questions
            .get(question)
            .is_some_and(|q| option < q.options.len());
        if in_range {
            self.answers[question] = Some(option);
        }
    }

    pub fn answered(&self) -> usize {
        self.answers.iter().filter(|a| a.is_some()).count()
    }

    /// 所有题目都已作答
    pub fn can_submit(&self) -> bool {
        self.answers.iter().all(Option::is_some)
    }

    pub fn to_request(&self, now: DateTime<Utc>) -> Option<SubmitExam> {
        let answers = self.answers.iter().copied().collect::<Option<Vec<usize>>>()?;
        Some(SubmitExam {
            course_id: self.course_id.clone(),
            order: self.order,
            answers,
            time_taken: date::elapsed_minutes(self.started_at, now),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum ExamPhase {
    #[default]
    NotStarted,
    InProgress(ActiveExam),
    /// 已提交、等待结果
    Submitted(ActiveExam),
}

impl ExamPhase {
    pub fn active(&self) -> Option<&ActiveExam> {
        match self {
            ExamPhase::NotStarted => None,
            ExamPhase::InProgress(exam) | ExamPhase::Submitted(exam) => Some(exam),
        }
    }
}

pub fn result_text(result: &ExamResult) -> String {
    format!(
        "Exam submitted! Score: {}% ({})",
        result.score,
        if result.passed { "Passed" } else { "Failed" }
    )
}

// =========================================================
// 面板状态
// =========================================================

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AssignmentDraft {
    pub repository_url: String,
    pub pull_request_url: String,
}

impl AssignmentDraft {
    pub fn can_submit(&self) -> bool {
        !self.repository_url.trim().is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct StudentState {
    pub view: StudentView,
    pub courses: Vec<CourseSummary>,
    pub catalog: Vec<Course>,
    /// 目录中展开查看的课程
    pub catalog_detail: Option<Course>,
    pub loading: bool,
    pub banner: Option<Banner>,
    selected_course: Option<String>,
    pub assignments: Vec<Assignment>,
    selected_assignment: Option<u32>,
    pub draft: AssignmentDraft,
    pub exam: ExamPhase,
}

impl StudentState {
    pub fn switch_view(&mut self, view: StudentView) {
        self.view = view;
        self.close_course();
        self.close_catalog_course();
    }

    pub fn dismiss_banner(&mut self) {
        self.banner = None;
    }

    // --- 课程列表 ---

    /// 没有 userId 时不发请求，直接提示登录
    pub fn begin_load_courses(&mut self, user_id: Option<&str>) -> bool {
        if user_id.is_none() {
            self.banner = Some(Banner::error(MSG_LOGIN_FIRST));
            self.loading = false;
            return false;
        }
        self.loading = true;
        true
    }

    pub fn apply_courses(&mut self, result: PortalResult<Vec<CourseSummary>>) {
        self.loading = false;
        match result {
            Ok(courses) => self.courses = courses,
            Err(e) => self.banner = Some(Banner::from_error(&e, MSG_LOAD_COURSES_FAILED)),
        }
    }

    pub fn apply_catalog(&mut self, result: PortalResult<Vec<Course>>) {
        self.loading = false;
        match result {
            Ok(catalog) => self.catalog = catalog,
            Err(e) => self.banner = Some(Banner::from_error(&e, MSG_LOAD_CATALOG_FAILED)),
        }
    }

    pub fn apply_catalog_course(&mut self, result: PortalResult<Course>) {
        self.loading = false;
        match result {
            Ok(course) => self.catalog_detail = Some(course),
            Err(e) => self.banner = Some(Banner::from_error(&e, MSG_LOAD_CATALOG_FAILED)),
        }
    }

    pub fn close_catalog_course(&mut self) {
        self.catalog_detail = None;
    }

    // --- 课程详情 ---

    pub fn selected_course(&self) -> Option<&CourseSummary> {
        let id = self.selected_course.as_deref()?;
        self.courses.iter().find(|c| c.course_id == id)
    }

    /// 只有作业加载成功才切换到该课程
    pub fn apply_assignments(&mut self, course_id: &str, result: PortalResult<Vec<Assignment>>) {
        self.loading = false;
        match result {
            Ok(assignments) => {
                self.assignments = assignments;
                self.selected_course = Some(course_id.to_string());
                self.selected_assignment = None;
            }
            Err(e) => self.banner = Some(Banner::from_error(&e, MSG_LOAD_ASSIGNMENTS_FAILED)),
        }
    }

    pub fn close_course(&mut self) {
        self.selected_course = None;
        self.selected_assignment = None;
        self.assignments.clear();
    }

    pub fn current_week(&self, now: DateTime<Utc>) -> Option<u32> {
        self.selected_course()
            .map(|c| date::current_week(c.course_start(), now))
    }

    pub fn weeks(&self, now: DateTime<Utc>) -> Vec<WeekGroup> {
        group_by_week(&self.assignments, now)
    }

    // --- 作业提交 ---

    pub fn select_assignment(&mut self, order: u32) {
        self.selected_assignment = Some(order);
    }

    pub fn close_assignment(&mut self) {
        self.selected_assignment = None;
    }

    pub fn selected_assignment(&self) -> Option<&Assignment> {
        let order = self.selected_assignment?;
        self.assignments.iter().find(|a| a.order == order)
    }

    pub fn begin_assignment_submit(&mut self) -> Option<SubmitAssignment> {
        if self.loading || !self.draft.can_submit() {
            return None;
        }
        let course_id = self.selected_course.clone()?;
        let order = self.selected_assignment?;
        self.loading = true;
        Some(SubmitAssignment {
            course_id,
            order,
            repository_url: self.draft.repository_url.trim().to_string(),
            pull_request_url: self.draft.pull_request_url.trim().to_string(),
        })
    }

    /// 返回是否需要重新加载课程概览
    pub fn apply_assignment_submit<T>(&mut self, result: PortalResult<T>) -> bool {
        self.loading = false;
        match result {
            Ok(_) => {
                self.banner = Some(Banner::success(MSG_ASSIGNMENT_SUBMITTED));
                self.draft = AssignmentDraft::default();
                self.selected_assignment = None;
                true
            }
            Err(e) => {
                self.banner = Some(Banner::from_error(&e, MSG_SUBMIT_ASSIGNMENT_FAILED));
                false
            }
        }
    }

    // --- 考试 ---

    pub fn apply_exam_paper(
        &mut self,
        course_id: &str,
        order: u32,
        result: PortalResult<ExamPaper>,
        now: DateTime<Utc>,
    ) {
        self.loading = false;
        match result {
            Ok(paper) => {
                self.exam = ExamPhase::InProgress(ActiveExam::new(
                    course_id.to_string(),
                    order,
                    paper,
                    now,
                ));
            }
            Err(e) => self.banner = Some(Banner::from_error(&e, MSG_LOAD_EXAM_FAILED)),
        }
    }

    pub fn answer(&mut self, question: usize, option: usize) {
        if let ExamPhase::InProgress(exam) = &mut self.exam {
            exam.select(question, option);
        }
    }

    pub fn can_submit_exam(&self) -> bool {
        matches!(&self.exam, ExamPhase::InProgress(exam) if exam.can_submit())
    }

    /// 进入已提交状态并给出请求；未答完时返回 `None`
    pub fn begin_exam_submit(&mut self, now: DateTime<Utc>) -> Option<SubmitExam> {
        let ExamPhase::InProgress(exam) = &self.exam else {
            return None;
        };
        let req = exam.to_request(now)?;
        let exam = exam.clone();
        self.exam = ExamPhase::Submitted(exam);
        self.loading = true;
        Some(req)
    }

    /// 成功时丢弃考试状态并返回 `true`（需要重新加载课程概览）；
    /// 失败时回到作答中，答案保留
    pub fn apply_exam_result(&mut self, result: PortalResult<ExamResult>) -> bool {
        self.loading = false;
        let phase = std::mem::take(&mut self.exam);
        match result {
            Ok(res) => {
                self.banner = Some(Banner::success(result_text(&res)));
                true
            }
            Err(e) => {
                if let ExamPhase::Submitted(exam) | ExamPhase::InProgress(exam) = phase {
                    self.exam = ExamPhase::InProgress(exam);
                }
                self.banner = Some(Banner::from_error(&e, MSG_SUBMIT_EXAM_FAILED));
                false
            }
        }
    }

    pub fn cancel_exam(&mut self) {
        self.exam = ExamPhase::NotStarted;
    }

    // --- 证书 ---

    pub fn purchase_certificate(&mut self) {
        if self.selected_course().is_none() {
            return;
        }
        self.banner = Some(Banner::info(MSG_CERTIFICATE_DISABLED));
    }
}

// =========================================================
// 异步动作
// =========================================================

pub async fn load_courses<C, K, N>(api: &ApiGateway<C, K, N>) -> PortalResult<Vec<CourseSummary>>
where
    C: HttpClient,
    K: KeyValueStore,
    N: Navigator,
{
    let resp = api.call(&ListStudentCourses).await?;
    debug!("loaded {} enrolled courses", resp.courses.len());
    Ok(resp.courses)
}

pub async fn load_assignments<C, K, N>(
    api: &ApiGateway<C, K, N>,
    course_id: &str,
) -> PortalResult<Vec<Assignment>>
where
    C: HttpClient,
    K: KeyValueStore,
    N: Navigator,
{
    api.call(&ListCourseAssignments {
        course_id: course_id.to_string(),
    })
    .await
}

pub async fn load_exam<C, K, N>(
    api: &ApiGateway<C, K, N>,
    course_id: &str,
    order: u32,
) -> PortalResult<ExamPaper>
where
    C: HttpClient,
    K: KeyValueStore,
    N: Navigator,
{
    api.call(&FetchExam {
        course_id: course_id.to_string(),
        order,
    })
    .await
}

pub async fn submit_exam<C, K, N>(api: &ApiGateway<C, K, N>, req: &SubmitExam) -> PortalResult<ExamResult>
where
    C: HttpClient,
    K: KeyValueStore,
    N: Navigator,
{
    let result = api.call(req).await?;
    info!(
        "exam {} of course {} scored {} (passed: {})",
        req.order, req.course_id, result.score, result.passed
    );
    Ok(result)
}

pub async fn submit_assignment<C, K, N>(
    api: &ApiGateway<C, K, N>,
    req: &SubmitAssignment,
) -> PortalResult<()>
where
    C: HttpClient,
    K: KeyValueStore,
    N: Navigator,
{
    api.call(req).await?;
    info!("assignment {} of course {} submitted", req.order, req.course_id);
    Ok(())
}

pub async fn load_catalog<C, K, N>(api: &ApiGateway<C, K, N>) -> PortalResult<Vec<Course>>
where
    C: HttpClient,
    K: KeyValueStore,
    N: Navigator,
{
    api.call(&ListCourses).await
}

pub async fn load_catalog_course<C, K, N>(api: &ApiGateway<C, K, N>, id: &str) -> PortalResult<Course>
where
    C: HttpClient,
    K: KeyValueStore,
    N: Navigator,
{
    api.call(&GetCourse { id: id.to_string() }).await
}

#[cfg(test)]
mod tests;
