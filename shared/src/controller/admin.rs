//! 管理面板状态
//!
//! 面板数据是一个整体快照（学生、课程、提交），
//! 刷新要么三份全部替换，要么保持不变。

use futures::future::try_join3;
use log::{info, warn};

use crate::controller::banner::Banner;
use crate::error::PortalResult;
use crate::gateway::{ApiGateway, HttpClient, Navigator};
use crate::models::{Course, Student, Submission};
use crate::protocol::{
    DeleteCourse, DeleteStudent, ListCourses, ListStudents, ListSubmissions, NewAssignment,
    NewCourse, NewExam, NewStudent, ReviewDecision, ReviewSubmission, UpdateSubmissionStatus,
    parse_link_lines,
};
use crate::session::KeyValueStore;

pub const MSG_LOAD_DASHBOARD_FAILED: &str = "Error loading dashboard data";
pub const CONFIRM_DELETE_STUDENT: &str = "Are you sure you want to delete this student?";
pub const CONFIRM_DELETE_COURSE: &str = "Are you sure you want to delete this course?";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AdminTab {
    #[default]
    Dashboard,
    Students,
    Courses,
    Assignments,
    Exams,
    Submissions,
}

impl AdminTab {
    pub const ALL: [AdminTab; 6] = [
        AdminTab::Dashboard,
        AdminTab::Students,
        AdminTab::Courses,
        AdminTab::Assignments,
        AdminTab::Exams,
        AdminTab::Submissions,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            AdminTab::Dashboard => "Dashboard",
            AdminTab::Students => "Students",
            AdminTab::Courses => "Courses",
            AdminTab::Assignments => "Assignments",
            AdminTab::Exams => "Exams",
            AdminTab::Submissions => "Submissions",
        }
    }
}

// =========================================================
// 快照
// =========================================================

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AdminSnapshot {
    pub students: Vec<Student>,
    pub courses: Vec<Course>,
    pub submissions: Vec<Submission>,
}

/// 统计卡片，始终由快照推导
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DashboardStats {
    pub total_students: usize,
    pub total_courses: usize,
    pub total_submissions: usize,
}

impl AdminSnapshot {
    pub fn stats(&self) -> DashboardStats {
        DashboardStats {
            total_students: self.students.len(),
            total_courses: self.courses.len(),
            total_submissions: self.submissions.len(),
        }
    }

    pub fn pending_reviews(&self) -> usize {
        self.submissions.iter().filter(|s| s.awaits_review()).count()
    }
}

// =========================================================
// 变更操作
// =========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mutation {
    CreateStudent,
    DeleteStudent,
    CreateCourse,
    DeleteCourse,
    CreateAssignment,
    CreateExam,
    ReviewSubmission,
    UpdateSubmission,
}

impl Mutation {
    pub fn fallback(&self) -> &'static str {
        match self {
            Mutation::CreateStudent => "Error creating student",
            Mutation::DeleteStudent => "Error deleting student",
            Mutation::CreateCourse => "Error creating course",
            Mutation::DeleteCourse => "Error deleting course",
            Mutation::CreateAssignment => "Error creating assignment",
            Mutation::CreateExam => "Error creating exam",
            Mutation::ReviewSubmission => "Error reviewing submission",
            Mutation::UpdateSubmission => "Error updating submission",
        }
    }

    /// 删除和改状态失败时只显示固定文案
    fn shows_backend_message(&self) -> bool {
        !matches!(
            self,
            Mutation::DeleteStudent | Mutation::DeleteCourse | Mutation::UpdateSubmission
        )
    }
}

/// 作业表单里的链接文本框，一行一个
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LinkText {
    pub blog: String,
    pub github: String,
    pub study: String,
}

/// 课程表单里的工具与主题文本框，一行一个
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CourseListText {
    pub tools: String,
    pub topics: String,
}

// =========================================================
// 面板状态
// =========================================================

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AdminState {
    pub tab: AdminTab,
    pub snapshot: AdminSnapshot,
    pub loading: bool,
    pub banner: Option<Banner>,
    pub student_draft: NewStudent,
    pub course_draft: NewCourse,
    pub course_lists: CourseListText,
    pub assignment_draft: NewAssignment,
    pub assignment_links: LinkText,
    pub exam_draft: NewExam,
    pub review_feedback: String,
    selected_student: Option<String>,
    selected_submission: Option<String>,
}

impl AdminState {
    pub fn switch_tab(&mut self, tab: AdminTab) {
        self.tab = tab;
    }

    pub fn dismiss_banner(&mut self) {
        self.banner = None;
    }

    pub fn stats(&self) -> DashboardStats {
        self.snapshot.stats()
    }

    // --- 刷新 ---

    pub fn begin_refresh(&mut self) {
        self.loading = true;
    }

    /// 成功时整体替换快照；失败时保留旧快照并只给出一条横幅
    pub fn apply_refresh(&mut self, result: PortalResult<AdminSnapshot>) {
        self.loading = false;
        match result {
            Ok(snapshot) => {
                self.snapshot = snapshot;
                self.prune_selection();
            }
            Err(e) => {
                warn!("dashboard refresh failed: {}", e);
                self.banner = Some(Banner::error(MSG_LOAD_DASHBOARD_FAILED));
            }
        }
    }

    /// 选中的条目在新快照中不存在时取消选中
    fn prune_selection(&mut self) {
        if self.selected_student().is_none() {
            self.selected_student = None;
        }
        if self.selected_submission().is_none() {
            self.selected_submission = None;
        }
    }

    // --- 详情 ---

    pub fn select_student(&mut self, id: Option<String>) {
        self.selected_student = id;
    }

    pub fn selected_student(&self) -> Option<&Student> {
        let id = self.selected_student.as_deref()?;
        self.snapshot.students.iter().find(|s| s.id == id)
    }

    pub fn select_submission(&mut self, id: Option<String>) {
        self.selected_submission = id;
        self.review_feedback.clear();
    }

    pub fn selected_submission(&self) -> Option<&Submission> {
        let id = self.selected_submission.as_deref()?;
        self.snapshot.submissions.iter().find(|s| s.id == id)
    }

    // --- 变更 ---

    /// 有变更在途时拒绝新的提交
    pub fn begin_mutation(&mut self) -> bool {
        if self.loading {
            return false;
        }
        self.loading = true;
        true
    }

    /// 应用变更结果，返回是否需要刷新快照
    pub fn finish_mutation(&mut self, mutation: Mutation, result: PortalResult<String>) -> bool {
        self.loading = false;
        match result {
            Ok(text) => {
                self.banner = Some(Banner::success(text));
                self.reset_draft(mutation);
                true
            }
            Err(e) => {
                let text = if mutation.shows_backend_message() {
                    e.banner_text(mutation.fallback())
                } else {
                    mutation.fallback().to_string()
                };
                self.banner = Some(Banner::error(text));
                false
            }
        }
    }

    fn reset_draft(&mut self, mutation: Mutation) {
        match mutation {
            Mutation::CreateStudent => self.student_draft = NewStudent::default(),
            Mutation::CreateCourse => {
                self.course_draft = NewCourse::default();
                self.course_lists = CourseListText::default();
            }
            Mutation::CreateAssignment => {
                self.assignment_draft = NewAssignment::default();
                self.assignment_links = LinkText::default();
            }
            Mutation::CreateExam => self.exam_draft = NewExam::default(),
            Mutation::ReviewSubmission | Mutation::UpdateSubmission => {
                self.review_feedback.clear();
            }
            Mutation::DeleteStudent | Mutation::DeleteCourse => {}
        }
    }

    pub fn course_request(&self) -> NewCourse {
        NewCourse {
            tools: parse_link_lines(&self.course_lists.tools),
            learn_topics: parse_link_lines(&self.course_lists.topics),
            ..self.course_draft.clone()
        }
    }

    /// 把链接文本框合并进作业表单
    pub fn assignment_request(&self) -> NewAssignment {
        NewAssignment {
            blog_links: parse_link_lines(&self.assignment_links.blog),
            github_links: parse_link_lines(&self.assignment_links.github),
            study_materials: parse_link_lines(&self.assignment_links.study),
            ..self.assignment_draft.clone()
        }
    }

    /// 审阅请求；只针对仍待审阅的作业提交
    pub fn review_request(&self, decision: ReviewDecision) -> Option<ReviewSubmission> {
        let submission = self.selected_submission().filter(|s| s.awaits_review())?;
        Some(ReviewSubmission {
            id: submission.id.clone(),
            status: decision,
            feedback: self.review_feedback.trim().to_string(),
        })
    }
}

// =========================================================
// 异步动作
// =========================================================

/// 并发拉取三份数据，任一失败即整体失败
pub async fn load_dashboard<C, K, N>(api: &ApiGateway<C, K, N>) -> PortalResult<AdminSnapshot>
where
    C: HttpClient,
    K: KeyValueStore,
    N: Navigator,
{
    let (students, courses, submissions) = try_join3(
        api.call(&ListStudents),
        api.call(&ListCourses),
        api.call(&ListSubmissions),
    )
    .await?;

    info!(
        "dashboard loaded: {} students, {} courses, {} submissions",
        students.len(),
        courses.len(),
        submissions.len()
    );
    Ok(AdminSnapshot {
        students,
        courses,
        submissions,
    })
}

pub async fn create_student<C, K, N>(api: &ApiGateway<C, K, N>, draft: &NewStudent) -> PortalResult<String>
where
    C: HttpClient,
    K: KeyValueStore,
    N: Navigator,
{
    let resp = api.call(draft).await?;
    let roll_id = resp.student.roll_id.unwrap_or_default();
    info!("student created: {}", roll_id);
    Ok(format!("Student created: {}", roll_id))
}

pub async fn delete_student<C, K, N>(api: &ApiGateway<C, K, N>, id: &str) -> PortalResult<String>
where
    C: HttpClient,
    K: KeyValueStore,
    N: Navigator,
{
    api.call(&DeleteStudent { id: id.to_string() }).await?;
    info!("student {} deleted", id);
    Ok("Student deleted".to_string())
}

pub async fn create_course<C, K, N>(api: &ApiGateway<C, K, N>, draft: &NewCourse) -> PortalResult<String>
where
    C: HttpClient,
    K: KeyValueStore,
    N: Navigator,
{
    let course = api.call(draft).await?;
    info!("course created: {}", course.id);
    Ok(format!("Course created: {}", course.title))
}

pub async fn delete_course<C, K, N>(api: &ApiGateway<C, K, N>, id: &str) -> PortalResult<String>
where
    C: HttpClient,
    K: KeyValueStore,
    N: Navigator,
{
    api.call(&DeleteCourse { id: id.to_string() }).await?;
    info!("course {} deleted", id);
    Ok("Course deleted".to_string())
}

pub async fn create_assignment<C, K, N>(
    api: &ApiGateway<C, K, N>,
    draft: &NewAssignment,
) -> PortalResult<String>
where
    C: HttpClient,
    K: KeyValueStore,
    N: Navigator,
{
    api.call(draft).await?;
    Ok("Assignment created successfully".to_string())
}

pub async fn create_exam<C, K, N>(api: &ApiGateway<C, K, N>, draft: &NewExam) -> PortalResult<String>
where
    C: HttpClient,
    K: KeyValueStore,
    N: Navigator,
{
    api.call(draft).await?;
    Ok("Exam created successfully".to_string())
}

pub async fn review_submission<C, K, N>(
    api: &ApiGateway<C, K, N>,
    req: &ReviewSubmission,
) -> PortalResult<String>
where
    C: HttpClient,
    K: KeyValueStore,
    N: Navigator,
{
    api.call(req).await?;
    info!("submission {} reviewed: {}", req.id, req.status.as_str());
    Ok("Submission reviewed".to_string())
}

pub async fn update_submission_status<C, K, N>(
    api: &ApiGateway<C, K, N>,
    id: &str,
    status: ReviewDecision,
) -> PortalResult<String>
where
    C: HttpClient,
    K: KeyValueStore,
    N: Navigator,
{
    api.call(&UpdateSubmissionStatus {
        id: id.to_string(),
        status,
    })
    .await?;
    Ok(format!("Submission marked as {}", status.as_str()))
}

#[cfg(test)]
mod tests;
