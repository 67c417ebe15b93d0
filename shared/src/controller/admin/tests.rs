use super::*;
use crate::controller::banner::BannerKind;
use crate::controller::login::{LoginOutcome, sign_in};
use crate::error::PortalError;
use crate::gateway::HttpMethod;
use crate::gateway::testing::TestContext;
use crate::guard::{self, GuardDecision};
use crate::route::AppRoute;
use crate::Role;
use serde_json::json;

// =========================================================
// Fixtures
// =========================================================

fn students_json() -> serde_json::Value {
    json!([
        { "_id": "s1", "username": "ana", "name": "Ana", "email": "ana@portal.dev", "rollId": "R-001" },
        { "_id": "s2", "username": "ben", "name": "", "email": "ben@portal.dev", "locked": true }
    ])
}

fn courses_json() -> serde_json::Value {
    json!([
        { "_id": "c1", "title": "Rust Foundations", "enrolledCount": 2 }
    ])
}

fn submissions_json() -> serde_json::Value {
    json!([
        {
            "_id": "sub1",
            "type": "assignment",
            "studentId": { "userId": "R-001" },
            "courseId": { "title": "Rust Foundations" },
            "assignmentSubmission": {
                "assignmentOrder": 2,
                "repositoryUrl": "https://github.com/ana/drills",
                "status": "Submitted"
            }
        },
        {
            "_id": "sub2",
            "type": "exam",
            "studentId": "s2",
            "courseId": "c1",
            "examSubmission": { "examOrder": 1, "score": 55, "passed": false }
        }
    ])
}

fn mock_snapshot(ctx: &TestContext) {
    ctx.http()
        .mock_response(HttpMethod::Get, "/api/admin/students", 200, students_json());
    ctx.http()
        .mock_response(HttpMethod::Get, "/api/courses", 200, courses_json());
    ctx.http()
        .mock_response(HttpMethod::Get, "/api/submissions", 200, submissions_json());
}

async fn loaded_state(ctx: &TestContext) -> AdminState {
    let mut state = AdminState::default();
    state.begin_refresh();
    state.apply_refresh(load_dashboard(&ctx.api).await);
    state
}

// =========================================================
// 刷新
// =========================================================

#[tokio::test]
async fn refresh_replaces_snapshot_and_derives_stats() {
    let ctx = TestContext::new().signed_in(Role::Admin, None);
    mock_snapshot(&ctx);

    let state = loaded_state(&ctx).await;
    assert!(!state.loading);
    assert!(state.banner.is_none());
    assert_eq!(
        state.stats(),
        DashboardStats {
            total_students: 2,
            total_courses: 1,
            total_submissions: 2,
        }
    );
    assert_eq!(state.snapshot.pending_reviews(), 1);
}

#[tokio::test]
async fn refresh_accepts_records_with_null_fields() {
    let ctx = TestContext::new().signed_in(Role::Admin, None);
    mock_snapshot(&ctx);
    ctx.http().mock_response(
        HttpMethod::Get,
        "/api/admin/students",
        200,
        json!([{ "_id": "s1", "username": "a", "name": null, "email": "a@x" }]),
    );
    ctx.http().mock_response(
        HttpMethod::Get,
        "/api/courses",
        200,
        json!([{ "_id": "c1", "title": "Rust", "description": null, "enrolledCount": null }]),
    );

    let state = loaded_state(&ctx).await;
    assert!(state.banner.is_none());
    assert_eq!(state.stats().total_students, 1);
    assert_eq!(state.snapshot.students[0].display_name(), "a");
}

#[tokio::test]
async fn partial_failure_keeps_previous_snapshot() {
    let ctx = TestContext::new().signed_in(Role::Admin, None);
    mock_snapshot(&ctx);
    let mut state = loaded_state(&ctx).await;
    let before = state.snapshot.clone();

    // 课程接口挂掉，另外两个换了数据
    ctx.http()
        .mock_response(HttpMethod::Get, "/api/admin/students", 200, json!([]));
    ctx.http().mock_response(
        HttpMethod::Get,
        "/api/courses",
        500,
        json!({ "error": "boom" }),
    );

    state.begin_refresh();
    state.apply_refresh(load_dashboard(&ctx.api).await);

    assert!(!state.loading);
    assert_eq!(state.snapshot, before);
    assert_eq!(state.stats().total_students, 2);
    let banner = state.banner.clone().unwrap();
    assert_eq!(banner.kind, BannerKind::Error);
    assert_eq!(banner.text, MSG_LOAD_DASHBOARD_FAILED);
}

#[tokio::test]
async fn refresh_failure_from_timeout_shows_single_banner() {
    let ctx = TestContext::new().signed_in(Role::Admin, None);
    mock_snapshot(&ctx);
    ctx.http().mock_failure(
        HttpMethod::Get,
        "/api/submissions",
        PortalError::timeout("request exceeded 10000 ms"),
    );

    let state = loaded_state(&ctx).await;
    assert_eq!(state.snapshot, AdminSnapshot::default());
    assert_eq!(
        state.banner.map(|b| b.text),
        Some(MSG_LOAD_DASHBOARD_FAILED.to_string())
    );
    assert!(ctx.api.session().has_token());
}

#[tokio::test]
async fn selection_is_dropped_when_entry_disappears() {
    let ctx = TestContext::new().signed_in(Role::Admin, None);
    mock_snapshot(&ctx);
    let mut state = loaded_state(&ctx).await;
    state.select_student(Some("s2".into()));
    assert_eq!(state.selected_student().unwrap().display_name(), "ben");

    ctx.http().mock_response(
        HttpMethod::Get,
        "/api/admin/students",
        200,
        json!([{ "_id": "s1", "username": "ana" }]),
    );
    state.apply_refresh(load_dashboard(&ctx.api).await);
    assert!(state.selected_student().is_none());
}

// =========================================================
// 变更
// =========================================================

#[tokio::test]
async fn create_student_reports_roll_id_and_resets_draft() {
    let ctx = TestContext::new().signed_in(Role::Admin, None);
    ctx.http().mock_response(
        HttpMethod::Post,
        "/api/admin/students",
        201,
        json!({ "student": { "_id": "s3", "username": "cy", "rollId": "R-003" } }),
    );

    let mut state = AdminState::default();
    state.student_draft.username = "cy".into();
    state.student_draft.toggle_course("c1", true);
    assert!(state.begin_mutation());
    assert!(!state.begin_mutation());

    let result = create_student(&ctx.api, &state.student_draft).await;
    assert!(state.finish_mutation(Mutation::CreateStudent, result));
    assert_eq!(state.banner.clone().unwrap().text, "Student created: R-003");
    assert_eq!(state.student_draft, NewStudent::default());

    let body: serde_json::Value =
        serde_json::from_str(ctx.http().last_request().unwrap().body.as_deref().unwrap()).unwrap();
    assert_eq!(body["assignedCourses"], json!(["c1"]));
}

#[tokio::test]
async fn create_failure_keeps_draft_and_shows_backend_error() {
    let ctx = TestContext::new().signed_in(Role::Admin, None);
    ctx.http().mock_response(
        HttpMethod::Post,
        "/api/courses",
        400,
        json!({ "error": "Title required" }),
    );

    let mut state = AdminState::default();
    state.course_draft.description = "draft".into();
    state.begin_mutation();
    let result = create_course(&ctx.api, &state.course_draft).await;
    assert!(!state.finish_mutation(Mutation::CreateCourse, result));
    assert_eq!(state.banner.clone().unwrap().text, "Title required");
    assert_eq!(state.course_draft.description, "draft");
    assert!(!state.loading);
}

#[tokio::test]
async fn course_tools_and_topics_are_sent_as_lists() {
    let ctx = TestContext::new().signed_in(Role::Admin, None);
    ctx.http().mock_response(
        HttpMethod::Post,
        "/api/courses",
        201,
        json!({ "_id": "c9", "title": "Rust Basics" }),
    );

    let mut state = AdminState::default();
    state.course_draft.title = "Rust Basics".into();
    state.course_lists.tools = "cargo\n rustup \n".into();
    state.course_lists.topics = "ownership".into();

    let req = state.course_request();
    assert_eq!(req.tools, vec!["cargo", "rustup"]);
    assert_eq!(req.learn_topics, vec!["ownership"]);

    state.begin_mutation();
    let result = create_course(&ctx.api, &req).await;
    assert!(state.finish_mutation(Mutation::CreateCourse, result));
    assert_eq!(state.banner.clone().unwrap().text, "Course created: Rust Basics");
    assert_eq!(state.course_lists, CourseListText::default());

    let body: serde_json::Value =
        serde_json::from_str(ctx.http().last_request().unwrap().body.as_deref().unwrap()).unwrap();
    assert_eq!(body["learnTopics"], json!(["ownership"]));
    assert_eq!(body["validityMonths"], json!(1));
}

#[tokio::test]
async fn delete_failure_uses_fixed_text() {
    let ctx = TestContext::new().signed_in(Role::Admin, None);
    ctx.http().mock_response(
        HttpMethod::Delete,
        "/api/admin/students/s1",
        404,
        json!({ "message": "Student not found" }),
    );

    let mut state = AdminState::default();
    state.begin_mutation();
    let result = delete_student(&ctx.api, "s1").await;
    assert!(!state.finish_mutation(Mutation::DeleteStudent, result));
    assert_eq!(state.banner.unwrap().text, "Error deleting student");
}

#[tokio::test]
async fn assignment_links_are_split_per_line() {
    let ctx = TestContext::new().signed_in(Role::Admin, None);
    ctx.http().mock_raw(
        HttpMethod::Post,
        "/api/admin/courses/c1/assignments",
        201,
        "",
    );

    let mut state = AdminState::default();
    state.assignment_draft.course_id = "c1".into();
    state.assignment_draft.title = "Borrow checker".into();
    state.assignment_links.github = "https://github.com/a\n\n https://github.com/b \n".into();

    let req = state.assignment_request();
    assert_eq!(req.github_links, vec!["https://github.com/a", "https://github.com/b"]);
    assert!(req.blog_links.is_empty());

    state.begin_mutation();
    let result = create_assignment(&ctx.api, &req).await;
    assert!(state.finish_mutation(Mutation::CreateAssignment, result));
    assert_eq!(state.assignment_draft, NewAssignment::default());
    assert_eq!(state.assignment_links, LinkText::default());
}

#[tokio::test]
async fn exam_draft_resets_to_single_blank_question() {
    let ctx = TestContext::new().signed_in(Role::Admin, None);
    ctx.http().mock_response(
        HttpMethod::Post,
        "/api/admin/courses/c1/exams",
        201,
        json!({ "_id": "e1" }),
    );

    let mut state = AdminState::default();
    state.exam_draft.course_id = "c1".into();
    state.exam_draft.add_question();
    state.exam_draft.set_correct(1, 3);

    state.begin_mutation();
    let result = create_exam(&ctx.api, &state.exam_draft).await;
    assert!(state.finish_mutation(Mutation::CreateExam, result));
    assert_eq!(state.banner.clone().unwrap().text, "Exam created successfully");
    assert_eq!(state.exam_draft.questions.len(), 1);
}

#[tokio::test]
async fn review_only_targets_pending_assignment_submissions() {
    let ctx = TestContext::new().signed_in(Role::Admin, None);
    mock_snapshot(&ctx);
    ctx.http().mock_response(
        HttpMethod::Post,
        "/api/admin/submissions/sub1/review",
        200,
        json!({ "message": "ok" }),
    );

    let mut state = loaded_state(&ctx).await;
    state.select_submission(Some("sub2".into()));
    assert!(state.review_request(ReviewDecision::Approved).is_none());

    state.select_submission(Some("sub1".into()));
    state.review_feedback = "  Nice work  ".into();
    let req = state.review_request(ReviewDecision::Approved).unwrap();
    assert_eq!(req.feedback, "Nice work");

    state.begin_mutation();
    let result = review_submission(&ctx.api, &req).await;
    assert!(state.finish_mutation(Mutation::ReviewSubmission, result));
    assert_eq!(state.banner.clone().unwrap().text, "Submission reviewed");
    assert!(state.review_feedback.is_empty());
}

#[tokio::test]
async fn status_update_uses_put() {
    let ctx = TestContext::new().signed_in(Role::Admin, None);
    ctx.http().mock_response(
        HttpMethod::Put,
        "/api/submissions/sub2",
        200,
        json!({}),
    );

    let mut state = AdminState::default();
    state.begin_mutation();
    let result = update_submission_status(&ctx.api, "sub2", ReviewDecision::Rejected).await;
    assert!(state.finish_mutation(Mutation::UpdateSubmission, result));
    assert_eq!(
        state.banner.unwrap().text,
        "Submission marked as Rejected"
    );
    assert_eq!(ctx.http().sent(HttpMethod::Put, "/api/submissions/sub2"), 1);
}

#[tokio::test]
async fn expired_session_during_mutation_logs_out() {
    let ctx = TestContext::new().signed_in(Role::Admin, None);
    ctx.http().mock_response(
        HttpMethod::Delete,
        "/api/courses/c1",
        401,
        json!({ "message": "Token expired" }),
    );

    let mut state = AdminState::default();
    state.begin_mutation();
    let result = delete_course(&ctx.api, "c1").await;
    assert!(!state.finish_mutation(Mutation::DeleteCourse, result));
    assert!(ctx.memory.is_empty());
    assert_eq!(*ctx.navigator().redirects.borrow(), vec![false]);
    assert_eq!(
        guard::check(AppRoute::Admin, ctx.api.session()),
        GuardDecision::Redirect(AppRoute::Login)
    );
}

// =========================================================
// 端到端
// =========================================================

#[tokio::test]
async fn admin_login_then_dashboard_load() {
    let ctx = TestContext::new();
    ctx.http().mock_response(
        HttpMethod::Post,
        "/api/auth/login",
        200,
        json!({ "token": "jwt-admin", "role": "admin", "userId": "ADM-1" }),
    );
    mock_snapshot(&ctx);

    let outcome = sign_in(&ctx.api, "admin@portal.dev", "secret").await;
    assert!(matches!(outcome, LoginOutcome::Admitted(_)));
    assert_eq!(ctx.api.session().token().as_deref(), Some("jwt-admin"));
    assert_eq!(
        guard::check(AppRoute::Admin, ctx.api.session()),
        GuardDecision::Allow
    );

    let state = loaded_state(&ctx).await;
    let stats = state.stats();
    assert_eq!(stats.total_students, state.snapshot.students.len());
    assert_eq!(stats.total_courses, state.snapshot.courses.len());
    assert_eq!(stats.total_submissions, state.snapshot.submissions.len());

    // 三个请求都带上了新 token
    let requests = ctx.http().requests.borrow();
    assert_eq!(requests.len(), 4);
    assert!(requests[1..].iter().all(|r| {
        r.headers.get(crate::HEADER_AUTHORIZATION).map(String::as_str) == Some("Bearer jwt-admin")
    }));
}
