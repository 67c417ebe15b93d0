use super::*;
use crate::Role;
use crate::controller::banner::BannerKind;
use crate::error::PortalError;
use crate::gateway::HttpMethod;
use crate::gateway::testing::TestContext;
use crate::models::ExamQuestion;
use chrono::{Duration, TimeZone};
use serde_json::json;

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 10, 12, 0, 0).unwrap()
}

fn assignment(order: u32, week: u32, due: Option<DateTime<Utc>>) -> Assignment {
    Assignment {
        id: None,
        order,
        week,
        title: format!("Task {}", order),
        description: String::new(),
        blog_links: Vec::new(),
        github_links: Vec::new(),
        study_materials: Vec::new(),
        repository_url: None,
        instructions: None,
        due_date: due,
        release_date: None,
        submitted: false,
        completed: false,
    }
}

fn paper(questions: usize) -> ExamPaper {
    ExamPaper {
        title: "Week 1 quiz".into(),
        description: String::new(),
        duration: 30,
        questions: (0..questions)
            .map(|i| ExamQuestion {
                question: format!("Q{}", i),
                options: vec!["a".into(), "b".into(), "c".into(), "d".into()],
            })
            .collect(),
    }
}

fn summary_json(course_id: &str) -> serde_json::Value {
    json!({
        "courseId": course_id,
        "title": "Rust Foundations",
        "startDate": "2025-03-02T12:00:00Z",
        "assignments": { "total": 4, "completed": 1, "active": 2, "upcoming": 1, "missed": 0 },
        "exams": { "total": 3, "passed": [1], "completed": [1, 2], "active": 1, "upcoming": 0, "missed": 0 },
        "eligibleForCertificate": true,
        "certificateFee": 49.0,
        "certificateIssued": false
    })
}

// =========================================================
// 派生计算
// =========================================================

#[test]
fn exam_slots_prefer_passed_over_completed() {
    let progress = ExamProgress {
        total: 3,
        passed: vec![1],
        completed: vec![1, 2],
        ..ExamProgress::default()
    };
    let slots: Vec<ExamAvailability> = exam_slots(&progress)
        .into_iter()
        .map(|s| s.availability)
        .collect();
    assert_eq!(
        slots,
        vec![
            ExamAvailability::Passed,
            ExamAvailability::Failed,
            ExamAvailability::Available
        ]
    );
}

#[test]
fn weeks_skip_empty_and_flag_open_work() {
    let items = vec![
        assignment(1, 1, Some(now() - Duration::days(3))),
        assignment(2, 3, Some(now() + Duration::days(2))),
        assignment(3, 3, None),
        assignment(4, 6, Some(now() + Duration::days(9))),
    ];
    let weeks = group_by_week(&items, now());
    assert_eq!(weeks.len(), 2);
    assert_eq!(weeks[0].week, 1);
    assert!(!weeks[0].is_current);
    assert_eq!(weeks[1].week, 3);
    assert_eq!(weeks[1].assignments.len(), 2);
    assert!(weeks[1].is_current);
}

#[test]
fn certificate_card_requires_eligibility() {
    let mut course: CourseSummary = serde_json::from_value(summary_json("c1")).unwrap();
    assert_eq!(
        certificate_card(&course),
        Some(CertificateCard::Available { fee: Some(49.0) })
    );
    course.certificate_issued = true;
    assert_eq!(certificate_card(&course), Some(CertificateCard::Issued));
    course.eligible_for_certificate = false;
    assert_eq!(certificate_card(&course), None);
}

#[test]
fn switching_view_clears_selected_course() {
    let mut state = StudentState {
        courses: vec![serde_json::from_value(summary_json("c1")).unwrap()],
        ..StudentState::default()
    };
    state.apply_assignments("c1", Ok(vec![assignment(1, 1, None)]));
    assert!(state.selected_course().is_some());

    state.switch_view(StudentView::Explore);
    assert!(state.selected_course().is_none());
    assert!(state.assignments.is_empty());
}

#[test]
fn failed_assignment_load_keeps_previous_selection() {
    let mut state = StudentState::default();
    state.apply_assignments("c1", Err(PortalError::network("offline")));
    assert!(state.selected_course().is_none());
    assert_eq!(
        state.banner.as_ref().map(|b| b.text.as_str()),
        Some(MSG_LOAD_ASSIGNMENTS_FAILED)
    );
}

// =========================================================
// 考试
// =========================================================

#[test]
fn exam_submit_enabled_only_when_every_slot_is_set() {
    let mut state = StudentState::default();
    state.apply_exam_paper("c1", 2, Ok(paper(3)), now());
    assert!(!state.can_submit_exam());

    state.answer(0, 1);
    state.answer(2, 0);
    assert!(!state.can_submit_exam());
    assert!(state.begin_exam_submit(now()).is_none());

    state.answer(1, 7);
    assert!(!state.can_submit_exam());
    state.answer(1, 3);
    assert!(state.can_submit_exam());
}

#[test]
fn exam_request_reports_elapsed_minutes() {
    let mut state = StudentState::default();
    state.apply_exam_paper("c1", 2, Ok(paper(2)), now());
    state.answer(0, 0);
    state.answer(1, 2);

    let req = state
        .begin_exam_submit(now() + Duration::seconds(150))
        .unwrap();
    assert_eq!(req.answers, vec![0, 2]);
    assert_eq!(req.time_taken, 3);
    assert!(matches!(state.exam, ExamPhase::Submitted(_)));
}

#[test]
fn failed_exam_submit_returns_to_in_progress_with_answers() {
    let mut state = StudentState::default();
    state.apply_exam_paper("c1", 1, Ok(paper(1)), now());
    state.answer(0, 2);
    state.begin_exam_submit(now()).unwrap();

    let reload = state.apply_exam_result(Err(PortalError::timeout("request exceeded 10000 ms")));
    assert!(!reload);
    match &state.exam {
        ExamPhase::InProgress(exam) => assert_eq!(exam.answers, vec![Some(2)]),
        other => panic!("unexpected phase {:?}", other),
    }
    assert_eq!(state.banner.unwrap().text, MSG_SUBMIT_EXAM_FAILED);
}

#[test]
fn successful_exam_submit_discards_state() {
    let mut state = StudentState::default();
    state.apply_exam_paper("c1", 1, Ok(paper(1)), now());
    state.answer(0, 0);
    state.begin_exam_submit(now()).unwrap();

    let reload = state.apply_exam_result(Ok(ExamResult {
        score: 80.0,
        passed: true,
    }));
    assert!(reload);
    assert_eq!(state.exam, ExamPhase::NotStarted);
    assert_eq!(
        state.banner.unwrap().text,
        "Exam submitted! Score: 80% (Passed)"
    );
}

// =========================================================
// 与网关配合
// =========================================================

#[test]
fn loading_without_user_id_asks_for_login() {
    let ctx = TestContext::new().signed_in(Role::Student, None);
    let mut state = StudentState::default();
    assert!(!state.begin_load_courses(ctx.api.session().user_id().as_deref()));
    assert_eq!(state.banner.unwrap().text, MSG_LOGIN_FIRST);
    assert!(!state.loading);
    assert!(ctx.http().requests.borrow().is_empty());
}

#[tokio::test]
async fn courses_load_and_current_week_follows_start_date() {
    let ctx = TestContext::new().signed_in(Role::Student, Some("STU-1"));
    ctx.http().mock_response(
        HttpMethod::Get,
        "/api/student/courses",
        200,
        json!({ "courses": [summary_json("c1")] }),
    );
    ctx.http().mock_response(
        HttpMethod::Get,
        "/api/student/course/c1/assignments",
        200,
        json!([{ "order": 1, "week": 2, "title": "Ownership drills" }]),
    );

    let mut state = StudentState::default();
    assert!(state.begin_load_courses(ctx.api.session().user_id().as_deref()));
    state.apply_courses(load_courses(&ctx.api).await);
    assert_eq!(state.courses.len(), 1);

    state.apply_assignments("c1", load_assignments(&ctx.api, "c1").await);
    // 开课 8 天
    assert_eq!(state.current_week(now()), Some(2));
    assert_eq!(state.weeks(now())[0].week, 2);
}

#[tokio::test]
async fn assignment_submit_resets_draft_and_requests_reload() {
    let ctx = TestContext::new().signed_in(Role::Student, Some("STU-1"));
    ctx.http().mock_response(
        HttpMethod::Post,
        "/api/student/course/c1/assignment/1/submit",
        200,
        json!({ "message": "ok" }),
    );

    let mut state = StudentState::default();
    state.apply_assignments("c1", Ok(vec![assignment(1, 1, None)]));
    state.select_assignment(1);
    assert!(state.begin_assignment_submit().is_none());

    state.draft.repository_url = " https://github.com/me/drills ".into();
    let req = state.begin_assignment_submit().unwrap();
    assert_eq!(req.repository_url, "https://github.com/me/drills");

    let reload = state.apply_assignment_submit(submit_assignment(&ctx.api, &req).await);
    assert!(reload);
    assert_eq!(state.draft, AssignmentDraft::default());
    assert!(state.selected_assignment().is_none());
    assert!(!state.loading);
    assert_eq!(
        ctx.http()
            .sent(HttpMethod::Post, "/api/student/course/c1/assignment/1/submit"),
        1
    );
}

#[tokio::test]
async fn exam_round_trip_posts_answers() {
    let ctx = TestContext::new().signed_in(Role::Student, Some("STU-1"));
    ctx.http().mock_response(
        HttpMethod::Get,
        "/api/student/course/c1/exam/1",
        200,
        json!({ "title": "Quiz", "duration": 20, "questions": [
            { "question": "2+2?", "options": ["3", "4", "5", "22"] }
        ] }),
    );
    ctx.http().mock_response(
        HttpMethod::Post,
        "/api/student/course/c1/exam/1/submit",
        200,
        json!({ "score": 100, "passed": true }),
    );

    let mut state = StudentState::default();
    state.apply_exam_paper("c1", 1, load_exam(&ctx.api, "c1", 1).await, now());
    state.answer(0, 1);
    let req = state.begin_exam_submit(now()).unwrap();
    assert!(state.apply_exam_result(submit_exam(&ctx.api, &req).await));

    let body: serde_json::Value =
        serde_json::from_str(ctx.http().last_request().unwrap().body.as_deref().unwrap()).unwrap();
    assert_eq!(body, json!({ "answers": [1], "timeTaken": 0 }));
}

#[test]
fn certificate_purchase_only_informs() {
    let mut state = StudentState {
        courses: vec![serde_json::from_value(summary_json("c1")).unwrap()],
        ..StudentState::default()
    };
    state.purchase_certificate();
    assert!(state.banner.is_none());

    state.apply_assignments("c1", Ok(Vec::new()));
    state.purchase_certificate();
    let banner = state.banner.unwrap();
    assert_eq!(banner.kind, BannerKind::Info);
    assert_eq!(banner.text, MSG_CERTIFICATE_DISABLED);
}

#[test]
fn profile_counts_enrolments() {
    let courses: Vec<CourseSummary> = vec![
        serde_json::from_value(summary_json("c1")).unwrap(),
        serde_json::from_value(summary_json("c2")).unwrap(),
    ];
    let profile = profile_summary(Some("STU-1".into()), &courses);
    assert_eq!(profile.enrolled, 2);
    assert_eq!(profile.assignments_completed, 2);
    assert_eq!(profile.exams_passed, 2);
    assert_eq!(profile.certificates, 0);
}

#[tokio::test]
async fn catalog_lists_courses_and_opens_one() {
    let ctx = TestContext::new().signed_in(Role::Student, Some("STU-1"));
    ctx.http().mock_response(
        HttpMethod::Get,
        "/api/courses",
        200,
        json!([
            { "_id": "c1", "title": "Rust Basics", "mode": "Remote", "enrolledCount": 12 },
            { "_id": "c2", "title": "Async Rust" }
        ]),
    );
    ctx.http().mock_response(
        HttpMethod::Get,
        "/api/courses/c2",
        200,
        json!({ "_id": "c2", "title": "Async Rust", "totalWeeks": 6 }),
    );

    let mut state = StudentState::default();
    state.switch_view(StudentView::Explore);
    state.apply_catalog(load_catalog(&ctx.api).await);
    assert_eq!(state.catalog.len(), 2);
    assert_eq!(state.catalog[0].enrolled_count, 12);

    state.apply_catalog_course(load_catalog_course(&ctx.api, "c2").await);
    assert_eq!(state.catalog_detail.as_ref().map(|c| c.total_weeks), Some(Some(6)));

    state.switch_view(StudentView::Dashboard);
    assert!(state.catalog_detail.is_none());
}
