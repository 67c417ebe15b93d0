use leptos::prelude::*;
use portal_shared::controller::student::{
    CertificateCard, ExamAvailability, WeekGroup, certificate_card, exam_slots,
};
use portal_shared::date;
use portal_shared::models::{Assignment, AssignmentStatus, CourseSummary};

use super::format_date;
use crate::components::student_dashboard::StudentActions;
use crate::web::now;

// =========================================================
// 课程列表
// =========================================================

#[component]
pub fn CourseList(actions: StudentActions) -> impl IntoView {
    let state = actions.state;
    let courses = Memo::new(move |_| state.with(|s| s.courses.clone()));

    view! {
        <div class="space-y-4">
            <div>
                <h1 class="text-3xl font-bold">"My Courses"</h1>
                <p class="text-base-content/70">"Track your progress and complete assignments"</p>
            </div>
            {move || {
                let list = courses.get();
                if list.is_empty() {
                    view! {
                        <div class="card bg-base-100 shadow">
                            <div class="card-body items-center text-base-content/70">
                                "No courses assigned yet. Contact your admin."
                            </div>
                        </div>
                    }
                    .into_any()
                } else {
                    view! {
                        <div class="grid grid-cols-1 md:grid-cols-2 lg:grid-cols-3 gap-4">
                            {list.into_iter().map(|c| view! { <CourseCard course=c actions=actions /> }).collect_view()}
                        </div>
                    }
                    .into_any()
                }
            }}
        </div>
    }
}

#[component]
fn CourseCard(course: CourseSummary, actions: StudentActions) -> impl IntoView {
    let course_id = course.course_id.clone();
    let week = date::current_week(course.course_start(), now());
    let expires = course
        .expires_at
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "Lifetime".to_string());
    let certificate = certificate_card(&course).map(|card| match card {
        CertificateCard::Issued => "Certificate Issued".to_string(),
        CertificateCard::Available { fee } => format!(
            "Certificate Available (₹{})",
            fee.map(|f| f.to_string()).unwrap_or_default()
        ),
    });
    let a = course.assignments;
    let e = course.exams;

    view! {
        <div
            class="card bg-base-100 shadow-xl cursor-pointer hover:shadow-2xl transition"
            on:click=move |_| actions.select_course(course_id.clone())
        >
            <div class="card-body gap-3">
                <h2 class="card-title">{course.title}</h2>
                <span class="text-sm text-base-content/70">"Expires: " {expires}</span>

                <div>
                    <h4 class="font-semibold">"Assignments"</h4>
                    <div class="grid grid-cols-3 gap-1 text-sm">
                        <span>"Total: " {a.total}</span>
                        <span>"Completed: " {a.completed}</span>
                        <span>"Active: " {a.active}</span>
                        <span>"Upcoming: " {a.upcoming}</span>
                        <span>"Missed: " {a.missed}</span>
                    </div>
                    <span class="badge badge-primary badge-outline mt-2">"Current Week: " {week}</span>
                </div>

                <div>
                    <h4 class="font-semibold">"Exams"</h4>
                    <div class="grid grid-cols-3 gap-1 text-sm">
                        <span>"Total: " {e.total}</span>
                        <span>"Passed: " {e.passed.len()}</span>
                        <span>"Active: " {e.active}</span>
                        <span>"Upcoming: " {e.upcoming}</span>
                        <span>"Missed: " {e.missed}</span>
                    </div>
                </div>

                {certificate.map(|text| view! { <div class="alert alert-success py-2 text-sm">{text}</div> })}
            </div>
        </div>
    }
}

// =========================================================
// 课程详情
// =========================================================

#[component]
pub fn CourseDetail(actions: StudentActions) -> impl IntoView {
    let state = actions.state;
    // 只在切换详情/总览时重建，避免输入框随每次按键重建
    let in_assignment = Memo::new(move |_| state.with(|s| s.selected_assignment().is_some()));

    let detail = move || {
        if in_assignment.get() {
            view! { <AssignmentDetail actions=actions /> }.into_any()
        } else {
            view! { <CourseOverview actions=actions /> }.into_any()
        }
    };

    view! { <div class="space-y-4">{detail}</div> }
}

#[component]
fn CourseOverview(actions: StudentActions) -> impl IntoView {
    let state = actions.state;
    let overview = Memo::new(move |_| {
        let at = now();
        state.with(|s| {
            (
                s.weeks(at),
                s.selected_course().cloned(),
                s.current_week(at).unwrap_or(1),
            )
        })
    });

    move || {
        let (weeks, course, current_week) = overview.get();
        overview_body(weeks, course, current_week, actions).into_any()
    }
}

fn overview_body(
    weeks: Vec<WeekGroup>,
    course: Option<CourseSummary>,
    current_week: u32,
    actions: StudentActions,
) -> impl IntoView {
    let state = actions.state;
    let course_id = course.as_ref().map(|c| c.course_id.clone()).unwrap_or_default();

    let exam_list = course
        .as_ref()
        .map(|c| exam_slots(&c.exams))
        .unwrap_or_default();
    let certificate = course.as_ref().and_then(|c| {
        certificate_card(c).map(|card| (card, c.certificate_fee))
    });

    view! {
        <div>
            <button class="btn btn-sm btn-outline" on:click=move |_| state.update(|s| s.close_course())>
                "← Back to Courses"
            </button>
        </div>
        <div>
            <h1 class="text-3xl font-bold">
                {course.as_ref().map(|c| c.title.clone()).unwrap_or_default()}
            </h1>
            <p class="text-base-content/70">
                "Complete assignments and take exams to earn your certificate · Current Week: " {current_week}
            </p>
        </div>

        <div class="grid grid-cols-1 lg:grid-cols-3 gap-6">
            <div class="lg:col-span-2 space-y-4">
                <h2 class="text-xl font-semibold">"Assignments"</h2>
                {if weeks.is_empty() {
                    view! { <p class="text-base-content/70">"No assignments yet"</p> }.into_any()
                } else {
                    weeks
                        .into_iter()
                        .map(|group| {
                            let section_class = if group.is_current {
                                "card bg-base-100 shadow border-l-4 border-primary"
                            } else {
                                "card bg-base-100 shadow"
                            };
                            view! {
                                <div class=section_class>
                                    <div class="card-body">
                                        <h3 class="card-title">
                                            "Week " {group.week}
                                            {group.is_current.then(|| view! { <span class="badge badge-primary">"Current Week"</span> })}
                                        </h3>
                                        <ul class="space-y-2">
                                            {group
                                                .assignments
                                                .into_iter()
                                                .map(|a| view! { <AssignmentRow assignment=a actions=actions /> })
                                                .collect_view()}
                                        </ul>
                                    </div>
                                </div>
                            }
                        })
                        .collect_view()
                        .into_any()
                }}
            </div>

            <div class="space-y-4">
                <div class="card bg-base-100 shadow">
                    <div class="card-body">
                        <h3 class="card-title">"Exams"</h3>
                        {if exam_list.is_empty() {
                            view! { <p class="text-base-content/70">"No exams available"</p> }.into_any()
                        } else {
                            exam_list
                                .into_iter()
                                .map(|slot| {
                                    let course_id = course_id.clone();
                                    let (label, badge) = match slot.availability {
                                        ExamAvailability::Passed => ("Passed", "badge badge-success"),
                                        ExamAvailability::Failed => ("Failed", "badge badge-error"),
                                        ExamAvailability::Available => ("Available", "badge badge-info"),
                                    };
                                    view! {
                                        <div class="flex items-center justify-between py-1">
                                            <span>"Exam " {slot.order}</span>
                                            <span class=badge>{label}</span>
                                            {(slot.availability == ExamAvailability::Available).then(|| view! {
                                                <button
                                                    class="btn btn-xs btn-primary"
                                                    on:click=move |_| actions.start_exam(course_id.clone(), slot.order)
                                                >
                                                    "Start Exam"
                                                </button>
                                            })}
                                        </div>
                                    }
                                })
                                .collect_view()
                                .into_any()
                        }}
                    </div>
                </div>

                {certificate.map(|(card, fee)| view! {
                    <div class="card bg-base-100 shadow">
                        <div class="card-body">
                            <h3 class="card-title">"Certificate"</h3>
                            <p>"You have completed all requirements for this course!"</p>
                            <p><strong>"Fee: "</strong> "₹" {fee.map(|f| f.to_string()).unwrap_or_default()}</p>
                            <p class="text-sm italic">"This fee covers server and infrastructure costs only."</p>
                            {match card {
                                CertificateCard::Issued => view! {
                                    <div class="alert alert-success">"Certificate has been issued!"</div>
                                }
                                .into_any(),
                                CertificateCard::Available { .. } => view! {
                                    <button
                                        class="btn btn-primary"
                                        disabled=move || state.with(|s| s.loading)
                                        on:click=move |_| state.update(|s| s.purchase_certificate())
                                    >
                                        "Purchase Certificate"
                                    </button>
                                }
                                .into_any(),
                            }}
                        </div>
                    </div>
                })}
            </div>
        </div>
    }
}

#[component]
fn AssignmentRow(assignment: Assignment, actions: StudentActions) -> impl IntoView {
    let state = actions.state;
    let order = assignment.order;
    let overdue = date::is_overdue(assignment.due_date, assignment.submitted, now());
    let status = match assignment.status() {
        AssignmentStatus::Completed => "Approved",
        AssignmentStatus::Submitted => "Submitted",
        AssignmentStatus::NotSubmitted => "Not Submitted",
    };

    view! {
        <li class="flex items-center gap-3 p-2 rounded-box bg-base-200">
            <div class="badge badge-neutral">{order}</div>
            <div class="flex-1">
                <div class="font-medium">{assignment.title}</div>
                <div class="text-sm text-base-content/70">
                    "Due: " {format_date(assignment.due_date)}
                    {overdue.then(|| view! { <span class="text-error">" (Overdue)"</span> })}
                </div>
            </div>
            <span class="text-sm">{status}</span>
            <button
                class="btn btn-xs btn-primary"
                on:click=move |_| state.update(|s| s.select_assignment(order))
            >
                "View Details"
            </button>
        </li>
    }
}

// =========================================================
// 作业详情与提交
// =========================================================

fn link_list(title: &'static str, links: Vec<String>) -> impl IntoView {
    (!links.is_empty()).then(|| {
        view! {
            <div>
                <h4 class="font-semibold">{title}</h4>
                <ul class="list-disc list-inside">
                    {links
                        .into_iter()
                        .map(|link| {
                            let href = link.clone();
                            view! {
                                <li><a class="link link-primary" href=href target="_blank" rel="noopener noreferrer">{link}</a></li>
                            }
                        })
                        .collect_view()}
                </ul>
            </div>
        }
    })
}

#[component]
fn AssignmentDetail(actions: StudentActions) -> impl IntoView {
    let state = actions.state;
    let Some(assignment) = state.with_untracked(|s| s.selected_assignment().cloned()) else {
        return ().into_any();
    };

    let submission = if assignment.submitted {
        view! {
            <div class="alert alert-success">
                "Assignment Submitted"
                {assignment.completed.then_some(" and Approved")}
            </div>
        }
        .into_any()
    } else {
        view! {
            <div class="space-y-2">
                <label class="label"><span class="label-text">"Your GitHub Repository URL"</span></label>
                <input
                    type="url"
                    class="input input-bordered w-full"
                    placeholder="https://github.com/yourusername/repo-name"
                    prop:value=move || state.with(|s| s.draft.repository_url.clone())
                    on:input=move |ev| state.update(|s| s.draft.repository_url = event_target_value(&ev))
                />
                <label class="label"><span class="label-text">"Pull Request URL (optional)"</span></label>
                <input
                    type="url"
                    class="input input-bordered w-full"
                    placeholder="https://github.com/org/repo/pull/123"
                    prop:value=move || state.with(|s| s.draft.pull_request_url.clone())
                    on:input=move |ev| state.update(|s| s.draft.pull_request_url = event_target_value(&ev))
                />
                <button
                    class="btn btn-primary"
                    disabled=move || state.with(|s| s.loading || !s.draft.can_submit())
                    on:click=move |_| actions.submit_assignment()
                >
                    "Submit Assignment"
                </button>
            </div>
        }
        .into_any()
    };

    view! {
        <div class="card bg-base-100 shadow-xl">
            <div class="card-body space-y-3">
                <h2 class="card-title">{assignment.title}</h2>
                <p>{assignment.description}</p>

                <h3 class="text-lg font-semibold">"Study Materials"</h3>
                {link_list("Blog Links:", assignment.blog_links)}
                {link_list("GitHub Reference Links:", assignment.github_links)}
                {link_list("Study Materials:", assignment.study_materials)}

                <h3 class="text-lg font-semibold">"Submission Instructions"</h3>
                {assignment.repository_url.map(|url| {
                    let href = url.clone();
                    view! {
                        <p>
                            <strong>"Repository: "</strong>
                            <a class="link" href=href target="_blank" rel="noopener noreferrer">{url}</a>
                        </p>
                    }
                })}
                {assignment.instructions.map(|text| view! { <pre class="whitespace-pre-wrap bg-base-200 p-3 rounded-box">{text}</pre> })}

                {submission}

                <div class="card-actions">
                    <button class="btn btn-outline" on:click=move |_| state.update(|s| s.close_assignment())>
                        "Back to Assignments"
                    </button>
                </div>
            </div>
        </div>
    }
    .into_any()
}
