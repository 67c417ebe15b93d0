use leptos::prelude::*;
use portal_shared::models::{STATUS_AWAITING_REVIEW, Submission, SubmissionKind};
use portal_shared::protocol::ReviewDecision;

use crate::components::admin_dashboard::AdminActions;
use crate::components::student::format_date;

fn status_badge(status: &str) -> &'static str {
    match status {
        "Approved" | "Passed" | "Issued" => "badge badge-success",
        "Rejected" | "Failed" => "badge badge-error",
        _ => "badge badge-warning",
    }
}

#[component]
pub fn SubmissionsTab(actions: AdminActions) -> impl IntoView {
    let state = actions.state;
    let submissions = Memo::new(move |_| state.with(|s| s.snapshot.submissions.clone()));

    let rows = move || {
        let submissions = submissions.get();
        if submissions.is_empty() {
            return view! { <p class="text-center py-6 opacity-50">"No submissions found"</p> }.into_any();
        }
        submissions
            .into_iter()
            .map(|submission| view! { <SubmissionRow actions=actions submission=submission /> })
            .collect_view()
            .into_any()
    };

    view! {
        <div class="card bg-base-100 shadow-xl">
            <div class="card-body">
                <h2 class="card-title">
                    {move || format!("Submissions ({})", submissions.with(Vec::len))}
                </h2>
                <div class="divide-y divide-base-200 max-h-[32rem] overflow-y-auto">{rows}</div>
            </div>
        </div>
        <SubmissionDetail actions=actions />
    }
}

#[component]
fn SubmissionRow(actions: AdminActions, submission: Submission) -> impl IntoView {
    let state = actions.state;
    let id = submission.id.clone();
    let status = submission.status_label();
    let repository = submission
        .assignment_submission
        .as_ref()
        .and_then(|a| a.repository_url.clone())
        .filter(|_| submission.kind == SubmissionKind::Assignment);
    let score = submission
        .exam_submission
        .as_ref()
        .map(|e| e.score)
        .filter(|_| submission.kind == SubmissionKind::Exam);

    view! {
        <div class="flex items-center justify-between py-3 gap-2">
            <div class="space-y-1">
                <div class="font-semibold">{submission.student_label()}</div>
                <div class="text-sm opacity-70">{submission.headline()}</div>
                <div class="text-xs opacity-60">{format_date(submission.submitted_at())}</div>
                <span class=status_badge(&status)>{status.clone()}</span>
            </div>
            <div class="flex gap-2 items-center">
                {repository.map(|url| view! {
                    <a class="btn btn-xs btn-info" href=url target="_blank" rel="noopener noreferrer">"Repo"</a>
                })}
                {score.map(|score| view! {
                    <span class="badge badge-ghost">{format!("Score: {}%", score)}</span>
                })}
                <button
                    class="btn btn-xs btn-primary"
                    on:click=move |_| state.update(|s| s.select_submission(Some(id.clone())))
                >
                    "Details"
                </button>
            </div>
        </div>
    }
}

#[component]
fn SubmissionDetail(actions: AdminActions) -> impl IntoView {
    let state = actions.state;
    let selected = Memo::new(move |_| state.with(|s| s.selected_submission().cloned()));

    move || {
        selected.get().map(|submission| {
            view! {
                <div class="card bg-base-100 shadow-xl">
                    <div class="card-body">
                        <h2 class="card-title">"Submission Details"</h2>
                        <div class="grid gap-2 md:grid-cols-2 text-sm">
                            <div><strong>"Student: "</strong>{submission.student_label()}</div>
                            <div><strong>"Type: "</strong>{format!("{:?}", submission.kind)}</div>
                            <div><strong>"Course: "</strong>{submission.course_title()}</div>
                            {kind_details(&submission)}
                            <div><strong>"Submitted: "</strong>{format_date(submission.submitted_at())}</div>
                        </div>
                        {submission_actions(actions, &submission)}
                        <div class="card-actions justify-end">
                            <button class="btn btn-sm" on:click=move |_| state.update(|s| s.select_submission(None))>
                                "Close"
                            </button>
                        </div>
                    </div>
                </div>
            }
        })
    }
}

fn kind_details(submission: &Submission) -> AnyView {
    match submission.kind {
        SubmissionKind::Assignment => {
            let Some(a) = submission.assignment_submission.clone() else {
                return ().into_any();
            };
            view! {
                <div><strong>"Assignment: "</strong>{a.assignment_order}</div>
                <div>
                    <strong>"Repository: "</strong>
                    {a.repository_url.map(|url| view! {
                        <a class="link link-primary" href=url target="_blank" rel="noopener noreferrer">"View"</a>
                    })}
                </div>
                {a.pull_request_url.map(|url| view! {
                    <div>
                        <strong>"Pull Request: "</strong>
                        <a class="link link-primary" href=url target="_blank" rel="noopener noreferrer">"View"</a>
                    </div>
                })}
                <div><strong>"Status: "</strong>{a.status.unwrap_or_default()}</div>
                <div><strong>"Feedback: "</strong>{a.feedback.unwrap_or_else(|| "None".to_string())}</div>
            }
            .into_any()
        }
        SubmissionKind::Exam => {
            let Some(e) = submission.exam_submission.clone() else {
                return ().into_any();
            };
            view! {
                <div><strong>"Exam: "</strong>{e.exam_order}</div>
                <div><strong>"Score: "</strong>{format!("{}%", e.score)}</div>
                <div><strong>"Passed: "</strong>{if e.passed { "Yes" } else { "No" }}</div>
                <div>
                    <strong>"Time Taken: "</strong>
                    {format!("{} minutes", e.time_taken.unwrap_or_default())}
                </div>
            }
            .into_any()
        }
        SubmissionKind::Certificate => {
            let Some(c) = submission.certificate.clone() else {
                return ().into_any();
            };
            view! {
                <div><strong>"Certificate Number: "</strong>{c.certificate_number.unwrap_or_default()}</div>
                <div><strong>"Payment Status: "</strong>{c.payment_status.unwrap_or_default()}</div>
                <div>
                    <strong>"Fee: "</strong>
                    {c.payment_amount.map(|fee| format!("₹{}", fee)).unwrap_or_default()}
                </div>
            }
            .into_any()
        }
        SubmissionKind::Module => view! {
            <div><strong>"Status: "</strong>{submission.status_label()}</div>
        }
        .into_any(),
    }
}

/// 审阅区：作业提交走审阅接口（带反馈），模块提交只改状态
fn submission_actions(actions: AdminActions, submission: &Submission) -> AnyView {
    let state = actions.state;
    if submission.awaits_review() {
        return view! {
            <div class="space-y-2">
                <textarea
                    class="textarea textarea-bordered w-full"
                    placeholder="Add feedback..."
                    prop:value=move || state.with(|s| s.review_feedback.clone())
                    on:input=move |ev| state.update(|s| s.review_feedback = event_target_value(&ev))
                ></textarea>
                <div class="flex gap-2">
                    <button
                        class="btn btn-sm btn-success"
                        disabled=move || state.with(|s| s.loading)
                        on:click=move |_| actions.review(ReviewDecision::Approved)
                    >
                        "Approve"
                    </button>
                    <button
                        class="btn btn-sm btn-error"
                        disabled=move || state.with(|s| s.loading)
                        on:click=move |_| actions.review(ReviewDecision::Rejected)
                    >
                        "Reject"
                    </button>
                </div>
            </div>
        }
        .into_any();
    }

    let pending_module =
        submission.kind == SubmissionKind::Module && submission.status_label() == STATUS_AWAITING_REVIEW;
    if !pending_module {
        return ().into_any();
    }
    let approve_id = submission.id.clone();
    let reject_id = submission.id.clone();
    view! {
        <div class="flex gap-2">
            <button
                class="btn btn-sm btn-success"
                on:click=move |_| actions.update_status(approve_id.clone(), ReviewDecision::Approved)
            >
                "Mark Approved"
            </button>
            <button
                class="btn btn-sm btn-error"
                on:click=move |_| actions.update_status(reject_id.clone(), ReviewDecision::Rejected)
            >
                "Mark Rejected"
            </button>
        </div>
    }
    .into_any()
}
