use leptos::prelude::*;
use portal_shared::controller::student::profile_summary;

use crate::components::student_dashboard::StudentActions;

#[component]
pub fn StudentProfile(actions: StudentActions) -> impl IntoView {
    let state = actions.state;
    let user_id = actions.user_id();
    let summary = move || state.with(|s| profile_summary(user_id.clone(), &s.courses));

    let stat = |title: &'static str, value: String| {
        view! {
            <div class="stat">
                <div class="stat-title">{title}</div>
                <div class="stat-value text-primary">{value}</div>
            </div>
        }
    };

    view! {
        <div class="space-y-4">
            <h1 class="text-3xl font-bold">"My Profile"</h1>
            {move || {
                let summary = summary();
                view! {
                    <div class="card bg-base-100 shadow-xl">
                        <div class="card-body">
                            <p class="text-sm opacity-70">
                                "Student ID: "
                                <span class="font-mono">{summary.user_id.unwrap_or_else(|| "-".to_string())}</span>
                            </p>
                        </div>
                    </div>
                    <div class="stats stats-vertical md:stats-horizontal shadow w-full bg-base-100">
                        {stat("Enrolled Courses", summary.enrolled.to_string())}
                        {stat("Certificates", summary.certificates.to_string())}
                        {stat("Assignments Completed", summary.assignments_completed.to_string())}
                        {stat("Exams Passed", summary.exams_passed.to_string())}
                    </div>
                }
            }}
        </div>
    }
}
