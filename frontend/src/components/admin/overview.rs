use leptos::prelude::*;

use crate::components::admin_dashboard::AdminActions;

#[component]
pub fn OverviewTab(actions: AdminActions) -> impl IntoView {
    let state = actions.state;
    let figures = Memo::new(move |_| state.with(|s| (s.stats(), s.snapshot.pending_reviews())));

    let card = |title: &'static str, value: Signal<usize>| {
        view! {
            <div class="stat">
                <div class="stat-title">{title}</div>
                <div class="stat-value text-primary">{move || value.get()}</div>
            </div>
        }
    };

    view! {
        <div class="space-y-6">
            <div class="stats stats-vertical md:stats-horizontal shadow w-full bg-base-100">
                {card("Total Students", Signal::derive(move || figures.get().0.total_students))}
                {card("Total Courses", Signal::derive(move || figures.get().0.total_courses))}
                {card("Total Submissions", Signal::derive(move || figures.get().0.total_submissions))}
                {card("Pending Reviews", Signal::derive(move || figures.get().1))}
            </div>
            <div class="card bg-base-100 shadow-xl">
                <div class="card-body">
                    <h2 class="card-title">"Dashboard Overview"</h2>
                    <p class="text-base-content/70">
                        "Welcome to the Admin Portal. Use the navigation above to manage students, courses, and submissions."
                    </p>
                    <div class="card-actions justify-end">
                        <button class="btn btn-sm btn-outline" on:click=move |_| actions.refresh()>
                            "Refresh"
                        </button>
                    </div>
                </div>
            </div>
        </div>
    }
}
