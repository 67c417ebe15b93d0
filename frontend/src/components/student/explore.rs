use leptos::prelude::*;
use portal_shared::models::Course;

use crate::components::student_dashboard::StudentActions;

#[component]
pub fn ExploreCourses(actions: StudentActions) -> impl IntoView {
    let state = actions.state;
    let catalog = Memo::new(move |_| state.with(|s| s.catalog.clone()));

    let cards = move || {
        let catalog = catalog.get();
        if catalog.is_empty() {
            return view! {
                <div class="text-center py-10 opacity-50">"No courses available yet."</div>
            }
            .into_any();
        }
        let cards = catalog
            .into_iter()
            .map(|course| view! { <CatalogCard actions=actions course=course /> })
            .collect_view();
        view! { <div class="grid gap-4 md:grid-cols-2 lg:grid-cols-3">{cards}</div> }.into_any()
    };

    view! {
        <div class="space-y-4">
            <h1 class="text-3xl font-bold">"Explore Courses"</h1>
            <CatalogDetail actions=actions />
            {cards}
        </div>
    }
}

fn course_badges(course: &Course) -> impl IntoView + use<> {
    let weeks = course.total_weeks.map(|w| format!("{w} weeks"));
    view! {
        <div class="flex flex-wrap gap-2 text-xs">
            <span class="badge badge-outline">{course.duration.clone()}</span>
            <span class="badge badge-outline">{course.mode.clone()}</span>
            <span class="badge badge-ghost">{course.category.clone()}</span>
            {weeks.map(|w| view! { <span class="badge badge-ghost">{w}</span> })}
        </div>
    }
}

#[component]
fn CatalogCard(actions: StudentActions, course: Course) -> impl IntoView {
    let id = course.id.clone();
    let badges = course_badges(&course);

    view! {
        <div class="card bg-base-100 shadow-xl">
            <div class="card-body">
                <h2 class="card-title">{course.title}</h2>
                <p class="text-sm text-base-content/70 line-clamp-3">{course.description}</p>
                {badges}
                <div class="card-actions justify-between items-center">
                    <span class="text-sm opacity-70">
                        {format!("{} enrolled", course.enrolled_count)}
                    </span>
                    <button
                        class="btn btn-sm btn-outline"
                        on:click=move |_| actions.open_catalog_course(id.clone())
                    >
                        "Details"
                    </button>
                </div>
            </div>
        </div>
    }
}

#[component]
fn CatalogDetail(actions: StudentActions) -> impl IntoView {
    let state = actions.state;
    let detail = Memo::new(move |_| state.with(|s| s.catalog_detail.clone()));

    move || {
        detail.get().map(|course| {
            let validity = match course.validity_months {
                Some(0) | None => "Lifetime access".to_string(),
                Some(m) => format!("Valid for {m} months"),
            };
            let badges = course_badges(&course);
            view! {
                <div class="card bg-base-100 shadow-xl border border-primary">
                    <div class="card-body">
                        <h2 class="card-title text-2xl">{course.title.clone()}</h2>
                        <p>{course.description.clone()}</p>
                        {badges}
                        <p class="text-sm opacity-70">{validity}</p>
                        <p class="text-sm opacity-70">
                            {format!("{} students enrolled", course.enrolled_count)}
                        </p>
                        <p class="text-sm italic">"Contact your admin to enrol in this course."</p>
                        <div class="card-actions justify-end">
                            <button
                                class="btn btn-sm"
                                on:click=move |_| state.update(|s| s.close_catalog_course())
                            >
                                "Close"
                            </button>
                        </div>
                    </div>
                </div>
            }
        })
    }
}
