use leptos::ev::SubmitEvent;
use leptos::prelude::*;
use portal_shared::models::Course;
use portal_shared::protocol::COURSE_MODES;

use super::{NumberField, TextAreaField, TextField};
use crate::components::admin_dashboard::AdminActions;

#[component]
pub fn CoursesTab(actions: AdminActions) -> impl IntoView {
    view! {
        <div class="grid gap-6 lg:grid-cols-2">
            <CreateCourseForm actions=actions />
            <CourseList actions=actions />
        </div>
    }
}

#[component]
fn CreateCourseForm(actions: AdminActions) -> impl IntoView {
    let state = actions.state;
    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        actions.create_course();
    };

    let modes = COURSE_MODES
        .into_iter()
        .map(|mode| {
            view! {
                <option value=mode selected=move || state.with(|s| s.course_draft.mode == mode)>
                    {mode}
                </option>
            }
        })
        .collect_view();

    view! {
        <div class="card bg-base-100 shadow-xl">
            <form class="card-body" on:submit=on_submit>
                <h2 class="card-title">"Create New Course"</h2>
                <TextField state=state label="Course Title" placeholder="Python Development" required=true
                    get=|s| s.course_draft.title.clone()
                    set=|s, v| s.course_draft.title = v />
                <TextAreaField state=state label="Description" placeholder="Course description"
                    get=|s| s.course_draft.description.clone()
                    set=|s, v| s.course_draft.description = v />
                <div class="grid grid-cols-2 gap-4">
                    <TextField state=state label="Duration" placeholder="1 Month"
                        get=|s| s.course_draft.duration.clone()
                        set=|s, v| s.course_draft.duration = v />
                    <div class="form-control">
                        <label class="label">
                            <span class="label-text">"Mode"</span>
                        </label>
                        <select
                            class="select select-bordered w-full"
                            on:change=move |ev| state.update(|s| s.course_draft.mode = event_target_value(&ev))
                        >
                            {modes}
                        </select>
                    </div>
                </div>
                <div class="grid grid-cols-2 gap-4">
                    <TextField state=state label="Category"
                        get=|s| s.course_draft.category.clone()
                        set=|s, v| s.course_draft.category = v />
                    <TextField state=state label="Certification"
                        get=|s| s.course_draft.certification.clone()
                        set=|s, v| s.course_draft.certification = v />
                </div>
                <div class="grid grid-cols-2 gap-4">
                    <NumberField state=state label="Total Weeks" min=1
                        get=|s| s.course_draft.total_weeks
                        set=|s, v| s.course_draft.total_weeks = v />
                    <NumberField state=state label="Validity (Months)"
                        get=|s| s.course_draft.validity_months
                        set=|s, v| s.course_draft.validity_months = v />
                </div>
                <div class="grid grid-cols-2 gap-4">
                    <TextAreaField state=state label="Tools (one per line)"
                        get=|s| s.course_lists.tools.clone()
                        set=|s, v| s.course_lists.tools = v />
                    <TextAreaField state=state label="What you'll learn (one per line)"
                        get=|s| s.course_lists.topics.clone()
                        set=|s, v| s.course_lists.topics = v />
                </div>
                <div class="card-actions justify-end">
                    <button type="submit" class="btn btn-primary" disabled=move || state.with(|s| s.loading)>
                        "Create Course"
                    </button>
                </div>
            </form>
        </div>
    }
}

#[component]
fn CourseList(actions: AdminActions) -> impl IntoView {
    let state = actions.state;
    let courses = Memo::new(move |_| state.with(|s| s.snapshot.courses.clone()));

    let rows = move || {
        let courses = courses.get();
        if courses.is_empty() {
            return view! { <p class="text-center py-6 opacity-50">"No courses found"</p> }.into_any();
        }
        courses
            .into_iter()
            .map(|course| view! { <CourseRow actions=actions course=course /> })
            .collect_view()
            .into_any()
    };

    view! {
        <div class="card bg-base-100 shadow-xl">
            <div class="card-body">
                <h2 class="card-title">
                    {move || format!("Courses List ({})", courses.with(Vec::len))}
                </h2>
                <div class="divide-y divide-base-200 max-h-[32rem] overflow-y-auto">{rows}</div>
            </div>
        </div>
    }
}

#[component]
fn CourseRow(actions: AdminActions, course: Course) -> impl IntoView {
    let id = course.id.clone();
    view! {
        <div class="flex items-center justify-between py-3 gap-2">
            <div>
                <div class="font-semibold">{course.title}</div>
                <div class="text-sm opacity-70">{format!("{} • {}", course.duration, course.mode)}</div>
                <div class="text-xs opacity-60">
                    {format!("Enrolled: {} students", course.enrolled_count)}
                </div>
            </div>
            <button class="btn btn-xs btn-error" on:click=move |_| actions.delete_course(id.clone())>
                "Delete"
            </button>
        </div>
    }
}
