use leptos::ev::SubmitEvent;
use leptos::prelude::*;
use portal_shared::protocol::AssignmentKind;

use super::{CourseSelect, NumberField, TextAreaField, TextField};
use crate::components::admin_dashboard::AdminActions;

#[component]
pub fn AssignmentsTab(actions: AdminActions) -> impl IntoView {
    let state = actions.state;
    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        actions.create_assignment();
    };

    let kinds = AssignmentKind::ALL
        .into_iter()
        .map(|kind| {
            view! {
                <option
                    value=kind.as_str()
                    selected=move || state.with(|s| s.assignment_draft.kind == kind)
                >
                    {kind.label()}
                </option>
            }
        })
        .collect_view();

    view! {
        <div class="card bg-base-100 shadow-xl">
            <form class="card-body" on:submit=on_submit>
                <h2 class="card-title">"Create New Assignment"</h2>
                <div class="grid gap-4 md:grid-cols-2">
                    <CourseSelect state=state
                        get=|s| s.assignment_draft.course_id.clone()
                        set=|s, v| s.assignment_draft.course_id = v />
                    <TextField state=state label="Title" required=true
                        get=|s| s.assignment_draft.title.clone()
                        set=|s, v| s.assignment_draft.title = v />
                </div>
                <TextAreaField state=state label="Description"
                    get=|s| s.assignment_draft.description.clone()
                    set=|s, v| s.assignment_draft.description = v />
                <div class="grid gap-4 md:grid-cols-3">
                    <div class="form-control">
                        <label class="label">
                            <span class="label-text">"Assignment Type"</span>
                        </label>
                        <select
                            class="select select-bordered w-full"
                            on:change=move |ev| {
                                let kind = AssignmentKind::from_value(&event_target_value(&ev));
                                state.update(|s| s.assignment_draft.kind = kind);
                            }
                        >
                            {kinds}
                        </select>
                    </div>
                    <NumberField state=state label="Order" min=1
                        get=|s| s.assignment_draft.order
                        set=|s, v| s.assignment_draft.order = v />
                    <NumberField state=state label="Week" min=1
                        get=|s| s.assignment_draft.week
                        set=|s, v| s.assignment_draft.week = v />
                </div>
                <div class="grid gap-4 md:grid-cols-3">
                    <TextAreaField state=state label="Blog Links (one per line)"
                        placeholder="https://blog.example.com/post1"
                        get=|s| s.assignment_links.blog.clone()
                        set=|s, v| s.assignment_links.blog = v />
                    <TextAreaField state=state label="GitHub Links (one per line)"
                        placeholder="https://github.com/user/repo"
                        get=|s| s.assignment_links.github.clone()
                        set=|s, v| s.assignment_links.github = v />
                    <TextAreaField state=state label="Study Materials (one per line)"
                        placeholder="https://docs.example.com/guide"
                        get=|s| s.assignment_links.study.clone()
                        set=|s, v| s.assignment_links.study = v />
                </div>
                <div class="grid gap-4 md:grid-cols-2">
                    <TextField state=state label="Due Date" kind="datetime-local"
                        get=|s| s.assignment_draft.due_date.clone()
                        set=|s, v| s.assignment_draft.due_date = v />
                    <TextField state=state label="Release Date" kind="datetime-local"
                        get=|s| s.assignment_draft.release_date.clone()
                        set=|s, v| s.assignment_draft.release_date = v />
                </div>
                <TextField state=state label="Repository URL" kind="url"
                    placeholder="https://github.com/org/assignment-repo"
                    get=|s| s.assignment_draft.repository_url.clone()
                    set=|s, v| s.assignment_draft.repository_url = v />
                <TextAreaField state=state label="Submission Instructions"
                    placeholder="Step-by-step instructions for submission..."
                    get=|s| s.assignment_draft.instructions.clone()
                    set=|s, v| s.assignment_draft.instructions = v />
                <div class="card-actions justify-end">
                    <button type="submit" class="btn btn-primary" disabled=move || state.with(|s| s.loading)>
                        "Create Assignment"
                    </button>
                </div>
            </form>
        </div>
    }
}
