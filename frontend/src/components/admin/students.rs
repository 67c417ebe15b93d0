use leptos::ev::SubmitEvent;
use leptos::prelude::*;
use portal_shared::models::Student;

use super::TextField;
use crate::components::admin_dashboard::AdminActions;

#[component]
pub fn StudentsTab(actions: AdminActions) -> impl IntoView {
    view! {
        <div class="grid gap-6 lg:grid-cols-2">
            <CreateStudentForm actions=actions />
            <StudentList actions=actions />
        </div>
        <StudentDetail actions=actions />
    }
}

#[component]
fn CreateStudentForm(actions: AdminActions) -> impl IntoView {
    let state = actions.state;
    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        actions.create_student();
    };

    let courses = Memo::new(move |_| {
        state.with(|s| {
            s.snapshot
                .courses
                .iter()
                .map(|c| (c.id.clone(), c.title.clone()))
                .collect::<Vec<_>>()
        })
    });

    let course_boxes = move || {
        let courses = courses.get();
        if courses.is_empty() {
            return view! { <p class="text-sm opacity-60">"No courses available"</p> }.into_any();
        }
        courses
            .into_iter()
            .map(|(id, title)| {
                let checked_id = id.clone();
                view! {
                    <label class="label cursor-pointer justify-start gap-3">
                        <input
                            type="checkbox"
                            class="checkbox checkbox-primary checkbox-sm"
                            prop:checked=move || state.with(|s| s.student_draft.assigned_courses.contains(&checked_id))
                            on:change=move |ev| {
                                let assigned = event_target_checked(&ev);
                                state.update(|s| s.student_draft.toggle_course(&id, assigned));
                            }
                        />
                        <span class="label-text">{title}</span>
                    </label>
                }
            })
            .collect_view()
            .into_any()
    };

    view! {
        <div class="card bg-base-100 shadow-xl">
            <form class="card-body" on:submit=on_submit>
                <h2 class="card-title">"Create New Student"</h2>
                <TextField state=state label="Username" placeholder="john_doe" required=true
                    get=|s| s.student_draft.username.clone()
                    set=|s, v| s.student_draft.username = v />
                <TextField state=state label="Full Name" placeholder="John Doe"
                    get=|s| s.student_draft.name.clone()
                    set=|s, v| s.student_draft.name = v />
                <TextField state=state label="Email" kind="email" placeholder="john@example.com" required=true
                    get=|s| s.student_draft.email.clone()
                    set=|s, v| s.student_draft.email = v />
                <TextField state=state label="Password" kind="password" placeholder="Strong password" required=true
                    get=|s| s.student_draft.password.clone()
                    set=|s, v| s.student_draft.password = v />
                <div class="form-control">
                    <label class="label">
                        <span class="label-text">"Assign Courses"</span>
                    </label>
                    <div class="max-h-40 overflow-y-auto">{course_boxes}</div>
                </div>
                <div class="card-actions justify-end">
                    <button type="submit" class="btn btn-primary" disabled=move || state.with(|s| s.loading)>
                        "Create Student"
                    </button>
                </div>
            </form>
        </div>
    }
}

#[component]
fn StudentList(actions: AdminActions) -> impl IntoView {
    let state = actions.state;
    let students = Memo::new(move |_| state.with(|s| s.snapshot.students.clone()));

    let rows = move || {
        let students = students.get();
        if students.is_empty() {
            return view! { <p class="text-center py-6 opacity-50">"No students found"</p> }.into_any();
        }
        students
            .into_iter()
            .map(|student| view! { <StudentRow actions=actions student=student /> })
            .collect_view()
            .into_any()
    };

    view! {
        <div class="card bg-base-100 shadow-xl">
            <div class="card-body">
                <h2 class="card-title">
                    {move || format!("Students List ({})", students.with(Vec::len))}
                </h2>
                <div class="divide-y divide-base-200 max-h-[32rem] overflow-y-auto">{rows}</div>
            </div>
        </div>
    }
}

#[component]
fn StudentRow(actions: AdminActions, student: Student) -> impl IntoView {
    let state = actions.state;
    let view_id = student.id.clone();
    let delete_id = student.id.clone();

    view! {
        <div class="flex items-center justify-between py-3 gap-2">
            <div>
                <div class="font-semibold">{student.display_name().to_string()}</div>
                <div class="text-xs opacity-60">{student.email}</div>
            </div>
            <div class="flex gap-2">
                <button
                    class="btn btn-xs btn-info"
                    on:click=move |_| state.update(|s| s.select_student(Some(view_id.clone())))
                >
                    "View"
                </button>
                <button
                    class="btn btn-xs btn-error"
                    on:click=move |_| actions.delete_student(delete_id.clone())
                >
                    "Delete"
                </button>
            </div>
        </div>
    }
}

#[component]
fn StudentDetail(actions: AdminActions) -> impl IntoView {
    let state = actions.state;
    let selected = Memo::new(move |_| state.with(|s| s.selected_student().cloned()));

    move || {
        selected.get().map(|student| {
            let status = if student.locked { "Locked" } else { "Active" };
            view! {
                <div class="card bg-base-100 shadow-xl">
                    <div class="card-body">
                        <h2 class="card-title">"Student Details"</h2>
                        <div class="grid gap-2 md:grid-cols-2 text-sm">
                            <div><strong>"Name: "</strong>{student.name.clone()}</div>
                            <div><strong>"Username: "</strong>{student.username.clone()}</div>
                            <div><strong>"Email: "</strong>{student.email.clone()}</div>
                            <div><strong>"Status: "</strong>{status}</div>
                            <div><strong>"Courses Enrolled: "</strong>{student.courses.len()}</div>
                            {student.roll_id.clone().map(|id| view! {
                                <div><strong>"Roll ID: "</strong>{id}</div>
                            })}
                        </div>
                        <div class="card-actions justify-end">
                            <button class="btn btn-sm" on:click=move |_| state.update(|s| s.select_student(None))>
                                "Close"
                            </button>
                        </div>
                    </div>
                </div>
            }
        })
    }
}
