use leptos::ev::SubmitEvent;
use leptos::prelude::*;
use portal_shared::controller::admin::AdminState;
use portal_shared::protocol::OPTIONS_PER_QUESTION;

use super::{CourseSelect, NumberField, TextAreaField, TextField};
use crate::components::admin_dashboard::AdminActions;

#[component]
pub fn ExamsTab(actions: AdminActions) -> impl IntoView {
    let state = actions.state;
    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        actions.create_exam();
    };

    // 只在题目数量变化时重建题目列表
    let question_count = Memo::new(move |_| state.with(|s| s.exam_draft.questions.len()));
    let questions = move || {
        (0..question_count.get())
            .map(|index| view! { <QuestionEditor state=state index=index /> })
            .collect_view()
    };

    view! {
        <div class="card bg-base-100 shadow-xl">
            <form class="card-body" on:submit=on_submit>
                <h2 class="card-title">"Create New Exam"</h2>
                <div class="grid gap-4 md:grid-cols-2">
                    <CourseSelect state=state
                        get=|s| s.exam_draft.course_id.clone()
                        set=|s, v| s.exam_draft.course_id = v />
                    <TextField state=state label="Title" required=true
                        get=|s| s.exam_draft.title.clone()
                        set=|s, v| s.exam_draft.title = v />
                </div>
                <TextAreaField state=state label="Description"
                    get=|s| s.exam_draft.description.clone()
                    set=|s, v| s.exam_draft.description = v />

                <div class="space-y-4">
                    <h3 class="font-semibold">"Questions"</h3>
                    {questions}
                    <button
                        type="button"
                        class="btn btn-sm btn-outline"
                        on:click=move |_| state.update(|s| s.exam_draft.add_question())
                    >
                        "+ Add Question"
                    </button>
                </div>

                <div class="grid gap-4 md:grid-cols-4">
                    <NumberField state=state label="Passing Score (%)"
                        get=|s| s.exam_draft.passing_score
                        set=|s, v| s.exam_draft.passing_score = v.min(100) />
                    <NumberField state=state label="Duration (minutes)" min=1
                        get=|s| s.exam_draft.duration
                        set=|s, v| s.exam_draft.duration = v />
                    <NumberField state=state label="Order" min=1
                        get=|s| s.exam_draft.order
                        set=|s, v| s.exam_draft.order = v />
                    <NumberField state=state label="Week" min=1
                        get=|s| s.exam_draft.week
                        set=|s, v| s.exam_draft.week = v />
                </div>
                <div class="grid gap-4 md:grid-cols-2">
                    <TextField state=state label="Due Date" kind="datetime-local"
                        get=|s| s.exam_draft.due_date.clone()
                        set=|s, v| s.exam_draft.due_date = v />
                    <TextField state=state label="Release Date" kind="datetime-local"
                        get=|s| s.exam_draft.release_date.clone()
                        set=|s, v| s.exam_draft.release_date = v />
                </div>
                <div class="card-actions justify-end">
                    <button type="submit" class="btn btn-primary" disabled=move || state.with(|s| s.loading)>
                        "Create Exam"
                    </button>
                </div>
            </form>
        </div>
    }
}

/// 单道题目：题干、四个选项、正确答案单选
#[component]
fn QuestionEditor(state: RwSignal<AdminState>, index: usize) -> impl IntoView {
    let text = move |option: usize| {
        state.with(|s| {
            s.exam_draft
                .questions
                .get(index)
                .and_then(|q| q.options.get(option).cloned())
                .unwrap_or_default()
        })
    };
    let correct = move || {
        state.with(|s| {
            s.exam_draft
                .questions
                .get(index)
                .map(|q| q.correct_answer)
                .unwrap_or_default()
        })
    };

    let options = (0..OPTIONS_PER_QUESTION)
        .map(|option| {
            view! {
                <div class="join w-full">
                    <label class="join-item flex items-center px-3 bg-base-200">
                        <input
                            type="radio"
                            class="radio radio-success radio-sm"
                            name=format!("correct-{index}")
                            prop:checked=move || correct() == option
                            on:change=move |_| state.update(|s| s.exam_draft.set_correct(index, option))
                        />
                    </label>
                    <input
                        type="text"
                        class="input input-bordered input-sm join-item w-full"
                        placeholder=format!("Option {}", option + 1)
                        required
                        prop:value=move || text(option)
                        on:input=move |ev| {
                            let value = event_target_value(&ev);
                            state.update(|s| s.exam_draft.set_option(index, option, value));
                        }
                    />
                </div>
            }
        })
        .collect_view();

    view! {
        <div class="border border-base-300 rounded-box p-4 space-y-2">
            <input
                type="text"
                class="input input-bordered w-full"
                placeholder=format!("Question {}", index + 1)
                required
                prop:value=move || {
                    state.with(|s| {
                        s.exam_draft
                            .questions
                            .get(index)
                            .map(|q| q.question.clone())
                            .unwrap_or_default()
                    })
                }
                on:input=move |ev| {
                    let value = event_target_value(&ev);
                    state.update(|s| s.exam_draft.set_question_text(index, value));
                }
            />
            <div class="grid gap-2 md:grid-cols-2">{options}</div>
            <p class="text-xs opacity-60">"Select the radio next to the correct option."</p>
        </div>
    }
}
