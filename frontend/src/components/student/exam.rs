use leptos::prelude::*;
use portal_shared::models::ExamQuestion;

use crate::components::student_dashboard::StudentActions;

/// 作答界面；试卷在进入时读取一次，作答状态按题目响应
#[component]
pub fn ExamView(actions: StudentActions) -> impl IntoView {
    let state = actions.state;
    let Some(paper) = state.with_untracked(|s| s.exam.active().map(|e| e.paper.clone())) else {
        return ().into_any();
    };

    let progress = move || {
        state.with(|s| {
            s.exam
                .active()
                .map(|e| format!("{} / {} answered", e.answered(), e.answers.len()))
                .unwrap_or_default()
        })
    };

    let questions = paper
        .questions
        .into_iter()
        .enumerate()
        .map(|(index, question)| view! { <QuestionCard actions=actions index=index question=question /> })
        .collect_view();

    view! {
        <div class="card bg-base-100 shadow-xl">
            <div class="card-body space-y-4">
                <div class="flex flex-col md:flex-row md:items-center md:justify-between gap-2">
                    <div>
                        <h2 class="card-title text-2xl">{paper.title}</h2>
                        <p class="text-base-content/70">{paper.description}</p>
                    </div>
                    <div class="badge badge-warning badge-lg">
                        {format!("Time Remaining: {} minutes", paper.duration)}
                    </div>
                </div>

                <div class="space-y-4">{questions}</div>

                <div class="card-actions justify-between items-center">
                    <span class="text-sm opacity-70">{progress}</span>
                    <div class="flex gap-2">
                        <button
                            class="btn btn-ghost"
                            on:click=move |_| state.update(|s| s.cancel_exam())
                        >
                            "Cancel"
                        </button>
                        <button
                            class="btn btn-primary"
                            disabled=move || !state.with(|s| s.can_submit_exam())
                            on:click=move |_| actions.submit_exam()
                        >
                            "Submit Exam"
                        </button>
                    </div>
                </div>
            </div>
        </div>
    }
    .into_any()
}

#[component]
fn QuestionCard(actions: StudentActions, index: usize, question: ExamQuestion) -> impl IntoView {
    let state = actions.state;
    let group = format!("question-{index}");

    let options = question
        .options
        .into_iter()
        .enumerate()
        .map(|(option, text)| {
            let group = group.clone();
            let checked = move || {
                state.with(|s| {
                    s.exam
                        .active()
                        .and_then(|e| e.answers.get(index).copied().flatten())
                        == Some(option)
                })
            };
            view! {
                <label class="label cursor-pointer justify-start gap-3">
                    <input
                        type="radio"
                        class="radio radio-primary"
                        name=group
                        prop:checked=checked
                        on:change=move |_| state.update(|s| s.answer(index, option))
                    />
                    <span class="label-text">{text}</span>
                </label>
            }
        })
        .collect_view();

    view! {
        <div class="border border-base-300 rounded-box p-4">
            <p class="font-semibold mb-2">{format!("{}. {}", index + 1, question.question)}</p>
            <div class="space-y-1">{options}</div>
        </div>
    }
}
