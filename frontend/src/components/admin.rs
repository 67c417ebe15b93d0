//! 管理面板的各个标签页，以及表单共用的输入控件
//!
//! 表单字段直接读写 `AdminState` 里的草稿，
//! 用一对 `fn` 指针描述字段的读取与写入。

pub mod assignments;
pub mod courses;
pub mod exams;
pub mod overview;
pub mod students;
pub mod submissions;

use leptos::prelude::*;
use portal_shared::controller::admin::AdminState;

#[component]
pub(crate) fn TextField(
    state: RwSignal<AdminState>,
    label: &'static str,
    get: fn(&AdminState) -> String,
    set: fn(&mut AdminState, String),
    #[prop(default = "text")] kind: &'static str,
    #[prop(optional)] placeholder: &'static str,
    #[prop(optional)] required: bool,
) -> impl IntoView {
    view! {
        <div class="form-control">
            <label class="label">
                <span class="label-text">{label}</span>
            </label>
            <input
                type=kind
                placeholder=placeholder
                required=required
                on:input=move |ev| state.update(|s| set(s, event_target_value(&ev)))
                prop:value=move || state.with(get)
                class="input input-bordered w-full"
            />
        </div>
    }
}

#[component]
pub(crate) fn TextAreaField(
    state: RwSignal<AdminState>,
    label: &'static str,
    get: fn(&AdminState) -> String,
    set: fn(&mut AdminState, String),
    #[prop(optional)] placeholder: &'static str,
) -> impl IntoView {
    view! {
        <div class="form-control">
            <label class="label">
                <span class="label-text">{label}</span>
            </label>
            <textarea
                placeholder=placeholder
                on:input=move |ev| state.update(|s| set(s, event_target_value(&ev)))
                prop:value=move || state.with(get)
                class="textarea textarea-bordered w-full"
            ></textarea>
        </div>
    }
}

/// 数字输入；无法解析的输入直接忽略
#[component]
pub(crate) fn NumberField(
    state: RwSignal<AdminState>,
    label: &'static str,
    get: fn(&AdminState) -> u32,
    set: fn(&mut AdminState, u32),
    #[prop(default = 0)] min: u32,
) -> impl IntoView {
    view! {
        <div class="form-control">
            <label class="label">
                <span class="label-text">{label}</span>
            </label>
            <input
                type="number"
                min=min.to_string()
                on:input=move |ev| {
                    if let Ok(val) = event_target_value(&ev).parse::<u32>() {
                        state.update(|s| set(s, val));
                    }
                }
                prop:value=move || state.with(get).to_string()
                class="input input-bordered w-full"
            />
        </div>
    }
}

/// 课程下拉框，作业与考试表单共用
#[component]
pub(crate) fn CourseSelect(
    state: RwSignal<AdminState>,
    get: fn(&AdminState) -> String,
    set: fn(&mut AdminState, String),
) -> impl IntoView {
    let courses = Memo::new(move |_| {
        state.with(|s| {
            s.snapshot
                .courses
                .iter()
                .map(|c| (c.id.clone(), c.title.clone()))
                .collect::<Vec<_>>()
        })
    });

    view! {
        <div class="form-control">
            <label class="label">
                <span class="label-text">"Course"</span>
            </label>
            <select
                class="select select-bordered w-full"
                required
                on:change=move |ev| state.update(|s| set(s, event_target_value(&ev)))
            >
                <option value="" selected=move || state.with(get).is_empty()>"Select a course"</option>
                {move || courses.get().into_iter().map(|(id, title)| {
                    let value = id.clone();
                    view! {
                        <option value=value selected=move || state.with(get) == id>{title}</option>
                    }
                }).collect_view()}
            </select>
        </div>
    }
}
