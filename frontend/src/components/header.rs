use leptos::prelude::*;
use portal_shared::Role;

/// 顶部导航栏；导航按钮由调用方作为 children 传入
#[component]
pub fn Header(role: Role, on_logout: Callback<()>, children: Children) -> impl IntoView {
    let (brand, role_label) = match role {
        Role::Admin => ("AdminPortal", "Admin"),
        Role::Student => ("StudentPortal", "Student"),
    };

    view! {
        <div class="navbar bg-base-100 rounded-box shadow-xl">
            <div class="flex-1 gap-2">
                <a class="btn btn-ghost text-xl">{brand}</a>
            </div>
            <nav class="flex-none gap-1 hidden md:flex">{children()}</nav>
            <div class="flex-none gap-2 ml-4">
                <span class="badge badge-neutral">{role_label}</span>
                <button on:click=move |_| on_logout.run(()) class="btn btn-outline btn-error btn-sm">
                    "Logout"
                </button>
            </div>
        </div>
    }
}

/// 导航按钮，当前项高亮
#[component]
pub fn NavButton(
    label: &'static str,
    #[prop(into)] active: Signal<bool>,
    on_select: Callback<()>,
) -> impl IntoView {
    view! {
        <button
            class=move || if active.get() { "btn btn-sm btn-primary" } else { "btn btn-sm btn-ghost" }
            on:click=move |_| on_select.run(())
        >
            {label}
        </button>
    }
}
