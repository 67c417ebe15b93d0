use leptos::ev::SubmitEvent;
use leptos::prelude::*;
use leptos::task::spawn_local;
use portal_shared::controller::login::{LoginState, sign_in};

use crate::api::use_api;
use crate::web::router::use_router;

#[component]
pub fn LoginPage() -> impl IntoView {
    let api = use_api();
    let router = use_router();

    // 每次挂载都是一份全新的表单
    let state = RwSignal::new(LoginState::default());

    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        let mut started = false;
        state.update(|s| started = s.begin_submit());
        if !started {
            return;
        }

        let (email, password) = state.with_untracked(|s| (s.email.clone(), s.password.clone()));
        let api = api.get_value();
        spawn_local(async move {
            let outcome = sign_in(&api, &email, &password).await;
            let mut next = None;
            state.update(|s| next = s.finish(&outcome));
            if let Some(route) = next {
                router.navigate_to(route);
            }
        });
    };

    let is_submitting = move || state.with(|s| s.is_submitting());
    let error_msg = move || state.with(|s| s.error().map(str::to_string));

    view! {
        <div class="hero min-h-screen bg-base-200">
            <div class="hero-content flex-col lg:flex-row-reverse w-full max-w-4xl gap-8">
                <div class="text-center lg:text-left">
                    <h1 class="text-4xl font-bold">"Learn & Grow"</h1>
                    <p class="py-4 text-base-content/70">
                        "Master new skills with our comprehensive training platform. Access courses designed for professional development."
                    </p>
                </div>

                <div class="card shrink-0 w-full max-w-md shadow-2xl bg-base-100">
                    <form class="card-body" on:submit=on_submit>
                        <h2 class="card-title">"Login"</h2>
                        {move || error_msg().map(|msg| view! {
                            <div role="alert" class="alert alert-error text-sm py-2">
                                <span>{msg}</span>
                            </div>
                        })}

                        <div class="form-control">
                            <label class="label" for="email">
                                <span class="label-text">"Email"</span>
                            </label>
                            <input
                                id="email"
                                type="email"
                                placeholder="you@example.com"
                                autocomplete="email"
                                on:input=move |ev| state.update(|s| s.email = event_target_value(&ev))
                                prop:value=move || state.with(|s| s.email.clone())
                                disabled=is_submitting
                                class="input input-bordered"
                                required
                            />
                        </div>
                        <div class="form-control">
                            <label class="label" for="password">
                                <span class="label-text">"Password"</span>
                            </label>
                            <input
                                id="password"
                                type="password"
                                placeholder="••••••••"
                                autocomplete="current-password"
                                on:input=move |ev| state.update(|s| s.password = event_target_value(&ev))
                                prop:value=move || state.with(|s| s.password.clone())
                                disabled=is_submitting
                                class="input input-bordered"
                                required
                            />
                        </div>
                        <div class="form-control mt-6">
                            <button class="btn btn-primary" disabled=move || !state.with(|s| s.can_submit())>
                                {move || if is_submitting() {
                                    view! { <span class="loading loading-spinner"></span> "Logging in..." }.into_any()
                                } else {
                                    "Login".into_any()
                                }}
                            </button>
                        </div>
                    </form>
                </div>
            </div>
        </div>
    }
}
