use leptos::prelude::*;
use portal_shared::controller::banner::{Banner, BannerKind};

fn alert_class(kind: BannerKind) -> &'static str {
    match kind {
        BannerKind::Success => "alert alert-success shadow",
        BannerKind::Error => "alert alert-error shadow",
        BannerKind::Info => "alert alert-info shadow",
    }
}

/// 页面顶部的提示横幅，可手动关闭
#[component]
pub fn BannerView(
    #[prop(into)] banner: Signal<Option<Banner>>,
    on_dismiss: Callback<()>,
) -> impl IntoView {
    move || {
        banner.get().map(|b| {
            view! {
                <div role="alert" class=alert_class(b.kind)>
                    <span class="flex-1">{b.text}</span>
                    <button class="btn btn-ghost btn-xs" on:click=move |_| on_dismiss.run(())>
                        "×"
                    </button>
                </div>
            }
        })
    }
}
