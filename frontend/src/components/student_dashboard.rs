//! 学生面板
//!
//! 所有状态都在一个 `RwSignal<StudentState>` 里，
//! [`StudentActions`] 负责发请求并把结果交回状态。

use leptos::prelude::*;
use leptos::task::spawn_local;
use portal_shared::Role;
use portal_shared::controller::student::{self, StudentState, StudentView};

use crate::api::{PortalApi, use_api};
use crate::auth::logout;
use crate::components::banner::BannerView;
use crate::components::header::{Header, NavButton};
use crate::components::student::courses::{CourseDetail, CourseList};
use crate::components::student::exam::ExamView;
use crate::components::student::explore::ExploreCourses;
use crate::components::student::profile::StudentProfile;
use crate::web::now;
use crate::web::router::use_router;

/// 学生面板的异步动作
#[derive(Clone, Copy)]
pub struct StudentActions {
    api: StoredValue<PortalApi>,
    pub state: RwSignal<StudentState>,
}

impl StudentActions {
    pub fn user_id(&self) -> Option<String> {
        self.api.with_value(|api| api.session().user_id())
    }

    pub fn load_courses(&self) {
        let state = self.state;
        let api = self.api.get_value();
        let user_id = api.session().user_id();
        let mut started = false;
        state.update(|s| started = s.begin_load_courses(user_id.as_deref()));
        if !started {
            return;
        }
        spawn_local(async move {
            let result = student::load_courses(&api).await;
            state.update(|s| s.apply_courses(result));
        });
    }

    pub fn select_course(&self, course_id: String) {
        let state = self.state;
        let api = self.api.get_value();
        state.update(|s| s.loading = true);
        spawn_local(async move {
            let result = student::load_assignments(&api, &course_id).await;
            state.update(|s| s.apply_assignments(&course_id, result));
        });
    }

    pub fn start_exam(&self, course_id: String, order: u32) {
        let state = self.state;
        let api = self.api.get_value();
        state.update(|s| s.loading = true);
        spawn_local(async move {
            let result = student::load_exam(&api, &course_id, order).await;
            state.update(|s| s.apply_exam_paper(&course_id, order, result, now()));
        });
    }

    pub fn submit_exam(&self) {
        let state = self.state;
        let mut req = None;
        state.update(|s| req = s.begin_exam_submit(now()));
        let Some(req) = req else {
            return;
        };
        let api = self.api.get_value();
        let actions = *self;
        spawn_local(async move {
            let result = student::submit_exam(&api, &req).await;
            let mut reload = false;
            state.update(|s| reload = s.apply_exam_result(result));
            if reload {
                actions.load_courses();
            }
        });
    }

    pub fn submit_assignment(&self) {
        let state = self.state;
        let mut req = None;
        state.update(|s| req = s.begin_assignment_submit());
        let Some(req) = req else {
            return;
        };
        let api = self.api.get_value();
        let actions = *self;
        spawn_local(async move {
            let result = student::submit_assignment(&api, &req).await;
            let mut reload = false;
            state.update(|s| reload = s.apply_assignment_submit(result));
            if reload {
                actions.load_courses();
            }
        });
    }

    pub fn load_catalog(&self) {
        let state = self.state;
        let api = self.api.get_value();
        state.update(|s| s.loading = true);
        spawn_local(async move {
            let result = student::load_catalog(&api).await;
            state.update(|s| s.apply_catalog(result));
        });
    }

    pub fn open_catalog_course(&self, course_id: String) {
        let state = self.state;
        let api = self.api.get_value();
        state.update(|s| s.loading = true);
        spawn_local(async move {
            let result = student::load_catalog_course(&api, &course_id).await;
            state.update(|s| s.apply_catalog_course(result));
        });
    }

    pub fn switch_view(&self, view: StudentView) {
        self.state.update(|s| s.switch_view(view));
        if view == StudentView::Explore {
            self.load_catalog();
        }
    }
}

#[component]
pub fn StudentDashboardPage() -> impl IntoView {
    let api = use_api();
    let router = use_router();
    let state = RwSignal::new(StudentState::default());
    let actions = StudentActions { api, state };

    // 初始加载
    actions.load_courses();

    let on_logout = Callback::new(move |_| logout(&api.get_value(), router));
    let banner = Signal::derive(move || state.with(|s| s.banner.clone()));
    let on_dismiss = Callback::new(move |_| state.update(|s| s.dismiss_banner()));

    let nav = move |view: StudentView, label: &'static str| {
        view! {
            <NavButton
                label=label
                active=Signal::derive(move || state.with(|s| s.view == view))
                on_select=Callback::new(move |_| actions.switch_view(view))
            />
        }
    };

    // 布局只随视图切换变化，表单输入不触发重建
    let layout = Memo::new(move |_| {
        state.with(|s| {
            (
                s.view,
                s.exam.active().is_some(),
                s.selected_course().is_some(),
            )
        })
    });

    let body = move || {
        let (view, in_exam, in_course) = layout.get();
        match view {
            StudentView::Explore => view! { <ExploreCourses actions=actions /> }.into_any(),
            StudentView::Profile => view! { <StudentProfile actions=actions /> }.into_any(),
            StudentView::Dashboard if in_exam => view! { <ExamView actions=actions /> }.into_any(),
            StudentView::Dashboard if in_course => view! { <CourseDetail actions=actions /> }.into_any(),
            StudentView::Dashboard => view! { <CourseList actions=actions /> }.into_any(),
        }
    };

    view! {
        <div class="min-h-screen bg-base-200 p-4 md:p-8 font-sans">
            <div class="max-w-7xl mx-auto space-y-6">
                <Header role=Role::Student on_logout=on_logout>
                    {nav(StudentView::Dashboard, "Dashboard")}
                    {nav(StudentView::Explore, "Explore Courses")}
                    {nav(StudentView::Profile, "Profile")}
                </Header>

                <BannerView banner=banner on_dismiss=on_dismiss />

                {move || state.with(|s| s.loading).then(|| view! {
                    <progress class="progress progress-primary w-full"></progress>
                })}

                {body}
            </div>
        </div>
    }
}
