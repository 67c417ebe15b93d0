//! 管理面板
//!
//! 与学生面板相同的结构：一个 `RwSignal<AdminState>`，
//! [`AdminActions`] 负责发请求，每次成功的变更之后重新拉取快照。

use std::future::Future;

use leptos::prelude::*;
use leptos::task::spawn_local;
use log::debug;
use portal_shared::Role;
use portal_shared::controller::admin::{
    self, AdminState, AdminTab, CONFIRM_DELETE_COURSE, CONFIRM_DELETE_STUDENT, Mutation,
};
use portal_shared::error::PortalResult;
use portal_shared::protocol::ReviewDecision;

use crate::api::{PortalApi, use_api};
use crate::auth::logout;
use crate::components::admin::assignments::AssignmentsTab;
use crate::components::admin::courses::CoursesTab;
use crate::components::admin::exams::ExamsTab;
use crate::components::admin::overview::OverviewTab;
use crate::components::admin::students::StudentsTab;
use crate::components::admin::submissions::SubmissionsTab;
use crate::components::banner::BannerView;
use crate::components::header::{Header, NavButton};
use crate::web::confirm;
use crate::web::router::use_router;

#[derive(Clone, Copy)]
pub struct AdminActions {
    api: StoredValue<PortalApi>,
    pub state: RwSignal<AdminState>,
}

impl AdminActions {
    pub fn refresh(&self) {
        let state = self.state;
        let api = self.api.get_value();
        state.update(|s| s.begin_refresh());
        spawn_local(async move {
            let result = admin::load_dashboard(&api).await;
            state.update(|s| s.apply_refresh(result));
        });
    }

    /// 执行一次变更；在途时忽略，成功后刷新
    fn mutate<F, Fut>(&self, mutation: Mutation, work: F)
    where
        F: FnOnce(PortalApi) -> Fut + 'static,
        Fut: Future<Output = PortalResult<String>> + 'static,
    {
        let state = self.state;
        let mut started = false;
        state.update(|s| started = s.begin_mutation());
        if !started {
            debug!("{:?} ignored: another request is in flight", mutation);
            return;
        }
        let api = self.api.get_value();
        let actions = *self;
        spawn_local(async move {
            let result = work(api).await;
            let mut reload = false;
            state.update(|s| reload = s.finish_mutation(mutation, result));
            if reload {
                actions.refresh();
            }
        });
    }

    pub fn create_student(&self) {
        let draft = self.state.with_untracked(|s| s.student_draft.clone());
        self.mutate(Mutation::CreateStudent, move |api| async move {
            admin::create_student(&api, &draft).await
        });
    }

    pub fn delete_student(&self, id: String) {
        if !confirm(CONFIRM_DELETE_STUDENT) {
            return;
        }
        self.mutate(Mutation::DeleteStudent, move |api| async move {
            admin::delete_student(&api, &id).await
        });
    }

    pub fn create_course(&self) {
        let draft = self.state.with_untracked(|s| s.course_request());
        self.mutate(Mutation::CreateCourse, move |api| async move {
            admin::create_course(&api, &draft).await
        });
    }

    pub fn delete_course(&self, id: String) {
        if !confirm(CONFIRM_DELETE_COURSE) {
            return;
        }
        self.mutate(Mutation::DeleteCourse, move |api| async move {
            admin::delete_course(&api, &id).await
        });
    }

    pub fn create_assignment(&self) {
        let draft = self.state.with_untracked(|s| s.assignment_request());
        self.mutate(Mutation::CreateAssignment, move |api| async move {
            admin::create_assignment(&api, &draft).await
        });
    }

    pub fn create_exam(&self) {
        let draft = self.state.with_untracked(|s| s.exam_draft.clone());
        self.mutate(Mutation::CreateExam, move |api| async move {
            admin::create_exam(&api, &draft).await
        });
    }

    pub fn review(&self, decision: ReviewDecision) {
        let Some(req) = self.state.with_untracked(|s| s.review_request(decision)) else {
            return;
        };
        self.mutate(Mutation::ReviewSubmission, move |api| async move {
            admin::review_submission(&api, &req).await
        });
    }

    pub fn update_status(&self, id: String, decision: ReviewDecision) {
        self.mutate(Mutation::UpdateSubmission, move |api| async move {
            admin::update_submission_status(&api, &id, decision).await
        });
    }
}

#[component]
pub fn AdminDashboardPage() -> impl IntoView {
    let api = use_api();
    let router = use_router();
    let state = RwSignal::new(AdminState::default());
    let actions = AdminActions { api, state };

    // 初始加载
    actions.refresh();

    let on_logout = Callback::new(move |_| logout(&api.get_value(), router));
    let banner = Signal::derive(move || state.with(|s| s.banner.clone()));
    let on_dismiss = Callback::new(move |_| state.update(|s| s.dismiss_banner()));

    let tabs = AdminTab::ALL
        .into_iter()
        .map(|tab| {
            view! {
                <NavButton
                    label=tab.label()
                    active=Signal::derive(move || state.with(|s| s.tab == tab))
                    on_select=Callback::new(move |_| state.update(|s| s.switch_tab(tab)))
                />
            }
        })
        .collect_view();

    // 只在切换标签页时重建，表单输入不触发重建
    let tab = Memo::new(move |_| state.with(|s| s.tab));
    let body = move || match tab.get() {
        AdminTab::Dashboard => view! { <OverviewTab actions=actions /> }.into_any(),
        AdminTab::Students => view! { <StudentsTab actions=actions /> }.into_any(),
        AdminTab::Courses => view! { <CoursesTab actions=actions /> }.into_any(),
        AdminTab::Assignments => view! { <AssignmentsTab actions=actions /> }.into_any(),
        AdminTab::Exams => view! { <ExamsTab actions=actions /> }.into_any(),
        AdminTab::Submissions => view! { <SubmissionsTab actions=actions /> }.into_any(),
    };

    view! {
        <div class="min-h-screen bg-base-200 p-4 md:p-8 font-sans">
            <div class="max-w-7xl mx-auto space-y-6">
                <Header role=Role::Admin on_logout=on_logout>
                    {tabs}
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
