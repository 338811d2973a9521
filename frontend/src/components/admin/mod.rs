//! 后台页面
//!
//! 列表页共用 `AdminList`：一次取回集合，搜索、过滤、分页都在本地完成，
//! 删除成功后直接从视图移除，不再重新拉取。

mod bookings;
mod categories;
mod dashboard;
mod feedback;
mod forms;
mod gallery;
mod rooms;
mod users;

pub use bookings::BookingsPage;
pub use categories::CategoriesPage;
pub use dashboard::DashboardPage;
pub use feedback::FeedbackAdminPage;
pub use forms::{CategoryFormPage, GalleryFormPage, RoomFormPage};
pub use gallery::GalleryAdminPage;
pub use rooms::RoomsAdminPage;
pub use users::UsersPage;

use crate::auth::{AuthContext, BrowserApi, use_auth};
use crate::components::common::{ErrorAlert, Pagination, Spinner};
use crate::hooks::{Load, in_scope, load_once, use_scope};
use crate::web::router::Link;
use leptos::prelude::*;
use leptos::task::spawn_local;
use villa::admin::resources;
use villa::admin::{FetchAll, ListView, LocalRemove};
use villa::lifecycle::Scope;
use villa::route::{AdminRoute, AppRoute};

const NAV: [(AdminRoute, &str); 7] = [
    (AdminRoute::Dashboard, "Dashboard"),
    (AdminRoute::Bookings, "Bookings"),
    (AdminRoute::Categories, "Categories"),
    (AdminRoute::Rooms, "Rooms"),
    (AdminRoute::Gallery, "Gallery"),
    (AdminRoute::Feedback, "Feedback"),
    (AdminRoute::Users, "Users"),
];

/// 后台布局：侧边导航 + 内容区
#[component]
pub fn AdminLayout(title: &'static str, children: Children) -> impl IntoView {
    let auth = use_auth();
    let is_admin = move || auth.state.get().is_admin();

    view! {
        <div class="flex min-h-[80vh]">
            <aside class="w-56 bg-base-200 hidden md:block">
                <ul class="menu p-4">
                    {NAV
                        .iter()
                        .map(|(route, label)| view! {
                            <li><Link to=AppRoute::Admin(*route).to_path()>{*label}</Link></li>
                        })
                        .collect_view()}
                </ul>
            </aside>
            <main class="flex-1 p-4 md:p-8">
                <h1 class="text-3xl font-bold mb-6">{title}</h1>
                <Show when=move || !is_admin()>
                    <div role="alert" class="alert alert-warning mb-4">
                        <span>"This area is for administrators. Some actions may be refused."</span>
                    </div>
                </Show>
                {children()}
            </main>
        </div>
    }
}

/// 搜索框 + 可选的下拉过滤
#[component]
pub fn Toolbar(
    on_search: Callback<String>,
    #[prop(optional)] filters: Vec<&'static str>,
    #[prop(optional)] on_filter: Option<Callback<String>>,
    #[prop(optional)] children: Option<Children>,
) -> impl IntoView {
    let has_filters = !filters.is_empty();
    view! {
        <div class="flex flex-wrap gap-2 items-center mb-4">
            <input
                type="search"
                placeholder="Search..."
                class="input input-bordered input-sm w-full max-w-xs"
                on:input=move |ev| on_search.run(event_target_value(&ev))
            />
            {has_filters.then(|| view! {
                <select
                    class="select select-bordered select-sm"
                    on:change=move |ev| {
                        if let Some(cb) = on_filter {
                            cb.run(event_target_value(&ev));
                        }
                    }
                >
                    <option value="">"All"</option>
                    {filters.iter().map(|f| view! { <option value=*f>{*f}</option> }).collect_view()}
                </select>
            })}
            <div class="flex-1"></div>
            {children.map(|c| c())}
        </div>
    }
}

/// 后台列表控制器
pub struct AdminList<R: Send + Sync + 'static> {
    pub state: RwSignal<Load<ListView<R>>>,
    pub error: RwSignal<Option<String>>,
    auth: AuthContext,
    scope: Scope,
}

impl<R: Send + Sync + 'static> Clone for AdminList<R> {
    fn clone(&self) -> Self {
        Self {
            state: self.state,
            error: self.error,
            auth: self.auth,
            scope: self.scope.clone(),
        }
    }
}

impl<R> AdminList<R>
where
    R: FetchAll + Clone + Send + Sync + 'static,
    R::Key: Send + Sync + 'static,
{
    pub fn new(context: &'static str) -> Self {
        let scope = use_scope();
        let state = load_once(&scope, context, |api| async move {
            resources::load::<R, _, _>(&api).await
        });
        Self {
            state,
            error: RwSignal::new(None),
            auth: use_auth(),
            scope,
        }
    }

    pub fn api(&self) -> BrowserApi {
        self.auth.api()
    }

    pub fn scope(&self) -> &Scope {
        &self.scope
    }

    fn edit_view(&self, f: impl FnOnce(&mut ListView<R>)) {
        self.state.update(|s| {
            if let Some(view) = s.ready_mut() {
                f(view);
            }
        });
    }

    pub fn on_search(&self) -> Callback<String> {
        let this = self.clone();
        Callback::new(move |text: String| this.edit_view(|v| v.set_search(&text)))
    }

    pub fn on_filter(&self) -> Callback<String> {
        let this = self.clone();
        Callback::new(move |value: String| this.edit_view(|v| v.set_filter(&value)))
    }

    /// 当前页的行
    pub fn rows(&self) -> Vec<R> {
        self.state.with(|s| {
            s.ready()
                .map(|v| v.page_items().into_iter().cloned().collect())
                .unwrap_or_default()
        })
    }

    pub fn is_empty(&self) -> bool {
        self.state
            .with(|s| s.ready().is_some_and(|v| v.filtered().is_empty()))
    }

    /// 确认后删除，成功则本地移除
    pub fn delete(&self, key: R::Key) {
        let confirmed = window()
            .confirm_with_message(&format!("Delete this {}?", R::LABEL))
            .unwrap_or(false);
        if !confirmed {
            return;
        }
        let mut this = self.clone();
        spawn_local(async move {
            let api = this.auth.api();
            let scope = this.scope.clone();
            let result = in_scope(
                &scope,
                resources::delete_from_view(&api, &mut this, &key, confirmed),
            )
            .await;
            match result {
                Some(Ok(true)) => this.error.set(None),
                Some(Ok(false)) | None => {}
                Some(Err(e)) => this.error.set(Some(e.user_message())),
            }
        });
    }

    /// 用更新后的记录替换列表中的同键项
    pub fn replace(&self, item: R) {
        self.edit_view(|v| {
            v.replace(item);
        });
    }

    /// 加载状态、错误与分页控件
    pub fn frame(&self, table: impl Fn() -> AnyView + Send + Sync + 'static) -> impl IntoView {
        let state = self.state;
        let error = self.error;
        let this = self.clone();
        let list_error = Signal::derive(move || error.get().or_else(|| state.with(Load::error)));
        let page = Signal::derive(move || state.with(|s| s.ready().map_or(1, ListView::page)));
        let total = Signal::derive(move || state.with(|s| s.ready().map_or(1, ListView::total_pages)));
        let on_prev = {
            let this = this.clone();
            Callback::new(move |_| this.edit_view(ListView::prev_page))
        };
        let on_next = Callback::new(move |_| this.edit_view(ListView::next_page));
        let empty = {
            let this = self.clone();
            move || this.is_empty()
        };

        view! {
            <ErrorAlert message=list_error />
            <Show when=move || state.with(Load::is_loading)>
                <Spinner />
            </Show>
            <Show when=empty>
                <p class="text-base-content/60 py-6 text-center">"Nothing to show."</p>
            </Show>
            <div class="overflow-x-auto bg-base-100 rounded-box shadow">{table}</div>
            <Pagination page=page total=total on_prev=on_prev on_next=on_next />
        }
    }
}

impl<R> LocalRemove for AdminList<R>
where
    R: FetchAll + Clone + Send + Sync + 'static,
    R::Key: Send + Sync + 'static,
{
    type Item = R;

    fn remove_local(&mut self, key: &R::Key) {
        self.edit_view(|v| {
            v.remove(key);
        });
    }
}
