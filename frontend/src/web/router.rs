//! 路由服务模块 - 核心引擎
//!
//! 封装了 web_sys 的 History API，所有对 window.history 的操作都集中在此模块。
//! 导航流程："监听 -> 守卫(villa::guard) -> 处理 -> 加载"。

use leptos::prelude::*;
use villa::guard::{Resolution, RouteGuard, post_login_destination};
use villa::route::{AppRoute, NavState};
use villa_shared::SessionUser;
use wasm_bindgen::prelude::*;

/// 获取当前浏览器地址（路径 + 查询串）
fn current_location() -> String {
    let Some(location) = web_sys::window().map(|w| w.location()) else {
        return "/".to_string();
    };
    let path = location.pathname().unwrap_or_else(|_| "/".to_string());
    let search = location.search().unwrap_or_default();
    format!("{}{}", path, search)
}

fn write_history(path: &str, use_push: bool) {
    let Some(history) = web_sys::window().and_then(|w| w.history().ok()) else {
        return;
    };
    let _ = if use_push {
        history.push_state_with_url(&JsValue::NULL, "", Some(path))
    } else {
        history.replace_state_with_url(&JsValue::NULL, "", Some(path))
    };
}

/// 路由器服务
///
/// 通过 Signal 驱动界面更新；认证状态由外部注入。
#[derive(Clone, Copy)]
pub struct RouterService {
    current_route: ReadSignal<AppRoute>,
    set_route: WriteSignal<AppRoute>,
    /// 含查询串的完整地址（房间页按 `?category=` 过滤）
    current_path: ReadSignal<String>,
    set_path: WriteSignal<String>,
    /// 随导航携带的数据
    nav_state: ReadSignal<NavState>,
    set_nav_state: WriteSignal<NavState>,
    is_authenticated: Signal<bool>,
    user: Signal<Option<SessionUser>>,
}

impl RouterService {
    fn new(is_authenticated: Signal<bool>, user: Signal<Option<SessionUser>>) -> Self {
        let (current_route, set_route) = signal(AppRoute::Home);
        let (current_path, set_path) = signal("/".to_string());
        let (nav_state, set_nav_state) = signal(NavState::Empty);

        let router = Self {
            current_route,
            set_route,
            current_path,
            set_path,
            nav_state,
            set_nav_state,
            is_authenticated,
            user,
        };
        // 首次加载也要经过守卫
        router.apply(&current_location(), NavState::Empty, false);
        router
    }

    pub fn current_route(&self) -> ReadSignal<AppRoute> {
        self.current_route
    }

    pub fn current_path(&self) -> ReadSignal<String> {
        self.current_path
    }

    pub fn nav_state(&self) -> ReadSignal<NavState> {
        self.nav_state
    }

    pub fn navigate(&self, path: &str) {
        self.apply(path, NavState::Empty, true);
    }

    /// 携带导航状态跳转（注册 -> 验证页、列表 -> 编辑表单）
    pub fn navigate_with(&self, path: &str, state: NavState) {
        self.apply(path, state, true);
    }

    /// **核心方法：守卫并加载**
    fn apply(&self, path: &str, state: NavState, use_push: bool) {
        let is_auth = self.is_authenticated.get_untracked();
        let user = self.user.get_untracked();

        match RouteGuard::resolve(path, is_auth, user.as_ref()) {
            Resolution::Render(route) => self.load(route, path, state, use_push),
            Resolution::Redirect { to, state } => {
                self.load(to, to.to_path(), state, use_push)
            }
        }
    }

    fn load(&self, route: AppRoute, path: &str, state: NavState, use_push: bool) {
        write_history(path, use_push);
        self.set_nav_state.set(state);
        self.set_path.set(path.to_string());
        self.set_route.set(route);
    }

    /// 浏览器后退/前进同样经过守卫
    fn init_popstate_listener(&self) {
        let router = *self;
        let closure = Closure::<dyn Fn()>::new(move || {
            router.apply(&current_location(), NavState::Empty, false);
        });

        if let Some(window) = web_sys::window() {
            let _ = window
                .add_event_listener_with_callback("popstate", closure.as_ref().unchecked_ref());
        }

        // 泄漏闭包以保持监听器存活
        closure.forget();
    }

    /// 认证状态变化时的自动重定向（注销、会话过期）
    fn setup_auth_redirect(&self) {
        let router = *self;

        Effect::new(move |_| {
            let is_auth = router.is_authenticated.get();
            let route = router.current_route.get_untracked();

            if !is_auth && route.requires_auth() {
                villa::log_info!("[Router] Session ended on {}, redirecting to login.", route);
                let from = router.current_path.get_untracked();
                router.load(
                    AppRoute::auth_failure_redirect(),
                    AppRoute::auth_failure_redirect().to_path(),
                    NavState::From(from),
                    true,
                );
            } else if is_auth && route.should_redirect_when_authenticated() {
                let user = router.user.get_untracked();
                let destination = post_login_destination(user.as_ref(), None);
                router.apply(&destination, NavState::Empty, true);
            }
        });
    }
}

fn provide_router(is_authenticated: Signal<bool>, user: Signal<Option<SessionUser>>) {
    let router = RouterService::new(is_authenticated, user);
    router.init_popstate_listener();
    router.setup_auth_redirect();
    provide_context(router);
}

/// 从 Context 获取路由服务
pub fn use_router() -> RouterService {
    use_context::<RouterService>()
        .expect("RouterService not found in context. Ensure Router is provided.")
}

// ============================================================================
// UI 组件
// ============================================================================

/// 路由器根组件
#[component]
pub fn Router(
    is_authenticated: Signal<bool>,
    user: Signal<Option<SessionUser>>,
    children: Children,
) -> impl IntoView {
    provide_router(is_authenticated, user);
    children()
}

/// 路由出口组件
#[component]
pub fn RouterOutlet(
    /// 路由匹配函数：接收当前路由，返回对应视图
    matcher: fn(AppRoute) -> AnyView,
) -> impl IntoView {
    let router = use_router();

    move || {
        let current = router.current_route().get();
        matcher(current)
    }
}

/// 站内链接，拦截点击改走路由服务
#[component]
pub fn Link(
    #[prop(into)] to: String,
    #[prop(into, optional)] class: String,
    children: Children,
) -> impl IntoView {
    let router = use_router();
    let target = to.clone();
    let on_click = move |ev: web_sys::MouseEvent| {
        ev.prevent_default();
        router.navigate(&target);
    };

    view! {
        <a href=to class=class on:click=on_click>
            {children()}
        </a>
    }
}
