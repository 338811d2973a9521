//! 认证模块
//!
//! 会话持久化在 localStorage（由 `villa::session` 读写），
//! 这里把它镜像成信号，供路由守卫与导航栏订阅。

use crate::web::{BrowserHttpClient, BrowserStorage};
use leptos::prelude::*;
use std::rc::Rc;
use std::sync::LazyLock;
use villa::config::{
    VAR_API_BASE_URL, VAR_MEDIA_CLOUD_NAME, VAR_MEDIA_UPLOAD_BASE, VAR_MEDIA_UPLOAD_PRESET,
    VAR_PREFILL_DEV_OTP, VAR_REQUEST_TIMEOUT_SECS,
};
use villa::{ApiClient, AppConfig, SessionService};
use villa_shared::SessionUser;

pub type BrowserApi = ApiClient<BrowserHttpClient, BrowserStorage>;

/// 构建期注入的配置（Trunk 构建环境变量）
static CONFIG: LazyLock<AppConfig> = LazyLock::new(|| AppConfig::from_lookup(build_var));

fn build_var(key: &str) -> Option<String> {
    let value = match key {
        VAR_API_BASE_URL => option_env!("VILLA_API_BASE_URL"),
        VAR_MEDIA_UPLOAD_BASE => option_env!("VILLA_MEDIA_UPLOAD_BASE"),
        VAR_MEDIA_CLOUD_NAME => option_env!("VILLA_MEDIA_CLOUD_NAME"),
        VAR_MEDIA_UPLOAD_PRESET => option_env!("VILLA_MEDIA_UPLOAD_PRESET"),
        VAR_REQUEST_TIMEOUT_SECS => option_env!("VILLA_REQUEST_TIMEOUT_SECS"),
        VAR_PREFILL_DEV_OTP => option_env!("VILLA_PREFILL_DEV_OTP"),
        _ => None,
    };
    value.map(str::to_string)
}

pub fn config() -> &'static AppConfig {
    &CONFIG
}

pub fn session() -> SessionService<BrowserStorage> {
    SessionService::new(BrowserStorage)
}

/// 认证状态
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AuthState {
    pub user: Option<SessionUser>,
    pub is_authenticated: bool,
}

impl AuthState {
    fn from_storage() -> Self {
        let session = session();
        Self {
            is_authenticated: session.is_authenticated(),
            user: session.user(),
        }
    }

    pub fn is_admin(&self) -> bool {
        self.is_authenticated && self.user.as_ref().is_some_and(SessionUser::is_admin)
    }
}

/// 认证上下文
#[derive(Clone, Copy)]
pub struct AuthContext {
    pub state: ReadSignal<AuthState>,
    pub set_state: WriteSignal<AuthState>,
}

impl AuthContext {
    pub fn new() -> Self {
        let (state, set_state) = signal(AuthState::from_storage());
        Self { state, set_state }
    }

    /// 认证状态信号（注入路由服务）
    pub fn is_authenticated_signal(&self) -> Signal<bool> {
        let state = self.state;
        Signal::derive(move || state.get().is_authenticated)
    }

    pub fn user_signal(&self) -> Signal<Option<SessionUser>> {
        let state = self.state;
        Signal::derive(move || state.get().user)
    }

    /// 重新读取存储（登录成功后调用）
    pub fn refresh(&self) {
        self.set_state.set(AuthState::from_storage());
    }

    /// 构造 API 客户端
    ///
    /// 后端拒绝令牌时会话已在核心层清除，这里同步信号，路由服务随之跳转登录页。
    pub fn api(&self) -> BrowserApi {
        let set_state = self.set_state;
        let http = BrowserHttpClient::new(config().request_timeout);
        ApiClient::new(&config().api_base_url, http, session())
            .with_auth_failure_hook(Rc::new(move || set_state.set(AuthState::default())))
    }
}

pub fn use_auth() -> AuthContext {
    use_context::<AuthContext>().expect("AuthContext should be provided")
}

/// 注销并清除状态
///
/// 导航由路由服务的认证状态监听自动处理。
pub fn logout(ctx: &AuthContext) {
    session().sign_out();
    ctx.set_state.set(AuthState::default());
}
