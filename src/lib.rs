//! Villa 客户端核心
//!
//! 与浏览器无关的业务层，前端通过注入的适配器驱动：
//! - `request`: HTTP 抽象（浏览器用 fetch 实现，测试用 Mock）
//! - `storage` / `session`: 会话存储与令牌判定
//! - `api` / `media`: 统一请求分发与媒体上传
//! - `route` / `guard`: 路由定义与守卫
//! - `catalog`: 公开页面数据（房型、房间、图库、评价）
//! - `lifecycle`: 页面作用域与请求取消
//! - `flows`: 注册、验证、找回密码、预订、反馈等多步流程
//! - `admin`: 后台列表与增删改

// =========================================================
// 跨平台日志宏
// =========================================================

#[cfg(target_arch = "wasm32")]
#[doc(hidden)]
pub use web_sys as __web_sys;

#[cfg(target_arch = "wasm32")]
#[macro_export]
macro_rules! log_info {
    ($($t:tt)*) => ($crate::__web_sys::console::log_1(&format!($($t)*).into()))
}

#[cfg(not(target_arch = "wasm32"))]
#[macro_export]
macro_rules! log_info {
    ($($t:tt)*) => (println!($($t)*))
}

#[cfg(target_arch = "wasm32")]
#[macro_export]
macro_rules! log_warn {
    ($($t:tt)*) => ($crate::__web_sys::console::warn_1(&format!($($t)*).into()))
}

#[cfg(not(target_arch = "wasm32"))]
#[macro_export]
macro_rules! log_warn {
    ($($t:tt)*) => (eprintln!($($t)*))
}

#[cfg(target_arch = "wasm32")]
#[macro_export]
macro_rules! log_error {
    ($($t:tt)*) => ($crate::__web_sys::console::error_1(&format!($($t)*).into()))
}

#[cfg(not(target_arch = "wasm32"))]
#[macro_export]
macro_rules! log_error {
    ($($t:tt)*) => (eprintln!($($t)*))
}

pub mod admin;
pub mod api;
pub mod catalog;
pub mod config;
pub mod error;
pub mod flows;
pub mod guard;
pub mod lifecycle;
pub mod media;
pub mod request;
pub mod route;
pub mod session;
pub mod storage;

pub use api::ApiClient;
pub use config::AppConfig;
pub use error::{ClientError, ClientResult, ErrorKind};
pub use session::SessionService;
pub use villa_shared as shared;
