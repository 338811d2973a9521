//! 页面级辅助函数

use crate::auth::{BrowserApi, use_auth};
use leptos::prelude::*;
use leptos::task::spawn_local;
use std::future::Future;
use villa::ClientResult;
use villa::lifecycle::Scope;

/// 页面作用域：组件卸载时中止未完成的请求
pub fn use_scope() -> Scope {
    let scope = Scope::new();
    let owned = scope.clone();
    on_cleanup(move || owned.dispose());
    scope
}

/// 在作用域内运行请求
///
/// 页面已卸载时返回 None，调用方不再写入任何信号。
pub async fn in_scope<T, F>(scope: &Scope, fut: F) -> Option<ClientResult<T>>
where
    F: Future<Output = ClientResult<T>>,
{
    scope.run(fut).await.ok()
}

/// 页面数据加载状态
#[derive(Clone, Debug, PartialEq)]
pub enum Load<T> {
    Loading,
    Ready(T),
    Failed(String),
}

impl<T> Load<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, Load::Loading)
    }

    pub fn ready(&self) -> Option<&T> {
        match self {
            Load::Ready(value) => Some(value),
            _ => None,
        }
    }

    pub fn ready_mut(&mut self) -> Option<&mut T> {
        match self {
            Load::Ready(value) => Some(value),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<String> {
        match self {
            Load::Failed(message) => Some(message.clone()),
            _ => None,
        }
    }
}

/// 挂载时加载一次数据，结果写入返回的信号
pub fn load_once<T, F, Fut>(scope: &Scope, context: &'static str, fetch: F) -> RwSignal<Load<T>>
where
    T: Send + Sync + 'static,
    F: FnOnce(BrowserApi) -> Fut + 'static,
    Fut: Future<Output = ClientResult<T>> + 'static,
{
    let state = RwSignal::new(Load::Loading);
    let api = use_auth().api();
    let scope = scope.clone();
    spawn_local(async move {
        match in_scope(&scope, fetch(api)).await {
            Some(Ok(value)) => state.set(Load::Ready(value)),
            Some(Err(e)) => {
                villa::log_error!("[{}] {}", context, e);
                state.set(Load::Failed(e.user_message()));
            }
            None => {}
        }
    });
    state
}
