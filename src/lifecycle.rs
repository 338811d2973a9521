//! 页面生命周期
//!
//! 每个页面持有一个 `Scope`，页面卸载时调用 `dispose`，
//! 尚未返回的请求被中止，迟到的响应不会再写入已销毁的页面状态。

use crate::error::{ClientError, ClientResult};
use futures::future::{AbortHandle, Abortable, Either, select};
use std::collections::HashMap;
use std::future::Future;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

#[derive(Default)]
struct ScopeInner {
    disposed: AtomicBool,
    next_id: AtomicU64,
    pending: Mutex<HashMap<u64, AbortHandle>>,
}

#[derive(Clone, Default)]
pub struct Scope {
    inner: Arc<ScopeInner>,
}

impl Scope {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        !self.inner.disposed.load(Ordering::SeqCst)
    }

    /// 在作用域内运行异步任务
    ///
    /// 作用域已销毁（之前或期间）时返回 `ErrorKind::Cancelled`。
    pub async fn run<F: Future>(&self, fut: F) -> ClientResult<F::Output> {
        if !self.is_active() {
            return Err(ClientError::cancelled());
        }

        let (handle, registration) = AbortHandle::new_pair();
        let id = self.inner.next_id.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut pending) = self.inner.pending.lock() {
            pending.insert(id, handle);
        }

        let result = Abortable::new(fut, registration).await;

        if let Ok(mut pending) = self.inner.pending.lock() {
            pending.remove(&id);
        }

        match result {
            Ok(value) if self.is_active() => Ok(value),
            _ => Err(ClientError::cancelled()),
        }
    }

    /// 销毁作用域并中止所有未完成的任务
    pub fn dispose(&self) {
        self.inner.disposed.store(true, Ordering::SeqCst);
        if let Ok(mut pending) = self.inner.pending.lock() {
            for (_, handle) in pending.drain() {
                handle.abort();
            }
        }
    }

    pub fn pending_count(&self) -> usize {
        self.inner.pending.lock().map(|p| p.len()).unwrap_or(0)
    }
}

/// 为任务加上超时，计时器由调用方提供（浏览器端为 `setTimeout`）
pub async fn with_timeout<F, T>(fut: F, timer: T) -> ClientResult<F::Output>
where
    F: Future,
    T: Future<Output = ()>,
{
    let fut = std::pin::pin!(fut);
    let timer = std::pin::pin!(timer);
    match select(fut, timer).await {
        Either::Left((value, _)) => Ok(value),
        Either::Right(_) => Err(ClientError::timeout("request timed out")),
    }
}
