//! 原生 Web API 封装模块
//!
//! 此模块提供对浏览器原生 API 的轻量级封装，并实现核心层定义的
//! `HttpClient` / `KeyValueStore` 适配器。

mod http;
pub mod router;
mod storage;
mod timer;

pub use http::{BrowserHttpClient, read_file};
pub use storage::BrowserStorage;
pub use timer::{sleep, today};
