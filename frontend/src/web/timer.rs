//! 定时器与日期封装模块

use gloo_timers::future::TimeoutFuture;
use std::time::Duration;
use villa_shared::CalendarDate;

/// 异步等待（`setTimeout`）
pub async fn sleep(duration: Duration) {
    let millis = u32::try_from(duration.as_millis()).unwrap_or(u32::MAX);
    TimeoutFuture::new(millis).await;
}

/// 浏览器本地时区的今天
pub fn today() -> Option<CalendarDate> {
    let now = js_sys::Date::new_0();
    CalendarDate::parse(&format!(
        "{:04}-{:02}-{:02}",
        now.get_full_year(),
        now.get_month() + 1,
        now.get_date()
    ))
}
