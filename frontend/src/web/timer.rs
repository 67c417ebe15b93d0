//! 时间相关封装

use std::time::Duration;

use gloo_timers::future::TimeoutFuture;
use portal_shared::chrono::{DateTime, Utc};

/// 在 `limit` 之后完成的 future，用作请求截止时间
pub fn deadline(limit: Duration) -> TimeoutFuture {
    let millis = u32::try_from(limit.as_millis()).unwrap_or(u32::MAX);
    TimeoutFuture::new(millis)
}

/// 当前时间（取自 JS `Date.now()`）
pub fn now() -> DateTime<Utc> {
    DateTime::from_timestamp_millis(js_sys::Date::now() as i64).unwrap_or_default()
}
