//! 时间相关的派生计算
//!
//! 全部是“已加载数据 + 当前时间”的纯函数，当前时间由调用方传入。

use chrono::{DateTime, Duration, Utc};

/// 课程面板只展示四周的窗口，与课程配置的总周数无关
pub const WEEK_WINDOW: u32 = 4;

const MILLIS_PER_MINUTE: i64 = 60_000;

/// 当前所在周：`clamp(floor((now - start) / 7d) + 1, 1, WEEK_WINDOW)`
///
/// 没有开始时间时按第 1 周处理。
pub fn current_week(course_start: Option<DateTime<Utc>>, now: DateTime<Utc>) -> u32 {
    let Some(start) = course_start else {
        return 1;
    };
    let elapsed_ms = (now - start).num_milliseconds();
    let week_ms = Duration::weeks(1).num_milliseconds();
    let weeks = elapsed_ms.div_euclid(week_ms) + 1;
    weeks.clamp(1, WEEK_WINDOW as i64) as u32
}

/// 作业是否逾期：截止时间已过且尚未提交
pub fn is_overdue(due: Option<DateTime<Utc>>, submitted: bool, now: DateTime<Utc>) -> bool {
    match due {
        Some(due) => due < now && !submitted,
        None => false,
    }
}

/// 考试用时（分钟），四舍五入
pub fn elapsed_minutes(started_at: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    let ms = (now - started_at).num_milliseconds().max(0);
    (ms + MILLIS_PER_MINUTE / 2) / MILLIS_PER_MINUTE
}
