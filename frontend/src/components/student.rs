//! 学生面板的子视图

pub mod courses;
pub mod exam;
pub mod explore;
pub mod profile;

use portal_shared::chrono::{DateTime, Utc};

/// 本地化的日期显示
pub(crate) fn format_date(value: Option<DateTime<Utc>>) -> String {
    value
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "-".to_string())
}
