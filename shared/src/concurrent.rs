//! 并发执行工具
//!
//! 浏览器里没有多线程，这里只有“和计时器赛跑”这一种并发。

use std::future::Future;
use std::time::Duration;

use futures::future::{Either, select};
use futures::pin_mut;

use crate::error::{PortalError, PortalResult};

/// 让 `work` 与 `deadline` 赛跑
///
/// `deadline` 先完成时返回超时错误，`work` 被丢弃。
/// `limit` 只用于错误信息，计时由调用方提供的 `deadline` 负责，
/// 这样浏览器和测试可以各自注入计时器。
pub async fn with_deadline<F, D>(work: F, deadline: D, limit: Duration) -> PortalResult<F::Output>
where
    F: Future,
    D: Future<Output = ()>,
{
    pin_mut!(work);
    pin_mut!(deadline);

    match select(work, deadline).await {
        Either::Left((output, _)) => Ok(output),
        Either::Right(((), _)) => Err(PortalError::timeout(format!(
            "request exceeded {} ms",
            limit.as_millis()
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PortalErrorStatus;

    #[tokio::test]
    async fn finished_work_wins_the_race() {
        let limit = Duration::from_millis(200);
        let result = with_deadline(async { 7 }, tokio::time::sleep(limit), limit).await;
        assert_eq!(result.unwrap(), 7);
    }

    #[tokio::test]
    async fn pending_work_times_out() {
        let limit = Duration::from_millis(10);
        let result = with_deadline(
            futures::future::pending::<()>(),
            tokio::time::sleep(limit),
            limit,
        )
        .await;
        let err = result.unwrap_err();
        assert_eq!(err.status, PortalErrorStatus::Timeout);
        assert!(err.message.contains("10 ms"));
    }
}
