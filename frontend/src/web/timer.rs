//! 定时器封装模块
//!
//! 浏览器的 fetch 没有超时参数，这里用 `gloo-timers` 和请求 future 赛跑。

use futures::future::{Either, select};
use gloo_timers::future::TimeoutFuture;
use std::future::Future;
use std::pin::pin;
use std::time::Duration;

/// 在 `limit` 内等待 `fut` 完成，超时返回 `None`
///
/// 超时后 `fut` 被丢弃，浏览器端的请求本身不会被中止，响应到达后直接忽略。
pub async fn with_timeout<F: Future>(fut: F, limit: Duration) -> Option<F::Output> {
    let millis = u32::try_from(limit.as_millis()).unwrap_or(u32::MAX);
    let fut = pin!(fut);
    let timer = pin!(TimeoutFuture::new(millis));

    match select(fut, timer).await {
        Either::Left((output, _)) => Some(output),
        Either::Right(_) => None,
    }
}
