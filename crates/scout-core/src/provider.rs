use crate::error::DiscoveryError;
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll, Waker};

pub type DiscoveryFuture<'a, T> =
    Pin<Box<dyn Future<Output = Result<T, DiscoveryError>> + Send + 'a>>;

pub type ConnectionFuture<'a> = Pin<Box<dyn Future<Output = bool> + Send + 'a>>;

/// Drives a future to completion on the current thread. Meant for synchronous
/// callers and tests; async callers should `.await` discovery futures instead.
pub fn block_on<F: Future>(future: F) -> F::Output {
    let mut future = std::pin::pin!(future);
    let mut cx = Context::from_waker(Waker::noop());
    loop {
        match future.as_mut().poll(&mut cx) {
            Poll::Ready(value) => return value,
            Poll::Pending => std::thread::yield_now(),
        }
    }
}

/// How an implementation answers a scoped listing for an organization that
/// does not exist.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingOrganizationPolicy {
    /// The upstream API cannot tell "empty" from "absent"; resolve to `Ok(vec![])`.
    Empty,
    /// The upstream API reports absence; resolve to `DiscoveryError::NotFound`.
    NotFound,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn block_on_returns_ready_value() {
        let value = block_on(async { 21 * 2 });
        assert_eq!(value, 42);
    }

    #[test]
    fn block_on_drives_boxed_discovery_future() {
        let future: DiscoveryFuture<'_, Vec<u32>> = Box::pin(async { Ok(vec![1, 2, 3]) });
        assert_eq!(block_on(future).unwrap(), vec![1, 2, 3]);
    }
}
