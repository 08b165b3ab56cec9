//! Cancellation of in-flight service calls.

use std::future::Future;
use tokio_util::sync::CancellationToken;

use super::ConsoleError;

/// Run `fut` until it completes or `token` is cancelled.
///
/// A view that is torn down cancels its token so results of an aggregate
/// fetch are dropped instead of being applied to stale state. Requests already
/// sent to a backend are not recalled.
pub async fn cancellable<F>(token: &CancellationToken, fut: F) -> Result<F::Output, ConsoleError>
where
    F: Future,
{
    tokio::select! {
        biased;
        () = token.cancelled() => Err(ConsoleError::Cancelled),
        output = fut => Ok(output),
    }
}
