use std::future::Future;
use std::time::Duration;

use futures_util::future::{select, Either};
use futures_util::pin_mut;

use crate::error::BookingError;

/// Races `work` against `deadline`. The browser build of reqwest has no
/// timeout of its own, so the client pairs each request with a gloo timer.
pub async fn with_deadline<F, D>(
    work: F,
    deadline: D,
    limit: Duration,
) -> Result<F::Output, BookingError>
where
    F: Future,
    D: Future<Output = ()>,
{
    pin_mut!(work);
    pin_mut!(deadline);
    match select(work, deadline).await {
        Either::Left((output, _)) => Ok(output),
        Either::Right(((), _)) => Err(BookingError::Network(format!(
            "the request timed out after {}s",
            limit.as_secs()
        ))),
    }
}
