//! Long-polling update loop

use super::dispatcher::Dispatcher;
use super::traits::Presenter;
use crate::catalog::CatalogProvider;
use crate::telegram::{TelegramClient, LONG_POLL_TIMEOUT_SECS};
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

const MAX_BACKOFF: Duration = Duration::from_secs(30);

/// Delay before the next poll after `failures` consecutive errors.
///
/// 1, 2, 4, ... seconds capped at 30; a server-provided `retry_after` wins.
pub fn backoff_delay(failures: u32, retry_after: Option<Duration>) -> Duration {
    if let Some(delay) = retry_after {
        return delay;
    }
    let exponent = failures.saturating_sub(1).min(5);
    Duration::from_secs(1 << exponent).min(MAX_BACKOFF)
}

/// Poll `getUpdates` until cancelled, handing each text message to the
/// dispatcher on its own task
pub async fn poll_updates<C, P>(client: &TelegramClient, dispatcher: Arc<Dispatcher<C, P>>, cancel: CancellationToken)
where
    C: CatalogProvider + 'static,
    P: Presenter + 'static,
{
    let mut offset: Option<i64> = None;
    let mut failures: u32 = 0;
    tracing::info!("Polling for updates");

    loop {
        let result = tokio::select! {
            () = cancel.cancelled() => break,
            result = client.get_updates(offset, LONG_POLL_TIMEOUT_SECS) => result,
        };

        let updates = match result {
            Ok(updates) => {
                failures = 0;
                updates
            }
            Err(e) => {
                failures = failures.saturating_add(1);
                let delay = backoff_delay(failures, e.retry_after);
                tracing::warn!(
                    error = %e,
                    kind = ?e.kind,
                    retryable = e.kind.is_retryable(),
                    failures,
                    delay_secs = delay.as_secs(),
                    "getUpdates failed"
                );
                tokio::select! {
                    () = cancel.cancelled() => break,
                    () = tokio::time::sleep(delay) => continue,
                }
            }
        };

        for update in updates {
            offset = Some(update.update_id + 1);
            let Some((chat, text)) = update.text_message() else {
                tracing::debug!(update_id = update.update_id, "Ignoring non-text update");
                continue;
            };

            let dispatcher = Arc::clone(&dispatcher);
            let text = text.to_string();
            tokio::spawn(async move {
                dispatcher.handle_text(chat, &text).await;
            });
        }
    }

    tracing::info!("Update polling stopped");
}
