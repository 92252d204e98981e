//! The consume loop: fetch, parse, apply, commit.

use std::time::Duration;

use nexus_domain::SignalEvent;
use nexus_projection::SignalStore;
use tokio::sync::broadcast;

use crate::log::{EventLog, LogMessage};

/// Delay between projection retries.
const RETRY_DELAY: Duration = Duration::from_secs(1);

/// Sequential consumer applying log events to the signal view.
///
/// Commit discipline: an offset is committed only after the view update
/// succeeds, or when the payload is declared poison (malformed events never
/// become well-formed by retrying). Store failures are retried indefinitely
/// with [`RETRY_DELAY`] spacing; a stalled store stalls the loop rather than
/// dropping events.
pub struct Consumer<L: EventLog, S: SignalStore> {
    log: L,
    store: S,
    shutdown: broadcast::Receiver<()>,
}

impl<L: EventLog, S: SignalStore> Consumer<L, S> {
    /// Creates a consumer over the given log and view.
    pub fn new(log: L, store: S, shutdown: broadcast::Receiver<()>) -> Self {
        Self {
            log,
            store,
            shutdown,
        }
    }

    /// Drains the log until the shutdown signal fires.
    ///
    /// Fetch failures are logged and retried; the log client reconnects
    /// internally. A shutdown observed mid-retry returns without committing,
    /// so the message is redelivered on restart and reconciled by the
    /// idempotent view.
    pub async fn run(mut self) {
        loop {
            let message = tokio::select! {
                _ = self.shutdown.recv() => return,
                fetched = self.log.fetch() => match fetched {
                    Ok(message) => message,
                    Err(err) => {
                        tracing::warn!(error = %err, "error fetching message");
                        continue;
                    }
                },
            };

            if !self.process(message).await {
                return;
            }
        }
    }

    /// Returns false when shutdown was observed before the offset could be
    /// committed.
    async fn process(&mut self, message: LogMessage) -> bool {
        let event = match SignalEvent::parse(&message.payload) {
            Ok(event) => event,
            Err(err) => {
                tracing::warn!(
                    offset = message.offset,
                    error = %err,
                    "skipping malformed message"
                );
                metrics::counter!("consumer_events_skipped").increment(1);
                self.commit(&message).await;
                return true;
            }
        };

        if !self.apply_with_retry(&event).await {
            return false;
        }

        self.commit(&message).await;
        metrics::counter!("consumer_events_applied").increment(1);
        tracing::info!(id = %event.id, action = %event.action, "projected signal");
        true
    }

    /// Retries the projection until success or shutdown. Returns true on
    /// success.
    async fn apply_with_retry(&mut self, event: &SignalEvent) -> bool {
        loop {
            match self.store.apply(event).await {
                Ok(()) => return true,
                Err(err) => {
                    tracing::warn!(error = %err, "projection failed, retrying in 1s");
                    metrics::counter!("consumer_apply_retries").increment(1);
                    if !self.wait(RETRY_DELAY).await {
                        return false;
                    }
                }
            }
        }
    }

    /// Cancellable wait: returns false immediately when shutdown fires.
    async fn wait(&mut self, duration: Duration) -> bool {
        tokio::select! {
            _ = self.shutdown.recv() => false,
            () = tokio::time::sleep(duration) => true,
        }
    }

    async fn commit(&mut self, message: &LogMessage) {
        if let Err(err) = self.log.commit(message).await {
            tracing::warn!(offset = message.offset, error = %err, "offset commit failed");
        }
    }
}
