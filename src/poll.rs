//! Background polling of the release and star-count endpoints.
//!
//! Both fetchers run once as soon as the driver is spawned and then on
//! every tick of a fixed interval. The default of five minutes keeps two
//! requests per cycle well inside GitHub's unauthenticated budget of 60
//! requests per hour. Every cycle reports its release outcome to the owner
//! of the [`PollHandle`], even an empty one, so a consumer can tell that a
//! refresh has finished. A star count is only sent when it was fetched.

use std::time::Duration;

use log::debug;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::release::{ReleaseDescriptor, ReleaseFetcher};
use crate::stars::StarCountFetcher;

/// Five minutes.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(300_000);

const MIN_POLL_INTERVAL: Duration = Duration::from_millis(1);

/// Data produced by one poll.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedUpdate {
    /// A release refresh finished; `None` when it yielded no descriptor.
    Release(Option<ReleaseDescriptor>),
    Stars(u64),
}

pub struct PollingDriver {
    release: ReleaseFetcher,
    stars: StarCountFetcher,
    interval: Duration,
}

impl PollingDriver {
    pub fn new(release: ReleaseFetcher, stars: StarCountFetcher) -> Self {
        Self {
            release,
            stars,
            interval: DEFAULT_POLL_INTERVAL,
        }
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval.max(MIN_POLL_INTERVAL);
        self
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Runs both fetchers concurrently. The release outcome always comes
    /// first; the star count follows only if it was fetched.
    pub async fn poll_once(&self) -> Vec<FeedUpdate> {
        let (release, stars) = tokio::join!(self.release.refresh(), self.stars.refresh());

        let mut updates = Vec::with_capacity(2);
        updates.push(FeedUpdate::Release(release));
        if let Some(count) = stars {
            updates.push(FeedUpdate::Stars(count));
        }
        updates
    }

    /// Starts polling on the current tokio runtime.
    pub fn spawn(self) -> PollHandle {
        let (update_tx, update_rx) = mpsc::channel(16);
        let (shutdown_tx, mut shutdown_rx) = oneshot::channel::<()>();

        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(self.interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    biased;
                    _ = &mut shutdown_rx => break,
                    _ = ticker.tick() => {
                        debug!("Polling {} for release and stars", self.release.repo());
                        for update in self.poll_once().await {
                            if update_tx.send(update).await.is_err() {
                                debug!("Update receiver dropped, stopping poller");
                                return;
                            }
                        }
                    }
                }
            }
            debug!("Poller shut down");
        });

        PollHandle {
            receiver: update_rx,
            shutdown_tx: Some(shutdown_tx),
            task: Some(task),
        }
    }
}

/// Owner side of a running poller. Dropping it cancels the poller.
pub struct PollHandle {
    receiver: mpsc::Receiver<FeedUpdate>,
    shutdown_tx: Option<oneshot::Sender<()>>,
    task: Option<JoinHandle<()>>,
}

impl PollHandle {
    /// Waits for the next update. Returns `None` once the poller has stopped.
    pub async fn recv(&mut self) -> Option<FeedUpdate> {
        self.receiver.recv().await
    }

    /// Stops the poller and waits for it to finish. An in-flight poll is
    /// completed first.
    pub async fn shutdown(mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
        if let Some(task) = self.task.take() {
            // Free channel capacity so a poller blocked on send can exit
            self.receiver.close();
            let _ = task.await;
        }
    }
}

impl Drop for PollHandle {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}
