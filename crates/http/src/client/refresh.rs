//! Single-flight access-token refresh
//!
//! At most one refresh call is in flight at any time. The first caller to
//! observe a 401 leads the refresh; every caller arriving while it is in
//! flight parks a oneshot sender in a FIFO queue and is released with the
//! shared outcome when the attempt settles. Flag and queue transitions
//! happen under one lock, which preserves the at-most-one-refresh invariant
//! on multi-threaded runtimes.

use super::error::RefreshError;
use super::CampusClient;
use std::collections::VecDeque;
use std::sync::Mutex;
use tokio::sync::oneshot;
use tracing::debug;

type Outcome = Result<String, RefreshError>;

pub(crate) struct RefreshCoordinator {
    state: Mutex<RefreshState>,
}

#[derive(Default)]
struct RefreshState {
    in_flight: bool,
    waiters: VecDeque<oneshot::Sender<Outcome>>,
}

enum Ticket {
    Leader,
    Follower(oneshot::Receiver<Outcome>),
}

impl RefreshCoordinator {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(RefreshState::default()),
        }
    }

    /// Obtain a fresh access token. Exactly one underlying refresh call is
    /// made per refresh window regardless of how many callers arrive; on
    /// failure the leader also tears the session down.
    pub async fn fresh_access_token(&self, client: &CampusClient) -> Outcome {
        let ticket = {
            let mut state = self.lock();
            if state.in_flight {
                let (tx, rx) = oneshot::channel();
                state.waiters.push_back(tx);
                Ticket::Follower(rx)
            } else {
                state.in_flight = true;
                Ticket::Leader
            }
        };

        match ticket {
            Ticket::Follower(rx) => rx.await.unwrap_or_else(|_| {
                Err(RefreshError::Transport("refresh attempt cancelled".into()))
            }),
            Ticket::Leader => {
                let guard = SettleGuard {
                    coordinator: self,
                    settled: false,
                };
                let outcome = client.request_token_refresh().await;
                guard.settle(outcome.clone());

                if let Err(error) = &outcome {
                    client.teardown_session(error).await;
                }
                outcome
            }
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, RefreshState> {
        self.state.lock().expect("refresh state lock poisoned")
    }

    /// Clear the in-flight flag and release every parked waiter with the
    /// outcome, in enqueue order so earlier-deferred callers resume first.
    fn release(&self, outcome: &Outcome) {
        let waiters = {
            let mut state = self.lock();
            state.in_flight = false;
            std::mem::take(&mut state.waiters)
        };
        debug!(
            waiters = waiters.len(),
            ok = outcome.is_ok(),
            "refresh settled"
        );
        for waiter in waiters {
            let _ = waiter.send(outcome.clone());
        }
    }
}

/// Settles the refresh window exactly once, even if the leading future is
/// dropped mid-call; waiters must never be left parked on a stale flag.
struct SettleGuard<'a> {
    coordinator: &'a RefreshCoordinator,
    settled: bool,
}

impl SettleGuard<'_> {
    fn settle(mut self, outcome: Outcome) {
        self.coordinator.release(&outcome);
        self.settled = true;
    }
}

impl Drop for SettleGuard<'_> {
    fn drop(&mut self) {
        if !self.settled {
            self.coordinator.release(&Err(RefreshError::Transport(
                "refresh attempt cancelled".into(),
            )));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn waiters_are_released_in_enqueue_order() {
        let coordinator = RefreshCoordinator::new();
        {
            let mut state = coordinator.lock();
            state.in_flight = true;
        }

        let mut receivers = Vec::new();
        for _ in 0..3 {
            let (tx, rx) = oneshot::channel();
            coordinator.lock().waiters.push_back(tx);
            receivers.push(rx);
        }

        coordinator.release(&Ok("token-2".to_string()));

        assert!(!coordinator.lock().in_flight);
        for rx in receivers {
            assert_eq!(rx.await.unwrap().unwrap(), "token-2");
        }
    }

    #[tokio::test]
    async fn dropped_waiter_does_not_poison_release() {
        let coordinator = RefreshCoordinator::new();
        let (tx, rx) = oneshot::channel();
        drop(rx);
        coordinator.lock().waiters.push_back(tx);

        let (tx, rx) = oneshot::channel();
        coordinator.lock().waiters.push_back(tx);

        coordinator.release(&Err(RefreshError::MissingRefreshToken));
        assert!(matches!(
            rx.await.unwrap(),
            Err(RefreshError::MissingRefreshToken)
        ));
    }
}
