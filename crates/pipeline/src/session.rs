//! Search session state machine
//!
//! One task owns the observable state. Committed terms come in on an
//! mpsc channel; each dispatches a single provider request on its own
//! task. Completions are marshaled back over an internal channel so
//! every state mutation happens on the session task, and snapshots go
//! out on a watch channel for the presentation layer.

use std::sync::Arc;
use tokio::sync::{mpsc, watch};
use tracing::{debug, info, warn};
use usersearch_core::accounts::Account;
use usersearch_core::error::{Error, Result};
use usersearch_core::state::{FailureKind, ObservableState, SearchResult};
use usersearch_core::UserSearchProvider;

/// Outcome of one dispatched request, tagged with its sequence number
struct Completion {
    seq: u64,
    outcome: Result<Vec<Account>>,
}

/// Dispatches searches for committed terms and publishes state
///
/// Requests are never cancelled; instead each carries a monotonically
/// increasing sequence number and completions that are no longer the
/// latest issued are discarded.
pub struct SearchSession {
    provider: Arc<dyn UserSearchProvider>,
    terms: mpsc::Receiver<String>,
    state: watch::Sender<ObservableState>,
    completion_capacity: usize,
}

impl SearchSession {
    /// Create a new session
    ///
    /// # Arguments
    /// * `provider` - Transport used for each committed term
    /// * `terms` - Committed terms from the debouncer
    /// * `state` - Watch channel the presentation layer subscribes to
    /// * `completion_capacity` - Buffer size of the internal completion channel
    pub fn new(
        provider: Arc<dyn UserSearchProvider>,
        terms: mpsc::Receiver<String>,
        state: watch::Sender<ObservableState>,
        completion_capacity: usize,
    ) -> Self {
        Self {
            provider,
            terms,
            state,
            completion_capacity,
        }
    }

    /// Run until the committed-term channel closes
    pub async fn run(mut self) {
        let (done_tx, mut done_rx) = mpsc::channel::<Completion>(self.completion_capacity);
        let mut latest_seq: u64 = 0;

        loop {
            tokio::select! {
                maybe_term = self.terms.recv() => {
                    let Some(term) = maybe_term else {
                        debug!("Term stream closed, shutting down session");
                        break;
                    };
                    latest_seq += 1;
                    self.dispatch(term, latest_seq, done_tx.clone());
                }
                Some(completion) = done_rx.recv() => {
                    if completion.seq != latest_seq {
                        debug!(
                            "Discarding stale completion (seq {}, latest {latest_seq})",
                            completion.seq
                        );
                        continue;
                    }
                    self.apply(completion.outcome);
                }
            }
        }
    }

    /// Mark the state loading and issue one request on its own task
    fn dispatch(&self, term: String, seq: u64, done: mpsc::Sender<Completion>) {
        info!("Dispatching search for {term:?}");
        self.state.send_modify(|s| {
            s.current_search_term = term.clone();
            s.is_loading = true;
        });

        let provider = Arc::clone(&self.provider);
        tokio::spawn(async move {
            let outcome = provider.search_users(&term).await;
            // Session may already be gone at teardown
            let _ = done.send(Completion { seq, outcome }).await;
        });
    }

    /// Apply the latest completion to the observable state
    ///
    /// Decode failures are logged and leave the previous result visible;
    /// only the loading flag changes.
    fn apply(&self, outcome: Result<Vec<Account>>) {
        match outcome {
            Ok(items) => {
                let result = if items.is_empty() {
                    info!("Search matched no accounts");
                    SearchResult::Empty
                } else {
                    info!("Search matched {} accounts", items.len());
                    SearchResult::Success(items)
                };
                self.state.send_modify(|s| {
                    s.is_loading = false;
                    s.last_result = Some(result);
                });
            }
            Err(Error::Decode(message)) => {
                warn!("Failed to decode search response: {message}");
                self.state.send_modify(|s| s.is_loading = false);
            }
            Err(err) => {
                warn!("Search failed: {err}");
                let kind = match err {
                    Error::EmptyBody => FailureKind::EmptyBody,
                    _ => FailureKind::Transport,
                };
                self.state.send_modify(|s| {
                    s.is_loading = false;
                    s.last_result = Some(SearchResult::Failure(kind));
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::time::Duration;
    use usersearch_client::{MockOutcome, MockSearchProvider};
    use usersearch_core::state::{GENERIC_FAILURE_MESSAGE, NOT_FOUND_MESSAGE};

    fn octocat() -> Account {
        Account {
            id: 1,
            display_name: "octocat".to_string(),
            avatar_reference: Some("https://x/a.png".to_string()),
        }
    }

    fn spawn_session(
        provider: Arc<MockSearchProvider>,
    ) -> (mpsc::Sender<String>, watch::Receiver<ObservableState>) {
        let (terms_tx, terms_rx) = mpsc::channel(8);
        let (state_tx, state_rx) = watch::channel(ObservableState::default());
        tokio::spawn(SearchSession::new(provider, terms_rx, state_tx, 8).run());
        (terms_tx, state_rx)
    }

    /// Wait until the session publishes a settled (not loading) snapshot
    async fn next_settled(state: &mut watch::Receiver<ObservableState>) -> ObservableState {
        loop {
            state.changed().await.expect("session alive");
            let snapshot = state.borrow_and_update().clone();
            if !snapshot.is_loading {
                return snapshot;
            }
        }
    }

    #[tokio::test]
    async fn test_success_publishes_accounts() {
        let provider = Arc::new(MockSearchProvider::new());
        provider.respond_with("octo", MockOutcome::Accounts(vec![octocat()]));
        let (terms, mut state) = spawn_session(Arc::clone(&provider));

        terms.send("octo".to_string()).await.unwrap();
        let snapshot = next_settled(&mut state).await;

        assert_eq!(snapshot.current_search_term, "octo");
        assert_eq!(snapshot.user_list(), &[octocat()]);
        assert_eq!(snapshot.error_message(), None);
        assert_eq!(provider.recorded_terms(), vec!["octo".to_string()]);
    }

    #[tokio::test]
    async fn test_zero_matches_publishes_not_found() {
        let provider = Arc::new(MockSearchProvider::new());
        provider.respond_with("nobody", MockOutcome::Accounts(Vec::new()));
        let (terms, mut state) = spawn_session(provider);

        terms.send("nobody".to_string()).await.unwrap();
        let snapshot = next_settled(&mut state).await;

        assert!(snapshot.user_list().is_empty());
        assert_eq!(snapshot.error_message(), Some(NOT_FOUND_MESSAGE));
    }

    #[tokio::test]
    async fn test_transport_failure_publishes_generic_message() {
        let provider = Arc::new(MockSearchProvider::new());
        provider.respond_with("down", MockOutcome::TransportFailure);
        let (terms, mut state) = spawn_session(provider);

        terms.send("down".to_string()).await.unwrap();
        let snapshot = next_settled(&mut state).await;

        assert!(snapshot.user_list().is_empty());
        assert_eq!(snapshot.error_message(), Some(GENERIC_FAILURE_MESSAGE));
    }

    #[tokio::test]
    async fn test_empty_body_publishes_generic_message() {
        let provider = Arc::new(MockSearchProvider::new());
        provider.respond_with("hollow", MockOutcome::EmptyBody);
        let (terms, mut state) = spawn_session(provider);

        terms.send("hollow".to_string()).await.unwrap();
        let snapshot = next_settled(&mut state).await;

        assert_eq!(snapshot.last_result, Some(SearchResult::Failure(FailureKind::EmptyBody)));
        assert_eq!(snapshot.error_message(), Some(GENERIC_FAILURE_MESSAGE));
    }

    #[tokio::test]
    async fn test_decode_failure_leaves_previous_result_visible() {
        let provider = Arc::new(MockSearchProvider::new());
        provider.respond_with("octo", MockOutcome::Accounts(vec![octocat()]));
        provider.respond_with("garbled", MockOutcome::DecodeFailure);
        let (terms, mut state) = spawn_session(provider);

        terms.send("octo".to_string()).await.unwrap();
        next_settled(&mut state).await;

        terms.send("garbled".to_string()).await.unwrap();
        let snapshot = next_settled(&mut state).await;

        // Term advanced, but the prior result is still on screen
        assert_eq!(snapshot.current_search_term, "garbled");
        assert_eq!(snapshot.user_list(), &[octocat()]);
        assert_eq!(snapshot.error_message(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stale_completion_is_discarded() {
        let provider = Arc::new(MockSearchProvider::new());
        let slow = Account {
            id: 10,
            display_name: "slowpoke".to_string(),
            avatar_reference: None,
        };
        provider.respond_after(
            "first",
            MockOutcome::Accounts(vec![slow]),
            Duration::from_millis(1000),
        );
        provider.respond_after(
            "second",
            MockOutcome::Accounts(vec![octocat()]),
            Duration::from_millis(10),
        );
        let (terms, mut state) = spawn_session(provider);

        terms.send("first".to_string()).await.unwrap();
        terms.send("second".to_string()).await.unwrap();

        let snapshot = next_settled(&mut state).await;
        assert_eq!(snapshot.user_list(), &[octocat()]);

        // The slow completion for "first" lands afterwards and must not win
        tokio::time::sleep(Duration::from_secs(2)).await;
        let final_snapshot = state.borrow().clone();
        assert_eq!(final_snapshot.user_list(), &[octocat()]);
        assert_eq!(final_snapshot.current_search_term, "second");
    }

    #[tokio::test]
    async fn test_session_survives_every_failure_path() {
        let provider = Arc::new(MockSearchProvider::new());
        provider.respond_with("down", MockOutcome::TransportFailure);
        provider.respond_with("garbled", MockOutcome::DecodeFailure);
        provider.respond_with("octo", MockOutcome::Accounts(vec![octocat()]));
        let (terms, mut state) = spawn_session(provider);

        for term in ["down", "garbled", "octo"] {
            terms.send(term.to_string()).await.unwrap();
            next_settled(&mut state).await;
        }

        let snapshot = state.borrow().clone();
        assert_eq!(snapshot.user_list(), &[octocat()]);
        assert_eq!(snapshot.error_message(), None);
    }
}
