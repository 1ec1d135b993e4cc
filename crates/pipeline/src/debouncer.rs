//! Query debouncing logic
//!
//! Converts a raw, possibly-noisy stream of text edits into a sparse
//! stream of committed search terms. Values arrive as the full current
//! text, not deltas.

use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::{sleep_until, Instant};
use tracing::{debug, trace};
use usersearch_core::config::PipelineConfig;

/// Debounces raw text input into committed search terms
///
/// Three stages, applied in order:
/// 1. a value equal to the previous observed value is dropped without
///    touching the quiet-period timer
/// 2. a fresh value becomes the pending candidate and restarts the
///    quiet-period wait; only the most recent candidate survives a burst
/// 3. at emission time, candidates with a character count of
///    `min_query_chars` or fewer are dropped
pub struct QueryDebouncer {
    quiet_period: Duration,
    min_query_chars: usize,
    input: mpsc::Receiver<String>,
    output: mpsc::Sender<String>,
}

impl QueryDebouncer {
    /// Create a new debouncer between an input and an output channel
    pub fn new(
        config: &PipelineConfig,
        input: mpsc::Receiver<String>,
        output: mpsc::Sender<String>,
    ) -> Self {
        Self {
            quiet_period: Duration::from_millis(config.debounce_ms),
            min_query_chars: config.min_query_chars,
            input,
            output,
        }
    }

    /// Run until the input channel closes or the output receiver drops
    ///
    /// A candidate still waiting out its quiet period when the input
    /// closes is discarded, matching teardown-cancellation semantics.
    pub async fn run(mut self) {
        let mut last_seen: Option<String> = None;
        let mut pending: Option<String> = None;
        let mut deadline = Instant::now();

        loop {
            tokio::select! {
                maybe_text = self.input.recv() => {
                    let Some(text) = maybe_text else {
                        debug!("Input stream closed, shutting down debouncer");
                        break;
                    };
                    if last_seen.as_deref() == Some(text.as_str()) {
                        trace!("Dropping consecutive duplicate {text:?}");
                        continue;
                    }
                    last_seen = Some(text.clone());
                    pending = Some(text);
                    deadline = Instant::now() + self.quiet_period;
                }
                () = sleep_until(deadline), if pending.is_some() => {
                    let Some(term) = pending.take() else { continue };
                    if term.chars().count() > self.min_query_chars {
                        debug!("Committing search term {term:?}");
                        if self.output.send(term).await.is_err() {
                            debug!("Output channel closed, shutting down debouncer");
                            break;
                        }
                    } else {
                        trace!("Dropping short term {term:?}");
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tokio::sync::mpsc::error::TryRecvError;

    fn spawn_debouncer() -> (mpsc::Sender<String>, mpsc::Receiver<String>) {
        let config = PipelineConfig {
            debounce_ms: 2000,
            min_query_chars: 3,
            channel_capacity: 8,
        };
        let (input_tx, input_rx) = mpsc::channel(8);
        let (terms_tx, terms_rx) = mpsc::channel(8);
        tokio::spawn(QueryDebouncer::new(&config, input_rx, terms_tx).run());
        (input_tx, terms_rx)
    }

    async fn send(input: &mpsc::Sender<String>, text: &str) {
        input.send(text.to_string()).await.expect("debouncer alive");
    }

    #[tokio::test(start_paused = true)]
    async fn test_held_term_commits_exactly_once() {
        let (input, mut terms) = spawn_debouncer();

        send(&input, "abcd").await;
        assert_eq!(terms.recv().await, Some("abcd".to_string()));

        // Nothing further without new input
        tokio::time::sleep(Duration::from_secs(10)).await;
        assert_eq!(terms.try_recv(), Err(TryRecvError::Empty));
    }

    #[tokio::test(start_paused = true)]
    async fn test_burst_commits_only_final_value() {
        let (input, mut terms) = spawn_debouncer();

        for text in ["a", "ab", "abc", "abcd"] {
            send(&input, text).await;
        }

        assert_eq!(terms.recv().await, Some("abcd".to_string()));
        tokio::time::sleep(Duration::from_secs(10)).await;
        assert_eq!(terms.try_recv(), Err(TryRecvError::Empty));
    }

    #[tokio::test(start_paused = true)]
    async fn test_spaced_burst_still_commits_only_final_value() {
        let (input, mut terms) = spawn_debouncer();

        // Each edit lands inside the previous quiet period
        for text in ["octo", "octoc", "octoca", "octocat"] {
            send(&input, text).await;
            tokio::time::sleep(Duration::from_millis(500)).await;
        }

        assert_eq!(terms.recv().await, Some("octocat".to_string()));
        tokio::time::sleep(Duration::from_secs(10)).await;
        assert_eq!(terms.try_recv(), Err(TryRecvError::Empty));
    }

    #[tokio::test(start_paused = true)]
    async fn test_short_term_never_commits() {
        let (input, mut terms) = spawn_debouncer();

        send(&input, "abc").await;
        tokio::time::sleep(Duration::from_secs(10)).await;
        assert_eq!(terms.try_recv(), Err(TryRecvError::Empty));
    }

    #[tokio::test(start_paused = true)]
    async fn test_short_term_replaces_pending_candidate() {
        let (input, mut terms) = spawn_debouncer();

        send(&input, "abcd").await;
        tokio::time::sleep(Duration::from_millis(1000)).await;
        // Deleting a character mid-wait leaves a too-short candidate
        send(&input, "abc").await;

        tokio::time::sleep(Duration::from_secs(10)).await;
        assert_eq!(terms.try_recv(), Err(TryRecvError::Empty));
    }

    #[tokio::test(start_paused = true)]
    async fn test_duplicate_does_not_restart_quiet_period() {
        let (input, mut terms) = spawn_debouncer();

        send(&input, "abcd").await;
        tokio::time::sleep(Duration::from_millis(1500)).await;
        send(&input, "abcd").await;

        // Quiet period runs from the first arrival; 600ms more crosses it
        tokio::time::sleep(Duration::from_millis(600)).await;
        assert_eq!(terms.try_recv(), Ok("abcd".to_string()));
    }

    #[tokio::test(start_paused = true)]
    async fn test_committed_value_is_not_recommitted() {
        let (input, mut terms) = spawn_debouncer();

        send(&input, "abcd").await;
        assert_eq!(terms.recv().await, Some("abcd".to_string()));

        // Same value again after commit is a consecutive duplicate
        send(&input, "abcd").await;
        tokio::time::sleep(Duration::from_secs(10)).await;
        assert_eq!(terms.try_recv(), Err(TryRecvError::Empty));
    }

    #[tokio::test(start_paused = true)]
    async fn test_length_filter_counts_characters_not_bytes() {
        let (input, mut terms) = spawn_debouncer();

        // Three characters, more than three bytes
        send(&input, "héç").await;
        tokio::time::sleep(Duration::from_secs(10)).await;
        assert_eq!(terms.try_recv(), Err(TryRecvError::Empty));

        send(&input, "héçà").await;
        assert_eq!(terms.recv().await, Some("héçà".to_string()));
    }

    #[tokio::test(start_paused = true)]
    async fn test_input_close_discards_pending_candidate() {
        let (input, mut terms) = spawn_debouncer();

        send(&input, "abcd").await;
        drop(input);

        // recv returns None once the debouncer task has shut down
        assert_eq!(terms.recv().await, None);
    }
}
