#![deny(warnings)]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]

//! Reactive search pipeline
//!
//! This crate turns a raw stream of text edits into observable search
//! state:
//!
//! - [`QueryDebouncer`] filters the raw stream down to committed terms
//!   (consecutive dedup, quiet-period debounce, length filter)
//! - [`SearchSession`] dispatches one provider request per committed
//!   term and publishes every state transition on a watch channel
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use usersearch_core::config::PipelineConfig;
//! use usersearch_core::UserSearchProvider;
//! use usersearch_pipeline::spawn_pipeline;
//!
//! # async fn example(provider: Arc<dyn UserSearchProvider>) {
//! let handle = spawn_pipeline(&PipelineConfig::default(), provider);
//!
//! handle.input.send("octo".to_string()).await.ok();
//!
//! let mut state = handle.state.clone();
//! while state.changed().await.is_ok() {
//!     let snapshot = state.borrow_and_update().clone();
//!     println!("{} matches", snapshot.user_list().len());
//! }
//! # }
//! ```

use std::sync::Arc;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use usersearch_core::config::PipelineConfig;
use usersearch_core::{ObservableState, UserSearchProvider};

mod debouncer;
mod session;

pub use debouncer::QueryDebouncer;
pub use session::SearchSession;

/// Handles to a running search pipeline
pub struct PipelineHandle {
    /// Raw text input; send the full current text after every edit
    pub input: mpsc::Sender<String>,

    /// Observable state snapshots for the presentation layer
    pub state: watch::Receiver<ObservableState>,

    /// Debouncer task; finishes when `input` is dropped
    pub debouncer: JoinHandle<()>,

    /// Session task; finishes once the debouncer has shut down
    pub session: JoinHandle<()>,
}

/// Spawn the debouncer and session tasks wired together
///
/// The pipeline runs until the returned input sender is dropped; a
/// pending (not yet committed) term is discarded at shutdown.
pub fn spawn_pipeline(
    config: &PipelineConfig,
    provider: Arc<dyn UserSearchProvider>,
) -> PipelineHandle {
    let (input_tx, input_rx) = mpsc::channel(config.channel_capacity);
    let (terms_tx, terms_rx) = mpsc::channel(config.channel_capacity);
    let (state_tx, state_rx) = watch::channel(ObservableState::default());

    let debouncer = QueryDebouncer::new(config, input_rx, terms_tx);
    let session = SearchSession::new(provider, terms_rx, state_tx, config.channel_capacity);

    PipelineHandle {
        input: input_tx,
        state: state_rx,
        debouncer: tokio::spawn(debouncer.run()),
        session: tokio::spawn(session.run()),
    }
}
