#![deny(warnings)]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]

//! Search providers for the usersearch pipeline
//!
//! This crate implements the [`UserSearchProvider`] seam: a reqwest-based
//! provider for the public GitHub user search API, and a scripted mock
//! provider for tests.

use std::sync::Arc;
use tracing::info;
use usersearch_core::config::SearchConfig;
use usersearch_core::error::{Error, Result};
use usersearch_core::UserSearchProvider;

mod github;
mod mock;

pub use github::GithubSearchProvider;
pub use mock::{MockOutcome, MockSearchProvider};

/// Create a new search provider based on configuration
///
/// # Arguments
/// * `config` - Search configuration including provider type
pub fn create_search_provider(config: &SearchConfig) -> Result<Arc<dyn UserSearchProvider>> {
    match config.provider.as_str() {
        "github" => {
            info!("Creating GitHub search provider");
            let provider = GithubSearchProvider::new(config)?;
            Ok(Arc::new(provider))
        }
        "mock" => {
            info!("Creating mock search provider");
            Ok(Arc::new(MockSearchProvider::new()))
        }
        other => Err(Error::config(format!(
            "Unknown search provider: '{other}'. Valid providers: github, mock"
        ))),
    }
}
