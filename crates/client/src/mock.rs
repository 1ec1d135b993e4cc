//! Mock search provider for testing

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};
use std::time::Duration;
use usersearch_core::accounts::Account;
use usersearch_core::error::{Error, Result};
use usersearch_core::UserSearchProvider;

/// Scripted outcome for one search term
#[derive(Debug, Clone)]
pub enum MockOutcome {
    /// Resolve with these accounts (possibly none)
    Accounts(Vec<Account>),
    /// Fail as a transport-level error
    TransportFailure,
    /// Fail with an empty response body
    EmptyBody,
    /// Fail with a schema decode error
    DecodeFailure,
}

struct ScriptedResponse {
    outcome: MockOutcome,
    delay: Duration,
}

/// Mock search provider that replays scripted outcomes per term
///
/// Terms without a script resolve to an empty account list. Every call
/// is recorded so tests can assert exactly which searches were issued.
pub struct MockSearchProvider {
    responses: Mutex<HashMap<String, ScriptedResponse>>,
    recorded_terms: Mutex<Vec<String>>,
}

impl MockSearchProvider {
    /// Create a new mock provider with no scripted responses
    pub fn new() -> Self {
        Self {
            responses: Mutex::new(HashMap::new()),
            recorded_terms: Mutex::new(Vec::new()),
        }
    }

    /// Script an outcome for `term`, resolved immediately
    pub fn respond_with(&self, term: impl Into<String>, outcome: MockOutcome) {
        self.respond_after(term, outcome, Duration::ZERO);
    }

    /// Script an outcome for `term`, resolved after `delay`
    ///
    /// Useful for reordering completions under paused tokio time.
    pub fn respond_after(&self, term: impl Into<String>, outcome: MockOutcome, delay: Duration) {
        self.responses
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(term.into(), ScriptedResponse { outcome, delay });
    }

    /// Terms passed to `search_users` so far, in call order
    pub fn recorded_terms(&self) -> Vec<String> {
        self.recorded_terms
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Number of searches issued so far
    pub fn call_count(&self) -> usize {
        self.recorded_terms
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

impl Default for MockSearchProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserSearchProvider for MockSearchProvider {
    async fn search_users(&self, term: &str) -> Result<Vec<Account>> {
        self.recorded_terms
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(term.to_string());

        let scripted = {
            let guard = self.responses.lock().unwrap_or_else(PoisonError::into_inner);
            guard.get(term).map(|r| (r.outcome.clone(), r.delay))
        };

        let Some((outcome, delay)) = scripted else {
            return Ok(Vec::new());
        };

        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }

        match outcome {
            MockOutcome::Accounts(accounts) => Ok(accounts),
            MockOutcome::TransportFailure => {
                Err(Error::transport("scripted transport failure".to_string()))
            }
            MockOutcome::EmptyBody => Err(Error::EmptyBody),
            MockOutcome::DecodeFailure => {
                Err(Error::decode("scripted decode failure".to_string()))
            }
        }
    }
}
