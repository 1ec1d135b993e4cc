//! Search results and the observable state surface
//!
//! `ObservableState` is the entire contract the presentation layer
//! reads: the current term, the matched accounts, and an optional error
//! message. Snapshots are published over a watch channel by the session
//! task; nothing else mutates them.

use crate::accounts::Account;

/// Message shown for transport-level failures and missing bodies
pub const GENERIC_FAILURE_MESSAGE: &str = "Something went wrong";

/// Message shown when a well-formed response matched zero accounts
pub const NOT_FOUND_MESSAGE: &str = "User not found";

/// Why a search failed in a user-visible way
///
/// Decode failures are deliberately absent: a malformed payload is
/// logged and leaves the previous result in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Connection error, timeout, or other transport-layer problem
    Transport,
    /// The response carried no payload at all
    EmptyBody,
}

/// Outcome of one completed search
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchResult {
    /// One or more accounts matched, in provider order
    Success(Vec<Account>),
    /// A well-formed response with zero matches
    Empty,
    /// The request failed before a result could be decoded
    Failure(FailureKind),
}

/// Externally visible snapshot of the search screen
#[derive(Debug, Clone, Default)]
pub struct ObservableState {
    /// The most recent committed search term
    pub current_search_term: String,

    /// Outcome of the last completed (non-swallowed) search, if any
    pub last_result: Option<SearchResult>,

    /// Whether a request for the current term is still in flight
    pub is_loading: bool,
}

impl ObservableState {
    /// Accounts to render, empty unless the last search succeeded with
    /// at least one match
    pub fn user_list(&self) -> &[Account] {
        match &self.last_result {
            Some(SearchResult::Success(items)) => items,
            _ => &[],
        }
    }

    /// User-facing error message, if the last search warrants one
    pub fn error_message(&self) -> Option<&'static str> {
        match &self.last_result {
            Some(SearchResult::Empty) => Some(NOT_FOUND_MESSAGE),
            Some(SearchResult::Failure(_)) => Some(GENERIC_FAILURE_MESSAGE),
            Some(SearchResult::Success(_)) | None => None,
        }
    }
}
