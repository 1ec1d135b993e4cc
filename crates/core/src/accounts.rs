//! Provider-agnostic account records returned by a user search

use serde::{Deserialize, Serialize};
use url::Url;

/// A single account matched by a search
///
/// Instances are immutable once decoded; a new result list replaces the
/// previous one wholesale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Unique identifier assigned by the search provider
    pub id: u64,

    /// Human-readable account name (the provider's `login`)
    pub display_name: String,

    /// Raw avatar reference as returned by the provider; may be absent
    /// or malformed
    pub avatar_reference: Option<String>,
}

impl Account {
    /// Parsed avatar URL, or `None` when the reference is absent or not
    /// a valid URL
    pub fn avatar_url(&self) -> Option<Url> {
        self.avatar_reference
            .as_deref()
            .and_then(|raw| Url::parse(raw).ok())
    }
}
