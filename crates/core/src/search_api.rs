//! Search provider trait definition
//!
//! This trait is the seam between the reactive pipeline and the
//! transport layer. Implementations live in the client crate.

use crate::accounts::Account;
use crate::error::Result;
use async_trait::async_trait;

/// Trait for user search providers
///
/// One call issues exactly one search and resolves to the matched
/// accounts in provider order. Implementations must not retry.
#[async_trait]
pub trait UserSearchProvider: Send + Sync {
    /// Search accounts whose name matches `term`
    ///
    /// # Arguments
    /// * `term` - A committed search term (already debounced and length
    ///   filtered by the caller)
    async fn search_users(&self, term: &str) -> Result<Vec<Account>>;
}
