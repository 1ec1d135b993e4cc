//! GitHub user search provider

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, warn};
use usersearch_core::accounts::Account;
use usersearch_core::config::SearchConfig;
use usersearch_core::error::{Error, Result};
use usersearch_core::UserSearchProvider;

const SEARCH_USERS_PATH: &str = "/search/users";

/// Response envelope from the user search endpoint
#[derive(Debug, Deserialize)]
struct UserSearchResponse {
    items: Vec<UserRecord>,
}

/// Individual account record on the wire
#[derive(Debug, Deserialize)]
struct UserRecord {
    id: u64,
    login: String,
    #[serde(default)]
    avatar_url: Option<String>,
}

impl From<UserRecord> for Account {
    fn from(record: UserRecord) -> Self {
        Self {
            id: record.id,
            display_name: record.login,
            avatar_reference: record.avatar_url,
        }
    }
}

/// Search provider backed by the public GitHub search API
pub struct GithubSearchProvider {
    client: Client,
    base_url: String,
}

impl GithubSearchProvider {
    /// Create a new GitHub search provider
    ///
    /// # Arguments
    /// * `config` - Search configuration (base URL, timeout, User-Agent)
    pub fn new(config: &SearchConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| Error::config(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl UserSearchProvider for GithubSearchProvider {
    async fn search_users(&self, term: &str) -> Result<Vec<Account>> {
        let url = format!("{}{SEARCH_USERS_PATH}", self.base_url);
        debug!("Searching users matching {term:?}");

        let response = self
            .client
            .get(&url)
            .query(&[("q", term)])
            .send()
            .await
            .map_err(|e| {
                let error_kind = if e.is_timeout() {
                    "timeout"
                } else if e.is_connect() {
                    "connection"
                } else if e.is_request() {
                    "request build"
                } else {
                    "unknown"
                };
                warn!("Search request for {term:?} failed ({error_kind}): {e}");
                Error::transport(format!("Search request failed ({error_kind}): {e}"))
            })?;

        // No status branch: a non-2xx JSON body simply fails schema decode
        // downstream and is handled there.
        let body = response.bytes().await.map_err(|e| {
            warn!("Failed to read search response body for {term:?}: {e}");
            Error::transport(format!("Failed to read response body: {e}"))
        })?;

        decode_search_body(&body)
    }
}

/// Decode a raw response body into accounts
///
/// An empty body and a body that does not match the expected
/// `{"items": [...]}` shape are distinct failures; the caller treats
/// them differently.
fn decode_search_body(body: &[u8]) -> Result<Vec<Account>> {
    if body.is_empty() {
        return Err(Error::EmptyBody);
    }

    let decoded: UserSearchResponse = serde_json::from_slice(body)
        .map_err(|e| Error::decode(format!("Unexpected search response shape: {e}")))?;

    Ok(decoded.items.into_iter().map(Account::from).collect())
}
