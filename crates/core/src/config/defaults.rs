//! Default values and functions for configuration

// Default constants
pub(crate) const DEFAULT_PROVIDER: &str = "github";
pub(crate) const DEFAULT_API_BASE_URL: &str = "https://api.github.com";
pub(crate) const DEFAULT_USER_AGENT: &str = concat!("usersearch/", env!("CARGO_PKG_VERSION"));

pub(crate) fn default_provider() -> String {
    DEFAULT_PROVIDER.to_string()
}

pub(crate) fn default_api_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}

pub(crate) fn default_timeout_secs() -> u64 {
    30
}

pub(crate) fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

pub(crate) fn default_debounce_ms() -> u64 {
    2000
}

pub(crate) fn default_min_query_chars() -> usize {
    3
}

pub(crate) fn default_channel_capacity() -> usize {
    32
}
