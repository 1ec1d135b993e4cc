//! Core types and traits for the usersearch pipeline
//!
//! This crate provides the foundational abstractions shared by the
//! usersearch workspace:
//!
//! - **Accounts**: the provider-agnostic account record
//! - **State**: search results and the observable state surface
//! - **Traits**: the provider seam between pipeline and transport
//! - **Configuration**: system configuration management
//! - **Error handling**: unified error types
//!

pub mod accounts;
pub mod config;
pub mod error;
pub mod search_api;
pub mod state;

// Re-export main types for convenience
pub use accounts::Account;
pub use config::{Config, PipelineConfig, SearchConfig};
pub use error::{Error, Result};
pub use search_api::UserSearchProvider;
pub use state::{FailureKind, ObservableState, SearchResult};

/// Version of the core library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::accounts::Account;
    pub use crate::config::Config;
    pub use crate::error::{Error, Result};
    pub use crate::state::{ObservableState, SearchResult};
}
