//! porkbun core library
//!
//! Business logic shared by the `porkbun` CLI and the MCP server:
//! - configuration and credential storage
//! - the bulk record normalizer (JSON/CSV <-> typed operations)
//! - DNS, domain, URL forwarding, SSL and bulk services
//!
//! Services talk to the registrar through [`porkbun_api::RegistrarApi`] held in a
//! [`ServiceContext`], so tests can swap in an in-memory registrar.

pub mod bulk;
pub mod config;
pub mod error;
pub mod services;
pub mod traits;
pub mod types;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

// Re-export common types
pub use config::{AppConfig, ConfigOverrides, FileCredentialStore};
pub use error::{CoreError, CoreResult};
pub use services::ServiceContext;
pub use traits::CredentialStore;
