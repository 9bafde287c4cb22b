//! # porkbun-api
//!
//! Typed async client for the [Porkbun](https://porkbun.com/) registrar API (v3).
//!
//! Every endpoint is an HTTPS `POST` whose JSON body carries the API key pair;
//! responses are `{"status": "SUCCESS" | "ERROR", ...}` envelopes. This crate hides
//! both and exposes the [`RegistrarApi`] trait, implemented by [`PorkbunClient`].
//!
//! ## Feature Flags
//!
//! - **`rustls`** *(default)*: TLS through rustls.
//! - **`native-tls`**: the platform's TLS implementation.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use porkbun_api::{ClientConfig, Credentials, DnsRecordType, PorkbunClient, RecordSpec, RegistrarApi};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let credentials = Credentials::new("pk1_...", "sk1_...");
//!     let client = PorkbunClient::new(credentials, &ClientConfig::default())?;
//!
//!     println!("API sees us as {}", client.ping().await?.your_ip);
//!
//!     let spec = RecordSpec::new(DnsRecordType::A, "www", "203.0.113.1").with_ttl(Some(600));
//!     let id = client.create_record("example.com", &spec).await?;
//!     println!("created record {id}");
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! All operations return [`Result<T, ApiError>`](ApiError). [`ApiError::kind`] folds the
//! variants into five categories (auth, not-found, rate-limit, transport, api).
//! Nothing is retried: each call is one HTTP request.

mod client;
mod error;
mod http_client;
mod traits;
mod types;
mod utils;

pub use error::{ApiError, ErrorKind, Result};

pub use traits::RegistrarApi;

pub use client::{
    ClientConfig, DEFAULT_BASE_URL, DEFAULT_CONNECT_TIMEOUT_SECS, DEFAULT_REQUEST_TIMEOUT_SECS,
    PorkbunClient, full_name_to_relative, relative_to_full_name,
};

pub use types::{
    CredentialValidationError, Credentials, DnsRecord, DnsRecordType, Domain, DomainPricing,
    DomainRegistration, PingResult, RecordSpec, RegistrationResult, SslBundle,
    UnsupportedRecordType, UrlForward, UrlForwardRequest, UrlForwardType,
};

pub use utils::datetime;
