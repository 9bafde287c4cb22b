//! Shared test helpers

#![allow(dead_code)]

use std::env;
use std::sync::Arc;

use porkbun_api::{
    ClientConfig, Credentials, DnsRecordType, PorkbunClient, RecordSpec, RegistrarApi,
};
use wiremock::MockServer;

/// Skip the test when an environment variable is missing.
#[macro_export]
macro_rules! skip_if_no_credentials {
    ($($var:expr),+) => {
        $(
            if std::env::var($var).is_err() {
                eprintln!("Skipping test: missing environment variable {}", $var);
                return;
            }
        )+
    };
}

/// Assert `Option` is `Some` and unwrap it (fail the test otherwise).
#[macro_export]
macro_rules! require_some {
    ($expr:expr $(,)?) => {{
        let opt = $expr;
        assert!(opt.is_some(), "expected Some(..), got None");
        let Some(val) = opt else {
            return;
        };
        val
    }};
}

/// Assert `Result` is `Ok` and unwrap it (fail the test otherwise).
#[macro_export]
macro_rules! require_ok {
    ($expr:expr $(,)?) => {{
        let res = $expr;
        assert!(res.is_ok(), "expected Ok(..), got {res:?}");
        let Ok(val) = res else {
            return;
        };
        val
    }};
    ($expr:expr, $($msg:tt)+) => {{
        let res = $expr;
        assert!(
            res.is_ok(),
            "{}: {res:?}",
            format_args!($($msg)+)
        );
        let Ok(val) = res else {
            return;
        };
        val
    }};
}

pub const TEST_API_KEY: &str = "pk1_test";
pub const TEST_SECRET_KEY: &str = "sk1_test";

/// Client pointed at a wiremock server.
pub fn mock_client(server: &MockServer) -> PorkbunClient {
    let config = ClientConfig::default().with_base_url(server.uri());
    PorkbunClient::new(Credentials::new(TEST_API_KEY, TEST_SECRET_KEY), &config)
        .unwrap_or_else(|e| panic!("client construction failed: {e}"))
}

/// Unique record name for live tests.
pub fn generate_test_record_name() -> String {
    let uuid = uuid::Uuid::new_v4();
    format!("_test-{}", &uuid.to_string()[..8])
}

/// Live test context: real client plus the domain to exercise.
pub struct TestContext {
    pub client: Arc<dyn RegistrarApi>,
    pub domain: String,
}

impl TestContext {
    /// Build from `PORKBUN_API_KEY`, `PORKBUN_SECRET_KEY` and `TEST_DOMAIN`.
    pub fn live() -> Option<Self> {
        let api_key = env::var("PORKBUN_API_KEY").ok()?;
        let secret = env::var("PORKBUN_SECRET_KEY").ok()?;
        let domain = env::var("TEST_DOMAIN").ok()?;

        let client = PorkbunClient::new(
            Credentials::new(api_key, secret),
            &ClientConfig::default(),
        )
        .ok()?;

        Some(Self {
            client: Arc::new(client),
            domain,
        })
    }

    /// Create a throwaway TXT record and return `(id, relative name)`.
    pub async fn create_test_record(&self) -> Option<(String, String)> {
        let name = generate_test_record_name();
        let spec = RecordSpec::new(DnsRecordType::Txt, name.clone(), "integration-test")
            .with_ttl(Some(600));
        let id = self.client.create_record(&self.domain, &spec).await.ok()?;
        Some((id, name))
    }

    /// Delete every record whose name starts with `_test-`.
    pub async fn cleanup_all_test_records(&self) {
        if let Ok(records) = self.client.list_records(&self.domain).await {
            for record in records {
                if record.name.starts_with("_test-") {
                    let _ = self.client.delete_record(&self.domain, &record.id).await;
                }
            }
        }
    }
}
