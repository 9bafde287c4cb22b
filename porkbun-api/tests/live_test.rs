//! Live smoke tests against the real registrar
//!
//! Run with:
//! ```bash
//! PORKBUN_API_KEY=pk1_xxx PORKBUN_SECRET_KEY=sk1_xxx TEST_DOMAIN=example.com \
//!     cargo test -p porkbun-api --test live_test -- --ignored --nocapture --test-threads=1
//! ```

mod common;

use common::TestContext;
use porkbun_api::{DnsRecordType, RecordSpec};

#[tokio::test]
#[ignore]
async fn test_live_ping() {
    skip_if_no_credentials!("PORKBUN_API_KEY", "PORKBUN_SECRET_KEY", "TEST_DOMAIN");

    let ctx = require_some!(TestContext::live());
    let ping = require_ok!(ctx.client.ping().await, "ping failed");
    assert!(!ping.your_ip.is_empty());
}

#[tokio::test]
#[ignore]
async fn test_live_list_domains_contains_test_domain() {
    skip_if_no_credentials!("PORKBUN_API_KEY", "PORKBUN_SECRET_KEY", "TEST_DOMAIN");

    let ctx = require_some!(TestContext::live());
    let domains = require_ok!(ctx.client.list_domains().await, "list_domains failed");
    assert!(
        domains.iter().any(|d| d.domain == ctx.domain),
        "{} not in account",
        ctx.domain
    );
}

#[tokio::test]
#[ignore]
async fn test_live_record_lifecycle() {
    skip_if_no_credentials!("PORKBUN_API_KEY", "PORKBUN_SECRET_KEY", "TEST_DOMAIN");

    let ctx = require_some!(TestContext::live());
    let (id, name) = require_some!(ctx.create_test_record().await);

    let spec = RecordSpec::new(DnsRecordType::Txt, name.clone(), "integration-test-updated")
        .with_ttl(Some(600));
    let edited = ctx.client.edit_record(&ctx.domain, &id, &spec).await;

    let found = ctx
        .client
        .list_records_by_name_type(&ctx.domain, DnsRecordType::Txt, &name)
        .await;

    let deleted = ctx.client.delete_record(&ctx.domain, &id).await;
    ctx.cleanup_all_test_records().await;

    require_ok!(edited, "edit_record failed");
    let found = require_ok!(found, "list_records_by_name_type failed");
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].content, "integration-test-updated");
    require_ok!(deleted, "delete_record failed");
}
