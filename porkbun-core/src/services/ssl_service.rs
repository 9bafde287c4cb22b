//! SSL bundle service

use std::path::{Path, PathBuf};
use std::sync::Arc;

use porkbun_api::SslBundle;

use crate::error::{CoreError, CoreResult};
use crate::services::ServiceContext;
use crate::services::domain_service::normalize;

/// Files written by [`SslService::save_bundle`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SslFiles {
    /// `{prefix}.crt`, the certificate chain
    pub certificate: PathBuf,
    /// `{prefix}.key`, owner-only on Unix
    pub private_key: PathBuf,
    /// `{prefix}.ca`, the intermediate certificate
    pub intermediate: PathBuf,
}

impl SslFiles {
    fn for_prefix(prefix: &Path) -> Self {
        let with_ext = |ext: &str| {
            let mut path = prefix.as_os_str().to_owned();
            path.push(".");
            path.push(ext);
            PathBuf::from(path)
        };
        Self {
            certificate: with_ext("crt"),
            private_key: with_ext("key"),
            intermediate: with_ext("ca"),
        }
    }
}

/// SSL bundle service
pub struct SslService {
    ctx: Arc<ServiceContext>,
}

impl SslService {
    #[must_use]
    pub fn new(ctx: Arc<ServiceContext>) -> Self {
        Self { ctx }
    }

    /// Fetch the free certificate bundle the registrar issued for a domain.
    pub async fn retrieve(&self, domain: &str) -> CoreResult<SslBundle> {
        Ok(self.ctx.registrar.retrieve_ssl(&normalize(domain)?).await?)
    }

    /// Write `{prefix}.crt`, `{prefix}.key` and `{prefix}.ca`.
    pub async fn save_bundle(bundle: &SslBundle, prefix: &Path) -> CoreResult<SslFiles> {
        let files = SslFiles::for_prefix(prefix);

        write_file(&files.certificate, &bundle.certificate_chain).await?;
        write_private(&files.private_key, &bundle.private_key).await?;
        write_file(&files.intermediate, &bundle.intermediate_certificate).await?;

        log::info!("SSL bundle written with prefix {}", prefix.display());
        Ok(files)
    }
}

async fn write_file(path: &Path, content: &str) -> CoreResult<()> {
    tokio::fs::write(path, content)
        .await
        .map_err(|e| CoreError::Io(format!("Failed to write {}: {e}", path.display())))
}

async fn write_private(path: &Path, content: &str) -> CoreResult<()> {
    write_file(path, "").await?;
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        tokio::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600))
            .await
            .map_err(|e| CoreError::Io(format!("Failed to restrict {}: {e}", path.display())))?;
    }
    write_file(path, content).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::mock_context;

    #[tokio::test]
    async fn retrieve_and_save() {
        let (ctx, _) = mock_context("example.com").await;
        let bundle = SslService::new(ctx).retrieve("example.com").await.unwrap();

        let dir = tempfile::tempdir().unwrap();
        let files = SslService::save_bundle(&bundle, &dir.path().join("example.com"))
            .await
            .unwrap();

        assert!(files.certificate.ends_with("example.com.crt"));
        assert!(files.private_key.ends_with("example.com.key"));
        assert!(files.intermediate.ends_with("example.com.ca"));
        assert_eq!(
            std::fs::read_to_string(&files.private_key).unwrap(),
            bundle.private_key
        );

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mode = std::fs::metadata(&files.private_key)
                .unwrap()
                .permissions()
                .mode();
            assert_eq!(mode & 0o777, 0o600);
        }
    }

    #[tokio::test]
    async fn unknown_domain_is_not_found() {
        let (ctx, _) = mock_context("example.com").await;
        let err = SslService::new(ctx).retrieve("other.org").await.unwrap_err();
        assert_eq!(err.api_kind(), Some(porkbun_api::ErrorKind::NotFound));
    }
}
