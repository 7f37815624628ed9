//! HTTP liveness probing for discovered subdomains.

use std::sync::LazyLock;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use crate::traits::{HttpProbe, ProbeError};

/// Shared HTTP client with a bounded redirect policy.
static HTTP_CLIENT: LazyLock<Client> = LazyLock::new(|| {
    Client::builder()
        .redirect(reqwest::redirect::Policy::limited(5))
        .build()
        .unwrap_or_default()
});

/// [`HttpProbe`] implementation issuing one `GET http://{host}/` per probe.
pub struct ReqwestProbe;

#[async_trait]
impl HttpProbe for ReqwestProbe {
    async fn probe(&self, host: &str, timeout: Duration) -> Result<u16, ProbeError> {
        let url = format!("http://{host}/");
        let response = HTTP_CLIENT
            .get(&url)
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ProbeError::Timeout
                } else {
                    ProbeError::Unreachable(e.to_string())
                }
            })?;
        Ok(response.status().as_u16())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_shared_client_builds() {
        // Building the lazy client must not panic.
        let _client = &*HTTP_CLIENT;
    }

    #[tokio::test]
    #[ignore]
    async fn test_probe_real() {
        let status = ReqwestProbe
            .probe("example.com", Duration::from_secs(10))
            .await
            .unwrap();
        assert!(status < 600);
    }
}
