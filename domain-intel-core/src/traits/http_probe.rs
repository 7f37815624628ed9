//! HTTP liveness probing capability abstraction.

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

/// Outcome of a failed HTTP probe.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProbeError {
    /// No response within the timeout.
    #[error("probe timed out")]
    Timeout,

    /// Connection refused, DNS failure, TLS failure, and the like.
    #[error("host unreachable: {0}")]
    Unreachable(String),
}

/// HTTP liveness probe for discovered subdomains.
#[async_trait]
pub trait HttpProbe: Send + Sync {
    /// Request `http://{host}/` and return the response status code.
    async fn probe(&self, host: &str, timeout: Duration) -> Result<u16, ProbeError>;
}
