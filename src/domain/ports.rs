use crate::domain::model::{EncodedRequest, RawResponse};
use crate::utils::error::Result;
use async_trait::async_trait;

/// One POST-shaped call to the translation service. Timeouts, TLS and
/// cancellation belong to the implementation; the core only sees the
/// buffered response.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn post(&self, url: &str, request: EncodedRequest) -> Result<RawResponse>;
}
