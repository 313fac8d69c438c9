//! Reasoning gateway port
//!
//! Defines the interface for invoking a reasoning backend. The pipeline
//! makes exactly one kind of call: system prompt plus user prompt in, raw
//! text out. Response validation happens in the domain layer, not here.

use async_trait::async_trait;
use council_domain::Model;
use thiserror::Error;

/// Errors that can occur during reasoning gateway operations
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Model not available: {0}")]
    ModelNotAvailable(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Timeout")]
    Timeout,

    #[error("Other error: {0}")]
    Other(String),
}

/// Gateway to a reasoning backend
///
/// Implementations live in the infrastructure layer. They must be safe to
/// share across concurrent calls: Phase 1 fans out one call per analyzer
/// against the same gateway instance.
#[async_trait]
pub trait ReasoningGateway: Send + Sync {
    /// Perform one completion call and return the raw response text
    async fn complete(
        &self,
        model: &Model,
        system: &str,
        prompt: &str,
    ) -> Result<String, GatewayError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gateway_error_display() {
        assert_eq!(GatewayError::Timeout.to_string(), "Timeout");
        assert_eq!(
            GatewayError::ModelNotAvailable("gpt-5.2".to_string()).to_string(),
            "Model not available: gpt-5.2"
        );
    }
}
