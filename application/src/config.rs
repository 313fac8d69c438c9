//! Run-scoped execution parameters

use std::time::Duration;

/// Tunables applied to one review run
#[derive(Debug, Clone)]
pub struct ReviewParams {
    /// Timeout for each individual backend call (analyzer or arbiter).
    /// A timed-out analyzer is a Phase 1 failure, never an empty result.
    pub call_timeout: Duration,
}

impl Default for ReviewParams {
    fn default() -> Self {
        Self {
            call_timeout: Duration::from_secs(120),
        }
    }
}

impl ReviewParams {
    pub fn with_call_timeout(mut self, timeout: Duration) -> Self {
        self.call_timeout = timeout;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_timeout() {
        let params = ReviewParams::default();
        assert_eq!(params.call_timeout, Duration::from_secs(120));
    }

    #[test]
    fn test_with_call_timeout() {
        let params = ReviewParams::default().with_call_timeout(Duration::from_secs(5));
        assert_eq!(params.call_timeout, Duration::from_secs(5));
    }
}
