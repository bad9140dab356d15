use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use thiserror::Error;
use tracing::info;

use crate::models::BookingDraft;

/// Default artificial latency of [`SimulatedSubmitter`].
pub const DEFAULT_SUBMIT_DELAY: Duration = Duration::from_secs(2);

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SubmissionError {
    #[error("submission failed: {0}")]
    Failed(String),
}

/// Sends a completed draft to wherever quote requests are processed.
///
/// On success the implementation returns a unique booking reference.
#[async_trait]
pub trait BookingSubmitter: Send + Sync {
    async fn submit(&self, draft: &BookingDraft) -> Result<String, SubmissionError>;
}

/// Stand-in submitter: waits a fixed delay, then issues a reference derived
/// from the current time.
#[derive(Debug, Clone)]
pub struct SimulatedSubmitter {
    delay: Duration,
}

impl SimulatedSubmitter {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

impl Default for SimulatedSubmitter {
    fn default() -> Self {
        Self::new(DEFAULT_SUBMIT_DELAY)
    }
}

/// `EC` followed by the last eight digits of the epoch-millisecond timestamp.
pub fn booking_reference(epoch_millis: i64) -> String {
    let digits = epoch_millis.unsigned_abs().to_string();
    let tail = &digits[digits.len().saturating_sub(8)..];
    format!("EC{tail}")
}

#[async_trait]
impl BookingSubmitter for SimulatedSubmitter {
    async fn submit(&self, draft: &BookingDraft) -> Result<String, SubmissionError> {
        tokio::time::sleep(self.delay).await;

        let reference = booking_reference(Utc::now().timestamp_millis());
        info!(
            %reference,
            event_type = ?draft.event_type,
            vendor_id = ?draft.vendor_id,
            "quote request submitted"
        );
        Ok(reference)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn reference_keeps_last_eight_digits() {
        assert_eq!(booking_reference(1736929292929), "EC29292929");
    }

    #[test]
    fn short_timestamp_is_kept_whole() {
        assert_eq!(booking_reference(1234), "EC1234");
    }

    #[tokio::test]
    async fn simulated_submit_returns_reference() {
        let submitter = SimulatedSubmitter::new(Duration::ZERO);

        let reference = submitter.submit(&BookingDraft::default()).await.unwrap();

        assert!(reference.starts_with("EC"));
        assert_eq!(reference.len(), 10);
        assert!(reference[2..].chars().all(|c| c.is_ascii_digit()));
    }
}
