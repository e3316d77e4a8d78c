//! Bounded retry around joining a Wi-Fi network.

use embedded_hal_async::delay::DelayNs;

use crate::{Error, Result};

/// How hard to try before giving up on the network.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JoinPolicy {
    pub attempts: u32,
    /// Upper bound for a single attempt; enforced by the caller's `attempt` future.
    pub attempt_timeout_ms: u32,
    pub retry_delay_ms: u32,
}

/// Runs `attempt` until it succeeds or `policy.attempts` tries have failed, sleeping
/// `policy.retry_delay_ms` between failures.
///
/// `attempt` receives the 1-based attempt number. On success the number of the winning
/// attempt is returned.
///
/// # Errors
///
/// Returns [`Error::JoinFailed`] once every attempt has failed.
pub async fn join_with_retry<D, E>(
    policy: &JoinPolicy,
    delay: &mut D,
    mut attempt: impl AsyncFnMut(u32) -> Result<(), E>,
) -> Result<u32>
where
    D: DelayNs,
{
    for number in 1..=policy.attempts {
        if attempt(number).await.is_ok() {
            return Ok(number);
        }
        if number < policy.attempts {
            delay.delay_ms(policy.retry_delay_ms).await;
        }
    }
    Err(Error::JoinFailed {
        attempts: policy.attempts,
    })
}
