//! Delay between attempts of a fetch leg.

use std::time::Duration;
use rand::Rng;

use crate::resilience::retries::RetryPolicy;

/// Delay to wait before retry number `retry` (1 for the first retry).
///
/// Immediate when the policy has no base delay; otherwise doubles per
/// retry up to `max_delay_ms`, plus up to 10% jitter.
pub fn retry_delay(policy: &RetryPolicy, retry: u32) -> Duration {
    if retry == 0 || policy.base_delay_ms == 0 {
        return Duration::ZERO;
    }
    let ceiling = doubled(policy.base_delay_ms, retry - 1).min(policy.max_delay_ms);
    Duration::from_millis(ceiling.saturating_add(jitter(ceiling)))
}

fn doubled(base_ms: u64, times: u32) -> u64 {
    base_ms.saturating_mul(2u64.saturating_pow(times))
}

fn jitter(delay_ms: u64) -> u64 {
    match delay_ms / 10 {
        0 => 0,
        spread => rand::thread_rng().gen_range(0..spread),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy(base_delay_ms: u64, max_delay_ms: u64) -> RetryPolicy {
        RetryPolicy { retries: 5, base_delay_ms, max_delay_ms }
    }

    #[test]
    fn test_single_retry_policy_is_immediate() {
        assert_eq!(retry_delay(&RetryPolicy::once(), 1), Duration::ZERO);
        assert_eq!(retry_delay(&policy(100, 2000), 0), Duration::ZERO);
    }

    #[test]
    fn test_delay_doubles_then_caps() {
        let p = policy(100, 1000);
        assert!((100..110).contains(&retry_delay(&p, 1).as_millis()));
        assert!((200..220).contains(&retry_delay(&p, 2).as_millis()));
        assert!((1000..1100).contains(&retry_delay(&p, 10).as_millis()));
    }

    #[test]
    fn test_huge_retry_number_saturates() {
        let p = policy(u64::MAX / 2, u64::MAX);
        assert!(retry_delay(&p, 64) >= Duration::from_millis(u64::MAX / 2));
    }
}
