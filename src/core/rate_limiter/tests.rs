use super::*;
use crate::config::{RateLimitRule, RateLimitStrategy};
use std::sync::Arc;
use std::time::Duration;

fn limiter(max_requests: u32, window_secs: u64, strategy: RateLimitStrategy) -> RateLimiter {
    RateLimiter::new(
        &RateLimitRule {
            max_requests,
            window_secs,
        },
        strategy,
        true,
    )
}

#[test]
fn test_fixed_window_admits_up_to_limit() {
    let limiter = limiter(5, 60, RateLimitStrategy::FixedWindow);

    for i in 1..=5 {
        let result = limiter.check_and_record("client-a");
        assert!(result.allowed, "request {} should be admitted", i);
        assert_eq!(result.current_count, i);
    }

    let result = limiter.check_and_record("client-a");
    assert!(!result.allowed);
    assert_eq!(result.remaining, 0);
    assert!(result.retry_after_secs.is_some());
}

#[test]
fn test_fixed_window_keys_are_independent() {
    let limiter = limiter(2, 60, RateLimitStrategy::FixedWindow);

    assert!(limiter.check_and_record("a").allowed);
    assert!(limiter.check_and_record("a").allowed);
    assert!(!limiter.check_and_record("a").allowed);

    assert!(limiter.check_and_record("b").allowed);
    assert_eq!(limiter.tracked_keys(), 2);
}

#[test]
fn test_fixed_window_resets_after_elapse() {
    // One-second window so the test can outwait it
    let limiter = RateLimiter::new(
        &RateLimitRule {
            max_requests: 2,
            window_secs: 1,
        },
        RateLimitStrategy::FixedWindow,
        true,
    );

    assert!(limiter.check_and_record("k").allowed);
    assert!(limiter.check_and_record("k").allowed);
    assert!(!limiter.check_and_record("k").allowed);

    std::thread::sleep(Duration::from_millis(1100));

    let result = limiter.check_and_record("k");
    assert!(result.allowed);
    assert_eq!(result.current_count, 1, "reset should restart the count at 1");
}

#[test]
fn test_sliding_window_rejects_over_limit() {
    let limiter = limiter(3, 60, RateLimitStrategy::SlidingWindow);

    for _ in 0..3 {
        assert!(limiter.check_and_record("client").allowed);
    }
    let result = limiter.check_and_record("client");
    assert!(!result.allowed);
    assert!(result.retry_after_secs.is_some());
}

#[test]
fn test_disabled_limiter_admits_everything() {
    let limiter = RateLimiter::new(
        &RateLimitRule {
            max_requests: 1,
            window_secs: 60,
        },
        RateLimitStrategy::FixedWindow,
        false,
    );

    for _ in 0..100 {
        assert!(limiter.check_and_record("k").allowed);
    }
}

#[test]
fn test_concurrent_admissions_stay_bounded() {
    // Two simultaneous requests at the boundary must not both slip through
    let limiter = Arc::new(limiter(50, 60, RateLimitStrategy::FixedWindow));
    let mut handles = Vec::new();

    for _ in 0..8 {
        let limiter = Arc::clone(&limiter);
        handles.push(std::thread::spawn(move || {
            let mut admitted = 0u32;
            for _ in 0..20 {
                if limiter.check_and_record("shared").allowed {
                    admitted += 1;
                }
            }
            admitted
        }));
    }

    let total: u32 = handles.into_iter().map(|h| h.join().unwrap()).sum();
    assert_eq!(total, 50);
}

#[test]
fn test_edge_scenario_hundred_and_one() {
    // 100 requests per window: the 101st is rejected
    let limiter = limiter(100, 900, RateLimitStrategy::FixedWindow);
    for _ in 0..100 {
        assert!(limiter.check_and_record("edge-client").allowed);
    }
    assert!(!limiter.check_and_record("edge-client").allowed);
}
