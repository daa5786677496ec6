use crate::constants::plan_limits;
use crate::models::Customer;
use chrono::{NaiveDate, Utc};
use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

/// Daily request quota for a plan. `None` means unbounded. Unknown plans
/// get the free tier.
pub fn daily_limit(plan: &str) -> Option<u32> {
    match plan {
        "free" => Some(plan_limits::FREE_PER_DAY),
        "basic" => Some(plan_limits::BASIC_PER_DAY),
        "pro" => Some(plan_limits::PRO_PER_DAY),
        "unlimited" => None,
        _ => Some(plan_limits::FREE_PER_DAY),
    }
}

#[derive(Debug)]
struct Window {
    day: NaiveDate,
    used: u32,
}

/// Fixed-window (UTC day) request counter keyed by credential identity.
///
/// When the customer record carries a live `remaining` quota from the
/// credential backend, that count decides alone and no local counting
/// happens; the backend is the bookkeeper. Otherwise the plan table is
/// enforced against this limiter's own per-identity daily counter.
#[derive(Debug, Default)]
pub struct RateLimiter {
    windows: RwLock<HashMap<String, Window>>,
}

impl RateLimiter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decides whether the customer may proceed, counting this request
    /// against their window if the plan table applies. An absent customer
    /// is always denied.
    pub async fn check(&self, identity: &str, customer: Option<&Customer>) -> bool {
        self.check_on_day(identity, customer, Utc::now().date_naive())
            .await
    }

    async fn check_on_day(
        &self,
        identity: &str,
        customer: Option<&Customer>,
        today: NaiveDate,
    ) -> bool {
        let Some(customer) = customer else {
            warn!("Rate limit check without a resolved customer: denied");
            return false;
        };

        if let Some(remaining) = customer.remaining {
            let allowed = remaining > 0;
            debug!(
                "Backend-tracked quota for {}: {} remaining, allowed={}",
                customer.name, remaining, allowed
            );
            return allowed;
        }

        let Some(limit) = daily_limit(&customer.plan) else {
            debug!("Plan {} is unbounded; allowed", customer.plan);
            return true;
        };

        let mut windows = self.windows.write().await;
        let window = windows.entry(identity.to_string()).or_insert(Window {
            day: today,
            used: 0,
        });

        if window.day != today {
            debug!("New day for {}: resetting window", identity);
            window.day = today;
            window.used = 0;
        }

        if window.used < limit {
            window.used += 1;
            debug!(
                "Request {}/{} today for {} on {} plan",
                window.used, limit, customer.name, customer.plan
            );
            true
        } else {
            info!(
                "Daily limit reached for {} on {} plan ({}/day)",
                customer.name, customer.plan, limit
            );
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing_utils::make_customer;

    #[test]
    fn plan_table_matches_tiers() {
        assert_eq!(daily_limit("free"), Some(100));
        assert_eq!(daily_limit("basic"), Some(1000));
        assert_eq!(daily_limit("pro"), Some(10000));
        assert_eq!(daily_limit("unlimited"), None);
        // Unknown plans fall back to the free tier
        assert_eq!(daily_limit("enterprise"), Some(100));
    }

    #[tokio::test]
    async fn absent_customer_is_denied() {
        let limiter = RateLimiter::new();
        assert!(!limiter.check("key-1", None).await);
    }

    #[tokio::test]
    async fn backend_remaining_decides_when_present() {
        let limiter = RateLimiter::new();
        let mut customer = make_customer("Acme", "free");

        customer.remaining = Some(1);
        assert!(limiter.check("key-1", Some(&customer)).await);

        customer.remaining = Some(0);
        assert!(!limiter.check("key-1", Some(&customer)).await);

        customer.remaining = Some(-3);
        assert!(!limiter.check("key-1", Some(&customer)).await);
    }

    #[tokio::test]
    async fn unlimited_plan_is_never_counted() {
        let limiter = RateLimiter::new();
        let customer = make_customer("Developer", "unlimited");
        for _ in 0..500 {
            assert!(limiter.check("dev", Some(&customer)).await);
        }
    }

    #[tokio::test]
    async fn free_plan_exhausts_after_daily_quota() {
        let limiter = RateLimiter::new();
        let customer = make_customer("Public", "free");

        for _ in 0..100 {
            assert!(limiter.check("key-1", Some(&customer)).await);
        }
        assert!(!limiter.check("key-1", Some(&customer)).await);

        // A different identity has its own window
        assert!(limiter.check("key-2", Some(&customer)).await);
    }

    #[tokio::test]
    async fn window_resets_on_a_new_day() {
        let limiter = RateLimiter::new();
        let customer = make_customer("Public", "free");
        let monday = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let tuesday = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();

        for _ in 0..100 {
            assert!(limiter.check_on_day("key-1", Some(&customer), monday).await);
        }
        assert!(!limiter.check_on_day("key-1", Some(&customer), monday).await);
        assert!(limiter.check_on_day("key-1", Some(&customer), tuesday).await);
    }
}
