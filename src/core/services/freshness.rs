//! Location freshness policy
//!
//! A sample is fresh while its age is strictly below the threshold. A sample
//! exactly at the threshold is stale; a missing sample is always stale.

use chrono::{DateTime, TimeDelta, Utc};

/// Default freshness threshold
pub const DEFAULT_FRESHNESS_MINUTES: u32 = 30;

/// Whether a location sample taken at `sample` is still fresh at `now`
#[must_use]
pub fn is_location_fresh(
    sample: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
    threshold_minutes: u32,
) -> bool {
    FreshnessPolicy::new(threshold_minutes).is_fresh(sample, now)
}

/// Freshness threshold bound to a configured value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FreshnessPolicy {
    threshold: TimeDelta,
}

impl FreshnessPolicy {
    /// Create a policy with a threshold in minutes
    #[must_use]
    pub fn new(threshold_minutes: u32) -> Self {
        Self {
            threshold: TimeDelta::minutes(i64::from(threshold_minutes)),
        }
    }

    /// The configured threshold
    #[must_use]
    pub const fn threshold(&self) -> TimeDelta {
        self.threshold
    }

    /// Age of a sample at `now`; negative when the sample is in the future
    #[must_use]
    pub fn age(sample: DateTime<Utc>, now: DateTime<Utc>) -> TimeDelta {
        now.signed_duration_since(sample)
    }

    /// Whether the sample is fresh at `now`
    #[must_use]
    pub fn is_fresh(&self, sample: Option<DateTime<Utc>>, now: DateTime<Utc>) -> bool {
        sample.is_some_and(|ts| Self::age(ts, now) < self.threshold)
    }
}

impl Default for FreshnessPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_FRESHNESS_MINUTES)
    }
}
