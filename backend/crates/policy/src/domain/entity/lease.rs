//! Lease Entity
//!
//! A time-bounded instance of an `allow_http_access` rule: while a lease is
//! active, the referenced lists are exempted from blocking. Leases carry an
//! absolute UTC expiry so the comparison is unambiguous regardless of the
//! clock zone of whoever stored them.
//!
//! Expired leases are inert but not self-deleting: pruning is the
//! persistence layer's job, and evaluation stays correct either way.

use chrono::serde::ts_milliseconds;
use chrono::{DateTime, Duration, Utc};
use kernel::id::DomainListId;
use serde::{Deserialize, Serialize};

use super::rule::Rule;

/// Time-bounded exemption
///
/// On the wire `end_date_utc` is epoch milliseconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lease {
    /// Expiry instant; the lease is active strictly before this
    #[serde(with = "ts_milliseconds")]
    pub end_date_utc: DateTime<Utc>,
    /// The exempting rule; always `AllowHttpAccess`
    pub rule: Rule,
}

impl Lease {
    /// Create a new lease ending at `now + duration`.
    ///
    /// # Panics
    /// A lease wrapping anything but an allow rule, or with a non-positive
    /// duration, is a caller bug, not a data condition.
    pub fn new(rule: Rule, now: DateTime<Utc>, duration: Duration) -> Self {
        assert!(
            rule.is_allow(),
            "a lease must wrap an allow_http_access rule"
        );
        assert!(
            duration > Duration::zero(),
            "a lease duration must be strictly positive"
        );
        Self {
            end_date_utc: now + duration,
            rule,
        }
    }

    /// Active iff the expiry is strictly in the future.
    ///
    /// At `end_date_utc == now` the lease is already over: blocking resumes
    /// at exactly that instant.
    #[inline]
    pub fn is_active(&self, now: DateTime<Utc>) -> bool {
        self.end_date_utc > now
    }

    /// Does this lease exempt the given list?
    pub fn covers(&self, list_id: DomainListId) -> bool {
        self.rule.references(list_id)
    }
}

/// The preset pause durations offered to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeaseDuration {
    ThirtyMinutes,
    OneHour,
    TwoHours,
    SixHours,
    OneDay,
}

impl LeaseDuration {
    /// All presets, shortest first
    pub const PRESETS: [LeaseDuration; 5] = [
        LeaseDuration::ThirtyMinutes,
        LeaseDuration::OneHour,
        LeaseDuration::TwoHours,
        LeaseDuration::SixHours,
        LeaseDuration::OneDay,
    ];

    /// Parse a minute count; only the presets are accepted
    pub fn from_minutes(minutes: i64) -> Option<Self> {
        Self::PRESETS
            .into_iter()
            .find(|preset| preset.minutes() == minutes)
    }

    /// Length of the preset in minutes
    pub const fn minutes(&self) -> i64 {
        match self {
            LeaseDuration::ThirtyMinutes => 30,
            LeaseDuration::OneHour => 60,
            LeaseDuration::TwoHours => 120,
            LeaseDuration::SixHours => 360,
            LeaseDuration::OneDay => 1440,
        }
    }

    pub fn to_duration(self) -> Duration {
        Duration::minutes(self.minutes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kernel::id::Id;

    fn t0() -> DateTime<Utc> {
        DateTime::from_timestamp(1_700_000_000, 0).unwrap()
    }

    mod lifecycle {
        use super::*;

        #[test]
        fn test_active_before_expiry() {
            let lease = Lease::new(Rule::allow([Id::from_u32(1)]), t0(), Duration::minutes(30));
            assert!(lease.is_active(t0()));
            assert!(lease.is_active(t0() + Duration::minutes(29)));
        }

        #[test]
        fn test_inactive_at_exact_expiry() {
            let lease = Lease::new(Rule::allow([Id::from_u32(1)]), t0(), Duration::minutes(30));
            // Strict inequality: the boundary instant is already blocked again.
            assert!(!lease.is_active(t0() + Duration::minutes(30)));
            assert!(!lease.is_active(t0() + Duration::minutes(31)));
        }

        #[test]
        fn test_covers() {
            let lease = Lease::new(Rule::allow([Id::from_u32(4)]), t0(), Duration::hours(1));
            assert!(lease.covers(Id::from_u32(4)));
            assert!(!lease.covers(Id::from_u32(5)));
        }

        #[test]
        #[should_panic(expected = "allow_http_access")]
        fn test_deny_rule_is_a_caller_bug() {
            let _ = Lease::new(Rule::deny([Id::from_u32(1)]), t0(), Duration::minutes(30));
        }

        #[test]
        #[should_panic(expected = "strictly positive")]
        fn test_zero_duration_is_a_caller_bug() {
            let _ = Lease::new(Rule::allow([Id::from_u32(1)]), t0(), Duration::zero());
        }
    }

    mod durations {
        use super::*;

        #[test]
        fn test_presets_parse() {
            assert_eq!(
                LeaseDuration::from_minutes(30),
                Some(LeaseDuration::ThirtyMinutes)
            );
            assert_eq!(LeaseDuration::from_minutes(60), Some(LeaseDuration::OneHour));
            assert_eq!(
                LeaseDuration::from_minutes(1440),
                Some(LeaseDuration::OneDay)
            );
        }

        #[test]
        fn test_non_preset_rejected() {
            assert_eq!(LeaseDuration::from_minutes(45), None);
            assert_eq!(LeaseDuration::from_minutes(0), None);
            assert_eq!(LeaseDuration::from_minutes(-30), None);
        }

        #[test]
        fn test_all_presets_positive() {
            for preset in LeaseDuration::PRESETS {
                assert!(preset.to_duration() > Duration::zero());
            }
        }
    }

    mod serialization {
        use super::*;

        #[test]
        fn test_end_date_as_epoch_millis() {
            let lease = Lease::new(Rule::allow([Id::from_u32(1)]), t0(), Duration::minutes(30));
            let json = serde_json::to_value(&lease).unwrap();
            assert_eq!(json["end_date_utc"], serde_json::json!(1_700_001_800_000i64));
        }

        #[test]
        fn test_roundtrip() {
            let lease = Lease::new(Rule::allow([Id::from_u32(1)]), t0(), Duration::hours(2));
            let json = serde_json::to_string(&lease).unwrap();
            let back: Lease = serde_json::from_str(&json).unwrap();
            assert_eq!(back, lease);
        }
    }
}
