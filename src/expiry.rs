use crate::cert::CertInfo;
use crate::errors::*;
use time::OffsetDateTime;

pub const DEFAULT_WARN_DAYS: i64 = 30;
pub const DEFAULT_CRIT_DAYS: i64 = 15;

const HOURS_PER_DAY: i64 = 24;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExpiryPolicy {
    warn_days: i64,
    crit_days: i64,
}

impl ExpiryPolicy {
    pub fn new(warn_days: i64, crit_days: i64) -> Result<ExpiryPolicy, ConfigError> {
        if warn_days <= crit_days {
            return Err(ConfigError::ThresholdOrder {
                warn: warn_days,
                crit: crit_days,
            });
        }
        Ok(ExpiryPolicy {
            warn_days,
            crit_days,
        })
    }

    pub fn warn_days(&self) -> i64 {
        self.warn_days
    }

    pub fn crit_days(&self) -> i64 {
        self.crit_days
    }

    pub fn classify(&self, days_remaining: i64) -> Level {
        if days_remaining <= self.crit_days {
            Level::Critical
        } else if days_remaining <= self.warn_days {
            Level::Warning
        } else {
            Level::Ok
        }
    }
}

impl Default for ExpiryPolicy {
    fn default() -> Self {
        ExpiryPolicy {
            warn_days: DEFAULT_WARN_DAYS,
            crit_days: DEFAULT_CRIT_DAYS,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Ok,
    Warning,
    Critical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Evaluation {
    pub days_remaining: i64,
    pub level: Level,
}

/// Whole days until `not_after`, truncated toward zero in both directions.
///
/// A certificate that expires in 23 hours has 0 days left, and so does one
/// that expired 23 hours ago.
pub fn days_remaining(not_after: OffsetDateTime, now: OffsetDateTime) -> i64 {
    let hours = (not_after - now).whole_hours();
    hours / HOURS_PER_DAY
}

pub fn evaluate(cert: &CertInfo, policy: &ExpiryPolicy, now: OffsetDateTime) -> Evaluation {
    let days_remaining = days_remaining(cert.not_after, now);
    let level = policy.classify(days_remaining);
    info!(
        "Certificate expires in {} days ({:?}, warn={}, crit={})",
        days_remaining,
        level,
        policy.warn_days(),
        policy.crit_days()
    );
    Evaluation {
        days_remaining,
        level,
    }
}
