//! Tuning knobs for timing reconstruction.

use chrono::Duration;

/// Configuration for joining historical hop times onto legs.
#[derive(Debug, Clone, Copy)]
pub struct JoinConfig {
    /// Minutes charged for walking between interchange platforms.
    pub transfer_mins: i64,
    /// Trips at or above this many minutes end-to-end are discarded as
    /// data artifacts.
    pub max_trip_mins: i64,
}

impl JoinConfig {
    pub fn transfer_duration(&self) -> Duration {
        Duration::minutes(self.transfer_mins)
    }

    pub fn max_trip_duration(&self) -> Duration {
        Duration::minutes(self.max_trip_mins)
    }
}

impl Default for JoinConfig {
    fn default() -> Self {
        JoinConfig {
            transfer_mins: 1,
            max_trip_mins: 24 * 60,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_transfer_is_one_minute() {
        assert_eq!(JoinConfig::default().transfer_duration(), Duration::minutes(1));
    }

    #[test]
    fn default_bound_is_one_day() {
        assert_eq!(JoinConfig::default().max_trip_duration(), Duration::days(1));
    }
}
