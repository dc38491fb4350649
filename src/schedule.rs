//! Block release schedule.
//!
//! Posts are grouped into blocks. A block only becomes visible once it is
//! older than one full period plus the release offset, so a block stays
//! closed for a while after it stops accepting posts.

use chrono::{DateTime, Duration, Utc};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlockSchedule {
    /// How often a new block opens.
    pub frequency: Duration,
    /// Extra delay after a block closes before it is released.
    pub release_offset: Duration,
}

impl Default for BlockSchedule {
    fn default() -> Self {
        Self {
            frequency: Duration::hours(24),
            release_offset: Duration::hours(8),
        }
    }
}

impl BlockSchedule {
    pub fn from_hours(frequency_hours: i64, release_offset_hours: i64) -> Self {
        Self {
            frequency: Duration::hours(frequency_hours),
            release_offset: Duration::hours(release_offset_hours),
        }
    }

    /// Blocks created at or before this instant are visible.
    pub fn release_horizon(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        now - (self.frequency + self.release_offset)
    }

    /// Whether the latest block has aged out and a new one should open.
    pub fn needs_new_block(&self, latest_created_at: DateTime<Utc>, now: DateTime<Utc>) -> bool {
        latest_created_at < now - self.frequency
    }

    /// Timestamp for a catch-up block: the previous block's timestamp
    /// advanced by a whole number of periods, so block boundaries stay
    /// aligned even when no posts arrived for several periods.
    pub fn next_block_time(
        &self,
        latest_created_at: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> DateTime<Utc> {
        let period = self.frequency.num_seconds();
        if period <= 0 {
            // Config load rejects a non-positive frequency; keep the math
            // total anyway.
            return now;
        }
        let steps = (now - latest_created_at).num_seconds() / period;
        latest_created_at + self.frequency * steps as i32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 10, hour, 0, 0).unwrap()
    }

    #[test]
    fn release_horizon_lags_by_period_plus_offset() {
        let schedule = BlockSchedule::default();
        let now = Utc.with_ymd_and_hms(2024, 3, 12, 8, 0, 0).unwrap();
        // 24h + 8h behind now
        assert_eq!(schedule.release_horizon(now), at(0));
    }

    #[test]
    fn fresh_block_does_not_need_replacement() {
        let schedule = BlockSchedule::default();
        let now = at(12);
        assert!(!schedule.needs_new_block(at(0), now));
    }

    #[test]
    fn stale_block_needs_replacement() {
        let schedule = BlockSchedule::default();
        let created = at(0);
        let now = created + Duration::hours(25);
        assert!(schedule.needs_new_block(created, now));
    }

    #[test]
    fn catch_up_advances_in_whole_periods() {
        let schedule = BlockSchedule::default();
        let created = at(0);

        // Two and a half periods later: the new block lands exactly two
        // periods after the old one, not at `now`.
        let now = created + Duration::hours(60);
        assert_eq!(
            schedule.next_block_time(created, now),
            created + Duration::hours(48)
        );
    }

    #[test]
    fn zero_frequency_does_not_panic() {
        let schedule = BlockSchedule::from_hours(0, 8);
        let created = at(0);
        let now = created + Duration::hours(60);
        assert_eq!(schedule.next_block_time(created, now), now);
    }

    #[test]
    fn catch_up_after_one_period_advances_one_period() {
        let schedule = BlockSchedule::from_hours(24, 8);
        let created = at(0);
        let now = created + Duration::hours(25);
        assert_eq!(
            schedule.next_block_time(created, now),
            created + Duration::hours(24)
        );
    }
}
