use std::fmt::Debug;

use chrono::{
    DateTime,
    NaiveDate,
    NaiveDateTime,
    TimeDelta,
    Utc
};

const NAIVE_DATE_TIME_FORMAT: &'static str = "%Y-%m-%dT%H:%M:%S%.f";
const NAIVE_DATE_FORMAT: &'static str = "%Y-%m-%d";

/// A point on the simulation time line.
///
/// Interval lookup only needs the total order. The step arithmetic is used by
/// advisory sampling (`maximum_step`) and by interpolating properties.
pub trait SimulationTime: Copy + Ord + Debug {
    type Step: Copy + Debug + PartialEq;

    fn checked_add_step(&self, step: Self::Step) -> Option<Self>;

    /// True when adding `step` moves strictly forward in time.
    fn is_forward_step(step: Self::Step) -> bool;

    /// Signed distance from `self` to `later`, in seconds (ticks for `i64`).
    fn seconds_until(&self, later: Self) -> f64;

    fn parse_time(text: &str) -> Option<Self>;
}

impl SimulationTime for i64 {
    type Step = i64;

    fn checked_add_step(&self, step: i64) -> Option<i64> {
        self.checked_add(step)
    }

    fn is_forward_step(step: i64) -> bool {
        step > 0
    }

    fn seconds_until(&self, later: i64) -> f64 {
        (i128::from(later) - i128::from(*self)) as f64
    }

    fn parse_time(text: &str) -> Option<i64> {
        text.trim().parse::<i64>().ok()
    }
}

impl SimulationTime for NaiveDate {
    type Step = TimeDelta;

    fn checked_add_step(&self, step: TimeDelta) -> Option<NaiveDate> {
        self.checked_add_signed(step)
    }

    fn is_forward_step(step: TimeDelta) -> bool {
        step >= TimeDelta::days(1)
    }

    fn seconds_until(&self, later: NaiveDate) -> f64 {
        later.signed_duration_since(*self).num_seconds() as f64
    }

    fn parse_time(text: &str) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(text.trim(), NAIVE_DATE_FORMAT).ok()
    }
}

impl SimulationTime for NaiveDateTime {
    type Step = TimeDelta;

    fn checked_add_step(&self, step: TimeDelta) -> Option<NaiveDateTime> {
        self.checked_add_signed(step)
    }

    fn is_forward_step(step: TimeDelta) -> bool {
        step > TimeDelta::zero()
    }

    fn seconds_until(&self, later: NaiveDateTime) -> f64 {
        later.signed_duration_since(*self).num_milliseconds() as f64 / 1000.0
    }

    /// Accepts RFC 3339 text (converted to UTC), a zone-less date-time, or a
    /// bare date at midnight.
    fn parse_time(text: &str) -> Option<NaiveDateTime> {
        let text = text.trim();
        if let Ok(date_time) = DateTime::parse_from_rfc3339(text) {
            return Some(date_time.naive_utc());
        }
        if let Ok(date_time) = NaiveDateTime::parse_from_str(text, NAIVE_DATE_TIME_FORMAT) {
            return Some(date_time);
        }
        NaiveDate::parse_from_str(text, NAIVE_DATE_FORMAT)
            .ok()
            .and_then(|date| date.and_hms_opt(0, 0, 0))
    }
}

impl SimulationTime for DateTime<Utc> {
    type Step = TimeDelta;

    fn checked_add_step(&self, step: TimeDelta) -> Option<DateTime<Utc>> {
        self.checked_add_signed(step)
    }

    fn is_forward_step(step: TimeDelta) -> bool {
        step > TimeDelta::zero()
    }

    fn seconds_until(&self, later: DateTime<Utc>) -> f64 {
        later.signed_duration_since(*self).num_milliseconds() as f64 / 1000.0
    }

    fn parse_time(text: &str) -> Option<DateTime<Utc>> {
        NaiveDateTime::parse_time(text).map(|date_time| date_time.and_utc())
    }
}
