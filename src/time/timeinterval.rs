use std::fmt;

use thiserror::Error;

use super::simulationtime::SimulationTime;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TimeIntervalParseError {
    #[error("interval '{0}' is not of the form 'start/stop'")]
    MissingSeparator(String),
    #[error("unable to parse time '{0}'")]
    InvalidTime(String)
}

/// A span of simulation time carrying an optional payload.
///
/// Each bound is either included or excluded. An interval whose stop precedes
/// its start, or a single instant with an excluded bound, is empty and
/// contains no time at all.
#[derive(Clone, Debug, PartialEq)]
pub struct TimeInterval<T, D> {
    start: T,
    stop: T,
    is_start_included: bool,
    is_stop_included: bool,
    data: Option<D>
}

fn is_empty_span<T: SimulationTime>(start: T,
                                    stop: T,
                                    is_start_included: bool,
                                    is_stop_included: bool) -> bool {
    stop < start || (stop == start && !(is_start_included && is_stop_included))
}

impl<T: SimulationTime, D> TimeInterval<T, D> {
    pub fn new(start: T,
               stop: T,
               is_start_included: bool,
               is_stop_included: bool,
               data: Option<D>) -> TimeInterval<T, D> {
        TimeInterval { start, stop, is_start_included, is_stop_included, data }
    }

    pub fn closed(start: T, stop: T, data: Option<D>) -> TimeInterval<T, D> {
        TimeInterval::new(start, stop, true, true, data)
    }

    /// Parses `"start/stop"` into a closed interval.
    pub fn from_iso8601(text: &str, data: Option<D>) -> Result<TimeInterval<T, D>, TimeIntervalParseError> {
        let (start_text, stop_text) = text
            .split_once('/')
            .ok_or_else(|| TimeIntervalParseError::MissingSeparator(text.to_owned()))?;
        let start = T::parse_time(start_text)
            .ok_or_else(|| TimeIntervalParseError::InvalidTime(start_text.to_owned()))?;
        let stop = T::parse_time(stop_text)
            .ok_or_else(|| TimeIntervalParseError::InvalidTime(stop_text.to_owned()))?;
        Ok(TimeInterval::closed(start, stop, data))
    }

    pub fn start(&self) -> T {
        self.start
    }

    pub fn stop(&self) -> T {
        self.stop
    }

    pub fn is_start_included(&self) -> bool {
        self.is_start_included
    }

    pub fn is_stop_included(&self) -> bool {
        self.is_stop_included
    }

    pub fn data(&self) -> Option<&D> {
        self.data.as_ref()
    }

    pub fn data_mut(&mut self) -> Option<&mut D> {
        self.data.as_mut()
    }

    pub fn take_data(&mut self) -> Option<D> {
        self.data.take()
    }

    pub fn into_data(self) -> Option<D> {
        self.data
    }

    /// Same bounds, different payload.
    pub fn with_data<E>(&self, data: Option<E>) -> TimeInterval<T, E> {
        TimeInterval::new(self.start, self.stop, self.is_start_included, self.is_stop_included, data)
    }

    pub fn is_empty(&self) -> bool {
        is_empty_span(self.start, self.stop, self.is_start_included, self.is_stop_included)
    }

    pub fn contains(&self, time: T) -> bool {
        if self.is_empty() {
            return false;
        }
        let after_start = if self.is_start_included { time >= self.start } else { time > self.start };
        let before_stop = if self.is_stop_included { time <= self.stop } else { time < self.stop };
        after_start && before_stop
    }

    /// True when the two intervals share at least one instant.
    pub fn overlaps<E>(&self, other: &TimeInterval<T, E>) -> bool {
        let (start, is_start_included) = if self.start > other.start {
            (self.start, self.is_start_included)
        } else if self.start < other.start {
            (other.start, other.is_start_included)
        } else {
            (self.start, self.is_start_included && other.is_start_included)
        };
        let (stop, is_stop_included) = if self.stop < other.stop {
            (self.stop, self.is_stop_included)
        } else if self.stop > other.stop {
            (other.stop, other.is_stop_included)
        } else {
            (self.stop, self.is_stop_included && other.is_stop_included)
        };
        !is_empty_span(start, stop, is_start_included, is_stop_included)
    }

    /// True when the interval shares at least one instant with the closed span `[start, stop]`.
    pub fn intersects_range(&self, start: T, stop: T) -> bool {
        self.overlaps(&TimeInterval::<T, ()>::closed(start, stop, None))
    }

    /// True when `next` begins exactly where `self` ends, leaving no gap and no overlap.
    pub fn is_followed_by<E>(&self, next: &TimeInterval<T, E>) -> bool {
        self.stop == next.start && (self.is_stop_included != next.is_start_included)
    }

    /// Sort key: start time, included starts before excluded ones.
    pub(crate) fn start_key(&self) -> (T, bool) {
        (self.start, !self.is_start_included)
    }

    /// Smallest interval covering both `self` and `other`; keeps `self`'s payload.
    pub(crate) fn union_with<E>(self, other: &TimeInterval<T, E>) -> TimeInterval<T, D> {
        let (start, is_start_included) = if self.start < other.start {
            (self.start, self.is_start_included)
        } else if self.start > other.start {
            (other.start, other.is_start_included)
        } else {
            (self.start, self.is_start_included || other.is_start_included)
        };
        let (stop, is_stop_included) = if self.stop > other.stop {
            (self.stop, self.is_stop_included)
        } else if self.stop < other.stop {
            (other.stop, other.is_stop_included)
        } else {
            (self.stop, self.is_stop_included || other.is_stop_included)
        };
        TimeInterval::new(start, stop, is_start_included, is_stop_included, self.data)
    }
}

impl<T: SimulationTime, D: Clone> TimeInterval<T, D> {
    /// Removes the instants of `cut` from `self`, returning what is left on
    /// each side. Both pieces carry a copy of the payload.
    pub(crate) fn split_around<E>(self, cut: &TimeInterval<T, E>) -> (Option<TimeInterval<T, D>>, Option<TimeInterval<T, D>>) {
        let before = TimeInterval::new(self.start,
                                       cut.start.min(self.stop),
                                       self.is_start_included,
                                       if cut.start < self.stop { !cut.is_start_included } else { self.is_stop_included && !cut.is_start_included },
                                       self.data.clone());
        let after = TimeInterval::new(cut.stop.max(self.start),
                                      self.stop,
                                      if cut.stop > self.start { !cut.is_stop_included } else { self.is_start_included && !cut.is_stop_included },
                                      self.is_stop_included,
                                      self.data);
        (
            (!before.is_empty()).then_some(before),
            (!after.is_empty()).then_some(after)
        )
    }
}

impl<T: SimulationTime, D> fmt::Display for TimeInterval<T, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f,
               "{}{:?}, {:?}{}",
               if self.is_start_included { '[' } else { '(' },
               self.start,
               self.stop,
               if self.is_stop_included { ']' } else { ')' })
    }
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, NaiveDateTime};

    use super::*;

    fn half_open(start: i64, stop: i64) -> TimeInterval<i64, ()> {
        TimeInterval::new(start, stop, true, false, None)
    }

    #[test]
    fn test_contains_respects_bounds() {
        let interval = half_open(0, 10);
        assert!(interval.contains(0));
        assert!(interval.contains(9));
        assert!(!interval.contains(10));
        assert!(!interval.contains(-1));

        let open: TimeInterval<i64, ()> = TimeInterval::new(0, 10, false, true, None);
        assert!(!open.contains(0));
        assert!(open.contains(10));
    }

    #[test]
    fn test_empty_intervals() {
        assert!(TimeInterval::<i64, ()>::closed(5, 4, None).is_empty());
        assert!(TimeInterval::<i64, ()>::new(5, 5, true, false, None).is_empty());
        assert!(TimeInterval::<i64, ()>::new(5, 5, false, true, None).is_empty());
        assert!(!TimeInterval::<i64, ()>::closed(5, 5, None).is_empty());
        assert!(!TimeInterval::<i64, ()>::closed(5, 4, None).contains(5));
    }

    #[test]
    fn test_overlaps_at_shared_bound() {
        assert!(!half_open(0, 10).overlaps(&half_open(10, 20)));
        assert!(TimeInterval::<i64, ()>::closed(0, 10, None).overlaps(&half_open(10, 20)));
        assert!(half_open(0, 10).overlaps(&half_open(5, 6)));
        assert!(half_open(0, 10).intersects_range(9, 30));
        assert!(!half_open(0, 10).intersects_range(10, 30));
        assert!(half_open(0, 10).is_followed_by(&half_open(10, 20)));
        assert!(!TimeInterval::<i64, ()>::closed(0, 10, None).is_followed_by(&half_open(10, 20)));
    }

    #[test]
    fn test_split_around_middle() {
        let interval: TimeInterval<i64, &str> = TimeInterval::closed(0, 10, Some("a"));
        let (before, after) = interval.split_around(&half_open(3, 5));
        assert_eq!(before, Some(TimeInterval::new(0, 3, true, false, Some("a"))));
        assert_eq!(after, Some(TimeInterval::new(5, 10, true, true, Some("a"))));
    }

    #[test]
    fn test_split_around_covering_cut() {
        let interval: TimeInterval<i64, &str> = TimeInterval::closed(3, 5, Some("a"));
        let (before, after) = interval.split_around(&half_open(0, 10));
        assert_eq!(before, None);
        assert_eq!(after, None);
    }

    #[test]
    fn test_union_with() {
        let union = half_open(0, 5).union_with(&TimeInterval::<i64, ()>::closed(5, 8, None));
        assert_eq!(union, TimeInterval::closed(0, 8, None));
    }

    #[test]
    fn test_from_iso8601() {
        let interval: TimeInterval<NaiveDateTime, f64> =
            TimeInterval::from_iso8601("2012-08-04T16:00:00Z/2012-08-04T18:00:00Z", Some(1.0)).unwrap();
        let day = NaiveDate::from_ymd_opt(2012, 8, 4).unwrap();
        assert_eq!(interval.start(), day.and_hms_opt(16, 0, 0).unwrap());
        assert_eq!(interval.stop(), day.and_hms_opt(18, 0, 0).unwrap());
        assert!(interval.is_start_included() && interval.is_stop_included());
        assert_eq!(interval.data(), Some(&1.0));

        let missing = TimeInterval::<NaiveDateTime, f64>::from_iso8601("2012-08-04T16:00:00Z", None);
        assert!(matches!(missing, Err(TimeIntervalParseError::MissingSeparator(_))));
        let invalid = TimeInterval::<NaiveDateTime, f64>::from_iso8601("yesterday/today", None);
        assert_eq!(invalid, Err(TimeIntervalParseError::InvalidTime("yesterday".to_owned())));
    }

    #[test]
    fn test_display() {
        assert_eq!(half_open(0, 10).to_string(), "[0, 10)");
    }
}
