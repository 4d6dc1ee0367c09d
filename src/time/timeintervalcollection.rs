use std::slice::Iter;

use tracing::trace;

use super::simulationtime::SimulationTime;
use super::timeinterval::TimeInterval;

/// Sorted, non-overlapping intervals.
///
/// Insertions give the newest interval precedence: whatever part of an older
/// interval it overlaps is trimmed away, splitting the older interval in two
/// when the new one falls in its middle. Empty intervals are never stored.
#[derive(Clone, Debug, PartialEq)]
pub struct TimeIntervalCollection<T, D> {
    intervals: Vec<TimeInterval<T, D>>
}

impl<T: SimulationTime, D> TimeIntervalCollection<T, D> {
    pub fn new() -> TimeIntervalCollection<T, D> {
        TimeIntervalCollection { intervals: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.intervals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&TimeInterval<T, D>> {
        self.intervals.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut TimeInterval<T, D>> {
        self.intervals.get_mut(index)
    }

    pub fn iter(&self) -> Iter<'_, TimeInterval<T, D>> {
        self.intervals.iter()
    }

    pub fn start(&self) -> Option<T> {
        self.intervals.first().map(|interval| interval.start())
    }

    pub fn stop(&self) -> Option<T> {
        self.intervals.last().map(|interval| interval.stop())
    }

    pub fn is_start_included(&self) -> Option<bool> {
        self.intervals.first().map(|interval| interval.is_start_included())
    }

    pub fn is_stop_included(&self) -> Option<bool> {
        self.intervals.last().map(|interval| interval.is_stop_included())
    }

    pub fn clear(&mut self) {
        self.intervals.clear();
    }

    /// Index of the interval containing `time`, or `Err` with the index of the
    /// first interval lying entirely after it.
    pub fn index_of(&self, time: T) -> Result<usize, usize> {
        let upper = self.intervals.partition_point(|interval| interval.start() <= time);
        // An interval starting exactly at `time` with an excluded start may be
        // preceded by one whose included stop is `time`.
        for index in (upper.saturating_sub(2)..upper).rev() {
            if self.intervals[index].contains(time) {
                return Ok(index);
            }
        }
        Err(self.intervals.partition_point(|interval| {
            interval.stop() < time || (interval.stop() == time && !interval.is_stop_included())
        }))
    }

    pub fn find_interval_containing(&self, time: T) -> Option<&TimeInterval<T, D>> {
        self.index_of(time).ok().map(|index| &self.intervals[index])
    }

    pub fn find_data_for_interval_containing(&self, time: T) -> Option<&D> {
        self.find_interval_containing(time).and_then(|interval| interval.data())
    }

    /// Intervals sharing at least one instant with the closed span `[start, stop]`, in order.
    pub fn overlapping(&self, start: T, stop: T) -> impl Iterator<Item = &TimeInterval<T, D>> {
        let first = self.intervals.partition_point(|interval| {
            interval.stop() < start || (interval.stop() == start && !interval.is_stop_included())
        });
        self.intervals[first..]
            .iter()
            .take_while(move |interval| interval.start() <= stop)
            .filter(move |interval| interval.intersects_range(start, stop))
    }

    fn insert_sorted(intervals: &mut Vec<TimeInterval<T, D>>, interval: TimeInterval<T, D>) {
        let key = interval.start_key();
        let position = intervals.partition_point(|existing| existing.start_key() < key);
        intervals.insert(position, interval);
    }
}

impl<T: SimulationTime, D: Clone> TimeIntervalCollection<T, D> {
    /// Adds `interval`, trimming or splitting any stored interval it overlaps.
    pub fn add_interval(&mut self, interval: TimeInterval<T, D>) {
        self.insert(interval, None);
    }

    /// Adds `interval`, merging it with every overlapping or abutting interval
    /// whose payload `is_same_data` considers equal to the new one. Intervals
    /// without payload merge with each other.
    pub fn add_interval_with<F>(&mut self, interval: TimeInterval<T, D>, is_same_data: F)
    where
        F: Fn(&D, &D) -> bool
    {
        self.insert(interval, Some(&is_same_data));
    }

    /// Removes every instant of `interval` from the collection. Returns whether
    /// anything was removed.
    pub fn remove_interval<E>(&mut self, interval: &TimeInterval<T, E>) -> bool {
        if interval.is_empty() {
            return false;
        }
        let mut removed = false;
        let mut kept = Vec::with_capacity(self.intervals.len() + 1);
        for existing in self.intervals.drain(..) {
            if existing.overlaps(interval) {
                removed = true;
                let (before, after) = existing.split_around(interval);
                kept.extend(before);
                kept.extend(after);
            } else {
                kept.push(existing);
            }
        }
        self.intervals = kept;
        trace!(removed, count = self.intervals.len(), "Removed interval {}", interval);
        removed
    }

    fn insert(&mut self, interval: TimeInterval<T, D>, is_same_data: Option<&dyn Fn(&D, &D) -> bool>) {
        if interval.is_empty() {
            trace!("Ignored empty interval {}", interval);
            return;
        }
        let mut merged = interval;
        let mut kept = Vec::with_capacity(self.intervals.len() + 1);
        for existing in self.intervals.drain(..) {
            let mergeable = is_same_data.is_some_and(|same| match (existing.data(), merged.data()) {
                (Some(lhs), Some(rhs)) => same(lhs, rhs),
                (None, None) => true,
                _ => false
            });
            let touching = existing.is_followed_by(&merged) || merged.is_followed_by(&existing);
            if mergeable && (touching || existing.overlaps(&merged)) {
                merged = merged.union_with(&existing);
            } else if existing.overlaps(&merged) {
                let (before, after) = existing.split_around(&merged);
                kept.extend(before);
                kept.extend(after);
            } else {
                kept.push(existing);
            }
        }
        trace!(count = kept.len() + 1, "Added interval {}", merged);
        Self::insert_sorted(&mut kept, merged);
        self.intervals = kept;
    }
}

impl<T: SimulationTime, D> Default for TimeIntervalCollection<T, D> {
    fn default() -> Self {
        TimeIntervalCollection::new()
    }
}

impl<'a, T: SimulationTime, D> IntoIterator for &'a TimeIntervalCollection<T, D> {
    type Item = &'a TimeInterval<T, D>;
    type IntoIter = Iter<'a, TimeInterval<T, D>>;

    fn into_iter(self) -> Self::IntoIter {
        self.intervals.iter()
    }
}
