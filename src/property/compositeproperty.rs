//! A property defined piecewise over time.
//!
//! Each interval of the owned [`TimeIntervalCollection`] carries its own
//! property, which alone answers for times inside the interval. Times not
//! covered by any interval have no value.

use std::collections::{
    BTreeMap,
    BTreeSet
};

use tracing::{
    debug,
    trace
};

use crate::property::property::{
    Property,
    SampleOptions
};
use crate::property::propertyerror::PropertyError;
use crate::time::simulationtime::SimulationTime;
use crate::time::timeinterval::TimeInterval;
use crate::time::timeintervalcollection::TimeIntervalCollection;

#[derive(Clone, Debug, PartialEq)]
pub struct CompositeProperty<T, P> {
    intervals: TimeIntervalCollection<T, P>
}

impl<T: SimulationTime, P> CompositeProperty<T, P> {
    pub fn new() -> CompositeProperty<T, P> {
        CompositeProperty { intervals: TimeIntervalCollection::new() }
    }

    pub fn intervals(&self) -> &TimeIntervalCollection<T, P> {
        &self.intervals
    }

    /// The only way to register interval/property pairs. Mutations are not validated here.
    pub fn intervals_mut(&mut self) -> &mut TimeIntervalCollection<T, P> {
        &mut self.intervals
    }
}

impl<T: SimulationTime, P> Default for CompositeProperty<T, P> {
    fn default() -> Self {
        CompositeProperty::new()
    }
}

impl<T: SimulationTime, P: Property<T>> CompositeProperty<T, P> {
    /// Value recorded at an interval bound.
    ///
    /// The interval containing `time` answers. A bound no interval contains
    /// (an open end) is closed by the last interval in index order that
    /// starts or stops there, so the jump at the bound is kept.
    fn boundary_value(&self,
                      overlapping: &[&TimeInterval<T, P>],
                      time: T) -> Result<Option<P::Value>, PropertyError> {
        let owner = self.intervals
            .find_interval_containing(time)
            .or_else(|| overlapping
                .iter()
                .rev()
                .find(|interval| interval.start() == time || interval.stop() == time)
                .copied());
        match owner.and_then(|interval| interval.data()) {
            Some(data) => data.value_at(time),
            None => Ok(None)
        }
    }
}

impl<T: SimulationTime, P: Property<T>> Property<T> for CompositeProperty<T, P> {
    type Value = P::Value;

    /// Always true: a composite changes at its interval bounds.
    fn is_time_varying(&self) -> bool {
        true
    }

    fn get_value(&self, time: Option<T>, result: Option<P::Value>) -> Result<Option<P::Value>, PropertyError> {
        let time = time.ok_or_else(PropertyError::time_required)?;
        match self.intervals.find_data_for_interval_containing(time) {
            Some(data) => data.get_value(Some(time), result),
            None => Ok(None)
        }
    }

    /// Samples `[start, stop]` across every interval it overlaps.
    ///
    /// The span is first clamped to the covered range. Each interval's
    /// property samples its own part of the span when it can; otherwise it is
    /// evaluated every `maximum_step`, if one is given. On top of that, every
    /// interval bound inside the span and every required time is evaluated
    /// exactly. Later passes replace earlier samples at the same time, so the
    /// output is strictly increasing and each time resolves the way
    /// `get_value` would.
    fn sample_value(&self,
                    start: T,
                    stop: T,
                    options: &SampleOptions<T>,
                    result_times: &mut Vec<T>,
                    result_values: &mut Vec<P::Value>) -> Result<bool, PropertyError> {
        result_times.clear();
        result_values.clear();
        if stop < start {
            return Err(PropertyError::invalid_argument("stop must not be earlier than start"));
        }

        let overlapping: Vec<&TimeInterval<T, P>> = self.intervals.overlapping(start, stop).collect();
        let (Some(first), Some(last)) = (overlapping.first(), overlapping.last()) else {
            debug!(?start, ?stop, "No intervals overlap the sampled span");
            return Ok(true);
        };
        let lo = start.max(first.start());
        let hi = stop.min(last.stop());

        let mut samples: BTreeMap<T, P::Value> = BTreeMap::new();
        let mut sub_times = Vec::new();
        let mut sub_values = Vec::new();
        for interval in &overlapping {
            let Some(data) = interval.data() else {
                continue;
            };
            let sub_start = lo.max(interval.start());
            let sub_stop = hi.min(interval.stop());
            let sub_options = options.restricted_to(sub_start, sub_stop);
            if data.sample_value(sub_start, sub_stop, &sub_options, &mut sub_times, &mut sub_values)? {
                trace!(?sub_start, ?sub_stop, count = sub_times.len(), "Delegate sampled interval");
                for (time, value) in sub_times.drain(..).zip(sub_values.drain(..)) {
                    if time >= sub_start && time <= sub_stop && interval.contains(time) {
                        samples.insert(time, value);
                    }
                }
            } else if let Some(step) = options.maximum_step().filter(|step| T::is_forward_step(*step)) {
                let mut time = sub_start;
                while let Some(next) = time.checked_add_step(step).filter(|next| *next < sub_stop) {
                    time = next;
                    if let Some(value) = data.value_at(time)? {
                        samples.insert(time, value);
                    }
                }
            }
        }

        let mut boundaries = BTreeSet::from([lo, hi]);
        for interval in &overlapping {
            boundaries.extend([interval.start(), interval.stop()]
                .into_iter()
                .filter(|bound| *bound >= lo && *bound <= hi));
        }
        for time in boundaries {
            if let Some(value) = self.boundary_value(&overlapping, time)? {
                samples.insert(time, value);
            }
        }

        for &time in options.restricted_to(lo, hi).required_times() {
            if let Some(value) = self.value_at(time)? {
                samples.insert(time, value);
            }
        }

        for (time, value) in samples {
            result_times.push(time);
            result_values.push(value);
        }
        debug!(?lo, ?hi, intervals = overlapping.len(), samples = result_times.len(), "Sampled composite property");
        Ok(true)
    }
}
