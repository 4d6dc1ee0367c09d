use std::collections::BTreeSet;

use crate::math::interpolation::{
    Interpolate,
    Interpolation
};
use crate::property::property::{
    Property,
    SampleOptions
};
use crate::property::propertyerror::PropertyError;
use crate::time::simulationtime::SimulationTime;

/// Values known at discrete times, interpolated in between.
///
/// Outside `[first sample, last sample]` the property has no value.
#[derive(Clone, Debug, PartialEq)]
pub struct SampledProperty<T, V> {
    times: Vec<T>,
    values: Vec<V>,
    interpolation: Interpolation
}

impl<T: SimulationTime, V: Interpolate> SampledProperty<T, V> {
    pub fn new(interpolation: Interpolation) -> SampledProperty<T, V> {
        SampledProperty { times: Vec::new(), values: Vec::new(), interpolation }
    }

    pub fn interpolation(&self) -> Interpolation {
        self.interpolation
    }

    pub fn times(&self) -> &[T] {
        &self.times
    }

    pub fn values(&self) -> &[V] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    /// Inserts a sample, replacing any sample already stored at `time`.
    pub fn add_sample(&mut self, time: T, value: V) {
        match self.times.binary_search(&time) {
            Ok(index) => self.values[index] = value,
            Err(index) => {
                self.times.insert(index, time);
                self.values.insert(index, value);
            }
        }
    }

    pub fn add_samples(&mut self, times: Vec<T>, values: Vec<V>) -> Result<(), PropertyError> {
        if times.len() != values.len() {
            return Err(PropertyError::invalid_argument(format!(
                "{} sample times but {} sample values", times.len(), values.len()
            )));
        }
        for (time, value) in times.into_iter().zip(values) {
            self.add_sample(time, value);
        }
        Ok(())
    }

    fn interpolate(&self, time: T) -> Option<V> {
        match self.times.binary_search(&time) {
            Ok(index) => Some(self.values[index].clone()),
            Err(0) => None,
            Err(index) if index == self.times.len() => None,
            Err(index) => {
                let lhs_time = self.times[index - 1];
                let span = lhs_time.seconds_until(self.times[index]);
                let alpha = if span > 0.0 { lhs_time.seconds_until(time) / span } else { 0.0 };
                Some(self.interpolation.between(&self.values[index - 1], &self.values[index], alpha))
            }
        }
    }
}

impl<T: SimulationTime, V: Interpolate> Property<T> for SampledProperty<T, V> {
    type Value = V;

    fn is_time_varying(&self) -> bool {
        true
    }

    fn get_value(&self, time: Option<T>, result: Option<V>) -> Result<Option<V>, PropertyError> {
        let time = time.ok_or_else(PropertyError::time_required)?;
        let value = self.interpolate(time);
        Ok(match (value, result) {
            (Some(value), Some(mut result)) => {
                result.clone_from(&value);
                Some(result)
            },
            (value, _) => value
        })
    }

    /// Emits the stored nodes inside the span, the span ends and the required
    /// times. `maximum_step` is ignored: every scheme is fully described by
    /// its nodes.
    fn sample_value(&self,
                    start: T,
                    stop: T,
                    options: &SampleOptions<T>,
                    result_times: &mut Vec<T>,
                    result_values: &mut Vec<V>) -> Result<bool, PropertyError> {
        result_times.clear();
        result_values.clear();
        if stop < start {
            return Err(PropertyError::invalid_argument("stop must not be earlier than start"));
        }
        let (Some(&first), Some(&last)) = (self.times.first(), self.times.last()) else {
            return Ok(true);
        };
        let lo = start.max(first);
        let hi = stop.min(last);
        if hi < lo {
            return Ok(true);
        }

        let from = self.times.partition_point(|time| *time < lo);
        let to = self.times.partition_point(|time| *time <= hi);
        let mut sample_times: BTreeSet<T> = self.times[from..to].iter().copied().collect();
        sample_times.insert(lo);
        sample_times.insert(hi);
        sample_times.extend(options.restricted_to(lo, hi).required_times());

        for time in sample_times {
            if let Some(value) = self.interpolate(time) {
                result_times.push(time);
                result_values.push(value);
            }
        }
        Ok(true)
    }
}
