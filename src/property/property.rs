use std::rc::Rc;
use std::sync::Arc;

use crate::property::propertyerror::PropertyError;
use crate::time::simulationtime::SimulationTime;

/// Hints for [`Property::sample_value`].
#[derive(Clone, Debug, PartialEq)]
pub struct SampleOptions<T: SimulationTime> {
    maximum_step: Option<T::Step>,
    required_times: Vec<T>
}

impl<T: SimulationTime> SampleOptions<T> {
    pub fn new() -> SampleOptions<T> {
        SampleOptions { maximum_step: None, required_times: Vec::new() }
    }

    /// Recommended largest gap between samples. Advisory only: an
    /// implementation producing an equivalent set of samples may ignore it.
    pub fn with_maximum_step(mut self, maximum_step: T::Step) -> SampleOptions<T> {
        self.maximum_step = Some(maximum_step);
        self
    }

    /// Times that must appear in the output whenever they fall inside the sampled span.
    pub fn with_required_times(mut self, required_times: Vec<T>) -> SampleOptions<T> {
        self.required_times = required_times;
        self
    }

    pub fn maximum_step(&self) -> Option<T::Step> {
        self.maximum_step
    }

    pub fn required_times(&self) -> &[T] {
        &self.required_times
    }

    /// Same hints, keeping only the required times inside `[start, stop]`.
    pub fn restricted_to(&self, start: T, stop: T) -> SampleOptions<T> {
        SampleOptions {
            maximum_step: self.maximum_step,
            required_times: self.required_times
                .iter()
                .copied()
                .filter(|time| *time >= start && *time <= stop)
                .collect()
        }
    }
}

impl<T: SimulationTime> Default for SampleOptions<T> {
    fn default() -> Self {
        SampleOptions::new()
    }
}

/// A value that may change with simulation time.
pub trait Property<T: SimulationTime> {
    type Value: Clone;

    fn is_time_varying(&self) -> bool;

    /// Value at `time`, or `Ok(None)` when the property has no value there.
    ///
    /// `time` is mandatory; `None` is reported as
    /// [`PropertyError::InvalidArgument`]. `result` is an optional instance the
    /// implementation may overwrite and hand back instead of allocating.
    fn get_value(&self, time: Option<T>, result: Option<Self::Value>) -> Result<Option<Self::Value>, PropertyError>;

    fn value_at(&self, time: T) -> Result<Option<Self::Value>, PropertyError> {
        self.get_value(Some(time), None)
    }

    /// Fills `result_times`/`result_values` with samples covering `[start, stop]`.
    ///
    /// Returns `Ok(false)` when the property has no sampling of its own; the
    /// caller then falls back to point evaluation. Implementations clear both
    /// buffers before writing, emit strictly increasing times and include every
    /// required time at which they have a value.
    fn sample_value(&self,
                    _start: T,
                    _stop: T,
                    _options: &SampleOptions<T>,
                    _result_times: &mut Vec<T>,
                    _result_values: &mut Vec<Self::Value>) -> Result<bool, PropertyError> {
        Ok(false)
    }
}

macro_rules! forward_property {
    ($pointer:ident) => {
        impl<T: SimulationTime, P: Property<T> + ?Sized> Property<T> for $pointer<P> {
            type Value = P::Value;

            fn is_time_varying(&self) -> bool {
                (**self).is_time_varying()
            }

            fn get_value(&self, time: Option<T>, result: Option<Self::Value>) -> Result<Option<Self::Value>, PropertyError> {
                (**self).get_value(time, result)
            }

            fn value_at(&self, time: T) -> Result<Option<Self::Value>, PropertyError> {
                (**self).value_at(time)
            }

            fn sample_value(&self,
                            start: T,
                            stop: T,
                            options: &SampleOptions<T>,
                            result_times: &mut Vec<T>,
                            result_values: &mut Vec<Self::Value>) -> Result<bool, PropertyError> {
                (**self).sample_value(start, stop, options, result_times, result_values)
            }
        }
    };
}

forward_property!(Box);
forward_property!(Rc);
forward_property!(Arc);
