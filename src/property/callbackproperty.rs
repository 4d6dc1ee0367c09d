use std::fmt;

use crate::property::property::Property;
use crate::property::propertyerror::PropertyError;
use crate::time::simulationtime::SimulationTime;

type Callback<T, V> = Box<dyn Fn(T) -> Result<Option<V>, PropertyError>>;

/// Values computed on demand by a closure.
pub struct CallbackProperty<T, V> {
    callback: Callback<T, V>,
    is_time_varying: bool
}

impl<T: SimulationTime, V: Clone> CallbackProperty<T, V> {
    pub fn new<F>(callback: F, is_time_varying: bool) -> CallbackProperty<T, V>
    where
        F: Fn(T) -> Result<Option<V>, PropertyError> + 'static
    {
        CallbackProperty { callback: Box::new(callback), is_time_varying }
    }

    /// Wraps an infallible closure.
    pub fn from_fn<F>(callback: F) -> CallbackProperty<T, V>
    where
        F: Fn(T) -> Option<V> + 'static
    {
        CallbackProperty::new(move |time| Ok(callback(time)), true)
    }
}

impl<T: SimulationTime, V: Clone> Property<T> for CallbackProperty<T, V> {
    type Value = V;

    fn is_time_varying(&self) -> bool {
        self.is_time_varying
    }

    fn get_value(&self, time: Option<T>, _result: Option<V>) -> Result<Option<V>, PropertyError> {
        let time = time.ok_or_else(PropertyError::time_required)?;
        (self.callback)(time)
    }
}

impl<T, V> fmt::Debug for CallbackProperty<T, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CallbackProperty")
            .field("is_time_varying", &self.is_time_varying)
            .finish_non_exhaustive()
    }
}
