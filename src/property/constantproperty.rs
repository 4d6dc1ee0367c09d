use std::marker::PhantomData;

use crate::property::property::Property;
use crate::property::propertyerror::PropertyError;
use crate::time::simulationtime::SimulationTime;

/// The same value at every time.
#[derive(Clone, Debug, PartialEq)]
pub struct ConstantProperty<T, V> {
    value: Option<V>,
    _time: PhantomData<fn(T)>
}

impl<T: SimulationTime, V: Clone> ConstantProperty<T, V> {
    pub fn new(value: V) -> ConstantProperty<T, V> {
        ConstantProperty { value: Some(value), _time: PhantomData }
    }

    pub fn undefined() -> ConstantProperty<T, V> {
        ConstantProperty { value: None, _time: PhantomData }
    }

    pub fn value(&self) -> Option<&V> {
        self.value.as_ref()
    }

    pub fn set_value(&mut self, value: Option<V>) {
        self.value = value;
    }
}

impl<T: SimulationTime, V: Clone> Property<T> for ConstantProperty<T, V> {
    type Value = V;

    fn is_time_varying(&self) -> bool {
        false
    }

    fn get_value(&self, time: Option<T>, result: Option<V>) -> Result<Option<V>, PropertyError> {
        time.ok_or_else(PropertyError::time_required)?;
        let Some(value) = self.value.as_ref() else {
            return Ok(None);
        };
        match result {
            Some(mut result) => {
                result.clone_from(value);
                Ok(Some(result))
            },
            None => Ok(Some(value.clone()))
        }
    }
}
