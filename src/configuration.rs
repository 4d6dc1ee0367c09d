use std::cell::{
    Ref,
    RefCell
};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::rc::Rc;

use chrono::NaiveDateTime;
use serde::Deserialize;
use tracing::info;

use crate::logging::LoggingConfig;
use crate::manager::managererror::{
    ManagerError,
    parse_json_value
};
use crate::manager::manager::{
    IManager,
    Manager
};
use crate::math::interpolation::Interpolation;
use crate::property::compositeproperty::CompositeProperty;
use crate::property::constantproperty::ConstantProperty;
use crate::property::property::Property;
use crate::property::sampledproperty::SampledProperty;
use crate::time::simulationtime::SimulationTime;
use crate::time::timeinterval::TimeInterval;


pub type ConfiguredProperty = Rc<dyn Property<NaiveDateTime, Value = f64>>;
pub type ConfiguredComposite = CompositeProperty<NaiveDateTime, ConfiguredProperty>;

#[derive(Deserialize)]
struct ConstantPropertyJsonProp {
    value: f64
}

fn constant_property_from_json(json_value: serde_json::Value) -> Result<ConfiguredProperty, ManagerError> {
    let json_prop: ConstantPropertyJsonProp = parse_json_value(json_value)?;
    Ok(Rc::new(ConstantProperty::<NaiveDateTime, f64>::new(json_prop.value)))
}

#[derive(Deserialize)]
struct SampledPropertyJsonProp {
    #[serde(default)]
    interpolation: Interpolation,
    samples: Vec<(String, f64)>
}

fn sampled_property_from_json(json_value: serde_json::Value) -> Result<ConfiguredProperty, ManagerError> {
    let json_prop: SampledPropertyJsonProp = parse_json_value(json_value)?;
    let mut property = SampledProperty::new(json_prop.interpolation);
    for (time_text, value) in json_prop.samples {
        let time = NaiveDateTime::parse_time(&time_text)
            .ok_or(ManagerError::TimeParseError(time_text))?;
        property.add_sample(time, value);
    }
    Ok(Rc::new(property))
}

#[derive(Deserialize)]
struct IntervalJsonProp {
    interval: String,
    #[serde(default = "default_included")]
    is_start_included: bool,
    #[serde(default = "default_included")]
    is_stop_included: bool,
    property: serde_json::Value
}

fn default_included() -> bool {
    true
}

#[derive(Deserialize)]
struct CompositePropertyJsonProp {
    intervals: Vec<IntervalJsonProp>
}

/// Intervals are added in file order, so later entries win where they overlap.
fn composite_from_json(json_value: serde_json::Value) -> Result<ConfiguredComposite, ManagerError> {
    let json_prop: CompositePropertyJsonProp = parse_json_value(json_value)?;
    let mut composite = CompositeProperty::new();
    for interval_json in json_prop.intervals {
        let closed: TimeInterval<NaiveDateTime, ConfiguredProperty> =
            TimeInterval::from_iso8601(&interval_json.interval, None)?;
        let property = property_from_json(interval_json.property)?;
        composite.intervals_mut().add_interval(TimeInterval::new(
            closed.start(),
            closed.stop(),
            interval_json.is_start_included,
            interval_json.is_stop_included,
            Some(property)
        ));
    }
    Ok(composite)
}

fn composite_property_from_json(json_value: serde_json::Value) -> Result<ConfiguredProperty, ManagerError> {
    Ok(Rc::new(composite_from_json(json_value)?))
}

#[derive(Deserialize)]
enum PropertyType {
    Constant,
    Sampled,
    Composite
}

#[derive(Deserialize)]
struct PropertyTypedObject {
    property_type: PropertyType
}

fn property_from_json(json_value: serde_json::Value) -> Result<ConfiguredProperty, ManagerError> {
    let typed_obj: PropertyTypedObject = parse_json_value(json_value.clone())?;
    match typed_obj.property_type {
        PropertyType::Constant  => constant_property_from_json(json_value),
        PropertyType::Sampled   => sampled_property_from_json(json_value),
        PropertyType::Composite => composite_property_from_json(json_value)
    }
}

fn named_composite_from_json(json_value: serde_json::Value) -> Result<Rc<ConfiguredComposite>, ManagerError> {
    Ok(Rc::new(composite_from_json(json_value)?))
}


#[derive(Deserialize)]
struct ConfigurationJsonProp {
    #[serde(default)]
    logging: LoggingConfig,
    #[serde(default)]
    properties: Vec<serde_json::Value>
}

pub struct Configuration {
    logging_config_cell: RefCell<LoggingConfig>,
    property_manager: Manager<Rc<ConfiguredComposite>>
}

impl Configuration {
    pub fn new() -> Configuration {
        Configuration {
            logging_config_cell: RefCell::new(LoggingConfig::default()),
            property_manager: Manager::new(named_composite_from_json)
        }
    }

    pub fn logging_config(&self) -> Ref<'_, LoggingConfig> {
        self.logging_config_cell.borrow()
    }

    pub fn property_manager(&self) -> &Manager<Rc<ConfiguredComposite>> {
        &self.property_manager
    }

    pub fn property(&self, name: &str) -> Result<Rc<ConfiguredComposite>, ManagerError> {
        self.property_manager.get(name)
    }

    pub fn from_reader(&self, file_path: &Path) -> Result<(), ManagerError> {
        let file = File::open(file_path)?;
        let reader = BufReader::new(file);
        let json_value: serde_json::Value = serde_json::from_reader(reader)?;
        self.load_json(json_value)?;
        info!(path = %file_path.display(), "Loaded configuration");
        Ok(())
    }

    pub fn from_json_str(&self, text: &str) -> Result<(), ManagerError> {
        let json_value: serde_json::Value = serde_json::from_str(text)?;
        self.load_json(json_value)
    }

    fn load_json(&self, json_value: serde_json::Value) -> Result<(), ManagerError> {
        let json_prop: ConfigurationJsonProp = parse_json_value(json_value)?;
        self.property_manager.insert_obj_from_json_vec(&json_prop.properties)?;
        *self.logging_config_cell.borrow_mut() = json_prop.logging;
        Ok(())
    }
}

impl Default for Configuration {
    fn default() -> Self {
        Configuration::new()
    }
}
