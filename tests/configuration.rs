use std::io::Write;
use std::path::Path;

use chrono::{
    NaiveDate,
    NaiveDateTime,
    TimeDelta
};
use tempfile::NamedTempFile;

use timeproperty::configuration::Configuration;
use timeproperty::manager::managererror::ManagerError;
use timeproperty::property::property::{
    Property,
    SampleOptions
};
use timeproperty::time::timeinterval::TimeIntervalParseError;

fn at(day: u32, hour: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 3, day).unwrap().and_hms_opt(hour, 0, 0).unwrap()
}

fn write_config(text: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(text.as_bytes()).unwrap();
    file
}

const CONFIG: &str = r#"{
    "logging": { "level": "warn" },
    "properties": [
        {
            "name": "thrust",
            "intervals": [
                {
                    "interval": "2024-03-01T00:00:00/2024-03-01T12:00:00",
                    "is_stop_included": false,
                    "property": { "property_type": "Constant", "value": 1.0 }
                },
                {
                    "interval": "2024-03-01T12:00:00/2024-03-02T00:00:00",
                    "is_stop_included": false,
                    "property": { "property_type": "Constant", "value": 2.0 }
                }
            ]
        },
        {
            "name": "override",
            "intervals": [
                {
                    "interval": "2024-03-01/2024-03-03",
                    "property": { "property_type": "Constant", "value": 0.0 }
                },
                {
                    "interval": "2024-03-02/2024-03-02T06:00:00",
                    "property": {
                        "property_type": "Sampled",
                        "interpolation": "ForwardFlat",
                        "samples": [["2024-03-02T00:00:00", 7.0], ["2024-03-02T06:00:00", 9.0]]
                    }
                }
            ]
        }
    ]
}"#;

#[test]
fn test_load_from_file() {
    let file = write_config(CONFIG);
    let configuration = Configuration::new();
    configuration.from_reader(file.path()).unwrap();
    assert_eq!(configuration.logging_config().level, "warn");

    let thrust = configuration.property("thrust").unwrap();
    assert_eq!(thrust.value_at(at(1, 6)).unwrap(), Some(1.0));
    assert_eq!(thrust.value_at(at(1, 12)).unwrap(), Some(2.0));
    assert_eq!(thrust.value_at(at(2, 0)).unwrap(), None);
}

#[test]
fn test_sample_with_step_across_bound() {
    let file = write_config(CONFIG);
    let configuration = Configuration::new();
    configuration.from_reader(file.path()).unwrap();
    let thrust = configuration.property("thrust").unwrap();

    let options = SampleOptions::new().with_maximum_step(TimeDelta::hours(5));
    let mut times = Vec::new();
    let mut values = Vec::new();
    thrust.sample_value(at(1, 0), at(2, 0), &options, &mut times, &mut values).unwrap();
    assert_eq!(times, vec![at(1, 0), at(1, 5), at(1, 10), at(1, 12), at(1, 17), at(1, 22), at(2, 0)]);
    assert_eq!(values, vec![1.0, 1.0, 1.0, 2.0, 2.0, 2.0, 2.0]);
}

#[test]
fn test_later_interval_takes_precedence() {
    let file = write_config(CONFIG);
    let configuration = Configuration::new();
    configuration.from_reader(file.path()).unwrap();
    let overridden = configuration.property("override").unwrap();

    assert_eq!(overridden.intervals().len(), 3);
    assert_eq!(overridden.value_at(at(1, 23)).unwrap(), Some(0.0));
    assert_eq!(overridden.value_at(at(2, 3)).unwrap(), Some(7.0));
    assert_eq!(overridden.value_at(at(2, 6)).unwrap(), Some(9.0));
    assert_eq!(overridden.value_at(at(2, 7)).unwrap(), Some(0.0));
}

#[test]
fn test_missing_property_name() {
    let file = write_config(CONFIG);
    let configuration = Configuration::new();
    configuration.from_reader(file.path()).unwrap();
    let result = configuration.property("drag");
    assert!(matches!(result, Err(ManagerError::NameNotFoundError(name)) if name == "drag"));
}

#[test]
fn test_bad_interval() {
    let file = write_config(r#"{
        "properties": [{
            "name": "broken",
            "intervals": [{
                "interval": "2024-03-01",
                "property": { "property_type": "Constant", "value": 1.0 }
            }]
        }]
    }"#);
    let configuration = Configuration::new();
    let result = configuration.from_reader(file.path());
    assert!(matches!(
        result,
        Err(ManagerError::IntervalParseError(TimeIntervalParseError::MissingSeparator(_)))
    ));
}

#[test]
fn test_missing_file() {
    let configuration = Configuration::new();
    let result = configuration.from_reader(Path::new("/nonexistent/timeproperty.json"));
    assert!(matches!(result, Err(ManagerError::IOError(_))));
}
