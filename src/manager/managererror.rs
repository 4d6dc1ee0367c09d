use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::property::propertyerror::PropertyError;
use crate::time::timeinterval::TimeIntervalParseError;

#[derive(Debug, Error)]
pub enum ManagerError {
    #[error(transparent)]
    IOError(#[from] std::io::Error),
    #[error(transparent)]
    JsonParseError(#[from] serde_json::Error),
    #[error("key '{0}' not found")]
    NameNotFoundError(String),
    #[error(transparent)]
    IntervalParseError(#[from] TimeIntervalParseError),
    #[error("unable to parse time '{0}'")]
    TimeParseError(String),
    #[error(transparent)]
    PropertyError(#[from] PropertyError)
}

impl ManagerError {
    pub fn map_elem_not_found(name: &str) -> ManagerError {
        ManagerError::NameNotFoundError(name.to_owned())
    }
}

pub fn parse_json_value<T>(json_value: serde_json::Value) -> Result<T, ManagerError>
where
    T: DeserializeOwned
{
    serde_json::from_value(json_value).map_err(ManagerError::JsonParseError)
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    use super::*;

    #[derive(Deserialize)]
    struct Named {
        name: String
    }

    #[test]
    fn test_parse_json_value() {
        let named: Named = parse_json_value(serde_json::json!({ "name": "orbit" })).unwrap();
        assert_eq!(named.name, "orbit");

        let missing = parse_json_value::<Named>(serde_json::json!({ "label": "orbit" }));
        assert!(matches!(missing, Err(ManagerError::JsonParseError(_))));
    }

    #[test]
    fn test_error_display() {
        assert_eq!(ManagerError::map_elem_not_found("orbit").to_string(), "key 'orbit' not found");
        let error: ManagerError = TimeIntervalParseError::InvalidTime("noon".to_owned()).into();
        assert_eq!(error.to_string(), "unable to parse time 'noon'");
        let error: ManagerError = PropertyError::time_required().into();
        assert!(matches!(error, ManagerError::PropertyError(_)));
    }
}
