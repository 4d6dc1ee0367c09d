use std::cell::{
    RefCell,
    RefMut
};
use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use tracing::debug;

use super::managererror::{
    ManagerError,
    parse_json_value
};
use super::namedobject::NamedJsonObject;


pub trait IManager<V> where
    V: Clone {
    fn map(&self) -> RefMut<'_, HashMap<String, V>>;

    fn insert_obj_from_json(&self, json_value: serde_json::Value) -> Result<(), ManagerError>;

    fn get(&self, name: &str) -> Result<V, ManagerError> {
        let map = self.map();
        map.get(name).map_or(
            Err(ManagerError::map_elem_not_found(name)),
            |elem| Ok(elem.clone())
        )
    }

    fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.map().keys().cloned().collect();
        names.sort();
        names
    }

    fn insert_obj_from_json_vec(&self, json_vec: &[serde_json::Value]) -> Result<(), ManagerError> {
        for j in json_vec.iter() {
            self.insert_obj_from_json(j.clone())?;
        }
        Ok(())
    }

    /// Loads a JSON file holding either one object or an array of objects.
    fn from_reader(&self, file_path: &Path) -> Result<(), ManagerError> {
        let file = File::open(file_path)?;
        let reader = BufReader::new(file);
        let json_value: serde_json::Value = serde_json::from_reader(reader)?;
        if json_value.is_array() {
            let json_array: Vec<serde_json::Value> = parse_json_value(json_value)?;
            self.insert_obj_from_json_vec(&json_array)
        } else {
            self.insert_obj_from_json(json_value)
        }
    }
}


pub struct Manager<V> {
    map_cell: RefCell<HashMap<String, V>>,
    get_obj_from_json: fn(serde_json::Value) -> Result<V, ManagerError>
}


impl <V> Manager<V> where
    V: Clone {
    pub fn new(get_obj_from_json: fn(serde_json::Value) -> Result<V, ManagerError>) -> Manager<V> {
        Manager { map_cell: RefCell::new(HashMap::new()), get_obj_from_json }
    }
}

impl <V> IManager<V> for Manager<V> where
    V: Clone {
    fn map(&self) -> RefMut<'_, HashMap<String, V>> {
        self.map_cell.borrow_mut()
    }

    /// Later objects with the same name replace earlier ones.
    fn insert_obj_from_json(&self, json_value: serde_json::Value) -> Result<(), ManagerError> {
        let named_object: NamedJsonObject = parse_json_value(json_value.clone())?;
        let v = (self.get_obj_from_json)(json_value)?;
        debug!(name = named_object.name(), "Registered named object");
        self.map().insert(named_object.name().to_owned(), v);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use serde::Deserialize;
    use tempfile::NamedTempFile;

    use super::*;

    #[derive(Deserialize)]
    struct Scaled {
        factor: f64
    }

    fn scaled_from_json(json_value: serde_json::Value) -> Result<f64, ManagerError> {
        let scaled: Scaled = parse_json_value(json_value)?;
        Ok(scaled.factor)
    }

    #[test]
    fn test_insert_and_get() {
        let manager = Manager::new(scaled_from_json);
        manager.insert_obj_from_json(serde_json::json!({ "name": "double", "factor": 2.0 })).unwrap();
        manager.insert_obj_from_json(serde_json::json!({ "name": "half", "factor": 0.5 })).unwrap();
        assert_eq!(manager.get("double").unwrap(), 2.0);
        assert_eq!(manager.names(), vec!["double".to_owned(), "half".to_owned()]);
        assert!(matches!(manager.get("triple"), Err(ManagerError::NameNotFoundError(name)) if name == "triple"));
    }

    #[test]
    fn test_insert_requires_name() {
        let manager = Manager::new(scaled_from_json);
        let result = manager.insert_obj_from_json(serde_json::json!({ "factor": 2.0 }));
        assert!(matches!(result, Err(ManagerError::JsonParseError(_))));
        assert!(manager.names().is_empty());
    }

    #[test]
    fn test_from_reader_array() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"[{{"name": "a", "factor": 1.0}}, {{"name": "b", "factor": 3.0}}]"#).unwrap();
        let manager = Manager::new(scaled_from_json);
        manager.from_reader(file.path()).unwrap();
        assert_eq!(manager.get("b").unwrap(), 3.0);
    }

    #[test]
    fn test_from_reader_missing_file() {
        let manager = Manager::new(scaled_from_json);
        let result = manager.from_reader(Path::new("/nonexistent/timeproperty.json"));
        assert!(matches!(result, Err(ManagerError::IOError(_))));
    }
}
