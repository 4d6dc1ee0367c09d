use serde::Deserialize;

/// The `name` every managed JSON object carries; other fields are ignored here.
#[derive(Deserialize)]
pub struct NamedJsonObject {
    name: String
}

impl NamedJsonObject {
    pub fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_ignores_other_fields() {
        let named: NamedJsonObject = serde_json::from_value(serde_json::json!({
            "name": "thrust",
            "intervals": []
        })).unwrap();
        assert_eq!(named.name(), "thrust");
    }
}
