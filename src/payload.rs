use serde_json::{Map as JsonMap, Value as JsonValue};

/// JSON object sent as a request body.
#[derive(Debug, Default, Clone, PartialEq)]
pub(crate) struct Payload {
    payload: JsonMap<String, JsonValue>,
}

impl Payload {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Adds the given key-value pair, replacing any previous value for the key.
    pub(crate) fn add<T: Into<JsonValue>>(mut self, key: &str, value: T) -> Self {
        self.payload.insert(key.to_string(), value.into());
        self
    }

    /// In the case that `value` is some, adds the key-value pair.
    pub(crate) fn add_if_some<T: Into<JsonValue>>(self, key: &str, value: Option<T>) -> Self {
        match value {
            Some(value) => self.add(key, value),
            None => self,
        }
    }

    /// Adds every pair of `fields` whose key isn't already present.
    pub(crate) fn merge_missing(mut self, fields: &JsonMap<String, JsonValue>) -> Self {
        for (k, v) in fields {
            self.payload
                .entry(k.clone())
                .or_insert_with(|| v.clone());
        }
        self
    }

    pub(crate) fn to_vec(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec(&self.payload)
    }
}

impl From<Payload> for JsonValue {
    fn from(value: Payload) -> Self {
        JsonValue::Object(value.payload)
    }
}
