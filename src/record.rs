//! Flat log records
//!
//! A [`Record`] is one flat mapping of attribute name to primitive value
//! describing a single request. Records are built fresh per request, handed to
//! the client, and discarded; there is no identity and no reuse.

use serde::Serialize;
use serde_json::{Map, Value};

/// One flat attribute map, serialized as a JSON object on the wire.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct Record {
    fields: Map<String, Value>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set an attribute. Accepts anything JSON can represent as a primitive
    /// (strings, integers, booleans); later writes overwrite earlier ones.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.fields.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_and_get() {
        let mut record = Record::new();
        record.set("method", "GET");
        record.set("status", 200u16);
        record.set("latency_ms", 12u64);

        assert_eq!(record.get("method"), Some(&Value::from("GET")));
        assert_eq!(record.get("status"), Some(&Value::from(200u16)));
        assert_eq!(record.len(), 3);
        assert!(record.get("missing").is_none());
    }

    #[test]
    fn test_overwrite_keeps_last_value() {
        let mut record = Record::new();
        record.set("path", "/a");
        record.set("path", "/b");

        assert_eq!(record.get("path"), Some(&Value::from("/b")));
        assert_eq!(record.len(), 1);
    }

    #[test]
    fn test_serializes_as_flat_object() {
        let mut record = Record::new();
        record.set("method", "POST");
        record.set("response_size", 17u64);

        let json = serde_json::to_string(&record).expect("record should serialize");
        let parsed: Value = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed["method"], "POST");
        assert_eq!(parsed["response_size"], 17);
        assert!(parsed.as_object().unwrap().len() == 2);
    }

    #[test]
    fn test_empty_record() {
        let record = Record::new();
        assert!(record.is_empty());
        assert_eq!(serde_json::to_string(&record).unwrap(), "{}");
    }
}
