//! Recovering the payload mapping from an extraction response.
//!
//! The extraction service does not promise one response shape. Each
//! [`UnwrapStrategy`] knows one shape; [`unwrap_payload`] tries them in
//! priority order and the first usable (non-empty object) mapping wins.

use serde_json::{Map, Value};

/// One way of reading a payload mapping out of a response.
pub trait UnwrapStrategy: Send + Sync {
    fn name(&self) -> &'static str;

    /// `None` means "not applicable to this response".
    fn unwrap(&self, response: &Value) -> Option<Map<String, Value>>;
}

/// The response's `data` field; a list contributes its first element.
pub struct DataField;

impl UnwrapStrategy for DataField {
    fn name(&self) -> &'static str {
        "data_field"
    }

    fn unwrap(&self, response: &Value) -> Option<Map<String, Value>> {
        match response.get("data")? {
            Value::Array(items) => items.first()?.as_object().cloned(),
            Value::Object(map) => Some(map.clone()),
            _ => None,
        }
    }
}

/// The whole response read as a bag of attributes.
pub struct AttributeBag;

impl UnwrapStrategy for AttributeBag {
    fn name(&self) -> &'static str {
        "attribute_bag"
    }

    fn unwrap(&self, response: &Value) -> Option<Map<String, Value>> {
        response.as_object().cloned()
    }
}

/// A list of `[key, value]` pairs folded into a mapping.
pub struct EntryList;

impl UnwrapStrategy for EntryList {
    fn name(&self) -> &'static str {
        "entry_list"
    }

    fn unwrap(&self, response: &Value) -> Option<Map<String, Value>> {
        response
            .as_array()?
            .iter()
            .map(|entry| match entry.as_array().map(Vec::as_slice) {
                Some([Value::String(key), value]) => Some((key.clone(), value.clone())),
                _ => None,
            })
            .collect()
    }
}

/// The strategies in priority order.
pub fn default_strategies() -> Vec<Box<dyn UnwrapStrategy>> {
    vec![Box::new(DataField), Box::new(AttributeBag), Box::new(EntryList)]
}

/// Run `strategies` in order and return the first non-empty mapping along
/// with the name of the strategy that produced it.
pub fn unwrap_payload(
    strategies: &[Box<dyn UnwrapStrategy>],
    response: &Value,
) -> Option<(&'static str, Map<String, Value>)> {
    strategies.iter().find_map(|strategy| {
        strategy
            .unwrap(response)
            .filter(|map| !map.is_empty())
            .map(|map| (strategy.name(), map))
    })
}

/// The non-empty `interactions` list of a payload, if any.
pub fn interactions_of(payload: &Map<String, Value>) -> Option<&Vec<Value>> {
    payload
        .get("interactions")
        .and_then(Value::as_array)
        .filter(|items| !items.is_empty())
}
