use serde::{Deserialize, Serialize};
use serde_json::{to_string_pretty, to_value, Map, Value};

pub fn dejsonify<'a, T>(json_str: &'a str) -> serde_json::Result<T>
where
    T: Deserialize<'a>,
{
    serde_json::from_str::<T>(json_str)
}

/// Pretty-prints with object keys sorted, giving a canonical string for
/// identical values.
pub fn jsonify_pretty<T>(obj: &T) -> anyhow::Result<String>
where
    T: Serialize,
{
    Ok(to_string_pretty(&jsonify_internal(&to_value(obj)?))?)
}

pub fn jsonify_internal(json_value: &Value) -> Value {
    match json_value {
        Value::Object(obj) => {
            let mut sorted_map = Map::new();
            let mut keys: Vec<&String> = obj.keys().collect();
            keys.sort();
            for key in keys {
                if let Some(value) = obj.get(key) {
                    sorted_map.insert(key.clone(), jsonify_internal(value));
                }
            }
            Value::Object(sorted_map)
        }
        Value::Array(arr) => Value::Array(arr.iter().map(jsonify_internal).collect()),
        _ => json_value.clone(),
    }
}
