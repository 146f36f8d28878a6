use serde_json::Value;

/// Removes every occurrence of the named keys from a JSON tree, however
/// deeply nested. Objects lose matching keys and have their remaining
/// values walked; array elements are walked; scalars pass through.
pub fn remove_keys(value: &mut Value, keys: &[&str]) {
    match value {
        Value::Object(object) => {
            object.retain(|name, _| !keys.contains(&name.as_str()));
            for nested in object.values_mut() {
                remove_keys(nested, keys);
            }
        }
        Value::Array(elements) => {
            for element in elements {
                remove_keys(element, keys);
            }
        }
        _ => {}
    }
}
