//! Deep merge of configuration documents

use serde_json::Value;

/// Merge `custom` into `base`
///
/// Objects merge key by key, arrays are concatenated with `base` first, and
/// any other value in `custom` replaces the one in `base`.
pub fn merge(base: &mut Value, custom: Value) {
    match (base, custom) {
        (Value::Object(base), Value::Object(custom)) => {
            for (key, value) in custom {
                match base.get_mut(&key) {
                    Some(existing) => merge(existing, value),
                    None => {
                        base.insert(key, value);
                    }
                }
            }
        }
        (Value::Array(base), Value::Array(custom)) => {
            base.extend(custom);
        }
        (base, custom) => {
            *base = custom;
        }
    }
}
