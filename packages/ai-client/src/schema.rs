//! Schema generation and validation for structured completions.
//!
//! Response types derive `schemars::JsonSchema` and `serde::Deserialize`,
//! then opt in to [`StructuredOutput`]. The generated schema is massaged
//! into the strict form providers accept, and `validate` gives types a
//! place to enforce constraints the wire schema can't fully express.

use schemars::{schema_for, JsonSchema};
use serde::de::DeserializeOwned;
use serde_json::Value;

/// A type that can be requested as structured output from a provider.
///
/// Implementors get schema generation for free; override [`validate`] to
/// reject responses that deserialize but break a declared constraint
/// (e.g. a score outside its allowed range). A failed validation consumes
/// one retry attempt, so an invalid instance is never returned to callers.
///
/// [`validate`]: StructuredOutput::validate
pub trait StructuredOutput: JsonSchema + DeserializeOwned {
    /// Generate a provider-compatible JSON schema for this type.
    ///
    /// Strict mode requires:
    /// 1. `additionalProperties: false` on every object schema
    /// 2. every property listed in `required`, nullable ones included
    /// 3. no `$ref` indirection (definitions are inlined)
    fn response_schema() -> Value {
        let schema = schema_for!(Self);
        let mut value = serde_json::to_value(schema).unwrap_or_default();

        enforce_strict_objects(&mut value);
        inline_definitions(&mut value);

        if let Value::Object(map) = &mut value {
            map.remove("definitions");
            map.remove("$schema");
        }

        value
    }

    /// Schema name advertised to the provider.
    fn schema_name() -> String {
        <Self as JsonSchema>::schema_name()
    }

    /// Check constraints on a deserialized instance.
    ///
    /// Return `Err` with a human-readable reason to reject the response
    /// and trigger a retry.
    fn validate(&self) -> Result<(), String> {
        Ok(())
    }
}

/// Add `additionalProperties: false` and a complete `required` list to
/// every object schema, recursively.
fn enforce_strict_objects(value: &mut Value) {
    match value {
        Value::Object(map) => {
            if map.get("type") == Some(&Value::String("object".to_string())) {
                map.insert("additionalProperties".to_string(), Value::Bool(false));

                if let Some(Value::Object(props)) = map.get("properties") {
                    let all: Vec<Value> =
                        props.keys().map(|k| Value::String(k.clone())).collect();
                    map.insert("required".to_string(), Value::Array(all));
                }
            }

            for (_, v) in map.iter_mut() {
                enforce_strict_objects(v);
            }
        }
        Value::Array(items) => {
            for item in items.iter_mut() {
                enforce_strict_objects(item);
            }
        }
        _ => {}
    }
}

/// Replace `$ref` pointers with the referenced definition. Strict-mode
/// validators don't follow refs.
fn inline_definitions(value: &mut Value) {
    let definitions = match value {
        Value::Object(map) => map.get("definitions").cloned(),
        _ => None,
    };

    if let Some(defs) = definitions {
        inline_recursive(value, &defs);
    }
}

fn inline_recursive(value: &mut Value, definitions: &Value) {
    match value {
        Value::Object(map) => {
            if let Some(Value::String(path)) = map.get("$ref").cloned() {
                if let Some(name) = path.strip_prefix("#/definitions/") {
                    if let Some(def) = definitions.get(name) {
                        *value = def.clone();
                        // The inlined definition may itself hold refs.
                        inline_recursive(value, definitions);
                        return;
                    }
                }
            }

            for (_, v) in map.iter_mut() {
                inline_recursive(v, definitions);
            }
        }
        Value::Array(items) => {
            for item in items.iter_mut() {
                inline_recursive(item, definitions);
            }
        }
        _ => {}
    }
}
