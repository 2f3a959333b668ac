//! Path-tracking walker over raw JSON payloads.
//!
//! Every document and slice schema validates through a [`Checker`]: field
//! accessors record a diagnostic (with the full field path) instead of
//! bailing out, so one pass reports every problem in the payload.

use super::diag::{SchemaDiagnostics, SchemaError};
use serde_json::{Map, Value};
use std::fmt::Write as _;

/// Human-readable JSON kind for error messages.
pub(crate) fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Walks a raw payload, accumulating diagnostics with full field paths.
pub(crate) struct Checker {
    path: String,
    diag: SchemaDiagnostics,
}

impl Checker {
    pub fn new() -> Self {
        Self {
            path: String::new(),
            diag: SchemaDiagnostics::new(),
        }
    }

    /// Finish validation: Err with every collected diagnostic, Ok if clean.
    pub fn finish(self) -> Result<(), SchemaError> {
        self.diag.into_result().map_err(SchemaError::Mismatch)
    }

    /// Consumes the checker and the typed value it produced. Fails when any
    /// diagnostic was recorded, or when no value could be built at all.
    pub fn finish_with<T>(mut self, value: Option<T>) -> Result<T, SchemaError> {
        match value {
            Some(v) if self.diag.is_empty() => Ok(v),
            other => {
                if self.diag.is_empty() && other.is_none() {
                    self.diag.error("document", "payload could not be validated");
                }
                Err(SchemaError::Mismatch(self.diag))
            }
        }
    }

    // ========================================================================
    // path scoping
    // ========================================================================

    fn joined(&self, key: &str) -> String {
        if self.path.is_empty() {
            key.to_string()
        } else {
            format!("{}.{}", self.path, key)
        }
    }

    /// Run `f` with `seg` appended to the current path (dot-separated).
    pub fn scoped<T>(&mut self, seg: &str, f: impl FnOnce(&mut Self) -> T) -> T {
        let prev = self.path.len();
        if !self.path.is_empty() {
            self.path.push('.');
        }
        self.path.push_str(seg);
        let out = f(self);
        self.path.truncate(prev);
        out
    }

    /// Run `f` with `[idx]` appended to the current path.
    pub fn indexed<T>(&mut self, idx: usize, f: impl FnOnce(&mut Self) -> T) -> T {
        let prev = self.path.len();
        let _ = write!(self.path, "[{idx}]");
        let out = f(self);
        self.path.truncate(prev);
        out
    }

    // ========================================================================
    // diagnostics
    // ========================================================================

    /// Record an error for `key` under the current path.
    pub fn error(&mut self, key: &str, message: impl Into<String>) {
        let path = self.joined(key);
        self.diag.error(path, message);
    }

    /// Record an error with a hint for `key` under the current path.
    pub fn error_with_hint(
        &mut self,
        key: &str,
        message: impl Into<String>,
        hint: impl Into<String>,
    ) {
        let path = self.joined(key);
        self.diag.error_with_hint(path, message, hint);
    }

    /// Record an error at the current path itself.
    pub fn error_here(&mut self, message: impl Into<String>) {
        let path = if self.path.is_empty() {
            "document".to_string()
        } else {
            self.path.clone()
        };
        self.diag.error(path, message);
    }

    // ========================================================================
    // field accessors
    // ========================================================================

    /// The value at the current path must be an object.
    pub fn object<'v>(&mut self, value: &'v Value) -> Option<&'v Map<String, Value>> {
        match value {
            Value::Object(map) => Some(map),
            other => {
                self.error_here(format!("expected an object, found {}", kind_of(other)));
                None
            }
        }
    }

    /// Required string field. Missing, null, or non-string is an error.
    pub fn req_str(&mut self, obj: &Map<String, Value>, key: &str) -> Option<String> {
        match obj.get(key) {
            Some(Value::String(s)) => Some(s.clone()),
            Some(Value::Null) | None => {
                self.error(key, "required string is missing");
                None
            }
            Some(other) => {
                self.error(key, format!("expected a string, found {}", kind_of(other)));
                None
            }
        }
    }

    /// Optional string field. Missing or null is fine; wrong type is an error.
    pub fn opt_str(&mut self, obj: &Map<String, Value>, key: &str) -> Option<String> {
        match obj.get(key) {
            Some(Value::String(s)) => Some(s.clone()),
            Some(Value::Null) | None => None,
            Some(other) => {
                self.error(key, format!("expected a string, found {}", kind_of(other)));
                None
            }
        }
    }

    /// Optional integer field.
    pub fn opt_int(&mut self, obj: &Map<String, Value>, key: &str) -> Option<i64> {
        match obj.get(key) {
            Some(Value::Number(n)) => match n.as_i64() {
                Some(i) => Some(i),
                None => {
                    self.error(key, "expected an integer");
                    None
                }
            },
            Some(Value::Null) | None => None,
            Some(other) => {
                self.error(key, format!("expected a number, found {}", kind_of(other)));
                None
            }
        }
    }

    /// Optional non-negative integer that fits in u32 (image dimensions).
    /// Required unsigned integer field.
    pub fn req_u32(&mut self, obj: &Map<String, Value>, key: &str) -> Option<u32> {
        match obj.get(key) {
            Some(Value::Null) | None => {
                self.error(key, "required number is missing");
                None
            }
            Some(_) => self.opt_u32(obj, key),
        }
    }

    pub fn opt_u32(&mut self, obj: &Map<String, Value>, key: &str) -> Option<u32> {
        let n = self.opt_int(obj, key)?;
        match u32::try_from(n) {
            Ok(v) => Some(v),
            Err(_) => {
                self.error(key, format!("value {n} is out of range"));
                None
            }
        }
    }

    /// Non-null raw value for `key`, for nested checks.
    pub fn opt_field<'v>(&self, obj: &'v Map<String, Value>, key: &str) -> Option<&'v Value> {
        match obj.get(key) {
            Some(Value::Null) | None => None,
            Some(v) => Some(v),
        }
    }

    /// Required array field, each element mapped through `f`.
    ///
    /// A missing array is an error; elements that fail `f` are dropped
    /// (their diagnostics are already recorded).
    pub fn arr<T>(
        &mut self,
        obj: &Map<String, Value>,
        key: &str,
        f: impl FnMut(&mut Self, &Value) -> Option<T>,
    ) -> Vec<T> {
        match obj.get(key) {
            Some(Value::Array(items)) => self.each(key, items, f),
            Some(Value::Null) | None => {
                self.error(key, "required list is missing");
                Vec::new()
            }
            Some(other) => {
                self.error(key, format!("expected an array, found {}", kind_of(other)));
                Vec::new()
            }
        }
    }

    /// Optional array field: missing or null is an empty list.
    pub fn opt_arr<T>(
        &mut self,
        obj: &Map<String, Value>,
        key: &str,
        f: impl FnMut(&mut Self, &Value) -> Option<T>,
    ) -> Vec<T> {
        match obj.get(key) {
            Some(Value::Array(items)) => self.each(key, items, f),
            Some(Value::Null) | None => Vec::new(),
            Some(other) => {
                self.error(key, format!("expected an array, found {}", kind_of(other)));
                Vec::new()
            }
        }
    }

    fn each<T>(
        &mut self,
        key: &str,
        items: &[Value],
        mut f: impl FnMut(&mut Self, &Value) -> Option<T>,
    ) -> Vec<T> {
        self.scoped(key, |c| {
            let mut out = Vec::with_capacity(items.len());
            for (i, item) in items.iter().enumerate() {
                if let Some(v) = c.indexed(i, |c| f(c, item)) {
                    out.push(v);
                }
            }
            out
        })
    }

    /// Raw passthrough of an array field (kept as-is, order preserved).
    pub fn raw_items(&mut self, obj: &Map<String, Value>, key: &str) -> Vec<Value> {
        match obj.get(key) {
            Some(Value::Array(items)) => items.clone(),
            Some(Value::Null) | None => {
                self.error(key, "required list is missing");
                Vec::new()
            }
            Some(other) => {
                self.error(key, format!("expected an array, found {}", kind_of(other)));
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_paths_include_indices() {
        let mut c = Checker::new();
        let value = json!({ "items": [{"label": 1}] });
        let obj = value.as_object().unwrap();
        let _ = c.scoped("data", |c| {
            c.arr(obj, "items", |c, item| {
                let obj = c.object(item)?;
                c.opt_str(obj, "label")
            })
        });
        let err = c.finish().unwrap_err();
        let display = format!("{err}");
        assert!(display.contains("data.items[0].label"), "{display}");
    }

    #[test]
    fn test_collects_multiple_errors() {
        let mut c = Checker::new();
        let value = json!({ "id": 7 });
        let obj = value.as_object().unwrap();
        let _ = c.req_str(obj, "id");
        let _ = c.req_str(obj, "uid");
        match c.finish() {
            Err(SchemaError::Mismatch(diag)) => assert_eq!(diag.len(), 2),
            other => panic!("expected mismatch, got {other:?}"),
        }
    }

    #[test]
    fn test_optional_fields_accept_null() {
        let mut c = Checker::new();
        let value = json!({ "client": null });
        let obj = value.as_object().unwrap();
        assert_eq!(c.opt_str(obj, "client"), None);
        assert_eq!(c.opt_int(obj, "year"), None);
        assert!(c.finish().is_ok());
    }
}
