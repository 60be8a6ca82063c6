pub mod human;

use serde_json::{Value, json};

/// Wrap a command result in the `{status, command, data, error}` envelope.
pub fn success(command: &str, data: Value) -> Value {
    json!({
        "status": "ok",
        "command": command,
        "data": data,
        "error": null
    })
}

/// Envelope for a failed command; `data` is always null.
pub fn error(command: &str, code: &str, message: &str) -> Value {
    json!({
        "status": "error",
        "command": command,
        "data": null,
        "error": {
            "code": code,
            "message": message
        }
    })
}
