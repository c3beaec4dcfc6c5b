pub mod human;

use serde::Serialize;
use serde_json::{Value, json};

use crate::error::error_code;

/// JSON envelope for a successful command.
pub fn success(command: &str, data: Value) -> Value {
    json!({
        "status": "ok",
        "command": command,
        "data": data,
        "error": null
    })
}

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

/// Error envelope whose code reflects the typed engine outcome, if any.
pub fn failure(command: &str, err: &anyhow::Error) -> Value {
    error(command, error_code(err), &format!("{:#}", err))
}

/// Serialize `data` into a success envelope and print it on stdout.
pub fn print_success<T: Serialize>(command: &str, data: &T) -> anyhow::Result<()> {
    let out = success(command, serde_json::to_value(data)?);
    println!("{}", serde_json::to_string(&out)?);
    Ok(())
}
