pub mod file;
pub mod stdin;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use property_returns_core::parse::unknown_fields;

/// Load typed input from `--input <file>` or, failing that, piped stdin.
pub fn read_input<T: DeserializeOwned + Serialize>(
    path: Option<&str>,
    what: &str,
) -> Result<T, Box<dyn std::error::Error>> {
    let raw: Value = if let Some(path) = path {
        file::read_input_file(path)?
    } else if let Some(data) = stdin::read_stdin()? {
        data
    } else {
        return Err(format!("--input <file.json|file.yaml> or stdin required for {what}").into());
    };
    decode(&raw, what)
}

/// Deserialise, warning about any keys the model does not recognise.
fn decode<T: DeserializeOwned + Serialize>(
    raw: &Value,
    what: &str,
) -> Result<T, Box<dyn std::error::Error>> {
    let parsed = T::deserialize(raw)?;
    for key in unknown_fields(raw, &parsed)? {
        log::warn!("ignoring unrecognised {what} input field '{key}'");
    }
    Ok(parsed)
}
