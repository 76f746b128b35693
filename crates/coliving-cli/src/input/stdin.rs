use serde::de::DeserializeOwned;
use std::io::{self, Read};

/// Piped JSON document, deserialized straight into the command's input type.
///
/// `None` on an interactive terminal or blank input.
pub fn read_piped<T: DeserializeOwned>() -> Result<Option<T>, Box<dyn std::error::Error>> {
    if atty::is(atty::Stream::Stdin) {
        return Ok(None);
    }

    let mut raw = String::new();
    io::stdin().lock().read_to_string(&mut raw)?;
    if raw.trim().is_empty() {
        return Ok(None);
    }

    Ok(Some(serde_json::from_str(raw.trim())?))
}
