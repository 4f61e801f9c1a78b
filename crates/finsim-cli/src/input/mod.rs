pub mod file;

use serde::de::DeserializeOwned;
use std::io::{self, Read};

/// Load a typed input from `--input <file>` or piped stdin.
///
/// Returns `Ok(None)` when neither is present so the caller can fall back to
/// individual flags.
pub fn read_input<T: DeserializeOwned>(
    path: Option<&str>,
) -> Result<Option<T>, Box<dyn std::error::Error>> {
    if let Some(path) = path {
        return Ok(Some(file::read_structured(path)?));
    }
    match read_piped()? {
        Some(text) => Ok(Some(file::parse_document(&text, file::Format::Json)?)),
        None => Ok(None),
    }
}

/// Piped stdin contents, or None when stdin is a TTY or empty.
fn read_piped() -> Result<Option<String>, Box<dyn std::error::Error>> {
    if atty::is(atty::Stream::Stdin) {
        return Ok(None);
    }

    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer)?;

    let trimmed = buffer.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    log::debug!("read {} bytes of input from stdin", trimmed.len());
    Ok(Some(trimmed.to_string()))
}
