//! URL shape validation, run before any network traffic.

use lazy_static::lazy_static;
use regex::Regex;
use thiserror::Error;

lazy_static! {
    static ref URL_PATTERN: Regex =
        Regex::new(r"^(https?://)?([\w\-]+\.)+[\w\-]+(/[\w\-.,@?^=%&:/~+#]*)?$")
            .expect("URL pattern is a valid regex");
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum InputError {
    #[error("not a URL: {0:?}")]
    MalformedUrl(String),
}

/// Check `input` against the generic URL shape and return it with a scheme.
///
/// Scheme-less input such as `example.com/page` is normalised to `https://`.
pub fn validate_url(input: &str) -> Result<String, InputError> {
    let trimmed = input.trim();
    if !URL_PATTERN.is_match(trimmed) {
        return Err(InputError::MalformedUrl(input.to_string()));
    }

    if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        Ok(trimmed.to_string())
    } else {
        Ok(format!("https://{trimmed}"))
    }
}
