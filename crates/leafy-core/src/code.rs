use crate::error::LinkError;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// A short code identifying a stored link.
///
/// Codes are case-sensitive and compared byte for byte. Caller-supplied codes
/// must be non-empty, printable ASCII and free of the path and query
/// delimiters `/`, `?` and `#`, so that every stored code can be looked up
/// from a request path.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LinkCode(String);

impl LinkCode {
    /// Creates a new `LinkCode` after validating the input.
    pub fn new(code: impl Into<String>) -> std::result::Result<Self, LinkError> {
        let code = code.into();
        Self::validate(&code)?;
        Ok(Self(code))
    }

    /// Creates a `LinkCode` without validation.
    ///
    /// Use this only for codes produced by trusted internal sources
    /// (e.g. generators that are guaranteed to produce valid output).
    pub fn new_unchecked(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    /// Extracts a candidate code from a request path such as `/abc1234?ref=x`.
    ///
    /// The query-string suffix and a single leading `/` are removed; nothing
    /// else is trimmed or decoded. Returns `None` when nothing is left.
    pub fn from_request_path(path: &str) -> Option<Self> {
        let path = path.split_once('?').map_or(path, |(path, _)| path);
        let code = path.strip_prefix('/').unwrap_or(path);
        if code.is_empty() {
            return None;
        }
        Some(Self(code.to_owned()))
    }

    /// Generates the full shortened URL based on the provided base URL.
    pub fn to_url(&self, base_url: &str) -> String {
        format!("{}/{}", base_url.trim_end_matches('/'), self.0)
    }

    /// Returns the short code as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn validate(code: &str) -> std::result::Result<(), LinkError> {
        if code.is_empty() {
            return Err(LinkError::InvalidCode("must not be empty".to_string()));
        }

        if let Some(c) = code
            .chars()
            .find(|c| !c.is_ascii_graphic() || matches!(c, '/' | '?' | '#'))
        {
            return Err(LinkError::InvalidCode(format!(
                "character {c:?} is not allowed in '{code}'"
            )));
        }

        Ok(())
    }
}

impl Display for LinkCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for LinkCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
