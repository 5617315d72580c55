//! Token wrapper that redacts sensitive material.

// self
use crate::{_prelude::*, error::ConfigError};

/// Redacted auth token keeping sensitive material out of logs.
///
/// The client never interprets the value; the auth server is the sole authority on validity.
#[derive(Clone, PartialEq, Eq)]
pub struct TokenSecret(String);
impl TokenSecret {
	/// Wraps a token after trimming surrounding whitespace.
	///
	/// Empty or whitespace-only tokens are rejected with [`ConfigError::BlankToken`].
	pub fn new(value: impl AsRef<str>) -> Result<Self, ConfigError> {
		let trimmed = value.as_ref().trim();

		if trimmed.is_empty() {
			return Err(ConfigError::BlankToken);
		}

		Ok(Self(trimmed.to_owned()))
	}

	/// Returns the inner token value. Callers must avoid logging this string.
	pub fn expose(&self) -> &str {
		&self.0
	}
}
impl AsRef<str> for TokenSecret {
	fn as_ref(&self) -> &str {
		self.expose()
	}
}
impl Debug for TokenSecret {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_tuple("TokenSecret").field(&"<redacted>").finish()
	}
}
impl Display for TokenSecret {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("<redacted>")
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn secret_formatters_redact() {
		let secret = TokenSecret::new("super-secret").expect("Token fixture should be valid.");

		assert_eq!(format!("{secret:?}"), "TokenSecret(\"<redacted>\")");
		assert_eq!(format!("{secret}"), "<redacted>");
	}

	#[test]
	fn blank_tokens_are_rejected_and_values_trimmed() {
		assert!(matches!(TokenSecret::new("  \t "), Err(ConfigError::BlankToken)));
		assert!(matches!(TokenSecret::new(""), Err(ConfigError::BlankToken)));

		let secret = TokenSecret::new("  abc  ").expect("Padded token should be accepted.");

		assert_eq!(secret.expose(), "abc");
	}
}
