//! Client configuration and its validating builder.

// self
use crate::{_prelude::*, auth::TokenSecret, error::ConfigError};

/// How the token is presented in the `Authorization` header.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum AuthorizationScheme {
	/// Send the token as-is, the convention of the KBase auth server.
	#[default]
	Raw,
	/// Send `Bearer <token>`.
	Bearer,
}
impl AuthorizationScheme {
	/// Formats the header value for `token`.
	pub fn header_value(self, token: &TokenSecret) -> String {
		match self {
			Self::Raw => token.expose().to_owned(),
			Self::Bearer => format!("Bearer {}", token.expose()),
		}
	}
}

/// Immutable client configuration.
///
/// The base URL always ends with `/` so endpoint paths join beneath it instead of replacing its
/// last segment.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
	/// Normalized base URL of the auth service, e.g. `https://kbase.us/services/auth/`.
	pub base_url: Url,
	/// Token used when a call does not supply one.
	pub default_token: Option<TokenSecret>,
	/// Timeout passed through to the transport for every request.
	pub timeout: Option<StdDuration>,
	/// Authorization header format.
	pub scheme: AuthorizationScheme,
}
impl ClientConfig {
	/// Starts a builder for the provided base URL.
	pub fn builder(base_url: impl Into<String>) -> ClientConfigBuilder {
		ClientConfigBuilder::new(base_url)
	}

	/// Builds a configuration with only a base URL.
	pub fn new(base_url: impl Into<String>) -> Result<Self, ConfigError> {
		Self::builder(base_url).build()
	}

	/// Picks the per-call token, falling back to the default token.
	pub fn resolve_token(&self, token: Option<&str>) -> Result<TokenSecret, ConfigError> {
		match token {
			Some(value) => TokenSecret::new(value),
			None => self.default_token.clone().ok_or(ConfigError::MissingToken),
		}
	}
}

/// Builder for [`ClientConfig`] values.
#[derive(Debug)]
pub struct ClientConfigBuilder {
	/// Raw base URL, validated on [`build`](Self::build).
	pub base_url: String,
	/// Raw default token, validated on [`build`](Self::build).
	pub default_token: Option<String>,
	/// Optional request timeout.
	pub timeout: Option<StdDuration>,
	/// Authorization header format.
	pub scheme: AuthorizationScheme,
}
impl ClientConfigBuilder {
	fn new(base_url: impl Into<String>) -> Self {
		Self {
			base_url: base_url.into(),
			default_token: None,
			timeout: None,
			scheme: AuthorizationScheme::default(),
		}
	}

	/// Sets the token used when calls do not supply one.
	pub fn default_token(mut self, token: impl Into<String>) -> Self {
		self.default_token = Some(token.into());

		self
	}

	/// Sets the timeout passed through to the transport.
	pub fn timeout(mut self, timeout: StdDuration) -> Self {
		self.timeout = Some(timeout);

		self
	}

	/// Overrides the authorization header format.
	pub fn scheme(mut self, scheme: AuthorizationScheme) -> Self {
		self.scheme = scheme;

		self
	}

	/// Validates inputs and returns the configuration.
	pub fn build(self) -> Result<ClientConfig, ConfigError> {
		let base_url = normalize_base_url(&self.base_url)?;
		let default_token = self.default_token.map(TokenSecret::new).transpose()?;

		Ok(ClientConfig { base_url, default_token, timeout: self.timeout, scheme: self.scheme })
	}
}

fn normalize_base_url(raw: &str) -> Result<Url, ConfigError> {
	let trimmed = raw.trim();

	if trimmed.is_empty() {
		return Err(ConfigError::MissingBaseUrl);
	}

	let mut url = Url::parse(trimmed).map_err(|source| ConfigError::InvalidBaseUrl { source })?;

	if !matches!(url.scheme(), "http" | "https") {
		return Err(ConfigError::UnsupportedScheme { scheme: url.scheme().to_owned() });
	}
	if !url.path().ends_with('/') {
		let path = format!("{}/", url.path());

		url.set_path(&path);
	}

	url.set_query(None);
	url.set_fragment(None);

	Ok(url)
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn base_url_gains_trailing_slash() {
		let config = ClientConfig::new("https://kbase.us/services/auth")
			.expect("Base URL fixture should be valid.");

		assert_eq!(config.base_url.as_str(), "https://kbase.us/services/auth/");

		let config = ClientConfig::new("  http://localhost:5000/testmode/ ")
			.expect("Padded base URL should be accepted.");

		assert_eq!(config.base_url.as_str(), "http://localhost:5000/testmode/");
	}

	#[test]
	fn invalid_base_urls_fail_fast() {
		assert!(matches!(ClientConfig::new(""), Err(ConfigError::MissingBaseUrl)));
		assert!(matches!(ClientConfig::new("  \t  "), Err(ConfigError::MissingBaseUrl)));
		assert!(matches!(ClientConfig::new("not a url"), Err(ConfigError::InvalidBaseUrl { .. })));
		assert!(matches!(
			ClientConfig::new("ftp://example.com/auth"),
			Err(ConfigError::UnsupportedScheme { scheme }) if scheme == "ftp"
		));
	}

	#[test]
	fn token_resolution_prefers_call_token() {
		let config = ClientConfig::builder("https://example.com/auth")
			.default_token("default")
			.timeout(StdDuration::from_secs(3))
			.build()
			.expect("Config fixture should build.");

		assert_eq!(config.timeout, Some(StdDuration::from_secs(3)));
		assert_eq!(
			config.resolve_token(Some("explicit")).expect("Explicit token should resolve.").expose(),
			"explicit"
		);
		assert_eq!(
			config.resolve_token(None).expect("Default token should resolve.").expose(),
			"default"
		);
		assert!(matches!(config.resolve_token(Some(" ")), Err(ConfigError::BlankToken)));

		let bare = ClientConfig::new("https://example.com/auth").expect("Config should build.");

		assert!(matches!(bare.resolve_token(None), Err(ConfigError::MissingToken)));
	}

	#[test]
	fn blank_default_token_is_rejected() {
		let err = ClientConfig::builder("https://example.com/auth")
			.default_token("   ")
			.build()
			.expect_err("Blank default token should be rejected.");

		assert!(matches!(err, ConfigError::BlankToken));
	}

	#[test]
	fn bearer_scheme_prefixes_token() {
		let token = TokenSecret::new("abc").expect("Token fixture should be valid.");

		assert_eq!(AuthorizationScheme::Raw.header_value(&token), "abc");
		assert_eq!(AuthorizationScheme::Bearer.header_value(&token), "Bearer abc");
	}
}
