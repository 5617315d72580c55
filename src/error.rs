//! Client-level error types shared across the async and blocking clients.

// self
use crate::{_prelude::*, auth::IdentifierError};

/// Client-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical client error exposed by public APIs.
///
/// Variants fall into three groups: [`Error::Config`] is raised before any network activity,
/// [`Error::InvalidToken`], [`Error::InvalidUser`], and [`Error::Server`] are reported by the
/// auth server, and [`Error::Transport`] covers everything that prevented the client from
/// reaching or understanding the server.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Local configuration problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Network, timeout, or response decoding failure.
	#[error(transparent)]
	Transport(#[from] TransportError),
	/// Auth server returned an error that has no dedicated variant.
	#[error(transparent)]
	Server(#[from] ServerError),

	/// Auth server reported that the token is invalid, expired, or lacks access.
	#[error("Auth server reported the token is invalid: {message}.")]
	InvalidToken {
		/// Server-supplied message.
		message: String,
		/// HTTP status code of the response.
		status: u16,
		/// Application error code, when the body carried one.
		appcode: Option<u32>,
	},
	/// Auth server rejected one of the requested user names as illegal.
	#[error("Auth server rejected the user name: {message}.")]
	InvalidUser {
		/// Server-supplied message with the error-code prefixes removed.
		message: String,
		/// HTTP status code of the response.
		status: u16,
		/// Application error code, when the body carried one.
		appcode: Option<u32>,
	},
}
impl Error {
	/// Returns true when the auth server itself reported the failure.
	pub fn is_server_reported(&self) -> bool {
		matches!(self, Self::Server(_) | Self::InvalidToken { .. } | Self::InvalidUser { .. })
	}

	/// Returns true when the failure happened while reaching or decoding the server response.
	pub fn is_transport(&self) -> bool {
		matches!(self, Self::Transport(_))
	}

	/// Returns true when the failure was detected locally before any request was sent.
	pub fn is_config(&self) -> bool {
		matches!(self, Self::Config(_))
	}

	/// HTTP status code associated with the failure, when a response was received.
	pub fn status(&self) -> Option<u16> {
		match self {
			Self::Server(err) => Some(err.status),
			Self::InvalidToken { status, .. } | Self::InvalidUser { status, .. } => Some(*status),
			Self::Transport(err) => err.status(),
			Self::Config(_) => None,
		}
	}
}

/// Error body reported by the auth server for a non-success response.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
#[error("Auth server returned HTTP {status}: {message}.")]
pub struct ServerError {
	/// Application error code, when the body carried one.
	pub appcode: Option<u32>,
	/// Human-readable message supplied by the server.
	pub message: String,
	/// HTTP status code of the response.
	pub status: u16,
}

/// Configuration and validation failures raised before any request is sent.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
	/// Base URL was empty or whitespace only.
	#[error("Base URL is required and cannot be a whitespace only string.")]
	MissingBaseUrl,
	/// Base URL cannot be parsed.
	#[error("Base URL is invalid.")]
	InvalidBaseUrl {
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// Base URL uses a scheme other than `http` or `https`.
	#[error("Base URL must use http or https, found `{scheme}`.")]
	UnsupportedScheme {
		/// Offending scheme.
		scheme: String,
	},
	/// Neither a per-call token nor a default token was supplied.
	#[error("A token is required but none was supplied and no default token is configured.")]
	MissingToken,
	/// Supplied token was empty or whitespace only.
	#[error("Token cannot be an empty or whitespace only string.")]
	BlankToken,
	/// User-name lookup was requested without any names.
	#[error("At least one user name is required.")]
	NoUserNames,
	/// A requested user name failed local validation.
	#[error("User name is invalid.")]
	InvalidUserName(#[from] IdentifierError),
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for ConfigError {
	fn from(e: ReqwestError) -> Self {
		Self::http_client_build(e)
	}
}

/// Failures that prevented the client from reaching or understanding the auth server.
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling the auth server.")]
	Network {
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// Request exceeded the configured timeout.
	#[error("Request to the auth server timed out.")]
	Timeout {
		/// Transport-specific timeout error.
		#[source]
		source: BoxError,
	},
	/// Underlying IO failure surfaced during transport.
	#[error("I/O error occurred while calling the auth server.")]
	Io(#[from] std::io::Error),
	/// Response body was not JSON.
	#[error("Non-JSON response from auth server, status code: {status}.")]
	NonJson {
		/// HTTP status code of the response.
		status: u16,
		/// Truncated preview of the response body.
		preview: String,
	},
	/// Response body was JSON but did not match the expected shape.
	#[error("Auth server returned malformed JSON.")]
	Parse {
		/// Structured parsing failure including the offending field path.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
		/// HTTP status code of the response.
		status: u16,
	},
	/// Service at the configured URL is not the auth service.
	#[error("The service at url {url} is not the KBase auth service.")]
	UnexpectedService {
		/// Configured base URL.
		url: String,
		/// Service name reported by the server.
		service: String,
	},
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Network { source: Box::new(src) }
	}

	/// Wraps a transport-specific timeout error.
	pub fn timeout(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Timeout { source: Box::new(src) }
	}

	/// HTTP status code of the response that failed to decode, if any.
	pub fn status(&self) -> Option<u16> {
		match self {
			Self::NonJson { status, .. } | Self::Parse { status, .. } => Some(*status),
			_ => None,
		}
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for TransportError {
	fn from(e: ReqwestError) -> Self {
		Self::network(e)
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn classification_helpers_partition_variants() {
		let server: Error =
			ServerError { appcode: Some(10000), message: "boom".into(), status: 500 }.into();

		assert!(server.is_server_reported());
		assert_eq!(server.status(), Some(500));

		let invalid =
			Error::InvalidToken { message: "Invalid token".into(), status: 401, appcode: None };

		assert!(invalid.is_server_reported());
		assert!(!invalid.is_transport());

		let config: Error = ConfigError::MissingToken.into();

		assert!(config.is_config());
		assert_eq!(config.status(), None);

		let transport: Error = TransportError::NonJson { status: 502, preview: "<html>".into() }.into();

		assert!(transport.is_transport());
		assert!(!transport.is_server_reported());
		assert_eq!(transport.status(), Some(502));
	}

	#[test]
	fn non_json_message_mentions_status() {
		let err = TransportError::NonJson { status: 404, preview: String::new() };

		assert_eq!(err.to_string(), "Non-JSON response from auth server, status code: 404.");
	}
}
