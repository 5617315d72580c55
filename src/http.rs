//! Transport primitives for auth server calls.
//!
//! The shared request core produces an [`HttpRequest`] for every operation and decodes the
//! resulting [`HttpResponse`]. Executing the request is the only step that differs between the
//! async and blocking clients, so it is abstracted behind [`AuthHttpClient`] and
//! [`BlockingAuthHttpClient`]. Both carry crate-owned data only, which lets downstream crates
//! plug in a custom HTTP stack without depending on reqwest.

// std
#[cfg(feature = "reqwest")] use std::ops::Deref;
// crates.io
#[cfg(feature = "reqwest")] use reqwest::header::{ACCEPT, AUTHORIZATION};
// self
use crate::{_prelude::*, auth::TokenSecret, config::AuthorizationScheme};

/// Boxed `Send` future returned by [`AuthHttpClient::execute`].
pub type HttpFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a + Send>>;

/// `GET` request addressed to the auth server.
///
/// Every endpoint this client talks to is a read, so the method is implied.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpRequest {
	/// Fully resolved endpoint URL including the query string.
	pub url: Url,
	/// Token presented in the `Authorization` header, if the endpoint requires one.
	pub token: Option<TokenSecret>,
	/// Authorization header format.
	pub scheme: AuthorizationScheme,
	/// Timeout the transport should apply, passed through unmodified from configuration.
	pub timeout: Option<StdDuration>,
}
impl HttpRequest {
	/// Value for the `Authorization` header. Callers must avoid logging this string.
	pub fn authorization(&self) -> Option<String> {
		self.token.as_ref().map(|token| self.scheme.header_value(token))
	}
}

/// Raw response handed back to the shared decoding core.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpResponse {
	/// HTTP status code.
	pub status: u16,
	/// Response body bytes.
	pub body: Vec<u8>,
}
impl HttpResponse {
	/// Creates a response from a status and body.
	pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
		Self { status, body: body.into() }
	}

	/// Returns true for 2xx statuses.
	pub fn is_success(&self) -> bool {
		(200..300).contains(&self.status)
	}
}

/// Non-blocking transport used by [`AuthClient`](crate::client::AuthClient).
///
/// Implementations must be `Send + Sync + 'static` so one transport can back many cloned
/// clients, and the returned future must be `Send` so callers can spawn client calls onto
/// multi-threaded executors.
pub trait AuthHttpClient
where
	Self: 'static + Send + Sync,
{
	/// Concrete error emitted by the underlying transport.
	type TransportError: 'static + Send + Sync + StdError;

	/// Issues the `GET` request and returns the raw response, whatever its status.
	///
	/// Only failures that prevent a response from being received belong in the error path;
	/// HTTP error statuses are classified by the shared core.
	fn execute(
		&self,
		request: HttpRequest,
	) -> HttpFuture<'_, Result<HttpResponse, Self::TransportError>>;
}

/// Blocking transport used by [`BlockingAuthClient`](crate::blocking::BlockingAuthClient).
pub trait BlockingAuthHttpClient
where
	Self: 'static + Send + Sync,
{
	/// Concrete error emitted by the underlying transport.
	type TransportError: 'static + Send + Sync + StdError;

	/// Issues the `GET` request and returns the raw response, whatever its status.
	fn execute(&self, request: HttpRequest) -> Result<HttpResponse, Self::TransportError>;
}

/// Thin wrapper around [`ReqwestClient`] so shared HTTP behavior lives in one place.
#[cfg(feature = "reqwest")]
#[derive(Clone, Debug, Default)]
pub struct ReqwestHttpClient(pub ReqwestClient);
#[cfg(feature = "reqwest")]
impl ReqwestHttpClient {
	/// Wraps an existing reqwest [`ReqwestClient`].
	pub fn with_client(client: ReqwestClient) -> Self {
		Self(client)
	}
}
#[cfg(feature = "reqwest")]
impl AsRef<ReqwestClient> for ReqwestHttpClient {
	fn as_ref(&self) -> &ReqwestClient {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl Deref for ReqwestHttpClient {
	type Target = ReqwestClient;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl AuthHttpClient for ReqwestHttpClient {
	type TransportError = ReqwestError;

	fn execute(
		&self,
		request: HttpRequest,
	) -> HttpFuture<'_, Result<HttpResponse, Self::TransportError>> {
		Box::pin(async move {
			let authorization = request.authorization();
			let mut builder = self.0.get(request.url).header(ACCEPT, "application/json");

			if let Some(value) = authorization {
				builder = builder.header(AUTHORIZATION, value);
			}
			if let Some(timeout) = request.timeout {
				builder = builder.timeout(timeout);
			}

			let response = builder.send().await?;
			let status = response.status().as_u16();
			let body = response.bytes().await?.to_vec();

			Ok(HttpResponse { status, body })
		})
	}
}

/// Thin wrapper around reqwest's blocking client.
#[cfg(feature = "blocking")]
#[derive(Clone, Debug, Default)]
pub struct ReqwestBlockingHttpClient(pub reqwest::blocking::Client);
#[cfg(feature = "blocking")]
impl ReqwestBlockingHttpClient {
	/// Wraps an existing reqwest blocking client.
	pub fn with_client(client: reqwest::blocking::Client) -> Self {
		Self(client)
	}
}
#[cfg(feature = "blocking")]
impl Deref for ReqwestBlockingHttpClient {
	type Target = reqwest::blocking::Client;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}
#[cfg(feature = "blocking")]
impl BlockingAuthHttpClient for ReqwestBlockingHttpClient {
	type TransportError = ReqwestError;

	fn execute(&self, request: HttpRequest) -> Result<HttpResponse, Self::TransportError> {
		let authorization = request.authorization();
		let mut builder = self.0.get(request.url).header(ACCEPT, "application/json");

		if let Some(value) = authorization {
			builder = builder.header(AUTHORIZATION, value);
		}
		if let Some(timeout) = request.timeout {
			builder = builder.timeout(timeout);
		}

		let response = builder.send()?;
		let status = response.status().as_u16();
		let body = response.bytes()?.to_vec();

		Ok(HttpResponse { status, body })
	}
}
