//! Typed async and blocking client for the KBase Authentication service: token introspection,
//! user-name lookup, and role retrieval with precise error mapping.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod api;
pub mod auth;
pub mod blocking;
pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod obs;
#[cfg(all(any(test, feature = "test"), feature = "reqwest"))]
pub mod _preludet {
	//! Convenience re-exports and helpers for integration tests; enabled via `cfg(test)` or the
	//! `test` crate feature.

	pub use crate::_prelude::*;

	// self
	#[cfg(feature = "blocking")]
	use crate::{blocking::ReqwestBlockingAuthClient, http::ReqwestBlockingHttpClient};
	use crate::{
		api::ReqwestTransportErrorMapper, client::ReqwestAuthClient, config::ClientConfig,
		http::ReqwestHttpClient,
	};

	/// Token accepted by the mock servers used across integration tests.
	pub const TEST_TOKEN: &str = "TESTTOKEN0123456789ABCDEF";

	/// Builds a client configuration pointing at `base_url`, optionally carrying a default token.
	pub fn test_config(base_url: &str, default_token: Option<&str>) -> ClientConfig {
		let mut builder = ClientConfig::builder(base_url);

		if let Some(token) = default_token {
			builder = builder.default_token(token);
		}

		builder.build().expect("Failed to build test client configuration.")
	}

	/// Builds a reqwest HTTP client that accepts the self-signed certificates produced by
	/// `httpmock` during tests.
	pub fn test_reqwest_http_client() -> ReqwestHttpClient {
		let client = ReqwestClient::builder()
			.danger_accept_invalid_certs(true)
			.danger_accept_invalid_hostnames(true)
			.build()
			.expect("Failed to build insecure Reqwest client for tests.");

		ReqwestHttpClient::with_client(client)
	}

	/// Blocking counterpart of [`test_reqwest_http_client`].
	#[cfg(feature = "blocking")]
	pub fn test_reqwest_blocking_http_client() -> ReqwestBlockingHttpClient {
		let client = reqwest::blocking::Client::builder()
			.danger_accept_invalid_certs(true)
			.danger_accept_invalid_hostnames(true)
			.build()
			.expect("Failed to build insecure blocking Reqwest client for tests.");

		ReqwestBlockingHttpClient::with_client(client)
	}

	/// Wraps `config` in an async client backed by the insecure test transport.
	pub fn reqwest_test_client(config: ClientConfig) -> ReqwestAuthClient {
		ReqwestAuthClient::with_http_client(
			config,
			test_reqwest_http_client(),
			ReqwestTransportErrorMapper,
		)
	}

	/// Wraps `config` in a blocking client backed by the insecure test transport.
	#[cfg(feature = "blocking")]
	pub fn reqwest_blocking_test_client(config: ClientConfig) -> ReqwestBlockingAuthClient {
		ReqwestBlockingAuthClient::with_http_client(
			config,
			test_reqwest_blocking_http_client(),
			ReqwestTransportErrorMapper,
		)
	}

	/// Constructs an async client backed by the reqwest transport used across integration tests.
	pub fn build_reqwest_test_client(
		base_url: &str,
		default_token: Option<&str>,
	) -> ReqwestAuthClient {
		reqwest_test_client(test_config(base_url, default_token))
	}

	/// Constructs a blocking client backed by the reqwest transport used across integration
	/// tests.
	#[cfg(feature = "blocking")]
	pub fn build_reqwest_blocking_test_client(
		base_url: &str,
		default_token: Option<&str>,
	) -> ReqwestBlockingAuthClient {
		reqwest_blocking_test_client(test_config(base_url, default_token))
	}
}

mod _prelude {
	pub use std::{
		collections::{BTreeMap, BTreeSet},
		error::Error as StdError,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		pin::Pin,
		str::FromStr,
		sync::Arc,
		time::Duration as StdDuration,
	};

	#[cfg(feature = "reqwest")]
	pub use reqwest::{Client as ReqwestClient, Error as ReqwestError};
	pub use serde::{Deserialize, Serialize};
	pub use thiserror::Error as ThisError;
	pub use time::{Duration, OffsetDateTime};
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

#[cfg(feature = "reqwest")] pub use reqwest;
pub use url;
#[cfg(test)] use {color_eyre as _, httpmock as _, tokio as _};
