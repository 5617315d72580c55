//! Shared request-building and response-decoding core.
//!
//! Every client operation is expressed as a [`Call`]: the [`HttpRequest`] to send plus a decoder
//! for the [`HttpResponse`]. The async and blocking clients only differ in how they execute the
//! request, so token resolution, URL construction, status classification, and JSON decoding all
//! live here.

pub mod response;

mod mapper;

pub use mapper::*;
pub use response::ServiceInfo;

// self
use crate::{
	_prelude::*,
	auth::{RoleSet, TokenInfo, TokenSecret, User, UserIdentity, UserName},
	config::ClientConfig,
	error::{ConfigError, TransportError},
	http::{HttpRequest, HttpResponse},
};

/// Service name the auth server reports at its root endpoint.
pub const AUTH_SERVICE_NAME: &str = "Authentication Service";

type Decoder<T> = Box<dyn FnOnce(HttpResponse) -> Result<T> + Send>;

/// Auth server REST endpoints used by the client.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Endpoint {
	/// Service root reporting name and version.
	Root,
	/// Token introspection.
	Token,
	/// Identity and roles of the token's user.
	Me,
	/// Batched user-name lookup.
	Users,
}
impl Endpoint {
	/// Path relative to the normalized base URL.
	pub const fn path(self) -> &'static str {
		match self {
			Endpoint::Root => "",
			Endpoint::Token => "api/V2/token",
			Endpoint::Me => "api/V2/me",
			Endpoint::Users => "api/V2/users/",
		}
	}

	/// Resolves the endpoint against the configured base URL.
	pub fn url(self, config: &ClientConfig) -> Result<Url> {
		config
			.base_url
			.join(self.path())
			.map_err(|source| ConfigError::InvalidBaseUrl { source }.into())
	}
}

/// A single prepared request and the decoder for its response.
pub(crate) struct Call<T> {
	pub(crate) request: HttpRequest,
	pub(crate) decode: Decoder<T>,
}
impl<T> Call<T>
where
	T: 'static,
{
	fn new(
		request: HttpRequest,
		decode: impl 'static + Send + FnOnce(HttpResponse) -> Result<T>,
	) -> Self {
		Self { request, decode: Box::new(decode) }
	}

	/// Post-processes the decoded value.
	pub(crate) fn map<U>(self, f: impl 'static + Send + FnOnce(T) -> Result<U>) -> Call<U>
	where
		U: 'static,
	{
		let Self { request, decode } = self;

		Call { request, decode: Box::new(move |response| decode(response).and_then(f)) }
	}
}
impl Call<ServiceInfo> {
	pub(crate) fn service_info(config: &ClientConfig) -> Result<Self> {
		let request = request(config, Endpoint::Root, None)?;

		Ok(Self::new(request, response::decode_json))
	}

	/// Like [`service_info`](Self::service_info), but fails unless the server is the auth
	/// service.
	pub(crate) fn verified_service_info(config: &ClientConfig) -> Result<Self> {
		let url = config.base_url.to_string();

		Ok(Self::service_info(config)?.map(move |info| {
			if info.servicename == AUTH_SERVICE_NAME {
				Ok(info)
			} else {
				Err(TransportError::UnexpectedService { url, service: info.servicename }.into())
			}
		}))
	}
}
impl Call<TokenInfo> {
	pub(crate) fn token_info(config: &ClientConfig, token: Option<&str>) -> Result<Self> {
		let request = authenticated(config, Endpoint::Token, token)?;

		Ok(Self::new(request, response::decode_json))
	}
}
impl Call<UserIdentity> {
	pub(crate) fn validate_token(config: &ClientConfig, token: Option<&str>) -> Result<Self> {
		let request = authenticated(config, Endpoint::Me, token)?;

		Ok(Self::new(request, response::decode_json))
	}
}
impl Call<User> {
	pub(crate) fn user(config: &ClientConfig, token: Option<&str>) -> Result<Self> {
		let request = authenticated(config, Endpoint::Me, token)?;

		Ok(Self::new(request, response::decode_json))
	}
}
impl Call<RoleSet> {
	pub(crate) fn user_roles(config: &ClientConfig, token: Option<&str>) -> Result<Self> {
		let request = authenticated(config, Endpoint::Me, token)?;

		Ok(Self::new(request, |response| {
			response::decode_json::<response::RolesBody>(response).map(|body| body.roles)
		}))
	}
}
impl Call<BTreeMap<UserName, bool>> {
	pub(crate) fn validate_user_names<I, S>(
		config: &ClientConfig,
		names: I,
		token: Option<&str>,
	) -> Result<Self>
	where
		I: IntoIterator<Item = S>,
		S: AsRef<str>,
	{
		let requested = parse_user_names(names)?;
		let mut request = authenticated(config, Endpoint::Users, token)?;
		let list = requested.iter().map(UserName::as_str).collect::<Vec<_>>().join(",");

		request.url.query_pairs_mut().append_pair("list", &list);

		Ok(Self::new(request, move |response| {
			response::decode_user_lookup(response, requested)
		}))
	}
}

/// Validates and deduplicates requested user names before any request is built.
///
/// Names are taken verbatim; surrounding whitespace is rejected like any other whitespace.
pub(crate) fn parse_user_names<I, S>(names: I) -> Result<BTreeSet<UserName>>
where
	I: IntoIterator<Item = S>,
	S: AsRef<str>,
{
	let requested = names
		.into_iter()
		.map(|name| UserName::new(name).map_err(ConfigError::from))
		.collect::<Result<BTreeSet<_>, _>>()?;

	if requested.is_empty() {
		return Err(ConfigError::NoUserNames.into());
	}

	Ok(requested)
}

fn authenticated(
	config: &ClientConfig,
	endpoint: Endpoint,
	token: Option<&str>,
) -> Result<HttpRequest> {
	let token = config.resolve_token(token)?;

	request(config, endpoint, Some(token))
}

fn request(
	config: &ClientConfig,
	endpoint: Endpoint,
	token: Option<TokenSecret>,
) -> Result<HttpRequest> {
	Ok(HttpRequest {
		url: endpoint.url(config)?,
		token,
		scheme: config.scheme,
		timeout: config.timeout,
	})
}
