//! Blocking auth client.
//!
//! Mirrors [`AuthClient`](crate::client::AuthClient) method for method. Both clients build
//! requests and decode responses through the same shared core; only the transport call blocks
//! here instead of being awaited.

// self
#[cfg(feature = "blocking")]
use crate::{api::ReqwestTransportErrorMapper, http::ReqwestBlockingHttpClient};
use crate::{
	_prelude::*,
	api::{Call, ServiceInfo, TransportErrorMapper},
	auth::{RoleSet, TokenInfo, User, UserIdentity, UserName},
	config::ClientConfig,
	http::BlockingAuthHttpClient,
	obs::{self, CallKind, CallOutcome, CallSpan},
};

#[cfg(feature = "blocking")]
/// Blocking client specialized for reqwest's blocking transport.
pub type ReqwestBlockingAuthClient =
	BlockingAuthClient<ReqwestBlockingHttpClient, ReqwestTransportErrorMapper>;

/// Blocking client for the auth service.
///
/// Shares the semantics of [`AuthClient`](crate::client::AuthClient): one request per call, no
/// caching, no retries, and safe to share across threads.
pub struct BlockingAuthClient<C, M>
where
	C: ?Sized + BlockingAuthHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// HTTP client wrapper used for every outbound request.
	pub http_client: Arc<C>,
	/// Mapper applied to transport-layer errors before surfacing them to callers.
	pub transport_mapper: Arc<M>,
	config: Arc<ClientConfig>,
}
impl<C, M> BlockingAuthClient<C, M>
where
	C: ?Sized + BlockingAuthHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// Creates a client that reuses the caller-provided transport + mapper pair.
	pub fn with_http_client(
		config: ClientConfig,
		http_client: impl Into<Arc<C>>,
		mapper: impl Into<Arc<M>>,
	) -> Self {
		Self {
			http_client: http_client.into(),
			transport_mapper: mapper.into(),
			config: Arc::new(config),
		}
	}

	/// Like [`with_http_client`](Self::with_http_client), but first confirms the configured URL
	/// points at the auth service.
	pub fn connect_with_http_client(
		config: ClientConfig,
		http_client: impl Into<Arc<C>>,
		mapper: impl Into<Arc<M>>,
	) -> Result<Self> {
		let client = Self::with_http_client(config, http_client, mapper);

		client.verify_service()?;

		Ok(client)
	}

	/// Configuration shared by every call.
	pub fn config(&self) -> &ClientConfig {
		&self.config
	}

	/// Returns a client sharing this transport but passing `timeout` to every request.
	pub fn with_timeout(&self, timeout: StdDuration) -> Self {
		let mut config = (*self.config).clone();

		config.timeout = Some(timeout);

		Self {
			http_client: self.http_client.clone(),
			transport_mapper: self.transport_mapper.clone(),
			config: Arc::new(config),
		}
	}

	/// Fetches the service name and version from the service root.
	pub fn service_info(&self) -> Result<ServiceInfo> {
		self.dispatch(CallKind::ServiceInfo, Call::service_info(&self.config))
	}

	/// Returns the auth server version.
	pub fn service_version(&self) -> Result<String> {
		Ok(self.service_info()?.version)
	}

	/// Confirms the configured URL points at the auth service.
	pub fn verify_service(&self) -> Result<ServiceInfo> {
		self.dispatch(CallKind::ServiceInfo, Call::verified_service_info(&self.config))
	}

	/// Validates a token and returns the identity it represents.
	pub fn validate_token(&self, token: Option<&str>) -> Result<UserIdentity> {
		self.dispatch(CallKind::ValidateToken, Call::validate_token(&self.config, token))
	}

	/// Fetches the introspection record of a token.
	pub fn token_info(&self, token: Option<&str>) -> Result<TokenInfo> {
		self.dispatch(CallKind::TokenInfo, Call::token_info(&self.config, token))
	}

	/// Fetches the token user's record including custom roles.
	pub fn get_user(&self, token: Option<&str>) -> Result<User> {
		self.dispatch(CallKind::User, Call::user(&self.config, token))
	}

	/// Fetches the roles of the token's user, deduplicated by identifier.
	pub fn get_user_roles(&self, token: Option<&str>) -> Result<RoleSet> {
		self.dispatch(CallKind::UserRoles, Call::user_roles(&self.config, token))
	}

	/// Checks which of `names` are registered user names.
	pub fn validate_user_names<I, S>(
		&self,
		names: I,
		token: Option<&str>,
	) -> Result<BTreeMap<UserName, bool>>
	where
		I: IntoIterator<Item = S>,
		S: AsRef<str>,
	{
		self.dispatch(
			CallKind::ValidateUserNames,
			Call::validate_user_names(&self.config, names, token),
		)
	}

	fn dispatch<T>(&self, kind: CallKind, call: Result<Call<T>>) -> Result<T> {
		let _span = CallSpan::new(kind, "blocking").entered();

		obs::record_call_outcome(kind, CallOutcome::Attempt);

		let result = call.and_then(|Call { request, decode }| {
			let response = self
				.http_client
				.execute(request)
				.map_err(|err| self.transport_mapper.map_transport_error(kind, err))?;

			decode(response)
		});

		obs::record_call_result(kind, &result);

		result
	}
}
#[cfg(feature = "blocking")]
impl BlockingAuthClient<ReqwestBlockingHttpClient, ReqwestTransportErrorMapper> {
	/// Creates a client backed by a default reqwest blocking transport.
	///
	/// Must not be called from within an async runtime; reqwest's blocking client panics there.
	pub fn new(config: ClientConfig) -> Self {
		Self::with_http_client(
			config,
			ReqwestBlockingHttpClient::default(),
			ReqwestTransportErrorMapper,
		)
	}

	/// Creates a client and confirms the configured URL points at the auth service.
	pub fn connect(config: ClientConfig) -> Result<Self> {
		Self::connect_with_http_client(
			config,
			ReqwestBlockingHttpClient::default(),
			ReqwestTransportErrorMapper,
		)
	}
}
impl<C, M> Clone for BlockingAuthClient<C, M>
where
	C: ?Sized + BlockingAuthHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	fn clone(&self) -> Self {
		Self {
			http_client: self.http_client.clone(),
			transport_mapper: self.transport_mapper.clone(),
			config: self.config.clone(),
		}
	}
}
impl<C, M> Debug for BlockingAuthClient<C, M>
where
	C: ?Sized + BlockingAuthHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("BlockingAuthClient")
			.field("base_url", &self.config.base_url.as_str())
			.field("default_token_set", &self.config.default_token.is_some())
			.field("timeout", &self.config.timeout)
			.finish()
	}
}
