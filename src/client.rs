//! Non-blocking auth client.

// self
#[cfg(feature = "reqwest")]
use crate::{api::ReqwestTransportErrorMapper, http::ReqwestHttpClient};
use crate::{
	_prelude::*,
	api::{Call, ServiceInfo, TransportErrorMapper},
	auth::{RoleSet, TokenInfo, User, UserIdentity, UserName},
	config::ClientConfig,
	http::AuthHttpClient,
	obs::{self, CallKind, CallOutcome, CallSpan},
};

#[cfg(feature = "reqwest")]
/// Client specialized for the crate's default reqwest transport stack.
pub type ReqwestAuthClient = AuthClient<ReqwestHttpClient, ReqwestTransportErrorMapper>;

/// Async client for the auth service.
///
/// The client holds read-only configuration and a shared transport, so clones are cheap and
/// concurrent calls from separate tasks never contend. Every method issues exactly one request;
/// nothing is cached and nothing is retried.
///
/// Methods that take `token: Option<&str>` fall back to the configured default token when
/// `None` is passed and fail with [`ConfigError::MissingToken`](crate::error::ConfigError) before
/// touching the network when neither is available.
pub struct AuthClient<C, M>
where
	C: ?Sized + AuthHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// HTTP client wrapper used for every outbound request.
	pub http_client: Arc<C>,
	/// Mapper applied to transport-layer errors before surfacing them to callers.
	pub transport_mapper: Arc<M>,
	config: Arc<ClientConfig>,
}
impl<C, M> AuthClient<C, M>
where
	C: ?Sized + AuthHttpClient,
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
	pub async fn connect_with_http_client(
		config: ClientConfig,
		http_client: impl Into<Arc<C>>,
		mapper: impl Into<Arc<M>>,
	) -> Result<Self> {
		let client = Self::with_http_client(config, http_client, mapper);

		client.verify_service().await?;

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
	pub async fn service_info(&self) -> Result<ServiceInfo> {
		self.dispatch(CallKind::ServiceInfo, Call::service_info(&self.config)).await
	}

	/// Returns the auth server version.
	pub async fn service_version(&self) -> Result<String> {
		Ok(self.service_info().await?.version)
	}

	/// Confirms the configured URL points at the auth service.
	pub async fn verify_service(&self) -> Result<ServiceInfo> {
		self.dispatch(CallKind::ServiceInfo, Call::verified_service_info(&self.config)).await
	}

	/// Validates a token and returns the identity it represents.
	pub async fn validate_token(&self, token: Option<&str>) -> Result<UserIdentity> {
		self.dispatch(CallKind::ValidateToken, Call::validate_token(&self.config, token)).await
	}

	/// Fetches the introspection record of a token.
	pub async fn token_info(&self, token: Option<&str>) -> Result<TokenInfo> {
		self.dispatch(CallKind::TokenInfo, Call::token_info(&self.config, token)).await
	}

	/// Fetches the token user's record including custom roles.
	pub async fn get_user(&self, token: Option<&str>) -> Result<User> {
		self.dispatch(CallKind::User, Call::user(&self.config, token)).await
	}

	/// Fetches the roles of the token's user, deduplicated by identifier.
	pub async fn get_user_roles(&self, token: Option<&str>) -> Result<RoleSet> {
		self.dispatch(CallKind::UserRoles, Call::user_roles(&self.config, token)).await
	}

	/// Checks which of `names` are registered user names.
	///
	/// The result holds exactly one entry per distinct requested name. Names are not trimmed; one
	/// with surrounding whitespace fails with
	/// [`ConfigError::InvalidUserName`](crate::error::ConfigError::InvalidUserName).
	pub async fn validate_user_names<I, S>(
		&self,
		names: I,
		token: Option<&str>,
	) -> Result<BTreeMap<UserName, bool>>
	where
		I: IntoIterator<Item = S>,
		S: AsRef<str>,
	{
		let call = Call::validate_user_names(&self.config, names, token);

		self.dispatch(CallKind::ValidateUserNames, call).await
	}

	async fn dispatch<T>(&self, kind: CallKind, call: Result<Call<T>>) -> Result<T> {
		let span = CallSpan::new(kind, "async");

		obs::record_call_outcome(kind, CallOutcome::Attempt);

		let result = span
			.instrument(async move {
				let Call { request, decode } = call?;
				let response = self
					.http_client
					.execute(request)
					.await
					.map_err(|err| self.transport_mapper.map_transport_error(kind, err))?;

				decode(response)
			})
			.await;

		obs::record_call_result(kind, &result);

		result
	}
}
#[cfg(feature = "reqwest")]
impl AuthClient<ReqwestHttpClient, ReqwestTransportErrorMapper> {
	/// Creates a client backed by a default reqwest transport.
	pub fn new(config: ClientConfig) -> Self {
		Self::with_http_client(config, ReqwestHttpClient::default(), ReqwestTransportErrorMapper)
	}

	/// Creates a client and confirms the configured URL points at the auth service.
	pub async fn connect(config: ClientConfig) -> Result<Self> {
		Self::connect_with_http_client(
			config,
			ReqwestHttpClient::default(),
			ReqwestTransportErrorMapper,
		)
		.await
	}
}
impl<C, M> Clone for AuthClient<C, M>
where
	C: ?Sized + AuthHttpClient,
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
impl<C, M> Debug for AuthClient<C, M>
where
	C: ?Sized + AuthHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("AuthClient")
			.field("base_url", &self.config.base_url.as_str())
			.field("default_token_set", &self.config.default_token.is_some())
			.field("timeout", &self.config.timeout)
			.finish()
	}
}
