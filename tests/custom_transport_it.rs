// std
use std::{
	collections::BTreeMap,
	error::Error as StdError,
	fmt::{Display, Formatter, Result as FmtResult},
	sync::{Arc, Mutex},
};
// self
use kbase_auth_client::{
	api::NetworkErrorMapper,
	blocking::BlockingAuthClient,
	client::AuthClient,
	config::ClientConfig,
	error::{ConfigError, Error, TransportError},
	http::{AuthHttpClient, BlockingAuthHttpClient, HttpFuture, HttpRequest, HttpResponse},
};

#[derive(Debug)]
struct Unreachable;
impl Display for Unreachable {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		write!(f, "Host unreachable.")
	}
}
impl StdError for Unreachable {}

/// Serves canned responses keyed by URL path and records every request it sees.
#[derive(Default)]
struct CannedTransport {
	responses: BTreeMap<String, HttpResponse>,
	seen: Mutex<Vec<HttpRequest>>,
}
impl CannedTransport {
	fn respond(mut self, path: &str, status: u16, body: &str) -> Self {
		self.responses.insert(path.to_owned(), HttpResponse::new(status, body));

		self
	}

	fn seen(&self) -> Vec<HttpRequest> {
		self.seen.lock().expect("Request log lock should not be poisoned.").clone()
	}

	fn serve(&self, request: HttpRequest) -> Result<HttpResponse, Unreachable> {
		let response = self.responses.get(request.url.path()).cloned().ok_or(Unreachable);

		self.seen.lock().expect("Request log lock should not be poisoned.").push(request);

		response
	}
}
impl AuthHttpClient for CannedTransport {
	type TransportError = Unreachable;

	fn execute(
		&self,
		request: HttpRequest,
	) -> HttpFuture<'_, Result<HttpResponse, Self::TransportError>> {
		Box::pin(async move { self.serve(request) })
	}
}
impl BlockingAuthHttpClient for CannedTransport {
	type TransportError = Unreachable;

	fn execute(&self, request: HttpRequest) -> Result<HttpResponse, Self::TransportError> {
		self.serve(request)
	}
}

fn config(default_token: Option<&str>) -> ClientConfig {
	let mut builder = ClientConfig::builder("https://auth.example.org/services/auth");

	if let Some(token) = default_token {
		builder = builder.default_token(token);
	}

	builder.build().expect("Config fixture should build.")
}

#[tokio::test]
async fn async_client_runs_over_custom_transport() {
	let transport = Arc::new(CannedTransport::default().respond(
		"/services/auth/api/V2/me",
		200,
		r#"{"user":"alice","display":"Alice A."}"#,
	));
	let client = <AuthClient<CannedTransport, NetworkErrorMapper>>::with_http_client(
		config(Some("default-token")),
		transport.clone(),
		NetworkErrorMapper,
	);
	let identity = client.validate_token(None).await.expect("Canned identity should decode.");

	assert_eq!(identity.user.as_str(), "alice");

	let seen = transport.seen();

	assert_eq!(seen.len(), 1);
	assert_eq!(seen[0].authorization().as_deref(), Some("default-token"));
	assert_eq!(seen[0].timeout, None);
}

#[tokio::test]
async fn transport_failures_use_the_mapper() {
	let transport = Arc::new(CannedTransport::default());
	let client = <AuthClient<CannedTransport, NetworkErrorMapper>>::with_http_client(
		config(Some("default-token")),
		transport.clone(),
		NetworkErrorMapper,
	);
	let err = client.token_info(None).await.expect_err("Unknown paths should fail in transport.");

	assert!(matches!(err, Error::Transport(TransportError::Network { .. })));
	assert_eq!(transport.seen().len(), 1);
}

#[tokio::test]
async fn config_errors_never_reach_the_transport() {
	let transport = Arc::new(CannedTransport::default());
	let client = <AuthClient<CannedTransport, NetworkErrorMapper>>::with_http_client(
		config(None),
		transport.clone(),
		NetworkErrorMapper,
	);
	let err = client.get_user(None).await.expect_err("Missing token must fail.");

	assert!(matches!(err, Error::Config(ConfigError::MissingToken)));
	assert!(transport.seen().is_empty());
}

#[test]
fn blocking_client_passes_timeout_through() {
	let transport = Arc::new(CannedTransport::default().respond(
		"/services/auth/api/V2/users/",
		200,
		r#"{"alice":true,"bob":false}"#,
	));
	let client = <BlockingAuthClient<CannedTransport, NetworkErrorMapper>>::with_http_client(
		config(Some("default-token")),
		transport.clone(),
		NetworkErrorMapper,
	)
	.with_timeout(std::time::Duration::from_secs(3));
	let result = client
		.validate_user_names(["bob", "alice"], Some("call-token"))
		.expect("Canned lookup should decode.");

	assert_eq!(result.values().copied().collect::<Vec<_>>(), vec![true, false]);

	let seen = transport.seen();

	assert_eq!(seen.len(), 1);
	assert_eq!(seen[0].url.query(), Some("list=alice%2Cbob"));
	assert_eq!(seen[0].authorization().as_deref(), Some("call-token"));
	assert_eq!(seen[0].timeout, Some(std::time::Duration::from_secs(3)));
}

#[tokio::test]
async fn connect_verifies_service_over_custom_transport() {
	let transport = Arc::new(CannedTransport::default().respond(
		"/services/auth/",
		200,
		r#"{"servicename":"Authentication Service","version":"0.7.1"}"#,
	));
	let client = <AuthClient<CannedTransport, NetworkErrorMapper>>::connect_with_http_client(
		config(None),
		transport.clone(),
		NetworkErrorMapper,
	)
	.await
	.expect("Canned auth service root should verify.");

	assert_eq!(client.config().base_url.as_str(), "https://auth.example.org/services/auth/");
	assert_eq!(transport.seen().len(), 1);
	assert_eq!(transport.seen()[0].token, None);

	let transport = Arc::new(CannedTransport::default().respond(
		"/services/auth/",
		200,
		r#"{"servicename":"Workspace","version":"1.0.0"}"#,
	));
	let err = <BlockingAuthClient<CannedTransport, NetworkErrorMapper>>::connect_with_http_client(
		config(None),
		transport,
		NetworkErrorMapper,
	)
	.expect_err("Other services must be rejected.");

	assert!(matches!(err, Error::Transport(TransportError::UnexpectedService { .. })));
}
