//! Plugs an in-memory transport into the blocking client, the way a service would wire its own
//! HTTP stack or a test double without depending on reqwest.

// std
use std::{
	error::Error as StdError,
	fmt::{Display, Formatter, Result as FmtResult},
};
// crates.io
use color_eyre::Result;
// self
use kbase_auth_client::{
	api::NetworkErrorMapper,
	blocking::BlockingAuthClient,
	config::ClientConfig,
	http::{BlockingAuthHttpClient, HttpRequest, HttpResponse},
};

#[derive(Debug)]
struct NoRoute(String);
impl Display for NoRoute {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		write!(f, "No route for {}.", self.0)
	}
}
impl StdError for NoRoute {}

struct InMemoryAuth;
impl BlockingAuthHttpClient for InMemoryAuth {
	type TransportError = NoRoute;

	fn execute(&self, request: HttpRequest) -> Result<HttpResponse, Self::TransportError> {
		let authorized = request.authorization().as_deref() == Some("local-token");

		match request.url.path() {
			"/auth/api/V2/me" if authorized => Ok(HttpResponse::new(
				200,
				r#"{"user":"svc_bot","display":"Service Bot","roles":[],"customroles":["bots"]}"#,
			)),
			"/auth/api/V2/me" => Ok(HttpResponse::new(
				401,
				r#"{"error":{"httpcode":401,"appcode":10020,"message":"10020 Invalid token"}}"#,
			)),
			path => Err(NoRoute(path.to_owned())),
		}
	}
}

fn main() -> Result<()> {
	color_eyre::install()?;

	let config = ClientConfig::builder("http://localhost/auth").default_token("local-token").build()?;
	let client = <BlockingAuthClient<InMemoryAuth, NetworkErrorMapper>>::with_http_client(
		config,
		InMemoryAuth,
		NetworkErrorMapper,
	);
	let user = client.get_user(None)?;

	println!("{} has custom role `bots`: {}.", user.user, user.has_custom_role("bots"));

	match client.validate_token(Some("stale-token")) {
		Ok(identity) => println!("Unexpectedly valid token for {}.", identity.user),
		Err(err) => println!("Rejected as expected: {err}"),
	}

	Ok(())
}
