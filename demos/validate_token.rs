//! Validates a token, looks up user names, and lists roles against a mocked auth server using
//! a reqwest transport that trusts the mock server's self-signed certificate.

// crates.io
use color_eyre::Result;
use httpmock::prelude::*;
// self
use kbase_auth_client::{
	api::ReqwestTransportErrorMapper,
	client::ReqwestAuthClient,
	config::ClientConfig,
	http::ReqwestHttpClient,
	reqwest::Client,
};

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let server = MockServer::start_async().await;
	let root_mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/services/auth/");
			then.status(200)
				.header("content-type", "application/json")
				.body("{\"servicename\":\"Authentication Service\",\"version\":\"0.7.1\"}");
		})
		.await;
	let me_mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/services/auth/api/V2/me").header("authorization", "demo-token");
			then.status(200).header("content-type", "application/json").body(
				"{\"user\":\"alice\",\"display\":\"Alice A.\",\"roles\":[{\"id\":\"DevToken\",\"desc\":\"Create developer tokens\"}],\"customroles\":[]}",
			);
		})
		.await;
	let users_mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/services/auth/api/V2/users/");
			then.status(200)
				.header("content-type", "application/json")
				.body("{\"alice\":\"Alice A.\"}");
		})
		.await;
	let config = ClientConfig::builder(server.url("/services/auth"))
		.default_token("demo-token")
		.timeout(std::time::Duration::from_secs(5))
		.build()?;
	let http_client = ReqwestHttpClient::with_client(
		Client::builder()
			.danger_accept_invalid_certs(true)
			.danger_accept_invalid_hostnames(true)
			.build()?,
	);
	let client = ReqwestAuthClient::connect_with_http_client(
		config,
		http_client,
		ReqwestTransportErrorMapper,
	)
	.await?;
	let identity = client.validate_token(None).await?;

	println!("Token belongs to {} ({}).", identity.user, identity.display);

	for (name, valid) in client.validate_user_names(["alice", "mallory"], None).await? {
		println!("User {name} valid: {valid}.");
	}
	for role in client.get_user_roles(None).await?.iter() {
		println!("Role {}: {}.", role.id, role.desc);
	}

	root_mock.assert_async().await;
	me_mock.assert_calls_async(2).await;
	users_mock.assert_async().await;

	Ok(())
}
