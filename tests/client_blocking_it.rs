#![cfg(feature = "blocking")]

// crates.io
use httpmock::prelude::*;
// self
use kbase_auth_client::{
	_preludet::*,
	api::ReqwestTransportErrorMapper,
	blocking::ReqwestBlockingAuthClient,
	error::{ConfigError, TransportError},
};

const BASE_PATH: &str = "/services/auth";

fn base_url(server: &MockServer) -> String {
	server.url(BASE_PATH)
}

fn path(endpoint: &str) -> String {
	format!("{BASE_PATH}/{endpoint}")
}

#[test]
fn blocking_validate_token_returns_identity() {
	let server = MockServer::start();
	let client = build_reqwest_blocking_test_client(&base_url(&server), Some(TEST_TOKEN));
	let mock = server.mock(|when, then| {
		when.method(GET).path(path("api/V2/me")).header("authorization", TEST_TOKEN);
		then.status(200)
			.header("content-type", "application/json")
			.body("{\"user\":\"alice\",\"display\":\"Alice A.\"}");
	});
	let identity = client.validate_token(None).expect("Default token should validate.");

	assert_eq!(identity.user.as_str(), "alice");
	assert_eq!(identity.display, "Alice A.");

	mock.assert();
}

#[test]
fn blocking_rejected_token_maps_to_invalid_token() {
	let server = MockServer::start();
	let client = build_reqwest_blocking_test_client(&base_url(&server), Some(TEST_TOKEN));
	let mock = server.mock(|when, then| {
		when.method(GET).path(path("api/V2/token"));
		then.status(401).header("content-type", "application/json").body(
			"{\"error\":{\"httpcode\":401,\"appcode\":10020,\"apperror\":\"Invalid token\",\"message\":\"10020 Invalid token\"}}",
		);
	});
	let err = client.token_info(None).expect_err("Rejected tokens should surface an error.");

	assert!(matches!(err, Error::InvalidToken { status: 401, .. }));

	mock.assert();
}

#[test]
fn blocking_missing_token_fails_without_network_call() {
	let server = MockServer::start();
	let client = build_reqwest_blocking_test_client(&base_url(&server), None);
	let mock = server.mock(|when, then| {
		when.method(GET);
		then.status(200);
	});
	let err = client.validate_token(None).expect_err("Missing token must fail.");

	assert!(matches!(err, Error::Config(ConfigError::MissingToken)));

	let err = client.validate_user_names(["alice"], None).expect_err("Missing token must fail.");

	assert!(matches!(err, Error::Config(ConfigError::MissingToken)));

	mock.assert_calls(0);
}

#[test]
fn blocking_user_lookup_and_roles() {
	let server = MockServer::start();
	let client = build_reqwest_blocking_test_client(&base_url(&server), Some(TEST_TOKEN));
	let users = server.mock(|when, then| {
		when.method(GET).path(path("api/V2/users/")).query_param("list", "alice,zed");
		then.status(200)
			.header("content-type", "application/json")
			.body("{\"alice\":\"Alice A.\"}");
	});
	let me = server.mock(|when, then| {
		when.method(GET).path(path("api/V2/me"));
		then.status(200).header("content-type", "application/json").body(
			"{\"user\":\"alice\",\"display\":\"Alice A.\",\"roles\":[{\"id\":\"Admin\",\"desc\":\"Administrator\"},{\"id\":\"Admin\",\"desc\":\"Administrator\"}],\"customroles\":[]}",
		);
	});
	let result = client.validate_user_names(["zed", "alice"], None).expect("Lookup should succeed.");

	assert_eq!(result.len(), 2);
	assert!(result.iter().any(|(name, valid)| name.as_str() == "alice" && *valid));
	assert!(result.iter().any(|(name, valid)| name.as_str() == "zed" && !*valid));

	let roles = client.get_user_roles(None).expect("Roles should decode.");

	assert_eq!(roles.ids().map(|id| id.as_str()).collect::<Vec<_>>(), vec!["Admin"]);

	users.assert();
	me.assert();
}

#[test]
fn blocking_slow_server_maps_to_timeout() {
	let server = MockServer::start();
	let client = build_reqwest_blocking_test_client(&base_url(&server), Some(TEST_TOKEN))
		.with_timeout(StdDuration::from_millis(100));
	let mock = server.mock(|when, then| {
		when.method(GET).path(path("api/V2/me"));
		then.status(200)
			.header("content-type", "application/json")
			.body("{\"user\":\"alice\",\"display\":\"Alice A.\"}")
			.delay(StdDuration::from_secs(2));
	});
	let err = client.validate_token(None).expect_err("Slow responses should time out.");

	assert!(matches!(err, Error::Transport(TransportError::Timeout { .. })));

	mock.assert();
}

#[test]
fn blocking_connect_reports_version() {
	let server = MockServer::start();
	let mock = server.mock(|when, then| {
		when.method(GET).path(path(""));
		then.status(200)
			.header("content-type", "application/json")
			.body("{\"version\":\"0.7.1\",\"servicename\":\"Authentication Service\"}");
	});
	let client = ReqwestBlockingAuthClient::connect_with_http_client(
		test_config(&base_url(&server), None),
		test_reqwest_blocking_http_client(),
		ReqwestTransportErrorMapper,
	)
	.expect("Auth service root should verify.");

	assert_eq!(client.service_version().expect("Version should be reported."), "0.7.1");

	mock.assert_calls(2);
}
