//! Response decoding and error classification.

// crates.io
use serde::de::DeserializeOwned;
use serde_json::Value;
// self
use crate::{
	_prelude::*,
	auth::{RoleSet, UserName},
	error::{ServerError, TransportError},
	http::HttpResponse,
	obs,
};

/// Application code the auth server uses for invalid tokens.
pub const APPCODE_INVALID_TOKEN: u32 = 10020;
/// Application code the auth server uses for illegal user names.
pub const APPCODE_ILLEGAL_USER_NAME: u32 = 30010;

const BODY_PREVIEW_LIMIT: usize = 256;

/// Name and version reported at the auth service root.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceInfo {
	/// Service name; the auth server reports `Authentication Service`.
	pub servicename: String,
	/// Service version.
	pub version: String,
	/// Git commit the server was built from.
	#[serde(default)]
	pub gitcommithash: Option<String>,
	/// Server time in epoch milliseconds.
	#[serde(default)]
	pub servertime: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RolesBody {
	pub(crate) roles: RoleSet,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
	#[serde(default)]
	appcode: Option<u32>,
	#[serde(default)]
	apperror: Option<String>,
	#[serde(default)]
	message: Option<String>,
}

/// Decodes a JSON success body, or classifies the error response.
pub(crate) fn decode_json<T>(response: HttpResponse) -> Result<T>
where
	T: DeserializeOwned,
{
	let status = response.status;
	let value = parse_value(&response)?;

	if !response.is_success() {
		return Err(classify_error(status, value));
	}

	serde_path_to_error::deserialize(value)
		.map_err(|source| TransportError::Parse { source, status }.into())
}

/// Decodes a user-lookup body into one entry per requested name.
///
/// Names missing from the body are invalid; names the server returned without being asked are
/// ignored.
pub(crate) fn decode_user_lookup(
	response: HttpResponse,
	requested: BTreeSet<UserName>,
) -> Result<BTreeMap<UserName, bool>> {
	let lookup = decode_json::<BTreeMap<String, Value>>(response)?;

	Ok(requested
		.into_iter()
		.map(|name| {
			let valid = lookup.get(name.as_str()).is_some_and(is_registered);

			(name, valid)
		})
		.collect())
}

/// Display names and `true` mark registered users; anything else does not.
fn is_registered(value: &Value) -> bool {
	match value {
		Value::Bool(flag) => *flag,
		Value::String(_) => true,
		_ => false,
	}
}

fn parse_value(response: &HttpResponse) -> Result<Value> {
	serde_json::from_slice(&response.body).map_err(|_| {
		let preview = body_preview(&response.body);

		obs::log_non_json_response(response.status, &preview);

		TransportError::NonJson { status: response.status, preview }.into()
	})
}

/// Maps a JSON error body to the matching server-reported error.
///
/// Accepts both the auth server's `{"error": {...}}` envelope and a flat error object. Any other
/// JSON value carries no details, so the status alone decides.
fn classify_error(status: u16, value: Value) -> Error {
	let inner = match value {
		Value::Object(mut map) if map.get("error").is_some_and(Value::is_object) =>
			map.remove("error").unwrap_or_default(),
		Value::Object(map) => Value::Object(map),
		_ => Value::Object(Default::default()),
	};
	let body: ErrorBody = match serde_path_to_error::deserialize(inner) {
		Ok(body) => body,
		Err(source) => return TransportError::Parse { source, status }.into(),
	};
	let message = body
		.message
		.or(body.apperror)
		.unwrap_or_else(|| format!("HTTP status {status}"));

	match body.appcode {
		Some(APPCODE_ILLEGAL_USER_NAME) => Error::InvalidUser {
			message: strip_code_prefixes(&message).to_owned(),
			status,
			appcode: body.appcode,
		},
		_ if body.appcode == Some(APPCODE_INVALID_TOKEN) || matches!(status, 401 | 403) =>
			Error::InvalidToken { message, status, appcode: body.appcode },
		_ => ServerError { appcode: body.appcode, message, status }.into(),
	}
}

/// The server chains `code: context: ` prefixes in front of the user-facing reason; keep what
/// follows the third separator.
fn strip_code_prefixes(message: &str) -> &str {
	message.splitn(4, ':').last().unwrap_or(message).trim()
}

fn body_preview(body: &[u8]) -> String {
	let text = String::from_utf8_lossy(body);

	if text.chars().count() <= BODY_PREVIEW_LIMIT {
		return text.into_owned();
	}

	let mut buf = text.chars().take(BODY_PREVIEW_LIMIT).collect::<String>();

	buf.push('…');

	buf
}
