//! Token introspection record returned by the auth server.

// crates.io
use uuid::Uuid;
// self
use crate::{
	_prelude::*,
	auth::{MfaStatus, UserName},
};

/// Information about an auth token as reported by the introspection endpoint.
///
/// Timestamps are kept in the server's epoch-millisecond representation; use
/// [`created_at`](Self::created_at) and [`expires_at`](Self::expires_at) for typed values.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenInfo {
	/// Unique token id.
	pub id: Uuid,
	/// User the token belongs to.
	pub user: UserName,
	/// MFA status recorded when the token was created.
	#[serde(default)]
	pub mfa: MfaStatus,
	/// Creation time in epoch milliseconds.
	pub created: i64,
	/// Expiry time in epoch milliseconds.
	pub expires: i64,
	/// How long the token may be cached by consumers, in milliseconds.
	pub cachefor: i64,
	/// Optional user-assigned token name.
	#[serde(default)]
	pub name: Option<String>,
	/// Token type label (`Login`, `Dev`, `Service`, ...).
	#[serde(default, rename = "type")]
	pub token_type: Option<String>,
}
impl TokenInfo {
	/// Creation time, when representable.
	pub fn created_at(&self) -> Option<OffsetDateTime> {
		from_epoch_millis(self.created)
	}

	/// Expiry time, when representable.
	pub fn expires_at(&self) -> Option<OffsetDateTime> {
		from_epoch_millis(self.expires)
	}

	/// Cache lifetime suggested by the server.
	pub fn cache_for(&self) -> Duration {
		Duration::milliseconds(self.cachefor)
	}

	/// Returns true when the token expiry is at or before `now`.
	pub fn is_expired_at(&self, now: OffsetDateTime) -> bool {
		self.expires_at().is_none_or(|expires| expires <= now)
	}
}

fn from_epoch_millis(millis: i64) -> Option<OffsetDateTime> {
	OffsetDateTime::from_unix_timestamp_nanos(i128::from(millis) * 1_000_000).ok()
}

#[cfg(test)]
mod tests {
	// crates.io
	use time::macros::datetime;
	// self
	use super::*;

	const BODY: &str = r#"{
		"type": "Login",
		"id": "67e55044-10b1-426f-9247-bb680e5fe0c8",
		"expires": 1700003600000,
		"created": 1700000000000,
		"name": null,
		"user": "alice",
		"custom": {},
		"cachefor": 300000,
		"mfa": "Used"
	}"#;

	#[test]
	fn decodes_server_body_and_ignores_unknown_fields() {
		let info: TokenInfo = serde_json::from_str(BODY).expect("Token body should decode.");

		assert_eq!(info.user.as_str(), "alice");
		assert_eq!(info.mfa, MfaStatus::Used);
		assert_eq!(info.token_type.as_deref(), Some("Login"));
		assert_eq!(info.name, None);
		assert_eq!(info.created_at(), Some(datetime!(2023-11-14 22:13:20 UTC)));
		assert_eq!(info.cache_for(), Duration::minutes(5));
		assert!(!info.is_expired_at(datetime!(2023-11-14 22:13:20 UTC)));
		assert!(info.is_expired_at(datetime!(2023-11-15 00:00:00 UTC)));
	}

	#[test]
	fn missing_mfa_defaults_to_unknown() {
		let body = r#"{"id":"67e55044-10b1-426f-9247-bb680e5fe0c8","user":"bob","created":0,"expires":1,"cachefor":0}"#;
		let info: TokenInfo = serde_json::from_str(body).expect("Token body should decode.");

		assert_eq!(info.mfa, MfaStatus::Unknown);
	}

	#[test]
	fn missing_required_fields_fail() {
		let body = r#"{"id":"67e55044-10b1-426f-9247-bb680e5fe0c8","user":"bob","created":0}"#;

		assert!(serde_json::from_str::<TokenInfo>(body).is_err());
	}
}
