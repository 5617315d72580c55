//! Multi-factor authentication status attached to tokens.

// self
use crate::_prelude::*;

/// Error returned when the server reports an MFA status this client does not know.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
#[error("Unknown MFA string: {0}.")]
pub struct UnknownMfaStatus(pub String);

/// Whether the user used MFA when the token was created.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Option<String>", into = "&'static str")]
pub enum MfaStatus {
	/// The user used MFA when logging in.
	Used,
	/// The user chose not to use MFA when logging in.
	NotUsed,
	/// The identity provider does not support or report MFA, or MFA does not apply to the
	/// token type.
	#[default]
	Unknown,
}
impl MfaStatus {
	/// Returns the wire label used by the auth server.
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::Used => "Used",
			Self::NotUsed => "NotUsed",
			Self::Unknown => "Unknown",
		}
	}

	/// Parses a wire label case-insensitively; missing or empty labels mean [`Self::Unknown`].
	pub fn parse(raw: Option<&str>) -> Result<Self, UnknownMfaStatus> {
		let Some(raw) = raw.filter(|value| !value.is_empty()) else {
			return Ok(Self::Unknown);
		};

		match raw.to_ascii_lowercase().as_str() {
			"used" => Ok(Self::Used),
			"notused" => Ok(Self::NotUsed),
			"unknown" => Ok(Self::Unknown),
			_ => Err(UnknownMfaStatus(raw.to_owned())),
		}
	}
}
impl TryFrom<Option<String>> for MfaStatus {
	type Error = UnknownMfaStatus;

	fn try_from(value: Option<String>) -> Result<Self, Self::Error> {
		Self::parse(value.as_deref())
	}
}
impl From<MfaStatus> for &'static str {
	fn from(value: MfaStatus) -> Self {
		value.as_str()
	}
}
impl Display for MfaStatus {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn parse_is_case_insensitive_and_defaults_to_unknown() {
		assert_eq!(MfaStatus::parse(Some("Used")), Ok(MfaStatus::Used));
		assert_eq!(MfaStatus::parse(Some("NOTUSED")), Ok(MfaStatus::NotUsed));
		assert_eq!(MfaStatus::parse(Some("unknown")), Ok(MfaStatus::Unknown));
		assert_eq!(MfaStatus::parse(Some("")), Ok(MfaStatus::Unknown));
		assert_eq!(MfaStatus::parse(None), Ok(MfaStatus::Unknown));
		assert_eq!(MfaStatus::parse(Some("maybe")), Err(UnknownMfaStatus("maybe".into())));
	}

	#[test]
	fn serde_accepts_null_and_rejects_unknown_labels() {
		let status: MfaStatus =
			serde_json::from_str("null").expect("Null MFA status should deserialize.");

		assert_eq!(status, MfaStatus::Unknown);
		assert!(serde_json::from_str::<MfaStatus>("\"sometimes\"").is_err());
		assert_eq!(
			serde_json::to_string(&MfaStatus::NotUsed).expect("MFA status should serialize."),
			"\"NotUsed\""
		);
	}
}
