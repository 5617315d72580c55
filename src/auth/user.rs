//! User identity models.

// self
use crate::{_prelude::*, auth::UserName};

/// Identity behind a validated token.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserIdentity {
	/// User name.
	pub user: UserName,
	/// Display name.
	pub display: String,
}

/// User record with the custom roles the user holds.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
	/// User name.
	pub user: UserName,
	/// Display name.
	pub display: String,
	/// Administrator-defined custom role ids.
	#[serde(rename = "customroles")]
	pub custom_roles: BTreeSet<String>,
}
impl User {
	/// Returns true if the user holds the custom role.
	pub fn has_custom_role(&self, role: &str) -> bool {
		self.custom_roles.contains(role)
	}

	/// Identity portion of the record.
	pub fn identity(&self) -> UserIdentity {
		UserIdentity { user: self.user.clone(), display: self.display.clone() }
	}
}
