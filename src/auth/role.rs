//! Role modeling helpers.

// std
use std::collections::btree_map::{Entry, Values};
// self
use crate::{_prelude::*, auth::RoleId};

/// Role granted to a user by the auth server.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Role {
	/// Stable role identifier.
	pub id: RoleId,
	/// Human-readable role label.
	pub desc: String,
}
impl Role {
	/// Creates a role from its identifier and label.
	pub fn new(id: RoleId, desc: impl Into<String>) -> Self {
		Self { id, desc: desc.into() }
	}
}

/// Set of roles, unique by identifier.
///
/// The server is not expected to repeat a role, but the set does not rely on it: when the
/// same identifier shows up twice the first occurrence is kept.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<Role>", into = "Vec<Role>")]
pub struct RoleSet(BTreeMap<RoleId, Role>);
impl RoleSet {
	/// Number of distinct roles.
	pub fn len(&self) -> usize {
		self.0.len()
	}

	/// Returns true if the user holds no roles.
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	/// Returns true if a role with the provided identifier is present.
	pub fn contains(&self, id: &str) -> bool {
		self.0.contains_key(id)
	}

	/// Looks up a role by identifier.
	pub fn get(&self, id: &str) -> Option<&Role> {
		self.0.get(id)
	}

	/// Inserts a role unless one with the same identifier already exists.
	///
	/// Returns true when the role was added.
	pub fn insert(&mut self, role: Role) -> bool {
		match self.0.entry(role.id.clone()) {
			Entry::Vacant(slot) => {
				slot.insert(role);

				true
			},
			Entry::Occupied(_) => false,
		}
	}

	/// Iterator over roles ordered by identifier.
	pub fn iter(&self) -> Values<'_, RoleId, Role> {
		self.0.values()
	}

	/// Iterator over role identifiers.
	pub fn ids(&self) -> impl Iterator<Item = &RoleId> {
		self.0.keys()
	}
}
impl FromIterator<Role> for RoleSet {
	fn from_iter<I>(iter: I) -> Self
	where
		I: IntoIterator<Item = Role>,
	{
		let mut set = Self::default();

		for role in iter {
			set.insert(role);
		}

		set
	}
}
impl From<Vec<Role>> for RoleSet {
	fn from(value: Vec<Role>) -> Self {
		value.into_iter().collect()
	}
}
impl From<RoleSet> for Vec<Role> {
	fn from(value: RoleSet) -> Self {
		value.0.into_values().collect()
	}
}
impl<'a> IntoIterator for &'a RoleSet {
	type IntoIter = Values<'a, RoleId, Role>;
	type Item = &'a Role;

	fn into_iter(self) -> Self::IntoIter {
		self.iter()
	}
}
impl Debug for RoleSet {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_set().entries(self.0.values()).finish()
	}
}
