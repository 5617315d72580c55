//! Auth-domain identifiers, token models, users, and roles.

pub mod id;
pub mod role;
pub mod token;
pub mod user;

pub use id::*;
pub use role::*;
pub use token::{info::*, mfa::*, secret::*};
pub use user::*;
