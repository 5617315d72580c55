//! Token secrets and introspection records.

pub mod info;
pub mod mfa;
pub mod secret;
