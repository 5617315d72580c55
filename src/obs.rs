//! Optional observability helpers for client calls.
//!
//! # Feature Flags
//!
//! - Enable `tracing` to emit structured spans named `kbase_auth.call` with the `call`
//!   (operation) and `stage` (transport flavor) fields, plus an `info` event whenever the server
//!   answers with a non-JSON body.
//! - Enable `metrics` to increment the `kbase_auth_call_total` counter for every
//!   attempt/success/failure, labeled by `call` + `outcome`, and `kbase_auth_call_failure_total`
//!   labeled by `call` + `reason` for failures.

mod metrics;
mod tracing;

pub use metrics::*;
pub use tracing::*;

// self
use crate::{_prelude::*, error::TransportError};

/// Auth server operations observed by the client.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CallKind {
	/// Service root lookup (name + version).
	ServiceInfo,
	/// Token introspection record lookup.
	TokenInfo,
	/// Token validation returning the user identity.
	ValidateToken,
	/// User record lookup.
	User,
	/// User role lookup.
	UserRoles,
	/// Batched user-name validation.
	ValidateUserNames,
}
impl CallKind {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			CallKind::ServiceInfo => "service_info",
			CallKind::TokenInfo => "token_info",
			CallKind::ValidateToken => "validate_token",
			CallKind::User => "user",
			CallKind::UserRoles => "user_roles",
			CallKind::ValidateUserNames => "validate_user_names",
		}
	}
}
impl Display for CallKind {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Outcome labels recorded for each call.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CallOutcome {
	/// Entry to a client method.
	Attempt,
	/// Successful completion.
	Success,
	/// Failure propagated back to the caller.
	Failure,
}
impl CallOutcome {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			CallOutcome::Attempt => "attempt",
			CallOutcome::Success => "success",
			CallOutcome::Failure => "failure",
		}
	}
}
impl Display for CallOutcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Coarse failure class used as a metric label and log field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FailureReason {
	/// Rejected locally before any request was sent.
	Config,
	/// The transport timed out.
	Timeout,
	/// Any other transport or decoding failure.
	Transport,
	/// The server rejected the token.
	InvalidToken,
	/// The server rejected a user name.
	InvalidUser,
	/// Any other server-reported error.
	Server,
}
impl FailureReason {
	/// Classifies a client error.
	pub fn of(error: &Error) -> Self {
		match error {
			Error::Config(_) => Self::Config,
			Error::Transport(TransportError::Timeout { .. }) => Self::Timeout,
			Error::Transport(_) => Self::Transport,
			Error::InvalidToken { .. } => Self::InvalidToken,
			Error::InvalidUser { .. } => Self::InvalidUser,
			Error::Server(_) => Self::Server,
		}
	}

	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			FailureReason::Config => "config",
			FailureReason::Timeout => "timeout",
			FailureReason::Transport => "transport",
			FailureReason::InvalidToken => "invalid_token",
			FailureReason::InvalidUser => "invalid_user",
			FailureReason::Server => "server",
		}
	}
}

/// Records the outcome of a finished call; failures are also counted and logged by reason.
pub fn record_call_result<T>(kind: CallKind, result: &Result<T>) {
	match result {
		Ok(_) => record_call_outcome(kind, CallOutcome::Success),
		Err(error) => {
			let reason = FailureReason::of(error);

			record_call_outcome(kind, CallOutcome::Failure);
			record_call_failure(kind, reason);
			log_call_failure(kind, reason, error);
		},
	}
}
