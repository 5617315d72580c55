// self
#[cfg(feature = "reqwest")] use crate::error::ConfigError;
use crate::{_prelude::*, error::TransportError, obs::CallKind};

/// Maps transport-specific failures into client [`Error`] values.
///
/// Custom transports pair with a mapper so timeouts and connection failures land in the right
/// [`TransportError`] variant instead of a catch-all.
pub trait TransportErrorMapper<E>
where
	Self: 'static + Send + Sync,
	E: 'static + Send + Sync + StdError,
{
	/// Converts an error emitted by the transport into a client error.
	fn map_transport_error(&self, kind: CallKind, error: E) -> Error;
}

/// Mapper that reports every transport failure as [`TransportError::Network`].
#[derive(Clone, Copy, Debug, Default)]
pub struct NetworkErrorMapper;
impl<E> TransportErrorMapper<E> for NetworkErrorMapper
where
	E: 'static + Send + Sync + StdError,
{
	fn map_transport_error(&self, _kind: CallKind, error: E) -> Error {
		TransportError::network(error).into()
	}
}

/// Default mapper for reqwest-backed transports, async and blocking alike.
#[cfg(feature = "reqwest")]
#[derive(Clone, Copy, Debug, Default)]
pub struct ReqwestTransportErrorMapper;
#[cfg(feature = "reqwest")]
impl TransportErrorMapper<ReqwestError> for ReqwestTransportErrorMapper {
	fn map_transport_error(&self, _kind: CallKind, err: ReqwestError) -> Error {
		if err.is_builder() {
			return ConfigError::from(err).into();
		}
		if err.is_timeout() {
			return TransportError::timeout(err).into();
		}

		TransportError::from(err).into()
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn network_mapper_wraps_io_errors() {
		let err = NetworkErrorMapper.map_transport_error(
			CallKind::ValidateToken,
			std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused"),
		);

		assert!(matches!(err, Error::Transport(TransportError::Network { .. })));
	}
}
