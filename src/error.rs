use derive_more::derive::{Display, Error};
use embedded_io_async::ErrorKind;

/// A specialized `Result` where the error is this crate's `Error` type.
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// Unified error type for the robot firmware.
#[derive(Debug, Display, Error)]
pub enum Error {
    // `SpawnError` does not implement `core::error::Error`, hence `not(source)`.
    #[cfg(feature = "pico2")]
    #[display("{_0:?}")]
    TaskSpawn(#[error(not(source))] embassy_executor::SpawnError),

    #[display("could not join the network after {attempts} attempts")]
    JoinFailed { attempts: u32 },

    #[display("no DHCP lease before the timeout")]
    DhcpTimeout,

    #[display("no client connection could be accepted")]
    Accept,

    #[display("connection closed before a request arrived")]
    ConnectionClosed,

    #[display("socket I/O failed: {_0:?}")]
    Io(#[error(not(source))] ErrorKind),

    #[display("PWM duty cycle rejected")]
    Pwm,
}

#[cfg(feature = "pico2")]
impl From<embassy_executor::SpawnError> for Error {
    fn from(err: embassy_executor::SpawnError) -> Self {
        Self::TaskSpawn(err)
    }
}

impl Error {
    /// Wraps any `embedded-io` error by its kind.
    pub fn io<E: embedded_io_async::Error>(err: E) -> Self {
        Self::Io(err.kind())
    }
}
