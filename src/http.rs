//! Single-request HTTP responder for the control page.
//!
//! No parsing happens here beyond [`Command::from_request`]: every request gets the same
//! `200 OK` and the same page, whatever it asked for.

use core::convert::Infallible;

use embedded_hal::digital::OutputPin;
use embedded_hal::pwm::SetDutyCycle;
use embedded_hal_async::delay::DelayNs;
use embedded_io_async::{Read, Write};

use crate::chassis::Chassis;
use crate::command::Command;
use crate::config::{ACCEPT_RETRY_MS, REQUEST_BUFFER_LEN};
use crate::{Error, Result};

pub const RESPONSE_HEADER: &str = "HTTP/1.1 200 OK\r\nContent-Type: text/html\r\n\r\n";

const PAGE_TEMPLATE: &str = include_str!("page.html");
const NAME_PLACEHOLDER: &str = "{{ROBOT_NAME}}";

/// An accepted connection that knows how to shut itself down.
pub trait Connection: Read + Write {
    fn close(self) -> impl Future<Output = ()>;
}

/// Source of client connections, one at a time.
pub trait Listener {
    type Connection<'a>: Connection
    where
        Self: 'a;

    /// Waits for the next client.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Accept`] if no connection could be established.
    fn accept(&mut self) -> impl Future<Output = Result<Self::Connection<'_>>>;
}

/// The embedded control page with the robot's display name filled in.
#[derive(Debug, Clone, Copy)]
pub struct ControlPage {
    robot_name: &'static str,
}

impl ControlPage {
    #[must_use]
    pub const fn new(robot_name: &'static str) -> Self {
        Self { robot_name }
    }

    /// Page fragments in order: the template split at each placeholder, with the robot
    /// name in between.
    pub fn fragments(&self) -> impl Iterator<Item = &'static str> {
        let robot_name = self.robot_name;
        PAGE_TEMPLATE
            .split(NAME_PLACEHOLDER)
            .enumerate()
            .flat_map(move |(index, part)| {
                let name = (index > 0).then_some(robot_name);
                name.into_iter().chain(core::iter::once(part))
            })
    }

    /// Streams the full response (header and page) to `out`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the peer stops accepting data.
    pub async fn write_response<W: Write>(&self, out: &mut W) -> Result<()> {
        out.write_all(RESPONSE_HEADER.as_bytes()).await.map_err(Error::io)?;
        for fragment in self.fragments() {
            out.write_all(fragment.as_bytes()).await.map_err(Error::io)?;
        }
        out.flush().await.map_err(Error::io)
    }
}

/// Serves one accepted connection: read the request, drive the chassis, answer with the
/// page.
///
/// Only the first read is inspected, up to [`REQUEST_BUFFER_LEN`] bytes. Returns the
/// command that was dispatched, if the request carried one.
///
/// # Errors
///
/// Returns [`Error::ConnectionClosed`] if the peer sent nothing (no response is written),
/// or [`Error::Io`] if reading or writing the socket fails. A failed write happens after
/// the command has already been applied.
pub async fn serve_connection<S, P, M>(
    socket: &mut S,
    chassis: &mut Chassis<P, M>,
    page: &ControlPage,
) -> Result<Option<Command>>
where
    S: Read + Write,
    P: OutputPin<Error = Infallible>,
    M: SetDutyCycle,
{
    let mut request = [0u8; REQUEST_BUFFER_LEN];
    let len = socket.read(&mut request).await.map_err(Error::io)?;
    if len == 0 {
        return Err(Error::ConnectionClosed);
    }

    let command = request.get(..len).and_then(Command::from_request);
    if let Some(command) = command {
        chassis.drive(command.into());
    }

    page.write_response(socket).await?;
    Ok(command)
}

/// Accepts one connection from `listener`, serves it and closes it.
///
/// A failed accept waits [`ACCEPT_RETRY_MS`] before returning, so a caller that loops on
/// this does not spin.
///
/// # Errors
///
/// Returns [`Error::Accept`] if accepting failed, or whatever [`serve_connection`] returned.
/// The connection is closed either way; nothing here leaves the listener unusable.
pub async fn serve_next<L, D, P, M>(
    listener: &mut L,
    delay: &mut D,
    chassis: &mut Chassis<P, M>,
    page: &ControlPage,
) -> Result<Option<Command>>
where
    L: Listener,
    D: DelayNs,
    P: OutputPin<Error = Infallible>,
    M: SetDutyCycle,
{
    let mut connection = match listener.accept().await {
        Ok(connection) => connection,
        Err(e) => {
            delay.delay_ms(ACCEPT_RETRY_MS).await;
            return Err(e);
        }
    };
    let outcome = serve_connection(&mut connection, chassis, page).await;
    connection.close().await;
    outcome
}
