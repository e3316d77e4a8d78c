//! The accept/serve loop on TCP port 80.
//!
//! Connections are served strictly one at a time. Any failure inside a connection is
//! logged and the loop moves on to a fresh socket.

use core::convert::Infallible;

use defmt::{Display2Format, debug, info, warn};
use embassy_net::Stack;
use embassy_net::tcp::TcpSocket;
use embassy_time::{Delay, Duration};
use embedded_hal::digital::OutputPin;
use embedded_hal::pwm::SetDutyCycle;

use crate::chassis::Chassis;
use crate::config::{HTTP_PORT, SOCKET_TIMEOUT_SECS};
use crate::http::{Connection, ControlPage, Listener, serve_next};
use crate::{Error, Result};

/// Opens a fresh socket on [`HTTP_PORT`] for every client, reusing one pair of buffers.
struct TcpListener {
    stack: Stack<'static>,
    rx_buffer: [u8; 2048],
    tx_buffer: [u8; 2048],
}

impl Listener for TcpListener {
    type Connection<'a> = TcpSocket<'a>;

    async fn accept(&mut self) -> Result<TcpSocket<'_>> {
        let mut socket = TcpSocket::new(self.stack, &mut self.rx_buffer, &mut self.tx_buffer);
        socket.set_timeout(Some(Duration::from_secs(SOCKET_TIMEOUT_SECS)));

        if let Err(e) = socket.accept(HTTP_PORT).await {
            warn!("Accept error: {:?}", e);
            return Err(Error::Accept);
        }
        Ok(socket)
    }
}

impl Connection for TcpSocket<'_> {
    async fn close(mut self) {
        TcpSocket::close(&mut self);
        if self.flush().await.is_err() {
            self.abort();
        }
    }
}

/// Serves the control page to one client after another, forever.
///
/// Every request is dispatched to `chassis` before the page is written back. Neither a
/// failed accept nor a broken connection ends the loop.
pub async fn serve_forever<P, M>(
    stack: Stack<'static>,
    chassis: &mut Chassis<P, M>,
    page: &ControlPage,
) -> !
where
    P: OutputPin<Error = Infallible>,
    M: SetDutyCycle,
{
    if let Some(config) = stack.config_v4() {
        info!(
            "Web server running at http://{}",
            Display2Format(&config.address.address())
        );
    }

    let mut listener = TcpListener {
        stack,
        rx_buffer: [0; 2048],
        tx_buffer: [0; 2048],
    };
    loop {
        match serve_next(&mut listener, &mut Delay, chassis, page).await {
            Ok(Some(command)) => debug!("{} -> {}", command, chassis.state()),
            Ok(None) => debug!("No command in request"),
            // Already logged with the stack's own reason.
            Err(Error::Accept) => {}
            Err(Error::ConnectionClosed) => debug!("Peer closed before sending a request"),
            Err(e) => warn!("Connection failed: {}", Display2Format(&e)),
        }
    }
}
