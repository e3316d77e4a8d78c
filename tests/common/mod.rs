//! Host-side stand-ins for pins, PWM channels, delays and sockets.
#![allow(dead_code, reason = "each test binary uses a different subset")]

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::convert::Infallible;
use std::rc::Rc;
use std::task::Poll;

use embedded_hal::digital::{ErrorType as PinErrorType, OutputPin};
use embedded_hal::pwm::{ErrorType as PwmErrorType, SetDutyCycle};
use embedded_hal_async::delay::DelayNs;
use embedded_io_async::{ErrorKind, ErrorType, Read, Write};
use pico2w_robot::blink::Led;
use pico2w_robot::http::{Connection, Listener};
use pico2w_robot::{Chassis, Error};

/// Every pin write, as `(pin index, level)`, in order.
pub type WriteLog = Rc<RefCell<Vec<(usize, bool)>>>;

pub struct MockPin {
    index: usize,
    level: Rc<Cell<bool>>,
    log: WriteLog,
}

impl PinErrorType for MockPin {
    type Error = Infallible;
}

impl OutputPin for MockPin {
    fn set_low(&mut self) -> Result<(), Infallible> {
        self.level.set(false);
        self.log.borrow_mut().push((self.index, false));
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Infallible> {
        self.level.set(true);
        self.log.borrow_mut().push((self.index, true));
        Ok(())
    }
}

/// LED that records every level it is switched to.
#[derive(Clone, Default)]
pub struct MockLed {
    pub history: Rc<RefCell<Vec<bool>>>,
}

impl Led for MockLed {
    async fn set(&mut self, on: bool) {
        self.history.borrow_mut().push(on);
    }
}

/// Observes the four direction pins after they have been moved into a chassis.
#[derive(Clone, Default)]
pub struct Pins {
    levels: [Rc<Cell<bool>>; 4],
    pub log: WriteLog,
}

impl Pins {
    /// Pins that all start high, so the initial stop is visible.
    pub fn new() -> Self {
        let pins = Self::default();
        for level in &pins.levels {
            level.set(true);
        }
        pins
    }

    pub fn pin(&self, index: usize) -> MockPin {
        MockPin {
            index,
            level: Rc::clone(&self.levels[index]),
            log: Rc::clone(&self.log),
        }
    }

    pub fn levels(&self) -> [bool; 4] {
        [0, 1, 2, 3].map(|index| self.levels[index].get())
    }

    pub fn writes(&self) -> Vec<(usize, bool)> {
        self.log.borrow().clone()
    }

    pub fn clear_log(&self) {
        self.log.borrow_mut().clear();
    }
}

pub struct MockPwm {
    max: u16,
    duties: Rc<RefCell<Vec<u16>>>,
}

impl MockPwm {
    pub fn new(max: u16) -> (Self, Rc<RefCell<Vec<u16>>>) {
        let duties = Rc::new(RefCell::new(Vec::new()));
        (
            Self {
                max,
                duties: Rc::clone(&duties),
            },
            duties,
        )
    }
}

impl PwmErrorType for MockPwm {
    type Error = Infallible;
}

impl SetDutyCycle for MockPwm {
    fn max_duty_cycle(&self) -> u16 {
        self.max
    }

    fn set_duty_cycle(&mut self, duty: u16) -> Result<(), Infallible> {
        self.duties.borrow_mut().push(duty);
        Ok(())
    }
}

pub type TestChassis = Chassis<MockPin, MockPwm>;

/// A chassis on mock hardware, plus handles to watch the pins and both PWM channels.
pub fn chassis(speed: u16) -> (TestChassis, Pins, Rc<RefCell<Vec<u16>>>, Rc<RefCell<Vec<u16>>>) {
    let pins = Pins::new();
    let (ena, ena_duties) = MockPwm::new(u16::MAX);
    let (enb, enb_duties) = MockPwm::new(u16::MAX);
    let chassis = Chassis::new(
        pins.pin(0),
        pins.pin(1),
        pins.pin(2),
        pins.pin(3),
        ena,
        enb,
        speed,
    )
    .unwrap();
    (chassis, pins, ena_duties, enb_duties)
}

/// Delay that yields to the executor once per call and records what was asked for.
#[derive(Clone, Default)]
pub struct MockDelay {
    pub calls: Rc<Cell<u32>>,
    pub last_ms: Rc<Cell<Option<u32>>>,
}

impl DelayNs for MockDelay {
    async fn delay_ns(&mut self, _ns: u32) {
        self.calls.set(self.calls.get() + 1);
        yield_once().await;
    }

    async fn delay_ms(&mut self, ms: u32) {
        self.calls.set(self.calls.get() + 1);
        self.last_ms.set(Some(ms));
        yield_once().await;
    }
}

async fn yield_once() {
    let mut yielded = false;
    std::future::poll_fn(|cx| {
        if yielded {
            Poll::Ready(())
        } else {
            yielded = true;
            cx.waker().wake_by_ref();
            Poll::Pending
        }
    })
    .await;
}

/// One client connection: a canned request and everything the server wrote back.
#[derive(Default)]
pub struct MockSocket {
    request: Vec<u8>,
    read_pos: usize,
    pub written: Vec<u8>,
    pub flushed: bool,
    pub fail_reads: bool,
    /// Fail every write once this many bytes have been accepted.
    pub write_limit: Option<usize>,
    closed_into: Option<ClosedLog>,
}

impl MockSocket {
    pub fn with_request(request: &[u8]) -> Self {
        Self {
            request: request.to_vec(),
            ..Self::default()
        }
    }

    pub fn written_text(&self) -> String {
        String::from_utf8(self.written.clone()).unwrap()
    }
}

impl ErrorType for MockSocket {
    type Error = ErrorKind;
}

impl Read for MockSocket {
    async fn read(&mut self, buf: &mut [u8]) -> Result<usize, ErrorKind> {
        if self.fail_reads {
            return Err(ErrorKind::ConnectionReset);
        }
        let remaining = &self.request[self.read_pos..];
        let len = remaining.len().min(buf.len());
        buf[..len].copy_from_slice(&remaining[..len]);
        self.read_pos += len;
        Ok(len)
    }
}

impl Write for MockSocket {
    async fn write(&mut self, buf: &[u8]) -> Result<usize, ErrorKind> {
        if let Some(limit) = self.write_limit {
            if self.written.len() >= limit {
                return Err(ErrorKind::BrokenPipe);
            }
        }
        self.written.extend_from_slice(buf);
        Ok(buf.len())
    }

    async fn flush(&mut self) -> Result<(), ErrorKind> {
        self.flushed = true;
        Ok(())
    }
}

impl Connection for MockSocket {
    async fn close(mut self) {
        if let Some(log) = self.closed_into.take() {
            log.borrow_mut().push(self);
        }
    }
}

/// Sockets in the order they were closed.
pub type ClosedLog = Rc<RefCell<Vec<MockSocket>>>;

/// Hands out queued sockets; a `None` entry is a failed accept.
pub struct MockListener {
    queue: VecDeque<Option<MockSocket>>,
    pub closed: ClosedLog,
}

impl MockListener {
    pub fn new(queue: impl IntoIterator<Item = Option<MockSocket>>) -> Self {
        Self {
            queue: queue.into_iter().collect(),
            closed: ClosedLog::default(),
        }
    }
}

impl Listener for MockListener {
    type Connection<'a> = MockSocket;

    async fn accept(&mut self) -> Result<MockSocket, Error> {
        let mut socket = self.queue.pop_front().flatten().ok_or(Error::Accept)?;
        socket.closed_into = Some(Rc::clone(&self.closed));
        Ok(socket)
    }
}
