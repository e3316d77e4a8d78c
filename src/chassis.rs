//! Differential drive through a dual H-bridge (L298N style).
//!
//! Each motor has two direction inputs; their polarity selects forward, reverse or
//! off. Speed comes from the two enable inputs, driven by PWM at a duty written once at
//! construction.
//!
//! | State    | IN1 | IN2 | IN3 | IN4 |
//! |----------|-----|-----|-----|-----|
//! | Stop     | 0   | 0   | 0   | 0   |
//! | Forward  | 1   | 0   | 1   | 0   |
//! | Backward | 0   | 1   | 0   | 1   |
//! | Left     | 0   | 1   | 1   | 0   |
//! | Right    | 1   | 0   | 0   | 1   |

use core::convert::Infallible;

use embedded_hal::digital::{OutputPin, PinState};
use embedded_hal::pwm::SetDutyCycle;

/// What the chassis is currently doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MotorState {
    #[default]
    Stop,
    Forward,
    Backward,
    Left,
    Right,
}

impl MotorState {
    /// Direction pin levels as `[IN1, IN2, IN3, IN4]`.
    #[must_use]
    pub const fn levels(self) -> [bool; 4] {
        match self {
            Self::Stop => [false, false, false, false],
            Self::Forward => [true, false, true, false],
            Self::Backward => [false, true, false, true],
            Self::Left => [false, true, true, false],
            Self::Right => [true, false, false, true],
        }
    }
}

/// Two-motor chassis owning its four direction pins and both enable channels.
///
/// The enable channels are private: their duty is set in [`Chassis::new`] and cannot be
/// changed afterwards.
pub struct Chassis<P, M> {
    in1: P,
    in2: P,
    in3: P,
    in4: P,
    _ena: M,
    _enb: M,
    state: MotorState,
}

impl<P, M> Chassis<P, M>
where
    P: OutputPin<Error = Infallible>,
    M: SetDutyCycle,
{
    /// Sets both enable channels to `speed / 65535` of full duty and stops the motors.
    ///
    /// # Errors
    ///
    /// Returns the PWM driver's error if it rejects the duty cycle.
    pub fn new(
        in1: P,
        in2: P,
        in3: P,
        in4: P,
        mut ena: M,
        mut enb: M,
        speed: u16,
    ) -> Result<Self, M::Error> {
        ena.set_duty_cycle_fraction(speed, u16::MAX)?;
        enb.set_duty_cycle_fraction(speed, u16::MAX)?;

        let mut chassis = Self {
            in1,
            in2,
            in3,
            in4,
            _ena: ena,
            _enb: enb,
            state: MotorState::Stop,
        };
        // Pins start in an unknown state; write them regardless of `state`.
        chassis.write_levels(MotorState::Stop.levels());
        Ok(chassis)
    }

    #[must_use]
    pub const fn state(&self) -> MotorState {
        self.state
    }

    /// Puts the chassis into `state`. Returns `true` if the state changed.
    ///
    /// Requesting the state already in force writes nothing; the pins already hold the
    /// required levels.
    pub fn drive(&mut self, state: MotorState) -> bool {
        if state == self.state {
            return false;
        }
        self.write_levels(state.levels());
        self.state = state;
        true
    }

    pub fn stop(&mut self) {
        self.drive(MotorState::Stop);
    }

    pub fn forward(&mut self) {
        self.drive(MotorState::Forward);
    }

    pub fn backward(&mut self) {
        self.drive(MotorState::Backward);
    }

    /// Spins in place: left motor reverse, right motor forward.
    pub fn left(&mut self) {
        self.drive(MotorState::Left);
    }

    /// Spins in place: left motor forward, right motor reverse.
    pub fn right(&mut self) {
        self.drive(MotorState::Right);
    }

    fn write_levels(&mut self, [in1, in2, in3, in4]: [bool; 4]) {
        let Ok(()) = self.in1.set_state(PinState::from(in1));
        let Ok(()) = self.in2.set_state(PinState::from(in2));
        let Ok(()) = self.in3.set_state(PinState::from(in3));
        let Ok(()) = self.in4.set_state(PinState::from(in4));
    }
}
