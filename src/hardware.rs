//! Motor wiring on the Pico 2 W.
//!
//! - IN1 GP27, IN2 GP26 (left motor direction)
//! - IN3 GP21, IN4 GP20 (right motor direction)
//! - ENB GP18 (PWM1 A), ENA GP19 (PWM1 B)

use defmt::info;
use embassy_rp::Peri;
use embassy_rp::clocks::clk_sys_freq;
use embassy_rp::gpio::{Level, Output};
use embassy_rp::peripherals::{PIN_18, PIN_19, PIN_20, PIN_21, PIN_26, PIN_27, PWM_SLICE1};
use embassy_rp::pwm::{Config as PwmConfig, Pwm, PwmOutput};

use crate::chassis::Chassis;
use crate::config::{MOTOR_SPEED, PWM_FREQUENCY_HZ};
use crate::pwm::PwmTiming;
use crate::{Error, Result};

/// The chassis as wired on the robot.
pub type RobotChassis = Chassis<Output<'static>, PwmOutput<'static>>;

/// Peripherals the motor driver board is connected to.
pub struct MotorPins {
    pub in1: Peri<'static, PIN_27>,
    pub in2: Peri<'static, PIN_26>,
    pub in3: Peri<'static, PIN_21>,
    pub in4: Peri<'static, PIN_20>,
    pub slice: Peri<'static, PWM_SLICE1>,
    pub enb: Peri<'static, PIN_18>,
    pub ena: Peri<'static, PIN_19>,
}

impl MotorPins {
    /// Configures the enable slice for [`PWM_FREQUENCY_HZ`] and returns a stopped chassis
    /// running at [`MOTOR_SPEED`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::Pwm`] if either enable channel is unavailable or rejects the duty.
    pub fn into_chassis(self) -> Result<RobotChassis> {
        let clk = clk_sys_freq();
        let timing = PwmTiming::for_frequency(clk, PWM_FREQUENCY_HZ);
        info!(
            "motor pwm clk={}Hz div={} top={} duty={}/65535",
            clk, timing.divider, timing.top, MOTOR_SPEED
        );

        let mut config = PwmConfig::default();
        config.divider = timing.divider.into();
        config.top = timing.top;
        let (enb, ena) = Pwm::new_output_ab(self.slice, self.enb, self.ena, config).split();
        let (Some(ena), Some(enb)) = (ena, enb) else {
            return Err(Error::Pwm);
        };

        Chassis::new(
            Output::new(self.in1, Level::Low),
            Output::new(self.in2, Level::Low),
            Output::new(self.in3, Level::Low),
            Output::new(self.in4, Level::Low),
            ena,
            enb,
            MOTOR_SPEED,
        )
        .map_err(|_| Error::Pwm)
    }
}
