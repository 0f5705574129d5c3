//! Software PWM operations
//!
//! PWM is only available on the user GPIO subset.

use super::limits::{check_duty_cycle, check_duty_cycle_range, check_user_gpio};
use super::Pigpio;
use crate::error::Result;
use crate::protocol::Command;
use crate::transport::Transport;

impl<T: Transport> Pigpio<T> {
    /// Start PWM with `duty` out of the pin's current range
    pub fn set_pwm_duty_cycle(&self, pin: u32, duty: u32) -> Result<()> {
        check_user_gpio(pin)?;
        check_duty_cycle(duty)?;
        self.call(Command::SetPwmDutyCycle, pin, duty)?;
        Ok(())
    }

    pub fn get_pwm_duty_cycle(&self, pin: u32) -> Result<u32> {
        check_user_gpio(pin)?;
        self.value(Command::GetPwmDutyCycle, pin, 0)
    }

    /// Set the duty-cycle range; returns the real range the hardware settled on
    pub fn set_pwm_range(&self, pin: u32, range: u32) -> Result<u32> {
        check_user_gpio(pin)?;
        check_duty_cycle_range(range)?;
        self.value(Command::SetPwmRange, pin, range)
    }

    pub fn get_pwm_range(&self, pin: u32) -> Result<u32> {
        check_user_gpio(pin)?;
        self.value(Command::GetPwmRange, pin, 0)
    }

    pub fn get_pwm_real_range(&self, pin: u32) -> Result<u32> {
        check_user_gpio(pin)?;
        self.value(Command::GetPwmRealRange, pin, 0)
    }

    /// Request a PWM frequency; returns the closest one the daemon chose
    pub fn set_pwm_frequency(&self, pin: u32, hz: u32) -> Result<u32> {
        check_user_gpio(pin)?;
        self.value(Command::SetPwmFrequency, pin, hz)
    }

    pub fn get_pwm_frequency(&self, pin: u32) -> Result<u32> {
        check_user_gpio(pin)?;
        self.value(Command::GetPwmFrequency, pin, 0)
    }
}
