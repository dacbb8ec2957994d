#![cfg_attr(not(test), no_std)]

use common::{PwmBase, PwmOutputConfig};

pub const MAX_DUTY_PERCENT: u8 = 100;

pub struct FanConfig {
    pub pwm: PwmOutputConfig,
}

pub struct FanController<C: Copy + Clone> {
    ch: C,
    duty: u8,
}

impl<C: Copy + Clone> FanController<C> {
    pub fn new(ch: C) -> Self {
        Self { ch, duty: 0 }
    }

    pub fn enable<P: PwmBase<Channel = C>>(&self, pwm: &mut P) {
        pwm.enable(self.ch);
    }

    pub fn disable<P: PwmBase<Channel = C>>(&self, pwm: &mut P) {
        pwm.disable(self.ch);
    }

    /// Applies `percent` of the PWM period and returns the compare value
    /// written to the timer.
    pub fn set_duty<P: PwmBase<Channel = C>>(&mut self, percent: u8, pwm: &mut P) -> u64 {
        let percent = percent.min(MAX_DUTY_PERCENT);
        let ticks = pwm.get_max_duty() * u64::from(percent) / u64::from(MAX_DUTY_PERCENT);
        pwm.set_duty(self.ch, ticks);
        self.duty = percent;
        ticks
    }

    pub fn get_duty(&self) -> u8 {
        self.duty
    }
}
