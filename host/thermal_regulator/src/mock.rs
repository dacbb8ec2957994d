//! Peripheral doubles shared by the unit tests.

use common::{AdcBase, PwmBase, TelemetryBase};

#[derive(Default)]
pub struct PwmChannel {
    pub enabled: bool,
    pub duty_cycle: u64,
}

#[derive(Clone, Copy)]
pub enum Channel {
    Ch1,
    Ch2,
}

pub struct PwmWrapper {
    pub ch1: PwmChannel,
    pub ch2: PwmChannel,
    pub max_duty: u64,
}

impl PwmWrapper {
    pub fn new(max_duty: u64) -> Self {
        Self {
            ch1: PwmChannel::default(),
            ch2: PwmChannel::default(),
            max_duty,
        }
    }

    fn channel(&mut self, channel: Channel) -> &mut PwmChannel {
        match channel {
            Channel::Ch1 => &mut self.ch1,
            Channel::Ch2 => &mut self.ch2,
        }
    }
}

impl PwmBase for PwmWrapper {
    type Channel = Channel;

    fn enable(&mut self, channel: Self::Channel) {
        self.channel(channel).enabled = true;
    }

    fn disable(&mut self, channel: Self::Channel) {
        self.channel(channel).enabled = false;
    }

    fn get_max_duty(&self) -> u64 {
        self.max_duty
    }

    fn set_duty(&mut self, channel: Self::Channel, duty_cycle: u64) {
        self.channel(channel).duty_cycle = duty_cycle;
    }
}

/// Replays `values` in a loop, one per conversion.
pub struct AdcWrapper {
    values: Vec<u16>,
    next: usize,
    pub conversions: usize,
}

impl AdcWrapper {
    pub fn new(values: &[u16]) -> Self {
        Self {
            values: values.to_vec(),
            next: 0,
            conversions: 0,
        }
    }
}

impl AdcBase for AdcWrapper {
    type PinType = ();

    fn read(&mut self, _pin: &mut Self::PinType, readings: &mut [u16]) -> impl core::future::Future<Output = ()> {
        for reading in readings.iter_mut() {
            *reading = self.values[self.next];
            self.next = (self.next + 1) % self.values.len();
            self.conversions += 1;
        }
        core::future::ready(())
    }
}

#[derive(Default)]
pub struct TelemetryWrapper {
    pub sent: Vec<i32>,
}

impl TelemetryBase for TelemetryWrapper {
    fn publish(&mut self, temperature: i32) {
        self.sent.push(temperature);
    }
}
