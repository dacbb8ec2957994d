#![no_std]
#![no_main]

use common::{AdcBase, PwmBase, TelemetryBase};
use embassy_stm32::{
    adc::{Adc, AnyAdcChannel, Instance, Resolution, RxDma, SampleTime},
    timer::{simple_pwm::SimplePwm, Channel, GeneralInstance4Channel},
};
use embassy_sync::{blocking_mutex::raw::RawMutex, signal::Signal};
use thermal_regulator::wire::encode_telemetry;

pub mod config;
pub mod ext;

#[macro_export]
macro_rules! timer_channel {
    ($channel: expr) => {{
        match $channel {
            1 => Some(embassy_stm32::timer::Channel::Ch1),
            2 => Some(embassy_stm32::timer::Channel::Ch2),
            3 => Some(embassy_stm32::timer::Channel::Ch3),
            4 => Some(embassy_stm32::timer::Channel::Ch4),
            _ => None,
        }
    }};
}

pub struct SimplePwmWrapper<'a, T: GeneralInstance4Channel> {
    inner: SimplePwm<'a, T>,
}

impl<'a, T: GeneralInstance4Channel> SimplePwmWrapper<'a, T> {
    pub fn new(p: SimplePwm<'a, T>) -> Self {
        Self { inner: p }
    }
}

impl<T: GeneralInstance4Channel> PwmBase for SimplePwmWrapper<'_, T> {
    type Channel = Channel;

    fn enable(&mut self, channel: Self::Channel) {
        self.inner.enable(channel);
    }

    fn disable(&mut self, channel: Self::Channel) {
        self.inner.disable(channel);
    }

    fn get_max_duty(&self) -> u64 {
        u64::from(self.inner.get_max_duty())
    }

    fn set_duty(&mut self, channel: Self::Channel, duty_cycle: u64) {
        self.inner.set_duty(channel, duty_cycle as u32);
    }
}

#[derive(Clone, Copy)]
pub struct ResolutionWrapper {
    inner: Resolution,
}

impl From<math::Resolution> for ResolutionWrapper {
    fn from(val: math::Resolution) -> Self {
        let inner = match val {
            math::Resolution::BITS16 => Resolution::BITS16,
            math::Resolution::BITS14 => Resolution::BITS14,
            math::Resolution::BITS12 => Resolution::BITS12,
            math::Resolution::BITS10 => Resolution::BITS10,
            math::Resolution::BITS8 => Resolution::BITS8,
        };
        Self { inner }
    }
}

pub struct AdcWrapper<'a, T: Instance, D: RxDma<T>> {
    inner: Adc<'a, T>,
    dma: D,
    sample_time: SampleTime,
}

impl<'a, T: Instance, D: RxDma<T>> AdcWrapper<'a, T, D> {
    pub fn new(mut adc: Adc<'a, T>, dma: D, resolution: ResolutionWrapper, sample_time: SampleTime) -> Self {
        adc.set_resolution(resolution.inner);
        adc.set_sample_time(sample_time);
        Self {
            inner: adc,
            dma,
            sample_time,
        }
    }
}

impl<T: Instance, D: RxDma<T>> AdcBase for AdcWrapper<'_, T, D> {
    type PinType = AnyAdcChannel<T>;

    fn read(&mut self, pin: &mut Self::PinType, readings: &mut [u16]) -> impl core::future::Future<Output = ()> {
        self.inner
            .read(&mut self.dma, [(pin, self.sample_time)].into_iter(), readings)
    }
}

/// Hands the encoded temperature to the UART writer task. A value that has
/// not been sent yet is replaced.
pub struct TelemetrySignal<'a, M: RawMutex> {
    signal: &'a Signal<M, u8>,
}

impl<'a, M: RawMutex> TelemetrySignal<'a, M> {
    pub fn new(signal: &'a Signal<M, u8>) -> Self {
        Self { signal }
    }
}

impl<M: RawMutex> TelemetryBase for TelemetrySignal<'_, M> {
    fn publish(&mut self, temperature: i32) {
        self.signal.signal(encode_telemetry(temperature));
    }
}
