#![cfg_attr(not(test), no_std)]

pub struct PwmOutputConfig {
    pub channel: u8,
}

pub trait PwmBase {
    type Channel: Copy;

    fn enable(&mut self, channel: Self::Channel);
    fn disable(&mut self, channel: Self::Channel);
    fn get_max_duty(&self) -> u64;
    fn set_duty(&mut self, channel: Self::Channel, duty_cycle: u64);
}

pub trait AdcBase {
    type PinType;

    // one conversion per element of `readings`
    fn read(
        &mut self,
        pin: &mut Self::PinType,
        readings: &mut [u16],
    ) -> impl core::future::Future<Output = ()>;
}

/// Outbound channel for the filtered temperature.
///
/// Implementations must not block: a value published while the previous one
/// is still in flight replaces it.
pub trait TelemetryBase {
    fn publish(&mut self, temperature: i32);
}
