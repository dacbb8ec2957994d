#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt-log", derive(defmt::Format))]
pub enum RegulatorEvent {
    /// periodic sampling trigger
    Tick,
    /// raw ADC reading from a completed conversion
    SampleReady(u16),
    /// one setpoint byte from the serial link
    SetpointReceived(u8),
}
