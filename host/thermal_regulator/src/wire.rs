//! Single-byte records exchanged over the serial link.

/// Inbound setpoint record, taken verbatim.
pub fn decode_setpoint(byte: u8) -> i32 {
    i32::from(byte)
}

/// Outbound telemetry record: the low byte of the temperature.
pub fn encode_telemetry(temperature: i32) -> u8 {
    temperature as u8
}
