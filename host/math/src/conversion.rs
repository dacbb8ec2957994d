use crate::Resolution;

// 3.3V reference on a 10mV/degree sensor
pub const REFERENCE_SCALE: i64 = 330;

/// Rescales a filtered ADC reading into temperature units.
///
/// `temperature = floor(filtered * scale / range)`, where `range` is the
/// full-scale count of `resolution`. With a power-of-two range this is the
/// same as shifting the product right, so the result always rounds down.
pub fn to_temperature(filtered: u16, scale: i64, resolution: Resolution) -> i32 {
    let range = u64::from(resolution) as i64;
    let temperature = i64::from(filtered).saturating_mul(scale).div_euclid(range);
    temperature.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_temperature_midscale() {
        let t = to_temperature(512, REFERENCE_SCALE, Resolution::BITS10);
        assert_eq!(165, t);
    }

    #[test]
    fn test_to_temperature_bounds() {
        assert_eq!(0, to_temperature(0, REFERENCE_SCALE, Resolution::BITS10));
        // 1023 * 330 / 1024 = 329.67
        assert_eq!(329, to_temperature(1023, REFERENCE_SCALE, Resolution::BITS10));
    }

    #[test]
    fn test_to_temperature_rounds_down() {
        // 100 * 330 / 1024 = 32.23, 102 * 330 / 1024 = 32.87, 103 * 330 / 1024 = 33.19
        assert_eq!(32, to_temperature(100, REFERENCE_SCALE, Resolution::BITS10));
        assert_eq!(32, to_temperature(102, REFERENCE_SCALE, Resolution::BITS10));
        assert_eq!(33, to_temperature(103, REFERENCE_SCALE, Resolution::BITS10));
        // 125 * 330 / 1024 = 40.28
        assert_eq!(40, to_temperature(125, REFERENCE_SCALE, Resolution::BITS10));
    }

    #[test]
    fn test_to_temperature_matches_shift() {
        for raw in 0..1024u16 {
            let shifted = ((i64::from(raw) * REFERENCE_SCALE) >> 10) as i32;
            assert_eq!(shifted, to_temperature(raw, REFERENCE_SCALE, Resolution::BITS10));
        }
    }

    #[test]
    fn test_to_temperature_monotonic() {
        let mut previous = to_temperature(0, REFERENCE_SCALE, Resolution::BITS10);
        for raw in 1..1024u16 {
            let t = to_temperature(raw, REFERENCE_SCALE, Resolution::BITS10);
            assert!(t >= previous);
            previous = t;
        }
    }

    #[test]
    fn test_to_temperature_other_resolution() {
        assert_eq!(165, to_temperature(2048, REFERENCE_SCALE, Resolution::BITS12));
    }
}
