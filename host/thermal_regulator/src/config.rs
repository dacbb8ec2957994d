use core::fmt::Display;

use math::{conversion::REFERENCE_SCALE, Resolution};

pub const DEFAULT_GAIN: i32 = 5;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt-log", derive(defmt::Format))]
pub enum ConfigError {
    NonPositiveGain(i32),
    NonPositiveScale(i64),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ConfigError::NonPositiveGain(k) => write!(f, "gain must be positive, got {}", k),
            ConfigError::NonPositiveScale(s) => write!(f, "temperature scale must be positive, got {}", s),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "defmt-log", derive(defmt::Format))]
pub struct RegulatorConfig {
    gain: i32,
    scale: i64,
    resolution: Resolution,
}

impl RegulatorConfig {
    pub fn new(gain: i32, scale: i64, resolution: Resolution) -> Result<Self, ConfigError> {
        if gain <= 0 {
            return Err(ConfigError::NonPositiveGain(gain));
        }
        if scale <= 0 {
            return Err(ConfigError::NonPositiveScale(scale));
        }
        Ok(Self {
            gain,
            scale,
            resolution,
        })
    }

    pub fn get_gain(&self) -> i32 {
        self.gain
    }

    pub fn get_scale(&self) -> i64 {
        self.scale
    }

    pub fn get_resolution(&self) -> Resolution {
        self.resolution
    }
}

impl Default for RegulatorConfig {
    fn default() -> Self {
        Self {
            gain: DEFAULT_GAIN,
            scale: REFERENCE_SCALE,
            resolution: Resolution::BITS10,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = RegulatorConfig::default();
        assert_eq!(5, config.get_gain());
        assert_eq!(330, config.get_scale());
        assert_eq!(Resolution::BITS10, config.get_resolution());
        assert_eq!(Ok(config), RegulatorConfig::new(5, 330, Resolution::BITS10));
    }

    #[test]
    fn test_config_rejects_gain() {
        assert_eq!(
            Err(ConfigError::NonPositiveGain(0)),
            RegulatorConfig::new(0, 330, Resolution::BITS10)
        );
        assert_eq!(
            Err(ConfigError::NonPositiveGain(-5)),
            RegulatorConfig::new(-5, -1, Resolution::BITS10)
        );
    }

    #[test]
    fn test_config_rejects_scale() {
        assert_eq!(
            Err(ConfigError::NonPositiveScale(0)),
            RegulatorConfig::new(5, 0, Resolution::BITS12)
        );
    }

    #[test]
    fn test_config_error_display() {
        assert_eq!(
            "gain must be positive, got -2",
            ConfigError::NonPositiveGain(-2).to_string()
        );
        assert_eq!(
            "temperature scale must be positive, got 0",
            ConfigError::NonPositiveScale(0).to_string()
        );
    }
}
