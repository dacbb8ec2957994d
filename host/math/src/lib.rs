#![cfg_attr(not(test), no_std)]

pub mod conversion;
pub mod piecewise;

#[derive(Copy, Clone, PartialEq, Debug)]
#[cfg_attr(feature = "defmt-log", derive(defmt::Format))]
pub enum Resolution {
    BITS16,
    BITS14,
    BITS12,
    BITS10,
    BITS8,
}

impl From<Resolution> for u64 {
    fn from(value: Resolution) -> Self {
        match value {
            Resolution::BITS16 => 1 << 16,
            Resolution::BITS14 => 1 << 14,
            Resolution::BITS12 => 1 << 12,
            Resolution::BITS10 => 1 << 10,
            Resolution::BITS8 => 1 << 8,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolution_range() {
        assert_eq!(1024, u64::from(Resolution::BITS10));
        assert_eq!(4096, u64::from(Resolution::BITS12));
        assert_eq!(65536, u64::from(Resolution::BITS16));
    }
}
