use fan::MAX_DUTY_PERCENT;
use math::piecewise::{evaluate, Band, LowerBound};

/// Fan curve: control target to fan duty percentage.
/// Bands are checked top-down, the first one containing the target wins.
pub const FAN_CURVE: [Band; 4] = [
    Band::constant(LowerBound::Above(76), 0),
    Band::linear(LowerBound::Above(31), -84, 100, 63),
    Band::linear(LowerBound::Above(20), -49, 10, 187),
    Band::constant(LowerBound::Unbounded, 100),
];

#[derive(Clone, Copy, Debug)]
pub struct DutyCycleMapper {
    curve: &'static [Band],
}

impl DutyCycleMapper {
    pub const fn new() -> Self {
        Self { curve: &FAN_CURVE }
    }

    /// Curve value before the final clamp. May be negative.
    pub fn evaluate(&self, target: i64) -> i64 {
        // the last band is unbounded, a target without a band runs the fan flat out
        evaluate(self.curve, target).unwrap_or(i64::from(MAX_DUTY_PERCENT))
    }

    pub fn map_to_duty(&self, target: i64) -> u8 {
        self.evaluate(target).clamp(0, i64::from(MAX_DUTY_PERCENT)) as u8
    }
}

impl Default for DutyCycleMapper {
    fn default() -> Self {
        Self::new()
    }
}
