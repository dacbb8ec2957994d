#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt-log", derive(defmt::Format))]
pub enum LowerBound {
    /// matches every value strictly greater than the bound
    Above(i64),
    Unbounded,
}

/// One segment of an integer piecewise-linear curve:
/// `floor(x * numerator / denominator) + intercept`.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt-log", derive(defmt::Format))]
pub struct Band {
    pub lower: LowerBound,
    pub numerator: i64,
    pub denominator: i64,
    pub intercept: i64,
}

impl Band {
    pub const fn constant(lower: LowerBound, value: i64) -> Self {
        Self {
            lower,
            numerator: 0,
            denominator: 1,
            intercept: value,
        }
    }

    pub const fn linear(lower: LowerBound, numerator: i64, denominator: i64, intercept: i64) -> Self {
        assert!(denominator > 0, "band denominator must be positive");
        Self {
            lower,
            numerator,
            denominator,
            intercept,
        }
    }

    pub fn contains(&self, x: i64) -> bool {
        match self.lower {
            LowerBound::Above(bound) => x > bound,
            LowerBound::Unbounded => true,
        }
    }

    pub fn apply(&self, x: i64) -> i64 {
        let product = i128::from(x) * i128::from(self.numerator);
        // positive denominator: euclidean division is floor division
        let value = product.div_euclid(i128::from(self.denominator)) + i128::from(self.intercept);
        value.clamp(i128::from(i64::MIN), i128::from(i64::MAX)) as i64
    }
}

/// Evaluates the first band, in table order, that contains `x`.
pub fn evaluate(bands: &[Band], x: i64) -> Option<i64> {
    bands.iter().find(|b| b.contains(x)).map(|b| b.apply(x))
}
