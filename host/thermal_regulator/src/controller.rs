/// Proportional feedback law.
///
/// `error = setpoint - temperature`, `target = k * error + setpoint`.
/// The target is not bounded here: an aggressive gain can push it far outside
/// the physical range and the duty-cycle mapper clamps the result.
pub fn compute_target(temperature: i32, setpoint: i32, k: i32) -> i64 {
    let error = i64::from(setpoint) - i64::from(temperature);
    i64::from(k)
        .saturating_mul(error)
        .saturating_add(i64::from(setpoint))
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FeedbackController {
    k: i32,
}

impl FeedbackController {
    pub fn new(k: i32) -> Self {
        Self { k }
    }

    pub fn compute_target(&self, temperature: i32, setpoint: i32) -> i64 {
        compute_target(temperature, setpoint, self.k)
    }

    pub fn get_gain(&self) -> i32 {
        self.k
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compute_target_overheat() {
        assert_eq!(-585, compute_target(165, 40, 5));
    }

    #[test]
    fn test_compute_target_underheat() {
        // error = 10
        assert_eq!(90, compute_target(30, 40, 5));
    }

    #[test]
    fn test_compute_target_no_error() {
        assert_eq!(40, compute_target(40, 40, 5));
        assert_eq!(-7, compute_target(-7, -7, 12));
    }

    #[test]
    fn test_compute_target_matches_law() {
        for temperature in -50..400 {
            for setpoint in [-20, 0, 25, 40, 255] {
                for k in [1, 5, 20] {
                    let expected =
                        i64::from(k) * (i64::from(setpoint) - i64::from(temperature)) + i64::from(setpoint);
                    assert_eq!(expected, compute_target(temperature, setpoint, k));
                }
            }
        }
    }

    #[test]
    fn test_compute_target_extreme_inputs() {
        let exact = |t: i32, s: i32, k: i32| {
            let wide = i128::from(k) * (i128::from(s) - i128::from(t)) + i128::from(s);
            wide as i64
        };
        for (t, s, k) in [
            (i32::MIN, i32::MAX, i32::MAX),
            (i32::MAX, i32::MIN, i32::MAX),
            (i32::MIN, i32::MAX, i32::MIN),
            (i32::MAX, i32::MIN, i32::MIN),
        ] {
            assert_eq!(exact(t, s, k), compute_target(t, s, k));
        }
    }

    #[test]
    fn test_feedback_controller() {
        let controller = FeedbackController::new(5);
        assert_eq!(5, controller.get_gain());
        assert_eq!(-585, controller.compute_target(165, 40));
    }
}
