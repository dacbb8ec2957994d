use portable_atomic::{AtomicI32, Ordering};

pub const DEFAULT_SETPOINT: i32 = 40;

/// Goal temperature shared between the inbound data handler (sole writer)
/// and the regulator. Last write wins; no validation.
pub struct Setpoint {
    goal: AtomicI32,
}

impl Setpoint {
    pub const fn new(initial: i32) -> Self {
        Self {
            goal: AtomicI32::new(initial),
        }
    }

    pub fn set_goal(&self, value: i32) {
        self.goal.store(value, Ordering::Relaxed);
    }

    pub fn get_goal(&self) -> i32 {
        self.goal.load(Ordering::Relaxed)
    }
}

impl Default for Setpoint {
    fn default() -> Self {
        Self::new(DEFAULT_SETPOINT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    static SHARED: Setpoint = Setpoint::new(DEFAULT_SETPOINT);

    #[test]
    fn test_setpoint_default() {
        assert_eq!(40, Setpoint::default().get_goal());
    }

    #[test]
    fn test_setpoint_last_write_wins() {
        let setpoint = Setpoint::default();
        setpoint.set_goal(25);
        setpoint.set_goal(-3);
        setpoint.set_goal(255);
        assert_eq!(255, setpoint.get_goal());
    }

    #[test]
    fn test_setpoint_shared_static() {
        let handle = std::thread::spawn(|| SHARED.set_goal(60));
        handle.join().unwrap();
        assert_eq!(60, SHARED.get_goal());
    }
}
