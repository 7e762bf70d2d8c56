//! Rate-based exponential easing.
//!
//! Every animator in the scene approaches its target the same way:
//! `value += (target - value) * min(rate * dt, 1)` once per frame. The value
//! never crosses the target and never leaves the interval spanned by its
//! start and target.

use arbor_shared::damping_factor;

/// A scalar eased toward a moving target at a fixed rate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DampedValue {
    current: f32,
    rate: f32,
}

impl DampedValue {
    /// Creates a value at `initial` that eases at `rate` per second.
    #[must_use]
    pub const fn new(initial: f32, rate: f32) -> Self {
        Self {
            current: initial,
            rate,
        }
    }

    /// Current value.
    #[inline]
    #[must_use]
    pub fn value(&self) -> f32 {
        self.current
    }

    /// Easing rate per second.
    #[inline]
    #[must_use]
    pub fn rate(&self) -> f32 {
        self.rate
    }

    /// Advances one frame toward `target` and returns the new value.
    #[inline]
    pub fn update(&mut self, target: f32, dt: f32) -> f32 {
        self.current += (target - self.current) * damping_factor(self.rate, dt);
        self.current
    }

    /// Jumps straight to `value`.
    pub fn set_immediate(&mut self, value: f32) {
        self.current = value;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recurrence_matches_formula() {
        let mut v = DampedValue::new(0.0, 3.0);
        let dt = 1.0 / 60.0;
        let mut expected = 0.0_f32;
        for _ in 0..120 {
            expected += 3.0 * dt * (1.0 - expected);
            v.update(1.0, dt);
            assert!((v.value() - expected).abs() < 1e-6);
        }
    }

    #[test]
    fn test_monotonic_never_overshoots() {
        let mut v = DampedValue::new(0.0, 2.0);
        let mut last = v.value();
        for dt in [0.001, 0.016, 0.1, 0.3, 0.5, 2.0, 0.016] {
            let now = v.update(1.0, dt);
            assert!(now >= last);
            assert!(now <= 1.0);
            assert!(now >= 0.0);
            last = now;
        }
        // rate * dt = 4 > 1 clamps onto the target exactly.
        assert_eq!(last, 1.0);
    }

    #[test]
    fn test_converges_back_down() {
        let mut v = DampedValue::new(1.0, 2.0);
        for _ in 0..600 {
            v.update(0.0, 1.0 / 60.0);
        }
        assert!(v.value() < 1e-4);
        assert!(v.value() >= 0.0);
    }
}
