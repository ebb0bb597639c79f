//! One-euro adaptive low-pass filter.
//!
//! The cutoff frequency increases with the estimated signal velocity:
//! near-still input gets heavy smoothing, fast motion tracks tightly.

use std::f32::consts::PI;

/// One-euro adaptive scalar filter
pub struct OneEuroFilter {
    min_cutoff: f32,
    beta: f32,
    d_cutoff: f32,

    prev_value: Option<f32>,
    prev_derivative: f32,
    prev_time: f64,
}

impl OneEuroFilter {
    /// Create a new one-euro filter
    ///
    /// # Panics
    ///
    /// Panics if `min_cutoff` or `d_cutoff` is not positive, or if `beta`
    /// is negative
    #[must_use]
    pub fn new(min_cutoff: f32, beta: f32, d_cutoff: f32) -> Self {
        assert!(min_cutoff > 0.0, "Minimum cutoff must be positive");
        assert!(beta >= 0.0, "Beta must be non-negative");
        assert!(d_cutoff > 0.0, "Derivative cutoff must be positive");
        Self {
            min_cutoff,
            beta,
            d_cutoff,
            prev_value: None,
            prev_derivative: 0.0,
            prev_time: 0.0,
        }
    }

    /// Smoothing coefficient for a cutoff frequency over elapsed time `te`
    fn smoothing_factor(te: f32, cutoff: f32) -> f32 {
        let r = 2.0 * PI * cutoff * te;
        r / (r + 1.0)
    }

    /// Filter a sample taken at `t_secs`.
    ///
    /// The first sample is returned unchanged and primes the filter state.
    /// A non-positive elapsed time returns the previous output without
    /// mutating state, so duplicate or non-monotonic timestamps never
    /// divide by zero.
    pub fn filter(&mut self, sample: f32, t_secs: f64) -> f32 {
        let prev = match self.prev_value {
            Some(v) => v,
            None => {
                self.prev_value = Some(sample);
                self.prev_time = t_secs;
                return sample;
            }
        };

        let te = (t_secs - self.prev_time) as f32;
        if te <= 0.0 {
            return prev;
        }

        // Velocity estimate, smoothed by the derivative cutoff
        let a_d = Self::smoothing_factor(te, self.d_cutoff);
        let derivative = (sample - prev) / te;
        let derivative = a_d.mul_add(derivative - self.prev_derivative, self.prev_derivative);

        // Cutoff rises with velocity
        let cutoff = self.beta.mul_add(derivative.abs(), self.min_cutoff);
        let a = Self::smoothing_factor(te, cutoff);
        let filtered = a.mul_add(sample - prev, prev);

        self.prev_value = Some(filtered);
        self.prev_derivative = derivative;
        self.prev_time = t_secs;

        filtered
    }

    /// Reset filter state
    pub fn reset(&mut self) {
        self.prev_value = None;
        self.prev_derivative = 0.0;
        self.prev_time = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_sample_passes_through() {
        let mut filter = OneEuroFilter::new(1.0, 0.3, 1.0);
        assert_eq!(filter.filter(5.0, 0.1), 5.0);
    }

    #[test]
    fn test_monotonic_convergence() {
        let mut filter = OneEuroFilter::new(1.0, 0.3, 1.0);
        filter.filter(0.0, 0.0);

        // Constant input: output converges toward it and never overshoots
        let mut last = 0.0;
        for i in 1..200 {
            let out = filter.filter(10.0, f64::from(i) * 0.016);
            assert!(out >= last, "output regressed at step {i}");
            assert!(out <= 10.0, "output overshot at step {i}");
            last = out;
        }
        assert!((last - 10.0).abs() < 0.01);
    }

    #[test]
    fn test_duplicate_timestamp_returns_previous() {
        let mut filter = OneEuroFilter::new(1.0, 0.3, 1.0);
        filter.filter(1.0, 0.0);
        let out = filter.filter(2.0, 0.016);

        // Same timestamp again: previous output, state untouched
        assert_eq!(filter.filter(100.0, 0.016), out);
        assert_eq!(filter.filter(100.0, 0.010), out);
    }

    #[test]
    fn test_fast_motion_tracks_tighter() {
        // Higher beta tracks a moving signal with less lag
        let mut slow = OneEuroFilter::new(1.0, 0.0, 1.0);
        let mut fast = OneEuroFilter::new(1.0, 5.0, 1.0);

        slow.filter(0.0, 0.0);
        fast.filter(0.0, 0.0);

        let mut slow_out = 0.0;
        let mut fast_out = 0.0;
        for i in 1..30 {
            let t = f64::from(i) * 0.016;
            let x = i as f32 * 2.0;
            slow_out = slow.filter(x, t);
            fast_out = fast.filter(x, t);
        }
        assert!(fast_out > slow_out);
    }

    #[test]
    #[should_panic(expected = "Minimum cutoff must be positive")]
    fn test_zero_min_cutoff() {
        let _ = OneEuroFilter::new(0.0, 0.3, 1.0);
    }

    #[test]
    #[should_panic(expected = "Derivative cutoff must be positive")]
    fn test_zero_d_cutoff() {
        let _ = OneEuroFilter::new(1.0, 0.3, 0.0);
    }
}
