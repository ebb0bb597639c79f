//! Adaptive signal filtering for pointer-driven gaze angles.
//!
//! This module provides the one-euro adaptive low-pass filter used to smooth
//! raw solved yaw/pitch angles before they become channel targets. The
//! cutoff frequency rises with signal velocity, so the filter is smooth at
//! rest and responsive during fast pointer motion.

/// One-euro adaptive low-pass filter
pub mod one_euro;

pub use one_euro::OneEuroFilter;

/// Paired yaw/pitch filters for one tracking channel
pub struct OneEuroPair {
    yaw: OneEuroFilter,
    pitch: OneEuroFilter,
}

impl OneEuroPair {
    /// Create a filter pair sharing the same tuning
    #[must_use]
    pub fn new(min_cutoff: f32, beta: f32, d_cutoff: f32) -> Self {
        Self {
            yaw: OneEuroFilter::new(min_cutoff, beta, d_cutoff),
            pitch: OneEuroFilter::new(min_cutoff, beta, d_cutoff),
        }
    }

    /// Filter a (yaw, pitch) sample taken at `t_secs`
    pub fn filter(&mut self, yaw: f32, pitch: f32, t_secs: f64) -> (f32, f32) {
        (self.yaw.filter(yaw, t_secs), self.pitch.filter(pitch, t_secs))
    }

    /// Reset both filters to re-acquire like new
    pub fn reset(&mut self) {
        self.yaw.reset();
        self.pitch.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pair_first_sample_passes_through() {
        let mut pair = OneEuroPair::new(1.0, 0.3, 1.0);
        let (y, p) = pair.filter(0.4, -0.2, 0.0);
        assert_eq!(y, 0.4);
        assert_eq!(p, -0.2);
    }

    #[test]
    fn test_pair_reset() {
        let mut pair = OneEuroPair::new(1.0, 0.3, 1.0);
        pair.filter(0.4, -0.2, 0.0);
        pair.filter(0.5, -0.1, 0.016);
        pair.reset();

        // After reset the next sample passes through unfiltered
        let (y, p) = pair.filter(1.0, 1.0, 0.032);
        assert_eq!(y, 1.0);
        assert_eq!(p, 1.0);
    }
}
