//! Checkpoint interpolation.
//!
//! The choreography drives a handful of scalars (scale, position, letter
//! progress) and derives every painted property from them through piecewise
//! linear checkpoint maps, e.g. position `[1, 4, 5, 6]` → translate-x
//! `[0, 3, 40, 0]`.

/// Piecewise-linear mapping from input checkpoints to output values.
///
/// Inputs must be strictly increasing. Outside the checkpoint range the
/// first/last segment is extended linearly, matching the extrapolation of
/// the animation driver the geometry tables were tuned against.
#[derive(Debug, Clone)]
pub struct InterpolationRange {
    input: Vec<f32>,
    output: Vec<f32>,
}

impl InterpolationRange {
    /// Build a range. Panics on malformed checkpoint tables: the tables are
    /// compile-time constants, so a bad one is a programming error.
    pub fn new(input: impl Into<Vec<f32>>, output: impl Into<Vec<f32>>) -> Self {
        let input = input.into();
        let output = output.into();
        assert!(
            input.len() == output.len() && input.len() >= 2,
            "interpolation range needs matching input/output checkpoints"
        );
        assert!(
            input.windows(2).all(|w| w[0] < w[1]),
            "interpolation inputs must be strictly increasing"
        );
        Self { input, output }
    }

    /// Map `value` through the checkpoints.
    pub fn map(&self, value: f32) -> f32 {
        // Pick the segment the value falls in; clamp to the outermost
        // segments so out-of-range values extend linearly.
        let last = self.input.len() - 1;
        let i = match self.input.iter().position(|&cp| value < cp) {
            Some(0) => 0,
            Some(i) => i - 1,
            None => last - 1,
        };

        let (x0, x1) = (self.input[i], self.input[i + 1]);
        let (y0, y1) = (self.output[i], self.output[i + 1]);
        y0 + (value - x0) / (x1 - x0) * (y1 - y0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_at_checkpoints() {
        let r = InterpolationRange::new([1.0, 4.0, 5.0, 6.0], [0.0, 3.0, 40.0, 0.0]);
        assert_eq!(r.map(1.0), 0.0);
        assert_eq!(r.map(4.0), 3.0);
        assert_eq!(r.map(5.0), 40.0);
        assert_eq!(r.map(6.0), 0.0);
    }

    #[test]
    fn linear_between_checkpoints() {
        let r = InterpolationRange::new([1.0, 4.0, 5.0, 6.0], [0.0, 3.0, 40.0, 0.0]);
        assert!((r.map(2.5) - 1.5).abs() < 1e-5);
        assert!((r.map(4.5) - 21.5).abs() < 1e-5);
        assert!((r.map(5.5) - 20.0).abs() < 1e-5);
    }

    #[test]
    fn extends_past_the_ends() {
        let r = InterpolationRange::new([0.0, 1.0], [0.0, 10.0]);
        assert_eq!(r.map(-0.5), -5.0);
        assert_eq!(r.map(1.5), 15.0);
    }

    #[test]
    #[should_panic(expected = "strictly increasing")]
    fn rejects_unsorted_inputs() {
        InterpolationRange::new([0.0, 0.0], [1.0, 2.0]);
    }
}
