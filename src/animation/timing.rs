//! Easing curves for the choreography.
//!
//! Every stage of the delete animation runs on a fixed-duration curve; the
//! three bezier curves used by the control live in [`crate::button`] as
//! constants built from [`TimingFunction::CubicBezier`].

use std::sync::Arc;

/// Timing function that shapes the progress of an animated value.
#[derive(Clone)]
pub enum TimingFunction {
    /// Constant speed.
    Linear,
    /// Starts slow, ends fast.
    EaseIn,
    /// Starts fast, ends slow.
    EaseOut,
    /// Slow start and end, fast middle.
    EaseInOut,
    /// CSS-style cubic-bezier curve (x1, y1, x2, y2).
    CubicBezier(f32, f32, f32, f32),
    /// User-defined curve.
    Custom(Arc<dyn Fn(f32) -> f32 + Send + Sync>),
}

impl TimingFunction {
    /// Evaluate the curve at normalized time `t` in [0, 1].
    ///
    /// The result may leave [0, 1] for curves that overshoot.
    pub fn evaluate(&self, t: f32) -> f32 {
        match self {
            TimingFunction::Linear => t,
            TimingFunction::EaseIn => t * t,
            TimingFunction::EaseOut => t * (2.0 - t),
            TimingFunction::EaseInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    -1.0 + (4.0 - 2.0 * t) * t
                }
            }
            TimingFunction::CubicBezier(x1, y1, x2, y2) => cubic_bezier(t, *x1, *y1, *x2, *y2),
            TimingFunction::Custom(f) => f(t),
        }
    }

    /// Wrap a closure as a timing function.
    pub fn custom<F>(f: F) -> Self
    where
        F: Fn(f32) -> f32 + Send + Sync + 'static,
    {
        TimingFunction::Custom(Arc::new(f))
    }
}

impl std::fmt::Debug for TimingFunction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TimingFunction::Linear => write!(f, "Linear"),
            TimingFunction::EaseIn => write!(f, "EaseIn"),
            TimingFunction::EaseOut => write!(f, "EaseOut"),
            TimingFunction::EaseInOut => write!(f, "EaseInOut"),
            TimingFunction::CubicBezier(x1, y1, x2, y2) => {
                write!(f, "CubicBezier({}, {}, {}, {})", x1, y1, x2, y2)
            }
            TimingFunction::Custom(_) => write!(f, "Custom"),
        }
    }
}

/// Cubic bezier with control points (x1, y1) and (x2, y2), endpoints pinned
/// at (0, 0) and (1, 1). Solves x(s) = t for s with Newton-Raphson, then
/// returns y(s).
fn cubic_bezier(t: f32, x1: f32, y1: f32, x2: f32, y2: f32) -> f32 {
    if t <= 0.0 {
        return 0.0;
    }
    if t >= 1.0 {
        return 1.0;
    }

    let mut s = t;
    for _ in 0..8 {
        let x = bezier_component(s, x1, x2);
        let slope = bezier_slope(s, x1, x2);
        if slope.abs() < 1e-6 {
            break;
        }
        s -= (x - t) / slope;
    }
    bezier_component(s, y1, y2)
}

fn bezier_component(s: f32, c1: f32, c2: f32) -> f32 {
    let s2 = s * s;
    let s3 = s2 * s;
    let m = 1.0 - s;
    3.0 * m * m * s * c1 + 3.0 * m * s2 * c2 + s3
}

fn bezier_slope(s: f32, c1: f32, c2: f32) -> f32 {
    let m = 1.0 - s;
    3.0 * m * m * c1 + 6.0 * m * s * (c2 - c1) + 3.0 * s * s * (1.0 - c2)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linear_is_identity() {
        assert_eq!(TimingFunction::Linear.evaluate(0.0), 0.0);
        assert_eq!(TimingFunction::Linear.evaluate(0.5), 0.5);
        assert_eq!(TimingFunction::Linear.evaluate(1.0), 1.0);
    }

    #[test]
    fn ease_in_lags_at_midpoint() {
        assert!(TimingFunction::EaseIn.evaluate(0.5) < 0.5);
    }

    #[test]
    fn ease_out_leads_at_midpoint() {
        assert!(TimingFunction::EaseOut.evaluate(0.5) > 0.5);
    }

    #[test]
    fn bezier_endpoints_are_pinned() {
        let curve = TimingFunction::CubicBezier(0.11, 0.0, 0.5, 0.0);
        assert_eq!(curve.evaluate(0.0), 0.0);
        assert_eq!(curve.evaluate(1.0), 1.0);
    }

    #[test]
    fn bezier_is_monotonic_for_button_curves() {
        for curve in [
            TimingFunction::CubicBezier(0.25, 1.0, 0.5, 1.0),
            TimingFunction::CubicBezier(0.11, 0.0, 0.5, 0.0),
            TimingFunction::CubicBezier(0.64, 0.0, 0.78, 0.0),
        ] {
            let mut last = 0.0;
            for i in 0..=20 {
                let v = curve.evaluate(i as f32 / 20.0);
                assert!(v >= last - 1e-4, "{curve:?} regressed at step {i}");
                last = v;
            }
        }
    }

    #[test]
    fn custom_closure_is_applied() {
        let square = TimingFunction::custom(|t| t * t);
        assert_eq!(square.evaluate(0.5), 0.25);
    }
}
