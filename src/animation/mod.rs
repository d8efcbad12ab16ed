mod animatable;
mod clock;
mod interpolate;
mod timing;
mod transform;
mod value;

pub use animatable::Animatable;
pub use clock::{Clock, ManualClock, SystemClock};
pub use interpolate::InterpolationRange;
pub use timing::TimingFunction;
pub use transform::Transform;
pub use value::AnimatedScalar;

/// Configuration for how a value moves to a new target: duration, curve and
/// an optional start delay.
#[derive(Clone, Debug)]
pub struct Transition {
    /// Duration of the animation in milliseconds.
    pub duration_ms: f32,
    /// Timing function controlling the animation curve.
    pub timing: TimingFunction,
    /// Delay before the animation starts, in milliseconds.
    pub delay_ms: f32,
}

impl Transition {
    pub fn new(duration_ms: f32, timing: TimingFunction) -> Self {
        Self {
            duration_ms,
            timing,
            delay_ms: 0.0,
        }
    }

    /// Set the delay before the animation starts.
    pub fn delay(mut self, delay_ms: f32) -> Self {
        self.delay_ms = delay_ms;
        self
    }

    /// Set the duration of the animation.
    pub fn duration(mut self, duration_ms: f32) -> Self {
        self.duration_ms = duration_ms;
        self
    }

    /// Set the timing function.
    pub fn timing(mut self, timing: TimingFunction) -> Self {
        self.timing = timing;
        self
    }
}

impl Default for Transition {
    fn default() -> Self {
        Self::new(300.0, TimingFunction::EaseOut)
    }
}
