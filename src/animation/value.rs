use std::time::Duration;

use super::{Animatable, Transition};

/// A scalar that can be snapped or animated toward a target.
///
/// The value holds no clock of its own: `animate_to` records the timestamp
/// the transition was scheduled at, and `advance` recomputes the current
/// value from whatever timestamp the caller passes in. Advancing inside the
/// transition's delay window leaves the value untouched.
#[derive(Debug, Clone)]
pub struct AnimatedScalar {
    current: f32,
    start: f32,
    target: f32,
    started_at: Duration,
    transition: Transition,
    running: bool,
}

impl AnimatedScalar {
    pub fn new(initial: f32) -> Self {
        Self {
            current: initial,
            start: initial,
            target: initial,
            started_at: Duration::ZERO,
            transition: Transition::default(),
            running: false,
        }
    }

    /// Current interpolated value.
    pub fn get(&self) -> f32 {
        self.current
    }

    /// Target the value is moving toward (equals the value when settled).
    pub fn target(&self) -> f32 {
        self.target
    }

    /// True while a transition is scheduled or in flight.
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Set the value immediately, cancelling any transition in flight.
    pub fn snap(&mut self, value: f32) {
        self.current = value;
        self.start = value;
        self.target = value;
        self.running = false;
    }

    /// Start animating toward `target` at time `now`. Scheduling the same
    /// target again while already moving toward it is a no-op.
    pub fn animate_to(&mut self, target: f32, transition: Transition, now: Duration) {
        if self.running && target == self.target {
            return;
        }
        self.start = self.current;
        self.target = target;
        self.transition = transition;
        self.started_at = now;
        self.running = true;
    }

    /// Recompute the current value for time `now`. Returns true if the
    /// value changed. On completion the value lands exactly on the target.
    pub fn advance(&mut self, now: Duration) -> bool {
        if !self.running {
            return false;
        }

        let elapsed_ms = now.saturating_sub(self.started_at).as_secs_f32() * 1000.0
            - self.transition.delay_ms;
        if elapsed_ms <= 0.0 {
            // Still inside the stagger delay.
            return false;
        }

        let t = (elapsed_ms / self.transition.duration_ms).min(1.0);
        let new_value = if t >= 1.0 {
            self.running = false;
            self.target
        } else {
            f32::lerp(&self.start, &self.target, self.transition.timing.evaluate(t))
        };

        let changed = new_value != self.current;
        self.current = new_value;
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::TimingFunction;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    #[test]
    fn settles_exactly_on_target() {
        let mut v = AnimatedScalar::new(1.0);
        v.animate_to(4.0, Transition::new(600.0, TimingFunction::EaseOut), ms(0));
        v.advance(ms(300));
        assert!(v.is_running());
        v.advance(ms(600));
        assert_eq!(v.get(), 4.0);
        assert!(!v.is_running());
    }

    #[test]
    fn linear_midpoint() {
        let mut v = AnimatedScalar::new(0.0);
        v.animate_to(10.0, Transition::new(400.0, TimingFunction::Linear), ms(0));
        v.advance(ms(200));
        assert!((v.get() - 5.0).abs() < 1e-4);
    }

    #[test]
    fn delay_holds_the_value() {
        let mut v = AnimatedScalar::new(0.0);
        v.animate_to(
            1.0,
            Transition::new(300.0, TimingFunction::Linear).delay(120.0),
            ms(0),
        );
        assert!(!v.advance(ms(100)));
        assert_eq!(v.get(), 0.0);
        assert!(v.is_running());
        v.advance(ms(120 + 150));
        assert!((v.get() - 0.5).abs() < 1e-4);
        v.advance(ms(120 + 300));
        assert_eq!(v.get(), 1.0);
    }

    #[test]
    fn snap_cancels_transition() {
        let mut v = AnimatedScalar::new(0.0);
        v.animate_to(1.0, Transition::new(300.0, TimingFunction::Linear), ms(0));
        v.snap(0.0);
        assert!(!v.is_running());
        assert!(!v.advance(ms(300)));
        assert_eq!(v.get(), 0.0);
    }

    #[test]
    fn same_target_does_not_restart() {
        let mut v = AnimatedScalar::new(0.0);
        v.animate_to(1.0, Transition::new(300.0, TimingFunction::Linear), ms(0));
        v.advance(ms(150));
        // Re-scheduling the same target later must not rewind progress.
        v.animate_to(1.0, Transition::new(300.0, TimingFunction::Linear), ms(150));
        v.advance(ms(300));
        assert_eq!(v.get(), 1.0);
        assert!(!v.is_running());
    }

    #[test]
    fn scheduling_with_nonzero_now_uses_relative_time() {
        let mut v = AnimatedScalar::new(1.0);
        v.animate_to(4.0, Transition::new(600.0, TimingFunction::Linear), ms(1000));
        assert!(!v.advance(ms(1000)));
        v.advance(ms(1300));
        assert!((v.get() - 2.5).abs() < 1e-4);
    }
}
