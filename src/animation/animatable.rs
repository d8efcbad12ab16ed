use super::Transform;
use crate::widgets::Color;

/// Types that can be animated by interpolating between two values.
pub trait Animatable: Clone + PartialEq + Send + Sync + 'static {
    /// Linear interpolation: t = 0.0 returns `from`, t = 1.0 returns `to`.
    /// `t` may leave [0, 1] for overshooting curves.
    fn lerp(from: &Self, to: &Self, t: f32) -> Self;
}

impl Animatable for f32 {
    fn lerp(from: &Self, to: &Self, t: f32) -> Self {
        from + (to - from) * t
    }
}

impl Animatable for Color {
    fn lerp(from: &Self, to: &Self, t: f32) -> Self {
        Color {
            r: from.r + (to.r - from.r) * t,
            g: from.g + (to.g - from.g) * t,
            b: from.b + (to.b - from.b) * t,
            a: from.a + (to.a - from.a) * t,
        }
    }
}

impl Animatable for Transform {
    fn lerp(from: &Self, to: &Self, t: f32) -> Self {
        Transform {
            translate: (
                f32::lerp(&from.translate.0, &to.translate.0, t),
                f32::lerp(&from.translate.1, &to.translate.1, t),
            ),
            scale: (
                f32::lerp(&from.scale.0, &to.scale.0, t),
                f32::lerp(&from.scale.1, &to.scale.1, t),
            ),
            rotate: f32::lerp(&from.rotate, &to.rotate, t),
            // Origin is configuration, not state; it does not animate.
            origin: from.origin,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn f32_lerp_endpoints_and_overshoot() {
        assert_eq!(f32::lerp(&0.0, &10.0, 0.0), 0.0);
        assert_eq!(f32::lerp(&0.0, &10.0, 0.5), 5.0);
        assert_eq!(f32::lerp(&0.0, &10.0, 1.0), 10.0);
        assert_eq!(f32::lerp(&0.0, &10.0, 1.5), 15.0);
    }

    #[test]
    fn color_lerp_midpoint() {
        let mid = Color::lerp(&Color::BLACK, &Color::WHITE, 0.5);
        assert_eq!(mid.r, 0.5);
        assert_eq!(mid.g, 0.5);
        assert_eq!(mid.b, 0.5);
    }

    #[test]
    fn transform_lerp_translates() {
        let a = Transform::translate(0.0, 0.0);
        let b = Transform::translate(10.0, 20.0);
        let mid = Transform::lerp(&a, &b, 0.5);
        assert_eq!(mid.translate, (5.0, 10.0));
    }
}
