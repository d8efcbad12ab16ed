/// 2D transformation applied at paint time; never affects layout.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    /// Translation in x and y.
    pub translate: (f32, f32),
    /// Scale in x and y (1.0 = no scale).
    pub scale: (f32, f32),
    /// Rotation in radians, clockwise.
    pub rotate: f32,
    /// Transform origin as a fraction of the bounds (0.5, 0.5 = center).
    pub origin: (f32, f32),
}

impl Transform {
    pub const IDENTITY: Self = Self {
        translate: (0.0, 0.0),
        scale: (1.0, 1.0),
        rotate: 0.0,
        origin: (0.5, 0.5),
    };

    pub fn translate(x: f32, y: f32) -> Self {
        Self {
            translate: (x, y),
            ..Self::IDENTITY
        }
    }

    pub fn scale(x: f32, y: f32) -> Self {
        Self {
            scale: (x, y),
            ..Self::IDENTITY
        }
    }

    pub fn scale_uniform(scale: f32) -> Self {
        Self::scale(scale, scale)
    }

    pub fn rotate(radians: f32) -> Self {
        Self {
            rotate: radians,
            ..Self::IDENTITY
        }
    }

    /// Rotation given in degrees, matching how the geometry tables are
    /// written.
    pub fn rotate_degrees(degrees: f32) -> Self {
        Self::rotate(degrees.to_radians())
    }

    pub fn with_translate(mut self, x: f32, y: f32) -> Self {
        self.translate = (x, y);
        self
    }

    pub fn with_rotate_degrees(mut self, degrees: f32) -> Self {
        self.rotate = degrees.to_radians();
        self
    }

    pub fn with_scale(mut self, x: f32, y: f32) -> Self {
        self.scale = (x, y);
        self
    }

    pub fn with_origin(mut self, x: f32, y: f32) -> Self {
        self.origin = (x, y);
        self
    }

    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY || {
            self.translate == (0.0, 0.0) && self.scale == (1.0, 1.0) && self.rotate == 0.0
        }
    }

    /// Apply the transform to a point expressed relative to a bounding box
    /// of the given size. Scale and rotation pivot around the origin point.
    pub fn apply_to_point(&self, x: f32, y: f32, width: f32, height: f32) -> (f32, f32) {
        let origin_x = width * self.origin.0;
        let origin_y = height * self.origin.1;

        let mut tx = (x - origin_x) * self.scale.0;
        let mut ty = (y - origin_y) * self.scale.1;

        if self.rotate.abs() > 1e-6 {
            let cos = self.rotate.cos();
            let sin = self.rotate.sin();
            let rx = tx * cos - ty * sin;
            let ry = tx * sin + ty * cos;
            tx = rx;
            ty = ry;
        }

        (
            tx + origin_x + self.translate.0,
            ty + origin_y + self.translate.1,
        )
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_leaves_points_alone() {
        let (x, y) = Transform::IDENTITY.apply_to_point(10.0, 20.0, 100.0, 100.0);
        assert_eq!((x, y), (10.0, 20.0));
    }

    #[test]
    fn translation_offsets_points() {
        let t = Transform::translate(5.0, 10.0);
        let (x, y) = t.apply_to_point(10.0, 20.0, 100.0, 100.0);
        assert_eq!((x, y), (15.0, 30.0));
    }

    #[test]
    fn scale_pivots_around_center() {
        let t = Transform::scale_uniform(2.0);
        let (x, y) = t.apply_to_point(10.0, 10.0, 100.0, 100.0);
        // (10, 10) is (-40, -40) from the center; doubled and recentered.
        assert!((x - -30.0).abs() < 0.1);
        assert!((y - -30.0).abs() < 0.1);
    }

    #[test]
    fn rotation_quarter_turn() {
        let t = Transform::rotate_degrees(90.0).with_origin(0.0, 0.0);
        let (x, y) = t.apply_to_point(1.0, 0.0, 10.0, 10.0);
        assert!(x.abs() < 1e-5);
        assert!((y - 1.0).abs() < 1e-5);
    }
}
