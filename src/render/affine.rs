use crate::animation::Transform;
use crate::widgets::Rect;

/// 2D affine matrix:
///
/// ```text
/// x' = xx * x + xy * y + tx
/// y' = yx * x + yy * y + ty
/// ```
///
/// Transforms are resolved into affines when pushed on the paint context,
/// so nested widget transforms compose by plain matrix multiplication and
/// the compositor can sample primitives through the inverse.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Affine {
    pub xx: f32,
    pub xy: f32,
    pub yx: f32,
    pub yy: f32,
    pub tx: f32,
    pub ty: f32,
}

impl Affine {
    pub const IDENTITY: Self = Self {
        xx: 1.0,
        xy: 0.0,
        yx: 0.0,
        yy: 1.0,
        tx: 0.0,
        ty: 0.0,
    };

    pub fn translation(tx: f32, ty: f32) -> Self {
        Self {
            tx,
            ty,
            ..Self::IDENTITY
        }
    }

    /// Resolve a widget [`Transform`] against the bounds it applies to.
    /// Scale and rotation pivot around the transform origin, expressed as a
    /// fraction of the bounds; the resulting matrix maps the same
    /// coordinate space the bounds live in.
    pub fn from_transform(transform: &Transform, bounds: Rect) -> Self {
        let ox = bounds.x + bounds.width * transform.origin.0;
        let oy = bounds.y + bounds.height * transform.origin.1;

        let (sin, cos) = transform.rotate.sin_cos();
        let (sx, sy) = transform.scale;

        // T(translate) * T(origin) * R * S * T(-origin)
        let xx = cos * sx;
        let xy = -sin * sy;
        let yx = sin * sx;
        let yy = cos * sy;

        Self {
            xx,
            xy,
            yx,
            yy,
            tx: ox + transform.translate.0 - (xx * ox + xy * oy),
            ty: oy + transform.translate.1 - (yx * ox + yy * oy),
        }
    }

    /// Compose: `(a.then_inner(b)).apply(p) == a.apply(b.apply(p))`.
    /// `b` is the inner (child) transform applied first.
    pub fn then_inner(&self, b: &Affine) -> Self {
        Self {
            xx: self.xx * b.xx + self.xy * b.yx,
            xy: self.xx * b.xy + self.xy * b.yy,
            yx: self.yx * b.xx + self.yy * b.yx,
            yy: self.yx * b.xy + self.yy * b.yy,
            tx: self.xx * b.tx + self.xy * b.ty + self.tx,
            ty: self.yx * b.tx + self.yy * b.ty + self.ty,
        }
    }

    pub fn apply(&self, x: f32, y: f32) -> (f32, f32) {
        (
            self.xx * x + self.xy * y + self.tx,
            self.yx * x + self.yy * y + self.ty,
        )
    }

    pub fn determinant(&self) -> f32 {
        self.xx * self.yy - self.xy * self.yx
    }

    /// Inverse matrix; `None` when degenerate (zero scale).
    pub fn inverse(&self) -> Option<Self> {
        let det = self.determinant();
        if det.abs() < 1e-9 {
            return None;
        }
        let inv_det = 1.0 / det;
        let xx = self.yy * inv_det;
        let xy = -self.xy * inv_det;
        let yx = -self.yx * inv_det;
        let yy = self.xx * inv_det;
        Some(Self {
            xx,
            xy,
            yx,
            yy,
            tx: -(xx * self.tx + xy * self.ty),
            ty: -(yx * self.tx + yy * self.ty),
        })
    }

    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }

    /// Uniform scale estimate, used to convert local signed distances into
    /// device-space coverage.
    pub fn scale_estimate(&self) -> f32 {
        self.determinant().abs().sqrt()
    }
}

impl Default for Affine {
    fn default() -> Self {
        Self::IDENTITY
    }
}
