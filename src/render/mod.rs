mod affine;
pub mod fonts;
mod raster;

pub use affine::Affine;
pub use fonts::{FontError, FontStore, TextMask};
pub use raster::Compositor;

use std::path::PathBuf;

use image::RgbaImage;

use crate::animation::Transform;
use crate::widgets::{Color, FontFamily, FontWeight, Rect};

/// Device-space clip region (rounded rectangle).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Clip {
    pub rect: Rect,
    pub corner_radius: f32,
}

/// A recorded draw call, captured with the transform, opacity and clip that
/// were current when it was issued.
pub enum Primitive {
    Quad {
        rect: Rect,
        color: Color,
        corner_radius: f32,
        transform: Affine,
        opacity: f32,
        clip: Option<Clip>,
    },
    TextRun {
        text: String,
        rect: Rect,
        color: Color,
        font_size: f32,
        font_family: FontFamily,
        font_weight: FontWeight,
        transform: Affine,
        opacity: f32,
        clip: Option<Clip>,
    },
}

/// Records primitives during the paint pass; the compositor consumes them
/// afterwards. Transform pushes resolve widget transforms into affines so
/// nesting is plain matrix multiplication.
pub struct PaintContext {
    primitives: Vec<Primitive>,
    transforms: Vec<Affine>,
    opacities: Vec<f32>,
    clips: Vec<Clip>,
}

impl PaintContext {
    pub fn new() -> Self {
        Self {
            primitives: Vec::new(),
            transforms: vec![Affine::IDENTITY],
            opacities: vec![1.0],
            clips: Vec::new(),
        }
    }

    fn current_transform(&self) -> Affine {
        *self.transforms.last().expect("transform stack underflow")
    }

    fn current_opacity(&self) -> f32 {
        *self.opacities.last().expect("opacity stack underflow")
    }

    fn current_clip(&self) -> Option<Clip> {
        self.clips.last().copied()
    }

    /// Push a widget transform resolved against the bounds it pivots on.
    pub fn push_transform(&mut self, transform: Transform, bounds: Rect) {
        let local = Affine::from_transform(&transform, bounds);
        self.transforms.push(self.current_transform().then_inner(&local));
    }

    pub fn pop_transform(&mut self) {
        debug_assert!(self.transforms.len() > 1, "unbalanced pop_transform");
        if self.transforms.len() > 1 {
            self.transforms.pop();
        }
    }

    /// Multiply an opacity factor onto the current one.
    pub fn push_opacity(&mut self, opacity: f32) {
        self.opacities.push(self.current_opacity() * opacity.clamp(0.0, 1.0));
    }

    pub fn pop_opacity(&mut self) {
        debug_assert!(self.opacities.len() > 1, "unbalanced pop_opacity");
        if self.opacities.len() > 1 {
            self.opacities.pop();
        }
    }

    /// Clip subsequent primitives to a rounded rect. The clip is evaluated
    /// in device space: meaningful for untransformed subtrees (the button
    /// clips its overflowing content while itself staying axis-aligned).
    pub fn push_clip(&mut self, rect: Rect, corner_radius: f32) {
        self.clips.push(Clip {
            rect,
            corner_radius,
        });
    }

    pub fn pop_clip(&mut self) {
        self.clips.pop();
    }

    pub fn draw_rect(&mut self, rect: Rect, color: Color) {
        self.draw_rounded_rect(rect, color, 0.0);
    }

    pub fn draw_rounded_rect(&mut self, rect: Rect, color: Color, corner_radius: f32) {
        self.primitives.push(Primitive::Quad {
            rect,
            color,
            corner_radius,
            transform: self.current_transform(),
            opacity: self.current_opacity(),
            clip: self.current_clip(),
        });
    }

    pub fn draw_text(&mut self, text: &str, rect: Rect, color: Color, font_size: f32) {
        self.draw_text_styled(
            text,
            rect,
            color,
            font_size,
            FontFamily::default(),
            FontWeight::default(),
        );
    }

    pub fn draw_text_styled(
        &mut self,
        text: &str,
        rect: Rect,
        color: Color,
        font_size: f32,
        font_family: FontFamily,
        font_weight: FontWeight,
    ) {
        if text.is_empty() {
            return;
        }
        self.primitives.push(Primitive::TextRun {
            text: text.to_string(),
            rect,
            color,
            font_size,
            font_family,
            font_weight,
            transform: self.current_transform(),
            opacity: self.current_opacity(),
            clip: self.current_clip(),
        });
    }

    pub fn primitives(&self) -> &[Primitive] {
        &self.primitives
    }

    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }
}

impl Default for PaintContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Destination for composited frames.
pub trait FrameSink {
    fn present(&mut self, frame: &RgbaImage, index: u64);
}

/// Discards frames; rendering still happens.
pub struct NullSink;

impl FrameSink for NullSink {
    fn present(&mut self, _frame: &RgbaImage, _index: u64) {}
}

/// Writes numbered PNG frames into a directory.
pub struct PngSink {
    dir: PathBuf,
}

impl PngSink {
    pub fn new(dir: impl Into<PathBuf>) -> std::io::Result<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }
}

impl FrameSink for PngSink {
    fn present(&mut self, frame: &RgbaImage, index: u64) {
        let path = self.dir.join(format!("frame_{index:04}.png"));
        if let Err(e) = frame.save(&path) {
            log::error!("failed to write {}: {e}", path.display());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::Transform;

    #[test]
    fn transform_stack_composes_and_pops() {
        let mut ctx = PaintContext::new();
        let bounds = Rect::new(0.0, 0.0, 10.0, 10.0);
        ctx.push_transform(Transform::translate(5.0, 0.0), bounds);
        ctx.push_transform(Transform::translate(0.0, 7.0), bounds);
        ctx.draw_rect(bounds, Color::RED);
        ctx.pop_transform();
        ctx.pop_transform();
        ctx.draw_rect(bounds, Color::RED);

        match &ctx.primitives()[0] {
            Primitive::Quad { transform, .. } => {
                assert_eq!(transform.apply(0.0, 0.0), (5.0, 7.0));
            }
            _ => unreachable!(),
        }
        match &ctx.primitives()[1] {
            Primitive::Quad { transform, .. } => assert!(transform.is_identity()),
            _ => unreachable!(),
        }
    }

    #[test]
    fn opacity_stack_multiplies() {
        let mut ctx = PaintContext::new();
        ctx.push_opacity(0.5);
        ctx.push_opacity(0.5);
        ctx.draw_rect(Rect::new(0.0, 0.0, 1.0, 1.0), Color::WHITE);
        match &ctx.primitives()[0] {
            Primitive::Quad { opacity, .. } => assert!((opacity - 0.25).abs() < 1e-6),
            _ => unreachable!(),
        }
    }

    #[test]
    fn empty_text_is_not_recorded() {
        let mut ctx = PaintContext::new();
        ctx.draw_text("", Rect::default(), Color::WHITE, 14.0);
        assert!(ctx.is_empty());
    }
}
