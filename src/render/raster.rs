//! Software compositor.
//!
//! Rasterizes the recorded primitives into an RGBA frame: rounded rects via
//! signed distance with one-pixel antialiasing, text via cosmic-text alpha
//! masks sampled bilinearly, both mapped through the inverse of their
//! captured affine so arbitrary rotation and scale come out correct.

use image::{Rgba, RgbaImage};

use super::fonts;
use super::{Affine, Clip, Primitive};
use crate::render::PaintContext;
use crate::widgets::{Color, Rect};

pub struct Compositor {
    width: u32,
    height: u32,
}

impl Compositor {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Composite one frame.
    pub fn render(&self, ctx: &PaintContext, background: Color) -> RgbaImage {
        let mut frame = RgbaImage::from_pixel(self.width, self.height, to_rgba8(background));

        for primitive in ctx.primitives() {
            match primitive {
                Primitive::Quad {
                    rect,
                    color,
                    corner_radius,
                    transform,
                    opacity,
                    clip,
                } => {
                    self.blend_quad(
                        &mut frame,
                        *rect,
                        *color,
                        *corner_radius,
                        transform,
                        *opacity,
                        clip.as_ref(),
                    );
                }
                Primitive::TextRun {
                    text,
                    rect,
                    color,
                    font_size,
                    font_family,
                    font_weight,
                    transform,
                    opacity,
                    clip,
                } => {
                    let mask = fonts::rasterize_text(text, *font_size, font_family, *font_weight);
                    if mask.is_empty() {
                        continue;
                    }
                    self.blend_mask(
                        &mut frame,
                        &mask,
                        *rect,
                        *color,
                        transform,
                        *opacity,
                        clip.as_ref(),
                    );
                }
            }
        }

        frame
    }

    #[allow(clippy::too_many_arguments)]
    fn blend_quad(
        &self,
        frame: &mut RgbaImage,
        rect: Rect,
        color: Color,
        corner_radius: f32,
        transform: &Affine,
        opacity: f32,
        clip: Option<&Clip>,
    ) {
        let Some(inverse) = transform.inverse() else {
            return;
        };
        let Some((x0, y0, x1, y1)) = self.device_bbox(rect, transform) else {
            return;
        };

        let radius = corner_radius.min(rect.width.min(rect.height) / 2.0).max(0.0);
        let scale = transform.scale_estimate().max(1e-3);

        for py in y0..y1 {
            for px in x0..x1 {
                let cx = px as f32 + 0.5;
                let cy = py as f32 + 0.5;
                if !clip_allows(clip, cx, cy) {
                    continue;
                }
                let (lx, ly) = inverse.apply(cx, cy);
                let d = rounded_rect_distance(lx, ly, rect, radius);
                let coverage = (0.5 - d * scale).clamp(0.0, 1.0);
                if coverage <= 0.0 {
                    continue;
                }
                let alpha = color.a * opacity * coverage;
                blend_pixel(frame.get_pixel_mut(px, py), color, alpha);
            }
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn blend_mask(
        &self,
        frame: &mut RgbaImage,
        mask: &fonts::TextMask,
        rect: Rect,
        color: Color,
        transform: &Affine,
        opacity: f32,
        clip: Option<&Clip>,
    ) {
        let Some(inverse) = transform.inverse() else {
            return;
        };
        let pad = mask.pad as f32;
        let mask_rect = Rect::new(
            rect.x - pad,
            rect.y - pad,
            mask.width as f32,
            mask.height as f32,
        );
        let Some((x0, y0, x1, y1)) = self.device_bbox(mask_rect, transform) else {
            return;
        };

        for py in y0..y1 {
            for px in x0..x1 {
                let cx = px as f32 + 0.5;
                let cy = py as f32 + 0.5;
                if !clip_allows(clip, cx, cy) {
                    continue;
                }
                let (lx, ly) = inverse.apply(cx, cy);
                // Mask pixel (pad, pad) sits at the run origin.
                let coverage = mask.sample(lx - rect.x + pad - 0.5, ly - rect.y + pad - 0.5);
                if coverage <= 0.0 {
                    continue;
                }
                let alpha = color.a * opacity * coverage;
                blend_pixel(frame.get_pixel_mut(px, py), color, alpha);
            }
        }
    }

    /// Device-space bounding box of a rect under a transform, clamped to the
    /// frame and outset one pixel for antialiasing. `None` when fully
    /// off-screen.
    fn device_bbox(&self, rect: Rect, transform: &Affine) -> Option<(u32, u32, u32, u32)> {
        let corners = [
            transform.apply(rect.x, rect.y),
            transform.apply(rect.x + rect.width, rect.y),
            transform.apply(rect.x, rect.y + rect.height),
            transform.apply(rect.x + rect.width, rect.y + rect.height),
        ];
        let mut min_x = f32::INFINITY;
        let mut min_y = f32::INFINITY;
        let mut max_x = f32::NEG_INFINITY;
        let mut max_y = f32::NEG_INFINITY;
        for (x, y) in corners {
            min_x = min_x.min(x);
            min_y = min_y.min(y);
            max_x = max_x.max(x);
            max_y = max_y.max(y);
        }

        let x0 = (min_x - 1.0).floor().max(0.0) as u32;
        let y0 = (min_y - 1.0).floor().max(0.0) as u32;
        let x1 = ((max_x + 1.0).ceil() as i64).clamp(0, self.width as i64) as u32;
        let y1 = ((max_y + 1.0).ceil() as i64).clamp(0, self.height as i64) as u32;
        if x0 >= x1 || y0 >= y1 {
            return None;
        }
        Some((x0, y0, x1, y1))
    }
}

fn clip_allows(clip: Option<&Clip>, x: f32, y: f32) -> bool {
    match clip {
        Some(clip) => clip.rect.contains_rounded(x, y, clip.corner_radius),
        None => true,
    }
}

/// Signed distance from a point to a rounded rectangle's edge; negative
/// inside.
fn rounded_rect_distance(x: f32, y: f32, rect: Rect, radius: f32) -> f32 {
    let hw = rect.width / 2.0 - radius;
    let hh = rect.height / 2.0 - radius;
    let cx = rect.x + rect.width / 2.0;
    let cy = rect.y + rect.height / 2.0;

    let qx = (x - cx).abs() - hw;
    let qy = (y - cy).abs() - hh;

    let outside = (qx.max(0.0).powi(2) + qy.max(0.0).powi(2)).sqrt();
    outside + qx.max(qy).min(0.0) - radius
}

fn to_rgba8(color: Color) -> Rgba<u8> {
    Rgba([
        (color.r.clamp(0.0, 1.0) * 255.0).round() as u8,
        (color.g.clamp(0.0, 1.0) * 255.0).round() as u8,
        (color.b.clamp(0.0, 1.0) * 255.0).round() as u8,
        (color.a.clamp(0.0, 1.0) * 255.0).round() as u8,
    ])
}

/// Source-over blend of `color` at `alpha` onto an opaque-ish destination.
fn blend_pixel(dst: &mut Rgba<u8>, color: Color, alpha: f32) {
    let alpha = alpha.clamp(0.0, 1.0);
    let inv = 1.0 - alpha;
    let src = [color.r, color.g, color.b];
    for i in 0..3 {
        let d = dst.0[i] as f32 / 255.0;
        dst.0[i] = ((src[i] * alpha + d * inv) * 255.0).round() as u8;
    }
    let da = dst.0[3] as f32 / 255.0;
    dst.0[3] = ((alpha + da * inv) * 255.0).round() as u8;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn background_fills_the_frame() {
        let compositor = Compositor::new(4, 4);
        let ctx = PaintContext::new();
        let frame = compositor.render(&ctx, Color::WHITE);
        assert_eq!(frame.get_pixel(0, 0), &Rgba([255, 255, 255, 255]));
        assert_eq!(frame.get_pixel(3, 3), &Rgba([255, 255, 255, 255]));
    }

    #[test]
    fn opaque_quad_lands_exactly() {
        let compositor = Compositor::new(10, 10);
        let mut ctx = PaintContext::new();
        ctx.draw_rect(Rect::new(2.0, 2.0, 6.0, 6.0), Color::RED);
        let frame = compositor.render(&ctx, Color::WHITE);
        assert_eq!(frame.get_pixel(5, 5), &Rgba([255, 0, 0, 255]));
        assert_eq!(frame.get_pixel(0, 0), &Rgba([255, 255, 255, 255]));
    }

    #[test]
    fn opacity_blends_toward_background() {
        let compositor = Compositor::new(4, 4);
        let mut ctx = PaintContext::new();
        ctx.push_opacity(0.5);
        ctx.draw_rect(Rect::new(0.0, 0.0, 4.0, 4.0), Color::BLACK);
        let frame = compositor.render(&ctx, Color::WHITE);
        let px = frame.get_pixel(2, 2);
        assert!(px.0[0] > 120 && px.0[0] < 136, "got {:?}", px);
    }

    #[test]
    fn clip_masks_out_pixels() {
        let compositor = Compositor::new(10, 10);
        let mut ctx = PaintContext::new();
        ctx.push_clip(Rect::new(0.0, 0.0, 5.0, 10.0), 0.0);
        ctx.draw_rect(Rect::new(0.0, 0.0, 10.0, 10.0), Color::RED);
        let frame = compositor.render(&ctx, Color::WHITE);
        assert_eq!(frame.get_pixel(2, 5), &Rgba([255, 0, 0, 255]));
        assert_eq!(frame.get_pixel(8, 5), &Rgba([255, 255, 255, 255]));
    }

    #[test]
    fn translated_quad_moves() {
        let compositor = Compositor::new(10, 10);
        let mut ctx = PaintContext::new();
        let rect = Rect::new(0.0, 0.0, 4.0, 4.0);
        ctx.push_transform(crate::animation::Transform::translate(5.0, 5.0), rect);
        ctx.draw_rect(rect, Color::RED);
        ctx.pop_transform();
        let frame = compositor.render(&ctx, Color::WHITE);
        assert_eq!(frame.get_pixel(7, 7), &Rgba([255, 0, 0, 255]));
        assert_eq!(frame.get_pixel(1, 1), &Rgba([255, 255, 255, 255]));
    }

    #[test]
    fn sdf_sign_convention() {
        let rect = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(rounded_rect_distance(5.0, 5.0, rect, 0.0) < 0.0);
        assert!(rounded_rect_distance(15.0, 5.0, rect, 0.0) > 0.0);
        assert!(rounded_rect_distance(10.0, 5.0, rect, 0.0).abs() < 1e-4);
    }
}
