use crate::layout::{Constraints, Size};
use crate::render::PaintContext;

use super::font::{FontFamily, FontWeight};
use super::widget::{Color, Rect, Widget};

/// A single icon-font glyph with animatable size and color.
///
/// The glyph box is square (`size` x `size`); the choreography scales it
/// either by growing the font size or by wrapping the paint call in a scale
/// transform, depending on the geometry preset.
pub struct Glyph {
    codepoint: char,
    family: FontFamily,
    size: f32,
    color: Color,
    bounds: Rect,
}

impl Glyph {
    pub fn new(codepoint: char, family: FontFamily) -> Self {
        Self {
            codepoint,
            family,
            size: 16.0,
            color: Color::WHITE,
            bounds: Rect::default(),
        }
    }

    pub fn size(mut self, size: f32) -> Self {
        self.size = size;
        self
    }

    pub fn color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    /// Update the rendered size in place; used when the size itself is the
    /// animated property.
    pub fn set_size(&mut self, size: f32) {
        self.size = size;
    }

    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    pub fn current_size(&self) -> f32 {
        self.size
    }
}

impl Widget for Glyph {
    fn layout(&mut self, constraints: Constraints) -> Size {
        let size = constraints.constrain(Size::new(self.size, self.size));
        self.bounds.width = size.width;
        self.bounds.height = size.height;
        size
    }

    fn set_origin(&mut self, x: f32, y: f32) {
        self.bounds.x = x;
        self.bounds.y = y;
    }

    fn paint(&self, ctx: &mut PaintContext) {
        let mut buf = [0u8; 4];
        ctx.draw_text_styled(
            self.codepoint.encode_utf8(&mut buf),
            self.bounds,
            self.color,
            self.size,
            self.family.clone(),
            FontWeight::NORMAL,
        );
    }

    fn bounds(&self) -> Rect {
        self.bounds
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn glyph_box_is_square() {
        let mut g = Glyph::new('\u{e901}', FontFamily::Name("icon".into())).size(24.0);
        let size = g.layout(Constraints::unbounded());
        assert_eq!(size, Size::new(24.0, 24.0));
    }

    #[test]
    fn set_size_updates_box() {
        let mut g = Glyph::new('\u{e900}', FontFamily::Name("icon".into())).size(24.0);
        g.set_size(96.0);
        let size = g.layout(Constraints::unbounded());
        assert_eq!(size.width, 96.0);
    }
}
