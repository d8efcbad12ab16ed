use crate::layout::{Constraints, Size};
use crate::reactive::{IntoMaybeDyn, MaybeDyn};
use crate::render::{fonts, PaintContext};

use super::font::{FontFamily, FontWeight};
use super::widget::{Color, Rect, Widget};

/// Single-run text widget.
pub struct Text {
    content: MaybeDyn<String>,
    color: MaybeDyn<Color>,
    font_size: MaybeDyn<f32>,
    font_family: FontFamily,
    font_weight: FontWeight,
    cached_text: String,
    cached_font_size: f32,
    bounds: Rect,
}

impl Text {
    pub fn new(content: impl IntoMaybeDyn<String>) -> Self {
        let content = content.into_maybe_dyn();
        let cached_text = content.get();
        Self {
            content,
            color: MaybeDyn::Static(Color::WHITE),
            font_size: MaybeDyn::Static(14.0),
            font_family: FontFamily::default(),
            font_weight: FontWeight::default(),
            cached_text,
            cached_font_size: 14.0,
            bounds: Rect::default(),
        }
    }

    pub fn color(mut self, color: impl IntoMaybeDyn<Color>) -> Self {
        self.color = color.into_maybe_dyn();
        self
    }

    pub fn font_size(mut self, size: impl IntoMaybeDyn<f32>) -> Self {
        self.font_size = size.into_maybe_dyn();
        self
    }

    pub fn font_family(mut self, family: FontFamily) -> Self {
        self.font_family = family;
        self
    }

    pub fn font_weight(mut self, weight: FontWeight) -> Self {
        self.font_weight = weight;
        self
    }

    fn refresh(&mut self) {
        self.cached_text = self.content.get();
        self.cached_font_size = self.font_size.get();
    }
}

impl Widget for Text {
    fn layout(&mut self, constraints: Constraints) -> Size {
        self.refresh();

        let measured = fonts::measure_text(
            &self.cached_text,
            self.cached_font_size,
            &self.font_family,
            self.font_weight,
        );
        let size = constraints.constrain(measured);

        self.bounds.width = size.width;
        self.bounds.height = size.height;
        size
    }

    fn set_origin(&mut self, x: f32, y: f32) {
        self.bounds.x = x;
        self.bounds.y = y;
    }

    fn paint(&self, ctx: &mut PaintContext) {
        ctx.draw_text_styled(
            &self.cached_text,
            self.bounds,
            self.color.get(),
            self.cached_font_size,
            self.font_family.clone(),
            self.font_weight,
        );
    }

    fn bounds(&self) -> Rect {
        self.bounds
    }
}

/// Create a text widget.
///
/// Accepts static strings or closures:
/// ```ignore
/// text("Delete")
/// text(move || format!("{} frames", count.get()))
/// ```
pub fn text(content: impl IntoMaybeDyn<String>) -> Text {
    Text::new(content)
}
