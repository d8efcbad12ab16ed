//! The animated delete button.
//!
//! A self-contained control: callers mount it, tap it, and watch. It owns
//! every animated value, reads them back as interpolated transforms each
//! frame, and keeps its footprint pinned while its content scales well
//! beyond the original bounds.

mod preset;
mod sequence;

pub use preset::{GeometryPreset, HalfGeometry, IconScaling, ICON_SIZE};
pub use sequence::{Phase, Sequencer, EXPANDED, LABEL, OVERSHOOT, RESET, REST};

use std::time::Duration;

use crate::animation::{InterpolationRange, Transform};
use crate::icon::{icon, IconName};
use crate::layout::{Constraints, Size};
use crate::render::PaintContext;
use crate::widgets::{
    text, Color, Event, EventResponse, FontWeight, Glyph, Padding, Rect, Text, Widget,
};

const BUTTON_HEIGHT: f32 = 45.0;
const CORNER_RADIUS: f32 = 11.0;
const CONTENT_WIDTH: f32 = 100.0;
const LABEL_OFFSET_X: f32 = 25.0;
const LABEL_FONT_SIZE: f32 = 14.0;

pub struct DeleteButton {
    sequencer: Sequencer,
    preset: GeometryPreset,
    padding: Padding,
    top_icon: Glyph,
    bottom_icon: Glyph,
    letters: Vec<Text>,
    letter_row: Rect,
    pinned_width: Option<f32>,
    bounds: Rect,
    pressed: bool,
    last_now: Duration,
}

impl DeleteButton {
    pub fn new() -> Self {
        let letters = LABEL
            .iter()
            .map(|ch| {
                text(ch.to_string())
                    .color(Color::WHITE)
                    .font_size(LABEL_FONT_SIZE)
                    .font_weight(FontWeight::BOLD)
            })
            .collect();
        Self {
            sequencer: Sequencer::new(),
            preset: GeometryPreset::default(),
            padding: Padding::symmetric(15.0, 0.0),
            top_icon: icon(IconName::Top).size(ICON_SIZE).color(Color::WHITE),
            bottom_icon: icon(IconName::Bottom).size(ICON_SIZE).color(Color::WHITE),
            letters,
            letter_row: Rect::default(),
            pinned_width: None,
            bounds: Rect::default(),
            pressed: false,
            last_now: Duration::ZERO,
        }
    }

    /// Pick the geometry preset. Configuration, not a runtime switch.
    pub fn preset(mut self, preset: GeometryPreset) -> Self {
        self.preset = preset;
        self
    }

    pub fn sequencer(&self) -> &Sequencer {
        &self.sequencer
    }

    pub fn is_idle(&self) -> bool {
        self.sequencer.is_idle()
    }

    pub fn pinned_width(&self) -> Option<f32> {
        self.pinned_width
    }

    fn paint_icon_half(
        &self,
        ctx: &mut PaintContext,
        glyph: &Glyph,
        geometry: &HalfGeometry,
    ) {
        let position = self.sequencer.position();
        let half_bounds = glyph.bounds();

        let travel = Transform::IDENTITY
            .with_translate(
                geometry.translate_x_range().map(position),
                geometry.translate_y_range().map(position),
            )
            .with_rotate_degrees(geometry.rotate_deg_range().map(position));
        ctx.push_transform(travel, half_bounds);

        // Font-size scaling needs no extra transform: the glyph itself grew
        // during tick.
        let scaled = self.preset.icon_scaling == IconScaling::Transform;
        if scaled {
            let scale = self.sequencer.scale();
            let shift = InterpolationRange::new([1.0, EXPANDED], [0.0, ICON_SIZE]);
            let t = Transform::scale_uniform(scale).with_translate(shift.map(scale), 0.0);
            ctx.push_transform(t, half_bounds);
        }

        glyph.paint(ctx);

        if scaled {
            ctx.pop_transform();
        }
        ctx.pop_transform();
    }

    fn paint_letters(&self, ctx: &mut PaintContext) {
        let scale = self.sequencer.scale();
        let container_rotate = InterpolationRange::new([1.0, EXPANDED], [0.0, -15.0]);
        let container_lift = InterpolationRange::new([1.0, EXPANDED], [0.0, -3.0]);

        let container = Transform::IDENTITY
            .with_translate(0.0, container_lift.map(scale))
            .with_rotate_degrees(container_rotate.map(scale));
        ctx.push_transform(container, self.letter_row);

        for (i, letter) in self.letters.iter().enumerate() {
            let progress = self.sequencer.letter_progress(i);
            let tumble = Transform::IDENTITY
                .with_translate(-8.0 * i as f32 * progress, 20.0 * progress)
                .with_rotate_degrees(-5.0 * progress);

            ctx.push_opacity(self.sequencer.letter_opacity(i));
            ctx.push_transform(tumble, letter.bounds());
            letter.paint(ctx);
            ctx.pop_transform();
            ctx.pop_opacity();
        }

        ctx.pop_transform();
    }
}

impl Widget for DeleteButton {
    fn tick(&mut self, now: Duration) -> bool {
        self.last_now = now;
        let active = self.sequencer.advance(now);

        if self.preset.icon_scaling == IconScaling::FontSize {
            let size = ICON_SIZE * self.sequencer.scale();
            self.top_icon.set_size(size);
            self.bottom_icon.set_size(size);
        }

        active
    }

    fn layout(&mut self, _constraints: Constraints) -> Size {
        let natural = Size::new(
            CONTENT_WIDTH + self.padding.horizontal(),
            BUTTON_HEIGHT,
        );
        // Pin the footprint on the first non-zero layout; the content keeps
        // scaling inside without moving the button's edges.
        if self.pinned_width.is_none() && natural.width > 0.0 {
            self.pinned_width = Some(natural.width);
        }
        let size = Size::new(self.pinned_width.unwrap_or(natural.width), BUTTON_HEIGHT);

        let icon_side = self.top_icon.current_size();
        let icon_constraints = Constraints::tight(Size::new(icon_side, icon_side));
        self.top_icon.layout(icon_constraints);
        self.bottom_icon.layout(icon_constraints);

        let mut row_width = 0.0;
        let mut row_height = 0.0f32;
        for letter in &mut self.letters {
            let letter_size = letter.layout(Constraints::unbounded());
            row_width += letter_size.width;
            row_height = row_height.max(letter_size.height);
        }
        self.letter_row.width = row_width;
        self.letter_row.height = row_height;

        self.bounds.width = size.width;
        self.bounds.height = size.height;
        size
    }

    fn set_origin(&mut self, x: f32, y: f32) {
        self.bounds.x = x;
        self.bounds.y = y;

        // Both halves occupy the same box; the bottom half is painted as an
        // absolutely positioned twin of the top.
        let icon_side = self.top_icon.bounds().width;
        let icon_cx = x + self.padding.left + ICON_SIZE / 2.0;
        let icon_cy = y + BUTTON_HEIGHT / 2.0;
        self.top_icon
            .set_origin(icon_cx - icon_side / 2.0, icon_cy - icon_side / 2.0);
        self.bottom_icon
            .set_origin(icon_cx - icon_side / 2.0, icon_cy - icon_side / 2.0);

        // The label row is centered in the button, nudged right of the icon.
        let row_x =
            x + self.bounds.width / 2.0 + LABEL_OFFSET_X - self.letter_row.width / 2.0;
        let row_y = y + (BUTTON_HEIGHT - self.letter_row.height) / 2.0;
        self.letter_row.x = row_x;
        self.letter_row.y = row_y;

        let mut cursor = row_x;
        for letter in &mut self.letters {
            letter.set_origin(cursor, row_y);
            cursor += letter.bounds().width;
        }
    }

    fn paint(&self, ctx: &mut PaintContext) {
        ctx.draw_rounded_rect(self.bounds, Color::RED, CORNER_RADIUS);

        // The content overflows the button while animating; clip it to the
        // rounded footprint.
        ctx.push_clip(self.bounds, CORNER_RADIUS);
        self.paint_icon_half(ctx, &self.top_icon, &self.preset.top);
        self.paint_icon_half(ctx, &self.bottom_icon, &self.preset.bottom);
        self.paint_letters(ctx);
        ctx.pop_clip();
    }

    fn event(&mut self, event: &Event) -> EventResponse {
        match event {
            Event::MouseDown { x, y, .. } => {
                if self.bounds.contains_rounded(*x, *y, CORNER_RADIUS) {
                    self.pressed = true;
                    EventResponse::Handled
                } else {
                    EventResponse::Ignored
                }
            }
            Event::MouseUp { x, y, .. } => {
                let was_pressed = self.pressed;
                self.pressed = false;
                if was_pressed && self.bounds.contains_rounded(*x, *y, CORNER_RADIUS) {
                    self.sequencer.tap(self.last_now);
                    EventResponse::Handled
                } else {
                    EventResponse::Ignored
                }
            }
            Event::MouseLeave => {
                self.pressed = false;
                EventResponse::Ignored
            }
            Event::MouseMove { .. } => EventResponse::Ignored,
        }
    }

    fn bounds(&self) -> Rect {
        self.bounds
    }
}

impl Default for DeleteButton {
    fn default() -> Self {
        Self::new()
    }
}

/// Create a delete button with the default geometry preset.
pub fn delete_button() -> DeleteButton {
    DeleteButton::new()
}
