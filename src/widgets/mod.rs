mod font;
mod glyph;
mod text;
mod widget;

pub use font::{FontFamily, FontWeight};
pub use glyph::Glyph;
pub use text::{text, Text};
pub use widget::{Color, Event, EventResponse, MouseButton, Padding, Rect, Widget};

use crate::reactive::{IntoMaybeDyn, MaybeDyn};

impl IntoMaybeDyn<Color> for Color {
    fn into_maybe_dyn(self) -> MaybeDyn<Color> {
        MaybeDyn::Static(self)
    }
}
