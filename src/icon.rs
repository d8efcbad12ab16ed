//! The two-glyph delete icon set.
//!
//! The bundled icon font carries exactly two glyphs, the lid and the body of
//! a trash can, mapped to private-use codepoints. The mapping below is the
//! entire contract between this module and the font asset and must stay in
//! sync with how the font file was generated.

use crate::widgets::{FontFamily, Glyph};

/// Family name the icon font registers under.
pub const ICON_FONT_FAMILY: &str = "icon";

/// Logical glyph names in the icon set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IconName {
    /// Trash-can lid.
    Top,
    /// Trash-can body.
    Bottom,
}

impl IconName {
    /// Codepoint of the glyph in the generated font.
    pub fn codepoint(self) -> char {
        match self {
            IconName::Bottom => '\u{e900}',
            IconName::Top => '\u{e901}',
        }
    }
}

/// Build a glyph widget for an icon. Stateless: size and color are plain
/// inputs, driven per frame by whoever animates them.
pub fn icon(name: IconName) -> Glyph {
    Glyph::new(name.codepoint(), FontFamily::Name(ICON_FONT_FAMILY.to_string()))
}
