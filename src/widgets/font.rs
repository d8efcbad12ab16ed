//! Font family and weight types for text styling.

use cosmic_text::{Family, Weight};

/// Font family specification.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum FontFamily {
    /// Default system sans-serif.
    #[default]
    SansSerif,
    /// Default system serif.
    Serif,
    /// Default system monospace.
    Monospace,
    /// Custom font by family name (how the bundled icon font is addressed).
    Name(String),
}

impl FontFamily {
    /// Convert to the cosmic-text family for shaping.
    pub fn to_cosmic(&self) -> Family<'_> {
        match self {
            FontFamily::SansSerif => Family::SansSerif,
            FontFamily::Serif => Family::Serif,
            FontFamily::Monospace => Family::Monospace,
            FontFamily::Name(name) => Family::Name(name),
        }
    }
}

/// Font weight on the CSS 100-900 scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FontWeight(pub u16);

impl FontWeight {
    pub const NORMAL: Self = Self(400);
    pub const MEDIUM: Self = Self(500);
    pub const SEMI_BOLD: Self = Self(600);
    pub const BOLD: Self = Self(700);

    pub fn to_cosmic(self) -> Weight {
        Weight(self.0)
    }
}

impl Default for FontWeight {
    fn default() -> Self {
        Self::NORMAL
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn family_defaults_to_sans_serif() {
        assert_eq!(FontFamily::default(), FontFamily::SansSerif);
    }

    #[test]
    fn weight_constants() {
        assert_eq!(FontWeight::NORMAL.0, 400);
        assert_eq!(FontWeight::BOLD.0, 700);
        assert_eq!(FontWeight::default(), FontWeight::NORMAL);
    }
}
