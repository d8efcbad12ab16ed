//! Shared font store: measurement and CPU glyph rasterization.
//!
//! A single thread-local cosmic-text `FontSystem` (plus swash cache) serves
//! the whole frame loop, mirroring how the rest of the pipeline treats text:
//! shape once, rasterize to an alpha mask, composite the mask under the
//! current transform.

use std::cell::RefCell;
use std::fmt;

use cosmic_text::{Attrs, Buffer, FontSystem, Metrics, Shaping, SwashCache};

use crate::layout::Size;
use crate::widgets::{FontFamily, FontWeight};

/// Extra pixels around a rasterized run so glyph overhang survives.
const MASK_PADDING: u32 = 4;

/// Failure installing or reading a font.
#[derive(Debug)]
pub enum FontError {
    /// The font file could not be read.
    Io(std::io::Error),
    /// The bytes were not a parseable font face.
    InvalidFontData,
}

impl fmt::Display for FontError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FontError::Io(e) => write!(f, "failed to read font file: {e}"),
            FontError::InvalidFontData => write!(f, "font data could not be parsed"),
        }
    }
}

impl std::error::Error for FontError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FontError::Io(e) => Some(e),
            FontError::InvalidFontData => None,
        }
    }
}

impl From<std::io::Error> for FontError {
    fn from(e: std::io::Error) -> Self {
        FontError::Io(e)
    }
}

/// Alpha coverage mask for one text run. `pad` pixels of slack surround the
/// run on every side; mask pixel `(pad, pad)` corresponds to the run origin.
pub struct TextMask {
    pub width: u32,
    pub height: u32,
    pub pad: u32,
    data: Vec<u8>,
}

impl TextMask {
    fn empty() -> Self {
        Self {
            width: 0,
            height: 0,
            pad: MASK_PADDING,
            data: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Coverage at integer pixel coordinates, 0 outside the mask.
    pub fn coverage(&self, x: i64, y: i64) -> u8 {
        if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
            return 0;
        }
        self.data[y as usize * self.width as usize + x as usize]
    }

    /// Bilinear coverage sample at fractional pixel coordinates.
    pub fn sample(&self, x: f32, y: f32) -> f32 {
        let x0 = x.floor();
        let y0 = y.floor();
        let fx = x - x0;
        let fy = y - y0;
        let (x0, y0) = (x0 as i64, y0 as i64);

        let c00 = self.coverage(x0, y0) as f32;
        let c10 = self.coverage(x0 + 1, y0) as f32;
        let c01 = self.coverage(x0, y0 + 1) as f32;
        let c11 = self.coverage(x0 + 1, y0 + 1) as f32;

        let top = c00 + (c10 - c00) * fx;
        let bottom = c01 + (c11 - c01) * fx;
        (top + (bottom - top) * fy) / 255.0
    }
}

pub struct FontStore {
    font_system: FontSystem,
    swash_cache: SwashCache,
}

impl FontStore {
    pub fn new() -> Self {
        Self {
            font_system: FontSystem::new(),
            swash_cache: SwashCache::new(),
        }
    }

    /// Install an in-memory font (the bundled icon font). Fails when the
    /// bytes do not contain a single parseable face.
    pub fn install_font_data(&mut self, data: Vec<u8>) -> Result<(), FontError> {
        let faces_before = self.font_system.db().len();
        self.font_system.db_mut().load_font_data(data);
        if self.font_system.db().len() == faces_before {
            return Err(FontError::InvalidFontData);
        }
        Ok(())
    }

    /// True when a family of the given name is installed.
    pub fn has_family(&self, family: &str) -> bool {
        self.font_system
            .db()
            .faces()
            .any(|face| face.families.iter().any(|(name, _)| name == family))
    }

    pub fn measure(
        &mut self,
        text: &str,
        font_size: f32,
        family: &FontFamily,
        weight: FontWeight,
    ) -> Size {
        let buffer = self.shape(text, font_size, family, weight, None);

        let mut width = 0.0f32;
        let mut height = 0.0f32;
        for run in buffer.layout_runs() {
            width = width.max(run.line_w);
            height += run.line_height;
        }
        if height == 0.0 {
            height = font_size * 1.2;
        }
        Size::new(width, height)
    }

    /// Rasterize a run into an alpha mask at its natural size.
    pub fn rasterize(
        &mut self,
        text: &str,
        font_size: f32,
        family: &FontFamily,
        weight: FontWeight,
    ) -> TextMask {
        let measured = self.measure(text, font_size, family, weight);
        if measured.is_empty() {
            return TextMask::empty();
        }

        let pad = MASK_PADDING;
        let width = measured.width.ceil() as u32 + pad * 2;
        let height = measured.height.ceil() as u32 + pad * 2;
        let mut data = vec![0u8; (width * height) as usize];

        let buffer = self.shape(text, font_size, family, weight, Some(measured));
        let runs: Vec<_> = buffer
            .layout_runs()
            .map(|run| {
                let glyphs: Vec<_> = run
                    .glyphs
                    .iter()
                    .map(|g| g.physical((0.0, 0.0), 1.0))
                    .collect();
                (run.line_y, glyphs)
            })
            .collect();

        for (line_y, glyphs) in runs {
            for glyph in glyphs {
                let Some(image) = self
                    .swash_cache
                    .get_image(&mut self.font_system, glyph.cache_key)
                else {
                    continue;
                };
                let gw = image.placement.width as usize;
                let gh = image.placement.height as usize;
                if gw == 0 || gh == 0 {
                    continue;
                }

                // Coverage per pixel: mask data is grayscale, color data
                // carries coverage in its alpha channel.
                let coverage_at = |i: usize| match image.content {
                    cosmic_text::SwashContent::Color => image.data[i * 4 + 3],
                    _ => image.data[i],
                };

                let origin_x = pad as i32 + glyph.x + image.placement.left;
                let origin_y =
                    pad as i32 + line_y.round() as i32 + glyph.y - image.placement.top;
                for gy in 0..gh {
                    for gx in 0..gw {
                        let px = origin_x + gx as i32;
                        let py = origin_y + gy as i32;
                        if px < 0 || py < 0 || px >= width as i32 || py >= height as i32 {
                            continue;
                        }
                        let idx = py as usize * width as usize + px as usize;
                        data[idx] = data[idx].max(coverage_at(gy * gw + gx));
                    }
                }
            }
        }

        TextMask {
            width,
            height,
            pad,
            data,
        }
    }

    fn shape(
        &mut self,
        text: &str,
        font_size: f32,
        family: &FontFamily,
        weight: FontWeight,
        size: Option<Size>,
    ) -> Buffer {
        let metrics = Metrics::new(font_size, font_size * 1.2);
        let mut buffer = Buffer::new(&mut self.font_system, metrics);

        // An unbounded buffer measures the natural run width; a bounded one
        // reproduces that measurement for rasterization.
        let (w, h) = match size {
            Some(s) => (Some(s.width.ceil() + 1.0), Some(s.height.ceil() + 1.0)),
            None => (None, None),
        };
        buffer.set_size(&mut self.font_system, w, h);
        buffer.set_text(
            &mut self.font_system,
            text,
            &Attrs::new().family(family.to_cosmic()).weight(weight.to_cosmic()),
            Shaping::Advanced,
            None,
        );
        buffer.shape_until_scroll(&mut self.font_system, true);
        buffer
    }
}

impl Default for FontStore {
    fn default() -> Self {
        Self::new()
    }
}

thread_local! {
    static FONT_STORE: RefCell<FontStore> = RefCell::new(FontStore::new());
}

/// Run a closure against the shared font store.
pub fn with_font_store<R>(f: impl FnOnce(&mut FontStore) -> R) -> R {
    FONT_STORE.with_borrow_mut(f)
}

/// Measure a text run with the shared store.
pub fn measure_text(text: &str, font_size: f32, family: &FontFamily, weight: FontWeight) -> Size {
    with_font_store(|store| store.measure(text, font_size, family, weight))
}

/// Rasterize a text run with the shared store.
pub fn rasterize_text(
    text: &str,
    font_size: f32,
    family: &FontFamily,
    weight: FontWeight,
) -> TextMask {
    with_font_store(|store| store.rasterize(text, font_size, family, weight))
}

/// Install font bytes into the shared store.
pub fn install_font_data(data: Vec<u8>) -> Result<(), FontError> {
    with_font_store(|store| store.install_font_data(data))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_font_data_is_rejected() {
        let mut store = FontStore::new();
        let result = store.install_font_data(vec![0x00, 0x01, 0x02, 0x03]);
        assert!(matches!(result, Err(FontError::InvalidFontData)));
    }

    #[test]
    fn measure_empty_text_has_line_height() {
        let mut store = FontStore::new();
        let size = store.measure("", 14.0, &FontFamily::SansSerif, FontWeight::NORMAL);
        assert_eq!(size.width, 0.0);
        assert!(size.height > 0.0);
    }

    #[test]
    fn mask_sample_outside_is_zero() {
        let mask = TextMask::empty();
        assert_eq!(mask.sample(10.0, 10.0), 0.0);
        assert_eq!(mask.coverage(-1, -1), 0);
    }

    #[test]
    fn font_error_display() {
        let err = FontError::InvalidFontData;
        assert!(err.to_string().contains("parsed"));
    }
}
