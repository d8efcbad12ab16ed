//! The app shell.
//!
//! Loads the icon font once on a background thread, renders a blank surface
//! until the bytes are installed, then mounts the delete button exactly
//! once. A failed load is a distinct terminal state: it is logged, and the
//! shell stays blank forever.

use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;
use std::time::Duration;

use crate::button::{delete_button, DeleteButton, GeometryPreset};
use crate::icon::ICON_FONT_FAMILY;
use crate::layout::{Constraints, Size};
use crate::reactive::{create_signal, Signal};
use crate::render::{fonts, FontError, PaintContext};
use crate::widgets::{Color, Event, EventResponse, Rect, Widget};

/// Lifecycle of the one-shot font load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontStatus {
    Loading,
    Ready,
    Failed,
}

type FontResult = Result<Vec<u8>, FontError>;

pub struct Shell {
    status: Signal<FontStatus>,
    loader: Option<Receiver<FontResult>>,
    preset: GeometryPreset,
    button: Option<DeleteButton>,
    background: Color,
    bounds: Rect,
}

impl Shell {
    /// Build a shell that reads the icon font from `font_path` in the
    /// background.
    pub fn new(font_path: impl Into<PathBuf>) -> Self {
        let path = font_path.into();
        let (tx, rx) = mpsc::channel();
        thread::spawn(move || {
            let result = std::fs::read(&path).map_err(FontError::from);
            // The shell may have been dropped already; nothing to do then.
            let _ = tx.send(result);
        });
        Self::with_loader(rx)
    }

    /// Build a shell around an existing loader channel. The production
    /// loader is a file-reading thread; tests inject their own sender.
    pub fn with_loader(loader: Receiver<FontResult>) -> Self {
        Self {
            status: create_signal(FontStatus::Loading),
            loader: Some(loader),
            preset: GeometryPreset::default(),
            button: None,
            background: Color::WHITE,
            bounds: Rect::default(),
        }
    }

    /// Geometry preset handed to the button when it mounts.
    pub fn preset(mut self, preset: GeometryPreset) -> Self {
        self.preset = preset;
        self
    }

    /// Shared handle to the load status.
    pub fn status(&self) -> Signal<FontStatus> {
        self.status.clone()
    }

    pub fn is_mounted(&self) -> bool {
        self.button.is_some()
    }

    /// Drain the loader exactly once; the channel yields a single message.
    fn poll_loader(&mut self) {
        let Some(loader) = &self.loader else {
            return;
        };
        let outcome = match loader.try_recv() {
            Ok(result) => result,
            Err(TryRecvError::Empty) => return,
            Err(TryRecvError::Disconnected) => {
                Err(FontError::Io(std::io::Error::other("font loader vanished")))
            }
        };
        self.loader = None;

        match outcome.and_then(fonts::install_font_data) {
            Ok(()) => {
                log::info!("icon font `{ICON_FONT_FAMILY}` installed, mounting button");
                self.status.set(FontStatus::Ready);
                self.mount();
            }
            Err(e) => {
                log::error!("icon font failed to load: {e}");
                self.status.set(FontStatus::Failed);
            }
        }
    }

    fn mount(&mut self) {
        if self.button.is_none() {
            self.button = Some(delete_button().preset(self.preset));
        }
    }
}

impl Widget for Shell {
    fn tick(&mut self, now: Duration) -> bool {
        self.poll_loader();
        match &mut self.button {
            Some(button) => button.tick(now),
            // Still loading (or failed): blank frame, nothing animates.
            None => false,
        }
    }

    fn layout(&mut self, constraints: Constraints) -> Size {
        // Fill whatever surface the runner gives us.
        let width = if constraints.max_width.is_finite() {
            constraints.max_width
        } else {
            0.0
        };
        let height = if constraints.max_height.is_finite() {
            constraints.max_height
        } else {
            0.0
        };
        let size = constraints.constrain(Size::new(width, height));
        self.bounds.width = size.width;
        self.bounds.height = size.height;

        if let Some(button) = &mut self.button {
            button.layout(Constraints::loose(size));
        }
        size
    }

    fn set_origin(&mut self, x: f32, y: f32) {
        self.bounds.x = x;
        self.bounds.y = y;

        if let Some(button) = &mut self.button {
            let b = button.bounds();
            button.set_origin(
                x + (self.bounds.width - b.width) / 2.0,
                y + (self.bounds.height - b.height) / 2.0,
            );
        }
    }

    fn paint(&self, ctx: &mut PaintContext) {
        ctx.draw_rect(self.bounds, self.background);
        if let Some(button) = &self.button {
            button.paint(ctx);
        }
    }

    fn event(&mut self, event: &Event) -> EventResponse {
        match &mut self.button {
            Some(button) => button.event(event),
            None => EventResponse::Ignored,
        }
    }

    fn bounds(&self) -> Rect {
        self.bounds
    }
}

/// Create the app shell for a font asset path.
pub fn shell(font_path: impl Into<PathBuf>) -> Shell {
    Shell::new(font_path)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    #[test]
    fn starts_loading_and_blank() {
        let (_tx, rx) = mpsc::channel();
        let mut shell = Shell::with_loader(rx);
        assert_eq!(shell.status().get(), FontStatus::Loading);
        assert!(!shell.tick(ms(0)));
        assert!(!shell.is_mounted());
    }

    #[test]
    fn unreadable_font_fails_and_never_mounts() {
        let mut shell = Shell::new("/nonexistent/icon.ttf");
        // Give the loader thread time to fail; poll a few frames like the
        // loop would.
        for i in 0..100 {
            shell.tick(ms(i * 16));
            if shell.status().get() != FontStatus::Loading {
                break;
            }
            thread::sleep(Duration::from_millis(5));
        }
        assert_eq!(shell.status().get(), FontStatus::Failed);
        assert!(!shell.is_mounted());

        // Failure is terminal; later frames stay blank.
        shell.tick(ms(5000));
        assert!(!shell.is_mounted());
    }

    #[test]
    fn garbage_font_bytes_fail() {
        let (tx, rx) = mpsc::channel();
        let mut shell = Shell::with_loader(rx);
        tx.send(Ok(vec![0u8; 16])).unwrap();
        shell.tick(ms(0));
        assert_eq!(shell.status().get(), FontStatus::Failed);
        assert!(!shell.is_mounted());
    }

    #[test]
    fn dropped_loader_is_a_failure() {
        let (tx, rx) = mpsc::channel::<FontResult>();
        drop(tx);
        let mut shell = Shell::with_loader(rx);
        shell.tick(ms(0));
        assert_eq!(shell.status().get(), FontStatus::Failed);
    }

    #[test]
    fn mount_is_idempotent() {
        let (_tx, rx) = mpsc::channel();
        let mut shell = Shell::with_loader(rx);
        shell.mount();
        shell.mount();
        assert!(shell.is_mounted());
    }

    #[test]
    fn mounted_button_is_centered() {
        let (_tx, rx) = mpsc::channel();
        let mut shell = Shell::with_loader(rx);
        shell.mount();
        shell.layout(Constraints::tight(Size::new(360.0, 180.0)));
        shell.set_origin(0.0, 0.0);

        let mut ctx = PaintContext::new();
        shell.paint(&mut ctx);
        assert!(!ctx.is_empty());

        // The 130x45 button is centered on the 360x180 surface, so a click
        // at the surface center lands on it.
        let event = Event::MouseDown {
            x: 180.0,
            y: 90.0,
            button: crate::widgets::MouseButton::Left,
        };
        assert_eq!(shell.event(&event), EventResponse::Handled);
    }
}
