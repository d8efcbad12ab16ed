pub mod animation;
pub mod button;
pub mod icon;
pub mod layout;
pub mod reactive;
pub mod render;
pub mod shell;
pub mod widgets;

use std::collections::VecDeque;
use std::time::Duration;

use animation::{Clock, SystemClock};
use layout::{Constraints, Size};
use render::{Compositor, FrameSink, NullSink, PaintContext};
use widgets::{Color, Event, Widget};

pub mod prelude {
    pub use crate::animation::{
        AnimatedScalar, Animatable, Clock, InterpolationRange, ManualClock, SystemClock,
        TimingFunction, Transform, Transition,
    };
    pub use crate::button::{delete_button, DeleteButton, GeometryPreset, IconScaling, Phase};
    pub use crate::icon::{icon, IconName};
    pub use crate::layout::{Constraints, Size};
    pub use crate::reactive::{create_signal, Signal};
    pub use crate::render::{Compositor, FrameSink, NullSink, PaintContext, PngSink};
    pub use crate::shell::{shell, FontStatus, Shell};
    pub use crate::widgets::{
        text, Color, Event, EventResponse, FontFamily, FontWeight, MouseButton, Padding, Rect,
        Widget,
    };
    pub use crate::{App, AppConfig, UpdateCtx};
}

pub use render::PngSink;

pub struct AppConfig {
    pub width: u32,
    pub height: u32,
    pub background_color: Color,
    /// Sleep between frames; zero for as-fast-as-possible (driven loops).
    pub frame_interval: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            width: 360,
            height: 180,
            background_color: Color::WHITE,
            frame_interval: Duration::from_millis(16),
        }
    }
}

/// Handed to the update callback each frame, before events are dispatched.
pub struct UpdateCtx<'a> {
    /// Queue of synthetic input events; drained into the widget tree this
    /// frame.
    pub events: &'a mut VecDeque<Event>,
    pub frame: u64,
    pub now: Duration,
}

/// Called once per frame before rendering. Use it to feed events and read
/// signals updated by background threads.
pub type UpdateCallback = Box<dyn FnMut(&mut UpdateCtx)>;

/// Headless frame loop: tick, layout, paint, composite, present.
///
/// ```ignore
/// App::new()
///     .frames(240)
///     .sink(PngSink::new("target/frames")?)
///     .run(shell("assets/icon.ttf"));
/// ```
pub struct App {
    config: AppConfig,
    clock: Box<dyn Clock>,
    sink: Box<dyn FrameSink>,
    on_update: Option<UpdateCallback>,
    max_frames: Option<u64>,
}

impl App {
    pub fn new() -> Self {
        Self {
            config: AppConfig::default(),
            clock: Box::new(SystemClock::new()),
            sink: Box::new(NullSink),
            on_update: None,
            max_frames: None,
        }
    }

    pub fn with_config(config: AppConfig) -> Self {
        Self {
            config,
            ..Self::new()
        }
    }

    pub fn width(mut self, width: u32) -> Self {
        self.config.width = width;
        self
    }

    pub fn height(mut self, height: u32) -> Self {
        self.config.height = height;
        self
    }

    pub fn background_color(mut self, color: Color) -> Self {
        self.config.background_color = color;
        self
    }

    pub fn frame_interval(mut self, interval: Duration) -> Self {
        self.config.frame_interval = interval;
        self
    }

    /// Replace the wall clock; a [`animation::ManualClock`] makes the whole
    /// loop deterministic.
    pub fn clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    pub fn sink(mut self, sink: impl FrameSink + 'static) -> Self {
        self.sink = Box::new(sink);
        self
    }

    /// Stop after this many frames instead of looping forever.
    pub fn frames(mut self, max_frames: u64) -> Self {
        self.max_frames = Some(max_frames);
        self
    }

    /// Set a callback that runs each frame before rendering.
    pub fn on_update<F: FnMut(&mut UpdateCtx) + 'static>(mut self, callback: F) -> Self {
        self.on_update = Some(Box::new(callback));
        self
    }

    pub fn run<W: Widget + 'static>(mut self, mut root: W) {
        let _ = env_logger::try_init();

        let compositor = Compositor::new(self.config.width, self.config.height);
        let constraints = Constraints::tight(Size::new(
            self.config.width as f32,
            self.config.height as f32,
        ));

        log::info!(
            "running {}x{} surface{}",
            self.config.width,
            self.config.height,
            match self.max_frames {
                Some(n) => format!(" for {n} frames"),
                None => String::new(),
            }
        );

        let mut events: VecDeque<Event> = VecDeque::new();
        let mut frame: u64 = 0;

        loop {
            if let Some(ref mut callback) = self.on_update {
                callback(&mut UpdateCtx {
                    events: &mut events,
                    frame,
                    now: self.clock.now(),
                });
            }

            while let Some(event) = events.pop_front() {
                root.event(&event);
            }

            // Re-read after the callback so a manually driven clock moves
            // the same frame it was advanced in.
            let now = self.clock.now();
            root.tick(now);
            root.layout(constraints);
            root.set_origin(0.0, 0.0);

            let mut paint_ctx = PaintContext::new();
            root.paint(&mut paint_ctx);

            let image = compositor.render(&paint_ctx, self.config.background_color);
            self.sink.present(&image, frame);

            frame += 1;
            if let Some(max) = self.max_frames {
                if frame >= max {
                    log::info!("rendered {frame} frames, done");
                    break;
                }
            }

            if !self.config.frame_interval.is_zero() {
                std::thread::sleep(self.config.frame_interval);
            }
        }
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}
